use std::sync::Arc;

use anyhow::Result;
use colored::*;

use vault2hugo::pipeline::{convert, ConversionReport, ConvertConfig, ConvertError, Pipeline};

pub fn run(config: ConvertConfig, json: bool) -> Result<()> {
    let pipeline = Arc::new(Pipeline::hugo(&config));
    let runtime = tokio::runtime::Runtime::new()?;

    let report = match runtime.block_on(convert(pipeline)) {
        Ok(report) => report,
        Err(ConvertError::Config(message)) => {
            eprintln!("{} {}", "Error:".red().bold(), message);
            std::process::exit(2);
        }
        Err(e) => return Err(e.into()),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&config, &report);
    }

    if !report.is_success() {
        std::process::exit(1);
    }

    Ok(())
}

fn print_report(config: &ConvertConfig, report: &ConversionReport) {
    println!("{}", "Vault → Hugo Conversion".bold());
    println!("{}", "=".repeat(60));
    println!();
    println!("Vault:   {}", config.vault_dir.display());
    println!("Content: {}", config.content_dir.display());
    if config.clear_output_dir {
        println!("{}", "Content directory was cleared first".dimmed());
    }
    println!();

    println!("Notes converted:  {}", report.converted.len().to_string().green());
    println!("Files copied:     {}", report.copied.len().to_string().green());
    println!("Links rewritten:  {}", report.links_rewritten);
    println!(
        "Failures:         {}",
        if report.failures.is_empty() {
            "0".green()
        } else {
            report.failures.len().to_string().red()
        }
    );

    if report.failures.is_empty() {
        println!();
        println!("{}", "✓ Conversion complete!".green());
        return;
    }

    println!();
    println!("{}", "Failed files:".red().bold());
    println!("{}", "-".repeat(60));
    for failure in &report.failures {
        println!("  {} {}", "•".red(), failure.error);
    }
}
