mod commands;

use std::path::PathBuf;

use clap::Parser;
use vault2hugo::ConvertConfig;

#[derive(Parser)]
#[command(name = "vault2hugo")]
#[command(about = "Convert an Obsidian vault into a Hugo content directory", long_about = None)]
#[command(version)]
struct Cli {
    #[arg(long, value_name = "DIR", help = "Path to the Obsidian vault")]
    vault_path: PathBuf,
    #[arg(
        long,
        value_name = "DIR",
        help = "Path to the Hugo content output directory (does not have to be content root)"
    )]
    content_path: PathBuf,
    #[arg(long, help = "Remove everything in the content directory first")]
    clear: bool,
    #[arg(long, help = "Do not ask git for last-modified dates")]
    no_git: bool,
    #[arg(long, help = "JSON output")]
    json: bool,
    #[arg(short, long, help = "Log every file")]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    commands::convert::run(
        ConvertConfig {
            vault_dir: cli.vault_path,
            content_dir: cli.content_path,
            clear_output_dir: cli.clear,
            use_git_dates: !cli.no_git,
        },
        cli.json,
    )
}
