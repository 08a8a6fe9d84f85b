use anyhow::Result;
use clap::Parser;

use flashcards_cli::cli::{Cli, Commands};
use flashcards_cli::commands::{self, generate::GenerateArgs};
use flashcards_cli::logging;
use flashcards_config::ConfigFile;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    logging::init(cli.log_level, cli.verbose);

    let config_file = match cli.config {
        Some(path) => ConfigFile::with_path(path),
        None => ConfigFile::new(),
    };

    match cli.command {
        Commands::Generate {
            note,
            kiln,
            lines,
            dry_run,
        } => {
            commands::generate::execute(
                &config_file,
                GenerateArgs {
                    note,
                    kiln,
                    lines,
                    dry_run,
                },
            )
            .await?
        }

        Commands::Config(cmd) => commands::config::execute(&config_file, cmd)?,
    }

    Ok(())
}
