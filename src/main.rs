use anyhow::Context;
use clap::Parser;
use log::info;
use patient_directory::cli::{Cli, Command, run_query};
use patient_directory::{DirectoryConfig, server};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Setup logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let env_config = DirectoryConfig::from_env().context("Failed to read configuration")?;
    let (config, command) = Cli::parse()
        .resolve(env_config)
        .context("Invalid command-line configuration")?;

    match command {
        Command::Serve(_) => {
            info!("{config}");
            server::serve(&config)
                .await
                .context("Patient directory server failed")?;
        }
        Command::Query(args) => {
            let table = run_query(&config, args.into()).with_context(|| {
                format!("Query against {} failed", config.data_path.display())
            })?;
            println!("{table}");
        }
    }

    Ok(())
}
