use std::path::PathBuf;

use clap::Parser;
use rawserve::config::Config;
use rawserve::server;

/// A small HTTP/1.1 server over raw TCP.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Directory served and written by the /files routes
    #[arg(long)]
    directory: Option<PathBuf>,

    /// Address to listen on (overrides LISTEN and the config file)
    #[arg(long)]
    listen: Option<String>,

    /// YAML config file; when absent, the environment is used
    #[arg(long)]
    config: Option<PathBuf>,
}

impl Cli {
    fn into_config(self) -> anyhow::Result<Config> {
        let mut cfg = match &self.config {
            Some(path) => Config::from_file(path)?,
            None => Config::load(),
        };

        if let Some(directory) = self.directory {
            cfg.directory = Some(directory);
        }
        if let Some(listen) = self.listen {
            cfg.listen_addr = listen;
        }

        cfg.validate()?;
        Ok(cfg)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .init();

    let cfg = Cli::parse().into_config()?;

    tokio::select! {
        res = server::listener::run(&cfg) => {
            res?;
        }

        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutdown signal received");
        }
    }

    Ok(())
}
