use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use accessaudit::connector::api::{serve, Container, ContainerConfig, Router};
use accessaudit::Commands;

#[derive(Parser)]
#[command(name = "accessaudit")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Model identifier (overrides GEMINI_MODEL)
    #[arg(long, global = true)]
    model: Option<String>,

    /// API base URL (overrides GEMINI_BASE_URL)
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Upper bound on one model call (overrides GEMINI_TIMEOUT_SECS)
    #[arg(long, global = true, value_parser = clap::value_parser!(u64).range(1..))]
    timeout_secs: Option<u64>,

    /// Answer from a scripted gateway without calling the model service
    #[arg(long, global = true)]
    offline: bool,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    fn container_config(&self) -> ContainerConfig {
        let mut config = ContainerConfig::from_env();
        if let Some(model) = &self.model {
            config.gateway.model = model.clone();
        }
        if let Some(base_url) = &self.base_url {
            config.gateway.base_url = base_url.clone();
        }
        if let Some(secs) = self.timeout_secs {
            config.gateway.timeout = Duration::from_secs(secs);
        }
        config.offline = self.offline;
        config
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let container = Container::new(cli.container_config());

    match cli.command {
        Commands::Serve { port, public } => {
            let host = if public { [0, 0, 0, 0] } else { [127, 0, 0, 1] };
            let addr = SocketAddr::from((host, port));
            info!("Serving model {} over HTTP", container.model());
            serve(Arc::new(container), addr).await?;
        }
        command => {
            let router = Router::new(&container);
            let output = router.route(command).await?;
            println!("{output}");
        }
    }

    Ok(())
}

#[cfg(test)]
mod cli_tests {
    use super::*;

    #[test]
    fn flags_override_environment_defaults() {
        let cli = Cli::try_parse_from([
            "accessaudit",
            "--model",
            "gemini-test",
            "--timeout-secs",
            "5",
            "--offline",
            "analyze-site",
            "example.kz",
        ])
        .unwrap();
        let config = cli.container_config();
        assert_eq!(config.gateway.model, "gemini-test");
        assert_eq!(config.gateway.timeout, Duration::from_secs(5));
        assert!(config.offline);
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let res = Cli::try_parse_from(["accessaudit", "--timeout-secs", "0", "serve"]);
        assert!(res.is_err(), "a zero timeout would fail every call");
    }

    #[test]
    fn serve_defaults_to_port_8080() {
        let cli = Cli::try_parse_from(["accessaudit", "serve"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Serve {
                port: 8080,
                public: false
            }
        ));
    }

    #[test]
    fn chat_requires_a_message() {
        assert!(Cli::try_parse_from(["accessaudit", "chat"]).is_err());
    }
}
