//! hook-proxy demo server.
//!
//! Serves a single [`Proxy`] with no hooks, configured from a TOML file
//! and/or command-line flags. Flags override the file.
//!
//! ```text
//! hook-proxy --target http://localhost:9090 --bind 127.0.0.1:8080 --log
//! hook-proxy --config proxy.toml
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use hook_proxy::config::{read_config, validate_config, ConfigError, ProxyConfig};
use hook_proxy::lifecycle::{signals, Shutdown};
use hook_proxy::observability::init_logging;
use hook_proxy::{Proxy, ProxyServer};

#[derive(Parser)]
#[command(name = "hook-proxy")]
#[command(about = "Forward every request to a single HTTP upstream", long_about = None)]
struct Cli {
    /// TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Upstream origin, e.g. http://localhost:9090.
    #[arg(short, long)]
    target: Option<String>,

    /// Listen address, e.g. 127.0.0.1:8080.
    #[arg(short, long)]
    bind: Option<String>,

    /// Log proxy creation and every forwarded URL.
    #[arg(long)]
    log: bool,

    /// Leave inbound `origin` headers untouched.
    #[arg(long)]
    no_update_origin: bool,

    /// Log upstream requests and responses in detail.
    #[arg(long)]
    verbose_transport: bool,
}

impl Cli {
    fn apply(&self, config: &mut ProxyConfig) {
        if let Some(target) = &self.target {
            config.proxy.target = target.clone();
        }
        if let Some(bind) = &self.bind {
            config.listener.bind_address = bind.clone();
        }
        if self.log {
            config.proxy.log = true;
        }
        if self.no_update_origin {
            config.proxy.update_origin = false;
        }
        if self.verbose_transport {
            config.proxy.verbose_transport = true;
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => read_config(path)?,
        None => ProxyConfig::default(),
    };
    cli.apply(&mut config);
    validate_config(&config).map_err(ConfigError::Validation)?;

    init_logging(&config.observability);
    tracing::info!("hook-proxy v{} starting", env!("CARGO_PKG_VERSION"));

    let proxy = Proxy::new(config.to_options())?;

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(
        address = %listener.local_addr()?,
        upstream = %proxy.target(),
        transport = ?config.proxy.transport,
        "Listening for connections"
    );

    let shutdown = Shutdown::new();
    let server = tokio::spawn(ProxyServer::new(proxy).run(listener, shutdown.subscribe()));

    signals::shutdown_on_ctrl_c(&shutdown).await?;
    server.await??;

    tracing::info!("Shutdown complete");
    Ok(())
}
