//! Serve command - runs the gateway HTTP server

use std::net::SocketAddr;

use clap::Args;
use tokio::net::TcpListener;
use tracing::info;

use crate::api::create_router_with_state;
use crate::config::AppConfig;
use crate::infrastructure::logging;

#[derive(Debug, Default, Args)]
pub struct ServeArgs {
    /// Bind address, overrides `server.host`
    #[arg(long)]
    pub host: Option<String>,

    /// Listen port, overrides `server.port`
    #[arg(long, short)]
    pub port: Option<u16>,
}

/// Run the gateway server
pub async fn run(args: ServeArgs) -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let mut config = AppConfig::load().unwrap_or_default();
    apply_overrides(&mut config, args);
    logging::init_logging(&config.logging);

    let state = crate::create_app_state_with_config(&config)?;
    let app = create_router_with_state(state);

    let addr = build_socket_addr(&config)?;
    info!("Starting anime gateway on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn apply_overrides(config: &mut AppConfig, args: ServeArgs) {
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
}

fn build_socket_addr(config: &AppConfig) -> anyhow::Result<SocketAddr> {
    Ok(SocketAddr::from((
        config.server.host.parse::<std::net::IpAddr>()?,
        config.server.port,
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overrides_replace_config() {
        let mut config = AppConfig::default();
        apply_overrides(
            &mut config,
            ServeArgs {
                host: Some("127.0.0.1".to_string()),
                port: Some(9000),
            },
        );

        let addr = build_socket_addr(&config).unwrap();
        assert_eq!(addr.to_string(), "127.0.0.1:9000");
    }

    #[test]
    fn test_invalid_host_is_rejected() {
        let mut config = AppConfig::default();
        config.server.host = "not-an-ip".to_string();

        assert!(build_socket_addr(&config).is_err());
    }
}
