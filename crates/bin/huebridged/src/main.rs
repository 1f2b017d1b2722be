//! # huebridged: huebridge daemon
//!
//! Composition root that wires all adapters together and starts the bridge.
//!
//! ## Responsibilities
//! - Parse configuration (env vars, config file)
//! - Initialize logging
//! - Construct the configured light drivers (adapters)
//! - Construct the light service over the registry
//! - Start the background state poller and the SSDP advertiser
//! - Build the axum router, bind the HTTP port and serve
//! - Handle graceful shutdown (SIGTERM/SIGINT)
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer, no domain logic belongs here.

mod config;
mod lights;

use std::net::Ipv4Addr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use huebridge_adapter_http_axum::router;
use huebridge_adapter_http_axum::state::AppState;
use huebridge_adapter_ssdp::{Advertisement, HTTP_PORT, SsdpAdvertiser, SsdpConfig, SsdpError};
use huebridge_app::registry::LightRegistry;
use huebridge_app::services::light_service::LightService;
use huebridge_app::services::state_poller::poll_loop;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing_subscriber::EnvFilter;

use crate::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load().context("failed to load configuration")?;
    init_tracing(&config.logging.filter);

    // Lights
    let client = config.dimmer.build_client()?;
    let lights = lights::build(&config.lights, &client)?;
    let service = Arc::new(LightService::new(LightRegistry::new(lights)));
    tracing::info!(count = service.registry().len(), "lights registered");

    let (ip, interface) = advertised_address(
        &config.discovery,
        &config.server.host,
        huebridge_adapter_ssdp::outbound_ip,
    );
    if config.server.port != HTTP_PORT {
        tracing::warn!(
            port = config.server.port,
            "controllers expect the bridge on port {HTTP_PORT}, the advertised location will not match"
        );
    }

    // Background polling
    let poller = (config.polling.interval_secs > 0).then(|| {
        let interval = Duration::from_secs(config.polling.interval_secs);
        tokio::spawn(poll_loop(Arc::clone(&service), interval))
    });

    // Discovery
    let discovery = if config.discovery.enabled {
        match start_discovery(ip, interface).await {
            Ok(discovery) => Some(discovery),
            Err(err) => {
                tracing::error!(error = ?err, "discovery unavailable, serving HTTP only");
                None
            }
        }
    } else {
        tracing::info!("discovery disabled");
        None
    };

    // HTTP
    let state = AppState::new(Arc::clone(&service), format!("{ip}:{HTTP_PORT}"));
    let app = router::build(state);

    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {bind_addr}"))?;
    tracing::info!(%bind_addr, advertised = %ip, "huebridged listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if let Some((stop, task)) = discovery {
        let _ = stop.send(());
        if let Err(err) = task.await {
            tracing::warn!(error = %err, "SSDP advertiser task failed");
        }
    }
    if let Some(poller) = poller {
        poller.abort();
    }
    tracing::info!("huebridged stopped");
    Ok(())
}

fn init_tracing(filter: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
}

/// The address announced to clients, and the interface to join the
/// multicast group on.
///
/// Without a configured address the outbound address is looked up. If that
/// fails the bind host is announced, or loopback when binding everywhere.
fn advertised_address<F>(discovery: &SsdpConfig, bind_host: &str, lookup: F) -> (Ipv4Addr, Ipv4Addr)
where
    F: FnOnce() -> Result<Ipv4Addr, SsdpError>,
{
    if let Some(ip) = discovery.advertise_ip {
        return (ip, Ipv4Addr::UNSPECIFIED);
    }
    match lookup() {
        Ok(ip) => (ip, ip),
        Err(err) => {
            let fallback = bind_host
                .parse::<Ipv4Addr>()
                .ok()
                .filter(|ip| !ip.is_unspecified())
                .unwrap_or(Ipv4Addr::LOCALHOST);
            tracing::warn!(
                error = ?err,
                advertised = %fallback,
                "cannot determine the outbound address, set discovery.advertise_ip"
            );
            (fallback, Ipv4Addr::UNSPECIFIED)
        }
    }
}

async fn start_discovery(
    ip: Ipv4Addr,
    interface: Ipv4Addr,
) -> anyhow::Result<(oneshot::Sender<()>, JoinHandle<()>)> {
    let advertiser = SsdpAdvertiser::bind(Advertisement::new(ip), interface).await?;
    let (stop, stopped) = oneshot::channel::<()>();
    let task = tokio::spawn(advertiser.serve(async {
        let _ = stopped.await;
    }));
    Ok((stop, task))
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %err, "cannot listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::warn!(error = %err, "cannot listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = terminate => {}
    }
    tracing::info!("shutdown signal received");
}
