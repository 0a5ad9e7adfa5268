use std::sync::Arc;
use tracing::info;

use toolcategory_verify::core::config::load_verify_config;
use toolcategory_verify::{router, AppState};

fn parse_port(value: &str) -> Option<u16> {
    value.trim().parse::<u16>().ok().filter(|p| *p != 0)
}

/// First valid `--port N` or `--port=N` in `args`. Invalid values are skipped.
fn port_from_args<I>(args: I) -> Option<u16>
where
    I: IntoIterator<Item = String>,
{
    let mut args = args.into_iter();
    while let Some(a) = args.next() {
        let port = if a == "--port" {
            args.next().as_deref().and_then(parse_port)
        } else {
            a.strip_prefix("--port=").and_then(parse_port)
        };
        if port.is_some() {
            return port;
        }
    }
    None
}

fn port_from_env() -> Option<u16> {
    ["TOOLCATEGORY_VERIFY_PORT", "PORT"]
        .into_iter()
        .find_map(|k| std::env::var(k).ok().as_deref().and_then(parse_port))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,tower_http=warn"));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    info!("Starting badge verification server");

    let config = load_verify_config();
    info!(
        "Environment: {} (upstream error detail logged: {})",
        config.resolve_environment(),
        !config.is_production()
    );

    let state = Arc::new(AppState::from_config(config).await?);
    info!(
        "Badge policy: root={} src={} alt={:?}",
        state.policy.canonical_root, state.policy.badge_src, state.policy.badge_alt
    );

    let app = router(state);

    let port: u16 = port_from_args(std::env::args().skip(1))
        .or_else(port_from_env)
        .unwrap_or(5000);
    let bind_addr = format!("0.0.0.0:{}", port);
    let listener = match tokio::net::TcpListener::bind(&bind_addr).await {
        Ok(l) => l,
        Err(e) if e.kind() == std::io::ErrorKind::AddrInUse => {
            anyhow::bail!(
                "Address already in use: {}. Stop the existing process or run with --port {} (or set PORT/TOOLCATEGORY_VERIFY_PORT).",
                bind_addr,
                port.saturating_add(1)
            )
        }
        Err(e) => return Err(e.into()),
    };
    info!("Listening on http://{}", bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        let mut sigterm = signal(SignalKind::terminate()).ok();

        tokio::select! {
            _ = tokio::signal::ctrl_c() => {},
            _ = async {
                if let Some(ref mut s) = sigterm {
                    s.recv().await;
                } else {
                    futures::future::pending::<()>().await;
                }
            } => {},
        }
    }

    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}
