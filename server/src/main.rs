use std::{fs::OpenOptions, net::SocketAddr, path::PathBuf, sync::Arc};

use axum_server::tls_rustls::RustlsConfig;
use ip_logger_data_management::{config, DataManager};
use server::{build_app, server_state::ServerState};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    std::fs::create_dir_all("log")?;
    let log_file = "log/server.log";

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file)?;

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| format!("{}=trace,ip_logger_data_management=debug,tower_http=debug", env!("CARGO_CRATE_NAME")).into())
        )
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::fmt::layer().with_ansi(false).with_writer(file))
        .init();

    tracing::info!("Starting server...");

    let cfg = config::load()?;
    let data_manager = DataManager::start(&cfg.database).await?;

    let server_state = Arc::new(ServerState {
        data_manager,
    });

    let app = build_app(server_state, &PathBuf::from(&cfg.server.static_dir));

    let addr: SocketAddr = format!("{}:{}", cfg.server.bind, cfg.server.port).parse()?;

    match cfg.server.tls() {
        Some((cert, key)) => {
            let tls = RustlsConfig::from_pem_file(cert, key).await?;

            tracing::info!("Listening on https://{}", addr);
            axum_server::bind_rustls(addr, tls)
                .serve(app.into_make_service_with_connect_info::<SocketAddr>())
                .await?;
        }
        None => {
            let listener = tokio::net::TcpListener::bind(addr).await?;

            tracing::info!("Listening on http://{}", listener.local_addr()?);
            axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>())
                .await?;
        }
    }

    Ok(())
}
