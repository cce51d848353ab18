use std::{net::SocketAddr, path::Path, sync::Arc};

use axum::{
    body::Body, extract::ConnectInfo, http::Request, middleware::{from_fn, Next}, response::Response, routing::get, Router
};
use tower_http::{services::{ServeDir, ServeFile}, trace::TraceLayer};

use crate::server_state::ServerState;

pub mod error;
pub mod ip_logs;
pub mod server_state;

pub const IP_LOGS_PATH: &str = "/ip_logs";
pub const STATIC_PATH: &str = "/frontend/dist";

pub fn build_app(state: Arc<ServerState>, static_dir: &Path) -> Router {
    Router::new()
        .nest_service(STATIC_PATH, ServeDir::new(static_dir))
        .fallback_service(ServeFile::new(static_dir.join("index.html")))
        .route(IP_LOGS_PATH, get(ip_logs::get_logs).post(ip_logs::insert_log))
        .with_state(state)
        .layer(from_fn(log_client_ip))
        .layer(TraceLayer::new_for_http())
}

async fn log_client_ip(req: Request<Body>, next: Next) -> Response {
    // Only the page itself, not every asset it pulls in
    if !req.uri().path().starts_with(STATIC_PATH) {
        if let Some(addr) = req.extensions().get::<ConnectInfo<SocketAddr>>() {
            tracing::debug!("{} {} from {}", req.method(), req.uri().path(), addr.ip());
        }
    }

    next.run(req).await
}
