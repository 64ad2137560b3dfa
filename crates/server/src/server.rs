use axum::{
    Router,
    routing::{get, post},
};

use std::sync::Arc;

use crate::{audit, summary};
use engine::Engine;

#[derive(Clone)]
pub struct ServerState {
    pub engine: Arc<Engine>,
}

fn router(state: ServerState) -> Router {
    Router::new()
        .route("/api/transactions/{user_id}", get(summary::get))
        .route("/api/audit", post(audit::record))
        .route("/api/audit/{user_id}", get(audit::list))
        .with_state(state)
}

pub async fn run_with_listener(
    engine: Engine,
    listener: tokio::net::TcpListener,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", addr);

    let state = ServerState {
        engine: Arc::new(engine),
    };

    axum::serve(listener, router(state)).await
}
