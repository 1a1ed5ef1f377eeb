#![allow(dead_code)]

use roster::app::{AppState, build_router, build_state};
use roster::config::{DEFAULT_REALM, RosterConfig};

pub fn local_config() -> RosterConfig {
    RosterConfig {
        bind_addr: "127.0.0.1:0".parse().expect("bind"),
        metrics_bind: "127.0.0.1:0".parse().expect("metrics"),
        realm: DEFAULT_REALM.to_string(),
        users: Vec::new(),
    }
}

pub async fn seeded_state() -> AppState {
    build_state(&local_config()).await.expect("state")
}

pub async fn seeded_app() -> axum::routing::RouterIntoService<axum::body::Body, ()> {
    build_router(seeded_state().await).into_service()
}

pub async fn read_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    serde_json::from_slice(&bytes).expect("json")
}
