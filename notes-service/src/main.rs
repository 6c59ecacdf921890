//! Notes Service — CRUD REST API over a single note collection.
//!
//! Notes are persisted in a SQLite database owned by the service and exposed
//! under `/api/notes`.
//!
//! Default: http://127.0.0.1:5000/

mod config;
mod error;
mod routes;
mod store;

use config::Config;
use routes::AppState;
use std::sync::Arc;
use store::NoteStore;

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();
    env_logger::init();

    let config = Config::from_env();

    log::info!("[NOTES] Opening note database at {}", config.database_url);
    let store = match NoteStore::open(&config.database_url) {
        Ok(store) => store,
        Err(e) => {
            log::error!("Failed to open note database: {}", e);
            std::process::exit(1);
        }
    };

    let state = Arc::new(AppState { store });

    let cors = tower_http::cors::CorsLayer::permissive();

    let app = routes::note_routes()
        .with_state(state)
        .layer(cors);

    let addr = config.bind_addr();
    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            log::error!("Failed to bind {}: {}", addr, e);
            std::process::exit(1);
        }
    };

    log::info!("Notes Service listening on http://{}", addr);

    if let Err(e) = axum::serve(listener, app).await {
        log::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
