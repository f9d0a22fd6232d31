use std::sync::Arc;

use dotenvy::dotenv;
use tokio::net::TcpListener;

use charity_events_server::config::{init_tracing, Config};
use charity_events_server::routes::create_routes;
use charity_events_server::state::AppState;
use charity_events_server::store::PgEventStore;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    init_tracing();

    let config = Config::from_env();

    let store = PgEventStore::connect(&config.database).await?;
    tracing::info!("Successfully connected to database");

    store.migrate().await?;
    tracing::info!("Migrations run successfully");

    let app = create_routes(AppState::new(Arc::new(store)), &config);

    let addr = config.socket_addr();
    tracing::info!("Server running at http://{}", addr);
    tracing::info!("API endpoints:");
    tracing::info!("- GET /api/events - all active events");
    tracing::info!("- GET /api/events/search - search active events");
    tracing::info!("- GET /api/events/:id - event details");
    tracing::info!("- GET /api/events/:id/related - related events");
    tracing::info!("- GET /api/categories - all categories");
    tracing::info!("- GET /api/organisations - all organisations");

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
