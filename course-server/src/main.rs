use std::net::SocketAddr;
use std::sync::Arc;

use course_server::gi::{GiClient, GiConfig, TokenManager};
use course_server::gps::GpsService;
use course_server::search::SearchService;
use course_server::web::{AppState, create_router};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "course_server=debug,info".into()),
        )
        .init();

    // Get credentials from environment
    let base_url = std::env::var("GI_BASE_URL").unwrap_or_else(|_| {
        eprintln!("Warning: GI_BASE_URL not set. API calls will fail.");
        String::new()
    });
    let client_id = std::env::var("GI_CLIENT_ID").unwrap_or_else(|_| {
        eprintln!("Warning: GI_CLIENT_ID not set. API calls will fail.");
        String::new()
    });
    let api_secret = std::env::var("GI_API_SECRET").unwrap_or_else(|_| {
        eprintln!("Warning: GI_API_SECRET not set. API calls will fail.");
        String::new()
    });

    let static_dir = std::env::var("STATIC_DIR").unwrap_or_else(|_| "static".to_string());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(3000);

    // Create GI client
    let config = GiConfig::new(base_url, client_id, api_secret);
    let client = GiClient::new(config).expect("Failed to create GI client");

    // Wire the services around one shared token manager
    let tokens = Arc::new(TokenManager::new(client.clone()));
    let search = SearchService::new(client.clone(), tokens.clone());
    let gps = GpsService::new(client, tokens.clone());

    // Build app state and router
    let state = AppState::new(search, gps, tokens);
    let app = create_router(state, &static_dir);

    // Bind and serve
    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    println!("Course proxy listening on http://{addr}");
    println!();
    println!("API Endpoints:");
    println!("  GET  /health              - Health check");
    println!("  GET  /api/courses/search  - Search courses (q, lat, lng)");
    println!("  GET  /api/courses/gps     - Course GPS detail (publicId)");
    println!("  GET  /api/auth/check      - Upstream auth diagnostic");

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
