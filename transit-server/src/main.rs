use std::error::Error;

use tracing::info;
use tracing_subscriber::EnvFilter;

use transit_server::config::ServerConfig;
use transit_server::data::TransitNetwork;
use transit_server::planner::Planner;
use transit_server::routing::OsrmClient;
use transit_server::web::{AppState, create_router};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("transit_server=info")),
        )
        .init();

    let config = ServerConfig::from_env()?;

    let network = TransitNetwork::load(&config.stops_path, &config.route_path)?;
    info!(
        stops = network.stops().len(),
        route_points = network.route().len(),
        route_km = network.route().length_m() / 1000.0,
        "loaded network"
    );
    if network.stops().is_empty() {
        tracing::warn!(path = %config.stops_path.display(), "no stops loaded; itineraries will fail");
    }

    let router = OsrmClient::new(config.routing.clone())?;
    info!(
        base_url = %config.routing.base_url,
        max_concurrent = config.routing.max_concurrent,
        max_retries = config.routing.max_retries,
        "routing client ready"
    );

    let planner = Planner::new(router, config.planner.clone());
    let app = create_router(AppState::new(planner, network));

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    info!("Transit planner listening on http://{}", config.bind_addr);
    info!("  GET  /health         - Health check");
    info!("  GET  /api/stops      - Stops in route order");
    info!("  GET  /api/route      - Route geometry");
    info!("  POST /api/itinerary  - Plan an itinerary");

    axum::serve(listener, app).await?;
    Ok(())
}
