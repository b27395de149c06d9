use anyhow::Result;
use tokio::net::TcpListener;
use tracing::{debug, error, info, trace};

use crate::config::{Settings, initialize_app_state};
use crate::router::create_router;

pub async fn serve(settings: &Settings) -> Result<()> {
    trace!("Entering serve function");
    info!("Socialite starting up");
    debug!("Settings: {:?}", settings);

    let state = initialize_app_state(settings).await.map_err(|e| {
        error!("Failed to initialize application state: {}", e);
        e
    })?;
    let app = create_router(state);
    debug!("Router created successfully");

    let bind_address = &settings.bind_address;
    let listener = TcpListener::bind(bind_address).await.map_err(|e| {
        error!("Failed to bind to address {}: {}", bind_address, e);
        e
    })?;

    info!("Socialite API server running on http://{}", bind_address);
    info!("Swagger UI available at http://{}/swagger-ui", bind_address);

    if let Err(e) = axum::serve(listener, app).await {
        error!("Server error: {}", e);
        return Err(e.into());
    }

    info!("Server shutdown gracefully");
    Ok(())
}
