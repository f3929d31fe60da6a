use std::env;
use std::sync::Arc;

use anyhow::Context;
use recipebox_server::config::Config;
use recipebox_server::store::PgRecipeStore;
use recipebox_server::{api, app, cors_layer, db, telemetry, AppState};
use tokio::signal;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Check for --openapi flag to dump spec and exit
    if env::args().any(|arg| arg == "--openapi") {
        let spec = api::openapi().to_pretty_json()?;
        println!("{}", spec);
        return Ok(());
    }

    let _telemetry = telemetry::init_telemetry()?;

    if let Err(e) = run().await {
        tracing::error!("Failed to start server: {:#}", e);
        return Err(e);
    }

    Ok(())
}

async fn run() -> anyhow::Result<()> {
    let config = Config::from_env()?;

    let pool = tokio::task::spawn_blocking({
        let database_url = config.database_url.clone();
        move || db::create_pool(&database_url)
    })
    .await??;
    tracing::info!("Database connected");

    let state = AppState::new(
        Arc::new(PgRecipeStore::new(pool)),
        config.environment.is_development(),
    );
    let app = app(state, cors_layer(&config.cors_origin)?);

    let address = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {}", address))?;
    let local_addr = listener.local_addr()?;

    tracing::info!(
        "Server running in {:?} mode on {}",
        config.environment,
        local_addr
    );
    tracing::info!("Health check: http://localhost:{}/health", local_addr.port());
    tracing::info!("API base URL: http://localhost:{}/api/recipes", local_addr.port());
    tracing::info!("Swagger UI available at http://localhost:{}/swagger-ui/", local_addr.port());

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // The router, and with it the last handle on the pool, is gone by now
    tracing::info!("Server stopped, database pool released");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
        tracing::info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                tracing::info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                tracing::error!("Failed to install signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
