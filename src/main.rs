//! OpenCourse - a server-rendered educational platform.
//!
//! This binary starts the HTTP server and configures all components.

use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use mongodb::bson::doc;
use mongodb::{Client, Database};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use opencourse::{
    config::{Config, DEFAULT_DATABASE_NAME},
    curriculum::CourseCatalog,
    server::{create_router, AppState, PageRenderer, RouterConfig},
    user::{BcryptVerifier, MongoUserStore},
};

#[tokio::main]
async fn main() -> ExitCode {
    // Load .env before clap reads the environment
    dotenvy::dotenv().ok();

    let config = Config::parse();

    // Initialize logging
    init_logging(config.verbose);

    // Validate configuration
    if let Err(e) = config.validate() {
        error!("Configuration error: {}", e);
        return ExitCode::FAILURE;
    }

    info!("Configuration:");
    info!("  MongoDB URI: {}", config.mongo_uri);
    info!("  Curriculum: {}", config.curriculum_dir.display());
    info!("  Templates: {}", config.templates_dir.display());
    info!("  Static files: {}", config.static_dir.display());
    info!("  Catalogue TTL: {}s", config.catalog_ttl);
    info!("  bcrypt cost: {}", config.hash_cost);

    // Connect to MongoDB and verify connectivity before serving
    info!("");
    info!("Connecting to MongoDB...");
    let database = match connect_database(&config.mongo_uri).await {
        Ok(database) => {
            info!("  Connected successfully");
            info!("  Using database '{}'", database.name());
            database
        }
        Err(e) => {
            error!("  Failed to connect to MongoDB: {}", e);
            error!("");
            error!("  Please check:");
            error!("    - MongoDB is running and reachable");
            error!("    - The connection string is correct: {}", config.mongo_uri);
            error!("    - Credentials in the URI (if any) are valid");
            return ExitCode::FAILURE;
        }
    };

    // Load templates; a missing or broken template directory is fatal
    let renderer = match PageRenderer::from_directory(&config.templates_dir) {
        Ok(renderer) => Arc::new(renderer),
        Err(e) => {
            error!(
                "Failed to load templates from {}: {}",
                config.templates_dir.display(),
                e
            );
            return ExitCode::FAILURE;
        }
    };

    // Assemble application state
    let catalog = Arc::new(CourseCatalog::with_ttl(
        config.curriculum_dir.clone(),
        Duration::from_secs(config.catalog_ttl),
    ));
    let store = Arc::new(MongoUserStore::new(&database));
    let verifier = Arc::new(BcryptVerifier);

    let state = AppState::new(
        store,
        verifier,
        renderer,
        catalog,
        config.curriculum_dir.clone(),
        config.hash_cost,
    );

    // Build router configuration
    let router_config = RouterConfig::new(config.session_secret_or_empty())
        .with_static_dir(config.static_dir.clone())
        .with_tracing(!config.no_tracing);

    let router = create_router(state, router_config);

    // Bind and serve
    let addr = config.bind_address();

    info!("");
    info!("────────────────────────────────────────────────────────────────");
    info!("  Server listening on: http://{}", addr);
    info!("");
    info!("  Try these endpoints:");
    info!("    curl http://{}/ping", addr);
    info!("    open http://{}/catalogue", addr);
    info!("────────────────────────────────────────────────────────────────");
    info!("");

    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("Failed to bind to {}: {}", addr, e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = axum::serve(listener, router).await {
        error!("Server error: {}", e);
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

/// Connect to MongoDB, select the database, and ping it.
async fn connect_database(uri: &str) -> Result<Database, String> {
    let client = Client::with_uri_str(uri)
        .await
        .map_err(|e| format!("{}", e))?;

    let database = client
        .default_database()
        .unwrap_or_else(|| client.database(DEFAULT_DATABASE_NAME));

    database
        .run_command(doc! { "ping": 1 })
        .await
        .map_err(|e| format!("{}", e))?;

    Ok(database)
}

/// Initialize the tracing/logging subsystem.
fn init_logging(verbose: bool) {
    let env_filter = if verbose {
        "opencourse=debug,tower_http=debug"
    } else {
        "opencourse=info,tower_http=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| env_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
