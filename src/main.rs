use axum::Router;
use clap::Parser;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use std::sync::Arc;

use storefront::config::Config;
use storefront::db::{create_pool, init_db, queries, AppState};
use storefront::describe::TemplateGenerator;
use storefront::handlers;
use storefront::models::{Category, NewMyApp, NewProduct};
use storefront::views::ViewTracker;

#[derive(Parser, Debug)]
#[command(name = "storefront")]
#[command(about = "Digital-goods storefront with a manual-payment checkout flow")]
struct Cli {
    /// Seed the database with demo catalog data (dev mode only)
    #[arg(long)]
    seed: bool,

    /// Delete the database on exit (dev mode only, useful for fresh starts)
    #[arg(long)]
    ephemeral: bool,
}

fn generate_admin_key() -> String {
    format!("sf_key_{}", uuid::Uuid::new_v4().as_simple())
}

/// Seeds the catalog with demo data for local development.
/// Only runs when the store is empty.
fn seed_demo_data(state: &AppState) {
    let conn = state.db.get().expect("Failed to get db connection for seeding");

    let existing = queries::list_products(&conn).expect("Failed to list products");
    if !existing.is_empty() {
        tracing::info!("Store already has products, skipping seed");
        return;
    }

    tracing::info!("============================================");
    tracing::info!("SEEDING DEMO CATALOG");
    tracing::info!("============================================");

    let products = [
        NewProduct {
            title: "Mini Shop Starter".to_string(),
            description: "A ready-to-launch storefront mini app with cart and checkout screens."
                .to_string(),
            price: 149.0,
            discount: Some(0.1),
            units_sold: 0,
            rating: 0.0,
            image: "https://cdn.example.com/demo/mini-shop.png".to_string(),
            live_preview_link: "https://demo.example.com/mini-shop".to_string(),
            category: Category::TelegramMiniApps,
        },
        NewProduct {
            title: "Portfolio Site Kit".to_string(),
            description: "Responsive portfolio website template with a content-driven layout."
                .to_string(),
            price: 79.0,
            discount: None,
            units_sold: 0,
            rating: 0.0,
            image: "https://cdn.example.com/demo/portfolio.png".to_string(),
            live_preview_link: "https://demo.example.com/portfolio".to_string(),
            category: Category::Websites,
        },
        NewProduct {
            title: "Support Bot".to_string(),
            description: "Customer support bot with canned replies and an escalation queue."
                .to_string(),
            price: 59.0,
            discount: Some(0.25),
            units_sold: 0,
            rating: 0.0,
            image: "https://cdn.example.com/demo/support-bot.png".to_string(),
            live_preview_link: "https://demo.example.com/support-bot".to_string(),
            category: Category::Bots,
        },
    ];

    for product in &products {
        let created = queries::insert_product(&conn, product).expect("Failed to seed product");
        tracing::info!("Product: {} (id: {})", created.title, created.id);
    }

    let app = queries::insert_my_app(
        &conn,
        &NewMyApp {
            name: "Task Timer".to_string(),
            image: "https://cdn.example.com/demo/task-timer.png".to_string(),
            install_link: "https://apps.example.com/task-timer".to_string(),
        },
    )
    .expect("Failed to seed app");
    tracing::info!("App: {} (id: {})", app.name, app.id);

    tracing::info!("============================================");
    tracing::info!("DEMO CATALOG SEEDED");
    tracing::info!("============================================");
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "storefront=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env();

    if config.dev_mode {
        tracing::info!("Running in DEVELOPMENT mode");
    }

    // Create the store pool and initialize the schema
    let db_pool = create_pool(&config.database_path).expect("Failed to create database pool");
    {
        let conn = db_pool.get().expect("Failed to get connection");
        init_db(&conn).expect("Failed to initialize database");
    }

    // Resolve the admin key, generating one for dev setups that have none
    let admin_api_key = match config.admin_api_key.clone() {
        Some(key) => key,
        None => {
            let key = generate_admin_key();
            tracing::info!("============================================");
            tracing::info!("ADMIN API KEY GENERATED");
            tracing::info!("Key: {}", key);
            tracing::info!("============================================");
            tracing::info!("SAVE THIS KEY - IT WILL NOT BE SHOWN AGAIN");
            tracing::info!("============================================");
            key
        }
    };

    let state = AppState {
        db: db_pool,
        views: Arc::new(ViewTracker::new()),
        admin_api_key,
        describer: Arc::new(TemplateGenerator),
    };

    // Seed demo data if --seed flag is passed (only in dev mode)
    if cli.seed {
        if !config.dev_mode {
            tracing::warn!("--seed flag ignored: not in dev mode (set STOREFRONT_ENV=dev)");
        } else {
            seed_demo_data(&state);
        }
    }

    // Build the application router
    let app = Router::new()
        .merge(handlers::public::router())
        .merge(handlers::admin::router(state.clone()))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start the server
    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind to address");

    let cleanup_on_exit = cli.ephemeral && config.dev_mode;
    let db_path = config.database_path.clone();

    if cleanup_on_exit {
        tracing::info!("EPHEMERAL MODE: database will be deleted on exit");
    }

    tracing::info!("Storefront server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Failed to start server");

    // Cleanup on exit if ephemeral mode
    if cleanup_on_exit {
        tracing::info!("Cleaning up ephemeral database...");
        if let Err(e) = std::fs::remove_file(&db_path) {
            tracing::warn!("Failed to remove {}: {}", db_path, e);
        } else {
            tracing::info!("Removed {}", db_path);
        }
        // Also remove WAL and SHM files if they exist
        let _ = std::fs::remove_file(format!("{}-wal", db_path));
        let _ = std::fs::remove_file(format!("{}-shm", db_path));
        tracing::info!("Ephemeral cleanup complete");
    }
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    tracing::info!("Shutdown signal received, stopping server...");
}
