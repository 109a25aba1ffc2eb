//! Meritboard server entry point.

use actix_cors::Cors;
use actix_web::{App, HttpServer, http::header, web};
use sea_orm_migration::MigratorTrait;
use tracing::{Level, error, info, warn};
use tracing_subscriber::FmtSubscriber;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use meritboard_lib::api;
use meritboard_lib::config::Config;
use meritboard_lib::db::DbPool;
use meritboard_lib::middleware::AccessLog;
use meritboard_lib::migration::Migrator;

fn init_tracing() {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");
}

/// CORS policy: a local frontend origin in development, same-origin in
/// production.
fn build_cors(is_development: bool) -> Cors {
    let cors = Cors::default()
        .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::ACCEPT,
            header::CONTENT_TYPE,
        ])
        .max_age(3600);

    if is_development {
        cors.allowed_origin("http://localhost:3000")
            .allowed_origin("http://127.0.0.1:3000")
    } else {
        cors
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // --health-check: used by Docker HEALTHCHECK. Succeeds when the
    // configuration loads; the /api/ready endpoint covers the database.
    let args: Vec<String> = std::env::args().collect();
    if args.iter().any(|arg| arg == "--health-check") {
        dotenvy::dotenv().ok();
        std::process::exit(if Config::from_env().is_ok() { 0 } else { 1 });
    }

    dotenvy::dotenv().ok();
    init_tracing();

    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            error!("");
            error!("Check your environment variables:");
            error!("  - RUST_ENV must be set to 'development' or 'production'");
            error!("  - In production, DATABASE_URL and MB_JWT_SECRET must be set");
            error!("  - In production, values must not match development defaults");
            std::process::exit(1);
        }
    };

    info!(
        "Meritboard server {} ({})",
        env!("CARGO_PKG_VERSION"),
        config.environment
    );

    if config.is_development() {
        warn!("Running in DEVELOPMENT mode - do not use in production!");
    }

    let pool = DbPool::connect(&config)
        .await
        .expect("Failed to connect to database");
    info!("Database connection established");

    Migrator::up(pool.connection(), None)
        .await
        .expect("Failed to run migrations");
    info!("Database migrations complete");

    let bind_address = config.bind_address();
    let is_development = config.is_development();
    let workers = if is_development { 4 } else { num_cpus::get() };
    info!("Listening on http://{} with {} workers", bind_address, workers);

    let shutdown_pool = pool.clone();
    let app_config = config.clone();

    let server = HttpServer::new(move || {
        App::new()
            .wrap(build_cors(is_development))
            .wrap(AccessLog)
            .app_data(web::Data::new(pool.clone()))
            .app_data(web::Data::new(app_config.clone()))
            .service(
                web::scope("/api")
                    .configure(api::configure_health_routes)
                    .configure(api::configure_auth_routes)
                    .configure(api::configure_student_routes)
                    .configure(api::configure_behavior_routes)
                    .configure(api::configure_report_routes),
            )
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", api::ApiDoc::openapi()),
            )
    });

    let result = server.workers(workers).bind(&bind_address)?.run().await;

    // The pool is constructed at startup and closed here; handlers only
    // borrow it through app data.
    if let Err(e) = shutdown_pool.close().await {
        warn!("Failed to close database pool: {}", e);
    }

    result
}
