use actix_web::{web, App, HttpServer};
use backend::config::AppConfig;
use backend::infra::db::{connect_db, ensure_schema};
use backend::middleware::{AccessLog, CrossOrigin};
use backend::routes;
use backend::state::app_state::AppState;
use backend::state::security_config::SecurityConfig;

mod telemetry;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    telemetry::init_tracing();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Invalid configuration: {e}");
            std::process::exit(1);
        }
    };

    println!(
        "🚀 Starting accounts backend on http://{}:{}",
        config.host, config.port
    );

    // The default database URL points at a SQLite file under ./data.
    if config.database_url.starts_with("sqlite://data/") {
        if let Err(e) = std::fs::create_dir_all("data") {
            eprintln!("❌ Failed to create data directory: {e}");
            std::process::exit(1);
        }
    }

    let db = match connect_db(&config.database_url).await {
        Ok(db) => db,
        Err(e) => {
            eprintln!("❌ Failed to connect to database: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = ensure_schema(&db).await {
        eprintln!("❌ Failed to prepare database schema: {e}");
        std::process::exit(1);
    }

    println!("✅ Database ready");

    let security_config = SecurityConfig::new(config.jwt_secret.as_bytes());
    let app_state = AppState::new(db, security_config);

    // Wrap AppState with web::Data before passing to HttpServer
    let data = web::Data::new(app_state);

    // actix runs the last-registered wrap first, so execution order is
    // CrossOrigin, then AccessLog, then (per protected scope) AuthGate.
    HttpServer::new(move || {
        App::new()
            .wrap(AccessLog)
            .wrap(CrossOrigin)
            .app_data(data.clone())
            .configure(routes::configure)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
