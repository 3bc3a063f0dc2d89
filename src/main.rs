mod handlers;
mod middleware;
mod models;
mod services;
mod utils;

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use services::eco_facts::FactPool;
use services::factors::EmissionFactors;
use utils::{config::Config, db::establish_connection};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file FIRST before anything else
    dotenv::dotenv().ok();

    // Initialize logger with default level if RUST_LOG not set
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    println!("=================================================");
    println!("🌱 EcoTracker Backend Server");
    println!("=================================================");

    // Load configuration
    let config = Config::from_env().expect("Failed to load configuration");
    let host = config.host.clone();
    let port = config.port;

    println!("📝 Configuration loaded:");
    println!(
        "   - Database: {}",
        config.database_url.split('@').last().unwrap_or("***")
    );
    println!("   - Host: {}", host);
    println!("   - Port: {}", port);
    println!(
        "   - Registration: {}",
        if config.allow_registration {
            "ENABLED"
        } else {
            "DISABLED"
        }
    );
    println!(
        "   - Log level: {}",
        std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string())
    );

    // Establish database connection
    print!("🔌 Connecting to database... ");
    let db = establish_connection(&config.database_url)
        .await
        .expect("Failed to connect to database");
    println!("✅ Connected!");

    log::info!("Database connection established");

    utils::db::init_schema(&db)
        .await
        .expect("Failed to initialize database schema");
    log::info!("Database schema ready");

    // Static lookup data shared by every worker
    let factors = EmissionFactors::builtin();
    let facts = FactPool::load(&config.eco_facts_path);

    // Start HTTP server
    println!("🌐 Starting HTTP server at http://{}:{}", host, port);
    println!("📍 Available endpoints:");
    println!("   - POST http://{}:{}/auth/register", host, port);
    println!("   - POST http://{}:{}/auth/login", host, port);
    println!(
        "   - GET  http://{}:{}/factors/fuel-types/{{vehicle}}",
        host, port
    );
    println!(
        "   - POST http://{}:{}/emissions/calculate (JWT required)",
        host, port
    );
    println!(
        "   - GET  http://{}:{}/emissions (JWT required)",
        host, port
    );
    println!(
        "   - GET  http://{}:{}/emissions/stats (JWT required)",
        host, port
    );
    println!("=================================================");

    log::info!("Server started at http://{}:{}", host, port);

    HttpServer::new(move || {
        // Strict CORS for authenticated API endpoints
        let cors = Cors::default()
            .allowed_origin("http://localhost:5173")
            .allowed_origin("http://localhost:3000")
            .allowed_origin(&config.frontend_url)
            .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
            .allowed_headers(vec![
                actix_web::http::header::AUTHORIZATION,
                actix_web::http::header::ACCEPT,
                actix_web::http::header::CONTENT_TYPE,
            ])
            .max_age(3600);

        App::new()
            .app_data(web::Data::new(db.clone()))
            .app_data(web::Data::new(config.clone()))
            .app_data(web::Data::new(factors.clone()))
            .app_data(web::Data::new(facts.clone()))
            .wrap(Logger::default())
            .wrap(cors) // CORS must be wrapped AFTER Logger to ensure headers are added to all responses
            // Public endpoints (no authentication required)
            .service(
                web::scope("/auth")
                    .route("/register", web::post().to(handlers::auth::register))
                    .route("/login", web::post().to(handlers::auth::login)),
            )
            .service(
                web::scope("/factors").route(
                    "/fuel-types/{vehicle}",
                    web::get().to(handlers::factors::get_fuel_types),
                ),
            )
            // Protected endpoints (JWT required)
            .service(
                web::scope("/emissions")
                    .wrap(crate::middleware::auth::JwtMiddleware)
                    .route(
                        "/calculate",
                        web::post().to(handlers::emissions::calculate),
                    )
                    .route("", web::get().to(handlers::emissions::get_history))
                    .route("/stats", web::get().to(handlers::emissions::get_stats)),
            )
    })
    .bind((host, port))?
    .run()
    .await
}
