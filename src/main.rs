use actix_cors::Cors;
use actix_web::{http::header, middleware::NormalizePath, web, App, HttpServer};
use tracing_actix_web::TracingLogger;
use tracing_subscriber::EnvFilter;

use contact_relay::{
    constants::{GLOBAL_LIMIT, LIMITER_IDLE_TTL, RATE_LIMIT_WINDOW},
    graceful_shutdown::shutdown_signal,
    limiter::rate_limiter::SlidingWindowStore,
    middlewares::rate_limit::GlobalRateLimit,
    routes::configure_routes,
    settings::AppConfig,
    AppState,
};

fn init_tracing(config: &AppConfig) {
    // runtime mode only changes verbosity; RUST_LOG still wins when set
    let default_level = if config.is_production() { "info" } else { "debug" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let config = match AppConfig::new() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    init_tracing(&config);
    tracing::info!("Loaded configuration: {:?}", config);

    let app_state = web::Data::new(match AppState::new(&config) {
        Ok(state) => state,
        Err(e) => {
            tracing::error!("Mailer setup error: {}", e);
            std::process::exit(1);
        }
    });
    app_state.contact_limiter.spawn_idle_eviction(LIMITER_IDLE_TTL);

    let global_limiter = SlidingWindowStore::new(RATE_LIMIT_WINDOW, GLOBAL_LIMIT);
    global_limiter.spawn_idle_eviction(LIMITER_IDLE_TTL);

    let server_addr = format!("{}:{}", config.host, config.port);

    tracing::info!(
        "Starting {} v{} on {}",
        config.name,
        env!("CARGO_PKG_VERSION"),
        server_addr
    );

    let cors_origins = config.cors_origins();
    let trust_proxy_headers = config.trust_proxy_headers;

    let server = HttpServer::new(move || {
        let mut cors = Cors::default()
            .allowed_methods(vec!["GET", "POST"])
            .allowed_headers(vec![header::CONTENT_TYPE, header::ACCEPT])
            .max_age(3600);
        for origin in &cors_origins {
            cors = if origin == "*" {
                cors.allow_any_origin()
            } else {
                cors.allowed_origin(origin)
            };
        }

        // wraps execute in reverse registration order: the limiter sits
        // closest to the routes, behind logging, CORS, and path trimming
        App::new()
            .app_data(app_state.clone())
            .wrap(GlobalRateLimit::new(
                global_limiter.clone(),
                trust_proxy_headers,
            ))
            .wrap(NormalizePath::trim())
            .wrap(cors)
            .wrap(TracingLogger::default())
            .configure(configure_routes)
    })
    .workers(config.worker_count)
    .bind(server_addr)?
    .run();

    tokio::select! {
        res = server => res,
        _ = shutdown_signal() => Ok(()),
    }
}
