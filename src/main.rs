use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use movie_recommender::config::{LoggingSettings, Settings};
use movie_recommender::routes::{self, AppState};
use movie_recommender::services::MatchLog;
use movie_recommender::{json_config, Recommender};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn init_logging(logging: &LoggingSettings) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&logging.level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    if logging.format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.compact().init();
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    let settings = match Settings::load() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            return Err(std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string()));
        }
    };

    init_logging(&settings.logging);

    info!("Starting movie recommender service...");

    let policy = settings.recommendation.policy();
    let recommender = Recommender::new(policy);

    info!("Recommender initialized with policy: {:?}", policy);

    let match_log = MatchLog::new(settings.logging.match_log_path.clone());
    match match_log.path() {
        Some(path) => info!("Match log enabled at {}", path.display()),
        None => info!("Match log disabled"),
    }

    let app_state = AppState::new(recommender, match_log);

    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    let server = HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(json_config())
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))
    .inspect_err(|e| error!("Failed to bind HTTP server: {}", e))?;

    server.run().await
}
