// Route exports
pub mod recommend;

use actix_web::web;

pub use recommend::{AppState, GREETING};

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .configure(recommend::configure),
    );
}
