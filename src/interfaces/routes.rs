use actix_web::{web, HttpResponse};

use crate::handlers::{contact::submit_contact, json_error, system::health_check};

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/personaldata").route(web::post().to(submit_contact)));
    cfg.service(health_check);

    json_error::config(cfg);

    // anything unanticipated still gets a JSON-shaped answer
    cfg.default_service(web::route().to(|| async {
        HttpResponse::NotFound().json(serde_json::json!({"error": "Not found"}))
    }));
}
