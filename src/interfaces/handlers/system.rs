use std::time::Duration;

use actix_web::{get, HttpResponse, Responder};
use humantime::format_duration;

use crate::constants::START_TIME;

/// Unauthenticated liveness probe. No side effects.
#[get("/health")]
pub async fn health_check() -> impl Responder {
    let now = chrono::Utc::now();
    let uptime = now.signed_duration_since(*START_TIME);
    let human_uptime = format_duration(Duration::from_secs(uptime.num_seconds().max(0) as u64));

    HttpResponse::Ok().json(serde_json::json!({
        "status": "ok",
        "uptime": human_uptime.to_string(),
        "timestamp": now.to_rfc3339(),
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
