use actix_web::{web, HttpRequest, HttpResponse};

use crate::{
    constants::MSG_CONTACT_RATE_LIMITED, entities::contact::ContactSubmission, errors::AppError,
    utils::get_client_ip::get_client_ip, AppState,
};

/// POST /personaldata: the contact-form relay endpoint. The per-address
/// gate here sits inside the coarser global middleware gate.
pub async fn submit_contact(
    state: web::Data<AppState>,
    req: HttpRequest,
    form: web::Json<ContactSubmission>,
) -> Result<HttpResponse, AppError> {
    let client_ip = get_client_ip(&req, state.trust_proxy_headers);

    if !state.contact_limiter.is_allowed(&client_ip) {
        tracing::warn!(%client_ip, "contact submission rate limited");
        return Err(AppError::RateLimited(MSG_CONTACT_RATE_LIMITED));
    }

    let response = state.contact_handler.submit(form.into_inner()).await?;

    Ok(HttpResponse::Ok().json(response))
}
