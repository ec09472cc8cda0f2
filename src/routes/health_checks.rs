use crate::configuration::Settings;
use crate::helpers::JsonStatus;
use actix_web::{get, web, Responder, Result};

#[tracing::instrument(name = "Root status.", skip(settings))]
#[get("/")]
pub async fn root(settings: web::Data<Settings>) -> Result<impl Responder> {
    Ok(web::Json(JsonStatus::ok(&settings.app_name)))
}

/// Liveness probe for the hosting platform; never reaches the chat backend.
#[get("/health")]
pub async fn health_check() -> Result<impl Responder> {
    Ok(web::Json(JsonStatus::healthy()))
}
