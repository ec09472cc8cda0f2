use crate::models::RESUME;
use actix_web::{get, web, Responder, Result};

/// GET /api/resume
/// Structured resume data for the widget.
#[tracing::instrument(name = "Get resume.")]
#[get("/resume")]
pub async fn item() -> Result<impl Responder> {
    Ok(web::Json(&RESUME))
}
