use crate::forms;
use crate::helpers::JsonDetail;
use crate::services::ChatService;
use actix_web::{post, web, Responder, Result};
use serde_valid::Validate;

/// POST /api/chat
/// Forwards the message and prior turns to the remote chat app.
#[tracing::instrument(name = "Chat.", skip(form, chat_service), fields(history_len = form.history.len()))]
#[post("/chat")]
pub async fn item(
    form: web::Json<forms::ChatForm>,
    chat_service: web::Data<ChatService>,
) -> Result<impl Responder> {
    if let Err(errors) = form.validate() {
        let errors = errors.to_string();
        tracing::debug!("Invalid chat form {:?}", &errors);
        return Err(JsonDetail::unprocessable_entity(errors));
    }

    let form = form.into_inner();
    chat_service
        .send(&form.message, &form.history)
        .await
        .map(web::Json)
        .map_err(|err| {
            tracing::error!(error_kind = err.kind(), "[Chat Error] {}", err);
            actix_web::Error::from(err)
        })
}
