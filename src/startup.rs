use crate::configuration::Settings;
use crate::helpers;
use crate::routes;
use crate::services::ChatService;
use actix_cors::Cors;
use actix_web::{dev::Server, web, App, HttpServer};
use std::net::TcpListener;
use tracing_actix_web::TracingLogger;

/// Credentialed CORS for the allow-listed frontends; any method and header.
fn cors(allowed_origins: &[String]) -> Cors {
    allowed_origins
        .iter()
        .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
        .allow_any_method()
        .allow_any_header()
        .supports_credentials()
        .max_age(3600)
}

pub async fn run(
    listener: TcpListener,
    settings: Settings,
    chat_service: ChatService,
) -> Result<Server, std::io::Error> {
    let allowed_origins = settings.cors.normalized_origins();
    tracing::info!(origins = ?allowed_origins, "CORS allow-list");

    let settings = web::Data::new(settings);
    let chat_service = web::Data::new(chat_service);

    let json_config =
        web::JsonConfig::default().error_handler(|err, _req| helpers::json_payload_error(err));

    let server = HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .wrap(cors(&allowed_origins))
            .service(routes::root)
            .service(routes::health_check)
            .service(
                web::scope("/api")
                    .service(routes::resume::item)
                    .service(routes::chat::item),
            )
            .app_data(json_config.clone())
            .app_data(settings.clone())
            .app_data(chat_service.clone())
    })
    .listen(listener)?
    .run();

    Ok(server)
}
