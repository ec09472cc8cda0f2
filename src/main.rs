use portfolio_api::configuration::get_configuration;
use portfolio_api::connectors::GradioConnector;
use portfolio_api::services::ChatService;
use portfolio_api::startup::run;
use portfolio_api::telemetry::{get_subscriber, init_subscriber};
use std::net::TcpListener;
use std::sync::Arc;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let subscriber = get_subscriber("portfolio-api".into(), "info".into(), std::io::stdout);
    init_subscriber(subscriber);

    let settings = get_configuration().expect("Failed to read configuration.");

    let connector = GradioConnector::new(&settings.chat)
        .map_err(|err| std::io::Error::new(std::io::ErrorKind::Other, err))?;
    tracing::info!(
        space = %settings.chat.space,
        base_url = %connector.base_url(),
        api_name = %settings.chat.api_name,
        "Chat requests are proxied to the Gradio app"
    );
    let chat_service = ChatService::new(Arc::new(connector));

    let address = format!("{}:{}", settings.app_host, settings.app_port);
    tracing::info!("Start server at {:?}", &address);
    let listener =
        TcpListener::bind(&address).expect(&format!("failed to bind to {}", settings.app_port));

    run(listener, settings, chat_service).await?.await
}
