use std::sync::Arc;

use domain::{ChatModel, ChatRelay, OpenAiClient, PrescriptionExtractor};

mod config;
mod routes;

use config::Settings;
use routes::AppState;

#[tokio::main]
async fn main() -> Result<(), lambda_http::Error> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_target(false)
        .without_time()
        .init();

    let settings = Settings::from_env()?;

    let model: Arc<dyn ChatModel> = Arc::new(OpenAiClient::new(
        settings.api_key.clone(),
        settings.base_url.clone(),
    ));

    let state = AppState {
        chat: Arc::new(ChatRelay::new(model.clone(), settings.chat_model.clone())),
        extractor: Arc::new(PrescriptionExtractor::new(
            model,
            settings.coding_model.clone(),
        )),
    };

    let app = routes::router(state, settings.max_upload_bytes);

    if std::env::var("AWS_LAMBDA_RUNTIME_API").is_ok() {
        let app = tower::ServiceBuilder::new()
            .layer(axum_aws_lambda::LambdaLayer::default())
            .service(app);

        lambda_http::run(app).await?;
        return Ok(());
    }

    let listener = tokio::net::TcpListener::bind(settings.bind_addr).await?;
    tracing::info!("listening on {}", settings.bind_addr);
    axum::serve(listener, app).await?;
    Ok(())
}
