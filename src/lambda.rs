use booking_pass::adapters::SmtpMailer;
use booking_pass::app::build_handler;
use booking_pass::utils::{logger, validation::Validate};
use booking_pass::{AppConfig, WebhookHandler, WebhookRequest, WebhookResponse};
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use std::sync::Arc;

async fn function_handler(
    handler: Arc<WebhookHandler<SmtpMailer>>,
    event: LambdaEvent<WebhookRequest>,
) -> Result<WebhookResponse, Error> {
    tracing::info!("Lambda invoked (request {})", event.context.request_id);
    Ok(handler.handle(&event.payload).await)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    logger::init_lambda_logger();

    // Configuration problems stop the cold start instead of every request.
    let config = AppConfig::from_env()?;
    config.validate()?;

    // Built once per container; warm invocations reuse the SMTP transport.
    let handler = Arc::new(build_handler(&config)?);

    run(service_fn(move |event: LambdaEvent<WebhookRequest>| {
        function_handler(Arc::clone(&handler), event)
    }))
    .await
}
