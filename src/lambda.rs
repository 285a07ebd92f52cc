use brew_gravity::utils::{logger, validation::Validate};
use brew_gravity::{
    app::handle_submission, BatchReport, FinalGravityPolicy, FormSubmission, LambdaConfig,
    ReferenceCatalog,
};
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use std::sync::Arc;

/// Loaded once per cold start and shared by every invocation.
struct HandlerState {
    catalog: ReferenceCatalog,
    policy: FinalGravityPolicy,
}

async fn function_handler(
    state: Arc<HandlerState>,
    event: LambdaEvent<FormSubmission>,
) -> Result<BatchReport, Error> {
    tracing::info!(request_id = %event.context.request_id, "Handling brew submission");

    let report = handle_submission(&state.catalog, state.policy, event.payload)
        .map_err(|e| Box::new(e) as Box<dyn std::error::Error + Send + Sync>)?;

    Ok(report)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    logger::init_lambda_logger();

    let config = LambdaConfig::from_env()?;
    config.validate()?;

    let catalog = ReferenceCatalog::load(config.catalog_path.as_deref())?;
    tracing::info!("Grain catalog loaded with {} grains", catalog.len());

    let state = Arc::new(HandlerState {
        catalog,
        policy: config.final_gravity_policy(),
    });

    run(service_fn(move |event: LambdaEvent<FormSubmission>| {
        let state = Arc::clone(&state);
        async move { function_handler(state, event).await }
    }))
    .await
}
