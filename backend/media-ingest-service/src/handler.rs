//! Lambda invocation handler
use crate::error::Result;
use crate::models::{IngestEvent, IngestResponse};
use crate::workflow::MediaIngestWorkflow;
use lambda_runtime::LambdaEvent;
use serde_json::Value;
use tracing::{debug, info};

/// Entry point wired into `lambda_runtime::run`
pub async fn handle_event(
    workflow: &MediaIngestWorkflow,
    event: LambdaEvent<Value>,
) -> std::result::Result<IngestResponse, lambda_runtime::Error> {
    let LambdaEvent { payload, context } = event;
    info!(request_id = %context.request_id, "Invocation received");

    Ok(process_payload(workflow, payload).await?)
}

/// Parse the trigger payload and run every record through the workflow
pub async fn process_payload(
    workflow: &MediaIngestWorkflow,
    payload: Value,
) -> Result<IngestResponse> {
    debug!(event = %payload, "Invocation payload");

    let records = IngestEvent::from_value(payload)?.into_records()?;
    info!(records = records.len(), "Records parsed");

    workflow.process_batch(&records).await?;
    Ok(IngestResponse::success())
}
