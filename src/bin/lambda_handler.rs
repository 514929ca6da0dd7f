//! AWS Lambda handler for pricing quotes
//!
//! Accepts a project (or a batch of projects) as JSON through a Lambda Function
//! URL and returns the full quote, its rounded summary and the value report.
//!
//! Set ESW_SCHEDULE_PATH to price against a custom JSON schedule.

use aws_lambda_events::event::lambda_function_urls::{LambdaFunctionUrlRequest, LambdaFunctionUrlResponse};
use aws_lambda_events::http::header::{HeaderValue, ACCESS_CONTROL_ALLOW_ORIGIN, CONTENT_TYPE};
use aws_lambda_events::http::HeaderMap;
use esw_pricing::{
    InputField, PricingResult, ProjectInput, QuoteRunner, QuoteSummary, ValidationError, ValueReport,
};
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use serde::{Deserialize, Serialize};

/// Request body: a single project or `{"projects": [...]}`
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum QuoteRequest {
    Batch { projects: Vec<ProjectInput> },
    Single(ProjectInput),
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct QuoteResponse {
    result: PricingResult,
    summary: QuoteSummary,
    value_report: ValueReport,
}

/// Per-project entry of a batch response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct BatchEntry {
    #[serde(skip_serializing_if = "Option::is_none")]
    summary: Option<QuoteSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<PricingResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<ErrorBody>,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    field: Option<InputField>,
}

impl From<&ValidationError> for ErrorBody {
    fn from(e: &ValidationError) -> Self {
        Self {
            error: e.to_string(),
            field: Some(e.field()),
        }
    }
}

fn json_response<T: Serialize>(status: i64, body: &T) -> Result<LambdaFunctionUrlResponse, Error> {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"));

    Ok(LambdaFunctionUrlResponse {
        status_code: status,
        headers,
        body: Some(serde_json::to_string(body)?),
        is_base64_encoded: false,
        cookies: Vec::new(),
    })
}

fn error_response(status: i64, message: String) -> Result<LambdaFunctionUrlResponse, Error> {
    json_response(status, &ErrorBody { error: message, field: None })
}

/// Lambda handler function
async fn handler(
    runner: &QuoteRunner,
    event: LambdaEvent<LambdaFunctionUrlRequest>,
) -> Result<LambdaFunctionUrlResponse, Error> {
    let request = event.payload;

    if request.is_base64_encoded {
        return error_response(400, "Binary request bodies are not supported".to_string());
    }
    let body = request.body.unwrap_or_default();

    let quote_request: QuoteRequest = match serde_json::from_str(&body) {
        Ok(r) => r,
        Err(e) => return error_response(400, format!("Invalid JSON: {}", e)),
    };

    match quote_request {
        QuoteRequest::Single(input) => match runner.run(&input) {
            Ok(result) => {
                let response = QuoteResponse {
                    summary: result.summary(),
                    value_report: ValueReport::from_result(&result),
                    result,
                };
                json_response(200, &response)
            }
            Err(e) => {
                log::info!("Rejected quote request: {}", e);
                json_response(422, &ErrorBody::from(&e))
            }
        },
        QuoteRequest::Batch { projects } => {
            let entries: Vec<BatchEntry> = runner
                .run_batch(&projects)
                .into_iter()
                .map(|outcome| match outcome {
                    Ok(result) => BatchEntry {
                        summary: Some(result.summary()),
                        result: Some(result),
                        error: None,
                    },
                    Err(e) => BatchEntry {
                        summary: None,
                        result: None,
                        error: Some(ErrorBody::from(&e)),
                    },
                })
                .collect();
            log::info!("Priced batch of {} projects", entries.len());
            json_response(200, &entries)
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();

    let runner = match std::env::var("ESW_SCHEDULE_PATH") {
        Ok(path) => QuoteRunner::from_json_path(path)?,
        Err(_) => QuoteRunner::new(),
    };
    let runner = &runner;

    run(service_fn(move |event: LambdaEvent<LambdaFunctionUrlRequest>| async move {
        handler(runner, event).await
    }))
    .await
}
