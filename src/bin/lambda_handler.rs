//! AWS Lambda handler that triggers the annuity workflow
//!
//! `POST .../execute_new_annuity` reads the source export, computes every
//! record and populates the summary table. The response carries only the
//! acknowledgment and run-level counts, never per-record data.
//!
//! Configuration comes from the environment; see `land_annuity::config`.
//! Supports Lambda Function URLs for direct HTTP access.

use land_annuity::{workflow::SUCCESS_MESSAGE, RunReport, WorkflowConfig};
use lambda_http::{run, service_fn, Body, Error, Request, Response};
use serde::Serialize;

const ROUTE: &str = "execute_new_annuity";

/// Output from a successful run
#[derive(Debug, Serialize)]
pub struct WorkflowResponse {
    pub message: &'static str,
    pub records_processed: usize,
    pub rows_written: usize,
    pub ineligible_records: usize,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
    pub execution_time_ms: u64,
}

impl WorkflowResponse {
    fn from_report(report: &RunReport, execution_time_ms: u64) -> Self {
        Self {
            message: SUCCESS_MESSAGE,
            records_processed: report.records_processed,
            rows_written: report.rows_written,
            ineligible_records: report.ineligible_records,
            warnings: report.warnings(),
            execution_time_ms,
        }
    }
}

fn cors(builder: lambda_http::http::response::Builder) -> lambda_http::http::response::Builder {
    builder
        .header("Access-Control-Allow-Origin", "*")
        .header("Access-Control-Allow-Methods", "POST, OPTIONS")
        .header("Access-Control-Allow-Headers", "Content-Type")
}

fn error_response(status: u16, message: &str) -> Result<Response<Body>, Error> {
    let body = serde_json::json!({ "error": message });
    Ok(cors(Response::builder())
        .status(status)
        .header("Content-Type", "application/json")
        .body(Body::Text(body.to_string()))?)
}

fn json_response(body: &WorkflowResponse) -> Result<Response<Body>, Error> {
    Ok(cors(Response::builder())
        .status(200)
        .header("Content-Type", "application/json")
        .body(Body::Text(serde_json::to_string(body)?))?)
}

/// Lambda handler function
async fn handler(event: Request) -> Result<Response<Body>, Error> {
    let start = std::time::Instant::now();

    // Handle CORS preflight
    if event.method().as_str() == "OPTIONS" {
        return Ok(cors(Response::builder()).status(200).body(Body::Empty)?);
    }

    if !event.uri().path().trim_end_matches('/').ends_with(ROUTE) {
        return error_response(404, "not found");
    }
    if event.method().as_str() != "POST" {
        return error_response(405, "method not allowed");
    }

    let config = match WorkflowConfig::from_env() {
        Ok(c) => c,
        Err(e) => {
            log::error!("invalid configuration: {e}");
            return error_response(500, &format!("Invalid configuration: {e}"));
        }
    };

    // CSV reads and writes block; keep them off the async workers
    let outcome = tokio::task::spawn_blocking(move || config.execute()).await?;

    match outcome {
        Ok(report) => {
            let elapsed = start.elapsed().as_millis() as u64;
            log::info!("annuity run finished in {elapsed} ms");
            json_response(&WorkflowResponse::from_report(&report, elapsed))
        }
        Err(e) => {
            log::error!("annuity run failed: {e}");
            error_response(500, &format!("Annuity workflow failed: {e}"))
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();
    run(service_fn(handler)).await
}
