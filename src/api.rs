//! HTTP surface: single and bulk review classification over JSON.

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::routing::post;
use axum::{Json, Router};
use serde::Serialize;
use serde_json::Value;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::aggregate::{BulkReport, analyze_bulk};
use crate::error::ServiceError;
use crate::gemini::{Classifier, GeminiError};
use crate::sentiment::{Sentiment, truncate_for_log};

const NOT_JSON: &str = "Request must be JSON";
const MISSING_REVIEW_TEXT: &str = "Missing 'review_text' in request";
const INVALID_REVIEWS: &str = "Missing or invalid 'reviews' list";
const REVIEW_LOG_CHARS: usize = 50;

/// Read-only state shared by every request.
pub struct AppState<C> {
    pub classifier: C,
    pub bulk_concurrency: usize,
}

impl<C: Classifier> AppState<C> {
    pub fn new(classifier: C, bulk_concurrency: usize) -> Self {
        Self {
            classifier,
            bulk_concurrency: bulk_concurrency.max(1),
        }
    }

    fn ensure_configured(&self) -> Result<(), ServiceError> {
        if self.classifier.is_configured() {
            Ok(())
        } else {
            Err(GeminiError::MissingApiKey.into())
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SentimentResponse {
    pub sentiment: Sentiment,
}

pub fn router<C: Classifier + 'static>(state: AppState<C>) -> Router {
    Router::new()
        .route("/analyze_sentiment", post(analyze_sentiment::<C>))
        .route("/analyze_bulk_reviews", post(analyze_bulk_reviews::<C>))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(Arc::new(state))
}

/// Bind `addr` and serve until Ctrl-C.
pub async fn serve<C: Classifier + 'static>(addr: &str, state: AppState<C>) -> Result<()> {
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!(addr = %listener.local_addr()?, "review sentiment service listening");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutting down");
}

fn json_body(payload: Result<Json<Value>, JsonRejection>) -> Result<Value, ServiceError> {
    match payload {
        Ok(Json(body)) => Ok(body),
        Err(rejection) => {
            warn!(%rejection, "request body is not JSON");
            Err(ServiceError::bad_request(NOT_JSON))
        }
    }
}

async fn analyze_sentiment<C: Classifier>(
    State(state): State<Arc<AppState<C>>>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<SentimentResponse>, ServiceError> {
    let body = json_body(payload)?;
    let review_text = body
        .get("review_text")
        .and_then(Value::as_str)
        .filter(|text| !text.trim().is_empty())
        .ok_or_else(|| ServiceError::bad_request(MISSING_REVIEW_TEXT))?;

    state.ensure_configured()?;

    let raw = state
        .classifier
        .classify(review_text)
        .await
        .inspect_err(|e| {
            warn!(
                review = %truncate_for_log(review_text, REVIEW_LOG_CHARS),
                kind = %e.kind(),
                timeout = e.is_timeout(),
                "error analyzing review"
            );
        })?;
    let sentiment = Sentiment::normalize(&raw);
    info!(%sentiment, "predicted sentiment");
    Ok(Json(SentimentResponse { sentiment }))
}

async fn analyze_bulk_reviews<C: Classifier>(
    State(state): State<Arc<AppState<C>>>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<BulkReport>, ServiceError> {
    let body = json_body(payload)?;
    let reviews = body
        .get("reviews")
        .and_then(Value::as_array)
        .ok_or_else(|| ServiceError::bad_request(INVALID_REVIEWS))?;

    state.ensure_configured()?;

    let report = analyze_bulk(&state.classifier, reviews, state.bulk_concurrency).await;
    Ok(Json(report))
}
