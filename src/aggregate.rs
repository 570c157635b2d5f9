//! Bulk aggregation of review classifications.
//!
//! Each item is classified independently. A failing item lands in the
//! `error` bucket and never aborts the batch.

use futures::stream::{self, StreamExt};
use serde::Serialize;
use serde_json::Value;
use tracing::{Instrument, info, info_span, warn};

use crate::gemini::{Classifier, GeminiError};
use crate::sentiment::{Sentiment, truncate_for_log};

const REVIEW_LOG_CHARS: usize = 50;

/// A bulk input entry that is worth sending upstream.
pub struct ReviewItem;

impl ReviewItem {
    /// Returns the review text when `value` is a string that is non-blank after trimming.
    pub fn from_value(value: &Value) -> Option<&str> {
        match value {
            Value::String(s) if !s.trim().is_empty() => Some(s.as_str()),
            _ => None,
        }
    }
}

fn is_zero(n: &u64) -> bool {
    *n == 0
}

/// Label counts for one batch. Buckets start at zero; only non-zero ones are serialized.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Distribution {
    #[serde(skip_serializing_if = "is_zero")]
    pub positive: u64,
    #[serde(skip_serializing_if = "is_zero")]
    pub negative: u64,
    #[serde(skip_serializing_if = "is_zero")]
    pub neutral: u64,
    #[serde(skip_serializing_if = "is_zero")]
    pub error: u64,
}

impl Distribution {
    pub fn record(&mut self, sentiment: Sentiment) {
        match sentiment {
            Sentiment::Positive => self.positive += 1,
            Sentiment::Negative => self.negative += 1,
            Sentiment::Neutral => self.neutral += 1,
        }
    }

    pub fn record_error(&mut self) {
        self.error += 1;
    }

    pub fn count(&self, sentiment: Sentiment) -> u64 {
        match sentiment {
            Sentiment::Positive => self.positive,
            Sentiment::Negative => self.negative,
            Sentiment::Neutral => self.neutral,
        }
    }

    pub fn total(&self) -> u64 {
        self.positive + self.negative + self.neutral + self.error
    }
}

/// Response body of a bulk analysis.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BulkReport {
    pub sentiment_distribution: Distribution,
    pub total_processed: u64,
    pub total_errors: u64,
}

impl BulkReport {
    fn absorb(&mut self, outcome: Result<Sentiment, GeminiError>) {
        match outcome {
            Ok(sentiment) => {
                self.sentiment_distribution.record(sentiment);
                self.total_processed += 1;
            }
            Err(_) => {
                self.sentiment_distribution.record_error();
                self.total_errors += 1;
            }
        }
    }
}

async fn classify_one<C: Classifier>(classifier: &C, text: &str) -> Result<Sentiment, GeminiError> {
    match classifier.classify(text).await {
        Ok(raw) => Ok(Sentiment::normalize(&raw)),
        Err(e) => {
            warn!(
                review = %truncate_for_log(text, REVIEW_LOG_CHARS),
                kind = %e.kind(),
                timeout = e.is_timeout(),
                error = %e,
                "error analyzing review"
            );
            Err(e)
        }
    }
}

/// Classify every valid review in `reviews` and count the outcomes.
///
/// At most `concurrency` upstream calls are in flight; `1` keeps the batch
/// strictly sequential. Counts are merged on the calling task.
pub async fn analyze_bulk<C: Classifier>(
    classifier: &C,
    reviews: &[Value],
    concurrency: usize,
) -> BulkReport {
    let batch_id = uuid::Uuid::new_v4();
    let span = info_span!("bulk", %batch_id, items = reviews.len());

    async move {
        let texts: Vec<String> = reviews
            .iter()
            .filter_map(|value| {
                let text = ReviewItem::from_value(value);
                if text.is_none() {
                    info!(item = %value, "skipping invalid review in bulk analysis");
                }
                text.map(str::to_string)
            })
            .collect();

        // In-flight futures own their text and must not borrow from `reviews`.
        let mut outcomes = stream::iter(texts)
            .map(|text: String| async move { classify_one(classifier, &text).await })
            .buffer_unordered(concurrency.max(1));

        let mut report = BulkReport::default();
        while let Some(outcome) = outcomes.next().await {
            report.absorb(outcome);
        }

        info!(
            processed = report.total_processed,
            errors = report.total_errors,
            "bulk analysis complete"
        );
        report
    }
    .instrument(span)
    .await
}
