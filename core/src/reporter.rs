//! Destination for the outcome of every fetch step.
//!
//! The caller has no error channel of its own: each step's decoded batch or
//! failure is handed to a `Reporter` and the fetch path moves on.

use std::fmt;

use crate::error::ApiError;

/// One step of a fetch path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Step {
    Header,
    HeaderPartner,
    Item,
    ItemPricingElement,
}

impl Step {
    pub fn as_str(self) -> &'static str {
        match self {
            Step::Header => "Header",
            Step::HeaderPartner => "HeaderPartner",
            Step::Item => "Item",
            Step::ItemPricingElement => "ItemPricingElement",
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Receives one call per completed step. Shared across fetch paths running
/// on separate threads.
pub trait Reporter: Send + Sync {
    /// A step succeeded; `records` is the decoded batch as a JSON array.
    fn info(&self, step: Step, records: &serde_json::Value);

    fn error(&self, step: Step, error: &ApiError);
}

impl<R: Reporter + ?Sized> Reporter for &R {
    fn info(&self, step: Step, records: &serde_json::Value) {
        (**self).info(step, records)
    }

    fn error(&self, step: Step, error: &ApiError) {
        (**self).error(step, error)
    }
}

/// Emits one `tracing` event per step.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingReporter;

impl Reporter for TracingReporter {
    fn info(&self, step: Step, records: &serde_json::Value) {
        let count = records.as_array().map_or(0, Vec::len);
        tracing::info!(step = %step, count, records = %records, "fetched");
    }

    fn error(&self, step: Step, error: &ApiError) {
        tracing::error!(step = %step, error = %error, "fetch failed");
    }
}
