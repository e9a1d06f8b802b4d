//! Bulk import: payload shape checks, per-record application, aggregation.

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, instrument, warn};

use super::BulkTransfer;
use super::error::ImportError;
use crate::normalize::{RawCookieInput, normalize};

/// One failed record in a batch: the best-available identifier (cookie name
/// when resolvable, `"unknown"` otherwise) and a human-readable reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordError {
    /// Identifier for the failed record.
    pub identifier: String,
    /// Why the record was skipped.
    pub reason: String,
}

impl RecordError {
    /// Creates a new record error.
    #[must_use]
    pub fn new(identifier: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            reason: reason.into(),
        }
    }
}

/// Aggregated outcome of a bulk import: immutable once returned, with
/// `errors` preserving input order. `success_count + error_count` always
/// equals the number of records in the batch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferResult {
    /// Number of records applied to the store.
    pub success_count: usize,
    /// Number of records skipped.
    pub error_count: usize,
    /// Per-record failures, in input order.
    pub errors: Vec<RecordError>,
}

impl TransferResult {
    /// Returns true when every record in the batch was applied.
    #[must_use]
    pub fn is_complete_success(&self) -> bool {
        self.error_count == 0
    }

    fn record_success(&mut self) {
        self.success_count += 1;
    }

    fn record_failure(&mut self, error: RecordError) {
        self.error_count += 1;
        self.errors.push(error);
    }
}

/// Extracts the record sequence from an import payload.
///
/// Accepted shapes: a bare array of raw cookie objects, or an object with a
/// `cookies` array field. Anything else is a structural failure, aborting
/// the whole import before any per-record processing begins.
///
/// # Errors
///
/// Returns [`ImportError::InvalidShape`] for any other payload shape.
pub fn extract_records(payload: Value) -> Result<Vec<Value>, ImportError> {
    match payload {
        Value::Array(records) => Ok(records),
        Value::Object(mut fields) => match fields.remove("cookies") {
            Some(Value::Array(records)) => Ok(records),
            Some(other) => Err(ImportError::InvalidShape {
                found: json_type_name(&other),
            }),
            None => Err(ImportError::InvalidShape {
                found: "object without a 'cookies' field",
            }),
        },
        other => Err(ImportError::InvalidShape {
            found: json_type_name(&other),
        }),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

impl BulkTransfer {
    /// Imports a JSON payload: structural validation, then a best-effort
    /// batch over the contained records.
    ///
    /// # Errors
    ///
    /// Returns [`ImportError`] only for structural failures (payload is not
    /// JSON, or not one of the accepted shapes). Per-record failures land in
    /// the returned [`TransferResult`], never here.
    pub async fn import_json(
        &self,
        payload: &str,
        fallback_domain: Option<&str>,
    ) -> Result<TransferResult, ImportError> {
        let value: Value = serde_json::from_str(payload)?;
        let records = extract_records(value)?;
        Ok(self.import_batch(&records, fallback_domain).await)
    }

    /// Applies a batch of raw records to the store, best-effort.
    ///
    /// Each record is independently normalized and written; a failure skips
    /// only that record. Store writes are awaited sequentially in input
    /// order, so a later record targeting the same (name, domain, path)
    /// identity wins deterministically. There is no transactionality: a
    /// partially failed batch leaves the store partially updated, and the
    /// caller is expected to inspect the result's error fields.
    #[instrument(level = "debug", skip(self, records), fields(records = records.len()))]
    pub async fn import_batch(
        &self,
        records: &[Value],
        fallback_domain: Option<&str>,
    ) -> TransferResult {
        let mut result = TransferResult::default();

        for raw in records {
            match self.apply_record(raw, fallback_domain).await {
                Ok(name) => {
                    debug!(name = %name, "cookie applied");
                    result.record_success();
                }
                Err(error) => {
                    warn!(
                        identifier = %error.identifier,
                        reason = %error.reason,
                        "skipping cookie record"
                    );
                    result.record_failure(error);
                }
            }
        }

        info!(
            succeeded = result.success_count,
            failed = result.error_count,
            "import batch complete"
        );
        result
    }

    /// Normalizes and writes one record, mapping both failure tiers onto a
    /// [`RecordError`] with the best identifier available at that point.
    async fn apply_record(
        &self,
        raw: &Value,
        fallback_domain: Option<&str>,
    ) -> Result<String, RecordError> {
        let raw = RawCookieInput::from_value(raw)
            .ok_or_else(|| RecordError::new("unknown", "cookie entry is not a JSON object"))?;

        let record = normalize(&raw, fallback_domain)
            .map_err(|error| RecordError::new(error.identifier(), error.to_string()))?;

        self.store
            .set(&record.target_url(), &record)
            .await
            .map_err(|error| RecordError::new(record.name.clone(), error.to_string()))?;

        Ok(record.name)
    }
}
