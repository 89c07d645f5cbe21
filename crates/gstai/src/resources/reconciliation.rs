//! Reconciliation resource
//!
//! Purchase-register uploads are matched against counterparty filings
//! server-side; the outcome is fetched as a report by ID.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;

use super::{ensure_id, file_part};
use crate::error::Result;
use crate::gstin::Gstin;
use crate::period::TaxPeriod;
use crate::transport::Transport;

/// Server-generated reconciliation report, kept in its wire shape
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct ReconciliationReport(Value);

impl ReconciliationReport {
    pub fn report_id(&self) -> Option<&str> {
        self.0.get("reportId").and_then(Value::as_str)
    }

    pub fn status(&self) -> Option<&str> {
        self.0.get("status").and_then(Value::as_str)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_inner(self) -> Value {
        self.0
    }
}

/// Acknowledgement for a reconciliation upload
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReconciliationUpload {
    pub upload_id: String,
    #[serde(default)]
    pub report_id: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

/// Handle for `client.reconciliation()`
pub struct ReconciliationResource<'a> {
    pub(crate) transport: &'a Transport,
}

impl ReconciliationResource<'_> {
    /// Fetch a previously generated reconciliation report by ID
    pub async fn get_report(&self, report_id: &str) -> Result<ReconciliationReport> {
        let id = ensure_id(report_id, "report id")?;
        self.transport
            .get_json(&format!("/reconciliation/reports/{}", id), &[])
            .await
    }

    /// Upload a purchase register for reconciliation against the given
    /// GSTIN and period
    pub async fn upload(
        &self,
        file_path: impl AsRef<Path>,
        gstin: &Gstin,
        period: TaxPeriod,
    ) -> Result<ReconciliationUpload> {
        let part = file_part(file_path.as_ref()).await?;
        let form = reqwest::multipart::Form::new()
            .part("file", part)
            .text("gstin", gstin.as_str().to_string())
            .text("period", period.to_string());
        self.transport.post_multipart("/reconciliation/upload", form).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_report_accessors() {
        let report: ReconciliationReport = serde_json::from_value(json!({
            "reportId": "recon_123",
            "status": "completed",
            "matched": 41,
            "mismatched": 2
        }))
        .unwrap();
        assert_eq!(report.report_id(), Some("recon_123"));
        assert_eq!(report.status(), Some("completed"));
        assert_eq!(report.as_value()["matched"], json!(41));
    }

    #[test]
    fn test_upload_ack_keeps_unknown_fields() {
        let ack: ReconciliationUpload = serde_json::from_value(json!({
            "uploadId": "up_9",
            "status": "processing",
            "rowCount": 120
        }))
        .unwrap();
        assert_eq!(ack.upload_id, "up_9");
        assert_eq!(ack.status.as_deref(), Some("processing"));
        assert_eq!(ack.extra["rowCount"], json!(120));
    }
}
