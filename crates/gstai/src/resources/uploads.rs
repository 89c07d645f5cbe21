//! Document and bulk upload resource
//!
//! Uploads travel as multipart form-data; everything else in the crate is
//! plain JSON. The service caps uploads at 50 MB and that cap is enforced
//! here before any bytes leave the machine.

use serde::Deserialize;
use serde_json::Value;
use std::path::Path;

use super::{ensure_id, file_part, DocumentType};
use crate::error::Result;
use crate::gstin::Gstin;
use crate::period::TaxPeriod;
use crate::transport::Transport;

/// Upload size ceiling imposed by the service
pub const MAX_UPLOAD_BYTES: u64 = 50 * 1024 * 1024;

/// Acknowledgement for an accepted upload
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadReceipt {
    pub upload_id: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

/// Processing state of an earlier upload
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadStatus {
    pub status: String,
    #[serde(default)]
    pub document_id: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

/// Handle for `client.uploads()`
pub struct UploadsResource<'a> {
    pub(crate) transport: &'a Transport,
}

impl UploadsResource<'_> {
    /// Upload a single document with optional metadata
    ///
    /// `metadata` is forwarded verbatim as a JSON string part; pass
    /// `Value::Null` when there is nothing to attach.
    pub async fn document(
        &self,
        file_path: impl AsRef<Path>,
        document_type: DocumentType,
        metadata: &Value,
    ) -> Result<UploadReceipt> {
        let part = file_part(file_path.as_ref()).await?;
        let mut form = reqwest::multipart::Form::new()
            .part("file", part)
            .text("documentType", document_type.as_str().to_string());
        if !metadata.is_null() {
            form = form.text("metadata", metadata.to_string());
        }
        self.transport.post_multipart("/documents/upload", form).await
    }

    /// Upload a spreadsheet of invoices for a GSTIN and period
    pub async fn bulk_invoices(
        &self,
        file_path: impl AsRef<Path>,
        gstin: &Gstin,
        period: TaxPeriod,
    ) -> Result<UploadReceipt> {
        let part = file_part(file_path.as_ref()).await?;
        let form = reqwest::multipart::Form::new()
            .part("file", part)
            .text("gstin", gstin.as_str().to_string())
            .text("period", period.to_string());
        self.transport.post_multipart("/invoices/bulk-upload", form).await
    }

    /// Processing status of an earlier upload
    pub async fn status(&self, upload_id: &str) -> Result<UploadStatus> {
        let id = ensure_id(upload_id, "upload id")?;
        self.transport
            .get_json(&format!("/documents/upload/{}/status", id), &[])
            .await
    }
}
