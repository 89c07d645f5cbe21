//! Resource handles exposed off the client
//!
//! Each handle is a stateless borrow of the client's transport; dropping a
//! handle costs nothing and handles can be recreated freely.

mod ai;
mod gst;
mod invoices;
mod reconciliation;
mod reports;
mod uploads;

pub use ai::{AiResource, AnalysisResult, DocumentType};
pub use gst::{FilingReceipt, GstResource, GstinDetails, ReturnStatus, ReturnType};
pub use invoices::{Customer, Invoice, InvoiceFilter, InvoiceList, InvoicesResource, LineItem, NewInvoice};
pub use reconciliation::{ReconciliationReport, ReconciliationResource, ReconciliationUpload};
pub use reports::{ExportFormat, ExportJob, Report, ReportFilter, ReportKind, ReportsResource};
pub use uploads::{UploadReceipt, UploadStatus, UploadsResource, MAX_UPLOAD_BYTES};

use std::path::Path;

use crate::error::{GstaiError, Result};

/// Reject paths that do not resolve to a readable file, before any
/// network traffic happens.
pub(crate) fn ensure_file(path: &Path) -> Result<()> {
    if !path.is_file() {
        return Err(GstaiError::FileNotFound(path.to_path_buf()));
    }
    Ok(())
}

/// Reject empty resource identifiers before they end up in a URL.
pub(crate) fn ensure_id<'a>(id: &'a str, what: &str) -> Result<&'a str> {
    let id = id.trim();
    if id.is_empty() {
        return Err(GstaiError::Validation(format!("{} is empty", what)));
    }
    Ok(id)
}

/// Content type by file extension, `application/octet-stream` otherwise
pub(crate) fn content_type_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    match ext.as_deref() {
        Some("pdf") => "application/pdf",
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("csv") => "text/csv",
        Some("xlsx") => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        Some("json") => "application/json",
        _ => "application/octet-stream",
    }
}

/// Read a local file into a multipart part, enforcing the upload ceiling
pub(crate) async fn file_part(path: &Path) -> Result<reqwest::multipart::Part> {
    ensure_file(path)?;

    let size = tokio::fs::metadata(path).await?.len();
    if size > MAX_UPLOAD_BYTES {
        return Err(GstaiError::Validation(format!(
            "file is {} bytes, upload limit is {} bytes",
            size, MAX_UPLOAD_BYTES
        )));
    }

    let bytes = tokio::fs::read(path).await?;
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("document")
        .to_string();
    reqwest::multipart::Part::bytes(bytes)
        .file_name(file_name)
        .mime_str(content_type_for(path))
        .map_err(|e| GstaiError::Validation(format!("unusable file content type: {}", e)))
}
