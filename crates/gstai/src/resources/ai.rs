//! Document analysis resource
//!
//! Ships a local file to the analysis endpoint and returns the extracted
//! structure. File content travels base64-encoded inside the JSON body.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::path::Path;

use super::ensure_file;
use crate::error::Result;
use crate::transport::Transport;

/// Service-defined document tags
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentType {
    Invoice,
    Receipt,
    PurchaseOrder,
    BankStatement,
    Other(String),
}

impl DocumentType {
    pub fn as_str(&self) -> &str {
        match self {
            DocumentType::Invoice => "invoice",
            DocumentType::Receipt => "receipt",
            DocumentType::PurchaseOrder => "purchase_order",
            DocumentType::BankStatement => "bank_statement",
            DocumentType::Other(tag) => tag,
        }
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<&str> for DocumentType {
    fn from(tag: &str) -> Self {
        match tag {
            "invoice" => DocumentType::Invoice,
            "receipt" => DocumentType::Receipt,
            "purchase_order" => DocumentType::PurchaseOrder,
            "bank_statement" => DocumentType::BankStatement,
            other => DocumentType::Other(other.to_string()),
        }
    }
}

impl Serialize for DocumentType {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AnalyzeDocumentRequest<'a> {
    file_name: &'a str,
    document_type: &'a DocumentType,
    content: String,
}

/// Structured result returned by the analysis endpoint
///
/// The field set varies by document type and model version, so the body is
/// kept as-is; convenience accessors cover the common fields.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct AnalysisResult(Value);

impl AnalysisResult {
    pub fn status(&self) -> Option<&str> {
        self.0.get("status").and_then(Value::as_str)
    }

    pub fn document_type(&self) -> Option<&str> {
        self.0.get("type").and_then(Value::as_str)
    }

    /// Look up an extracted field by name
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.0.get("fields").and_then(|f| f.get(name)).or_else(|| self.0.get(name))
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_inner(self) -> Value {
        self.0
    }
}

/// Handle for `client.ai()`
pub struct AiResource<'a> {
    pub(crate) transport: &'a Transport,
}

impl AiResource<'_> {
    /// Analyze a document on disk
    ///
    /// The path must resolve to a readable file; a missing file fails with
    /// [`crate::GstaiError::FileNotFound`] before any request is sent.
    pub async fn analyze_document(
        &self,
        file_path: impl AsRef<Path>,
        document_type: DocumentType,
    ) -> Result<AnalysisResult> {
        let path = file_path.as_ref();
        ensure_file(path)?;
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("document");
        self.analyze_bytes(&bytes, file_name, document_type).await
    }

    /// Analyze in-memory content without touching the filesystem
    pub async fn analyze_bytes(
        &self,
        bytes: &[u8],
        file_name: &str,
        document_type: DocumentType,
    ) -> Result<AnalysisResult> {
        let request = AnalyzeDocumentRequest {
            file_name,
            document_type: &document_type,
            content: BASE64.encode(bytes),
        };
        self.transport.post_json("/ai/analyze-document", &request).await
    }
}
