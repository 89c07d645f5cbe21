//! gstai: Rust client for the GSTAI API
//!
//! This library wraps the GSTAI GST-compliance service:
//! - AI document analysis (invoices, receipts, bank statements)
//! - Reconciliation uploads and reports
//! - Invoice creation and listing
//! - GST return filing (GSTR-1 / GSTR-3B / GSTR-9) and registry lookups
//! - Report generation, export and download
//! - Document and bulk uploads
//!
//! Every call is a single authenticated request/response exchange; errors
//! surface as [`GstaiError`] with the service status and code preserved.
//!
//! # Example
//!
//! ```no_run
//! use gstai::{Client, DocumentType};
//!
//! #[tokio::main]
//! async fn main() -> gstai::Result<()> {
//!     // Reads GSTAI_API_KEY (sk_live_... or sk_test_...)
//!     let client = Client::from_env()?;
//!
//!     let analysis = client
//!         .ai()
//!         .analyze_document("invoice.pdf", DocumentType::Invoice)
//!         .await?;
//!     println!("extracted: {}", analysis.as_value());
//!
//!     let report = client.reconciliation().get_report("recon_123").await?;
//!     println!("report: {}", report.as_value());
//!
//!     Ok(())
//! }
//! ```

// Core modules
pub mod error;

// Configuration
pub mod config;

// Domain value types
pub mod gstin;
pub mod period;

// HTTP engine (internal)
mod transport;

// Client and resources
pub mod client;
pub mod resources;

// Re-export commonly used types
pub use error::{GstaiError, Result};

pub use config::{Config, Environment};

pub use gstin::{Gstin, STATE_CODES};
pub use period::TaxPeriod;

pub use client::Client;

pub use resources::{
    AiResource, AnalysisResult, Customer, DocumentType, ExportFormat, ExportJob, FilingReceipt,
    GstResource, GstinDetails, Invoice, InvoiceFilter, InvoiceList, InvoicesResource, LineItem,
    NewInvoice, ReconciliationReport, ReconciliationResource, ReconciliationUpload, Report,
    ReportFilter, ReportKind, ReportsResource, ReturnStatus, ReturnType, UploadReceipt,
    UploadStatus, UploadsResource, MAX_UPLOAD_BYTES,
};
