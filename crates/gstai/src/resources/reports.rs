//! Report generation, export and download

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

use super::ensure_id;
use crate::error::Result;
use crate::gstin::Gstin;
use crate::period::TaxPeriod;
use crate::transport::Transport;

/// Report families the service can produce
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    Sales,
    Purchase,
    /// Input tax credit
    Itc,
}

impl ReportKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportKind::Sales => "sales",
            ReportKind::Purchase => "purchase",
            ReportKind::Itc => "itc",
        }
    }
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Xlsx,
    Pdf,
    Json,
}

impl ExportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Xlsx => "xlsx",
            ExportFormat::Pdf => "pdf",
            ExportFormat::Json => "json",
        }
    }
}

/// Query filter shared by the report endpoints
#[derive(Debug, Clone, Default)]
pub struct ReportFilter {
    gstin: Option<Gstin>,
    period: Option<TaxPeriod>,
    from_date: Option<NaiveDate>,
    to_date: Option<NaiveDate>,
}

impl ReportFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_gstin(mut self, gstin: Gstin) -> Self {
        self.gstin = Some(gstin);
        self
    }

    pub fn with_period(mut self, period: TaxPeriod) -> Self {
        self.period = Some(period);
        self
    }

    pub fn with_date_range(mut self, from: NaiveDate, to: NaiveDate) -> Self {
        self.from_date = Some(from);
        self.to_date = Some(to);
        self
    }

    pub(crate) fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        if let Some(gstin) = &self.gstin {
            query.push(("gstin", gstin.as_str().to_string()));
        }
        if let Some(period) = &self.period {
            query.push(("period", period.to_string()));
        }
        if let Some(from) = &self.from_date {
            query.push(("fromDate", from.format("%Y-%m-%d").to_string()));
        }
        if let Some(to) = &self.to_date {
            query.push(("toDate", to.format("%Y-%m-%d").to_string()));
        }
        query
    }

    fn to_body(&self) -> Value {
        let mut body = serde_json::Map::new();
        for (key, value) in self.to_query() {
            body.insert(key.to_string(), Value::String(value));
        }
        Value::Object(body)
    }
}

/// Report body in its wire shape
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct Report(Value);

impl Report {
    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_inner(self) -> Value {
        self.0
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ExportRequest {
    report_type: &'static str,
    format: &'static str,
    filters: Value,
}

/// An asynchronous report export job
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportJob {
    pub export_id: String,
    pub status: String,
    #[serde(default)]
    pub download_url: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

/// Handle for `client.reports()`
pub struct ReportsResource<'a> {
    pub(crate) transport: &'a Transport,
}

impl ReportsResource<'_> {
    /// Sales report for the filtered window
    pub async fn sales(&self, filter: &ReportFilter) -> Result<Report> {
        self.transport.get_json("/reports/sales", &filter.to_query()).await
    }

    /// Purchase report for the filtered window
    pub async fn purchase(&self, filter: &ReportFilter) -> Result<Report> {
        self.transport.get_json("/reports/purchase", &filter.to_query()).await
    }

    /// Input tax credit report for the filtered window
    pub async fn input_tax_credit(&self, filter: &ReportFilter) -> Result<Report> {
        self.transport.get_json("/reports/itc", &filter.to_query()).await
    }

    /// Kick off an export job; poll [`export_status`](Self::export_status)
    /// until it completes
    pub async fn export(
        &self,
        kind: ReportKind,
        format: ExportFormat,
        filter: &ReportFilter,
    ) -> Result<ExportJob> {
        let request = ExportRequest {
            report_type: kind.as_str(),
            format: format.as_str(),
            filters: filter.to_body(),
        };
        self.transport.post_json("/reports/export", &request).await
    }

    pub async fn export_status(&self, export_id: &str) -> Result<ExportJob> {
        let id = ensure_id(export_id, "export id")?;
        self.transport
            .get_json(&format!("/reports/export/status/{}", id), &[])
            .await
    }

    /// Download a finished report as raw bytes
    pub async fn download(&self, report_id: &str) -> Result<Vec<u8>> {
        let id = ensure_id(report_id, "report id")?;
        self.transport.get_bytes(&format!("/reports/download/{}", id)).await
    }
}
