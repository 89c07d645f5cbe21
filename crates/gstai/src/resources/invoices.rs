//! Invoice resource

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::ensure_id;
use crate::error::{GstaiError, Result};
use crate::gstin::Gstin;
use crate::period::TaxPeriod;
use crate::transport::Transport;

/// Invoice counterparty
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gstin: Option<Gstin>,
}

impl Customer {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            gstin: None,
        }
    }

    pub fn with_gstin(mut self, gstin: Gstin) -> Self {
        self.gstin = Some(gstin);
        self
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub description: String,
    pub quantity: f64,
    pub unit_price: f64,
}

impl LineItem {
    pub fn new(description: impl Into<String>, quantity: f64, unit_price: f64) -> Self {
        Self {
            description: description.into(),
            quantity,
            unit_price,
        }
    }
}

/// Invoice creation payload. Totals and tax are computed server-side.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewInvoice {
    pub customer: Customer,
    pub items: Vec<LineItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub period: Option<TaxPeriod>,
}

impl NewInvoice {
    pub fn new(customer: Customer) -> Self {
        Self {
            customer,
            items: Vec::new(),
            period: None,
        }
    }

    pub fn with_item(mut self, item: LineItem) -> Self {
        self.items.push(item);
        self
    }

    pub fn with_period(mut self, period: TaxPeriod) -> Self {
        self.period = Some(period);
        self
    }
}

/// Invoice as stored by the service
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    pub id: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub total: Option<f64>,
    #[serde(default)]
    pub tax_amount: Option<f64>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceList {
    pub invoices: Vec<Invoice>,
    #[serde(default)]
    pub total_count: Option<u64>,
    #[serde(default)]
    pub page: Option<u32>,
}

/// Query filter for invoice listing
#[derive(Debug, Clone, Default)]
pub struct InvoiceFilter {
    gstin: Option<Gstin>,
    period: Option<TaxPeriod>,
    from_date: Option<NaiveDate>,
    to_date: Option<NaiveDate>,
    page: Option<u32>,
}

impl InvoiceFilter {
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

    pub fn with_page(mut self, page: u32) -> Self {
        self.page = Some(page);
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
        if let Some(page) = self.page {
            query.push(("page", page.to_string()));
        }
        query
    }
}

/// Handle for `client.invoices()`
pub struct InvoicesResource<'a> {
    pub(crate) transport: &'a Transport,
}

impl InvoicesResource<'_> {
    /// Create an invoice
    pub async fn create(&self, invoice: &NewInvoice) -> Result<Invoice> {
        if invoice.items.is_empty() {
            return Err(GstaiError::Validation(
                "invoice has no line items".to_string(),
            ));
        }
        self.transport.post_json("/invoices", invoice).await
    }

    /// Fetch a single invoice by ID
    pub async fn get(&self, invoice_id: &str) -> Result<Invoice> {
        let id = ensure_id(invoice_id, "invoice id")?;
        self.transport.get_json(&format!("/invoices/{}", id), &[]).await
    }

    /// List invoices matching the filter
    pub async fn list(&self, filter: &InvoiceFilter) -> Result<InvoiceList> {
        self.transport.get_json("/invoices", &filter.to_query()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_new_invoice_serialization() {
        let invoice = NewInvoice::new(
            Customer::new("ABC Enterprises").with_gstin(Gstin::parse("27ABCDE1234F1Z5").unwrap()),
        )
        .with_item(LineItem::new("Consulting Services", 1.0, 50000.0))
        .with_period(TaxPeriod::parse("042024").unwrap());

        let value = serde_json::to_value(&invoice).unwrap();
        assert_eq!(value["customer"]["name"], "ABC Enterprises");
        assert_eq!(value["customer"]["gstin"], "27ABCDE1234F1Z5");
        assert_eq!(value["items"][0]["unitPrice"], 50000.0);
        assert_eq!(value["period"], "042024");
    }

    #[test]
    fn test_customer_without_gstin_omits_field() {
        let value = serde_json::to_value(Customer::new("Walk-in")).unwrap();
        assert!(value.get("gstin").is_none());
    }

    #[test]
    fn test_filter_query() {
        let filter = InvoiceFilter::new()
            .with_gstin(Gstin::parse("27ABCDE1234F1Z5").unwrap())
            .with_date_range(
                NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
                NaiveDate::from_ymd_opt(2024, 3, 31).unwrap(),
            )
            .with_page(2);
        let query = filter.to_query();
        assert!(query.contains(&("gstin", "27ABCDE1234F1Z5".to_string())));
        assert!(query.contains(&("fromDate", "2024-01-01".to_string())));
        assert!(query.contains(&("toDate", "2024-03-31".to_string())));
        assert!(query.contains(&("page", "2".to_string())));
    }

    #[test]
    fn test_empty_filter_query() {
        assert!(InvoiceFilter::new().to_query().is_empty());
    }

    #[test]
    fn test_invoice_deserialization_keeps_extra() {
        let invoice: Invoice = serde_json::from_value(json!({
            "id": "inv_42",
            "status": "issued",
            "total": 59000.0,
            "taxAmount": 9000.0,
            "irn": "a1b2c3"
        }))
        .unwrap();
        assert_eq!(invoice.id, "inv_42");
        assert_eq!(invoice.total, Some(59000.0));
        assert_eq!(invoice.tax_amount, Some(9000.0));
        assert_eq!(invoice.extra["irn"], json!("a1b2c3"));
    }
}
