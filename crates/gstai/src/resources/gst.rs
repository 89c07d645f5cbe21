//! GST return filing and registry lookups

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

use super::ensure_id;
use crate::error::{GstaiError, Result};
use crate::gstin::Gstin;
use crate::period::TaxPeriod;
use crate::transport::Transport;

/// Supported GST return forms
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReturnType {
    /// Outward supplies, monthly
    Gstr1,
    /// Summary return with tax payment, monthly
    Gstr3b,
    /// Annual return
    Gstr9,
}

impl ReturnType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReturnType::Gstr1 => "gstr1",
            ReturnType::Gstr3b => "gstr3b",
            ReturnType::Gstr9 => "gstr9",
        }
    }
}

impl fmt::Display for ReturnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ReturnType {
    type Err = GstaiError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "gstr1" | "gstr-1" => Ok(ReturnType::Gstr1),
            "gstr3b" | "gstr-3b" => Ok(ReturnType::Gstr3b),
            "gstr9" | "gstr-9" => Ok(ReturnType::Gstr9),
            other => Err(GstaiError::Validation(format!(
                "'{}' is not a supported return type",
                other
            ))),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct FileReturnRequest<'a> {
    gstin: &'a Gstin,
    period: TaxPeriod,
    data: &'a Value,
}

/// Acknowledgement returned when a return is filed
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilingReceipt {
    pub return_id: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub acknowledgement_number: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReturnStatus {
    pub status: String,
    #[serde(default)]
    pub return_id: Option<String>,
    #[serde(default)]
    pub filed_at: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

/// Registry-level GSTIN details
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GstinDetails {
    #[serde(default)]
    pub valid: bool,
    #[serde(default)]
    pub legal_name: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

/// Handle for `client.gst()`
pub struct GstResource<'a> {
    pub(crate) transport: &'a Transport,
}

impl GstResource<'_> {
    /// File a GST return for the given GSTIN and period
    ///
    /// `data` is the form payload in the service's return schema; the crate
    /// ships it as-is.
    pub async fn file_return(
        &self,
        return_type: ReturnType,
        gstin: &Gstin,
        period: TaxPeriod,
        data: &Value,
    ) -> Result<FilingReceipt> {
        let request = FileReturnRequest {
            gstin,
            period,
            data,
        };
        self.transport
            .post_json(&format!("/returns/{}", return_type.as_str()), &request)
            .await
    }

    /// Fetch the processing status of a filed return
    pub async fn return_status(&self, return_id: &str) -> Result<ReturnStatus> {
        let id = ensure_id(return_id, "return id")?;
        self.transport
            .get_json(&format!("/returns/status/{}", id), &[])
            .await
    }

    /// Look a GSTIN up in the registry
    ///
    /// The local shape check already happened in [`Gstin::parse`]; this call
    /// answers whether the registration actually exists and is active.
    pub async fn validate_gstin(&self, gstin: &Gstin) -> Result<GstinDetails> {
        self.transport
            .get_json(&format!("/gstin/validate/{}", gstin.as_str()), &[])
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_return_type_round_trip() {
        assert_eq!(ReturnType::Gstr3b.as_str(), "gstr3b");
        assert_eq!("GSTR-1".parse::<ReturnType>().unwrap(), ReturnType::Gstr1);
        assert_eq!("gstr9".parse::<ReturnType>().unwrap(), ReturnType::Gstr9);
        assert!("gstr2a".parse::<ReturnType>().is_err());
    }

    #[test]
    fn test_file_return_request_shape() {
        let gstin = Gstin::parse("27ABCDE1234F1Z5").unwrap();
        let data = json!({"invoices": [], "summary": {}});
        let request = FileReturnRequest {
            gstin: &gstin,
            period: TaxPeriod::parse("012024").unwrap(),
            data: &data,
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["gstin"], "27ABCDE1234F1Z5");
        assert_eq!(value["period"], "012024");
        assert_eq!(value["data"]["invoices"], json!([]));
    }

    #[test]
    fn test_filing_receipt_deserialization() {
        let receipt: FilingReceipt = serde_json::from_value(json!({
            "returnId": "ret_7",
            "status": "filed",
            "acknowledgementNumber": "ACK123",
            "filedBy": "api"
        }))
        .unwrap();
        assert_eq!(receipt.return_id, "ret_7");
        assert_eq!(receipt.acknowledgement_number.as_deref(), Some("ACK123"));
        assert_eq!(receipt.extra["filedBy"], json!("api"));
    }
}
