//! GSTIN (Goods and Services Tax Identification Number) handling
//!
//! A GSTIN is a 15 character identifier: two-digit state code, ten character
//! PAN, entity code, the literal `Z`, and a check character. The shape is
//! validated locally; registry-level checks go through
//! [`crate::resources::GstResource::validate_gstin`].

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use crate::error::{GstaiError, Result};

lazy_static! {
    static ref GSTIN_PATTERN: Regex =
        Regex::new(r"^[0-9]{2}[A-Z]{5}[0-9]{4}[A-Z]{1}[1-9A-Z]{1}Z[0-9A-Z]{1}$").unwrap();
}

/// GST state codes as issued by the GST council
pub static STATE_CODES: phf::Map<&'static str, &'static str> = phf::phf_map! {
    "01" => "Jammu and Kashmir",
    "02" => "Himachal Pradesh",
    "03" => "Punjab",
    "04" => "Chandigarh",
    "05" => "Uttarakhand",
    "06" => "Haryana",
    "07" => "Delhi",
    "08" => "Rajasthan",
    "09" => "Uttar Pradesh",
    "10" => "Bihar",
    "11" => "Sikkim",
    "12" => "Arunachal Pradesh",
    "13" => "Nagaland",
    "14" => "Manipur",
    "15" => "Mizoram",
    "16" => "Tripura",
    "17" => "Meghalaya",
    "18" => "Assam",
    "19" => "West Bengal",
    "20" => "Jharkhand",
    "21" => "Odisha",
    "22" => "Chhattisgarh",
    "23" => "Madhya Pradesh",
    "24" => "Gujarat",
    "26" => "Dadra and Nagar Haveli and Daman and Diu",
    "27" => "Maharashtra",
    "29" => "Karnataka",
    "30" => "Goa",
    "31" => "Lakshadweep",
    "32" => "Kerala",
    "33" => "Tamil Nadu",
    "34" => "Puducherry",
    "35" => "Andaman and Nicobar Islands",
    "36" => "Telangana",
    "37" => "Andhra Pradesh",
    "38" => "Ladakh",
};

/// A validated GSTIN
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Gstin(String);

impl Gstin {
    /// Parse and validate a GSTIN string
    ///
    /// Rejects anything that does not match the published format or whose
    /// state code is not an issued one.
    pub fn parse(raw: &str) -> Result<Self> {
        let raw = raw.trim();
        if !GSTIN_PATTERN.is_match(raw) {
            return Err(GstaiError::Validation(format!(
                "'{}' is not a valid GSTIN",
                raw
            )));
        }
        if !STATE_CODES.contains_key(&raw[..2]) {
            return Err(GstaiError::Validation(format!(
                "GSTIN state code '{}' is not issued",
                &raw[..2]
            )));
        }
        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Two-digit state code portion
    pub fn state_code(&self) -> &str {
        &self.0[..2]
    }

    /// Name of the issuing state
    pub fn state_name(&self) -> &'static str {
        STATE_CODES
            .get(self.state_code())
            .copied()
            .unwrap_or("Unknown")
    }

    /// Embedded ten character PAN
    pub fn pan(&self) -> &str {
        &self.0[2..12]
    }
}

impl fmt::Display for Gstin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for Gstin {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Gstin {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Gstin::parse(&raw).map_err(serde::de::Error::custom)
    }
}
