//! Tax period handling
//!
//! GST returns are filed against a month+year period. The wire form is
//! `MMYYYY` (`"012024"`); the dashed spelling `"01-2024"` also appears in
//! service payloads and is accepted on input.

use chrono::Datelike;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use crate::error::{GstaiError, Result};

/// A GST filing period (calendar month)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaxPeriod {
    year: i32,
    month: u32,
}

impl TaxPeriod {
    /// GST went live in India on 1 July 2017; nothing earlier is a period.
    const FIRST_YEAR: i32 = 2017;

    pub fn new(month: u32, year: i32) -> Result<Self> {
        if !(1..=12).contains(&month) {
            return Err(GstaiError::Validation(format!(
                "month {} is out of range",
                month
            )));
        }
        if year < Self::FIRST_YEAR || year > 2100 {
            return Err(GstaiError::Validation(format!(
                "year {} is out of range",
                year
            )));
        }
        Ok(Self { year, month })
    }

    /// Parse `MMYYYY` or `MM-YYYY`
    pub fn parse(raw: &str) -> Result<Self> {
        let raw = raw.trim();
        let compact: String = raw.chars().filter(|c| *c != '-').collect();
        if compact.len() != 6 || !compact.chars().all(|c| c.is_ascii_digit()) {
            return Err(GstaiError::Validation(format!(
                "'{}' is not a MMYYYY tax period",
                raw
            )));
        }
        let month: u32 = compact[..2].parse().map_err(|_| {
            GstaiError::Validation(format!("'{}' is not a MMYYYY tax period", raw))
        })?;
        let year: i32 = compact[2..].parse().map_err(|_| {
            GstaiError::Validation(format!("'{}' is not a MMYYYY tax period", raw))
        })?;
        Self::new(month, year)
    }

    /// The period covering the given date
    pub fn from_date(date: chrono::NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn year(&self) -> i32 {
        self.year
    }
}

impl fmt::Display for TaxPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}{:04}", self.month, self.year)
    }
}

impl Serialize for TaxPeriod {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for TaxPeriod {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        TaxPeriod::parse(&raw).map_err(serde::de::Error::custom)
    }
}
