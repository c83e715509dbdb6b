// 🧾 Receipt Model - What a customer hands us
// Wire shape of a purchase receipt. Fields stay as raw strings: the scoring
// rules decide how (and whether) to parse them.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

// ============================================================================
// ITEM
// ============================================================================

// Missing fields fall back to empty values and score accordingly; only bad
// JSON or wrongly typed fields are rejected.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Item {
    /// Free-text description, possibly padded with whitespace
    pub short_description: String,

    /// Unit price as a decimal string, e.g. "6.49"
    pub price: String,
}

impl Item {
    pub fn new(short_description: impl Into<String>, price: impl Into<String>) -> Self {
        Item {
            short_description: short_description.into(),
            price: price.into(),
        }
    }

    /// Description with surrounding whitespace removed
    pub fn trimmed_description(&self) -> &str {
        self.short_description.trim()
    }

    /// Parsed price, `None` when the string is not a finite number
    pub fn price_value(&self) -> Option<f64> {
        parse_finite(&self.price)
    }
}

// ============================================================================
// RECEIPT
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Receipt {
    pub retailer: String,

    /// Calendar date, YYYY-MM-DD
    pub purchase_date: String,

    /// 24-hour clock, HH:MM
    pub purchase_time: String,

    pub items: Vec<Item>,

    /// Receipt total as a decimal string. Trusted as given, never
    /// cross-checked against the item prices.
    pub total: String,
}

impl Receipt {
    /// Parsed total. Out-of-range values like "1e400" count as unparsable.
    pub fn total_value(&self) -> Option<f64> {
        parse_finite(&self.total)
    }

    /// Strict `YYYY-MM-DD`: four-digit year, two-digit month and day
    pub fn purchase_date_value(&self) -> Option<NaiveDate> {
        if !is_date_shape(&self.purchase_date) {
            return None;
        }
        NaiveDate::parse_from_str(&self.purchase_date, "%Y-%m-%d").ok()
    }

    /// `H:MM` or `HH:MM`; the minutes always take two digits
    pub fn purchase_time_value(&self) -> Option<NaiveTime> {
        if !is_time_shape(&self.purchase_time) {
            return None;
        }
        NaiveTime::parse_from_str(&self.purchase_time, "%H:%M").ok()
    }
}

fn parse_finite(raw: &str) -> Option<f64> {
    raw.parse::<f64>().ok().filter(|value| value.is_finite())
}

fn all_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

fn is_date_shape(raw: &str) -> bool {
    let mut parts = raw.split('-');
    match (parts.next(), parts.next(), parts.next(), parts.next()) {
        (Some(year), Some(month), Some(day), None) => {
            year.len() == 4
                && month.len() == 2
                && day.len() == 2
                && all_digits(year)
                && all_digits(month)
                && all_digits(day)
        }
        _ => false,
    }
}

fn is_time_shape(raw: &str) -> bool {
    match raw.split_once(':') {
        Some((hour, minute)) => {
            (1..=2).contains(&hour.len())
                && minute.len() == 2
                && all_digits(hour)
                && all_digits(minute)
        }
        None => false,
    }
}
