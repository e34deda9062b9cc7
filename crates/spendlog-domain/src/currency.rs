//! Currency codes and display formatting.

use std::fmt;

use serde::{Deserialize, Serialize};

/// ISO 4217 currency representation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct CurrencyCode(pub String);

impl CurrencyCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into().trim().to_uppercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CurrencyCode {
    fn from(code: &str) -> Self {
        Self::new(code)
    }
}

pub fn symbol_for(code: &str) -> &'static str {
    match code {
        "INR" => "₹",
        "USD" => "$",
        "EUR" => "€",
        "GBP" => "£",
        "JPY" => "¥",
        "CAD" => "CA$",
        "AUD" => "A$",
        "CNY" => "¥",
        "CHF" => "CHF ",
        "KRW" => "₩",
        _ => "",
    }
}

pub fn minor_units_for(code: &str) -> u8 {
    match code {
        "JPY" | "KRW" => 0,
        "KWD" | "BHD" => 3,
        _ => 2,
    }
}

/// Renders an amount with the currency's symbol and minor-unit precision.
pub fn format_amount(amount: f64, code: &CurrencyCode) -> String {
    let precision = minor_units_for(code.as_str()) as usize;
    let symbol = symbol_for(code.as_str());
    if symbol.is_empty() {
        format!("{} {:.*}", code.as_str(), precision, amount)
    } else {
        format!("{}{:.*}", symbol, precision, amount)
    }
}
