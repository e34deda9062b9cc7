//! Budget limits, progress classification, and advisory signals.

use std::{collections::BTreeMap, fmt};

use serde::{Deserialize, Serialize};

/// Spending limits: an optional global cap plus per-category caps.
/// Absent entries mean unbounded. Amounts are interpreted in the ledger's
/// locked currency.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct BudgetConfig {
    pub total: Option<f64>,
    #[serde(default)]
    pub categories: BTreeMap<String, f64>,
}

impl BudgetConfig {
    pub fn limit_for(&self, scope: &BudgetScope) -> Option<f64> {
        match scope {
            BudgetScope::Total => self.total,
            BudgetScope::Category(name) => self.categories.get(name).copied(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.total.is_none() && self.categories.is_empty()
    }
}

/// Addresses either the global cap or a single category's cap.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum BudgetScope {
    Total,
    Category(String),
}

impl fmt::Display for BudgetScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BudgetScope::Total => f.write_str("Total"),
            BudgetScope::Category(name) => f.write_str(name),
        }
    }
}

/// Display tier for a budget bar: warning from 75% used, critical above 90%.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum BudgetTier {
    Normal,
    Warning,
    Critical,
}

impl BudgetTier {
    pub fn classify(percent_used: f64) -> Self {
        if percent_used > 90.0 {
            BudgetTier::Critical
        } else if percent_used >= 75.0 {
            BudgetTier::Warning
        } else {
            BudgetTier::Normal
        }
    }
}

impl fmt::Display for BudgetTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            BudgetTier::Normal => "Normal",
            BudgetTier::Warning => "Warning",
            BudgetTier::Critical => "Critical",
        };
        f.write_str(label)
    }
}

/// Spent-versus-limit standing for one scope. `limit` and `percent_used` are
/// `None` when no cap is configured; the tier then stays `Normal`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BudgetProgress {
    pub scope: BudgetScope,
    pub spent: f64,
    pub limit: Option<f64>,
    pub percent_used: Option<f64>,
    pub tier: BudgetTier,
}

impl BudgetProgress {
    pub fn from_parts(scope: BudgetScope, spent: f64, limit: Option<f64>) -> Self {
        let percent_used = limit
            .filter(|cap| cap.abs() > f64::EPSILON)
            .map(|cap| (spent / cap) * 100.0);
        let tier = percent_used.map(BudgetTier::classify).unwrap_or(BudgetTier::Normal);
        Self {
            scope,
            spent,
            limit,
            percent_used,
            tier,
        }
    }
}

/// Advisory produced after a mutation when spending crosses a configured cap.
/// Signals never block or reverse the mutation that triggered them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum BudgetSignal {
    TotalExceeded { spent: f64, limit: f64 },
    CategoryExceeded { category: String, spent: f64, limit: f64 },
}

impl fmt::Display for BudgetSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BudgetSignal::TotalExceeded { .. } => {
                f.write_str("You exceeded your total budget!")
            }
            BudgetSignal::CategoryExceeded { category, .. } => {
                write!(f, "You exceeded budget for {category}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tier_boundaries() {
        assert_eq!(BudgetTier::classify(74.9), BudgetTier::Normal);
        assert_eq!(BudgetTier::classify(75.0), BudgetTier::Warning);
        assert_eq!(BudgetTier::classify(90.0), BudgetTier::Warning);
        assert_eq!(BudgetTier::classify(90.1), BudgetTier::Critical);
    }

    #[test]
    fn progress_without_limit_has_no_percentage() {
        let progress = BudgetProgress::from_parts(BudgetScope::Total, 42.0, None);
        assert_eq!(progress.percent_used, None);
        assert_eq!(progress.tier, BudgetTier::Normal);
    }

    #[test]
    fn config_defaults_are_unbounded() {
        let config = BudgetConfig::default();
        assert!(config.is_empty());
        assert_eq!(config.limit_for(&BudgetScope::Total), None);
        assert_eq!(
            config.limit_for(&BudgetScope::Category("Food".into())),
            None
        );
    }
}
