//! Data models for exchange-rate lookups.

use serde::Deserialize;
use std::collections::HashMap;

/// Wire shape of the rate service response.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RateResponse {
    #[serde(default)]
    pub base: String,
    #[serde(default)]
    pub rates: HashMap<String, f64>,
}

/// A table of conversion factors relative to one base currency.
///
/// Keys are normalized to upper case on construction and looked up
/// case-insensitively; non-positive factors are discarded. Fetched once per
/// run and never persisted.
#[derive(Debug, Clone)]
pub struct RateTable {
    base: String,
    rates: HashMap<String, f64>,
}

impl RateTable {
    /// Builds a table from raw code/factor pairs.
    pub fn new(base: impl Into<String>, rates: HashMap<String, f64>) -> Self {
        let rates = rates
            .into_iter()
            .filter(|(_, factor)| *factor > 0.0)
            .map(|(code, factor)| (code.to_uppercase(), factor))
            .collect();

        Self { base: base.into().to_uppercase(), rates }
    }

    /// Returns the base currency code.
    pub fn base(&self) -> &str {
        &self.base
    }

    /// Looks up a conversion factor, ignoring case.
    pub fn get(&self, code: &str) -> Option<f64> {
        self.rates.get(&code.trim().to_uppercase()).copied()
    }

    /// Returns the number of currencies in the table.
    pub fn len(&self) -> usize {
        self.rates.len()
    }

    /// Returns true if the table holds no rates.
    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }

    /// Returns all (code, factor) pairs sorted by code.
    pub fn sorted(&self) -> Vec<(&str, f64)> {
        let mut pairs: Vec<_> = self.rates.iter().map(|(c, f)| (c.as_str(), *f)).collect();
        pairs.sort_by(|a, b| a.0.cmp(b.0));
        pairs
    }
}

/// Outcome of a rate lookup. The fallback variant carries the reason so the
/// sink can surface degraded conversions instead of passing them off as
/// live rates.
#[derive(Debug, Clone, PartialEq)]
pub enum ResolvedRate {
    /// Rate obtained from the live service.
    Live(f64),
    /// Hardcoded substitute after a failed lookup.
    Fallback { rate: f64, reason: String },
}

impl ResolvedRate {
    /// Returns the conversion factor regardless of provenance.
    pub fn value(&self) -> f64 {
        match self {
            ResolvedRate::Live(rate) => *rate,
            ResolvedRate::Fallback { rate, .. } => *rate,
        }
    }

    /// Returns true if the lookup failed and the fallback was substituted.
    pub fn is_fallback(&self) -> bool {
        matches!(self, ResolvedRate::Fallback { .. })
    }

    /// Returns the failure reason for a fallback rate.
    pub fn fallback_reason(&self) -> Option<&str> {
        match self {
            ResolvedRate::Live(_) => None,
            ResolvedRate::Fallback { reason, .. } => Some(reason),
        }
    }
}
