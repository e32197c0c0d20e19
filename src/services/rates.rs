//! Exchange rate refresh
//!
//! Rates come from a [`RateSource`] one pair at a time. A refresh only writes
//! to the FX table once every pair for the active language was fetched.

use std::collections::BTreeMap;
use std::fmt;

use rust_decimal::Decimal;
use serde_json::Value;

use super::calendar::Clock;
use super::engine::ProgressionEngine;
use crate::error::{DreamSpendError, DreamSpendResult};
use crate::models::Language;
use crate::storage::PersistenceGateway;

/// Supplies the rate from one currency to another
pub trait RateSource {
    fn fetch(&self, source: &str, target: &str) -> DreamSpendResult<Decimal>;
}

/// Pairs refreshed for a language
pub fn refresh_pairs(language: Language) -> &'static [(&'static str, &'static str)] {
    match language {
        Language::Ru => &[("USD", "RUB"), ("EUR", "RUB")],
        Language::En => &[("USD", "EUR")],
        Language::De => &[("EUR", "USD")],
    }
}

/// Pair offered for manual editing in settings
pub fn manual_fx_pair(language: Language) -> (&'static str, &'static str) {
    refresh_pairs(language)[0]
}

/// Extract `target` from a `{"rates": {"EUR": 0.92}}` response body
pub fn parse_rate_response(body: &str, target: &str) -> DreamSpendResult<Decimal> {
    let value: Value = serde_json::from_str(body)?;
    let raw = value
        .get("rates")
        .and_then(|rates| rates.get(target))
        .ok_or_else(|| DreamSpendError::RateFetch(format!("no rate for {target} in response")))?;

    let rate = match raw {
        Value::Number(n) => n.to_string().parse::<Decimal>().ok(),
        Value::String(s) => s.trim().parse::<Decimal>().ok(),
        _ => None,
    }
    .ok_or_else(|| DreamSpendError::RateFetch(format!("rate for {target} is not a number")))?;

    if rate <= Decimal::ZERO {
        return Err(DreamSpendError::RateFetch(format!(
            "rate for {target} must be positive"
        )));
    }
    Ok(rate)
}

/// Rates read from previously downloaded response bodies, keyed by base currency
#[derive(Debug, Clone, Default)]
pub struct ResponseBodies {
    bodies: BTreeMap<String, String>,
}

impl ResponseBodies {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the response body fetched for `base`
    pub fn insert(&mut self, base: &str, body: impl Into<String>) {
        self.bodies.insert(base.trim().to_uppercase(), body.into());
    }
}

impl RateSource for ResponseBodies {
    fn fetch(&self, source: &str, target: &str) -> DreamSpendResult<Decimal> {
        let body = self
            .bodies
            .get(source)
            .ok_or_else(|| DreamSpendError::RateFetch(format!("no response for {source}")))?;
        parse_rate_response(body, target)
    }
}

/// Outcome of a refresh, suitable for showing to the user
#[derive(Debug, Clone, PartialEq)]
pub enum FxRefreshStatus {
    Updated(Vec<(String, String, Decimal)>),
    Failed(String),
}

impl FxRefreshStatus {
    pub fn is_updated(&self) -> bool {
        matches!(self, Self::Updated(_))
    }
}

impl fmt::Display for FxRefreshStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Updated(rates) => {
                let parts: Vec<String> = rates
                    .iter()
                    .map(|(s, t, r)| format!("{s}->{t} {r}"))
                    .collect();
                write!(f, "Rates updated: {}", parts.join(", "))
            }
            Self::Failed(reason) => write!(f, "Rate update failed: {reason}"),
        }
    }
}

/// Fetch the active language's pairs and apply them all, or none
pub fn refresh_rates<P, C, S>(engine: &mut ProgressionEngine<P, C>, source: &S) -> FxRefreshStatus
where
    P: PersistenceGateway,
    C: Clock,
    S: RateSource + ?Sized,
{
    let language = engine.settings().language;
    let mut fetched = Vec::new();

    for (from, to) in refresh_pairs(language) {
        match source.fetch(from, to) {
            Ok(rate) if rate > Decimal::ZERO => {
                fetched.push((from.to_string(), to.to_string(), rate));
            }
            Ok(rate) => {
                tracing::warn!(%from, %to, %rate, "Ignoring non-positive rate");
                return FxRefreshStatus::Failed(format!("non-positive rate for {from}->{to}"));
            }
            Err(e) => {
                tracing::warn!(%from, %to, error = %e, "Rate fetch failed");
                return FxRefreshStatus::Failed(e.to_string());
            }
        }
    }

    for (from, to, rate) in &fetched {
        engine.update_fx_rate(from, to, *rate);
    }
    FxRefreshStatus::Updated(fetched)
}
