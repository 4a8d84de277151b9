//! Cache-or-fetch rate pipeline.
//!
//! [`RateService::fetch_rate`] runs six stages strictly in order:
//! validate, cache lookup, external fetch, parse, cache refresh, rate
//! extraction. Each stage is a total match over [`FetchState`]; once a
//! stage produces [`FetchState::Failed`] every later stage passes it
//! through untouched, so the caller always receives the first error
//! encountered.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use cambio_shared::Currency;
use chrono::Utc;
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::{debug, warn};

use super::cache::RateStore;
use super::error::RateError;
use super::provider::RateProvider;
use super::types::{ProviderResponse, RateSnapshot};

/// State threaded through the fetch pipeline. Exactly one variant is
/// active at a time.
#[derive(Debug)]
enum FetchState {
    /// Cache hit; fetch, parse, and refresh become no-ops.
    Cached(RateSnapshot),
    /// Cache miss; the provider must be queried for this base.
    NeedsFetch(Currency),
    /// Raw provider body awaiting decoding.
    Fetched(String),
    /// Decoded snapshot awaiting cache refresh and extraction.
    Parsed(RateSnapshot),
    /// First error encountered; passes through all later stages.
    Failed(RateError),
}

/// Wire format of the provider's response body.
#[derive(Debug, Deserialize)]
struct ProviderPayload {
    result: String,
    #[serde(default)]
    base_code: Option<String>,
    #[serde(default)]
    time_next_update_unix: Option<i64>,
    #[serde(default)]
    rates: Option<HashMap<String, Decimal>>,
    #[serde(default, rename = "error-type")]
    error_type: Option<String>,
}

/// Fetches pairwise exchange rates, consulting the cache before the
/// provider.
pub struct RateService {
    store: Arc<dyn RateStore>,
    provider: Arc<dyn RateProvider>,
}

impl RateService {
    /// Creates a service over an injected cache and provider.
    #[must_use]
    pub fn new(store: Arc<dyn RateStore>, provider: Arc<dyn RateProvider>) -> Self {
        Self { store, provider }
    }

    /// Returns the exchange rate from `from` to `to`.
    ///
    /// Both codes are validated against the currency table before any
    /// cache or network access happens.
    ///
    /// # Errors
    ///
    /// [`RateError::UnknownCode`] for an unrecognized code or a target
    /// the provider does not quote; transport and provider error kinds
    /// pass through from the fetch stages verbatim.
    pub async fn fetch_rate(&self, from: &str, to: &str) -> Result<Decimal, RateError> {
        let (from, to) = validate(from, to)?;
        let state = self.lookup_cache(from);
        let state = self.fetch_remote(state).await;
        let state = parse_response(state);
        let state = self.refresh_cache(state);
        extract_rate(state, to)
    }

    /// Stage 2: cache lookup. A backend failure is logged and treated as
    /// a miss, so a cache outage never blocks a successful fetch.
    fn lookup_cache(&self, base: Currency) -> FetchState {
        match self.store.get(base) {
            Ok(Some(snapshot)) => {
                debug!(%base, "rate cache hit");
                FetchState::Cached(snapshot)
            }
            Ok(None) => FetchState::NeedsFetch(base),
            Err(err) => {
                warn!(%base, error = %err, "rate cache read failed, treating as miss");
                FetchState::NeedsFetch(base)
            }
        }
    }

    /// Stage 3: external fetch, only on a cache miss.
    async fn fetch_remote(&self, state: FetchState) -> FetchState {
        match state {
            FetchState::NeedsFetch(base) => match self.provider.fetch_latest(base).await {
                Ok(response) => classify_response(response),
                Err(err) => FetchState::Failed(err),
            },
            other => other,
        }
    }

    /// Stage 5: cache refresh, only on a freshly parsed snapshot. The
    /// TTL runs until the provider's next scheduled update. Write
    /// failures are logged and dropped.
    fn refresh_cache(&self, state: FetchState) -> FetchState {
        match state {
            FetchState::Parsed(snapshot) => {
                let ttl = snapshot_ttl(&snapshot);
                if let Err(err) = self.store.put(snapshot.clone(), ttl) {
                    warn!(base = %snapshot.base, error = %err, "rate cache write failed, dropping refresh");
                }
                FetchState::Parsed(snapshot)
            }
            other => other,
        }
    }
}

/// Stage 1: both codes must name supported currencies before any cache
/// or network access.
fn validate(from: &str, to: &str) -> Result<(Currency, Currency), RateError> {
    let from = from.parse::<Currency>()?;
    let to = to.parse::<Currency>()?;
    Ok((from, to))
}

/// Classifies a transport response by status.
fn classify_response(response: ProviderResponse) -> FetchState {
    match response.status {
        200..=299 => FetchState::Fetched(response.body),
        404 => FetchState::Failed(RateError::NotFound),
        status => FetchState::Failed(RateError::UnexpectedStatus(status)),
    }
}

/// Stage 4: decodes the raw body, only on a fetched state.
fn parse_response(state: FetchState) -> FetchState {
    let body = match state {
        FetchState::Fetched(body) => body,
        other => return other,
    };
    let payload: ProviderPayload = match serde_json::from_str(&body) {
        Ok(payload) => payload,
        Err(err) => return FetchState::Failed(RateError::MalformedResponse(err.to_string())),
    };
    match payload.result.as_str() {
        "success" => snapshot_from_payload(payload),
        "error" => {
            let kind = payload.error_type.unwrap_or_else(|| "unknown".to_string());
            FetchState::Failed(RateError::Provider(normalize_error_kind(&kind)))
        }
        other => FetchState::Failed(RateError::MalformedResponse(format!(
            "unexpected result discriminator: {other}"
        ))),
    }
}

/// Builds a snapshot from a success payload, rejecting missing fields.
fn snapshot_from_payload(payload: ProviderPayload) -> FetchState {
    let Some(base_code) = payload.base_code else {
        return FetchState::Failed(RateError::MalformedResponse("missing base_code".to_string()));
    };
    let Ok(base) = base_code.parse::<Currency>() else {
        return FetchState::Failed(RateError::MalformedResponse(format!(
            "unsupported base code: {base_code}"
        )));
    };
    let Some(next_update_unix) = payload.time_next_update_unix else {
        return FetchState::Failed(RateError::MalformedResponse(
            "missing time_next_update_unix".to_string(),
        ));
    };
    let Some(rates) = payload.rates else {
        return FetchState::Failed(RateError::MalformedResponse("missing rates".to_string()));
    };
    FetchState::Parsed(RateSnapshot {
        base,
        next_update_unix,
        rates,
    })
}

/// Provider error identifiers are hyphen-delimited; ours are
/// underscore-delimited.
fn normalize_error_kind(kind: &str) -> String {
    kind.replace('-', "_")
}

/// TTL until the provider's next scheduled update; an already-stale
/// snapshot gets a zero TTL.
fn snapshot_ttl(snapshot: &RateSnapshot) -> Duration {
    let secs = snapshot.next_update_unix - Utc::now().timestamp();
    Duration::from_secs(u64::try_from(secs).unwrap_or(0))
}

/// Stage 6: pulls the requested pairwise rate off the final snapshot.
/// The target may be a valid ISO code that this provider simply does not
/// quote; that is still an unknown code to the caller.
fn extract_rate(state: FetchState, to: Currency) -> Result<Decimal, RateError> {
    match state {
        FetchState::Cached(snapshot) | FetchState::Parsed(snapshot) => snapshot
            .rate_for(to)
            .ok_or_else(|| RateError::UnknownCode(to.code().to_string())),
        FetchState::Failed(err) => Err(err),
        FetchState::NeedsFetch(_) | FetchState::Fetched(_) => Err(RateError::MalformedResponse(
            "fetch pipeline ended mid-stage".to_string(),
        )),
    }
}
