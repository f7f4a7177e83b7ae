//! # Quote Normalizer
//!
//! Validates an untrusted [`QuoteRequest`] into a [`NormalizedQuoteRequest`].
//!
//! This is the sole producer of `QuoteInvalid`; once a request passes
//! normalization, the calculator never branches on "is this field present"
//! and never fails. Rules:
//!
//! - `pickup`/`delivery`: trimmed and required, else `missing_locations`
//! - `eventType`: unknown tags default to `corporateEvent`
//! - `serviceLevel`: unknown tags default to `standard`
//! - `eventDate`: parsed; a value at or before "now" is `past_event_date`
//! - items: `size` defaults to `medium`, `quantity` to 1; a quantity that
//!   coerces to zero or below is `bad_item_quantity`
//! - `declaredValue`: negative is `bad_declared_value`
//! - tag lists: trimmed, deduplicated, insertion order preserved; unknown
//!   tags survive but contribute no fees downstream

use crate::domain::entities::request::{
    ItemInput, NormalizedItem, NormalizedQuoteRequest, QuoteRequest,
};
use crate::domain::errors::{DomainError, DomainResult, QuoteInvalidReason};
use crate::domain::value_objects::money::Money;
use crate::domain::value_objects::timestamp::Timestamp;
use chrono::{NaiveDate, TimeZone, Utc};
use rust_decimal::Decimal;
use std::collections::HashSet;

/// Longest accepted location string, after trimming.
pub const MAX_LOCATION_LEN: usize = 200;

/// Normalizes a raw quote request against the clock value `now`.
///
/// # Errors
///
/// Returns `DomainError::QuoteInvalid` with the machine-readable reason:
/// `missing_locations`, `past_event_date`, `bad_item_quantity`, or
/// `bad_declared_value`.
pub fn normalize(raw: QuoteRequest, now: Timestamp) -> DomainResult<NormalizedQuoteRequest> {
    let pickup = normalize_location(raw.pickup.as_deref())?;
    let delivery = normalize_location(raw.delivery.as_deref())?;

    let event_type = parse_or_default(raw.event_type.as_deref());
    let service_level = parse_or_default(raw.service_level.as_deref());
    let urgency = parse_or_default(raw.urgency.as_deref());

    let event_date = normalize_event_date(raw.event_date.as_deref(), now)?;

    let items = raw
        .items
        .into_iter()
        .map(normalize_item)
        .collect::<DomainResult<Vec<_>>>()?;

    let declared_value = normalize_declared_value(raw.declared_value)?;
    // The discount is an opaque input; a negative one is simply no discount.
    let discount = raw
        .discount
        .filter(|d| !d.is_sign_negative())
        .map_or(Money::zero(), |d| Money::new(d).unwrap_or(Money::ZERO));

    Ok(NormalizedQuoteRequest {
        pickup,
        delivery,
        event_type,
        service_level,
        event_date,
        items,
        additional_services: dedup_tags(raw.additional_services),
        special_requirements: dedup_tags(raw.special_requirements),
        declared_value,
        discount,
        urgency,
        contact_info: raw.contact_info,
        notes: raw.notes,
    })
}

fn normalize_location(value: Option<&str>) -> DomainResult<String> {
    let trimmed = value.map(str::trim).unwrap_or_default();
    if trimmed.is_empty() || trimmed.len() > MAX_LOCATION_LEN {
        return Err(DomainError::quote_invalid(
            QuoteInvalidReason::MissingLocations,
        ));
    }
    Ok(trimmed.to_string())
}

fn parse_or_default<T>(value: Option<&str>) -> T
where
    T: std::str::FromStr + Default,
{
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .and_then(|s| s.parse().ok())
        .unwrap_or_default()
}

fn normalize_event_date(raw: Option<&str>, now: Timestamp) -> DomainResult<Option<Timestamp>> {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(None);
    };
    // An unparseable date is treated as absent rather than rejected; the
    // field is optional and only a parsed past value is an error.
    let Some(parsed) = parse_timestamp(raw) else {
        return Ok(None);
    };
    if parsed.is_after(&now) {
        Ok(Some(parsed))
    } else {
        Err(DomainError::quote_invalid(QuoteInvalidReason::PastEventDate))
    }
}

fn parse_timestamp(raw: &str) -> Option<Timestamp> {
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(raw) {
        return Some(Timestamp::from(dt.with_timezone(&Utc)));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| Timestamp::from(Utc.from_utc_datetime(&naive)))
}

fn normalize_item(item: ItemInput) -> DomainResult<NormalizedItem> {
    let size = parse_or_default(item.size.as_deref());

    let quantity = match item.quantity {
        None => 1,
        Some(q) if !q.is_finite() => {
            return Err(DomainError::quote_invalid(
                QuoteInvalidReason::BadItemQuantity,
            ));
        }
        Some(q) => {
            let truncated = q.trunc();
            if truncated < 1.0 {
                return Err(DomainError::quote_invalid(
                    QuoteInvalidReason::BadItemQuantity,
                ));
            }
            truncated.min(f64::from(u32::MAX)) as u32
        }
    };

    Ok(NormalizedItem {
        description: item
            .description
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty()),
        size,
        quantity,
        weight: item.weight,
        dimensions: item.dimensions,
        special: dedup_tags(item.special),
        value: item.value,
    })
}

fn normalize_declared_value(value: Option<Decimal>) -> DomainResult<Money> {
    match value {
        None => Ok(Money::zero()),
        Some(v) => Money::new(v).map_err(|_| {
            DomainError::quote_invalid(QuoteInvalidReason::BadDeclaredValue)
        }),
    }
}

fn dedup_tags(tags: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for tag in tags {
        let trimmed = tag.trim();
        if trimmed.is_empty() {
            continue;
        }
        if seen.insert(trimmed.to_string()) {
            out.push(trimmed.to_string());
        }
    }
    out
}
