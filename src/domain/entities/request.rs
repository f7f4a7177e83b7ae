//! # Quote Request Entities
//!
//! The untrusted inbound request and its normalized canonical form.
//!
//! [`QuoteRequest`] mirrors the wire shape callers send: almost everything is
//! optional and loosely typed. The normalizer turns it into a
//! [`NormalizedQuoteRequest`], after which the calculator never has to ask
//! whether a field is present.

use crate::domain::value_objects::enums::{EventType, ItemSize, ServiceLevel, Urgency};
use crate::domain::value_objects::money::Money;
use crate::domain::value_objects::timestamp::Timestamp;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Raw, untrusted quote request as received from a caller.
///
/// Unknown tags and loosely typed values are tolerated here; validation and
/// defaulting happen in the normalizer, never in the calculator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QuoteRequest {
    /// Pickup address (required; 5-200 characters after trimming).
    pub pickup: Option<String>,
    /// Delivery address (required; 5-200 characters after trimming).
    pub delivery: Option<String>,
    /// Event category tag; unknown tags default to `corporateEvent`.
    pub event_type: Option<String>,
    /// Service level tag; unknown tags default to `standard`.
    pub service_level: Option<String>,
    /// Event date (RFC 3339 timestamp or `YYYY-MM-DD`); must be in the future.
    pub event_date: Option<String>,
    /// Items to move.
    pub items: Vec<ItemInput>,
    /// Add-on service tags.
    pub additional_services: Vec<String>,
    /// Complexity-factor tags.
    pub special_requirements: Vec<String>,
    /// Declared value of the shipment, used for the insurance premium.
    pub declared_value: Option<Decimal>,
    /// Opaque discount amount subtracted from the total.
    pub discount: Option<Decimal>,
    /// Urgency class tag (`standard` or `emergency`).
    pub urgency: Option<String>,
    /// Caller contact details; preserved opaquely.
    pub contact_info: Option<serde_json::Value>,
    /// Free-form notes; preserved opaquely.
    pub notes: Option<String>,
}

/// Raw per-item input.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ItemInput {
    /// Item description.
    pub description: Option<String>,
    /// Size tag; unknown tags default to `medium`.
    pub size: Option<String>,
    /// Quantity; defaults to 1, coerced to an integer >= 1.
    pub quantity: Option<f64>,
    /// Weight in pounds; informational.
    pub weight: Option<Decimal>,
    /// Free-form dimensions; informational.
    pub dimensions: Option<String>,
    /// Special-handling tags.
    pub special: Vec<String>,
    /// Item value; informational.
    pub value: Option<Decimal>,
}

/// Canonical quote request after normalization.
///
/// # Guarantees
///
/// - `pickup` and `delivery` are trimmed and non-empty.
/// - `event_date` is absent or strictly in the future at normalization time.
/// - Every item has a resolved size and an integer quantity >= 1.
/// - `declared_value` and `discount` are non-negative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedQuoteRequest {
    /// Trimmed pickup address.
    pub pickup: String,
    /// Trimmed delivery address.
    pub delivery: String,
    /// Resolved event category.
    pub event_type: EventType,
    /// Resolved service level.
    pub service_level: ServiceLevel,
    /// Future event date, when supplied.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_date: Option<Timestamp>,
    /// Items with materialized defaults.
    pub items: Vec<NormalizedItem>,
    /// Deduplicated add-on service tags, insertion order preserved.
    pub additional_services: Vec<String>,
    /// Deduplicated complexity-factor tags, insertion order preserved.
    pub special_requirements: Vec<String>,
    /// Non-negative declared value.
    pub declared_value: Money,
    /// Non-negative opaque discount.
    pub discount: Money,
    /// Urgency class.
    pub urgency: Urgency,
    /// Opaque contact details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_info: Option<serde_json::Value>,
    /// Opaque notes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Canonical per-item entry after normalization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedItem {
    /// Item description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Resolved size band.
    pub size: ItemSize,
    /// Integer quantity >= 1.
    pub quantity: u32,
    /// Weight in pounds; informational.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<Decimal>,
    /// Free-form dimensions; informational.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<String>,
    /// Special-handling tags; unknown tags are preserved but fee-neutral.
    pub special: Vec<String>,
    /// Item value; informational.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Decimal>,
}
