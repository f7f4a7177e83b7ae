//! # Quote Entity
//!
//! The priced quote returned to callers, with its auditable breakdown.
//!
//! [`QuoteComponents`] carries every intermediate value unrounded, in the
//! exact order the calculator composed them; [`PricingSummary`] carries the
//! consumer-facing rounded figures. A [`Quote`] binds both to the normalized
//! request, the resolved distance, an identifier, and a validity window.
//!
//! # Examples
//!
//! ```
//! use courier_quote::domain::entities::quote::Quote;
//! use courier_quote::domain::value_objects::timestamp::Timestamp;
//!
//! let created_at = Timestamp::now();
//! let valid_until = created_at.add_days(Quote::VALIDITY_DAYS);
//! assert_eq!(created_at.days_until_ceil(&valid_until), Quote::VALIDITY_DAYS);
//! ```

use crate::domain::entities::distance::DistanceResult;
use crate::domain::entities::request::NormalizedQuoteRequest;
use crate::domain::value_objects::enums::{ComplexityFactor, ItemSize};
use crate::domain::value_objects::ids::QuoteId;
use crate::domain::value_objects::money::Money;
use crate::domain::value_objects::timestamp::Timestamp;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One priced item line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemFeeLine {
    /// Item description, when supplied.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Size band charged.
    pub size: ItemSize,
    /// Quantity charged.
    pub quantity: u32,
    /// Size-band fee per unit.
    pub base_fee: Money,
    /// Sum of special-handling surcharges per unit.
    pub special_fees: Money,
    /// `(base_fee + special_fees) * quantity`.
    pub line_total: Money,
}

/// One priced add-on service line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceFeeLine {
    /// The add-on service tag as requested.
    pub service: String,
    /// The fee it contributed (zero for unknown tags).
    pub amount: Money,
}

/// One applied complexity multiplier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppliedMultiplier {
    /// The recognized complexity factor.
    pub factor: ComplexityFactor,
    /// The configured multiplier that was applied.
    pub multiplier: Decimal,
}

/// Every intermediate pricing value, unrounded, in composition order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteComponents {
    /// Step 1: flat base fee.
    pub base_fee: Money,
    /// Step 2: tiered distance fee.
    pub distance_fee: Money,
    /// Step 3: per-item lines.
    pub item_lines: Vec<ItemFeeLine>,
    /// Step 3: sum of all item lines.
    pub item_fees_total: Money,
    /// Step 4: service-level fee.
    pub service_level_fee: Money,
    /// Step 5: per-service lines, insurance premium included.
    pub additional_service_lines: Vec<ServiceFeeLine>,
    /// Step 5: sum of all add-on service lines.
    pub additional_services_total: Money,
    /// Step 6: sum of steps 1-5, before any multiplier.
    pub subtotal_before_multipliers: Money,
    /// Step 7: event-type multiplier applied.
    pub event_type_multiplier: Decimal,
    /// Step 8: complexity multipliers applied, in request order.
    pub complexity_multipliers: Vec<AppliedMultiplier>,
    /// Step 9: urgency multiplier applied.
    pub urgency_multiplier: Decimal,
    /// Running subtotal after steps 7-9.
    pub subtotal_after_multipliers: Money,
    /// Step 10: unrounded taxes.
    pub taxes: Money,
}

/// Rounded per-component figures for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingBreakdown {
    /// Base fee.
    pub base_fee: Money,
    /// Distance fee.
    pub distance_fee: Money,
    /// Item fees total.
    pub item_fees: Money,
    /// Service-level fee.
    pub service_level_fee: Money,
    /// Add-on services total.
    pub additional_services: Money,
    /// Event-type multiplier.
    pub event_type_multiplier: Decimal,
    /// Product of all applied complexity multipliers.
    pub complexity_multiplier: Decimal,
    /// Urgency multiplier.
    pub urgency_multiplier: Decimal,
}

/// Consumer-facing pricing summary, rounded to cents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingSummary {
    /// Subtotal after all multipliers.
    pub subtotal: Money,
    /// Taxes on the subtotal.
    pub taxes: Money,
    /// Discounts applied.
    pub discounts: Money,
    /// `subtotal + taxes - discounts`, floored at zero.
    pub total: Money,
    /// Rounded per-component figures.
    pub breakdown: PricingBreakdown,
}

/// Calculator output: the auditable components plus the rounded summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuotePricing {
    /// Unrounded intermediates.
    pub components: QuoteComponents,
    /// Rounded summary.
    pub pricing: PricingSummary,
}

/// A fully minted quote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    /// Consumer-visible identifier.
    pub quote_id: QuoteId,
    /// The normalized request this quote prices.
    pub request: NormalizedQuoteRequest,
    /// The resolved distance, possibly estimated.
    pub distance_info: DistanceResult,
    /// Unrounded intermediates.
    pub components: QuoteComponents,
    /// Rounded summary.
    pub pricing: PricingSummary,
    /// Expiry of this quote.
    pub valid_until: Timestamp,
    /// When this quote was minted.
    pub created_at: Timestamp,
    /// Wall-clock time spent producing the quote.
    pub processing_time_ms: u64,
}

impl Quote {
    /// Days a minted quote stays valid.
    pub const VALIDITY_DAYS: i64 = 7;
}

/// A priced estimate: the same computation as a quote, without an identifier,
/// validity window, or analytics record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Estimate {
    /// The normalized request this estimate prices.
    pub request: NormalizedQuoteRequest,
    /// The resolved distance, possibly estimated.
    pub distance_info: DistanceResult,
    /// Unrounded intermediates.
    pub components: QuoteComponents,
    /// Rounded summary.
    pub pricing: PricingSummary,
    /// When this estimate was produced.
    pub created_at: Timestamp,
    /// Wall-clock time spent producing the estimate.
    pub processing_time_ms: u64,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn validity_window_is_seven_days() {
        assert_eq!(Quote::VALIDITY_DAYS, 7);
    }

    #[test]
    fn pricing_summary_serializes_camel_case() {
        let summary = PricingSummary {
            subtotal: Money::from_cents(8250),
            taxes: Money::from_cents(701),
            discounts: Money::zero(),
            total: Money::from_cents(8951),
            breakdown: PricingBreakdown {
                base_fee: Money::from_major(75),
                distance_fee: Money::zero(),
                item_fees: Money::zero(),
                service_level_fee: Money::zero(),
                additional_services: Money::zero(),
                event_type_multiplier: Decimal::new(11, 1),
                complexity_multiplier: Decimal::ONE,
                urgency_multiplier: Decimal::ONE,
            },
        };

        let json = serde_json::to_value(&summary).unwrap();
        assert!(json.get("breakdown").is_some());
        assert!(json["breakdown"].get("eventTypeMultiplier").is_some());
        assert!(json.get("total").is_some());
    }

    #[test]
    fn applied_multiplier_names_the_factor() {
        let applied = AppliedMultiplier {
            factor: ComplexityFactor::International,
            multiplier: Decimal::new(15, 1),
        };
        let json = serde_json::to_value(&applied).unwrap();
        assert_eq!(json["factor"], "international");
    }
}
