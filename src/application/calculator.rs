//! # Quote Calculator
//!
//! Pure pricing function over a normalized request, a resolved distance,
//! and an immutable configuration snapshot.
//!
//! The composition order is fixed; it determines both the rounding behavior
//! and the base that percentage-style fees apply to:
//!
//! 1. base fee
//! 2. tiered distance fee
//! 3. per-item fees with special-handling surcharges
//! 4. service-level fee
//! 5. add-on service fees (insurance premium as a fraction of declared value)
//! 6. subtotal before multipliers
//! 7. event-type multiplier
//! 8. complexity multipliers, in request order
//! 9. urgency multiplier (emergency flag or lead-time band)
//! 10. taxes
//! 11. total = subtotal + taxes - discounts
//! 12. round `subtotal`/`taxes`/`total` to cents, half away from zero
//!
//! Intermediates are preserved unrounded in [`QuoteComponents`]. The
//! calculator takes `now` as an argument and touches no global state; on a
//! well-normalized input it cannot fail, so an `Err` here indicates a
//! programmer error upstream.

use crate::config::{DistanceTiers, ItemFees, PricingConfig, INSURANCE_PREMIUM_TAG};
use crate::domain::entities::distance::DistanceResult;
use crate::domain::entities::quote::{
    AppliedMultiplier, ItemFeeLine, PricingBreakdown, PricingSummary, QuoteComponents,
    QuotePricing, ServiceFeeLine,
};
use crate::domain::entities::request::{NormalizedItem, NormalizedQuoteRequest};
use crate::domain::errors::DomainResult;
use crate::domain::value_objects::enums::{ComplexityFactor, SpecialHandling, Urgency};
use crate::domain::value_objects::money::Money;
use crate::domain::value_objects::timestamp::Timestamp;
use crate::domain::value_objects::CheckedArithmetic;
use rust_decimal::Decimal;

fn hazardous_fraction() -> Decimal {
    Decimal::new(5, 1)
}

fn lead_time_multiplier(days: i64) -> Decimal {
    if days <= 1 {
        Decimal::new(18, 1)
    } else if days <= 2 {
        Decimal::new(14, 1)
    } else if days <= 7 {
        Decimal::new(12, 1)
    } else {
        Decimal::ONE
    }
}

/// Computes the tiered distance fee for `miles`.
///
/// A distance exactly at a band boundary is charged at the lower band's
/// rate, so the fee function is continuous in `miles`.
///
/// # Errors
///
/// Returns `DomainError::Arithmetic` only on overflow, which cannot happen
/// for distances and rates within the documented ranges.
pub fn distance_fee(miles: Decimal, tiers: &DistanceTiers) -> DomainResult<Money> {
    if miles <= tiers.tier1_max_miles {
        return Ok(tiers.tier1_rate.safe_mul(miles)?);
    }

    let tier1_full = tiers.tier1_rate.safe_mul(tiers.tier1_max_miles)?;
    if miles <= tiers.tier2_max_miles {
        let tier2_part = tiers
            .tier2_rate
            .safe_mul(miles.safe_sub(tiers.tier1_max_miles)?)?;
        return Ok(tier1_full.safe_add(tier2_part)?);
    }

    let tier2_full = tiers
        .tier2_rate
        .safe_mul(tiers.tier2_max_miles.safe_sub(tiers.tier1_max_miles)?)?;
    let tier3_part = tiers
        .tier3_rate
        .safe_mul(miles.safe_sub(tiers.tier2_max_miles)?)?;
    Ok(tier1_full.safe_add(tier2_full)?.safe_add(tier3_part)?)
}

/// Selects the urgency multiplier.
///
/// An emergency declaration wins outright; otherwise the multiplier comes
/// from the lead-time band of the event date (absent date: no urgency).
#[must_use]
pub fn urgency_multiplier(
    urgency: Urgency,
    event_date: Option<Timestamp>,
    emergency_multiplier: Decimal,
    now: Timestamp,
) -> Decimal {
    if urgency == Urgency::Emergency {
        return emergency_multiplier;
    }
    match event_date {
        None => Decimal::ONE,
        Some(event) => lead_time_multiplier(now.days_until_ceil(&event)),
    }
}

fn price_item(item: &NormalizedItem, fees: &ItemFees) -> DomainResult<ItemFeeLine> {
    let base_fee = fees.for_size(item.size);

    let mut special_fees = Money::zero();
    for tag in &item.special {
        let Some(handling) = SpecialHandling::parse_tag(tag) else {
            continue;
        };
        let surcharge = match handling {
            SpecialHandling::Delicate => fees.delicate,
            SpecialHandling::HighValue => fees.high_value,
            SpecialHandling::Hazardous => base_fee.safe_mul(hazardous_fraction())?,
            SpecialHandling::Oversized => fees.extra_large,
        };
        special_fees = special_fees.safe_add(surcharge)?;
    }

    let line_total = base_fee
        .safe_add(special_fees)?
        .safe_mul(Decimal::from(item.quantity))?;

    Ok(ItemFeeLine {
        description: item.description.clone(),
        size: item.size,
        quantity: item.quantity,
        base_fee,
        special_fees,
        line_total,
    })
}

fn price_additional_services(
    tags: &[String],
    declared_value: Money,
    config: &PricingConfig,
) -> DomainResult<(Vec<ServiceFeeLine>, Money)> {
    let mut lines = Vec::with_capacity(tags.len());
    let mut total = Money::zero();

    for tag in tags {
        let amount = if tag == INSURANCE_PREMIUM_TAG {
            declared_value.safe_mul(config.insurance_premium_rate)?
        } else {
            config
                .additional_services
                .get(tag)
                .copied()
                .unwrap_or(Money::ZERO)
        };
        total = total.safe_add(amount)?;
        lines.push(ServiceFeeLine {
            service: tag.clone(),
            amount,
        });
    }

    Ok((lines, total))
}

/// Prices a normalized request.
///
/// # Errors
///
/// Returns `DomainError::Arithmetic` only on overflow; a well-normalized
/// input within the documented ranges never fails.
pub fn compute_pricing(
    request: &NormalizedQuoteRequest,
    distance: &DistanceResult,
    config: &PricingConfig,
    now: Timestamp,
) -> DomainResult<QuotePricing> {
    let base_fee = config.base_fee;
    let distance_fee = distance_fee(distance.miles(), &config.distance_tiers)?;

    let mut item_lines = Vec::with_capacity(request.items.len());
    let mut item_fees_total = Money::zero();
    for item in &request.items {
        let line = price_item(item, &config.item_fees)?;
        item_fees_total = item_fees_total.safe_add(line.line_total)?;
        item_lines.push(line);
    }

    let service_level_fee = config.service_levels.for_level(request.service_level);

    let (additional_service_lines, additional_services_total) =
        price_additional_services(&request.additional_services, request.declared_value, config)?;

    let subtotal_before_multipliers = base_fee
        .safe_add(distance_fee)?
        .safe_add(service_level_fee)?
        .safe_add(item_fees_total)?
        .safe_add(additional_services_total)?;

    let event_type_multiplier = config.event_type_multiplier(request.event_type);
    let mut running = subtotal_before_multipliers.safe_mul(event_type_multiplier)?;

    let mut complexity_multipliers = Vec::new();
    let mut complexity_product = Decimal::ONE;
    for tag in &request.special_requirements {
        let Some(factor) = ComplexityFactor::parse_tag(tag) else {
            continue;
        };
        let Some(multiplier) = config.complexity_multiplier(factor) else {
            continue;
        };
        running = running.safe_mul(multiplier)?;
        complexity_product = complexity_product.safe_mul(multiplier)?;
        complexity_multipliers.push(AppliedMultiplier { factor, multiplier });
    }

    let urgency_multiplier = urgency_multiplier(
        request.urgency,
        request.event_date,
        config.emergency_urgency_multiplier,
        now,
    );
    let subtotal_after_multipliers = running.safe_mul(urgency_multiplier)?;

    let taxes = subtotal_after_multipliers.safe_mul(config.tax_rate)?;
    let discounts = request.discount;
    let total = subtotal_after_multipliers
        .safe_add(taxes)?
        .saturating_sub(discounts);

    let pricing = PricingSummary {
        subtotal: subtotal_after_multipliers.rounded(),
        taxes: taxes.rounded(),
        discounts: discounts.rounded(),
        total: total.rounded(),
        breakdown: PricingBreakdown {
            base_fee: base_fee.rounded(),
            distance_fee: distance_fee.rounded(),
            item_fees: item_fees_total.rounded(),
            service_level_fee: service_level_fee.rounded(),
            additional_services: additional_services_total.rounded(),
            event_type_multiplier,
            complexity_multiplier: complexity_product,
            urgency_multiplier,
        },
    };

    let components = QuoteComponents {
        base_fee,
        distance_fee,
        item_lines,
        item_fees_total,
        service_level_fee,
        additional_service_lines,
        additional_services_total,
        subtotal_before_multipliers,
        event_type_multiplier,
        complexity_multipliers,
        urgency_multiplier,
        subtotal_after_multipliers,
        taxes,
    };

    Ok(QuotePricing {
        components,
        pricing,
    })
}
