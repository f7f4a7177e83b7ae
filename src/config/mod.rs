//! # Pricing Configuration
//!
//! Process-wide pricing configuration: environment-loaded defaults, range
//! validation, and the atomic-snapshot [`store::ConfigStore`].
//!
//! The configuration is immutable once installed; runtime changes replace
//! the whole snapshot so a quote in flight never observes a torn mix of old
//! and new values.
//!
//! # Examples
//!
//! ```
//! use courier_quote::config::PricingConfig;
//! use rust_decimal::Decimal;
//!
//! let config = PricingConfig::default();
//! assert_eq!(config.tax_rate, Decimal::new(85, 3));
//! assert!(config.validate().is_ok());
//! ```

pub mod store;

pub use store::{ConfigStore, ConfigUpdate};

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::value_objects::enums::{ComplexityFactor, EventType, ItemSize, ServiceLevel};
use crate::domain::value_objects::money::Money;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The three mileage bands and their per-mile rates.
///
/// # Invariants
///
/// - `tier1_max_miles < tier2_max_miles`
/// - every rate is non-negative
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DistanceTiers {
    /// Upper bound of the first band, inclusive.
    pub tier1_max_miles: Decimal,
    /// Rate per mile within the first band.
    pub tier1_rate: Money,
    /// Upper bound of the second band, inclusive.
    pub tier2_max_miles: Decimal,
    /// Rate per mile within the second band.
    pub tier2_rate: Money,
    /// Rate per mile beyond the second band.
    pub tier3_rate: Money,
}

impl Default for DistanceTiers {
    fn default() -> Self {
        Self {
            tier1_max_miles: Decimal::from(20u32),
            tier1_rate: Money::zero(),
            tier2_max_miles: Decimal::from(50u32),
            tier2_rate: Money::from_cents(150),
            tier3_rate: Money::from_major(2),
        }
    }
}

/// Per-item fees by size band, plus the flat special-handling surcharges.
///
/// Hazardous handling is not listed here: it is a fixed one-half fraction of
/// the item's size fee. Oversized handling charges the extra-large fee.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemFees {
    /// Small-band fee.
    pub small: Money,
    /// Medium-band fee; also the fallback for unrecognized size tags.
    pub medium: Money,
    /// Large-band fee.
    pub large: Money,
    /// Extra-large-band fee; also the oversized surcharge.
    pub extra_large: Money,
    /// Flat surcharge for delicate handling.
    pub delicate: Money,
    /// Flat surcharge for high-value handling.
    pub high_value: Money,
}

impl ItemFees {
    /// Returns the fee for a size band.
    #[must_use]
    pub const fn for_size(&self, size: ItemSize) -> Money {
        match size {
            ItemSize::Small => self.small,
            ItemSize::Medium => self.medium,
            ItemSize::Large => self.large,
            ItemSize::ExtraLarge => self.extra_large,
        }
    }
}

impl Default for ItemFees {
    fn default() -> Self {
        Self {
            small: Money::from_major(10),
            medium: Money::from_major(25),
            large: Money::from_major(50),
            extra_large: Money::from_major(75),
            delicate: Money::from_major(35),
            high_value: Money::from_major(60),
        }
    }
}

/// Flat fees by service level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceLevelFees {
    /// Standard delivery.
    pub standard: Money,
    /// Next-day delivery.
    pub next_day: Money,
    /// Same-day delivery.
    pub same_day: Money,
    /// Emergency dispatch.
    pub emergency: Money,
}

impl ServiceLevelFees {
    /// Returns the fee for a service level.
    #[must_use]
    pub const fn for_level(&self, level: ServiceLevel) -> Money {
        match level {
            ServiceLevel::Standard => self.standard,
            ServiceLevel::NextDay => self.next_day,
            ServiceLevel::SameDay => self.same_day,
            ServiceLevel::Emergency => self.emergency,
        }
    }
}

impl Default for ServiceLevelFees {
    fn default() -> Self {
        Self {
            standard: Money::zero(),
            next_day: Money::from_major(25),
            same_day: Money::from_major(50),
            emergency: Money::from_major(150),
        }
    }
}

/// The complete pricing configuration.
///
/// A snapshot is immutable; see [`ConfigStore`] for the runtime-update
/// discipline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingConfig {
    /// Flat base fee on every quote.
    pub base_fee: Money,
    /// Mileage bands and rates.
    pub distance_tiers: DistanceTiers,
    /// Per-item fees and surcharges.
    pub item_fees: ItemFees,
    /// Service-level fees.
    pub service_levels: ServiceLevelFees,
    /// Flat fees by add-on service tag. Unknown tags contribute nothing.
    pub additional_services: HashMap<String, Money>,
    /// Insurance premium as a fraction of declared value. Kept apart from
    /// the flat-fee map so it can never be summed as a flat fee.
    pub insurance_premium_rate: Decimal,
    /// Multiplier by event category; categories absent here multiply by 1.
    pub event_types: HashMap<EventType, Decimal>,
    /// Multiplier by complexity factor; each must be >= 1.
    pub complexity_factors: HashMap<ComplexityFactor, Decimal>,
    /// Tax fraction applied after multipliers (0.0 - 1.0).
    pub tax_rate: Decimal,
    /// Urgency multiplier when the caller declares an emergency.
    pub emergency_urgency_multiplier: Decimal,
}

/// Add-on service tag whose fee is a fraction of declared value.
pub const INSURANCE_PREMIUM_TAG: &str = "insurancePremium";

impl Default for PricingConfig {
    fn default() -> Self {
        let additional_services = [
            ("packing", Money::from_major(50)),
            ("unpacking", Money::from_major(35)),
            ("assembly", Money::from_major(60)),
            ("storage", Money::from_major(30)),
            ("whiteGlove", Money::from_major(75)),
        ]
        .into_iter()
        .map(|(tag, fee)| (tag.to_string(), fee))
        .collect();

        let event_types = HashMap::from([
            (EventType::CorporateEvent, Decimal::new(11, 1)),
            (EventType::Wedding, Decimal::new(13, 1)),
            (EventType::Conference, Decimal::new(12, 1)),
            (EventType::TradeShow, Decimal::new(125, 2)),
            (EventType::Concert, Decimal::new(14, 1)),
            (EventType::PrivateParty, Decimal::new(115, 2)),
        ]);

        let complexity_factors = HashMap::from([
            (ComplexityFactor::MultiVenue, Decimal::new(12, 1)),
            (ComplexityFactor::MultiDay, Decimal::new(115, 2)),
            (ComplexityFactor::International, Decimal::new(15, 1)),
            (ComplexityFactor::Hazardous, Decimal::new(135, 2)),
            (ComplexityFactor::TimeRestricted, Decimal::new(11, 1)),
            (ComplexityFactor::SpecialEquipment, Decimal::new(125, 2)),
        ]);

        Self {
            base_fee: Money::from_major(75),
            distance_tiers: DistanceTiers::default(),
            item_fees: ItemFees::default(),
            service_levels: ServiceLevelFees::default(),
            additional_services,
            insurance_premium_rate: Decimal::new(2, 2),
            event_types,
            complexity_factors,
            tax_rate: Decimal::new(85, 3),
            emergency_urgency_multiplier: Decimal::TWO,
        }
    }
}

impl PricingConfig {
    /// Loads configuration from environment variables, falling back to the
    /// documented defaults for anything unset.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::ConfigInvalid` when a variable fails to parse
    /// or the resulting configuration violates a range invariant.
    pub fn from_env() -> DomainResult<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Loads configuration through an arbitrary variable lookup.
    ///
    /// `from_env` delegates here; tests inject a map instead of mutating
    /// process environment.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::ConfigInvalid` when a variable fails to parse
    /// or the resulting configuration violates a range invariant.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> DomainResult<Self> {
        let defaults = Self::default();
        let decimal = |name: &str, default: Decimal| -> DomainResult<Decimal> {
            match lookup(name) {
                Some(raw) => raw.trim().parse().map_err(|_| {
                    DomainError::config_invalid(name, format!("not a decimal: {raw}"))
                }),
                None => Ok(default),
            }
        };
        let money = |name: &str, default: Money| -> DomainResult<Money> {
            let amount = decimal(name, default.amount())?;
            Money::new(amount)
                .map_err(|_| DomainError::config_invalid(name, "must be non-negative"))
        };

        let config = Self {
            base_fee: money("BASE_DELIVERY_FEE", defaults.base_fee)?,
            distance_tiers: DistanceTiers {
                tier1_max_miles: decimal(
                    "DISTANCE_TIER_1_MAX",
                    defaults.distance_tiers.tier1_max_miles,
                )?,
                tier1_rate: money("DISTANCE_TIER_1_RATE", defaults.distance_tiers.tier1_rate)?,
                tier2_max_miles: decimal(
                    "DISTANCE_TIER_2_MAX",
                    defaults.distance_tiers.tier2_max_miles,
                )?,
                tier2_rate: money("DISTANCE_TIER_2_RATE", defaults.distance_tiers.tier2_rate)?,
                tier3_rate: money("DISTANCE_TIER_3_RATE", defaults.distance_tiers.tier3_rate)?,
            },
            item_fees: ItemFees {
                small: money("SMALL_ITEM_FEE", defaults.item_fees.small)?,
                medium: money("MEDIUM_ITEM_FEE", defaults.item_fees.medium)?,
                large: money("LARGE_ITEM_FEE", defaults.item_fees.large)?,
                ..defaults.item_fees
            },
            service_levels: ServiceLevelFees {
                standard: money("STANDARD_FEE", defaults.service_levels.standard)?,
                next_day: money("NEXT_DAY_FEE", defaults.service_levels.next_day)?,
                same_day: money("SAME_DAY_FEE", defaults.service_levels.same_day)?,
                emergency: money("EMERGENCY_FEE", defaults.service_levels.emergency)?,
            },
            tax_rate: decimal("TAX_RATE", defaults.tax_rate)?,
            emergency_urgency_multiplier: decimal(
                "EMERGENCY_MULTIPLIER",
                defaults.emergency_urgency_multiplier,
            )?,
            ..defaults
        };
        config.validate()?;
        Ok(config)
    }

    /// Validates every documented range invariant.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::ConfigInvalid` naming the first offending field.
    pub fn validate(&self) -> DomainResult<()> {
        require_non_negative("baseFee", self.base_fee.amount())?;

        let tiers = &self.distance_tiers;
        require_non_negative("distanceTiers.tier1MaxMiles", tiers.tier1_max_miles)?;
        require_non_negative("distanceTiers.tier2MaxMiles", tiers.tier2_max_miles)?;
        if tiers.tier1_max_miles >= tiers.tier2_max_miles {
            return Err(DomainError::config_invalid(
                "distanceTiers",
                "tier1MaxMiles must be less than tier2MaxMiles",
            ));
        }
        require_non_negative("distanceTiers.tier1Rate", tiers.tier1_rate.amount())?;
        require_non_negative("distanceTiers.tier2Rate", tiers.tier2_rate.amount())?;
        require_non_negative("distanceTiers.tier3Rate", tiers.tier3_rate.amount())?;

        for (field, fee) in [
            ("itemFees.small", self.item_fees.small),
            ("itemFees.medium", self.item_fees.medium),
            ("itemFees.large", self.item_fees.large),
            ("itemFees.extraLarge", self.item_fees.extra_large),
            ("itemFees.delicate", self.item_fees.delicate),
            ("itemFees.highValue", self.item_fees.high_value),
            ("serviceLevels.standard", self.service_levels.standard),
            ("serviceLevels.nextDay", self.service_levels.next_day),
            ("serviceLevels.sameDay", self.service_levels.same_day),
            ("serviceLevels.emergency", self.service_levels.emergency),
        ] {
            require_non_negative(field, fee.amount())?;
        }

        for (tag, fee) in &self.additional_services {
            if fee.amount().is_sign_negative() {
                return Err(DomainError::config_invalid(
                    format!("additionalServices.{tag}"),
                    "fee must be non-negative",
                ));
            }
        }
        require_non_negative("insurancePremiumRate", self.insurance_premium_rate)?;

        for (event_type, multiplier) in &self.event_types {
            if multiplier.is_sign_negative() {
                return Err(DomainError::config_invalid(
                    format!("eventTypes.{event_type}"),
                    "multiplier must be non-negative",
                ));
            }
        }
        for (factor, multiplier) in &self.complexity_factors {
            if *multiplier < Decimal::ONE {
                return Err(DomainError::config_invalid(
                    format!("complexityFactors.{factor}"),
                    "multiplier must be at least 1",
                ));
            }
        }

        if self.tax_rate.is_sign_negative() || self.tax_rate > Decimal::ONE {
            return Err(DomainError::config_invalid(
                "taxRate",
                "must be between 0 and 1",
            ));
        }
        if self.emergency_urgency_multiplier < Decimal::ONE {
            return Err(DomainError::config_invalid(
                "emergencyUrgencyMultiplier",
                "must be at least 1",
            ));
        }

        Ok(())
    }

    /// Returns the multiplier for an event category, defaulting to 1.
    #[must_use]
    pub fn event_type_multiplier(&self, event_type: EventType) -> Decimal {
        self.event_types
            .get(&event_type)
            .copied()
            .unwrap_or(Decimal::ONE)
    }

    /// Returns the multiplier for a complexity factor, if configured.
    #[must_use]
    pub fn complexity_multiplier(&self, factor: ComplexityFactor) -> Option<Decimal> {
        self.complexity_factors.get(&factor).copied()
    }
}

fn require_non_negative(field: &str, value: Decimal) -> DomainResult<()> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(DomainError::config_invalid(field, "must be non-negative"));
    }
    Ok(())
}
