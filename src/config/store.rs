//! # Configuration Store
//!
//! Atomic-snapshot holder for the process-wide [`PricingConfig`].
//!
//! Readers capture an `Arc` snapshot on entry and price the whole quote
//! against it; writers validate a shallow merge and swap the pointer. A
//! concurrent reader therefore sees either the old or the new configuration,
//! never a torn mix.
//!
//! # Examples
//!
//! ```
//! use courier_quote::config::{ConfigStore, ConfigUpdate, PricingConfig};
//! use courier_quote::domain::value_objects::money::Money;
//!
//! let store = ConfigStore::with_defaults();
//! let update = ConfigUpdate {
//!     base_fee: Some(Money::from_major(90)),
//!     ..ConfigUpdate::default()
//! };
//! store.update(update).unwrap();
//! assert_eq!(store.snapshot().base_fee, Money::from_major(90));
//! ```

use crate::config::{DistanceTiers, ItemFees, PricingConfig, ServiceLevelFees};
use crate::domain::errors::DomainResult;
use crate::domain::value_objects::enums::{ComplexityFactor, EventType};
use crate::domain::value_objects::money::Money;
use parking_lot::RwLock;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::Arc;

/// Shallow partial update of the pricing configuration.
///
/// Each supplied top-level key replaces that key wholesale: sending a
/// `distance_tiers` object replaces all five tier values, not just the ones
/// that changed. Callers updating part of a nested object must send it fully
/// normalized.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct ConfigUpdate {
    /// Replacement base fee.
    pub base_fee: Option<Money>,
    /// Replacement distance tiers (whole object).
    pub distance_tiers: Option<DistanceTiers>,
    /// Replacement item fees (whole object).
    pub item_fees: Option<ItemFees>,
    /// Replacement service-level fees (whole object).
    pub service_levels: Option<ServiceLevelFees>,
    /// Replacement add-on service fee map (whole map).
    pub additional_services: Option<HashMap<String, Money>>,
    /// Replacement insurance premium rate.
    pub insurance_premium_rate: Option<Decimal>,
    /// Replacement event-type multiplier map (whole map).
    pub event_types: Option<HashMap<EventType, Decimal>>,
    /// Replacement complexity-factor multiplier map (whole map).
    pub complexity_factors: Option<HashMap<ComplexityFactor, Decimal>>,
    /// Replacement tax rate.
    pub tax_rate: Option<Decimal>,
    /// Replacement emergency urgency multiplier.
    pub emergency_urgency_multiplier: Option<Decimal>,
}

impl ConfigUpdate {
    fn merge_into(self, mut config: PricingConfig) -> PricingConfig {
        if let Some(base_fee) = self.base_fee {
            config.base_fee = base_fee;
        }
        if let Some(distance_tiers) = self.distance_tiers {
            config.distance_tiers = distance_tiers;
        }
        if let Some(item_fees) = self.item_fees {
            config.item_fees = item_fees;
        }
        if let Some(service_levels) = self.service_levels {
            config.service_levels = service_levels;
        }
        if let Some(additional_services) = self.additional_services {
            config.additional_services = additional_services;
        }
        if let Some(insurance_premium_rate) = self.insurance_premium_rate {
            config.insurance_premium_rate = insurance_premium_rate;
        }
        if let Some(event_types) = self.event_types {
            config.event_types = event_types;
        }
        if let Some(complexity_factors) = self.complexity_factors {
            config.complexity_factors = complexity_factors;
        }
        if let Some(tax_rate) = self.tax_rate {
            config.tax_rate = tax_rate;
        }
        if let Some(emergency_urgency_multiplier) = self.emergency_urgency_multiplier {
            config.emergency_urgency_multiplier = emergency_urgency_multiplier;
        }
        config
    }
}

/// Process-wide configuration store with atomic snapshot replacement.
#[derive(Debug)]
pub struct ConfigStore {
    current: RwLock<Arc<PricingConfig>>,
}

impl ConfigStore {
    /// Creates a store holding a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::ConfigInvalid` if the configuration violates a
    /// range invariant.
    pub fn new(config: PricingConfig) -> DomainResult<Self> {
        config.validate()?;
        Ok(Self {
            current: RwLock::new(Arc::new(config)),
        })
    }

    /// Creates a store holding the documented defaults.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self {
            current: RwLock::new(Arc::new(PricingConfig::default())),
        }
    }

    /// Returns the current configuration snapshot.
    ///
    /// The snapshot stays internally consistent for as long as the caller
    /// holds it, regardless of concurrent updates.
    #[must_use]
    pub fn snapshot(&self) -> Arc<PricingConfig> {
        self.current.read().clone()
    }

    /// Validates a shallow merge of `update` and installs it atomically.
    ///
    /// On failure the previous configuration remains active.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::ConfigInvalid` naming the offending field; the
    /// update is discarded in full.
    pub fn update(&self, update: ConfigUpdate) -> DomainResult<Arc<PricingConfig>> {
        let merged = update.merge_into((*self.snapshot()).clone());
        merged.validate()?;
        let merged = Arc::new(merged);
        *self.current.write() = Arc::clone(&merged);
        tracing::info!("pricing configuration updated");
        Ok(merged)
    }
}

impl Default for ConfigStore {
    fn default() -> Self {
        Self::with_defaults()
    }
}
