//! # Domain Enums
//!
//! Tag sets used by quote requests and the pricing configuration:
//!
//! - [`ItemSize`] - Item size bands
//! - [`SpecialHandling`] - Per-item handling surcharges
//! - [`ServiceLevel`] - Delivery service levels
//! - [`EventType`] - Event categories carrying a pricing multiplier
//! - [`ComplexityFactor`] - Special-requirement multipliers
//! - [`TravelMode`] - Map-provider travel modes
//! - [`Urgency`] - Caller-declared urgency class
//!
//! All enums implement `Display`/`FromStr` using the camelCase wire tags
//! (`extraLarge`, `nextDay`, `corporateEvent`, ...). Parsing is
//! case-insensitive and tolerant of `_`/`-` separators; unknown tags are the
//! caller's concern (normalization applies documented defaults).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Error returned when a tag does not belong to a closed set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} tag: {value}")]
pub struct ParseEnumError {
    /// The enum being parsed.
    pub kind: &'static str,
    /// The offending input.
    pub value: String,
}

impl ParseEnumError {
    fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}

fn fold_tag(s: &str) -> String {
    s.trim()
        .chars()
        .filter(|c| *c != '_' && *c != '-')
        .collect::<String>()
        .to_ascii_lowercase()
}

/// Item size band determining the per-item base fee.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ItemSize {
    /// Fits in a passenger footwell.
    Small,
    /// Default band when callers do not specify a size.
    #[default]
    Medium,
    /// Two-person lift.
    Large,
    /// Dedicated vehicle space; also the band charged for oversized handling.
    ExtraLarge,
}

impl ItemSize {
    /// Returns the camelCase wire tag.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Small => "small",
            Self::Medium => "medium",
            Self::Large => "large",
            Self::ExtraLarge => "extraLarge",
        }
    }
}

impl fmt::Display for ItemSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ItemSize {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match fold_tag(s).as_str() {
            "small" => Ok(Self::Small),
            "medium" => Ok(Self::Medium),
            "large" => Ok(Self::Large),
            "extralarge" | "xl" => Ok(Self::ExtraLarge),
            _ => Err(ParseEnumError::new("ItemSize", s)),
        }
    }
}

/// Special-handling surcharge tags an item may carry.
///
/// `delicate` and `highValue` map to flat configured surcharges, `hazardous`
/// adds half of the item's size fee, and `oversized` adds the extra-large
/// size fee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SpecialHandling {
    /// Fragile goods requiring padded transport.
    Delicate,
    /// Declared-value goods requiring chain of custody.
    HighValue,
    /// Goods on the restricted-materials list.
    Hazardous,
    /// Goods exceeding the large size band.
    Oversized,
}

impl SpecialHandling {
    /// Parses a known handling tag, returning `None` for unknown tags.
    ///
    /// Unknown tags are preserved on the request but contribute no fees, so
    /// this is deliberately not a `FromStr` failure.
    #[must_use]
    pub fn parse_tag(tag: &str) -> Option<Self> {
        match fold_tag(tag).as_str() {
            "delicate" | "fragile" => Some(Self::Delicate),
            "highvalue" => Some(Self::HighValue),
            "hazardous" => Some(Self::Hazardous),
            "oversized" => Some(Self::Oversized),
            _ => None,
        }
    }

    /// Returns the camelCase wire tag.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Delicate => "delicate",
            Self::HighValue => "highValue",
            Self::Hazardous => "hazardous",
            Self::Oversized => "oversized",
        }
    }
}

impl fmt::Display for SpecialHandling {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Delivery service level.
///
/// Each level carries a flat configured fee; `emergency` additionally
/// interacts with the urgency multiplier when the caller declares
/// [`Urgency::Emergency`].
///
/// # Examples
///
/// ```
/// use courier_quote::domain::value_objects::enums::ServiceLevel;
///
/// let level: ServiceLevel = "nextDay".parse().unwrap();
/// assert_eq!(level, ServiceLevel::NextDay);
/// assert_eq!(level.to_string(), "nextDay");
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ServiceLevel {
    /// Scheduled delivery, no surcharge.
    #[default]
    Standard,
    /// Delivery by end of next business day.
    NextDay,
    /// Delivery the same day.
    SameDay,
    /// Immediate dispatch.
    Emergency,
}

impl ServiceLevel {
    /// Returns the camelCase wire tag.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::NextDay => "nextDay",
            Self::SameDay => "sameDay",
            Self::Emergency => "emergency",
        }
    }

    /// Returns true for levels dispatched ahead of the standard schedule.
    #[inline]
    #[must_use]
    pub const fn is_expedited(self) -> bool {
        !matches!(self, Self::Standard)
    }
}

impl fmt::Display for ServiceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ServiceLevel {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match fold_tag(s).as_str() {
            "standard" => Ok(Self::Standard),
            "nextday" => Ok(Self::NextDay),
            "sameday" => Ok(Self::SameDay),
            "emergency" => Ok(Self::Emergency),
            _ => Err(ParseEnumError::new("ServiceLevel", s)),
        }
    }
}

/// Event category carrying a pricing multiplier.
///
/// Unknown categories normalize to [`EventType::CorporateEvent`]; a category
/// missing from the configuration multiplies by 1.0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EventType {
    /// Office and corporate functions.
    #[default]
    CorporateEvent,
    /// Weddings and receptions.
    Wedding,
    /// Conferences and conventions.
    Conference,
    /// Trade shows and expo floors.
    TradeShow,
    /// Concerts and staged performances.
    Concert,
    /// Private parties.
    PrivateParty,
}

impl EventType {
    /// Returns the camelCase wire tag.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CorporateEvent => "corporateEvent",
            Self::Wedding => "wedding",
            Self::Conference => "conference",
            Self::TradeShow => "tradeShow",
            Self::Concert => "concert",
            Self::PrivateParty => "privateParty",
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventType {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match fold_tag(s).as_str() {
            "corporateevent" | "corporate" => Ok(Self::CorporateEvent),
            "wedding" => Ok(Self::Wedding),
            "conference" => Ok(Self::Conference),
            "tradeshow" => Ok(Self::TradeShow),
            "concert" => Ok(Self::Concert),
            "privateparty" => Ok(Self::PrivateParty),
            _ => Err(ParseEnumError::new("EventType", s)),
        }
    }
}

/// Special-requirement tags carrying a compounding multiplier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ComplexityFactor {
    /// Pickup or drop across multiple venues.
    MultiVenue,
    /// Job spans multiple days.
    MultiDay,
    /// Cross-border movement.
    International,
    /// Hazardous-materials routing.
    Hazardous,
    /// Venue access restricted to a time window.
    TimeRestricted,
    /// Lift gates, cranes, or other special equipment.
    SpecialEquipment,
}

impl ComplexityFactor {
    /// Parses a known factor tag, returning `None` for unknown tags.
    #[must_use]
    pub fn parse_tag(tag: &str) -> Option<Self> {
        match fold_tag(tag).as_str() {
            "multivenue" => Some(Self::MultiVenue),
            "multiday" => Some(Self::MultiDay),
            "international" => Some(Self::International),
            "hazardous" => Some(Self::Hazardous),
            "timerestricted" => Some(Self::TimeRestricted),
            "specialequipment" => Some(Self::SpecialEquipment),
            _ => None,
        }
    }

    /// Returns the camelCase wire tag.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::MultiVenue => "multiVenue",
            Self::MultiDay => "multiDay",
            Self::International => "international",
            Self::Hazardous => "hazardous",
            Self::TimeRestricted => "timeRestricted",
            Self::SpecialEquipment => "specialEquipment",
        }
    }
}

impl fmt::Display for ComplexityFactor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Travel mode passed to the map provider.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TravelMode {
    /// Road distance; the only mode the quote pipeline uses today.
    #[default]
    Driving,
    /// Pedestrian routing.
    Walking,
    /// Cycle routing.
    Bicycling,
    /// Public transport routing.
    Transit,
}

impl TravelMode {
    /// Returns the lowercase tag the provider API expects.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Driving => "driving",
            Self::Walking => "walking",
            Self::Bicycling => "bicycling",
            Self::Transit => "transit",
        }
    }
}

impl fmt::Display for TravelMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TravelMode {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match fold_tag(s).as_str() {
            "driving" => Ok(Self::Driving),
            "walking" => Ok(Self::Walking),
            "bicycling" | "cycling" => Ok(Self::Bicycling),
            "transit" => Ok(Self::Transit),
            _ => Err(ParseEnumError::new("TravelMode", s)),
        }
    }
}

/// Caller-declared urgency class.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Urgency {
    /// Lead-time banding applies.
    #[default]
    Standard,
    /// The configured emergency multiplier applies regardless of lead time.
    Emergency,
}

impl Urgency {
    /// Returns the camelCase wire tag.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Emergency => "emergency",
        }
    }
}

impl fmt::Display for Urgency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Urgency {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match fold_tag(s).as_str() {
            "standard" => Ok(Self::Standard),
            "emergency" => Ok(Self::Emergency),
            _ => Err(ParseEnumError::new("Urgency", s)),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    mod item_size {
        use super::*;

        #[test]
        fn parses_wire_tags() {
            assert_eq!("small".parse::<ItemSize>().unwrap(), ItemSize::Small);
            assert_eq!(
                "extraLarge".parse::<ItemSize>().unwrap(),
                ItemSize::ExtraLarge
            );
            assert_eq!(
                "EXTRA_LARGE".parse::<ItemSize>().unwrap(),
                ItemSize::ExtraLarge
            );
        }

        #[test]
        fn unknown_tag_fails() {
            assert!("gigantic".parse::<ItemSize>().is_err());
        }

        #[test]
        fn default_is_medium() {
            assert_eq!(ItemSize::default(), ItemSize::Medium);
        }

        #[test]
        fn serde_uses_camel_case() {
            let json = serde_json::to_string(&ItemSize::ExtraLarge).unwrap();
            assert_eq!(json, "\"extraLarge\"");
        }
    }

    mod special_handling {
        use super::*;

        #[test]
        fn known_tags_parse() {
            assert_eq!(
                SpecialHandling::parse_tag("delicate"),
                Some(SpecialHandling::Delicate)
            );
            assert_eq!(
                SpecialHandling::parse_tag("highValue"),
                Some(SpecialHandling::HighValue)
            );
            assert_eq!(
                SpecialHandling::parse_tag("high_value"),
                Some(SpecialHandling::HighValue)
            );
        }

        #[test]
        fn unknown_tag_is_none() {
            assert_eq!(SpecialHandling::parse_tag("glowing"), None);
        }
    }

    mod service_level {
        use super::*;

        #[test]
        fn parses_all_levels() {
            for (tag, level) in [
                ("standard", ServiceLevel::Standard),
                ("nextDay", ServiceLevel::NextDay),
                ("sameDay", ServiceLevel::SameDay),
                ("emergency", ServiceLevel::Emergency),
            ] {
                assert_eq!(tag.parse::<ServiceLevel>().unwrap(), level);
            }
        }

        #[test]
        fn display_roundtrips() {
            let level = ServiceLevel::SameDay;
            assert_eq!(level.to_string().parse::<ServiceLevel>().unwrap(), level);
        }

        #[test]
        fn standard_is_not_expedited() {
            assert!(!ServiceLevel::Standard.is_expedited());
            assert!(ServiceLevel::Emergency.is_expedited());
        }
    }

    mod event_type {
        use super::*;

        #[test]
        fn default_is_corporate() {
            assert_eq!(EventType::default(), EventType::CorporateEvent);
        }

        #[test]
        fn parses_snake_and_camel() {
            assert_eq!(
                "tradeShow".parse::<EventType>().unwrap(),
                EventType::TradeShow
            );
            assert_eq!(
                "trade_show".parse::<EventType>().unwrap(),
                EventType::TradeShow
            );
        }

        #[test]
        fn serde_key_is_camel_case() {
            let json = serde_json::to_string(&EventType::CorporateEvent).unwrap();
            assert_eq!(json, "\"corporateEvent\"");
        }
    }

    mod complexity_factor {
        use super::*;

        #[test]
        fn known_tags_parse() {
            assert_eq!(
                ComplexityFactor::parse_tag("multiVenue"),
                Some(ComplexityFactor::MultiVenue)
            );
            assert_eq!(
                ComplexityFactor::parse_tag("special_equipment"),
                Some(ComplexityFactor::SpecialEquipment)
            );
        }

        #[test]
        fn unknown_tag_is_none() {
            assert_eq!(ComplexityFactor::parse_tag("underwater"), None);
        }
    }

    mod travel_mode {
        use super::*;

        #[test]
        fn default_is_driving() {
            assert_eq!(TravelMode::default(), TravelMode::Driving);
        }

        #[test]
        fn provider_tag_is_lowercase() {
            assert_eq!(TravelMode::Driving.as_str(), "driving");
        }
    }

    mod urgency {
        use super::*;

        #[test]
        fn parses_both_classes() {
            assert_eq!("standard".parse::<Urgency>().unwrap(), Urgency::Standard);
            assert_eq!("EMERGENCY".parse::<Urgency>().unwrap(), Urgency::Emergency);
        }

        #[test]
        fn unknown_tag_fails() {
            assert!("panic".parse::<Urgency>().is_err());
        }
    }
}
