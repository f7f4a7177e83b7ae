//! # Maps Infrastructure
//!
//! Distance resolution against the external map provider:
//!
//! - [`error`]: provider error taxonomy (quota vs. everything else)
//! - [`client`]: reqwest wrapper translating transport failures
//! - [`provider`]: the [`provider::DistanceProvider`] port and the
//!   distance-matrix adapter
//! - [`cache`]: concurrent 24-hour TTL cache
//! - [`resolver`]: orchestration, fallback policy, periodic sweeper

pub mod cache;
pub mod client;
pub mod error;
pub mod provider;
pub mod resolver;

pub use cache::DistanceCache;
pub use error::{MapsError, MapsResult};
pub use provider::{DistanceMatrixProvider, DistanceProvider};
pub use resolver::DistanceResolver;
