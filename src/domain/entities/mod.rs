//! # Domain Entities
//!
//! Request, distance, and quote entities.
//!
//! - [`request`]: raw and normalized quote requests
//! - [`distance`]: resolved road distances, live or estimated
//! - [`quote`]: priced quotes, estimates, and their auditable breakdowns

pub mod distance;
pub mod quote;
pub mod request;

pub use distance::DistanceResult;
pub use quote::{Estimate, Quote, QuotePricing};
pub use request::{NormalizedQuoteRequest, QuoteRequest};
