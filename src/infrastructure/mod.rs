//! # Infrastructure Layer
//!
//! Adapters for external systems. Today that is the map provider behind the
//! distance resolver; see [`maps`].

pub mod maps;
