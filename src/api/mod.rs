//! # API Layer
//!
//! Transport adapters over the application layer. See [`rest`].

pub mod rest;
