//! Implementation of the `#[derive(Record)]` macro.
//!
//! Generates the field table and positional accessor of the `Record`
//! trait, plus field name constants for building predicates.

mod attrs;
mod derive;

pub use derive::record_derive_impl;
