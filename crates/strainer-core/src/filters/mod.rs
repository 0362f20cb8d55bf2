//! Built-in reference filters
//!
//! The leaf filters the pipeline itself relies on: presence and emptiness
//! checks, defaults, type tags, membership, lengths, and basic numeric
//! coercion. Richer parsing (dates, encodings, patterns) belongs in
//! downstream filter crates built on the same [`Filter`](crate::Filter)
//! contract.
//!
//! Copyright (c) 2025 Strainer Team
//! Licensed under the Apache-2.0 license

pub mod number;
pub mod simple;

pub use number::{Int, Max, Min};
pub use simple::{
    Choice, ExpectType, Length, MaxLength, MinLength, NoOp, NotEmpty, Optional, Required,
};
