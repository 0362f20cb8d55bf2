//! The filter pipeline engine
//!
//! This module implements the combinator algebra the whole crate is built
//! around: the [`Filter`] contract, sequential composition with
//! short-circuit semantics ([`FilterChain`]), the structural combinators
//! that recurse over mappings and sequences ([`FilterMapper`],
//! [`FilterRepeater`], [`FilterSwitch`]), and the orchestration entry point
//! that turns one run into a validity/cleaned-data/errors report
//! ([`FilterRunner`]).
//!
//! Copyright (c) 2025 Strainer Team
//! Licensed under the Apache-2.0 license

pub mod chain;
pub mod context;
pub mod filter;
pub mod mapper;
pub mod repeater;
pub mod runner;
pub mod switch;

pub use chain::FilterChain;
pub use context::{ApplyContext, Checkpoint};
pub use filter::{share, Filter, FilterRef};
pub use mapper::{FilterMapper, KeyPolicy};
pub use repeater::FilterRepeater;
pub use runner::FilterRunner;
pub use switch::{DiscriminantGetter, FilterSwitch};
