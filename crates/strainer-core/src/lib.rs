//! Strainer Core - composable value-validation and transformation pipelines
//!
//! This crate provides the core functionality for validating and cleaning
//! dynamic values: small single-purpose filters compose into chains and
//! structural combinators, and a runner reports validity, a best-effort
//! cleaned result, and structured path-qualified errors.
//!
//! # Main Components
//!
//! - **Filter contract**: the [`Filter`] trait over `Option<serde_json::Value>`,
//!   where `None` is the absent sentinel that passes every filter except
//!   [`filters::Required`]
//! - **Chains**: [`FilterChain`] sequences filters with
//!   short-circuit-on-invalid semantics
//! - **Structural combinators**: [`FilterMapper`] (per-key chains over
//!   mappings), [`FilterRepeater`] (one chain over every element), and
//!   [`FilterSwitch`] (discriminant-based dispatch)
//! - **Orchestration**: [`FilterRunner`] memoizes one run into
//!   `(is_valid, cleaned_data, errors)`
//! - **Error Handling**: errors are data ([`FilterError`] with stable
//!   [`ErrorCode`]s and context paths), never panics for invalid input
//!
//! # Example
//!
//! ```
//! use serde_json::json;
//! use strainer_core::filters::{Int, Min, Required};
//! use strainer_core::{FilterChain, FilterMapper, FilterRunner, KeyPolicy};
//!
//! let filter = FilterMapper::new()
//!     .field("price", FilterChain::of(Required).then(Int).then(Min::new(0)))
//!     .field("quantity", FilterChain::of(Required).then(Int))
//!     .extra_keys(KeyPolicy::Deny);
//!
//! let runner = FilterRunner::new(filter, json!({"price": "42", "quantity": 3}));
//! assert!(runner.is_valid());
//! assert_eq!(runner.cleaned_data(), Some(&json!({"price": 42, "quantity": 3})));
//! ```

pub mod error;
pub mod filters;
pub mod path;
pub mod pipeline;
pub mod types;

// Re-export the main types for convenience
pub use error::{ErrorCode, FilterError};
pub use path::{ContextPath, PathSegment};
pub use pipeline::{
    share, ApplyContext, Checkpoint, DiscriminantGetter, Filter, FilterChain, FilterMapper,
    FilterRef, FilterRepeater, FilterRunner, FilterSwitch, KeyPolicy,
};
pub use types::ValueKind;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
