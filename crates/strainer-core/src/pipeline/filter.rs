//! The filter contract
//!
//! Copyright (c) 2025 Strainer Team
//! Licensed under the Apache-2.0 license

use crate::pipeline::context::ApplyContext;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Shared handle to an immutable filter.
///
/// Filters are configured once at construction and never mutate during
/// application, so chains and combinators hold their children through
/// reference-counted handles that are safe to reuse across threads.
pub type FilterRef = Arc<dyn Filter>;

/// A single-input, single-output unit of validation or transformation.
///
/// The input is `Option<Value>`, where `None` is the absent sentinel — the
/// designated "no value" marker, distinct from JSON `null`. Absence passes
/// every filter untouched; the one exception is the filter whose sole job
/// is to reject it ([`Required`](crate::filters::Required)).
///
/// An invalid value is recorded on the context (see
/// [`ApplyContext::reject`]) and replaced by `None` in the output; filters
/// never panic on bad input.
pub trait Filter: fmt::Debug + Send + Sync {
    /// Applies the filter to a value.
    ///
    /// The provided implementation dispatches to [`Filter::apply_value`]
    /// for present values and [`Filter::apply_absent`] for the absent
    /// sentinel, so individual filters get the absent-passthrough
    /// invariant without restating it.
    fn apply(&self, value: Option<Value>, ctx: &mut ApplyContext) -> Option<Value> {
        match value {
            Some(value) => self.apply_value(value, ctx),
            None => self.apply_absent(ctx),
        }
    }

    /// Filter-specific logic for a present value.
    fn apply_value(&self, value: Value, ctx: &mut ApplyContext) -> Option<Value>;

    /// Filter-specific logic for the absent sentinel.
    ///
    /// Absence passes through untouched by default. Only filters whose
    /// documented purpose is to reject absence or to replace it with a
    /// default override this.
    fn apply_absent(&self, _ctx: &mut ApplyContext) -> Option<Value> {
        None
    }
}

impl<F: Filter + ?Sized> Filter for Arc<F> {
    fn apply(&self, value: Option<Value>, ctx: &mut ApplyContext) -> Option<Value> {
        (**self).apply(value, ctx)
    }

    fn apply_value(&self, value: Value, ctx: &mut ApplyContext) -> Option<Value> {
        (**self).apply_value(value, ctx)
    }

    fn apply_absent(&self, ctx: &mut ApplyContext) -> Option<Value> {
        (**self).apply_absent(ctx)
    }
}

impl<F: Filter + ?Sized> Filter for Box<F> {
    fn apply(&self, value: Option<Value>, ctx: &mut ApplyContext) -> Option<Value> {
        (**self).apply(value, ctx)
    }

    fn apply_value(&self, value: Value, ctx: &mut ApplyContext) -> Option<Value> {
        (**self).apply_value(value, ctx)
    }

    fn apply_absent(&self, ctx: &mut ApplyContext) -> Option<Value> {
        (**self).apply_absent(ctx)
    }
}

/// Wraps a filter into a [`FilterRef`] so one configured instance can be
/// reused across several chains or combinators.
pub fn share(filter: impl Filter + 'static) -> FilterRef {
    Arc::new(filter)
}
