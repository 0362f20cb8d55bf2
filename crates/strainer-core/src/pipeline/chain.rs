//! Sequential filter composition
//!
//! Copyright (c) 2025 Strainer Team
//! Licensed under the Apache-2.0 license

use crate::pipeline::context::ApplyContext;
use crate::pipeline::filter::{Filter, FilterRef};
use serde_json::Value;
use std::sync::Arc;

/// Ordered composition of filters, treated as a single filter.
///
/// Each stage receives the previous stage's output. Execution stops at the
/// first stage that records an error, so a fallback-providing stage (e.g.
/// [`Optional`](crate::filters::Optional)) must come *before* the strict
/// validator it is meant to satisfy, not after.
///
/// Composition is associative: `a.extend(b)` behaves exactly like the flat
/// chain of `a`'s stages followed by `b`'s. A stage position that should do
/// nothing is an explicit [`NoOp`](crate::filters::NoOp).
#[derive(Debug, Clone, Default)]
pub struct FilterChain {
    stages: Vec<FilterRef>,
}

impl FilterChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// A single-stage chain; reads well at call sites that grow a chain
    /// from one filter.
    pub fn of(filter: impl Filter + 'static) -> Self {
        Self::new().then(filter)
    }

    /// Appends a stage.
    pub fn then(mut self, filter: impl Filter + 'static) -> Self {
        self.stages.push(Arc::new(filter));
        self
    }

    /// Appends every stage of `other`.
    pub fn extend(mut self, other: FilterChain) -> Self {
        self.stages.extend(other.stages);
        self
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    fn run(&self, mut value: Option<Value>, ctx: &mut ApplyContext) -> Option<Value> {
        for (index, stage) in self.stages.iter().enumerate() {
            let (next, clean) = ctx.apply(stage.as_ref(), value);
            value = next;

            // Chains stop at the first sign of trouble; later stages never
            // observe a value that already failed.
            if !clean {
                log::trace!("filter chain short-circuited at stage {}", index);
                break;
            }
        }

        value
    }
}

impl Filter for FilterChain {
    fn apply_value(&self, value: Value, ctx: &mut ApplyContext) -> Option<Value> {
        self.run(Some(value), ctx)
    }

    /// A chain forwards the absent sentinel into its stages, so a member
    /// like `Required` can reject it and a member like `Optional` can
    /// replace it.
    fn apply_absent(&self, ctx: &mut ApplyContext) -> Option<Value> {
        self.run(None, ctx)
    }
}
