//! Application context threaded through nested filter application
//!
//! Copyright (c) 2025 Strainer Team
//! Licensed under the Apache-2.0 license

use crate::error::{ErrorCode, FilterError};
use crate::path::{ContextPath, PathSegment};
use crate::pipeline::filter::Filter;
use serde_json::Value;

/// Path-tracking error accumulator for one top-level `apply` call.
///
/// The context is created by [`FilterRunner`](crate::FilterRunner) (or by a
/// test harness), handed to the root filter as `&mut`, and threaded through
/// every nested application. It carries the current position within the
/// input — structural combinators push a segment before descending into a
/// sub-value and pop it afterwards — so a filter recording an error does
/// not need to know where it sits in the larger structure.
///
/// Errors are data: recording one never interrupts control flow. Callers
/// that need to react to a delegated call's failures compare checkpoints or
/// use the flag returned by [`ApplyContext::apply`].
#[derive(Debug, Default)]
pub struct ApplyContext {
    path: ContextPath,
    errors: Vec<FilterError>,
}

/// Marker for a point in the error stream.
#[derive(Debug, Clone, Copy)]
pub struct Checkpoint(usize);

impl ApplyContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// The path of the sub-value currently being filtered.
    pub fn path(&self) -> &ContextPath {
        &self.path
    }

    /// Every error recorded so far, in application order.
    pub fn errors(&self) -> &[FilterError] {
        &self.errors
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint(self.errors.len())
    }

    /// Whether any error has been recorded since `mark` was taken.
    pub fn tainted_since(&self, mark: Checkpoint) -> bool {
        self.errors.len() > mark.0
    }

    /// Records a validation failure at the current path.
    pub fn reject(&mut self, code: ErrorCode, message: impl Into<String>) {
        let context = self.path.clone();
        self.errors.push(FilterError::new(code, message, context));
    }

    /// Records a validation failure one segment below the current path.
    ///
    /// Used by structural combinators for failures that belong to a child
    /// position they are not going to descend into (missing keys,
    /// unexpected keys).
    pub fn reject_at(
        &mut self,
        segment: impl Into<PathSegment>,
        code: ErrorCode,
        message: impl Into<String>,
    ) {
        let context = self.path.child(segment);
        self.errors.push(FilterError::new(code, message, context));
    }

    /// Applies a sub-filter in the caller's own context.
    ///
    /// This is the delegation primitive for filters that internally run
    /// another filter on a derived value: the sub-filter's errors merge
    /// into this context at the caller's path. The returned flag is `true`
    /// when the call recorded no errors; delegation never interrupts
    /// control flow, so the caller must inspect the flag before relying on
    /// the returned value.
    pub fn apply(&mut self, filter: &dyn Filter, value: Option<Value>) -> (Option<Value>, bool) {
        let mark = self.checkpoint();
        let filtered = filter.apply(value, self);
        let clean = !self.tainted_since(mark);
        (filtered, clean)
    }

    /// Applies a sub-filter one path segment deeper.
    ///
    /// Used by the structural combinators to descend into a keyed or
    /// indexed sub-value; errors the sub-filter records are qualified with
    /// the child path automatically.
    pub fn apply_at(
        &mut self,
        segment: impl Into<PathSegment>,
        filter: &dyn Filter,
        value: Option<Value>,
    ) -> (Option<Value>, bool) {
        self.path.push(segment.into());
        let result = self.apply(filter, value);
        self.path.pop();
        result
    }

    pub(crate) fn into_errors(self) -> Vec<FilterError> {
        self.errors
    }
}
