//! Uniform filtering of sequence and mapping elements
//!
//! Copyright (c) 2025 Strainer Team
//! Licensed under the Apache-2.0 license

use crate::error::ErrorCode;
use crate::filters::ExpectType;
use crate::path::PathSegment;
use crate::pipeline::context::ApplyContext;
use crate::pipeline::filter::{Filter, FilterRef};
use crate::types::ValueKind;
use serde_json::{Map, Value};
use std::collections::BTreeSet;
use std::sync::Arc;

/// Applies one filter chain to every element of a sequence-shaped value or
/// every value of a mapping-shaped value.
///
/// Keys and positions are preserved. An element whose chain fails is
/// replaced by `null` in the output, and the failure is recorded under the
/// element's index or key — a single bad element makes the whole result
/// invalid without losing the other elements' cleaned values.
#[derive(Debug, Clone)]
pub struct FilterRepeater {
    chain: FilterRef,
    restrict_keys: Option<BTreeSet<PathSegment>>,
    shape: ExpectType,
}

impl FilterRepeater {
    pub fn new(filter: impl Filter + 'static) -> Self {
        Self {
            chain: Arc::new(filter),
            restrict_keys: None,
            shape: ExpectType::any_of([ValueKind::Sequence, ValueKind::Mapping]),
        }
    }

    /// Restricts which keys/indices are permitted; any other position is
    /// treated as an invalid value.
    ///
    /// An empty restriction set rejects every position.
    pub fn restrict_keys<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<PathSegment>,
    {
        self.restrict_keys = Some(keys.into_iter().map(Into::into).collect());
        self
    }

    fn position_allowed(&self, segment: &PathSegment) -> bool {
        self.restrict_keys
            .as_ref()
            .map_or(true, |keys| keys.contains(segment))
    }

    fn filter_sequence(&self, items: Vec<Value>, ctx: &mut ApplyContext) -> Vec<Value> {
        let mut cleaned = Vec::with_capacity(items.len());

        for (index, item) in items.into_iter().enumerate() {
            let segment = PathSegment::Index(index);
            if self.position_allowed(&segment) {
                let (filtered, _) = ctx.apply_at(segment, self.chain.as_ref(), Some(item));
                cleaned.push(filtered.unwrap_or(Value::Null));
            } else {
                // A sequence has no notion of a "missing" position, so the
                // rejected slot is null-filled to keep positions aligned.
                ctx.reject_at(
                    segment,
                    ErrorCode::KeyNotAllowed,
                    format!("Unexpected index {}.", index),
                );
                cleaned.push(Value::Null);
            }
        }

        cleaned
    }

    fn filter_mapping(&self, entries: Map<String, Value>, ctx: &mut ApplyContext) -> Map<String, Value> {
        let mut cleaned = Map::new();

        for (key, item) in entries {
            let segment = PathSegment::Key(key.clone());
            if self.position_allowed(&segment) {
                let (filtered, _) = ctx.apply_at(segment, self.chain.as_ref(), Some(item));
                cleaned.insert(key, filtered.unwrap_or(Value::Null));
            } else {
                // Rejected keys are omitted from the output, consistent
                // with FilterMapper's handling of unexpected keys.
                ctx.reject_at(
                    segment,
                    ErrorCode::KeyNotAllowed,
                    format!("Unexpected key \"{}\".", key),
                );
            }
        }

        cleaned
    }
}

impl Filter for FilterRepeater {
    fn apply_value(&self, value: Value, ctx: &mut ApplyContext) -> Option<Value> {
        let (value, clean) = ctx.apply(&self.shape, Some(value));
        if !clean {
            return None;
        }

        match value {
            Some(Value::Array(items)) => Some(Value::Array(self.filter_sequence(items, ctx))),
            Some(Value::Object(entries)) => Some(Value::Object(self.filter_mapping(entries, ctx))),
            _ => None,
        }
    }
}
