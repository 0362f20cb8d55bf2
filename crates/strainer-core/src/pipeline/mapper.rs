//! Per-key filtering of mapping-shaped values
//!
//! Copyright (c) 2025 Strainer Team
//! Licensed under the Apache-2.0 license

use crate::error::ErrorCode;
use crate::filters::ExpectType;
use crate::pipeline::context::ApplyContext;
use crate::pipeline::filter::{Filter, FilterRef};
use crate::types::ValueKind;
use serde_json::{Map, Value};
use std::collections::BTreeSet;
use std::sync::Arc;

/// Policy for keys outside the per-key assignment's happy path.
///
/// Governs both missing assigned keys and unassigned extra keys on
/// [`FilterMapper`].
#[derive(Debug, Clone, Default)]
pub enum KeyPolicy {
    /// Every key is permitted.
    #[default]
    Allow,
    /// No key is permitted.
    Deny,
    /// Only the listed keys are permitted.
    Only(BTreeSet<String>),
}

impl KeyPolicy {
    pub fn only<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        KeyPolicy::Only(keys.into_iter().map(Into::into).collect())
    }

    pub fn allows(&self, key: &str) -> bool {
        match self {
            KeyPolicy::Allow => true,
            KeyPolicy::Deny => false,
            KeyPolicy::Only(keys) => keys.contains(key),
        }
    }
}

/// Applies a distinct filter chain to each key of a mapping-shaped value.
///
/// The output mapping always contains every assigned key — holding the
/// cleaned value, or `null` where the key's chain failed or the key was
/// missing — plus any pass-through extra keys the policy permits. Callers
/// therefore always get a best-effort partial result to inspect, even when
/// the whole input is invalid.
///
/// Field order is the order of first assignment. Extra keys are processed
/// in sorted order, after every assigned key.
#[derive(Debug, Clone)]
pub struct FilterMapper {
    fields: Vec<(String, FilterRef)>,
    missing_keys: KeyPolicy,
    extra_keys: KeyPolicy,
    shape: ExpectType,
}

impl FilterMapper {
    pub fn new() -> Self {
        Self {
            fields: Vec::new(),
            missing_keys: KeyPolicy::Allow,
            extra_keys: KeyPolicy::Allow,
            shape: ExpectType::new(ValueKind::Mapping),
        }
    }

    /// Assigns `filter` to `key`. Reassigning a key replaces its chain.
    ///
    /// A key that only needs to exist, without further filtering, gets a
    /// [`NoOp`](crate::filters::NoOp) assignment.
    pub fn field(mut self, key: impl Into<String>, filter: impl Filter + 'static) -> Self {
        let key = key.into();
        let filter: FilterRef = Arc::new(filter);
        if let Some(slot) = self.fields.iter_mut().find(|(existing, _)| *existing == key) {
            slot.1 = filter;
        } else {
            self.fields.push((key, filter));
        }
        self
    }

    /// How assigned keys absent from the input are handled.
    ///
    /// - `Allow` (default): the key's chain runs on the absent sentinel.
    /// - `Deny`: the missing key is an error.
    /// - `Only(keys)`: only the listed keys may be omitted.
    pub fn missing_keys(mut self, policy: KeyPolicy) -> Self {
        self.missing_keys = policy;
        self
    }

    /// How input keys outside the assignment are handled.
    ///
    /// - `Allow` (default): extras pass through to the output unchanged.
    /// - `Deny`: extras are errors and are dropped from the output.
    /// - `Only(keys)`: only the listed extras pass through.
    pub fn extra_keys(mut self, policy: KeyPolicy) -> Self {
        self.extra_keys = policy;
        self
    }
}

impl Default for FilterMapper {
    fn default() -> Self {
        Self::new()
    }
}

impl Filter for FilterMapper {
    fn apply_value(&self, value: Value, ctx: &mut ApplyContext) -> Option<Value> {
        let (value, clean) = ctx.apply(&self.shape, Some(value));
        if !clean {
            return None;
        }

        let mut incoming = match value {
            Some(Value::Object(entries)) => entries,
            _ => return None,
        };

        let mut cleaned = Map::new();

        // Assigned keys first, in assignment order.
        for (key, chain) in &self.fields {
            if let Some(item) = incoming.remove(key.as_str()) {
                let (filtered, _) = ctx.apply_at(key.as_str(), chain.as_ref(), Some(item));
                cleaned.insert(key.clone(), filtered.unwrap_or(Value::Null));
            } else if self.missing_keys.allows(key) {
                // Filter the missing value as if it had been absent.
                let (filtered, _) = ctx.apply_at(key.as_str(), chain.as_ref(), None);
                cleaned.insert(key.clone(), filtered.unwrap_or(Value::Null));
            } else {
                ctx.reject_at(
                    key.as_str(),
                    ErrorCode::KeyMissing,
                    format!("{} is required.", key),
                );
                cleaned.insert(key.clone(), Value::Null);
            }
        }

        // Extra keys go last. Rejected extras are not included in the
        // output.
        for (key, item) in incoming {
            if self.extra_keys.allows(&key) {
                cleaned.insert(key, item);
            } else {
                ctx.reject_at(
                    key.clone(),
                    ErrorCode::KeyNotAllowed,
                    format!("Unexpected key \"{}\".", key),
                );
            }
        }

        Some(Value::Object(cleaned))
    }
}
