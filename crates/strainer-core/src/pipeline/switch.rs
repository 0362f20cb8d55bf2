//! Discriminant-based dispatch between filter chains
//!
//! Copyright (c) 2025 Strainer Team
//! Licensed under the Apache-2.0 license

use crate::error::ErrorCode;
use crate::pipeline::context::ApplyContext;
use crate::pipeline::filter::{Filter, FilterRef};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Extracts the discriminant a [`FilterSwitch`] dispatches on.
///
/// The getter only selects a chain; it never transforms the value, and it
/// runs exactly once per apply. Returning `None` means no discriminant
/// could be extracted, which routes to the fallback chain when one is
/// configured.
pub type DiscriminantGetter = dyn Fn(&Value) -> Option<String> + Send + Sync;

/// Chooses the filter chain to apply based on a computed discriminant.
///
/// The selected chain is applied to the *whole* input value, not to the
/// discriminant. With no matching case and no fallback, the value is
/// invalid with a `no_matching_case` error.
pub struct FilterSwitch {
    getter: Arc<DiscriminantGetter>,
    cases: Vec<(String, FilterRef)>,
    fallback: Option<FilterRef>,
}

impl FilterSwitch {
    /// Creates a switch with an explicit discriminant getter.
    pub fn new(getter: impl Fn(&Value) -> Option<String> + Send + Sync + 'static) -> Self {
        Self {
            getter: Arc::new(getter),
            cases: Vec::new(),
            fallback: None,
        }
    }

    /// A switch dispatching on a top-level string field of the input.
    pub fn by_key(key: impl Into<String>) -> Self {
        let key = key.into();
        Self::new(move |value| value.get(&key).and_then(Value::as_str).map(str::to_owned))
    }

    /// Registers the chain for one discriminant value. Re-registering a
    /// case replaces its chain.
    pub fn case(mut self, key: impl Into<String>, filter: impl Filter + 'static) -> Self {
        self.insert_case(key.into(), Arc::new(filter));
        self
    }

    /// Bulk case registration, e.g. from an externally assembled
    /// name-to-chain lookup table.
    pub fn cases<I, S>(mut self, table: I) -> Self
    where
        I: IntoIterator<Item = (S, FilterRef)>,
        S: Into<String>,
    {
        for (key, filter) in table {
            self.insert_case(key.into(), filter);
        }
        self
    }

    /// The chain applied when no case matches.
    pub fn fallback(mut self, filter: impl Filter + 'static) -> Self {
        self.fallback = Some(Arc::new(filter));
        self
    }

    fn insert_case(&mut self, key: String, filter: FilterRef) {
        if let Some(slot) = self.cases.iter_mut().find(|(existing, _)| *existing == key) {
            slot.1 = filter;
        } else {
            self.cases.push((key, filter));
        }
    }

    fn case_names(&self) -> String {
        let mut names: Vec<&str> = self.cases.iter().map(|(key, _)| key.as_str()).collect();
        names.sort_unstable();
        names.join(", ")
    }
}

impl fmt::Debug for FilterSwitch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilterSwitch")
            .field("cases", &self.cases.iter().map(|(key, _)| key).collect::<Vec<_>>())
            .field("fallback", &self.fallback.is_some())
            .finish_non_exhaustive()
    }
}

impl Filter for FilterSwitch {
    fn apply_value(&self, value: Value, ctx: &mut ApplyContext) -> Option<Value> {
        // The getter runs exactly once per apply.
        let discriminant = (self.getter)(&value);

        if let Some(key) = discriminant.as_deref() {
            if let Some((_, chain)) = self.cases.iter().find(|(case, _)| case == key) {
                let (filtered, _) = ctx.apply(chain.as_ref(), Some(value));
                return filtered;
            }
        }

        if let Some(chain) = &self.fallback {
            let (filtered, _) = ctx.apply(chain.as_ref(), Some(value));
            return filtered;
        }

        let message = match discriminant {
            Some(key) => format!(
                "\"{}\" does not match any case (valid options are: {}).",
                key,
                self.case_names(),
            ),
            None => format!(
                "No discriminant could be extracted (valid options are: {}).",
                self.case_names(),
            ),
        };
        ctx.reject(ErrorCode::NoMatchingCase, message);
        None
    }
}
