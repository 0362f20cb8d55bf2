//! Top-level orchestration of a filter run
//!
//! Copyright (c) 2025 Strainer Team
//! Licensed under the Apache-2.0 license

use crate::error::{ErrorCode, FilterError};
use crate::pipeline::context::ApplyContext;
use crate::pipeline::filter::{Filter, FilterRef};
use serde_json::Value;
use std::cell::OnceCell;
use std::collections::BTreeMap;
use std::sync::Arc;

/// One-shot wrapper that applies a root filter to an input value and holds
/// the collected outcome: overall validity, the cleaned (possibly partial)
/// output, and every recorded error keyed by context path.
///
/// The run is memoized: the filter executes at most once per runner
/// instance, on the first accessor call. A runner is a single-use result
/// cache — it is not `Sync` (the memoization write is unsynchronized) and
/// does not expect its input to change; filters themselves remain freely
/// shareable.
#[derive(Debug)]
pub struct FilterRunner {
    filter: FilterRef,
    input: Option<Value>,
    outcome: OnceCell<RunOutcome>,
}

#[derive(Debug)]
struct RunOutcome {
    cleaned: Option<Value>,
    messages: Vec<FilterError>,
}

impl FilterRunner {
    /// Creates a runner for `filter` over `input`.
    ///
    /// `input` accepts a plain [`Value`] as well as `Option<Value>`, so the
    /// absent sentinel can be fed through the same entry point.
    pub fn new(filter: impl Filter + 'static, input: impl Into<Option<Value>>) -> Self {
        Self {
            filter: Arc::new(filter),
            input: input.into(),
            outcome: OnceCell::new(),
        }
    }

    fn outcome(&self) -> &RunOutcome {
        self.outcome.get_or_init(|| {
            let mut ctx = ApplyContext::new();
            let cleaned = self.filter.apply(self.input.clone(), &mut ctx);
            let messages = ctx.into_errors();

            if !messages.is_empty() {
                log::debug!("filter run rejected input with {} error(s)", messages.len());
            }

            RunOutcome { cleaned, messages }
        })
    }

    /// Whether the input passed the filter.
    pub fn is_valid(&self) -> bool {
        self.outcome().messages.is_empty()
    }

    /// The transformed value: complete when valid, best-effort partial
    /// (invalid leaves replaced by `null`) when not, `None` when the
    /// result is the absent sentinel.
    pub fn cleaned_data(&self) -> Option<&Value> {
        self.outcome().cleaned.as_ref()
    }

    /// Every recorded error, in application order.
    pub fn messages(&self) -> &[FilterError] {
        &self.outcome().messages
    }

    /// Errors grouped by rendered context path (`""` is the root),
    /// preserving per-path order — the shape of e.g. a 400 Bad Request
    /// response payload.
    pub fn errors(&self) -> BTreeMap<String, Vec<FilterError>> {
        let mut grouped: BTreeMap<String, Vec<FilterError>> = BTreeMap::new();
        for error in self.messages() {
            grouped
                .entry(error.context.to_string())
                .or_default()
                .push(error.clone());
        }
        grouped
    }

    /// Error codes grouped by rendered context path.
    pub fn error_codes(&self) -> BTreeMap<String, Vec<ErrorCode>> {
        let mut grouped: BTreeMap<String, Vec<ErrorCode>> = BTreeMap::new();
        for error in self.messages() {
            grouped
                .entry(error.context.to_string())
                .or_default()
                .push(error.code.clone());
        }
        grouped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::{Int, Min};
    use crate::pipeline::chain::FilterChain;
    use crate::pipeline::mapper::FilterMapper;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Debug)]
    struct Counting {
        calls: Arc<AtomicUsize>,
    }

    impl Filter for Counting {
        fn apply_value(&self, value: Value, _ctx: &mut ApplyContext) -> Option<Value> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Some(value)
        }
    }

    #[test]
    fn test_valid_run() {
        let runner = FilterRunner::new(FilterChain::of(Int).then(Min::new(0)), json!("42"));

        assert!(runner.is_valid());
        assert_eq!(runner.cleaned_data(), Some(&json!(42)));
        assert!(runner.errors().is_empty());
    }

    #[test]
    fn test_invalid_run_reports_root_path() {
        let runner = FilterRunner::new(Int, json!("bad"));

        assert!(!runner.is_valid());
        assert_eq!(runner.cleaned_data(), None);

        let errors = runner.errors();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[""].len(), 1);
        assert_eq!(errors[""][0].code, ErrorCode::FormatInvalid);
    }

    #[test]
    fn test_error_codes_by_path() {
        let mapper = FilterMapper::new().field("a", Int).field("b", Int);
        let runner = FilterRunner::new(mapper, json!({"a": "1", "b": "x"}));

        let codes = runner.error_codes();
        assert_eq!(codes["b"], vec![ErrorCode::FormatInvalid]);
        assert!(!codes.contains_key("a"));
    }

    #[test]
    fn test_accessors_do_not_rerun_the_filter() {
        let calls = Arc::new(AtomicUsize::new(0));
        let runner = FilterRunner::new(Counting { calls: calls.clone() }, json!(1));

        assert!(runner.is_valid());
        let first = runner.cleaned_data().cloned();
        assert!(runner.is_valid());
        assert_eq!(runner.cleaned_data().cloned(), first);
        runner.errors();

        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_absent_input() {
        let runner = FilterRunner::new(Int, None);

        assert!(runner.is_valid());
        assert_eq!(runner.cleaned_data(), None);
    }
}
