//! Hook registry
//!
//! Maps hook names to callbacks ordered by priority. Filters thread a value
//! through every callback; actions run callbacks for their side effects.
//!
//! The registry is built mutably during initialization and then shared
//! behind an `Arc`, which makes it read-only for the rest of the process.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::names::DEFAULT_PRIORITY;
use super::value::HookValue;

#[derive(Debug, Error)]
pub enum HookError {
    #[error("Callback '{callback}' on hook '{hook}' failed: {source}")]
    Callback {
        hook: String,
        callback: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("Hook '{hook}' produced a {found} value where a {expected} was expected")]
    UnexpectedValue {
        hook: String,
        expected: &'static str,
        found: String,
    },
}

/// Callback signature: the chained value plus the extra arguments, already
/// truncated or padded to the callback's declared argument count
pub type HookFn = dyn Fn(HookValue, &[HookValue]) -> anyhow::Result<HookValue> + Send + Sync;

/// What to do when a callback returns an error
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// Log the failure and continue with the incoming value
    #[default]
    Skip,
    /// Abort the chain and return the error
    Propagate,
}

impl FailurePolicy {
    pub fn as_str(&self) -> &str {
        match self {
            FailurePolicy::Skip => "skip",
            FailurePolicy::Propagate => "propagate",
        }
    }
}

/// A callback attached to a hook
#[derive(Clone)]
pub struct Registration {
    /// Name used to list and remove the callback
    pub name: String,

    /// Lower runs first
    pub priority: i32,

    /// Number of arguments the callback accepts, the chained value included
    pub arg_count: usize,

    callback: Arc<HookFn>,
}

impl Registration {
    /// Fits the caller's extra arguments to `arg_count - 1` entries
    fn arguments(&self, extra: &[HookValue]) -> Vec<HookValue> {
        let wanted = self.arg_count.saturating_sub(1);
        let mut args: Vec<HookValue> = extra.iter().take(wanted).cloned().collect();
        args.resize(wanted, HookValue::Null);
        args
    }
}

impl fmt::Debug for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registration")
            .field("name", &self.name)
            .field("priority", &self.priority)
            .field("arg_count", &self.arg_count)
            .finish()
    }
}

/// Registry of filter and action callbacks
#[derive(Default)]
pub struct HookRegistry {
    hooks: HashMap<String, Vec<Registration>>,
    policy: FailurePolicy,
}

impl HookRegistry {
    /// Creates an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_policy(mut self, policy: FailurePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> FailurePolicy {
        self.policy
    }

    /// Attaches a callback to a hook
    ///
    /// Callbacks with equal priority run in registration order.
    pub fn register<F>(
        &mut self,
        hook: &str,
        priority: i32,
        arg_count: usize,
        name: impl Into<String>,
        callback: F,
    ) where
        F: Fn(HookValue, &[HookValue]) -> anyhow::Result<HookValue> + Send + Sync + 'static,
    {
        let entries = self.hooks.entry(hook.to_string()).or_default();
        entries.push(Registration {
            name: name.into(),
            priority,
            arg_count,
            callback: Arc::new(callback),
        });
        // sort_by_key is stable, so equal priorities keep insertion order
        entries.sort_by_key(|entry| entry.priority);
    }

    /// Attaches a single-argument callback at the default priority
    pub fn add_filter<F>(&mut self, hook: &str, name: impl Into<String>, callback: F)
    where
        F: Fn(HookValue, &[HookValue]) -> anyhow::Result<HookValue> + Send + Sync + 'static,
    {
        self.register(hook, DEFAULT_PRIORITY, 1, name, callback);
    }

    /// Detaches a callback; returns true if one was removed
    pub fn remove_filter(&mut self, hook: &str, name: &str, priority: i32) -> bool {
        let Some(entries) = self.hooks.get_mut(hook) else {
            return false;
        };

        let before = entries.len();
        entries.retain(|entry| !(entry.name == name && entry.priority == priority));
        let removed = entries.len() != before;

        if entries.is_empty() {
            self.hooks.remove(hook);
        }

        removed
    }

    /// Returns true if any callback is attached to the hook
    pub fn has_hook(&self, hook: &str) -> bool {
        self.hooks.get(hook).is_some_and(|entries| !entries.is_empty())
    }

    /// Callbacks attached to a hook, in execution order
    pub fn registrations(&self, hook: &str) -> &[Registration] {
        self.hooks.get(hook).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Names of all hooks with at least one callback, sorted
    pub fn hook_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.hooks.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Runs a filter chain and returns the final value
    ///
    /// With no callbacks attached the seeded value comes back unchanged.
    pub fn apply_filters(
        &self,
        hook: &str,
        value: HookValue,
        extra: &[HookValue],
    ) -> Result<HookValue, HookError> {
        let mut value = value;

        for entry in self.registrations(hook) {
            let args = entry.arguments(extra);
            match (entry.callback)(value.clone(), &args) {
                Ok(next) => value = next,
                Err(source) => self.handle_failure(hook, entry, source)?,
            }
        }

        Ok(value)
    }

    /// Runs every callback of an action, discarding return values
    pub fn do_action(&self, hook: &str, args: &[HookValue]) -> Result<(), HookError> {
        let (first, rest) = match args.split_first() {
            Some((first, rest)) => (first.clone(), rest),
            None => (HookValue::Null, args),
        };

        for entry in self.registrations(hook) {
            let extra = entry.arguments(rest);
            let value = if entry.arg_count == 0 {
                HookValue::Null
            } else {
                first.clone()
            };

            if let Err(source) = (entry.callback)(value, &extra) {
                self.handle_failure(hook, entry, source)?;
            }
        }

        Ok(())
    }

    fn handle_failure(
        &self,
        hook: &str,
        entry: &Registration,
        source: anyhow::Error,
    ) -> Result<(), HookError> {
        match self.policy {
            FailurePolicy::Skip => {
                tracing::warn!(
                    hook = hook,
                    callback = %entry.name,
                    error = %source,
                    "hook callback failed, keeping incoming value"
                );
                Ok(())
            }
            FailurePolicy::Propagate => Err(HookError::Callback {
                hook: hook.to_string(),
                callback: entry.name.clone(),
                source,
            }),
        }
    }
}

impl fmt::Debug for HookRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HookRegistry")
            .field("hooks", &self.hooks)
            .field("policy", &self.policy)
            .finish()
    }
}
