//! Hook runner for SMITE.
//!
//! This module implements hook dispatch and the individual hook handlers.
//! Handlers never fail: every recovered error shows up in the returned
//! [`HookReport`] instead of propagating.

use chrono::Utc;

use crate::config::Config;
use crate::core::{record_event, Advisory, RuleSet, TaskEvent};
use crate::error::FailOpen;
use crate::hooks::input::{parse_payload, read_stdin, ParsedPayload, PayloadStatus};
use crate::storage::{LoadedState, StateStore};

/// Hook type enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookType {
    /// PreToolUse for Bash: command-safety checks.
    BashValidate,
    /// PreToolUse for Grep: steer toward semantic search.
    GrepValidate,
    /// UserPromptSubmit: prompt-intent tips.
    PromptCheck,
    /// SessionStart: welcome banner.
    SessionStart,
    /// PostToolUse: task progress counter.
    TaskProgress,
}

impl HookType {
    /// Canonical name, as used in config overrides.
    pub fn name(&self) -> &'static str {
        match self {
            Self::BashValidate => "bash-validate",
            Self::GrepValidate => "grep-validate",
            Self::PromptCheck => "prompt-check",
            Self::SessionStart => "session-start",
            Self::TaskProgress => "task-progress",
        }
    }
}

/// What happened to the persisted state during a hook run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateOutcome {
    /// The hook did not touch the state file.
    Untouched,
    /// The record was rewritten.
    Written,
    /// Rewriting the record failed; the failure was logged and swallowed.
    WriteFailed,
}

/// Everything a hook run produced.
#[derive(Debug, Clone, PartialEq)]
pub struct HookReport {
    /// How the input payload was interpreted.
    pub payload: PayloadStatus,
    /// Advisories to show, in order.
    pub advisories: Vec<Advisory>,
    /// Whether prior state was found, if it was read at all.
    pub loaded: Option<LoadedState>,
    /// What happened to the state file.
    pub state: StateOutcome,
}

impl HookReport {
    fn with_advisories(payload: PayloadStatus, advisories: Vec<Advisory>) -> Self {
        Self {
            payload,
            advisories,
            loaded: None,
            state: StateOutcome::Untouched,
        }
    }

    /// A report with nothing in it.
    pub fn empty() -> Self {
        Self::with_advisories(PayloadStatus::Ignored, Vec::new())
    }
}

/// Hook runner context.
pub struct HookRunner<S: StateStore> {
    /// Task-progress state storage.
    store: S,
    /// Configuration.
    config: Config,
}

impl<S: StateStore> HookRunner<S> {
    /// Create a new hook runner.
    pub fn new(store: S, config: Config) -> Self {
        Self { store, config }
    }

    /// Run a hook with input from stdin.
    pub fn run(&self, hook_type: HookType) -> HookReport {
        let input = read_stdin();
        self.run_with_input(hook_type, &input)
    }

    /// Run a hook with provided input.
    pub fn run_with_input(&self, hook_type: HookType, input: &str) -> HookReport {
        if !self.config.is_hook_enabled(hook_type.name()) {
            tracing::debug!(hook = hook_type.name(), "hook disabled by configuration");
            return HookReport::empty();
        }

        let report = match hook_type {
            HookType::BashValidate => self.handle_bash_validate(input),
            HookType::GrepValidate => Self::handle_unconditional(RuleSet::grep_discouragement()),
            HookType::PromptCheck => self.handle_prompt_check(input),
            HookType::SessionStart => Self::handle_unconditional(RuleSet::session_welcome()),
            HookType::TaskProgress => self.handle_task_progress(input),
        };

        tracing::debug!(
            hook = hook_type.name(),
            payload = ?report.payload,
            advisories = report.advisories.len(),
            state = ?report.state,
            "hook finished"
        );

        report
    }

    // =========================================================================
    // Rule-only handlers
    // =========================================================================

    /// Check the Bash command about to run.
    fn handle_bash_validate(&self, input: &str) -> HookReport {
        let parsed = parse_payload(input);
        let command = parsed.payload().and_then(|p| p.command());
        let advisories = RuleSet::command_safety().evaluate(command);
        HookReport::with_advisories(parsed.status(), advisories)
    }

    /// Check the submitted prompt.
    ///
    /// Matches the whole input body. With `hooks.prompt_field_only`, a
    /// structured payload's `prompt` field is matched instead.
    fn handle_prompt_check(&self, input: &str) -> HookReport {
        let parsed = parse_payload(input);
        let text = if self.config.hooks.prompt_field_only {
            parsed.payload().and_then(|p| p.prompt()).unwrap_or(input)
        } else {
            input
        };
        let advisories = RuleSet::prompt_intent().evaluate(Some(text));
        HookReport::with_advisories(parsed.status(), advisories)
    }

    /// Emit a fixed message regardless of input.
    fn handle_unconditional(rules: RuleSet) -> HookReport {
        HookReport::with_advisories(PayloadStatus::Ignored, rules.evaluate(None))
    }

    // =========================================================================
    // Task Progress Handler
    // =========================================================================

    /// Handle the task-progress hook.
    ///
    /// 1. Decode input; on fallback, stop without touching state
    /// 2. Load prior state (missing or malformed means empty)
    /// 3. Apply the task event
    /// 4. Rewrite the full record
    fn handle_task_progress(&self, input: &str) -> HookReport {
        let payload = match parse_payload(input) {
            ParsedPayload::Parsed(payload) => payload,
            ParsedPayload::Fallback => {
                return HookReport::with_advisories(PayloadStatus::Fallback, Vec::new());
            }
        };

        let loaded = self
            .store
            .load()
            .fail_open_with("reading task state", LoadedState::Malformed);

        let event = TaskEvent::from_tool_name(payload.tool_name());
        let transition = record_event(loaded.clone().into_state(), event, Utc::now());

        let state = if transition.recognized || self.config.state.rewrite_on_unrecognized {
            match self.store.save(&transition.state) {
                Ok(()) => StateOutcome::Written,
                Err(e) => {
                    tracing::warn!(
                        location = %self.store.location(),
                        error = %e,
                        "failed to write task state (fail-open)"
                    );
                    StateOutcome::WriteFailed
                }
            }
        } else {
            StateOutcome::Untouched
        };

        HookReport {
            payload: PayloadStatus::Parsed,
            advisories: transition.advisory.into_iter().collect(),
            loaded: Some(loaded),
            state,
        }
    }
}
