//! Substring rules that turn hook input into advisories.
//!
//! A rule fires when any of its triggers is contained in the inspected
//! text. Rules are independent of each other, each fires at most once,
//! and a rule set reports its advisories in declaration order.

use crate::core::advisory::{Advisory, AdvisoryKind};

/// How a rule compares its triggers against the text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Matching {
    /// Exact byte-for-byte containment.
    CaseSensitive,
    /// Containment after lowercasing both sides.
    CaseInsensitive,
}

/// What makes a rule fire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Triggers {
    /// Fires regardless of input, including when there is none.
    Always,
    /// Fires when any listed substring is present.
    AnyOf(&'static [&'static str]),
}

/// A single trigger-to-advisory rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rule {
    pub kind: AdvisoryKind,
    pub triggers: Triggers,
    pub matching: Matching,
    pub headline: &'static str,
    pub hint: Option<&'static str>,
}

impl Rule {
    /// Whether this rule fires for `text`. Absent text only satisfies `Always`.
    pub fn matches(&self, text: Option<&str>) -> bool {
        let needles = match self.triggers {
            Triggers::Always => return true,
            Triggers::AnyOf(needles) => needles,
        };
        let Some(text) = text else {
            return false;
        };

        match self.matching {
            Matching::CaseSensitive => needles.iter().any(|n| text.contains(n)),
            Matching::CaseInsensitive => {
                let haystack = text.to_lowercase();
                needles
                    .iter()
                    .any(|n| haystack.contains(n.to_lowercase().as_str()))
            }
        }
    }

    /// Build the advisory this rule emits.
    pub fn advisory(&self) -> Advisory {
        let advisory = Advisory::new(self.kind, self.headline);
        match self.hint {
            Some(hint) => advisory.with_hint(hint),
            None => advisory,
        }
    }
}

/// An ordered collection of rules evaluated against one text.
#[derive(Debug, Clone, Copy)]
pub struct RuleSet {
    rules: &'static [Rule],
}

impl RuleSet {
    /// Wrap a static rule table.
    pub const fn new(rules: &'static [Rule]) -> Self {
        Self { rules }
    }

    /// Shell command checks for the bash-validate hook.
    pub const fn command_safety() -> Self {
        Self::new(COMMAND_SAFETY)
    }

    /// Free-form prompt checks for the prompt-check hook.
    pub const fn prompt_intent() -> Self {
        Self::new(PROMPT_INTENT)
    }

    /// The fixed notice for the grep-validate hook.
    pub const fn grep_discouragement() -> Self {
        Self::new(GREP_DISCOURAGEMENT)
    }

    /// The welcome banner for the session-start hook.
    pub const fn session_welcome() -> Self {
        Self::new(SESSION_WELCOME)
    }

    /// The rules in declaration order.
    pub fn rules(&self) -> &'static [Rule] {
        self.rules
    }

    /// Evaluate every rule against `text`.
    pub fn evaluate(&self, text: Option<&str>) -> Vec<Advisory> {
        self.rules
            .iter()
            .filter(|rule| rule.matches(text))
            .map(Rule::advisory)
            .collect()
    }
}

const COMMAND_SAFETY: &[Rule] = &[
    Rule {
        kind: AdvisoryKind::SearchTool,
        triggers: Triggers::AnyOf(&["grep ", "glob ", "find "]),
        matching: Matching::CaseSensitive,
        headline: "⚠️  Consider using /toolkit search instead of grep/glob",
        hint: Some("Example: /toolkit search \"your query\""),
    },
    Rule {
        kind: AdvisoryKind::DangerousCommand,
        triggers: Triggers::AnyOf(&["--force", "rm -rf"]),
        matching: Matching::CaseSensitive,
        headline: "⚠️  DANGEROUS COMMAND detected!",
        hint: Some("Please verify this is intended."),
    },
];

const PROMPT_INTENT: &[Rule] = &[
    Rule {
        kind: AdvisoryKind::MemoryRecall,
        triggers: Triggers::AnyOf(&[
            "did we",
            "how did we",
            "remember",
            "previous",
            "last time",
            "before",
        ]),
        matching: Matching::CaseInsensitive,
        headline: "💡 Tip: Use /mem-search to check if we solved this before",
        hint: None,
    },
    Rule {
        kind: AdvisoryKind::BuildIntent,
        triggers: Triggers::AnyOf(&["build", "implement", "create", "refactor", "feature"]),
        matching: Matching::CaseInsensitive,
        headline: "💡 Tip: Consider /studio build for implementation",
        hint: None,
    },
];

const GREP_DISCOURAGEMENT: &[Rule] = &[Rule {
    kind: AdvisoryKind::GrepTool,
    triggers: Triggers::Always,
    matching: Matching::CaseSensitive,
    headline: "⚠️  Consider using /toolkit search instead of Grep tool",
    hint: Some("/toolkit search provides semantic search with better results."),
}];

const WELCOME_BANNER: &str = concat!(
    "✨ SMITE v",
    env!("CARGO_PKG_VERSION"),
    " - Enhanced Configuration\n",
    "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n",
    "\n",
    "🚀 Active Features:\n",
    "  ✓ Agent Teams (parallel execution)\n",
    "  ✓ TrigMem Skills (auto-activation)\n",
    "  ✓ Git Flow Master (versioned commits)\n",
    "  ✓ MCP Integration (claude-mem, chrome-devtools)\n",
    "\n",
    "💡 Quick Commands:\n",
    "  /studio build \"task\"        → Auto-detected implementation\n",
    "  /studio build --scale       → Thorough EPCT workflow\n",
    "  /studio build --team        → Parallel agents\n",
    "  /pattern nextjs             → Load Next.js patterns\n",
    "\n",
    "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━",
);

const SESSION_WELCOME: &[Rule] = &[Rule {
    kind: AdvisoryKind::Welcome,
    triggers: Triggers::Always,
    matching: Matching::CaseSensitive,
    headline: WELCOME_BANNER,
    hint: None,
}];

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(advisories: &[Advisory]) -> Vec<AdvisoryKind> {
        advisories.iter().map(|a| a.kind).collect()
    }

    // Command safety

    #[test]
    fn test_command_safety_dangerous() {
        let advisories = RuleSet::command_safety().evaluate(Some("rm -rf /tmp/x"));
        assert_eq!(kinds(&advisories), vec![AdvisoryKind::DangerousCommand]);
    }

    #[test]
    fn test_command_safety_force_flag() {
        let advisories = RuleSet::command_safety().evaluate(Some("git push --force origin main"));
        assert_eq!(kinds(&advisories), vec![AdvisoryKind::DangerousCommand]);
    }

    #[test]
    fn test_command_safety_both_fire_in_declaration_order() {
        let advisories =
            RuleSet::command_safety().evaluate(Some("find . -name '*.o' | xargs rm -rf"));
        assert_eq!(
            kinds(&advisories),
            vec![AdvisoryKind::SearchTool, AdvisoryKind::DangerousCommand]
        );
    }

    #[test]
    fn test_command_safety_multiple_triggers_fire_once() {
        let advisories = RuleSet::command_safety().evaluate(Some("rm -rf a && rm -rf b --force"));
        assert_eq!(kinds(&advisories), vec![AdvisoryKind::DangerousCommand]);
    }

    #[test]
    fn test_command_safety_is_case_sensitive() {
        let advisories = RuleSet::command_safety().evaluate(Some("RM -RF /tmp && GREP foo"));
        assert!(advisories.is_empty());
    }

    #[test]
    fn test_command_safety_requires_trailing_space() {
        // `grep` with no argument separator is not a search invocation.
        let advisories = RuleSet::command_safety().evaluate(Some("which grep"));
        assert!(advisories.is_empty());
    }

    #[test]
    fn test_command_safety_absent_text() {
        assert!(RuleSet::command_safety().evaluate(None).is_empty());
    }

    #[test]
    fn test_command_safety_harmless_command() {
        assert!(RuleSet::command_safety()
            .evaluate(Some("cargo fmt --check"))
            .is_empty());
    }

    // Prompt intent

    #[test]
    fn test_prompt_intent_memory_recall_case_insensitive() {
        let advisories = RuleSet::prompt_intent().evaluate(Some("How did we fix the LOGIN bug?"));
        assert_eq!(kinds(&advisories), vec![AdvisoryKind::MemoryRecall]);
    }

    #[test]
    fn test_prompt_intent_one_advisory_per_family() {
        let advisories = RuleSet::prompt_intent()
            .evaluate(Some("Remember last time we did this before? Build and implement it"));
        assert_eq!(
            kinds(&advisories),
            vec![AdvisoryKind::MemoryRecall, AdvisoryKind::BuildIntent]
        );
    }

    #[test]
    fn test_prompt_intent_build_only() {
        let advisories = RuleSet::prompt_intent().evaluate(Some("REFACTOR the parser"));
        assert_eq!(kinds(&advisories), vec![AdvisoryKind::BuildIntent]);
    }

    #[test]
    fn test_prompt_intent_no_match() {
        assert!(RuleSet::prompt_intent()
            .evaluate(Some("what time is it"))
            .is_empty());
    }

    // Unconditional rules

    #[test]
    fn test_grep_discouragement_always_fires() {
        for text in [None, Some(""), Some("anything")] {
            let advisories = RuleSet::grep_discouragement().evaluate(text);
            assert_eq!(kinds(&advisories), vec![AdvisoryKind::GrepTool]);
        }
    }

    #[test]
    fn test_session_welcome_carries_version() {
        let advisories = RuleSet::session_welcome().evaluate(None);
        assert_eq!(advisories.len(), 1);
        assert!(advisories[0]
            .headline
            .contains(concat!("SMITE v", env!("CARGO_PKG_VERSION"))));
    }

    #[test]
    fn test_rule_advisory_includes_hint() {
        let rule = RuleSet::command_safety().rules()[1];
        let advisory = rule.advisory();
        assert_eq!(advisory.kind, AdvisoryKind::DangerousCommand);
        assert_eq!(
            advisory.hint.as_deref(),
            Some("Please verify this is intended.")
        );
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            // Property: a destructive flag anywhere yields exactly one dangerous-command advisory
            #[test]
            fn prop_destructive_flag_fires_once(
                prefix in "[a-z ]{0,20}",
                suffix in "[a-z ]{0,20}",
                flag in prop_oneof![Just("--force"), Just("rm -rf")],
            ) {
                let command = format!("{}{}{}", prefix, flag, suffix);
                let advisories = RuleSet::command_safety().evaluate(Some(&command));
                let dangerous = advisories
                    .iter()
                    .filter(|a| a.kind == AdvisoryKind::DangerousCommand)
                    .count();
                prop_assert_eq!(dangerous, 1);
            }

            // Property: digits-only text never triggers command safety
            #[test]
            fn prop_no_trigger_no_advisory(command in "[0-9]{0,40}") {
                prop_assert!(RuleSet::command_safety().evaluate(Some(&command)).is_empty());
            }

            // Property: output order follows declaration order
            #[test]
            fn prop_order_follows_declaration(text in "(find |rm -rf|did we|build| ){0,8}") {
                for set in [RuleSet::command_safety(), RuleSet::prompt_intent()] {
                    let produced = kinds(&set.evaluate(Some(&text)));
                    let expected: Vec<AdvisoryKind> = set
                        .rules()
                        .iter()
                        .filter(|r| r.matches(Some(&text)))
                        .map(|r| r.kind)
                        .collect();
                    prop_assert_eq!(produced, expected);
                }
            }
        }
    }
}
