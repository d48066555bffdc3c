//! Keyword-table reply selection.
//!
//! The production responder: a deterministic, ordered table of keyword
//! groups, each mapping to one canned reply. No parsing, no scoring, no
//! network -- a substring scan decides everything.

use portico_types::error::ResponderError;
use portico_types::profile::{ReplyRule, ResponderProfile};

use super::Responder;

/// Deterministic keyword-table responder.
///
/// Matching is a case-insensitive substring check against an ordered rule
/// table: the input is lower-cased once, rules are scanned top to bottom,
/// and the first rule with any keyword hit wins. Inputs matching no rule get
/// the fallback reply.
///
/// Table order is a copy contract, not an implementation detail: an input
/// containing both "hi" and "project" greets, because the greeting rule
/// precedes the projects rule. Substring matching is equally deliberate --
/// "think" contains "hi" and greets.
#[derive(Debug, Clone)]
pub struct RuleResponder {
    /// Ordered table; keywords are pre-lowercased by the constructor.
    rules: Vec<ReplyRule>,
    fallback_reply: String,
}

impl RuleResponder {
    /// Build a responder from an ordered rule table and a fallback reply.
    ///
    /// Keywords are lower-cased here once so `respond` only lower-cases the
    /// input.
    pub fn new(rules: Vec<ReplyRule>, fallback_reply: impl Into<String>) -> Self {
        let rules = rules
            .into_iter()
            .map(|rule| ReplyRule {
                keywords: rule
                    .keywords
                    .into_iter()
                    .map(|keyword| keyword.to_lowercase())
                    .collect(),
                reply: rule.reply,
            })
            .collect();
        Self {
            rules,
            fallback_reply: fallback_reply.into(),
        }
    }

    /// Build a responder from a profile's rule table and fallback copy.
    pub fn from_profile(profile: &ResponderProfile) -> Self {
        Self::new(profile.rules.clone(), profile.fallback_reply.clone())
    }

    /// Select the reply for `input`. First matching rule wins; later rules
    /// are never consulted.
    fn classify(&self, input: &str) -> &str {
        let lower = input.to_lowercase();
        for rule in &self.rules {
            if rule.keywords.iter().any(|keyword| lower.contains(keyword.as_str())) {
                return &rule.reply;
            }
        }
        &self.fallback_reply
    }
}

impl Responder for RuleResponder {
    fn name(&self) -> &str {
        "rules"
    }

    fn respond(&self, input: &str) -> Result<String, ResponderError> {
        Ok(self.classify(input).to_string())
    }
}

impl Default for RuleResponder {
    fn default() -> Self {
        Self::from_profile(&ResponderProfile::default())
    }
}
