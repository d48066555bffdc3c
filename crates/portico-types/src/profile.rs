//! Responder profile for Portico.
//!
//! `ResponderProfile` is the widget's canned copy and tuning knobs: the
//! seeded greeting, the ordered keyword rule table, the two fallback replies,
//! and the artificial reply delay. Loaded from `profile.toml`; every field
//! has a default carrying the original portfolio site's copy, so an empty
//! file (or no file at all) yields a fully working widget.

use serde::{Deserialize, Serialize};

use crate::error::ProfileError;

/// One entry in the ordered reply rule table.
///
/// A rule matches when the lower-cased user input contains any of its
/// keywords as a substring. Table order is a contract: the first matching
/// rule wins and later rules are never consulted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplyRule {
    /// Keyword group; any substring hit selects this rule.
    pub keywords: Vec<String>,
    /// Canned reply returned when this rule matches.
    pub reply: String,
}

impl ReplyRule {
    pub fn new<K, S>(keywords: K, reply: impl Into<String>) -> Self
    where
        K: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            keywords: keywords.into_iter().map(Into::into).collect(),
            reply: reply.into(),
        }
    }
}

/// Canned copy and tuning for one widget deployment.
///
/// Loaded from `~/.portico/profile.toml` (or a path given explicitly).
/// All fields have defaults, so partial files are fine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponderProfile {
    /// Widget header title.
    #[serde(default = "default_title")]
    pub title: String,

    /// Artificial delay before an accepted reply is appended, in ms.
    ///
    /// Presentation only -- the session's serialization guarantees hold for
    /// any value, including zero.
    #[serde(default = "default_reply_delay_ms")]
    pub reply_delay_ms: u64,

    /// Assistant greeting seeded as the first transcript entry.
    #[serde(default = "default_greeting")]
    pub greeting: String,

    /// Reply returned when no rule matches.
    #[serde(default = "default_fallback_reply")]
    pub fallback_reply: String,

    /// Reply substituted when reply computation fails.
    #[serde(default = "default_error_reply")]
    pub error_reply: String,

    /// Ordered keyword rule table; first match wins.
    #[serde(default = "default_rules")]
    pub rules: Vec<ReplyRule>,
}

fn default_title() -> String {
    "Chat with Me".to_string()
}

fn default_reply_delay_ms() -> u64 {
    500
}

fn default_greeting() -> String {
    "Hello! I'm here to answer any questions about my work, experience, or \
     projects. What would you like to know?"
        .to_string()
}

fn default_fallback_reply() -> String {
    "Thanks for your message! I'm here to answer questions about my work, \
     skills, and experience. You can also use the contact form to reach out \
     to me directly."
        .to_string()
}

fn default_error_reply() -> String {
    "Thanks for your message! Please feel free to use the contact form to \
     reach out to me directly."
        .to_string()
}

fn default_rules() -> Vec<ReplyRule> {
    vec![
        ReplyRule::new(
            ["hello", "hi", "hey"],
            "Hello! Thanks for visiting my portfolio. I'm excited to connect \
             with you!",
        ),
        ReplyRule::new(
            ["skill", "experience", "tech"],
            "I specialize in modern web development with React, TypeScript, \
             and Node.js. I'm passionate about creating user-friendly \
             applications and have experience with full-stack development.",
        ),
        ReplyRule::new(
            ["project", "work", "portfolio"],
            "I've worked on various projects ranging from e-commerce \
             platforms to productivity apps. Each project showcases different \
             aspects of my development skills. Feel free to check out the \
             Projects section to see my work!",
        ),
        ReplyRule::new(
            ["contact", "hire", "available"],
            "I'm currently open to new opportunities! You can reach me \
             through the contact form on this page, or connect with me on \
             LinkedIn. I'd love to discuss how we can work together.",
        ),
        ReplyRule::new(
            ["about", "who", "background"],
            "I'm a passionate developer who loves creating innovative \
             solutions. I enjoy working with modern technologies and am \
             always eager to learn new skills. Check out the About section \
             to learn more about my journey!",
        ),
    ]
}

impl Default for ResponderProfile {
    fn default() -> Self {
        Self {
            title: default_title(),
            reply_delay_ms: default_reply_delay_ms(),
            greeting: default_greeting(),
            fallback_reply: default_fallback_reply(),
            error_reply: default_error_reply(),
            rules: default_rules(),
        }
    }
}

impl ResponderProfile {
    /// Check the profile for copy that would leave the widget unusable.
    ///
    /// Rejects empty greeting/fallback/error copy, an empty rule table, and
    /// rules with no keywords, blank keywords, or an empty reply.
    pub fn validate(&self) -> Result<(), ProfileError> {
        if self.greeting.trim().is_empty() {
            return Err(ProfileError::Invalid("greeting is empty".to_string()));
        }
        if self.fallback_reply.trim().is_empty() {
            return Err(ProfileError::Invalid("fallback_reply is empty".to_string()));
        }
        if self.error_reply.trim().is_empty() {
            return Err(ProfileError::Invalid("error_reply is empty".to_string()));
        }
        if self.rules.is_empty() {
            return Err(ProfileError::Invalid("rule table is empty".to_string()));
        }

        for (idx, rule) in self.rules.iter().enumerate() {
            if rule.keywords.is_empty() {
                return Err(ProfileError::Invalid(format!(
                    "rule {idx} has no keywords"
                )));
            }
            if rule.keywords.iter().any(|k| k.trim().is_empty()) {
                return Err(ProfileError::Invalid(format!(
                    "rule {idx} has a blank keyword"
                )));
            }
            if rule.reply.trim().is_empty() {
                return Err(ProfileError::Invalid(format!(
                    "rule {idx} has an empty reply"
                )));
            }
        }

        Ok(())
    }
}
