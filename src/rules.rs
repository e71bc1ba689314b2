//! Pattern Rules - Ordered Predicate Chains
//!
//! A rule is a predicate over the lower-cased input plus a tag producer.
//! Chains evaluate rules in insertion order. The first match wins.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RuleTest {
    EndsWith,
    Contains,
    StartsWith,
}

/// Serializable view of a rule, used for inspection and fingerprinting
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RuleDescriptor {
    pub name: String,
    pub test: RuleTest,
    pub operand: String,
    pub tag: String,
}

/// Pattern rule trait - a predicate and the tag it produces
///
/// `input` is always already lower-cased by the caller.
pub trait PatternRule: Send + Sync {
    fn name(&self) -> &'static str;
    fn matches(&self, input: &str) -> bool;
    fn produce(&self, input: &str) -> String;
    fn describe(&self) -> RuleDescriptor;
}

// --- Concrete Rules ---

/// Input ends with a literal phrase
#[derive(Debug, Clone, Copy)]
pub struct SuffixRule {
    pub name: &'static str,
    pub suffix: &'static str,
    pub tag: &'static str,
}

impl PatternRule for SuffixRule {
    fn name(&self) -> &'static str {
        self.name
    }

    fn matches(&self, input: &str) -> bool {
        input.ends_with(self.suffix)
    }

    fn produce(&self, _input: &str) -> String {
        self.tag.to_string()
    }

    fn describe(&self) -> RuleDescriptor {
        RuleDescriptor {
            name: self.name.to_string(),
            test: RuleTest::EndsWith,
            operand: self.suffix.to_string(),
            tag: self.tag.to_string(),
        }
    }
}

/// Input contains a literal phrase anywhere
#[derive(Debug, Clone, Copy)]
pub struct ContainsRule {
    pub name: &'static str,
    pub needle: &'static str,
    pub tag: &'static str,
}

impl PatternRule for ContainsRule {
    fn name(&self) -> &'static str {
        self.name
    }

    fn matches(&self, input: &str) -> bool {
        input.contains(self.needle)
    }

    fn produce(&self, _input: &str) -> String {
        self.tag.to_string()
    }

    fn describe(&self) -> RuleDescriptor {
        RuleDescriptor {
            name: self.name.to_string(),
            test: RuleTest::Contains,
            operand: self.needle.to_string(),
            tag: self.tag.to_string(),
        }
    }
}

/// Input starts with `prefix`; the tag is `tag_prefix` followed by the input
/// with the first occurrence of `strip` removed.
///
/// `strip` is removed from the whole input, not from the matched prefix, so
/// `"stage"` alone yields `"stage-stage"` and the remainder keeps its spaces.
#[derive(Debug, Clone, Copy)]
pub struct PrefixRule {
    pub name: &'static str,
    pub prefix: &'static str,
    pub strip: &'static str,
    pub tag_prefix: &'static str,
}

impl PatternRule for PrefixRule {
    fn name(&self) -> &'static str {
        self.name
    }

    fn matches(&self, input: &str) -> bool {
        input.starts_with(self.prefix)
    }

    fn produce(&self, input: &str) -> String {
        format!("{}{}", self.tag_prefix, input.replacen(self.strip, "", 1))
    }

    fn describe(&self) -> RuleDescriptor {
        RuleDescriptor {
            name: self.name.to_string(),
            test: RuleTest::StartsWith,
            operand: self.prefix.to_string(),
            tag: format!("{}*", self.tag_prefix),
        }
    }
}

/// Rarity rule 2, also backing [`crate::classify::needs_reverse_holo`]
pub const REVERSE_HOLO: SuffixRule = SuffixRule {
    name: "reverse_holo",
    suffix: "reverse holo",
    tag: "reverse-holo",
};

/// Rarity rule 3, also backing [`crate::classify::needs_shiny`]
pub const RARE_SHINY: ContainsRule = ContainsRule {
    name: "rare_shiny",
    needle: "rare shiny",
    tag: "shiny",
};

/// Ordered rule chain
#[derive(Default)]
pub struct RuleChain {
    rules: Vec<Box<dyn PatternRule>>,
}

impl RuleChain {
    pub fn new() -> Self {
        Self { rules: vec![] }
    }

    /// Append a rule with lower priority than every rule already present
    pub fn with(mut self, rule: impl PatternRule + 'static) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    /// First matching rule's name and tag
    pub fn apply(&self, input: &str) -> Option<(&'static str, String)> {
        self.rules
            .iter()
            .find(|rule| rule.matches(input))
            .map(|rule| (rule.name(), rule.produce(input)))
    }

    pub fn describe(&self) -> Vec<RuleDescriptor> {
        self.rules.iter().map(|rule| rule.describe()).collect()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// ECMAScript `\s`: Unicode whitespace minus NEL, plus the byte-order mark.
pub fn is_separator(c: char) -> bool {
    (c.is_whitespace() && c != '\u{85}') || c == '\u{feff}'
}

/// Turn every maximal separator run of an already lower-cased input into a
/// single hyphen.
pub fn hyphenate(lower: &str) -> String {
    let mut out = String::with_capacity(lower.len());
    let mut in_run = false;
    for c in lower.chars() {
        if is_separator(c) {
            if !in_run {
                out.push('-');
            }
            in_run = true;
        } else {
            out.push(c);
            in_run = false;
        }
    }
    out
}
