//! Rulebook - Per-Attribute Rule Tables
//!
//! Every string attribute resolves through the same three stages:
//! exact dictionary, pattern chain, fallback normalization.
//! The standard rulebook is built once and shared read-only.

use phf::phf_map;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::LazyLock;

use crate::rules::{
    hyphenate, ContainsRule, PrefixRule, RuleChain, RuleDescriptor, RARE_SHINY, REVERSE_HOLO,
};

/// Attributes in composition order
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum AttributeKind {
    Rarity,
    Subtype,
    Supertype,
    Gallery,
    Set,
    Number,
}

impl AttributeKind {
    pub const ALL: [AttributeKind; 6] = [
        AttributeKind::Rarity,
        AttributeKind::Subtype,
        AttributeKind::Supertype,
        AttributeKind::Gallery,
        AttributeKind::Set,
        AttributeKind::Number,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AttributeKind::Rarity => "rarity",
            AttributeKind::Subtype => "subtype",
            AttributeKind::Supertype => "supertype",
            AttributeKind::Gallery => "gallery",
            AttributeKind::Set => "set",
            AttributeKind::Number => "number",
        }
    }
}

/// What happens when neither the dictionary nor any rule matched
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Fallback {
    /// Lower-case, whitespace runs become `-`
    Hyphenate,
    /// Lower-case only
    Verbatim,
}

impl Fallback {
    pub fn apply(&self, lower: &str) -> String {
        match self {
            Fallback::Hyphenate => hyphenate(lower),
            Fallback::Verbatim => lower.to_string(),
        }
    }
}

/// The stage that produced a tag
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Stage {
    Absent,
    Exact,
    Pattern { rule: String },
    Fallback,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Resolution {
    pub attribute: AttributeKind,
    pub input: Option<String>,
    pub stage: Stage,
    pub tag: String,
}

impl Resolution {
    fn absent(attribute: AttributeKind, input: Option<String>) -> Self {
        Self {
            attribute,
            input,
            stage: Stage::Absent,
            tag: String::new(),
        }
    }
}

type ExactTable = phf::Map<&'static str, &'static str>;

/// Keys are lower-case.
static RARITY_EXACT: ExactTable = phf_map! {
    "rare holo" => "holo",
    "rare holo cosmos" => "holo-cosmos",
    "rare holo v" => "holo-v",
    "rare holo vmax" => "holo-vmax",
    "rare holo vstar" => "holo-vstar",
    "rare ultra" => "ultra",
    "rare secret" => "secret",
    "rare shiny" => "shiny",
    "rare shiny v" => "shiny-v",
    "rare shiny vmax" => "shiny-vmax",
    "rare rainbow" => "rainbow",
    "rare rainbow alt" => "rainbow-alt",
    "amazing rare" => "amazing",
    "radiant rare" => "radiant",
    "trainer gallery rare holo" => "trainer-gallery-holo",
};

static SUBTYPE_EXACT: ExactTable = phf_map! {
    "v-union" => "v-union",
};

static SUPERTYPE_EXACT: ExactTable = phf_map! {
    "pokémon" => "pokemon",
    "pokemon" => "pokemon",
    "trainer" => "trainer",
};

static SET_EXACT: ExactTable = phf_map! {
    "swshp" => "swshp",
};

// "160" is remapped for every set, not only swsh12pt5.
static NUMBER_EXACT: ExactTable = phf_map! {
    "swsh145" => "swsh145",
    "swsh020" => "swsh020",
    "160" => "swsh160",
};

/// One attribute's exact table, pattern chain and fallback
pub struct Classifier {
    kind: AttributeKind,
    exact: &'static ExactTable,
    chain: RuleChain,
    fallback: Fallback,
}

impl Classifier {
    pub fn new(
        kind: AttributeKind,
        exact: &'static ExactTable,
        chain: RuleChain,
        fallback: Fallback,
    ) -> Self {
        Self { kind, exact, chain, fallback }
    }

    pub fn kind(&self) -> AttributeKind {
        self.kind
    }

    /// Resolve one raw value, recording which stage fired
    pub fn resolve(&self, input: Option<&str>) -> Resolution {
        let raw = match input {
            Some(s) if !s.is_empty() => s,
            _ => return Resolution::absent(self.kind, input.map(str::to_string)),
        };
        let lower = raw.to_lowercase();

        let (stage, tag) = if let Some(tag) = self.exact.get(lower.as_str()) {
            (Stage::Exact, tag.to_string())
        } else if let Some((rule, tag)) = self.chain.apply(&lower) {
            (Stage::Pattern { rule: rule.to_string() }, tag)
        } else {
            (Stage::Fallback, self.fallback.apply(&lower))
        };

        tracing::trace!(
            attribute = self.kind.as_str(),
            stage = ?stage,
            tag = %tag,
            "Attribute classified"
        );

        Resolution {
            attribute: self.kind,
            input: Some(raw.to_string()),
            stage,
            tag,
        }
    }

    /// Tag for one raw value; empty when the input is absent or empty
    pub fn classify(&self, input: Option<&str>) -> String {
        self.resolve(input).tag
    }

    pub fn describe(&self) -> ClassifierDescriptor {
        ClassifierDescriptor {
            attribute: self.kind,
            exact: self
                .exact
                .entries()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            rules: self.chain.describe(),
            fallback: self.fallback,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassifierDescriptor {
    pub attribute: AttributeKind,
    pub exact: BTreeMap<String, String>,
    pub rules: Vec<RuleDescriptor>,
    pub fallback: Fallback,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RulebookDescriptor {
    pub base_tag: String,
    pub gallery_tag: String,
    pub attributes: Vec<ClassifierDescriptor>,
}

static STANDARD: LazyLock<Rulebook> = LazyLock::new(Rulebook::build_standard);

/// Complete rule set for one classification engine
pub struct Rulebook {
    base_tag: &'static str,
    gallery_tag: &'static str,
    rarity: Classifier,
    subtype: Classifier,
    supertype: Classifier,
    set: Classifier,
    number: Classifier,
}

impl Rulebook {
    /// Process-wide rulebook
    pub fn standard() -> &'static Rulebook {
        &STANDARD
    }

    fn build_standard() -> Self {
        let rarity = Classifier::new(
            AttributeKind::Rarity,
            &RARITY_EXACT,
            RuleChain::new().with(REVERSE_HOLO).with(RARE_SHINY),
            Fallback::Hyphenate,
        );

        let subtype = Classifier::new(
            AttributeKind::Subtype,
            &SUBTYPE_EXACT,
            RuleChain::new()
                .with(PrefixRule {
                    name: "stage",
                    prefix: "stage",
                    strip: "stage ",
                    tag_prefix: "stage-",
                })
                .with(ContainsRule {
                    name: "supporter",
                    needle: "supporter",
                    tag: "supporter",
                })
                .with(ContainsRule {
                    name: "item",
                    needle: "item",
                    tag: "item",
                }),
            Fallback::Hyphenate,
        );

        let supertype = Classifier::new(
            AttributeKind::Supertype,
            &SUPERTYPE_EXACT,
            RuleChain::new(),
            Fallback::Verbatim,
        );
        let set = Classifier::new(
            AttributeKind::Set,
            &SET_EXACT,
            RuleChain::new(),
            Fallback::Verbatim,
        );
        let number = Classifier::new(
            AttributeKind::Number,
            &NUMBER_EXACT,
            RuleChain::new(),
            Fallback::Verbatim,
        );

        tracing::debug!("Standard rulebook built");

        Self {
            base_tag: "card",
            gallery_tag: "trainer-gallery",
            rarity,
            subtype,
            supertype,
            set,
            number,
        }
    }

    /// Leading tag of every sequence
    pub fn base_tag(&self) -> &'static str {
        self.base_tag
    }

    /// String classifier for an attribute; `None` for the boolean gallery flag
    pub fn classifier(&self, kind: AttributeKind) -> Option<&Classifier> {
        match kind {
            AttributeKind::Rarity => Some(&self.rarity),
            AttributeKind::Subtype => Some(&self.subtype),
            AttributeKind::Supertype => Some(&self.supertype),
            AttributeKind::Gallery => None,
            AttributeKind::Set => Some(&self.set),
            AttributeKind::Number => Some(&self.number),
        }
    }

    pub fn rarity(&self) -> &Classifier {
        &self.rarity
    }

    pub fn subtype(&self) -> &Classifier {
        &self.subtype
    }

    pub fn supertype(&self) -> &Classifier {
        &self.supertype
    }

    pub fn set(&self) -> &Classifier {
        &self.set
    }

    pub fn number(&self) -> &Classifier {
        &self.number
    }

    pub fn resolve_gallery(&self, flag: Option<bool>) -> Resolution {
        let (stage, tag) = if flag == Some(true) {
            (Stage::Exact, self.gallery_tag.to_string())
        } else {
            (Stage::Absent, String::new())
        };
        Resolution {
            attribute: AttributeKind::Gallery,
            input: flag.map(|f| f.to_string()),
            stage,
            tag,
        }
    }

    pub fn describe(&self) -> RulebookDescriptor {
        RulebookDescriptor {
            base_tag: self.base_tag.to_string(),
            gallery_tag: self.gallery_tag.to_string(),
            attributes: AttributeKind::ALL
                .iter()
                .filter_map(|kind| self.classifier(*kind))
                .map(Classifier::describe)
                .collect(),
        }
    }

    /// Hex SHA-256 of the canonical descriptor
    pub fn fingerprint(&self) -> Result<String, serde_json::Error> {
        crate::hashing::fingerprint(&self.describe())
    }
}
