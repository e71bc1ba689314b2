//! Composition Engine - Single Entry Point
//!
//! Runs every attribute classifier in fixed order and concatenates the
//! results behind the base tag. No deduplication, no re-ordering.

use serde::{Deserialize, Serialize};

use crate::rulebook::{Resolution, Rulebook};

/// Raw attributes of one card
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardAttributes {
    #[serde(default)]
    pub rarity: Option<String>,
    #[serde(default, alias = "subtypes")]
    pub subtype: Option<String>,
    #[serde(default)]
    pub supertype: Option<String>,
    #[serde(default, alias = "isTrainerGallery")]
    pub is_gallery_variant: Option<bool>,
    #[serde(default)]
    pub set: Option<String>,
    #[serde(default)]
    pub number: Option<String>,
    /// Already-clean type tags, appended verbatim
    #[serde(default)]
    pub types: Option<Vec<String>>,
}

/// Tag composition over a borrowed rulebook
#[derive(Clone, Copy)]
pub struct TagEngine<'r> {
    rulebook: &'r Rulebook,
}

impl<'r> TagEngine<'r> {
    pub fn new(rulebook: &'r Rulebook) -> Self {
        Self { rulebook }
    }

    pub fn rulebook(&self) -> &'r Rulebook {
        self.rulebook
    }

    /// Per-attribute resolutions in composition order
    pub fn explain(&self, card: &CardAttributes) -> Vec<Resolution> {
        let book = self.rulebook;
        vec![
            book.rarity().resolve(card.rarity.as_deref()),
            book.subtype().resolve(card.subtype.as_deref()),
            book.supertype().resolve(card.supertype.as_deref()),
            book.resolve_gallery(card.is_gallery_variant),
            book.set().resolve(card.set.as_deref()),
            book.number().resolve(card.number.as_deref()),
        ]
    }

    /// Ordered tag sequence for one card
    pub fn compose(&self, card: &CardAttributes) -> Vec<String> {
        self.assemble(self.explain(card), card)
    }

    /// Tags and the resolutions that produced them, from a single pass
    pub fn compose_explained(&self, card: &CardAttributes) -> (Vec<String>, Vec<Resolution>) {
        let resolutions = self.explain(card);
        let tags = self.assemble(resolutions.clone(), card);
        (tags, resolutions)
    }

    fn assemble(&self, resolutions: Vec<Resolution>, card: &CardAttributes) -> Vec<String> {
        let types = card.types.as_deref().unwrap_or_default();
        let mut tags = Vec::with_capacity(1 + resolutions.len() + types.len());

        tags.push(self.rulebook.base_tag().to_string());
        tags.extend(
            resolutions
                .into_iter()
                .map(|r| r.tag)
                .filter(|tag| !tag.is_empty()),
        );
        tags.extend(types.iter().cloned());
        tags
    }
}

impl Default for TagEngine<'static> {
    fn default() -> Self {
        Self::new(Rulebook::standard())
    }
}

/// Ordered tag sequence for one card against the standard rulebook
pub fn compose_tags(card: &CardAttributes) -> Vec<String> {
    TagEngine::default().compose(card)
}
