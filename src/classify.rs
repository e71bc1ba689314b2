//! Per-attribute entry points against the standard rulebook.
//!
//! Each function takes one raw value and returns a single tag, empty when the
//! value is absent or empty.

use crate::rulebook::Rulebook;
use crate::rules::{PatternRule, RARE_SHINY, REVERSE_HOLO};

pub fn rarity_tag(rarity: Option<&str>) -> String {
    Rulebook::standard().rarity().classify(rarity)
}

pub fn subtype_tag(subtype: Option<&str>) -> String {
    Rulebook::standard().subtype().classify(subtype)
}

pub fn supertype_tag(supertype: Option<&str>) -> String {
    Rulebook::standard().supertype().classify(supertype)
}

pub fn gallery_tag(is_gallery_variant: Option<bool>) -> String {
    Rulebook::standard().resolve_gallery(is_gallery_variant).tag
}

pub fn set_tag(set: Option<&str>) -> String {
    Rulebook::standard().set().classify(set)
}

pub fn number_tag(number: Option<&str>) -> String {
    Rulebook::standard().number().classify(number)
}

/// Whether a rarity implies the reverse-holo treatment.
///
/// Evaluates the same rule as the rarity chain, without running the exact
/// dictionary first.
pub fn needs_reverse_holo(rarity: Option<&str>) -> bool {
    matches_rule(&REVERSE_HOLO, rarity)
}

/// Whether a rarity implies a shiny treatment
pub fn needs_shiny(rarity: Option<&str>) -> bool {
    matches_rule(&RARE_SHINY, rarity)
}

fn matches_rule(rule: &dyn PatternRule, rarity: Option<&str>) -> bool {
    match rarity {
        Some(r) if !r.is_empty() => rule.matches(&r.to_lowercase()),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rarity_exact_case_insensitive() {
        assert_eq!(rarity_tag(Some("Rare Holo VMAX")), "holo-vmax");
        assert_eq!(rarity_tag(Some("AMAZING RARE")), "amazing");
        assert_eq!(rarity_tag(Some("Trainer Gallery Rare Holo")), "trainer-gallery-holo");
    }

    #[test]
    fn test_rarity_patterns_and_fallback() {
        assert_eq!(rarity_tag(Some("XY Reverse Holo")), "reverse-holo");
        assert_eq!(rarity_tag(Some("Rare Shiny GX")), "shiny");
        assert_eq!(rarity_tag(Some("Rare Prism Star")), "rare-prism-star");
        assert_eq!(rarity_tag(None), "");
    }

    #[test]
    fn test_subtype_chain() {
        assert_eq!(subtype_tag(Some("Stage 2")), "stage-2");
        assert_eq!(subtype_tag(Some("V-UNION")), "v-union");
        assert_eq!(subtype_tag(Some("Supporter")), "supporter");
        assert_eq!(subtype_tag(Some("Pokémon Tool")), "pokémon-tool");
        assert_eq!(subtype_tag(Some("Item")), "item");
    }

    #[test]
    fn test_subtype_stage_outranks_contains() {
        // starts with "stage" and contains "item": stage rule is earlier
        assert_eq!(subtype_tag(Some("Stage item")), "stage-item");
    }

    #[test]
    fn test_supertype() {
        assert_eq!(supertype_tag(Some("Pokémon")), "pokemon");
        assert_eq!(supertype_tag(Some("pokemon")), "pokemon");
        assert_eq!(supertype_tag(Some("Trainer")), "trainer");
        assert_eq!(supertype_tag(Some("Energy")), "energy");
    }

    #[test]
    fn test_gallery() {
        assert_eq!(gallery_tag(Some(true)), "trainer-gallery");
        assert_eq!(gallery_tag(Some(false)), "");
        assert_eq!(gallery_tag(None), "");
    }

    #[test]
    fn test_set_and_number() {
        assert_eq!(set_tag(Some("SWSHP")), "swshp");
        assert_eq!(set_tag(Some("swsh12pt5")), "swsh12pt5");
        assert_eq!(number_tag(Some("160")), "swsh160");
        assert_eq!(number_tag(Some("SWSH020")), "swsh020");
        assert_eq!(number_tag(Some("TG05")), "tg05");
    }

    #[test]
    fn test_predicates() {
        assert!(needs_reverse_holo(Some("XY Reverse Holo")));
        assert!(!needs_reverse_holo(Some("Rare Holo")));
        assert!(!needs_reverse_holo(Some("")));
        assert!(needs_shiny(Some("Rare Shiny VMAX")));
        assert!(!needs_shiny(None));
    }

    #[test]
    fn test_predicates_agree_with_rarity_chain() {
        // none of these are exact dictionary keys
        let rarities = [
            "Common Reverse Holo",
            "Rare Shiny GX",
            "Rare Shiny Reverse Holo",
            "Reverse Holo Rare",
            "Rare Prism Star",
            "Promo",
        ];
        for rarity in rarities {
            let tag = rarity_tag(Some(rarity));
            assert_eq!(needs_reverse_holo(Some(rarity)), tag == "reverse-holo", "{:?}", rarity);
            if !needs_reverse_holo(Some(rarity)) {
                assert_eq!(needs_shiny(Some(rarity)), tag == "shiny", "{:?}", rarity);
            }
        }
    }

    #[test]
    fn test_fallback_uses_script_whitespace_class() {
        assert_eq!(rarity_tag(Some("Rare\u{85}Prism")), "rare\u{85}prism");
        assert_eq!(subtype_tag(Some("Basic\u{feff}Card")), "basic-card");
    }
}
