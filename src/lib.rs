//! CardStyle Core - Attribute-to-Tag Mapping Engine
//!
//! Turns raw card attributes (rarity, subtype, supertype, gallery flag, set,
//! number, types) into an ordered list of style-selector tags.
//!
//! # Resolution order
//! 1. Exact dictionary lookup on the lower-cased value
//! 2. Pattern rule chain, first match wins
//! 3. Fallback normalization
//!
//! Classification is total and pure. Rule tables are built once and shared.

pub mod rules;
pub mod rulebook;
pub mod classify;
pub mod compose;
pub mod hashing;
pub mod report;
pub mod state;

pub use rules::{PatternRule, RuleChain, RuleDescriptor, RARE_SHINY, REVERSE_HOLO};
pub use rulebook::{AttributeKind, Classifier, Fallback, Resolution, Rulebook, Stage};
pub use classify::{
    gallery_tag, needs_reverse_holo, needs_shiny, number_tag, rarity_tag, set_tag, subtype_tag,
    supertype_tag,
};
pub use compose::{compose_tags, CardAttributes, TagEngine};
pub use report::{CardBatch, ClassificationReport, ClassifiedCard, ReportError};
pub use state::{ActiveCard, Orientation, OrientationReading, OrientationTracker};

pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");
