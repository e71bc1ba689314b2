//! Batch Classification Report
//!
//! A batch is either one card object or an array of them. Reports carry the
//! rulebook fingerprint so outputs can be tied back to the rules in force.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;
use uuid::Uuid;

use crate::compose::{CardAttributes, TagEngine};
use crate::ENGINE_VERSION;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Failed to read card batch: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid card payload: {0}")]
    Payload(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum BatchInput {
    Many(Vec<CardAttributes>),
    One(CardAttributes),
}

/// Cards submitted together, in input order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CardBatch {
    pub cards: Vec<CardAttributes>,
}

impl CardBatch {
    pub fn from_json_str(json: &str) -> Result<Self, ReportError> {
        let cards = match serde_json::from_str::<BatchInput>(json)? {
            BatchInput::Many(cards) => cards,
            BatchInput::One(card) => vec![card],
        };
        Ok(Self { cards })
    }

    pub fn from_path(path: &Path) -> Result<Self, ReportError> {
        let content = fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClassifiedCard {
    pub index: usize,
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassificationReport {
    pub id: String,
    pub generated_at: DateTime<Utc>,
    pub engine_version: String,
    pub rulebook_fingerprint: String,
    pub cards: Vec<ClassifiedCard>,
}

impl TagEngine<'_> {
    /// Classify every card of a batch
    pub fn classify_batch(&self, batch: &CardBatch) -> Result<ClassificationReport, ReportError> {
        let cards: Vec<_> = batch
            .cards
            .iter()
            .enumerate()
            .map(|(index, card)| ClassifiedCard {
                index,
                tags: self.compose(card),
            })
            .collect();

        let report = ClassificationReport {
            id: Uuid::new_v4().to_string(),
            generated_at: Utc::now(),
            engine_version: ENGINE_VERSION.to_string(),
            rulebook_fingerprint: self.rulebook().fingerprint()?,
            cards,
        };

        tracing::debug!(
            report_id = %report.id,
            cards = report.cards.len(),
            "Batch classified"
        );

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_object_is_one_card() {
        let batch = CardBatch::from_json_str(r#"{"rarity": "Rare Ultra"}"#).unwrap();
        assert_eq!(batch.len(), 1);
        assert_eq!(batch.cards[0].rarity.as_deref(), Some("Rare Ultra"));
    }

    #[test]
    fn test_array_keeps_order() {
        let batch = CardBatch::from_json_str(
            r#"[{"number": "160"}, {"number": "1"}, {"supertype": "Trainer"}]"#,
        )
        .unwrap();
        let report = TagEngine::default().classify_batch(&batch).unwrap();
        let tags: Vec<_> = report.cards.iter().map(|c| c.tags.clone()).collect();
        assert_eq!(tags, vec![vec!["card", "swsh160"], vec!["card", "1"], vec!["card", "trainer"]]);
        assert_eq!(report.cards[2].index, 2);
    }

    #[test]
    fn test_invalid_payload_is_error() {
        let err = CardBatch::from_json_str(r#"{"rarity": 5}"#).unwrap_err();
        assert!(matches!(err, ReportError::Payload(_)));
    }

    #[test]
    fn test_report_carries_versions() {
        let report = TagEngine::default().classify_batch(&CardBatch::default()).unwrap();
        assert!(report.cards.is_empty());
        assert_eq!(report.engine_version, ENGINE_VERSION);
        assert_eq!(report.rulebook_fingerprint.len(), 64);
    }
}
