//! Presentation State
//!
//! Plain holders the rendering layer reads from: the currently selected card
//! and the device tilt relative to a captured baseline. No classification
//! logic lives here.

use serde::{Deserialize, Serialize};
use std::ops::Sub;

use crate::compose::CardAttributes;

pub type SubscriptionId = u64;

type Listener = Box<dyn Fn(Option<&CardAttributes>) + Send + Sync>;

/// Currently selected card, with synchronous change notification
#[derive(Default)]
pub struct ActiveCard {
    card: Option<CardAttributes>,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_id: SubscriptionId,
}

impl ActiveCard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> Option<&CardAttributes> {
        self.card.as_ref()
    }

    pub fn set(&mut self, card: CardAttributes) {
        self.card = Some(card);
        self.notify();
    }

    pub fn clear(&mut self) {
        self.card = None;
        self.notify();
    }

    pub fn subscribe(
        &mut self,
        listener: impl Fn(Option<&CardAttributes>) + Send + Sync + 'static,
    ) -> SubscriptionId {
        let id = self.next_id;
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Returns false if the id was not subscribed
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sid, _)| *sid != id);
        self.listeners.len() != before
    }

    fn notify(&self) {
        for (_, listener) in &self.listeners {
            listener(self.card.as_ref());
        }
    }
}

/// Device orientation angles in degrees
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Orientation {
    pub alpha: f64,
    pub beta: f64,
    pub gamma: f64,
}

impl Sub for Orientation {
    type Output = Orientation;

    fn sub(self, rhs: Orientation) -> Orientation {
        Orientation {
            alpha: self.alpha - rhs.alpha,
            beta: self.beta - rhs.beta,
            gamma: self.gamma - rhs.gamma,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct OrientationReading {
    pub absolute: Orientation,
    pub relative: Orientation,
}

/// Tracks tilt relative to the first reading after construction or reset
#[derive(Debug, Clone)]
pub struct OrientationTracker {
    first_reading: bool,
    baseline: Orientation,
    current: OrientationReading,
}

impl Default for OrientationTracker {
    fn default() -> Self {
        Self {
            first_reading: true,
            baseline: Orientation::default(),
            current: OrientationReading::default(),
        }
    }
}

impl OrientationTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a device event. A missing event reads as all zeros.
    pub fn handle(&mut self, event: Option<Orientation>) -> OrientationReading {
        let absolute = event.unwrap_or_default();
        if self.first_reading {
            self.first_reading = false;
            self.baseline = absolute;
        }
        self.current = OrientationReading {
            absolute,
            relative: absolute - self.baseline,
        };
        self.current
    }

    /// Next event becomes the new baseline
    pub fn reset_baseline(&mut self) {
        self.first_reading = true;
        self.baseline = Orientation::default();
    }

    pub fn current(&self) -> OrientationReading {
        self.current
    }

    pub fn baseline(&self) -> Orientation {
        self.baseline
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn tilt(alpha: f64, beta: f64, gamma: f64) -> Orientation {
        Orientation { alpha, beta, gamma }
    }

    #[test]
    fn test_active_card_notifies_subscribers() {
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&calls);

        let mut active = ActiveCard::new();
        let id = active.subscribe(move |_| {
            seen.fetch_add(1, Ordering::SeqCst);
        });

        active.set(CardAttributes {
            rarity: Some("Rare Holo".into()),
            ..Default::default()
        });
        assert_eq!(active.get().and_then(|c| c.rarity.as_deref()), Some("Rare Holo"));
        active.clear();
        assert!(active.get().is_none());
        assert_eq!(calls.load(Ordering::SeqCst), 2);

        assert!(active.unsubscribe(id));
        assert!(!active.unsubscribe(id));
        active.clear();
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_first_reading_is_baseline() {
        let mut tracker = OrientationTracker::new();
        let first = tracker.handle(Some(tilt(10.0, 20.0, 30.0)));
        assert_eq!(first.relative, Orientation::default());

        let second = tracker.handle(Some(tilt(15.0, 18.0, 30.0)));
        assert_eq!(second.absolute, tilt(15.0, 18.0, 30.0));
        assert_eq!(second.relative, tilt(5.0, -2.0, 0.0));
        assert_eq!(tracker.current(), second);
    }

    #[test]
    fn test_reset_recaptures_baseline() {
        let mut tracker = OrientationTracker::new();
        tracker.handle(Some(tilt(1.0, 1.0, 1.0)));
        tracker.reset_baseline();
        assert_eq!(tracker.baseline(), Orientation::default());

        let reading = tracker.handle(Some(tilt(4.0, 5.0, 6.0)));
        assert_eq!(reading.relative, Orientation::default());
        assert_eq!(tracker.baseline(), tilt(4.0, 5.0, 6.0));
    }

    #[test]
    fn test_missing_event_reads_zero() {
        let mut tracker = OrientationTracker::new();
        tracker.handle(Some(tilt(2.0, 2.0, 2.0)));
        let reading = tracker.handle(None);
        assert_eq!(reading.absolute, Orientation::default());
        assert_eq!(reading.relative, tilt(-2.0, -2.0, -2.0));
    }
}
