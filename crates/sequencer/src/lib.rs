//! Section rotation for the hero card.
//!
//! The deck cycles through portfolio sections like a kiosk slideshow: each
//! section stays on screen for its dwell time, then the rotation advances.
//! Shuffle mode reshuffles the visit order every time it is exhausted.

use std::time::{Duration, Instant};

use rand::prelude::*;
use siteconfig::{RotationModeSetting, RotationSettings};

#[derive(Debug, thiserror::Error)]
pub enum SequencerError {
    #[error("rotation requires at least one section")]
    NoSections,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SectionId(pub String);

impl SectionId {
    pub fn new(id: impl Into<String>) -> Self {
        SectionId(id.into())
    }
}

/// Emitted whenever the hero card should swap to another section.
#[derive(Debug, Clone)]
pub struct SectionChange {
    pub section: SectionId,
    pub started_at: Instant,
}

pub struct Rotation {
    sections: Vec<SectionId>,
    mode: RotationModeSetting,
    dwell: Duration,
    order: Vec<usize>,
    cursor: usize,
    last_started: Instant,
    rng: StdRng,
}

impl Rotation {
    pub fn new(
        sections: Vec<SectionId>,
        settings: &RotationSettings,
        seed: u64,
        now: Instant,
    ) -> Result<Self, SequencerError> {
        if sections.is_empty() {
            return Err(SequencerError::NoSections);
        }
        let mut rng = StdRng::seed_from_u64(seed);
        let order = build_order(sections.len(), settings.mode, &mut rng);
        Ok(Self {
            sections,
            mode: settings.mode,
            dwell: settings.dwell,
            order,
            cursor: 0,
            last_started: now,
            rng,
        })
    }

    pub fn current(&self) -> &SectionId {
        &self.sections[self.order[self.cursor]]
    }

    /// Advances when the dwell has elapsed. Single-section rotations never
    /// advance.
    pub fn tick(&mut self, now: Instant) -> Option<SectionChange> {
        if self.sections.len() <= 1 {
            return None;
        }
        if now.duration_since(self.last_started) < self.dwell {
            return None;
        }
        self.advance(now);
        Some(SectionChange {
            section: self.current().clone(),
            started_at: now,
        })
    }

    /// Advances immediately, restarting the dwell clock.
    pub fn skip(&mut self, now: Instant) -> Option<SectionChange> {
        if self.sections.len() <= 1 {
            return None;
        }
        self.advance(now);
        Some(SectionChange {
            section: self.current().clone(),
            started_at: now,
        })
    }

    fn advance(&mut self, now: Instant) {
        self.cursor += 1;
        if self.cursor >= self.order.len() {
            self.order = build_order(self.sections.len(), self.mode, &mut self.rng);
            self.cursor = 0;
        }
        self.last_started = now;
    }
}

fn build_order(len: usize, mode: RotationModeSetting, rng: &mut StdRng) -> Vec<usize> {
    let mut order: Vec<usize> = (0..len).collect();
    match mode {
        RotationModeSetting::Continuous => {}
        RotationModeSetting::Shuffle => order.shuffle(rng),
    }
    order
}
