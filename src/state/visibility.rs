/// Per-card fade state
///
/// Each grid card owns a `Fade` that moves linearly from its current
/// opacity toward a target of 0.0 or 1.0. The `VisibilityMap` is keyed by
/// record identifier, never by grid position.

use std::collections::HashMap;
use std::time::Duration;

use super::data::CharacterId;

/// Opacity of one card and where it is heading
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fade {
    current: f32,
    target: f32,
}

impl Default for Fade {
    /// Freshly rendered cards start hidden
    fn default() -> Self {
        Self {
            current: 0.0,
            target: 0.0,
        }
    }
}

impl Fade {
    pub fn opacity(&self) -> f32 {
        self.current
    }

    pub fn is_animating(&self) -> bool {
        self.current != self.target
    }

    /// Start fading toward fully shown or fully hidden
    pub fn set_visible(&mut self, visible: bool) {
        self.target = if visible { 1.0 } else { 0.0 };
    }

    /// Jump straight to full opacity
    pub fn show_now(&mut self) {
        self.current = 1.0;
        self.target = 1.0;
    }

    /// Advance by `elapsed` of a fade that takes `duration` end to end.
    /// Returns true while the target is not yet reached.
    pub fn step(&mut self, elapsed: Duration, duration: Duration) -> bool {
        if !self.is_animating() {
            return false;
        }

        if duration.is_zero() {
            self.current = self.target;
            return false;
        }

        let delta = elapsed.as_secs_f32() / duration.as_secs_f32();
        if self.current < self.target {
            self.current = (self.current + delta).min(self.target);
        } else {
            self.current = (self.current - delta).max(self.target);
        }

        self.is_animating()
    }
}

/// Fade state for every rendered card
#[derive(Debug, Clone)]
pub struct VisibilityMap {
    fades: HashMap<CharacterId, Fade>,
    duration: Duration,
}

impl VisibilityMap {
    pub fn new(duration: Duration) -> Self {
        Self {
            fades: HashMap::new(),
            duration,
        }
    }

    /// Current opacity; cards never reported on are hidden
    pub fn opacity(&self, id: CharacterId) -> f32 {
        self.fades.get(&id).map(Fade::opacity).unwrap_or(0.0)
    }

    pub fn set_visible(&mut self, id: CharacterId, visible: bool) {
        self.fades.entry(id).or_default().set_visible(visible);
    }

    pub fn force_visible(&mut self, id: CharacterId) {
        self.fades.entry(id).or_default().show_now();
    }

    /// True if any card is still mid-fade
    pub fn is_animating(&self) -> bool {
        self.fades.values().any(Fade::is_animating)
    }

    /// Advance all fades; returns true if another frame is needed
    pub fn tick(&mut self, elapsed: Duration) -> bool {
        let mut animating = false;
        for fade in self.fades.values_mut() {
            animating |= fade.step(elapsed, self.duration);
        }
        animating
    }

    /// Forget every card, as when the grid is rendered from scratch
    pub fn reset(&mut self) {
        self.fades.clear();
    }
}
