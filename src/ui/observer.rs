/// Viewport intersection observer
///
/// Watches a set of card rectangles against the scroll viewport and reports
/// which cards crossed the visibility threshold. One observer lives for one
/// rendering of the grid: the gallery drops it and connects a new one
/// whenever the record list, the selection or the layout changes.

use std::collections::HashMap;

use iced::Rectangle;

use crate::state::data::CharacterId;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObserverOptions {
    /// Fraction of a card that must be inside the root (0.0 to 1.0)
    pub threshold: f32,
    /// Pixels added on every side of the viewport
    pub root_margin: f32,
}

impl Default for ObserverOptions {
    fn default() -> Self {
        Self {
            threshold: 0.5,
            root_margin: 0.0,
        }
    }
}

/// One visibility report for one card
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntersectionEntry {
    pub id: CharacterId,
    pub is_intersecting: bool,
    /// Visible fraction of the card (0.0 to 1.0)
    pub ratio: f32,
}

#[derive(Debug)]
pub struct IntersectionObserver {
    options: ObserverOptions,
    targets: Vec<(CharacterId, Rectangle)>,
    /// Last reported state per card
    reported: HashMap<CharacterId, bool>,
    generation: u64,
}

impl IntersectionObserver {
    /// Start observing `targets`. Returns the observer together with the
    /// initial report for every target.
    pub fn connect(
        options: ObserverOptions,
        targets: Vec<(CharacterId, Rectangle)>,
        viewport: Rectangle,
        generation: u64,
    ) -> (Self, Vec<IntersectionEntry>) {
        tracing::debug!(
            "Observer #{} connected to {} cards",
            generation,
            targets.len()
        );

        let mut observer = Self {
            options,
            targets,
            reported: HashMap::new(),
            generation,
        };
        let entries = observer.check(viewport);

        (observer, entries)
    }

    /// Report every card whose intersecting state changed since the last check
    pub fn check(&mut self, viewport: Rectangle) -> Vec<IntersectionEntry> {
        let mut entries = Vec::new();

        for &(id, bounds) in &self.targets {
            let ratio = intersection_ratio(bounds, viewport, self.options.root_margin);
            let is_intersecting = crosses_threshold(ratio, self.options.threshold);

            if self.reported.insert(id, is_intersecting) != Some(is_intersecting) {
                entries.push(IntersectionEntry {
                    id,
                    is_intersecting,
                    ratio,
                });
            }
        }

        entries
    }

    #[cfg(test)]
    pub fn observed(&self) -> usize {
        self.targets.len()
    }
}

impl Drop for IntersectionObserver {
    fn drop(&mut self) {
        tracing::debug!("Observer #{} disconnected", self.generation);
    }
}

/// Visible fraction of `target` inside `root` grown by `margin` on each side
pub fn intersection_ratio(target: Rectangle, root: Rectangle, margin: f32) -> f32 {
    let root = Rectangle {
        x: root.x - margin,
        y: root.y - margin,
        width: (root.width + 2.0 * margin).max(0.0),
        height: (root.height + 2.0 * margin).max(0.0),
    };

    let Some(overlap) = target.intersection(&root) else {
        return 0.0;
    };

    // A non-empty overlap implies a non-empty target
    let area = target.width * target.height;
    (overlap.width * overlap.height / area).clamp(0.0, 1.0)
}

fn crosses_threshold(ratio: f32, threshold: f32) -> bool {
    if threshold <= 0.0 {
        ratio > 0.0
    } else {
        ratio >= threshold
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(x: f32, y: f32, width: f32, height: f32) -> Rectangle {
        Rectangle {
            x,
            y,
            width,
            height,
        }
    }

    #[test]
    fn test_ratio_of_partially_visible_card() {
        let card = rect(0.0, 0.0, 100.0, 100.0);
        let viewport = rect(0.0, 40.0, 500.0, 500.0);
        assert!((intersection_ratio(card, viewport, 0.0) - 0.6).abs() < 1e-4);
    }

    #[test]
    fn test_ratio_outside_viewport_is_zero() {
        let card = rect(0.0, 1000.0, 100.0, 100.0);
        let viewport = rect(0.0, 0.0, 500.0, 500.0);
        assert_eq!(intersection_ratio(card, viewport, 0.0), 0.0);
    }

    #[test]
    fn test_margin_grows_root() {
        let card = rect(0.0, 500.0, 100.0, 100.0);
        let viewport = rect(0.0, 0.0, 500.0, 500.0);
        assert_eq!(intersection_ratio(card, viewport, 0.0), 0.0);
        assert!((intersection_ratio(card, viewport, 50.0) - 0.5).abs() < 1e-4);
    }

    #[test]
    fn test_half_visible_meets_default_threshold() {
        assert!(crosses_threshold(0.5, 0.5));
        assert!(!crosses_threshold(0.49, 0.5));
        assert!(crosses_threshold(0.01, 0.0));
        assert!(!crosses_threshold(0.0, 0.0));
    }

    #[test]
    fn test_connect_reports_every_target_once() {
        let targets = vec![
            (1, rect(0.0, 0.0, 100.0, 100.0)),
            (2, rect(0.0, 900.0, 100.0, 100.0)),
        ];
        let viewport = rect(0.0, 0.0, 500.0, 500.0);

        let (mut observer, entries) =
            IntersectionObserver::connect(ObserverOptions::default(), targets, viewport, 1);

        assert_eq!(entries.len(), 2);
        assert!(entries[0].is_intersecting);
        assert!(!entries[1].is_intersecting);
        assert_eq!(observer.observed(), 2);

        // Nothing moved, nothing to report
        assert!(observer.check(viewport).is_empty());
    }

    #[test]
    fn test_check_reports_only_threshold_crossings() {
        let targets = vec![
            (1, rect(0.0, 0.0, 100.0, 100.0)),
            (2, rect(0.0, 550.0, 100.0, 100.0)),
        ];
        let (mut observer, _) = IntersectionObserver::connect(
            ObserverOptions::default(),
            targets,
            rect(0.0, 0.0, 500.0, 500.0),
            1,
        );

        // Scroll down by 160: card 1 leaves, card 2 becomes fully visible
        let entries = observer.check(rect(0.0, 160.0, 500.0, 500.0));
        assert_eq!(entries.len(), 2);
        assert_eq!((entries[0].id, entries[0].is_intersecting), (1, false));
        assert_eq!((entries[1].id, entries[1].is_intersecting), (2, true));

        // A small scroll that crosses nothing produces no entries
        assert!(observer.check(rect(0.0, 170.0, 500.0, 500.0)).is_empty());
    }
}
