use iced::{Point, Rectangle, Size};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use super::data::{CharacterId, CharacterRecord};
use super::visibility::VisibilityMap;
use crate::api::portrait::Portrait;
use crate::config::GalleryConfig;
use crate::error::FetchError;
use crate::ui::layout::GridLayout;
use crate::ui::observer::{IntersectionEntry, IntersectionObserver, ObserverOptions};

/// Which of the two exclusive screens is shown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    Grid,
    Detail,
}

/// Progress of the one-time collection fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    Idle,
    Loading,
    Loaded,
    Failed,
}

/// All UI state of the gallery, owned by the application
#[derive(Debug)]
pub struct Gallery {
    config: GalleryConfig,
    load_state: LoadState,
    characters: Vec<CharacterRecord>,
    portraits: HashMap<CharacterId, Portrait>,
    /// Selected record, keyed by identifier
    selection: Option<CharacterId>,
    hovered: Option<CharacterId>,
    visibility: VisibilityMap,
    /// Visible part of the scroll content
    viewport: Rectangle,
    /// Scroll position of the grid when a card was opened
    grid_offset: Point,
    layout: GridLayout,
    observer: Option<IntersectionObserver>,
    observer_generation: u64,
}

impl Gallery {
    pub fn new(config: GalleryConfig) -> Self {
        let viewport = Rectangle {
            x: 0.0,
            y: 0.0,
            width: config.window_width,
            height: config.window_height,
        };
        let layout = GridLayout::new(&config, viewport.width);
        let visibility = VisibilityMap::new(Duration::from_millis(config.fade_duration_ms));

        let mut gallery = Self {
            config,
            load_state: LoadState::Idle,
            characters: Vec::new(),
            portraits: HashMap::new(),
            selection: None,
            hovered: None,
            visibility,
            viewport,
            grid_offset: Point::ORIGIN,
            layout,
            observer: None,
            observer_generation: 0,
        };
        gallery.reobserve();
        gallery
    }

    pub fn config(&self) -> &GalleryConfig {
        &self.config
    }

    // ========== Data Loader ==========

    /// Claim the one and only fetch. Returns false on every later call.
    pub fn begin_load(&mut self) -> bool {
        if self.load_state != LoadState::Idle {
            return false;
        }
        self.load_state = LoadState::Loading;
        true
    }

    #[cfg(test)]
    pub fn load_state(&self) -> LoadState {
        self.load_state
    }

    /// Apply the fetch outcome. Success replaces the list; failure is
    /// logged and leaves the list as it was.
    pub fn finish_load(&mut self, result: Result<Vec<CharacterRecord>, Arc<FetchError>>) {
        match result {
            Ok(characters) => {
                let with_image = characters.iter().filter(|c| c.has_image()).count();
                tracing::info!(
                    "Loaded {} characters, {} with a portrait",
                    characters.len(),
                    with_image
                );

                self.characters = characters;
                self.load_state = LoadState::Loaded;

                // The grid renders from scratch
                self.visibility.reset();
                self.portraits.clear();
                if self
                    .selection
                    .is_some_and(|id| !self.grid_cards().any(|c| c.id == id))
                {
                    self.selection = None;
                }
                self.reobserve();
            }
            Err(e) => {
                tracing::error!("Error fetching characters: {}", e);
                self.load_state = LoadState::Failed;
            }
        }
    }

    #[cfg(test)]
    pub fn characters(&self) -> &[CharacterRecord] {
        &self.characters
    }

    /// Records that get a grid card: those with a non-empty image
    pub fn grid_cards(&self) -> impl Iterator<Item = &CharacterRecord> {
        self.characters.iter().filter(|c| c.has_image())
    }

    pub fn set_portrait(&mut self, id: CharacterId, portrait: Portrait) {
        self.portraits.insert(id, portrait);
    }

    pub fn portrait(&self, id: CharacterId) -> Option<&Portrait> {
        self.portraits.get(&id)
    }

    // ========== Selection ==========

    pub fn mode(&self) -> ViewMode {
        if self.selection.is_some() {
            ViewMode::Detail
        } else {
            ViewMode::Grid
        }
    }

    pub fn selected(&self) -> Option<&CharacterRecord> {
        let id = self.selection?;
        self.characters.iter().find(|c| c.id == id)
    }

    /// Grid → Detail. Only a card shown in the grid can be opened.
    /// Returns true if the selection changed.
    pub fn select(&mut self, id: CharacterId) -> bool {
        if self.mode() != ViewMode::Grid || !self.grid_cards().any(|c| c.id == id) {
            return false;
        }

        tracing::debug!("Opening character {}", id);
        self.selection = Some(id);
        // The grid is no longer on screen to receive a mouse exit
        self.hovered = None;
        self.grid_offset = Point::new(self.viewport.x, self.viewport.y);
        self.viewport.x = 0.0;
        self.viewport.y = 0.0;
        self.reobserve();
        true
    }

    /// Detail → Grid. Returns the grid scroll position to restore, or
    /// `None` if nothing was selected.
    pub fn go_back(&mut self) -> Option<Point> {
        self.selection.take()?;

        tracing::debug!("Back to the grid");
        self.viewport.x = self.grid_offset.x;
        self.viewport.y = self.grid_offset.y;
        // Cards are rendered again and fade in from hidden
        self.visibility.reset();
        self.reobserve();
        Some(self.grid_offset)
    }

    // ========== Hover ==========

    pub fn hover(&mut self, id: CharacterId) {
        self.hovered = Some(id);
    }

    /// Mouse left card `id`. Ignored if another card is hovered by now.
    pub fn unhover(&mut self, id: CharacterId) {
        if self.hovered == Some(id) {
            self.hovered = None;
        }
    }

    #[cfg(test)]
    pub fn hovered(&self) -> Option<CharacterId> {
        self.hovered
    }

    pub fn is_hovered(&self, id: CharacterId) -> bool {
        self.hovered == Some(id)
    }

    // ========== Visibility ==========

    /// Opacity to draw card `id` with. The selected card is always opaque.
    pub fn card_opacity(&self, id: CharacterId) -> f32 {
        if self.selection == Some(id) {
            1.0
        } else {
            self.visibility.opacity(id)
        }
    }

    /// Apply observer reports to the visibility map
    pub fn apply_intersections(&mut self, entries: &[IntersectionEntry]) {
        for entry in entries {
            tracing::trace!(
                "Card {} intersecting={} ({:.2} visible)",
                entry.id,
                entry.is_intersecting,
                entry.ratio
            );
            if self.selection == Some(entry.id) {
                self.visibility.force_visible(entry.id);
            } else {
                self.visibility.set_visible(entry.id, entry.is_intersecting);
            }
        }
    }

    /// The scroll viewport moved or changed size
    pub fn set_viewport(&mut self, viewport: Rectangle) {
        let resized = viewport.size() != self.viewport.size();
        self.viewport = viewport;

        if resized {
            self.layout = GridLayout::new(&self.config, viewport.width);
            self.reobserve();
        } else if let Some(observer) = self.observer.as_mut() {
            let entries = observer.check(viewport);
            self.apply_intersections(&entries);
        }
    }

    /// The window was resized
    pub fn resize(&mut self, size: Size) {
        let viewport = Rectangle {
            width: size.width,
            height: size.height,
            ..self.viewport
        };
        self.set_viewport(viewport);
    }

    #[cfg(test)]
    pub fn layout(&self) -> &GridLayout {
        &self.layout
    }

    pub fn is_animating(&self) -> bool {
        self.visibility.is_animating()
    }

    /// Advance fades; returns true if another frame is needed
    pub fn tick(&mut self, elapsed: Duration) -> bool {
        self.visibility.tick(elapsed)
    }

    #[cfg(test)]
    /// Number of observers created so far
    pub fn observer_generation(&self) -> u64 {
        self.observer_generation
    }

    #[cfg(test)]
    /// Cards watched by the live observer
    pub fn observed_cards(&self) -> usize {
        self.observer.as_ref().map(IntersectionObserver::observed).unwrap_or(0)
    }

    /// Disconnect the current observer and connect a fresh one for the
    /// cards currently on screen
    fn reobserve(&mut self) {
        // Release before acquiring so two observers never coexist
        self.observer = None;

        let targets: Vec<(CharacterId, Rectangle)> = match self.mode() {
            ViewMode::Grid => self
                .grid_cards()
                .enumerate()
                .map(|(index, card)| (card.id, self.layout.card_bounds(index)))
                .collect(),
            ViewMode::Detail => Vec::new(),
        };

        let options = ObserverOptions {
            threshold: self.config.visibility_threshold,
            root_margin: self.config.root_margin,
        };

        self.observer_generation += 1;
        let (observer, entries) =
            IntersectionObserver::connect(options, targets, self.viewport, self.observer_generation);
        self.observer = Some(observer);
        self.apply_intersections(&entries);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::layout::HEADER_HEIGHT;
    use reqwest::StatusCode;

    fn record(id: CharacterId, name: &str, image: &str) -> CharacterRecord {
        CharacterRecord {
            id,
            name: name.to_string(),
            image: image.to_string(),
            ..Default::default()
        }
    }

    fn harry_and_x() -> Vec<CharacterRecord> {
        vec![
            CharacterRecord {
                house: "Gryffindor".to_string(),
                ..record(1, "Harry Potter", "h.jpg")
            },
            record(2, "X", ""),
        ]
    }

    /// Many cards so that most of them are below the initial viewport
    fn many(count: CharacterId) -> Vec<CharacterRecord> {
        (1..=count)
            .map(|id| record(id, &format!("Character {}", id), "c.jpg"))
            .collect()
    }

    fn loaded(characters: Vec<CharacterRecord>) -> Gallery {
        let mut gallery = Gallery::new(GalleryConfig::default());
        assert!(gallery.begin_load());
        gallery.finish_load(Ok(characters));
        gallery
    }

    #[test]
    fn test_initial_state_is_empty_grid() {
        let gallery = Gallery::new(GalleryConfig::default());
        assert_eq!(gallery.mode(), ViewMode::Grid);
        assert_eq!(gallery.load_state(), LoadState::Idle);
        assert_eq!(gallery.grid_cards().count(), 0);
        assert!(gallery.selected().is_none());
    }

    #[test]
    fn test_fetch_is_claimed_only_once() {
        let mut gallery = Gallery::new(GalleryConfig::default());
        assert!(gallery.begin_load());
        assert!(!gallery.begin_load());
        gallery.finish_load(Ok(Vec::new()));
        assert!(!gallery.begin_load());
    }

    #[test]
    fn test_grid_shows_only_records_with_images() {
        let gallery = loaded(harry_and_x());
        assert_eq!(gallery.characters().len(), 2);

        let cards: Vec<_> = gallery.grid_cards().map(|c| c.id).collect();
        assert_eq!(cards, vec![1]);
        assert_eq!(gallery.observed_cards(), 1);
    }

    #[test]
    fn test_failed_fetch_leaves_grid_empty() {
        let mut gallery = Gallery::new(GalleryConfig::default());
        gallery.begin_load();
        gallery.finish_load(Err(Arc::new(FetchError::Status(
            StatusCode::INTERNAL_SERVER_ERROR,
        ))));

        assert_eq!(gallery.load_state(), LoadState::Failed);
        assert_eq!(gallery.grid_cards().count(), 0);
        assert_eq!(gallery.mode(), ViewMode::Grid);
    }

    #[test]
    fn test_click_opens_detail_and_back_returns_to_grid() {
        let mut gallery = loaded(harry_and_x());

        assert!(gallery.select(1));
        assert_eq!(gallery.mode(), ViewMode::Detail);
        let selected = gallery.selected().unwrap();
        assert_eq!(selected.name, "Harry Potter");
        assert_eq!(selected.house, "Gryffindor");

        assert!(gallery.go_back().is_some());
        assert_eq!(gallery.mode(), ViewMode::Grid);
        assert!(gallery.selected().is_none());
        assert_eq!(gallery.grid_cards().count(), 1);
    }

    #[test]
    fn test_cards_without_image_cannot_be_selected() {
        let mut gallery = loaded(harry_and_x());
        assert!(!gallery.select(2));
        assert!(!gallery.select(99));
        assert_eq!(gallery.mode(), ViewMode::Grid);
    }

    #[test]
    fn test_back_without_selection_does_nothing() {
        let mut gallery = loaded(harry_and_x());
        let generation = gallery.observer_generation();
        assert!(gallery.go_back().is_none());
        assert_eq!(gallery.observer_generation(), generation);
    }

    #[test]
    fn test_selected_card_stays_opaque_when_not_intersecting() {
        let mut gallery = loaded(harry_and_x());
        gallery.select(1);

        gallery.apply_intersections(&[IntersectionEntry {
            id: 1,
            is_intersecting: false,
            ratio: 0.0,
        }]);

        assert_eq!(gallery.card_opacity(1), 1.0);
    }

    #[test]
    fn test_visibility_is_keyed_by_identifier() {
        // Record 2 has no image, so record 3 sits at grid position 1.
        let mut gallery = loaded(vec![
            record(1, "A", "a.jpg"),
            record(2, "B", ""),
            record(3, "C", "c.jpg"),
        ]);
        gallery.select(3);

        gallery.apply_intersections(&[
            IntersectionEntry { id: 1, is_intersecting: false, ratio: 0.0 },
            IntersectionEntry { id: 3, is_intersecting: false, ratio: 0.0 },
        ]);

        assert_eq!(gallery.card_opacity(3), 1.0);
        assert_eq!(gallery.card_opacity(1), 0.0);
    }

    #[test]
    fn test_cards_fade_in_when_scrolled_into_view() {
        let mut gallery = loaded(many(12));
        let layout = *gallery.layout();
        let last_row_card = layout.card_bounds(11);

        // Initially only the first row is at least half on screen
        assert!(gallery.is_animating());
        gallery.tick(Duration::from_secs(1));
        assert_eq!(gallery.card_opacity(1), 1.0);
        assert_eq!(gallery.card_opacity(12), 0.0);

        // Scroll so the last card is fully inside the viewport
        let viewport = Rectangle {
            x: 0.0,
            y: last_row_card.y,
            width: 1280.0,
            height: 900.0,
        };
        gallery.set_viewport(viewport);
        gallery.tick(Duration::from_secs(1));

        assert_eq!(gallery.card_opacity(12), 1.0);
        assert_eq!(gallery.card_opacity(1), 0.0);
    }

    #[test]
    fn test_observer_recreated_on_every_dependency_change() {
        let mut gallery = Gallery::new(GalleryConfig::default());
        let start = gallery.observer_generation();

        gallery.begin_load();
        gallery.finish_load(Ok(harry_and_x()));
        assert_eq!(gallery.observer_generation(), start + 1);

        gallery.select(1);
        assert_eq!(gallery.observer_generation(), start + 2);
        // Nothing is watched while the detail panel is shown
        assert_eq!(gallery.observed_cards(), 0);

        gallery.go_back();
        assert_eq!(gallery.observer_generation(), start + 3);
        assert_eq!(gallery.observed_cards(), 1);

        // Plain scrolling reuses the live observer
        gallery.set_viewport(Rectangle {
            x: 0.0,
            y: 10.0,
            width: 1280.0,
            height: 900.0,
        });
        assert_eq!(gallery.observer_generation(), start + 3);

        // A resize changes the layout and reconnects
        gallery.resize(Size::new(800.0, 600.0));
        assert_eq!(gallery.observer_generation(), start + 4);
    }

    #[test]
    fn test_back_restores_grid_scroll_position() {
        let mut gallery = loaded(many(12));
        gallery.set_viewport(Rectangle {
            x: 0.0,
            y: HEADER_HEIGHT + 400.0,
            width: 1280.0,
            height: 900.0,
        });

        gallery.select(5);
        let restored = gallery.go_back().unwrap();
        assert_eq!(restored.y, HEADER_HEIGHT + 400.0);
    }

    #[test]
    fn test_hover_touches_only_hover_state() {
        let mut gallery = loaded(many(3));
        gallery.tick(Duration::from_secs(1));
        let before: Vec<f32> = (1..=3).map(|id| gallery.card_opacity(id)).collect();

        gallery.hover(2);
        assert!(gallery.is_hovered(2));
        assert!(!gallery.is_hovered(1));
        assert_eq!(gallery.mode(), ViewMode::Grid);
        assert!(gallery.selected().is_none());

        let after: Vec<f32> = (1..=3).map(|id| gallery.card_opacity(id)).collect();
        assert_eq!(before, after);

        // A late exit from a card no longer hovered is ignored
        gallery.hover(3);
        gallery.unhover(2);
        assert_eq!(gallery.hovered(), Some(3));
        gallery.unhover(3);
        assert_eq!(gallery.hovered(), None);
    }
}
