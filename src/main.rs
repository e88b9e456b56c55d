use iced::widget::scrollable::{AbsoluteOffset, Viewport};
use iced::widget::{container, scrollable, text};
use iced::{Element, Length, Rectangle, Size, Subscription, Task, Theme};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;

mod api;
mod config;
mod error;
mod state;
mod ui;

use api::portrait::Portrait;
use config::GalleryConfig;
use error::{FetchError, PortraitError};
use state::data::{CharacterId, CharacterRecord};
use state::gallery::{Gallery, ViewMode};
use ui::layout::HEADER_HEIGHT;

const TITLE: &str = "Harry Potter Characters";

/// Interval between fade animation frames
const FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Main application state
struct CharacterGallery {
    gallery: Gallery,
    client: reqwest::Client,
    /// Time of the previous animation frame; `None` whenever no fade runs
    last_frame: Option<Instant>,
}

/// Application messages (events)
#[derive(Debug, Clone)]
pub enum Message {
    /// The one-time collection fetch finished
    CharactersLoaded(Result<Vec<CharacterRecord>, Arc<FetchError>>),
    /// A card portrait finished downloading
    PortraitLoaded(CharacterId, Result<Portrait, Arc<PortraitError>>),
    CardClicked(CharacterId),
    GoBack,
    CardHovered(CharacterId),
    CardUnhovered(CharacterId),
    /// The page scrolled
    Scrolled(Viewport),
    WindowResized(Size),
    /// Fade animation frame
    Frame(Instant),
}

fn scroll_id() -> scrollable::Id {
    scrollable::Id::new("character-gallery")
}

impl CharacterGallery {
    /// Create the application and start the one-time fetch
    fn new(config: GalleryConfig) -> (Self, Task<Message>) {
        let endpoint = config.endpoint.clone();
        let mut app = CharacterGallery {
            gallery: Gallery::new(config),
            client: reqwest::Client::new(),
            last_frame: None,
        };

        let task = if app.gallery.begin_load() {
            Task::perform(
                api::characters::load_characters(app.client.clone(), endpoint),
                |result| Message::CharactersLoaded(result.map_err(Arc::new)),
            )
        } else {
            Task::none()
        };

        (app, task)
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        // Fades can settle without a final frame, e.g. after a reset
        if !self.gallery.is_animating() {
            self.last_frame = None;
        }

        match message {
            Message::CharactersLoaded(result) => {
                let loaded = result.is_ok();
                self.gallery.finish_load(result);

                if loaded {
                    return self.load_portraits();
                }
                Task::none()
            }
            Message::PortraitLoaded(id, result) => {
                match result {
                    Ok(portrait) => self.gallery.set_portrait(id, portrait),
                    Err(e) => tracing::warn!("No portrait for character {}: {}", id, e),
                }
                Task::none()
            }
            Message::CardClicked(id) => {
                if self.gallery.select(id) {
                    return scrollable::scroll_to(scroll_id(), AbsoluteOffset { x: 0.0, y: 0.0 });
                }
                Task::none()
            }
            Message::GoBack => match self.gallery.go_back() {
                Some(offset) => scrollable::scroll_to(
                    scroll_id(),
                    AbsoluteOffset {
                        x: offset.x,
                        y: offset.y,
                    },
                ),
                None => Task::none(),
            },
            Message::CardHovered(id) => {
                self.gallery.hover(id);
                Task::none()
            }
            Message::CardUnhovered(id) => {
                self.gallery.unhover(id);
                Task::none()
            }
            Message::Scrolled(viewport) => {
                let offset = viewport.absolute_offset();
                let bounds = viewport.bounds();
                self.gallery.set_viewport(Rectangle {
                    x: offset.x,
                    y: offset.y,
                    width: bounds.width,
                    height: bounds.height,
                });
                Task::none()
            }
            Message::WindowResized(size) => {
                self.gallery.resize(size);
                Task::none()
            }
            Message::Frame(now) => {
                let elapsed = self
                    .last_frame
                    .map(|last| now.saturating_duration_since(last))
                    .unwrap_or(FRAME_INTERVAL);

                self.last_frame = if self.gallery.tick(elapsed) {
                    Some(now)
                } else {
                    None
                };
                Task::none()
            }
        }
    }

    /// Download every grid card's portrait in the background
    fn load_portraits(&self) -> Task<Message> {
        let config = self.gallery.config();
        let card_size = (
            config.card_width.round() as u32,
            config.card_image_height.round() as u32,
        );

        let downloads: Vec<Task<Message>> = self
            .gallery
            .grid_cards()
            .map(|record| {
                let id = record.id;
                Task::perform(
                    api::portrait::fetch_portrait(self.client.clone(), record.image.clone(), card_size),
                    move |result| Message::PortraitLoaded(id, result.map_err(Arc::new)),
                )
            })
            .collect();

        Task::batch(downloads)
    }

    /// Build the user interface
    fn view(&self) -> Element<'_, Message> {
        let config = self.gallery.config();

        let header = container(
            text(TITLE)
                .size(40)
                .font(ui::style::SERIF)
                .color(ui::style::TITLE),
        )
        .width(Length::Fill)
        .height(Length::Fixed(HEADER_HEIGHT))
        .center_x(Length::Fill)
        .center_y(Length::Fixed(HEADER_HEIGHT));

        let body: Element<'_, Message> = match (self.gallery.mode(), self.gallery.selected()) {
            (ViewMode::Detail, Some(record)) => container(ui::detail::view_detail(
                record,
                self.gallery.portrait(record.id),
                config,
            ))
            .center_x(Length::Fill)
            .into(),
            _ => {
                let cards: Vec<Element<'_, Message>> = self
                    .gallery
                    .grid_cards()
                    .map(|record| {
                        ui::card::view_card(
                            record,
                            self.gallery.portrait(record.id),
                            self.gallery.card_opacity(record.id),
                            self.gallery.is_hovered(record.id),
                            config,
                        )
                    })
                    .collect();

                ui::layout::grid(cards, config.card_spacing)
            }
        };

        let page = scrollable(ui::layout::page(header, body))
            .id(scroll_id())
            .on_scroll(Message::Scrolled)
            .width(Length::Fill)
            .height(Length::Fill);

        container(page)
            .width(Length::Fill)
            .height(Length::Fill)
            .style(ui::style::page)
            .into()
    }

    fn subscription(&self) -> Subscription<Message> {
        let resize = iced::window::resize_events().map(|(_id, size)| Message::WindowResized(size));

        if self.gallery.is_animating() {
            Subscription::batch([resize, iced::time::every(FRAME_INTERVAL).map(Message::Frame)])
        } else {
            resize
        }
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        Theme::Dark
    }
}

fn main() -> iced::Result {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = GalleryConfig::load();
    let window_size = Size::new(config.window_width, config.window_height);

    tracing::info!("Starting {} against {}", TITLE, config.endpoint);

    iced::application(TITLE, CharacterGallery::update, CharacterGallery::view)
        .subscription(CharacterGallery::subscription)
        .theme(CharacterGallery::theme)
        .window_size(window_size)
        .centered()
        .run_with(move || CharacterGallery::new(config))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app_with_cards(count: CharacterId) -> CharacterGallery {
        let (mut app, _) = CharacterGallery::new(GalleryConfig::default());
        let records = (1..=count)
            .map(|id| CharacterRecord {
                id,
                name: format!("Character {}", id),
                image: "c.jpg".to_string(),
                ..Default::default()
            })
            .collect();
        let _ = app.update(Message::CharactersLoaded(Ok(records)));
        app
    }

    #[test]
    fn test_first_frame_of_a_fade_advances_one_interval() {
        let mut app = app_with_cards(6);
        let start = Instant::now();

        let _ = app.update(Message::Frame(start));
        assert_eq!(app.last_frame, Some(start));

        // The first row settles without another frame being delivered
        app.gallery.tick(Duration::from_secs(1));
        assert!(!app.gallery.is_animating());

        // Much later a taller window brings the second row into view
        let _ = app.update(Message::WindowResized(Size::new(1280.0, 2000.0)));
        assert!(app.gallery.is_animating());
        assert_eq!(app.last_frame, None);

        let _ = app.update(Message::Frame(start + Duration::from_secs(10)));
        let opacity = app.gallery.card_opacity(4);
        assert!(opacity > 0.0 && opacity < 0.1, "opacity jumped to {}", opacity);
    }

    #[test]
    fn test_frames_stop_with_the_last_fade() {
        let mut app = app_with_cards(3);
        let start = Instant::now();

        let _ = app.update(Message::Frame(start));
        let _ = app.update(Message::Frame(start + Duration::from_secs(1)));

        assert!(!app.gallery.is_animating());
        assert_eq!(app.last_frame, None);
        assert_eq!(app.gallery.card_opacity(1), 1.0);
    }
}
