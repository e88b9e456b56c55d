/// Grid geometry
///
/// Cards have a fixed size and flow left to right, wrapping into rows.
/// `card_bounds` computes where each card sits inside the scroll content
/// so the intersection observer can work without a layout pass. `page` and
/// `grid` build the widgets that geometry describes.

use iced::advanced;
use iced::widget::Column;
use iced::{Alignment, Element, Length, Pixels, Rectangle};

use crate::config::GalleryConfig;

/// Padding around the whole page
pub const PAGE_PADDING: f32 = 20.0;

/// Height reserved for the page title above the grid
pub const HEADER_HEIGHT: f32 = 100.0;

/// Height of an empty grid line before its first card
pub const WRAP_LINE_MINIMAL_LENGTH: f32 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridLayout {
    columns: usize,
    /// Drop before the first row when no card fits on a line
    first_row_offset: f32,
    card_width: f32,
    card_height: f32,
    spacing: f32,
}

impl GridLayout {
    /// Lay out cards for a scroll viewport `viewport_width` pixels wide.
    /// The scrollbar floats over the content and takes no width.
    pub fn new(config: &GalleryConfig, viewport_width: f32) -> Self {
        let available = (viewport_width - 2.0 * PAGE_PADDING).max(0.0);
        let stride = config.card_width + config.card_spacing;

        // A card is placed on the current line only if it fits together
        // with the spacing that follows it
        let fitting = (available / stride).floor() as usize;

        // Even the first card overflows: it wraps below an empty line
        let first_row_offset = if fitting == 0 {
            WRAP_LINE_MINIMAL_LENGTH + config.card_spacing
        } else {
            0.0
        };

        Self {
            columns: fitting.max(1),
            first_row_offset,
            card_width: config.card_width,
            card_height: config.card_height(),
            spacing: config.card_spacing,
        }
    }

    #[cfg(test)]
    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Rectangle of the card at `index` in scroll-content coordinates
    pub fn card_bounds(&self, index: usize) -> Rectangle {
        let row = index / self.columns;
        let column = index % self.columns;

        Rectangle {
            x: PAGE_PADDING + column as f32 * (self.card_width + self.spacing),
            y: HEADER_HEIGHT
                + PAGE_PADDING
                + self.first_row_offset
                + row as f32 * (self.card_height + self.spacing),
            width: self.card_width,
            height: self.card_height,
        }
    }
}

/// Scroll content: `header` above `body`, inside the page padding
pub fn page<'a, Message, Theme, Renderer>(
    header: impl Into<Element<'a, Message, Theme, Renderer>>,
    body: impl Into<Element<'a, Message, Theme, Renderer>>,
) -> Column<'a, Message, Theme, Renderer>
where
    Message: 'a,
    Theme: 'a,
    Renderer: advanced::Renderer + 'a,
{
    Column::with_children([header.into(), body.into()])
        .padding(PAGE_PADDING)
        .width(Length::Fill)
        .align_x(Alignment::Start)
}

/// Flow `cards` into rows with `spacing` between them in both directions
pub fn grid<'a, Message, Theme, Renderer>(
    cards: Vec<Element<'a, Message, Theme, Renderer>>,
    spacing: f32,
) -> Element<'a, Message, Theme, Renderer>
where
    Message: 'a,
    Theme: 'a,
    Renderer: advanced::Renderer + 'a,
{
    iced_aw::Wrap::with_elements(cards)
        .spacing(Pixels(spacing))
        .line_spacing(Pixels(spacing))
        .line_minimal_length(WRAP_LINE_MINIMAL_LENGTH)
        .into()
}
