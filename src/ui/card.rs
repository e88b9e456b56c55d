use iced::widget::{column, container, image, mouse_area, row, text, Column};
use iced::{mouse, Alignment, ContentFit, Element, Length};

use super::style;
use crate::api::portrait::Portrait;
use crate::config::GalleryConfig;
use crate::state::data::CharacterRecord;
use crate::Message;

/// One grid card: portrait, gold name and the descriptive fields.
/// Every color is scaled by `opacity` to produce the fade.
pub fn view_card<'a>(
    record: &'a CharacterRecord,
    portrait: Option<&Portrait>,
    opacity: f32,
    hovered: bool,
    config: &GalleryConfig,
) -> Element<'a, Message> {
    let picture: Element<'a, Message> = match portrait {
        Some(portrait) => image(portrait.card.clone())
            .width(Length::Fill)
            .height(Length::Fixed(config.card_image_height))
            .content_fit(ContentFit::Cover)
            .opacity(opacity)
            .into(),
        None => placeholder(&record.name, config.card_image_height, opacity),
    };

    let details = Column::with_children(
        record
            .fields()
            .into_iter()
            .map(|(label, value)| field_line(label, value, opacity)),
    )
    .spacing(5);

    let body = column![
        text(&record.name)
            .size(24)
            .font(style::SERIF_BOLD)
            .color(style::faded(style::NAME, opacity)),
        details,
    ]
    .spacing(10)
    .padding(20)
    .align_x(Alignment::Center);

    let card = container(column![picture, body])
        .width(Length::Fixed(config.card_width))
        .height(Length::Fixed(config.card_height()))
        .clip(true)
        .style(move |_theme| style::card(opacity, hovered));

    mouse_area(card)
        .on_press(Message::CardClicked(record.id))
        .on_enter(Message::CardHovered(record.id))
        .on_exit(Message::CardUnhovered(record.id))
        .interaction(mouse::Interaction::Pointer)
        .into()
}

/// "Label: value" with the label in bold
pub fn field_line<'a>(label: &'a str, value: &'a str, opacity: f32) -> Element<'a, Message> {
    let color = style::faded(style::DESCRIPTION, opacity);

    row![
        text(format!("{}:", label)).font(style::SERIF_BOLD).size(16).color(color),
        text(value).font(style::SERIF).size(16).color(color),
    ]
    .spacing(6)
    .into()
}

/// Panel shown where a portrait is missing
pub fn placeholder<'a>(name: &'a str, height: f32, opacity: f32) -> Element<'a, Message> {
    let initial = name.chars().next().map(String::from).unwrap_or_default();

    container(text(initial).size(64).font(style::SERIF))
        .width(Length::Fill)
        .height(Length::Fixed(height))
        .center_x(Length::Fill)
        .center_y(Length::Fixed(height))
        .style(move |_theme| style::placeholder(opacity))
        .into()
}
