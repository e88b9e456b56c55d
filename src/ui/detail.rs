use iced::widget::{button, column, container, image, text, Column};
use iced::{Alignment, ContentFit, Element, Length};

use super::card::{field_line, placeholder};
use super::style;
use crate::api::portrait::Portrait;
use crate::config::GalleryConfig;
use crate::state::data::CharacterRecord;
use crate::Message;

/// The single large card shown while a record is selected, with the
/// "Go Back" control underneath
pub fn view_detail<'a>(
    record: &'a CharacterRecord,
    portrait: Option<&Portrait>,
    config: &GalleryConfig,
) -> Element<'a, Message> {
    let picture: Element<'a, Message> = match portrait {
        Some(portrait) => image(portrait.full.clone())
            .width(Length::Fill)
            .height(Length::Fixed(config.detail_image_height))
            .content_fit(ContentFit::Cover)
            .into(),
        None => placeholder(&record.name, config.detail_image_height, 1.0),
    };

    let mut details = Column::new().spacing(5).align_x(Alignment::Center);
    details = details.push(
        text(&record.name)
            .size(32)
            .font(style::SERIF_BOLD)
            .color(style::NAME),
    );

    if !record.alternate_names.is_empty() {
        let names = record.alternate_names.join(", ");
        details = details.push(
            text(format!("Alternate Names: {}", names))
                .font(style::SERIF)
                .size(16)
                .color(style::DESCRIPTION),
        );
    }

    for (label, value) in record.fields() {
        details = details.push(field_line(label, value, 1.0));
    }

    let panel = container(column![picture, details.padding(20)].spacing(10))
        .width(Length::Fixed(config.detail_width))
        .padding(20)
        .style(style::detail_panel);

    let back = button(text("GO BACK").font(style::SERIF).size(16))
        .on_press(Message::GoBack)
        .padding([10, 20])
        .style(style::back_button);

    column![panel, back]
        .spacing(20)
        .align_x(Alignment::Center)
        .into()
}
