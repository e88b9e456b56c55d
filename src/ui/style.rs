/// Dark page palette and widget styles
use iced::font::{self, Font};
use iced::widget::{button, container};
use iced::{color, Background, Border, Color, Shadow, Theme, Vector};

pub const SERIF: Font = Font {
    family: font::Family::Serif,
    ..Font::DEFAULT
};

pub const SERIF_BOLD: Font = Font {
    family: font::Family::Serif,
    weight: font::Weight::Bold,
    ..Font::DEFAULT
};

pub const PAGE_BACKGROUND: Color = color!(0x1A1A1A);
pub const CARD_BACKGROUND: Color = color!(0x2B2B2B);
pub const CARD_BORDER: Color = color!(0x444444);
pub const CARD_BORDER_HOVERED: Color = color!(0x6C757D);
pub const PLACEHOLDER: Color = color!(0x3A3A3A);
pub const TITLE: Color = Color::WHITE;
/// Gold for character names
pub const NAME: Color = color!(0xFFD700);
pub const DESCRIPTION: Color = color!(0xCCCCCC);
pub const BACK_BUTTON: Color = color!(0x007BFF);
pub const BACK_BUTTON_HOVERED: Color = color!(0x0062CC);

/// Scale a color's alpha by `opacity`
pub fn faded(color: Color, opacity: f32) -> Color {
    Color {
        a: color.a * opacity.clamp(0.0, 1.0),
        ..color
    }
}

fn drop_shadow(opacity: f32, offset: f32, blur_radius: f32, alpha: f32) -> Shadow {
    Shadow {
        color: faded(Color::from_rgba(0.0, 0.0, 0.0, alpha), opacity),
        offset: Vector::new(0.0, offset),
        blur_radius,
    }
}

pub fn page(_theme: &Theme) -> container::Style {
    container::Style {
        background: Some(Background::Color(PAGE_BACKGROUND)),
        text_color: Some(TITLE),
        ..container::Style::default()
    }
}

/// Grid card; hovering deepens the shadow and lightens the border
pub fn card(opacity: f32, hovered: bool) -> container::Style {
    let (border, shadow) = if hovered {
        (CARD_BORDER_HOVERED, drop_shadow(opacity, 8.0, 16.0, 0.6))
    } else {
        (CARD_BORDER, drop_shadow(opacity, 4.0, 8.0, 0.4))
    };

    container::Style {
        background: Some(Background::Color(faded(CARD_BACKGROUND, opacity))),
        border: Border {
            color: faded(border, opacity),
            width: if hovered { 2.0 } else { 1.0 },
            radius: 8.0.into(),
        },
        shadow,
        text_color: Some(faded(DESCRIPTION, opacity)),
    }
}

pub fn detail_panel(_theme: &Theme) -> container::Style {
    container::Style {
        background: Some(Background::Color(CARD_BACKGROUND)),
        border: Border {
            color: CARD_BORDER,
            width: 0.0,
            radius: 8.0.into(),
        },
        shadow: drop_shadow(1.0, 4.0, 8.0, 0.4),
        text_color: Some(DESCRIPTION),
    }
}

/// Stand-in while a portrait is loading or after it failed
pub fn placeholder(opacity: f32) -> container::Style {
    container::Style {
        background: Some(Background::Color(faded(PLACEHOLDER, opacity))),
        text_color: Some(faded(DESCRIPTION, opacity)),
        ..container::Style::default()
    }
}

pub fn back_button(_theme: &Theme, status: button::Status) -> button::Style {
    let background = match status {
        button::Status::Hovered | button::Status::Pressed => BACK_BUTTON_HOVERED,
        _ => BACK_BUTTON,
    };

    button::Style {
        background: Some(Background::Color(background)),
        text_color: Color::WHITE,
        border: Border {
            radius: 5.0.into(),
            ..Border::default()
        },
        shadow: drop_shadow(1.0, 4.0, 8.0, 0.4),
    }
}
