/// User interface module
///
/// - Grid geometry for the fixed-size cards (layout.rs)
/// - Viewport intersection observer driving the fade (observer.rs)
/// - Grid card and detail panel widgets (card.rs, detail.rs)
/// - Colors and widget styles (style.rs)

pub mod card;
pub mod detail;
pub mod layout;
pub mod observer;
pub mod style;
