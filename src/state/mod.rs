/// State management module
///
/// This module handles all application state, including:
/// - Shared data structures (data.rs)
/// - Selection, hover and the Grid/Detail state machine (gallery.rs)
/// - Per-card fade animation (visibility.rs)

pub mod data;
pub mod gallery;
pub mod visibility;
