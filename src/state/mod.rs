/// State management module
///
/// This module handles all application state, including:
/// - The generic ordered list both lists are built on (list.rs)
/// - Panels, staged images and their ids (data.rs)
/// - The composer that applies user actions (composer.rs)
/// - The editor/preview screen selector (view.rs)

pub mod composer;
pub mod data;
pub mod list;
pub mod view;
