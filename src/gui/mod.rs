//! GUI module
//!
//! Provides the terminal control surface, the preview surface and the owner
//! loop that connects them to the presentation coordinator.

pub mod gui_controller;
pub mod surface;
pub mod tray;

pub use gui_controller::GuiController;
