//! Layout and drawing engine for the statusbar.
//!
//! - [`Statusbar`] owns the widgets, packs them left and right, and routes
//!   commands to them by name.
//! - [`FrameCanvas`] replays draw operations onto an Iced canvas frame, and
//!   [`DrawList`] wraps a recorded operation list as a canvas program.

pub mod canvas;
pub mod statusbar;

pub use canvas::{DrawList, FrameCanvas};
pub use statusbar::Statusbar;
