pub mod color;
pub mod draw;
pub mod error;
pub mod geometry;
pub mod widget;

pub use color::Color;
pub use draw::{Canvas, DrawOp, Paint};
pub use error::{BarError, Result};
pub use geometry::{calculate_offset, round_half_up, Alignment, Area, PanelGeometry, Placement, Rect};
pub use widget::{Layout, Widget};
