use serde::{Deserialize, Serialize};

/// A pixel rectangle.  Dimensions are never negative; see [`Rect::clamped`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    pub x:      i32,
    pub y:      i32,
    pub width:  u32,
    pub height: u32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }

    /// Build a rectangle from signed dimensions, collapsing negative extents
    /// to zero.  Degenerate layouts produce empty rectangles, never a panic.
    pub fn clamped(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width:  width.max(0).unsigned_abs(),
            height: height.max(0).unsigned_abs(),
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Shift by `(dx, dy)`.
    #[must_use]
    pub fn translate(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
            ..self
        }
    }
}

/// The region a widget occupied on its last draw, relative to the panel.
pub type Area = Rect;

/// Host-owned geometry of the slot a widget is asked to render into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PanelGeometry {
    pub x:      i32,
    pub y:      i32,
    pub width:  u32,
    pub height: u32,
}

impl PanelGeometry {
    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

/// Horizontal anchoring of a widget within the panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    /// Packed from the left edge forward.
    #[default]
    Left,
    /// Packed from the right edge backward.
    Right,
}

/// Where a widget sits on the panel, shared by every widget kind.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Placement {
    /// Name used to address the widget over the command channel.
    pub name:  String,
    pub align: Alignment,
    /// Explicitly pinned x, panel-relative.
    pub x:     Option<i32>,
    /// Explicitly pinned y, panel-relative.
    pub y:     Option<i32>,
}

impl Placement {
    pub fn new(name: impl Into<String>, align: Alignment) -> Self {
        Self {
            name: name.into(),
            align,
            x: None,
            y: None,
        }
    }

    /// Resolve the panel-relative origin of a widget `widget_width` wide.
    pub fn origin(&self, panel: &PanelGeometry, widget_width: i32, offset: i32, align: Alignment) -> (i32, i32) {
        let x = self.x.unwrap_or_else(|| {
            let panel_width = i32::try_from(panel.width).unwrap_or(i32::MAX);
            calculate_offset(panel_width, widget_width, offset, align)
        });
        (x, self.y.unwrap_or(0))
    }
}

/// Slot-allocation convention: left-aligned widgets start at `offset`,
/// right-aligned widgets end `offset` pixels before the right edge.
pub fn calculate_offset(panel_width: i32, widget_width: i32, offset: i32, align: Alignment) -> i32 {
    match align {
        Alignment::Left  => offset,
        Alignment::Right => panel_width.saturating_sub(offset).saturating_sub(widget_width),
    }
}

/// Round half up: `floor(x + 0.5)`, saturating into `i32`.
#[inline]
pub fn round_half_up(x: f64) -> i32 {
    (x + 0.5).floor() as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamped_collapses_negative_extents() {
        let r = Rect::clamped(3, 4, -7, 2);
        assert_eq!(r, Rect::new(3, 4, 0, 2));
        assert!(r.is_empty());
    }

    #[test]
    fn translate_saturates() {
        let r = Rect::new(i32::MAX - 1, i32::MIN + 1, 3, 3).translate(5, -5);
        assert_eq!((r.x, r.y), (i32::MAX, i32::MIN));
    }

    #[test]
    fn right_offset_saturates() {
        assert_eq!(calculate_offset(0, i32::MAX, 10, Alignment::Right), i32::MIN);
    }

    #[test]
    fn left_offset_is_passed_through() {
        assert_eq!(calculate_offset(800, 100, 40, Alignment::Left), 40);
    }

    #[test]
    fn right_offset_packs_from_the_edge() {
        assert_eq!(calculate_offset(800, 100, 0, Alignment::Right), 700);
        assert_eq!(calculate_offset(800, 100, 50, Alignment::Right), 650);
    }

    #[test]
    fn pinned_coordinates_win() {
        let panel = PanelGeometry::new(0, 0, 800, 20);
        let mut placement = Placement::new("pb", Alignment::Right);
        assert_eq!(placement.origin(&panel, 100, 0, Alignment::Right), (700, 0));

        placement.x = Some(5);
        placement.y = Some(3);
        assert_eq!(placement.origin(&panel, 100, 0, Alignment::Right), (5, 3));
    }

    #[test]
    fn rounding_is_half_up_not_to_even() {
        assert_eq!(round_half_up(2.5), 3);
        assert_eq!(round_half_up(3.5), 4);
        assert_eq!(round_half_up(3.49), 3);
        assert_eq!(round_half_up(0.0), 0);
    }
}
