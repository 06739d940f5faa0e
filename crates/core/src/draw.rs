use crate::{color::Color, geometry::Rect};

/// Whether a rectangle is painted solid or as a one-pixel outline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Paint {
    Outline,
    Fill,
}

/// One instruction for the canvas: paint `rect` with `color`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DrawOp {
    pub rect:  Rect,
    pub paint: Paint,
    pub color: Color,
}

impl DrawOp {
    pub const fn outline(rect: Rect, color: Color) -> Self {
        Self { rect, paint: Paint::Outline, color }
    }

    pub const fn fill(rect: Rect, color: Color) -> Self {
        Self { rect, paint: Paint::Fill, color }
    }
}

/// The host's rectangle-fill primitive.
pub trait Canvas {
    fn draw_rectangle(&mut self, rect: Rect, paint: Paint, color: Color);

    /// Replay a sequence of operations in order.
    fn apply(&mut self, ops: &[DrawOp]) {
        for op in ops {
            self.draw_rectangle(op.rect, op.paint, op.color);
        }
    }
}

/// Recording canvas: keeps every operation it receives.
impl Canvas for Vec<DrawOp> {
    fn draw_rectangle(&mut self, rect: Rect, paint: Paint, color: Color) {
        self.push(DrawOp { rect, paint, color });
    }
}
