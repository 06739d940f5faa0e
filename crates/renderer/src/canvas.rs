use iced::widget::canvas::{self, Frame, Path, Stroke};
use iced::{mouse, Point, Rectangle, Renderer, Size, Theme};
use pbar_core::{Canvas, Color, DrawOp, Paint, Rect};
use pbar_theme::colors::to_iced;

/// [`Canvas`] backed by an Iced canvas frame.
pub struct FrameCanvas<'a> {
    frame: &'a mut Frame,
}

impl<'a> FrameCanvas<'a> {
    pub fn new(frame: &'a mut Frame) -> Self {
        Self { frame }
    }
}

impl Canvas for FrameCanvas<'_> {
    fn draw_rectangle(&mut self, rect: Rect, paint: Paint, color: Color) {
        if rect.is_empty() {
            return;
        }
        let color = to_iced(color);
        match paint {
            Paint::Fill => {
                let area = fill_bounds(rect);
                self.frame.fill_rectangle(area.position(), area.size(), color);
            }
            Paint::Outline => {
                let area = outline_bounds(rect);
                let path = Path::rectangle(area.position(), area.size());
                self.frame
                    .stroke(&path, Stroke::default().with_color(color).with_width(1.0));
            }
        }
    }
}

/// A recorded operation list, drawn as a canvas program.
#[derive(Debug, Clone, Copy)]
pub struct DrawList<'a> {
    ops: &'a [DrawOp],
}

impl<'a> DrawList<'a> {
    pub fn new(ops: &'a [DrawOp]) -> Self {
        Self { ops }
    }
}

impl<Message> canvas::Program<Message> for DrawList<'_> {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<canvas::Geometry> {
        let mut frame = Frame::new(renderer, bounds.size());
        FrameCanvas::new(&mut frame).apply(self.ops);
        vec![frame.into_geometry()]
    }
}

fn fill_bounds(rect: Rect) -> Rectangle {
    Rectangle::new(
        Point::new(rect.x as f32, rect.y as f32),
        Size::new(rect.width as f32, rect.height as f32),
    )
}

/// A 1px stroke is centred on its path, so the path runs through pixel
/// centres to keep the outline inside `rect`.
fn outline_bounds(rect: Rect) -> Rectangle {
    Rectangle::new(
        Point::new(rect.x as f32 + 0.5, rect.y as f32 + 0.5),
        Size::new(rect.width as f32 - 1.0, rect.height as f32 - 1.0),
    )
}
