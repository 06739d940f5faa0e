use crate::{
    draw::DrawOp,
    geometry::{Area, PanelGeometry, Placement},
};

/// Result of laying a widget out for one redraw.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Layout {
    /// Horizontal space consumed, used to pack the next sibling.
    pub width: u32,
    /// Panel-relative area, `None` for widgets that render nothing.
    pub area:  Option<Area>,
    /// Operations to replay in order; later ones paint over earlier ones.
    pub ops:   Vec<DrawOp>,
}

impl Layout {
    /// A widget that occupies no space and draws nothing.
    pub fn empty() -> Self {
        Self::default()
    }
}

/// Every widget kind placed on a statusbar implements this trait.
///
/// Layout is a pure function of the widget's state and the panel; the only
/// mutation path is [`Widget::tell`], driven by the command channel.  The host
/// serialises calls, so no internal locking is needed.
pub trait Widget: Send + Sync + std::fmt::Debug {
    /// Widget type identifier, e.g. `"progressbar"`.
    fn kind(&self) -> &'static str;

    fn placement(&self) -> &Placement;

    /// Unique name used to address the widget.
    fn name(&self) -> &str {
        &self.placement().name
    }

    /// Compute draw operations for the current state.
    fn layout(&self, panel: &PanelGeometry, offset: i32) -> Layout;

    /// Apply a textual update.  Malformed input degrades silently.
    fn tell(&mut self, _command: &str) {}
}
