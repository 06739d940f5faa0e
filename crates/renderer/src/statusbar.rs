use pbar_config::BarConfig;
use pbar_core::{Alignment, Area, BarError, Canvas, Color, DrawOp, PanelGeometry, Result, Widget};
use pbar_theme::Theme;
use tracing::{debug, warn};

/// One horizontal panel holding an ordered list of widgets.
#[derive(Debug)]
pub struct Statusbar {
    name:       String,
    geometry:   PanelGeometry,
    background: Color,
    widgets:    Vec<Box<dyn Widget>>,
    /// Area of each widget from the last draw, index-aligned with `widgets`.
    areas:      Vec<Option<Area>>,
}

impl Statusbar {
    pub fn new(name: impl Into<String>, geometry: PanelGeometry, background: Color) -> Self {
        Self {
            name: name.into(),
            geometry,
            background,
            widgets: Vec::new(),
            areas: Vec::new(),
        }
    }

    /// Build the statusbar and all its widgets.  Widgets that fail to build
    /// are logged and left out.
    pub fn from_config(cfg: &BarConfig, theme: &Theme) -> Self {
        let geometry = PanelGeometry::new(0, 0, cfg.global.width, cfg.global.height);
        let mut bar = Self::new(cfg.global.name.clone(), geometry, theme.background);

        for widget_cfg in &cfg.widgets {
            match pbar_widgets::build(widget_cfg, theme) {
                Ok(widget) => bar.push(widget),
                Err(e) => warn!("statusbar '{}': skipping {} widget: {e}", bar.name, widget_cfg.kind),
            }
        }

        bar
    }

    pub fn push(&mut self, widget: Box<dyn Widget>) {
        self.widgets.push(widget);
        self.areas.push(None);
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn geometry(&self) -> PanelGeometry {
        self.geometry
    }

    pub fn widgets(&self) -> &[Box<dyn Widget>] {
        &self.widgets
    }

    /// Area the named widget occupied on the last draw.
    pub fn area(&self, widget: &str) -> Option<Area> {
        let idx = self.position(widget)?;
        self.areas[idx]
    }

    /// Forward `command` to the named widget.
    pub fn tell(&mut self, widget: &str, command: &str) -> Result<()> {
        let idx = self.position(widget).ok_or_else(|| {
            BarError::Widget(format!("statusbar '{}' has no widget named '{widget}'", self.name))
        })?;
        debug!("tell {widget}: {command}");
        self.widgets[idx].tell(command);
        Ok(())
    }

    /// Clear the panel and draw every widget.
    ///
    /// Left-aligned widgets are packed in configured order from the left
    /// edge; right-aligned ones in reverse order from the right edge, so the
    /// first configured right widget ends up leftmost.
    pub fn draw(&mut self, canvas: &mut dyn Canvas) {
        canvas.apply(&[DrawOp::fill(self.geometry.rect(), self.background)]);

        let mut left = 0i32;
        for idx in 0..self.widgets.len() {
            if self.widgets[idx].placement().align == Alignment::Left {
                left = left.saturating_add(self.draw_widget(idx, left, canvas));
            }
        }

        let mut right = 0i32;
        for idx in (0..self.widgets.len()).rev() {
            if self.widgets[idx].placement().align == Alignment::Right {
                right = right.saturating_add(self.draw_widget(idx, right, canvas));
            }
        }
    }

    fn draw_widget(&mut self, idx: usize, offset: i32, canvas: &mut dyn Canvas) -> i32 {
        let layout = self.widgets[idx].layout(&self.geometry, offset);
        canvas.apply(&layout.ops);
        self.areas[idx] = layout.area;
        i32::try_from(layout.width).unwrap_or(i32::MAX)
    }

    fn position(&self, widget: &str) -> Option<usize> {
        self.widgets.iter().position(|w| w.name() == widget)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pbar_config::{BarSection, ProgressbarConfig};
    use pbar_core::{Paint, Placement, Rect};
    use pbar_widgets::ProgressBar;

    fn progressbar(name: &str, align: Alignment, width: i32, bars: usize) -> Box<dyn Widget> {
        let cfg = ProgressbarConfig {
            width,
            bars: vec![BarSection::default(); bars],
            height: 1.0,
            gap: 0,
            padding_left: 0,
        };
        Box::new(ProgressBar::new(Placement::new(name, align), &cfg, &Theme::default()))
    }

    fn statusbar() -> Statusbar {
        Statusbar::new("main", PanelGeometry::new(0, 0, 500, 10), Color::BLACK)
    }

    #[test]
    fn background_is_painted_first() {
        let mut bar = statusbar();
        bar.push(progressbar("a", Alignment::Left, 50, 1));
        let mut ops: Vec<DrawOp> = Vec::new();
        bar.draw(&mut ops);

        assert_eq!(ops[0], DrawOp::fill(Rect::new(0, 0, 500, 10), Color::BLACK));
        assert_eq!(ops[1].paint, Paint::Outline);
    }

    #[test]
    fn left_widgets_pack_forward() {
        let mut bar = statusbar();
        bar.push(progressbar("a", Alignment::Left, 100, 1));
        bar.push(progressbar("empty", Alignment::Left, 80, 0));
        bar.push(progressbar("b", Alignment::Left, 50, 1));
        bar.draw(&mut Vec::<DrawOp>::new());

        assert_eq!(bar.area("a"), Some(Rect::new(0, 0, 100, 10)));
        assert_eq!(bar.area("empty"), None);
        assert_eq!(bar.area("b"), Some(Rect::new(100, 0, 50, 10)));
    }

    #[test]
    fn right_widgets_pack_backward() {
        let mut bar = statusbar();
        bar.push(progressbar("first", Alignment::Right, 100, 1));
        bar.push(progressbar("left", Alignment::Left, 30, 1));
        bar.push(progressbar("last", Alignment::Right, 50, 1));
        bar.draw(&mut Vec::<DrawOp>::new());

        assert_eq!(bar.area("last"), Some(Rect::new(450, 0, 50, 10)));
        assert_eq!(bar.area("first"), Some(Rect::new(350, 0, 100, 10)));
        assert_eq!(bar.area("left"), Some(Rect::new(0, 0, 30, 10)));
    }

    #[test]
    fn tell_routes_by_name() {
        let mut bar = statusbar();
        bar.push(progressbar("a", Alignment::Left, 102, 1));
        bar.tell("a", "50").unwrap();

        let mut ops: Vec<DrawOp> = Vec::new();
        bar.draw(&mut ops);
        // background, border, fill, remainder
        assert_eq!(ops.len(), 4);
        assert_eq!(ops[2].rect.width, 50);
    }

    #[test]
    fn tell_unknown_widget_fails() {
        let mut bar = statusbar();
        let err = bar.tell("nope", "10").unwrap_err();
        assert!(matches!(err, BarError::Widget(_)));
    }

    #[test]
    fn from_config_skips_bad_widgets() {
        let cfg = pbar_config::parse(
            r#"
[global]
width = 300
height = 16

[[widgets]]
kind = "clock"

[[widgets]]
kind = "progressbar"
name = "load"

[[widgets.bar]]
fg = "red"
"#,
        )
        .unwrap();

        let bar = Statusbar::from_config(&cfg, &Theme::default());
        assert_eq!(bar.widgets().len(), 1);
        assert_eq!(bar.widgets()[0].name(), "load");
        assert_eq!(bar.geometry(), PanelGeometry::new(0, 0, 300, 16));
    }
}
