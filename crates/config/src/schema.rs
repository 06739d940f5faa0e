use pbar_core::{Alignment, BarError, Placement, Result};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure parsed from `pbar.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BarConfig {
    /// Panel settings.
    pub global: GlobalConfig,
    /// Ambient colors.
    pub theme: ThemeConfig,
    /// Widgets in configured order.
    pub widgets: Vec<WidgetConfig>,
}

impl Default for BarConfig {
    fn default() -> Self {
        let mut progress = WidgetConfig::new("progressbar");
        progress.name = Some("progress".to_string());
        progress.align = Alignment::Right;
        progress.options.insert(
            "bar".to_string(),
            toml::Value::Array(vec![toml::Value::Table(toml::Table::new())]),
        );

        Self {
            global: GlobalConfig::default(),
            theme: ThemeConfig::default(),
            widgets: vec![progress],
        }
    }
}

/// Statusbar settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobalConfig {
    /// Statusbar name, used in log lines.
    pub name: String,
    /// Panel width in pixels.
    pub width: u32,
    /// Panel height in pixels.
    pub height: u32,
    /// Whether the panel sits at the top or the bottom of the output.
    pub position: Position,
    /// Reserve an exclusive zone so windows don't overlap the panel.
    pub exclusive_zone: bool,
    /// Command socket path.  `None` = `$XDG_RUNTIME_DIR/pbar/pbar.sock`.
    pub socket: Option<PathBuf>,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            name: "main".to_string(),
            width: 1280,
            height: 20,
            position: Position::Top,
            exclusive_zone: true,
            socket: None,
        }
    }
}

/// Panel position on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Position {
    #[default]
    Top,
    Bottom,
}

/// Ambient colors; widgets fall back to these when a color is not set.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    /// Foreground color (hex, e.g. `"#eeeeee"`, or a color name).
    pub fg: String,
    /// Background color, also used to clear the panel.
    pub bg: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            fg: "#eeeeee".to_string(),
            bg: "#111111".to_string(),
        }
    }
}

/// Config block for a single widget instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WidgetConfig {
    /// Widget type identifier, e.g. `"progressbar"`.
    pub kind: String,
    /// Name used on the command channel; defaults to `kind`.
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub align: Alignment,
    /// Pinned x position (panel-relative).
    #[serde(default)]
    pub x: Option<i32>,
    /// Pinned y position (panel-relative).
    #[serde(default)]
    pub y: Option<i32>,
    /// Kind-specific options, decoded by the widget via [`WidgetConfig::options`].
    #[serde(default, flatten)]
    pub options: toml::Table,
}

impl WidgetConfig {
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            name: None,
            align: Alignment::Left,
            x: None,
            y: None,
            options: toml::Table::new(),
        }
    }

    pub fn placement(&self) -> Placement {
        Placement {
            name:  self.name.clone().unwrap_or_else(|| self.kind.clone()),
            align: self.align,
            x:     self.x,
            y:     self.y,
        }
    }

    /// Decode the kind-specific options into `T`.
    pub fn options<T: DeserializeOwned>(&self) -> Result<T> {
        toml::Value::Table(self.options.clone())
            .try_into()
            .map_err(|e| BarError::Config(format!("{} options: {e}", self.kind)))
    }
}

/// Options of a `progressbar` widget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgressbarConfig {
    /// Total widget width in pixels, padding included.
    pub width: i32,
    /// One section per stacked bar, top to bottom.
    #[serde(rename = "bar")]
    pub bars: Vec<BarSection>,
    /// Fraction of the panel height the stack occupies, in `(0, 1]`.
    pub height: f64,
    /// Pixels between stacked bars.
    pub gap: i32,
    /// Pixels reserved before the bar interior.
    pub padding_left: i32,
}

impl Default for ProgressbarConfig {
    fn default() -> Self {
        Self {
            width: 100,
            bars: Vec::new(),
            height: 0.67,
            gap: 2,
            padding_left: 0,
        }
    }
}

/// Colors of one bar; unset fields fall back to the theme.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BarSection {
    pub fg: Option<String>,
    pub bg: Option<String>,
    pub bordercolor: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r##"
[global]
width = 800
height = 24
position = "bottom"

[[widgets]]
kind = "progressbar"
name = "load"
align = "right"
y = 2
width = 60
gap = 1
height = 1.0

[[widgets.bar]]
fg = "#00ff00"

[[widgets.bar]]
bg = "black"
bordercolor = "white"
"##;

    #[test]
    fn parse_progressbar_widget() {
        let cfg: BarConfig = toml::from_str(SAMPLE).unwrap();
        assert_eq!(cfg.global.width, 800);
        assert_eq!(cfg.global.name, "main");
        assert_eq!(cfg.global.position, Position::Bottom);
        assert!(cfg.global.exclusive_zone);
        assert_eq!(cfg.widgets.len(), 1);

        let w = &cfg.widgets[0];
        let placement = w.placement();
        assert_eq!(placement.name, "load");
        assert_eq!(placement.align, Alignment::Right);
        assert_eq!((placement.x, placement.y), (None, Some(2)));

        let pb: ProgressbarConfig = w.options().unwrap();
        assert_eq!(pb.width, 60);
        assert_eq!(pb.gap, 1);
        assert_eq!(pb.padding_left, 0);
        assert_eq!(pb.height, 1.0);
        assert_eq!(pb.bars.len(), 2);
        assert_eq!(pb.bars[0].fg.as_deref(), Some("#00ff00"));
        assert_eq!(pb.bars[0].bordercolor, None);
        assert_eq!(pb.bars[1].bordercolor.as_deref(), Some("white"));
    }

    #[test]
    fn progressbar_defaults_apply() {
        let w = WidgetConfig::new("progressbar");
        let pb: ProgressbarConfig = w.options().unwrap();
        assert_eq!(pb, ProgressbarConfig::default());
        assert_eq!(w.placement().name, "progressbar");
    }

    #[test]
    fn bad_option_type_is_config_error() {
        let mut w = WidgetConfig::new("progressbar");
        w.options.insert("gap".into(), toml::Value::String("wide".into()));
        let err = w.options::<ProgressbarConfig>().unwrap_err();
        assert!(matches!(err, BarError::Config(_)));
    }

    #[test]
    fn default_config_has_one_bar() {
        let cfg = BarConfig::default();
        let pb: ProgressbarConfig = cfg.widgets[0].options().unwrap();
        assert_eq!(pb.bars, vec![BarSection::default()]);
    }
}
