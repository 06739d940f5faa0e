pub mod colors;

use pbar_config::ThemeConfig;
use pbar_core::Color;

const DEFAULT_FG: Color = Color::rgb(0xee, 0xee, 0xee);
const DEFAULT_BG: Color = Color::rgb(0x11, 0x11, 0x11);

/// Ambient colors derived from [`ThemeConfig`].
///
/// [`Theme::from_config`] is infallible: invalid color strings fall back to
/// the built-in defaults with a warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub foreground: Color,
    pub background: Color,
}

impl Theme {
    /// Build a [`Theme`] from the config file's `[theme]` section.
    pub fn from_config(cfg: &ThemeConfig) -> Self {
        Self {
            foreground: resolve(Some(&cfg.fg), DEFAULT_FG),
            background: resolve(Some(&cfg.bg), DEFAULT_BG),
        }
    }

    /// Resolve an optional color string, falling back to `fallback` when it is
    /// unset or cannot be parsed.
    pub fn color(&self, spec: Option<&str>, fallback: Color) -> Color {
        resolve(spec, fallback)
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::from_config(&ThemeConfig::default())
    }
}

fn resolve(spec: Option<&str>, fallback: Color) -> Color {
    match spec {
        None => fallback,
        Some(s) => colors::parse(s).unwrap_or_else(|| {
            tracing::warn!("unknown color '{s}', using {}", fallback.to_hex());
            fallback
        }),
    }
}
