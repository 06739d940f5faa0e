pub mod progressbar;

pub use progressbar::{Bar, BarColors, ProgressBar};

use pbar_config::WidgetConfig;
use pbar_core::{BarError, Result, Widget};
use pbar_theme::Theme;

/// Instantiate the widget described by `cfg`.
pub fn build(cfg: &WidgetConfig, theme: &Theme) -> Result<Box<dyn Widget>> {
    match cfg.kind.as_str() {
        ProgressBar::KIND => Ok(Box::new(ProgressBar::new(
            cfg.placement(),
            &cfg.options()?,
            theme,
        ))),
        other => Err(BarError::Widget(format!("unknown widget kind '{other}'"))),
    }
}
