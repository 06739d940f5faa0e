use pbar_config::ProgressbarConfig;
use pbar_core::{
    round_half_up, Alignment, Color, DrawOp, Layout, PanelGeometry, Placement, Rect, Widget,
};
use pbar_theme::Theme;

/// Colors of one stacked bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BarColors {
    pub foreground: Color,
    pub background: Color,
    pub border:     Color,
}

/// One stacked bar: its current value and how it is painted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bar {
    /// Always within `0..=100`.
    pub percent: u8,
    pub colors:  BarColors,
}

/// A stack of horizontal progress bars sharing one slot of the statusbar.
///
/// Percentages are updated through [`ProgressBar::apply_command`] with a
/// comma-separated list, one value per bar, top to bottom.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressBar {
    placement:    Placement,
    bars:         Vec<Bar>,
    /// Total width including `padding_left`.
    width:        i32,
    padding_left: i32,
    gap:          i32,
    /// Fraction of the panel height used by the whole stack.
    height:       f64,
}

impl ProgressBar {
    pub const KIND: &'static str = "progressbar";

    /// Build from config.  Colors not set on a bar section fall back to the
    /// theme's foreground/background; the border falls back to the bar's
    /// foreground.  A config without bar sections yields an inert widget.
    pub fn new(placement: Placement, cfg: &ProgressbarConfig, theme: &Theme) -> Self {
        if cfg.bars.is_empty() {
            tracing::warn!(
                "progressbar widget '{}' needs at least one bar section",
                placement.name
            );
        }

        let bars = cfg
            .bars
            .iter()
            .map(|section| {
                let foreground = theme.color(section.fg.as_deref(), theme.foreground);
                let background = theme.color(section.bg.as_deref(), theme.background);
                let border = theme.color(section.bordercolor.as_deref(), foreground);
                Bar {
                    percent: 0,
                    colors: BarColors { foreground, background, border },
                }
            })
            .collect();

        Self {
            placement,
            bars,
            width: cfg.width,
            padding_left: cfg.padding_left,
            gap: cfg.gap,
            height: cfg.height,
        }
    }

    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    pub fn percents(&self) -> Vec<u8> {
        self.bars.iter().map(|b| b.percent).collect()
    }

    /// Update percentages from `"p0,p1,..."`.
    ///
    /// Values are assigned to bars in order.  Missing values leave the
    /// remaining bars untouched and surplus values are ignored.  Each value is
    /// read like C `atoi` (garbage reads as 0) and clamped to `0..=100`.
    /// Empty fields between consecutive commas are skipped.
    pub fn apply_command(&mut self, command: &str) {
        let tokens = command.split(',').filter(|t| !t.is_empty());
        for (bar, token) in self.bars.iter_mut().zip(tokens) {
            bar.percent = clamp_percent(atoi(token));
        }
    }

    /// Lay the stack out inside `panel`.
    ///
    /// Per bar, in order: the border outline, the filled part (if any), then
    /// the unfilled remainder (if any).  Fill must come after the border so
    /// the outline never paints over it.
    pub fn compute_rectangles(&self, panel: &PanelGeometry, offset: i32, align: Alignment) -> Layout {
        if self.bars.is_empty() {
            return Layout::empty();
        }

        let (x, y) = self.placement.origin(panel, self.width, offset, align);
        let count = self.bars.len() as i32;
        let panel_height = f64::from(panel.height);

        // Config values are taken verbatim, so every step saturates.
        let interior = self.width.saturating_sub(self.padding_left);
        let inner = interior.saturating_sub(2);
        let left = x.saturating_add(self.padding_left);

        let mut top = round_half_up(panel_height * (1.0 - self.height) / 2.0).saturating_add(y);
        let bar_height = round_half_up(
            (panel_height * self.height - f64::from(self.gap.saturating_mul(count - 1)))
                / f64::from(count),
        );

        let mut ops = Vec::with_capacity(self.bars.len() * 3);
        let place = |x, y, w, h| Rect::clamped(x, y, w, h).translate(panel.x, panel.y);

        for bar in &self.bars {
            let filled = filled_width(inner, bar.percent);
            let track_top = top.saturating_add(1);
            let track_height = bar_height.saturating_sub(2);

            ops.push(DrawOp::outline(
                place(left, top, interior, bar_height),
                bar.colors.border,
            ));

            if filled > 0 {
                ops.push(DrawOp::fill(
                    place(left.saturating_add(1), track_top, filled, track_height),
                    bar.colors.foreground,
                ));
            }

            let remainder = inner - filled;
            if remainder > 0 {
                ops.push(DrawOp::fill(
                    place(left.saturating_add(1).saturating_add(filled), track_top, remainder, track_height),
                    bar.colors.background,
                ));
            }

            top = top.saturating_add(bar_height).saturating_add(self.gap);
        }

        let width = self.width.max(0);
        Layout {
            width: width.unsigned_abs(),
            area: Some(Rect::clamped(x, y, width, i32::try_from(panel.height).unwrap_or(i32::MAX))),
            ops,
        }
    }
}

impl Widget for ProgressBar {
    fn kind(&self) -> &'static str {
        Self::KIND
    }

    fn placement(&self) -> &Placement {
        &self.placement
    }

    fn layout(&self, panel: &PanelGeometry, offset: i32) -> Layout {
        self.compute_rectangles(panel, offset, self.placement.align)
    }

    fn tell(&mut self, command: &str) {
        self.apply_command(command);
    }
}

/// Filled pixels for `percent` of an `inner`-pixel track, truncating.
/// Never negative; a 0% bar is always empty.
fn filled_width(inner: i32, percent: u8) -> i32 {
    if percent == 0 || inner <= 0 {
        return 0;
    }
    // `percent <= 100`, so the quotient never exceeds `inner`.
    (i64::from(inner) * i64::from(percent) / 100) as i32
}

fn clamp_percent(value: i64) -> u8 {
    value.clamp(0, 100) as u8
}

/// Leading whitespace, optional sign, then as many digits as there are.
fn atoi(token: &str) -> i64 {
    let s = token.trim_start_matches(|c: char| c.is_ascii_whitespace());
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let value = digits
        .bytes()
        .take_while(u8::is_ascii_digit)
        .fold(0i64, |acc, d| acc.saturating_mul(10).saturating_add(i64::from(d - b'0')));

    if negative { -value } else { value }
}
