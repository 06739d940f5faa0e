use pbar_core::Color;

/// Well-known color names accepted in place of a hex string.
const NAMED: &[(&str, Color)] = &[
    ("black",   Color::rgb(0x00, 0x00, 0x00)),
    ("white",   Color::rgb(0xff, 0xff, 0xff)),
    ("red",     Color::rgb(0xff, 0x00, 0x00)),
    ("green",   Color::rgb(0x00, 0xff, 0x00)),
    ("blue",    Color::rgb(0x00, 0x00, 0xff)),
    ("yellow",  Color::rgb(0xff, 0xff, 0x00)),
    ("cyan",    Color::rgb(0x00, 0xff, 0xff)),
    ("magenta", Color::rgb(0xff, 0x00, 0xff)),
    ("orange",  Color::rgb(0xff, 0xa5, 0x00)),
    ("gray",    Color::rgb(0xbe, 0xbe, 0xbe)),
    ("grey",    Color::rgb(0xbe, 0xbe, 0xbe)),
    ("darkgray", Color::rgb(0xa9, 0xa9, 0xa9)),
    ("darkgrey", Color::rgb(0xa9, 0xa9, 0xa9)),
];

/// Parse a color string: `#hex` or a case-insensitive name from the table.
pub fn parse(spec: &str) -> Option<Color> {
    let spec = spec.trim();
    if spec.starts_with('#') {
        return Color::from_hex(spec);
    }
    NAMED
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(spec))
        .map(|&(_, color)| color)
}

/// Convert to an [`iced::Color`] for use in Iced widgets.
#[inline]
pub fn to_iced(color: Color) -> iced::Color {
    iced::Color::from_rgba8(color.r, color.g, color.b, f32::from(color.a) / 255.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_are_case_insensitive() {
        assert_eq!(parse("Red"), Some(Color::rgb(0xff, 0, 0)));
        assert_eq!(parse(" grey "), parse("gray"));
    }

    #[test]
    fn hex_goes_through_color() {
        assert_eq!(parse("#222222"), Some(Color::rgb(0x22, 0x22, 0x22)));
    }

    #[test]
    fn iced_conversion_normalises_channels() {
        let c = to_iced(Color { r: 0xff, g: 0, b: 0x33, a: 0x00 });
        assert_eq!(c, iced::Color::from_rgba(1.0, 0.0, 0.2, 0.0));
    }

    #[test]
    fn unknown_names_fail() {
        assert_eq!(parse("chartreuse-ish"), None);
        assert_eq!(parse(""), None);
    }
}
