/// Commands accepted on the control socket, one per line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `widget_tell <widget> <data>`: forward `data` to the named widget.
    WidgetTell { widget: String, data: String },
    /// `redraw`: repaint without changing any state.
    Redraw,
    /// Anything we don't understand; carries the raw line for logging.
    Unknown(String),
}

/// Parse a raw command line into a typed [`Command`].
pub fn parse_command(line: &str) -> Command {
    let line = line.trim();
    let (verb, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));

    match verb {
        "widget_tell" => {
            let rest = rest.trim_start();
            if rest.is_empty() {
                return Command::Unknown(line.to_string());
            }
            let (widget, data) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
            Command::WidgetTell {
                widget: widget.to_string(),
                data:   data.trim().to_string(),
            }
        }
        "redraw" => Command::Redraw,
        _ => Command::Unknown(line.to_string()),
    }
}
