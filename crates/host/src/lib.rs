//! Wayland layer-shell host for `pbar`.
//!
//! Owns the Iced application loop and wires together the background tasks:
//! - command socket (`widget_tell`, `redraw`)
//! - config file watcher (rebuilds the statusbar on change)
//!
//! Every redraw records the statusbar's draw operations; `view()` replays
//! them onto an Iced canvas.

use futures::{channel::mpsc::Sender, SinkExt};
use iced::{
    widget::{canvas, container},
    Element, Length, Subscription, Task,
};
use iced_layershell::{
    build_pattern::application,
    reexport::{Anchor, Layer},
    settings::{LayerShellSettings, Settings},
    to_layer_message,
};
use pbar_config::{default_path, load as load_config, BarConfig, ConfigWatcher, Position};
use pbar_core::DrawOp;
use pbar_ipc::{Command, CommandServer};
use pbar_renderer::{DrawList, Statusbar};
use pbar_theme::{colors::to_iced, Theme};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, error, info, warn};

// ── Entry point ───────────────────────────────────────────────────────────────

/// Start the bar.  Never returns under normal operation.
pub fn run() -> iced_layershell::Result {
    let config = load_config(default_path()).unwrap_or_default();
    let global = &config.global;
    let exclusive_zone = if global.exclusive_zone {
        i32::try_from(global.height).unwrap_or(i32::MAX)
    } else {
        0
    };

    application(App::boot, App::namespace, App::update, App::view)
        .subscription(App::subscription)
        .style(App::style)
        .settings(Settings {
            layer_settings: LayerShellSettings {
                size: Some((global.width, global.height)),
                exclusive_zone,
                anchor: position_to_anchor(global.position),
                layer: Layer::Top,
                ..Default::default()
            },
            ..Default::default()
        })
        .run()
}

// ── Message ───────────────────────────────────────────────────────────────────

/// Everything that can change what the bar shows.
///
/// `#[to_layer_message]` adds the layer-shell control variants; the backend
/// consumes those before they reach `update()`.
#[to_layer_message]
#[derive(Debug, Clone)]
pub enum Message {
    /// A line received on the command socket.
    Command(Command),
    /// Config file changed on disk.
    ConfigReloaded,
}

// ── State ─────────────────────────────────────────────────────────────────────

pub struct App {
    config_path: PathBuf,
    config:      BarConfig,
    theme:       Theme,
    statusbar:   Statusbar,
    /// Operations from the last redraw, replayed by `view()`.
    ops:         Vec<DrawOp>,
}

impl App {
    fn boot() -> (Self, Task<Message>) {
        (Self::load(default_path()), Task::none())
    }

    /// Load the config at `path`, falling back to defaults on error.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let config = load_config(&path).unwrap_or_else(|e| {
            warn!("{e}; using defaults");
            BarConfig::default()
        });
        Self::from_config(path, config)
    }

    pub fn from_config(config_path: impl Into<PathBuf>, config: BarConfig) -> Self {
        let theme = Theme::from_config(&config.theme);
        let statusbar = Statusbar::from_config(&config, &theme);
        info!(
            "statusbar '{}' ({}x{}) with {} widget(s)",
            statusbar.name(),
            config.global.width,
            config.global.height,
            statusbar.widgets().len()
        );

        let mut app = Self {
            config_path: config_path.into(),
            config,
            theme,
            statusbar,
            ops: Vec::new(),
        };
        app.redraw();
        app
    }

    fn namespace() -> String {
        String::from("pbar")
    }

    pub fn statusbar(&self) -> &Statusbar {
        &self.statusbar
    }

    /// Draw operations from the last redraw, background first.
    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    // ── Update ────────────────────────────────────────────────────────────────

    fn update(&mut self, message: Message) -> Task<Message> {
        if self.handle(message) {
            self.redraw();
        }
        Task::none()
    }

    /// Apply a message.  Returns `true` when a redraw is needed.
    pub fn handle(&mut self, message: Message) -> bool {
        match message {
            Message::Command(Command::WidgetTell { widget, data }) => {
                match self.statusbar.tell(&widget, &data) {
                    Ok(()) => true,
                    Err(e) => {
                        warn!("{e}");
                        false
                    }
                }
            }
            Message::Command(Command::Redraw) => true,
            Message::Command(Command::Unknown(line)) => {
                warn!("ignoring unknown command '{line}'");
                false
            }
            Message::ConfigReloaded => match load_config(&self.config_path) {
                Ok(cfg) => {
                    if cfg.global.socket != self.config.global.socket
                        || cfg.global.width != self.config.global.width
                        || cfg.global.height != self.config.global.height
                    {
                        warn!("socket and panel size changes take effect after a restart");
                    }
                    info!("Config reloaded");
                    *self = Self::from_config(self.config_path.clone(), cfg);
                    true
                }
                Err(e) => {
                    warn!("Config reload failed: {e}");
                    false
                }
            },
            // Layer-shell injected variants are handled by the backend.
            _ => false,
        }
    }

    pub fn redraw(&mut self) {
        self.ops.clear();
        self.statusbar.draw(&mut self.ops);

        for widget in self.statusbar.widgets() {
            debug!("{} area: {:?}", widget.name(), self.statusbar.area(widget.name()));
        }
    }

    // ── View ──────────────────────────────────────────────────────────────────

    fn view(&self) -> Element<'_, Message> {
        let surface = canvas(DrawList::new(&self.ops))
            .width(Length::Fill)
            .height(Length::Fill);

        container(surface)
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }

    // ── Subscriptions ─────────────────────────────────────────────────────────

    fn subscription(&self) -> Subscription<Message> {
        Subscription::batch([
            Subscription::run(command_stream),
            Subscription::run(config_stream),
        ])
    }

    // ── Style ─────────────────────────────────────────────────────────────────

    fn style(&self, _theme: &iced::Theme) -> iced::theme::Style {
        iced::theme::Style {
            background_color: to_iced(self.theme.background),
            text_color: to_iced(self.theme.foreground),
        }
    }
}

// ── Subscription streams ──────────────────────────────────────────────────────
//
// `Subscription::run` keys on the function pointer, so each stream is a free
// function that reads what it needs from the config itself.

/// Binds the command socket and forwards every parsed command.
fn command_stream() -> impl iced::futures::Stream<Item = Message> {
    iced::stream::channel(32, |mut sender: Sender<Message>| async move {
        let socket = load_config(default_path()).unwrap_or_default().global.socket;

        match CommandServer::new(socket).spawn_listener() {
            Ok(mut rx) => {
                while let Some(cmd) = rx.recv().await {
                    if sender.send(Message::Command(cmd)).await.is_err() {
                        break;
                    }
                }
            }
            Err(e) => error!("command socket unavailable: {e}"),
        }

        // Without a socket the bar keeps showing its last state.
        loop {
            tokio::time::sleep(Duration::from_secs(3600)).await;
        }
    })
}

/// Sends `ConfigReloaded` whenever `pbar.toml` changes.
fn config_stream() -> impl iced::futures::Stream<Item = Message> {
    iced::stream::channel(1, |mut sender: Sender<Message>| async move {
        let (watcher, mut rx) = ConfigWatcher::spawn(default_path());

        while rx.recv().await.is_some() {
            debug!("{} changed", watcher.path().display());
            let _ = sender.try_send(Message::ConfigReloaded);
        }

        loop {
            tokio::time::sleep(Duration::from_secs(3600)).await;
        }
    })
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn position_to_anchor(pos: Position) -> Anchor {
    match pos {
        Position::Top    => Anchor::Top    | Anchor::Left,
        Position::Bottom => Anchor::Bottom | Anchor::Left,
    }
}
