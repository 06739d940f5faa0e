use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{error, info, warn};

/// Reports changes to `pbar.toml`.
///
/// The parent directory is watched rather than the file itself: editors that
/// save by writing a temp file and renaming it over the config replace the
/// inode, which a file-level watch would silently lose.
///
/// ```no_run
/// # async fn reload_loop() {
/// let (_guard, mut changed) = pbar_config::ConfigWatcher::spawn(pbar_config::default_path());
/// while changed.recv().await.is_some() {
///     let _cfg = pbar_config::load(pbar_config::default_path());
/// }
/// # }
/// ```
pub struct ConfigWatcher {
    path: PathBuf,
}

impl ConfigWatcher {
    /// Start watching on the current Tokio runtime.  The receiver yields one
    /// `()` per burst of changes and closes if the watch cannot be set up.
    pub fn spawn(path: impl AsRef<Path>) -> (Self, mpsc::Receiver<()>) {
        let path = path.as_ref().to_path_buf();
        let (tx, rx) = mpsc::channel(1);
        tokio::spawn(watch_dir(path.clone(), tx));
        (Self { path }, rx)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// True when `event` may have changed the file at `path`.
fn touches(event: &Event, path: &Path) -> bool {
    matches!(
        event.kind,
        EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_)
    ) && event.paths.iter().any(|p| p.file_name() == path.file_name())
}

async fn watch_dir(path: PathBuf, tx: mpsc::Sender<()>) {
    let dir = match path.parent() {
        Some(d) if !d.as_os_str().is_empty() => d.to_path_buf(),
        _ => PathBuf::from("."),
    };

    let (raw_tx, mut raw_rx) = mpsc::channel::<notify::Result<Event>>(16);
    let watcher = RecommendedWatcher::new(
        move |res| {
            let _ = raw_tx.blocking_send(res);
        },
        Config::default().with_poll_interval(Duration::from_secs(2)),
    );

    let mut watcher = match watcher {
        Ok(w) => w,
        Err(e) => {
            error!("cannot create config watcher: {e}");
            return;
        }
    };
    if let Err(e) = watcher.watch(&dir, RecursiveMode::NonRecursive) {
        error!("cannot watch '{}': {e}", dir.display());
        return;
    }
    info!("watching {} for config changes", path.display());

    while let Some(res) = raw_rx.recv().await {
        let event = match res {
            Ok(event) => event,
            Err(e) => {
                warn!("config watcher: {e}");
                continue;
            }
        };
        if !touches(&event, &path) {
            continue;
        }
        // Full = a reload is already queued; closed = nobody is listening.
        if let Err(mpsc::error::TrySendError::Closed(())) = tx.try_send(()) {
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use notify::event::{CreateKind, ModifyKind};

    fn event(kind: EventKind, path: &str) -> Event {
        Event::new(kind).add_path(PathBuf::from(path))
    }

    #[test]
    fn writes_to_the_config_count() {
        let cfg = Path::new("/home/u/.config/pbar/pbar.toml");
        assert!(touches(&event(EventKind::Modify(ModifyKind::Any), "/home/u/.config/pbar/pbar.toml"), cfg));
        assert!(touches(&event(EventKind::Create(CreateKind::File), "/home/u/.config/pbar/pbar.toml"), cfg));
    }

    #[test]
    fn siblings_and_reads_are_ignored() {
        let cfg = Path::new("/home/u/.config/pbar/pbar.toml");
        assert!(!touches(&event(EventKind::Modify(ModifyKind::Any), "/home/u/.config/pbar/.pbar.toml.swp"), cfg));
        assert!(!touches(&event(EventKind::Access(notify::event::AccessKind::Any), "/home/u/.config/pbar/pbar.toml"), cfg));
    }
}
