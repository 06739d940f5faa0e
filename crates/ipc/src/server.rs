use crate::command::{parse_command, Command};
use pbar_core::{BarError, Result};
use std::path::{Path, PathBuf};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::{UnixListener, UnixStream};
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

/// Listens on a Unix socket and streams typed [`Command`]s.
///
/// Any number of clients may connect; each sends newline-terminated
/// commands and gets no reply.
pub struct CommandServer {
    socket: PathBuf,
}

impl CommandServer {
    /// Create a server bound to `socket`, or [`default_socket_path`] when `None`.
    pub fn new(socket: Option<PathBuf>) -> Self {
        Self {
            socket: socket.unwrap_or_else(default_socket_path),
        }
    }

    pub fn socket(&self) -> &Path {
        &self.socket
    }

    /// Bind the socket and spawn a background task that forwards every parsed
    /// command on the returned channel.  Must be called within a Tokio runtime.
    ///
    /// A stale socket file left by a previous run is removed first.
    pub fn spawn_listener(self) -> Result<mpsc::Receiver<Command>> {
        if let Some(dir) = self.socket.parent() {
            std::fs::create_dir_all(dir)?;
        }
        if self.socket.exists() {
            std::fs::remove_file(&self.socket)?;
        }

        let listener = UnixListener::bind(&self.socket)
            .map_err(|e| BarError::Ipc(format!("bind '{}': {e}", self.socket.display())))?;
        info!("Listening for commands on {}", self.socket.display());

        let (tx, rx) = mpsc::channel(32);

        tokio::spawn(async move {
            loop {
                match listener.accept().await {
                    Ok((stream, _)) => {
                        tokio::spawn(serve_client(stream, tx.clone()));
                    }
                    Err(e) => {
                        error!("Command socket accept failed: {e}");
                        return;
                    }
                }
                if tx.is_closed() {
                    return; // receiver dropped
                }
            }
        });

        Ok(rx)
    }
}

async fn serve_client(stream: UnixStream, tx: mpsc::Sender<Command>) {
    let mut lines = BufReader::new(stream).lines();
    loop {
        match lines.next_line().await {
            Ok(Some(line)) if line.trim().is_empty() => {}
            Ok(Some(line)) => {
                let command = parse_command(&line);
                debug!("command: {command:?}");
                if tx.send(command).await.is_err() {
                    return;
                }
            }
            Ok(None) => return,
            Err(e) => {
                warn!("Command client read failed: {e}");
                return;
            }
        }
    }
}

/// Send one command line to a running bar.
pub async fn send(socket: impl AsRef<Path>, line: &str) -> Result<()> {
    let socket = socket.as_ref();
    let mut stream = UnixStream::connect(socket)
        .await
        .map_err(|e| BarError::Ipc(format!("connect '{}': {e}", socket.display())))?;

    stream
        .write_all(format!("{}\n", line.trim_end()).as_bytes())
        .await
        .map_err(|e| BarError::Ipc(format!("write: {e}")))?;

    stream
        .shutdown()
        .await
        .map_err(|e| BarError::Ipc(format!("shutdown: {e}")))
}

/// `$XDG_RUNTIME_DIR/pbar/pbar.sock`, or a per-user path under `/tmp`.
pub fn default_socket_path() -> PathBuf {
    match std::env::var("XDG_RUNTIME_DIR") {
        Ok(dir) => PathBuf::from(dir).join("pbar").join("pbar.sock"),
        Err(_) => {
            let user = std::env::var("USER").unwrap_or_else(|_| "default".to_string());
            std::env::temp_dir().join(format!("pbar-{user}")).join("pbar.sock")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_socket(tag: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("pbar-ipc-test-{}", std::process::id()))
            .join(format!("{tag}.sock"))
    }

    #[tokio::test]
    async fn commands_flow_through_socket() {
        let path = test_socket("flow");
        let mut rx = CommandServer::new(Some(path.clone())).spawn_listener().unwrap();

        send(&path, "widget_tell load 10,20").await.unwrap();
        assert_eq!(
            rx.recv().await,
            Some(Command::WidgetTell {
                widget: "load".into(),
                data:   "10,20".into(),
            })
        );

        send(&path, "redraw").await.unwrap();
        assert_eq!(rx.recv().await, Some(Command::Redraw));

        let _ = std::fs::remove_file(&path);
    }

    #[tokio::test]
    async fn stale_socket_is_replaced() {
        let path = test_socket("stale");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, b"").unwrap();

        let mut rx = CommandServer::new(Some(path.clone())).spawn_listener().unwrap();
        send(&path, "redraw").await.unwrap();
        assert_eq!(rx.recv().await, Some(Command::Redraw));

        let _ = std::fs::remove_file(&path);
    }

    #[tokio::test]
    async fn send_without_server_fails() {
        let err = send(test_socket("absent"), "redraw").await.unwrap_err();
        assert!(matches!(err, BarError::Ipc(_)));
    }
}
