use crate::config;
use crate::events::{AppEvent, ControlCommand};
use async_channel::Sender;
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::net::UnixListener;

const FALLBACK_SOCKET_PATH: &str = "/tmp/pomodoro.sock";

pub fn socket_path() -> PathBuf {
    config::project_dirs()
        .and_then(|dirs| dirs.runtime_dir().map(|d| d.join("pomodoro.sock")))
        .unwrap_or_else(|| PathBuf::from(FALLBACK_SOCKET_PATH))
}

/// Parses one line from the socket; blank lines and unknown commands yield `None`.
pub fn parse_line(line: &str) -> Option<ControlCommand> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    match line.parse() {
        Ok(cmd) => Some(cmd),
        Err(_) => {
            log::warn!("Ignoring unknown control command '{}'", line);
            None
        }
    }
}

pub async fn run_server(tx: Sender<AppEvent>) {
    let path = socket_path();

    if let Some(parent) = path.parent()
        && let Err(e) = fs_err::create_dir_all(parent)
    {
        log::error!("Failed to create socket directory: {}", e);
        return;
    }

    // Cleanup old socket if it exists
    if fs_err::metadata(&path).is_ok() {
        let _ = fs_err::remove_file(&path);
    }

    let listener = match UnixListener::bind(&path) {
        Ok(l) => l,
        Err(e) => {
            log::error!("Failed to bind unix socket {}: {}", path.display(), e);
            return;
        }
    };
    log::info!("Listening for commands on {}", path.display());

    loop {
        match listener.accept().await {
            Ok((mut stream, _)) => {
                let tx = tx.clone();
                tokio::spawn(async move {
                    let reader = BufReader::new(&mut stream);
                    let mut lines = reader.lines();

                    while let Ok(Some(line)) = lines.next_line().await {
                        if let Some(cmd) = parse_line(&line)
                            && tx.send(AppEvent::from(cmd)).await.is_err()
                        {
                            break;
                        }
                    }
                });
            }
            Err(e) => {
                log::error!("Failed to accept connection: {}", e);
            }
        }
    }
}
