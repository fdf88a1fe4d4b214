use super::SOCKET_PATH;
use crate::events::AppEvent;
use async_channel::Sender;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::net::UnixListener;

pub fn parse_command(line: &str) -> Option<AppEvent> {
    match line.trim() {
        "reset" => Some(AppEvent::Reset),
        "confirm" => Some(AppEvent::Confirm),
        "reload" => Some(AppEvent::ConfigReload),
        _ => None,
    }
}

pub async fn run_server(tx: Sender<AppEvent>) {
    // Cleanup old socket if it exists
    if std::fs::metadata(SOCKET_PATH).is_ok() {
        let _ = std::fs::remove_file(SOCKET_PATH);
    }

    let listener = match UnixListener::bind(SOCKET_PATH) {
        Ok(l) => l,
        Err(e) => {
            log::error!("Failed to bind unix socket: {}", e);
            return;
        }
    };

    loop {
        match listener.accept().await {
            Ok((mut stream, _)) => {
                let tx = tx.clone();
                tokio::spawn(async move {
                    let reader = BufReader::new(&mut stream);
                    let mut lines = reader.lines();

                    while let Ok(Some(line)) = lines.next_line().await {
                        match parse_command(&line) {
                            Some(event) => {
                                let _ = tx.send(event).await;
                            }
                            None => log::warn!("Unknown command: {:?}", line),
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_command() {
        assert_eq!(parse_command("reset\n"), Some(AppEvent::Reset));
        assert_eq!(parse_command("  confirm "), Some(AppEvent::Confirm));
        assert_eq!(parse_command("reload"), Some(AppEvent::ConfigReload));
        assert_eq!(parse_command("show"), None);
    }
}
