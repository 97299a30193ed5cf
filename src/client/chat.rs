use futures_util::{SinkExt, StreamExt};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio_tungstenite::connect_async;
use tracing::{debug, info, warn};
use tungstenite::protocol::Message as WsMessage;

use crate::hub::Message;
use crate::transport::codec;
use crate::utils::HubError;

/// Builds the message for one line of input, or `None` for a blank line.
pub fn compose(username: &str, line: &str) -> Option<Message> {
    let content = line.trim_end_matches(['\r', '\n']);
    if content.trim().is_empty() {
        return None;
    }
    Some(Message::new(username, content))
}

/// How a received message is shown in the terminal.
pub fn render(msg: &Message) -> String {
    format!("{}: {}", msg.username, msg.content)
}

/// Runs an interactive session against `url` until stdin closes or the
/// server hangs up.
pub async fn run_chat(url: &str, username: &str) -> Result<(), HubError> {
    let (ws_stream, _response) = connect_async(url).await?;
    info!("connected to {url} as {username}");

    let (mut ws_sender, mut ws_receiver) = ws_stream.split();

    let mut printer = tokio::spawn(async move {
        while let Some(frame) = ws_receiver.next().await {
            match frame.map_err(HubError::from).and_then(codec::decode) {
                Ok(Some(msg)) => println!("{}", render(&msg)),
                Ok(None) => {}
                Err(HubError::Closed) => break,
                Err(e) => {
                    warn!("{e}");
                    break;
                }
            }
        }
    });

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                if let Some(msg) = compose(username, &line) {
                    ws_sender.send(codec::encode(&msg)?).await?;
                }
            }
            _ = &mut printer => {
                info!("server closed the connection");
                return Ok(());
            }
        }
    }

    debug!("stdin closed, leaving");
    let _ = ws_sender.send(WsMessage::Close(None)).await;
    printer.abort();
    Ok(())
}
