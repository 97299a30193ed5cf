//! JSON framing between `Message` and WebSocket frames.

use tungstenite::protocol::Message as WsMessage;

use crate::hub::message::Message;
use crate::utils::HubError;

/// Encodes a message as a JSON text frame.
pub fn encode(msg: &Message) -> Result<WsMessage, HubError> {
    Ok(WsMessage::text(serde_json::to_string(msg)?))
}

/// Decodes one incoming frame.
///
/// Text and binary frames must carry a JSON `Message`. Control frames yield
/// `Ok(None)`; a close frame yields `HubError::Closed`.
pub fn decode(frame: WsMessage) -> Result<Option<Message>, HubError> {
    match frame {
        WsMessage::Text(text) => Ok(Some(serde_json::from_str(text.as_str())?)),
        WsMessage::Binary(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
        WsMessage::Close(_) => Err(HubError::Closed),
        WsMessage::Ping(_) | WsMessage::Pong(_) | WsMessage::Frame(_) => Ok(None),
    }
}
