use super::codec::{decode, encode};
use super::websocket::admit;
use crate::config::Settings;
use crate::hub::Message;
use crate::utils::HubError;
use serde_json::json;
use tungstenite::http::StatusCode;
use tungstenite::protocol::Message as WsMessage;

#[test]
fn test_encode_has_exactly_two_fields() {
    let frame = encode(&Message::new("a", "hi")).unwrap();
    let WsMessage::Text(text) = frame else {
        panic!("Expected a text message");
    };
    let value: serde_json::Value = serde_json::from_str(text.as_str()).unwrap();
    assert_eq!(value, json!({ "username": "a", "content": "hi" }));
}

#[test]
fn test_decode_text_frame() {
    let frame = WsMessage::text(json!({ "username": "a", "content": "hi" }).to_string());
    assert_eq!(decode(frame).unwrap(), Some(Message::new("a", "hi")));
}

#[test]
fn test_decode_binary_frame() {
    let body = br#"{"username":"b","content":"bytes"}"#.to_vec();
    let frame = WsMessage::binary(body);
    assert_eq!(decode(frame).unwrap(), Some(Message::new("b", "bytes")));
}

#[test]
fn test_decode_ignores_unknown_fields() {
    let frame = WsMessage::text(
        json!({ "username": "a", "content": "hi", "room": "lobby", "ts": 1 }).to_string(),
    );
    assert_eq!(decode(frame).unwrap(), Some(Message::new("a", "hi")));
}

#[test]
fn test_decode_missing_fields_default_to_empty() {
    let frame = WsMessage::text(json!({ "content": "who am i" }).to_string());
    assert_eq!(decode(frame).unwrap(), Some(Message::new("", "who am i")));
}

#[test]
fn test_decode_malformed_json_is_an_error() {
    let frame = WsMessage::text("not json at all");
    assert!(matches!(decode(frame), Err(HubError::Decode(_))));

    let frame = WsMessage::text(json!(["a", "hi"]).to_string());
    assert!(matches!(decode(frame), Err(HubError::Decode(_))));
}

#[test]
fn test_decode_control_frames() {
    assert_eq!(decode(WsMessage::Ping(Vec::new().into())).unwrap(), None);
    assert_eq!(decode(WsMessage::Pong(Vec::new().into())).unwrap(), None);
    assert!(matches!(decode(WsMessage::Close(None)), Err(HubError::Closed)));
}

#[test]
fn test_admit_checks_path_and_slot() {
    let settings = Settings::default();

    assert_eq!(admit("/ws", &settings, true), Ok(()));
    assert_eq!(
        admit("/ws", &settings, false),
        Err(StatusCode::SERVICE_UNAVAILABLE)
    );
    assert_eq!(admit("/", &settings, true), Err(StatusCode::NOT_FOUND));
    assert_eq!(admit("/ws/extra", &settings, true), Err(StatusCode::NOT_FOUND));
}
