use serde::{Deserialize, Serialize};

/// A chat message as it travels through the hub.
///
/// Serialized as an object with exactly two string fields, `username` and
/// `content`. Unknown fields are ignored when decoding and missing ones
/// decode as empty strings.
///
/// # Example
///
/// ```rust
/// use chatroom::hub::message::Message;
///
/// let msg = Message::new("alice", "hi");
/// assert_eq!(
///     serde_json::to_string(&msg).unwrap(),
///     r#"{"username":"alice","content":"hi"}"#
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub content: String,
}

impl Message {
    pub fn new(username: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            content: content.into(),
        }
    }
}
