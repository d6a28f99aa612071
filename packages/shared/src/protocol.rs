//! Wire-protocol event records.
//!
//! Every frame on the channel is a JSON object tagged by `type`. Clients may
//! send `join` and `message`; the server emits `message`, `system`, and (once
//! per connection, right after registration) `history`. Anything that fails
//! to parse as a [`ClientEvent`] — malformed JSON, a missing or unknown
//! `type`, or a client trying to inject `system`/`history` — is discarded by
//! the server without a reply.

use serde::{Deserialize, Serialize};

/// Record received from a client.
///
/// `name` and `text` are optional on the wire; the server substitutes
/// defaults and assigns the timestamp itself, so nothing the client asserts
/// beyond the display name survives normalization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ClientEvent {
    /// Requests a join announcement.
    Join {
        #[serde(default)]
        name: Option<String>,
    },
    /// A chat message submission.
    Message {
        #[serde(default)]
        name: Option<String>,
        #[serde(default)]
        text: Option<String>,
    },
}

/// Record sent by the server.
///
/// `Message` and `System` are the chat-visible records: they carry a
/// server-assigned `time` (epoch milliseconds), are stored in the history
/// buffer, and are what `History::data` replays — in stored order, oldest
/// first. The engine never stores a `History` record, so nesting stops at
/// one level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ServerEvent {
    /// A chat message, normalized and timestamped by the server.
    Message { name: String, text: String, time: i64 },
    /// An informational notice (e.g. a join announcement).
    System { text: String, time: i64 },
    /// Replay of recent records, sent once to each new connection.
    History { data: Vec<ServerEvent> },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_parses_with_and_without_name() {
        // given:
        let with_name = r#"{"type":"join","name":"Ana"}"#;
        let without_name = r#"{"type":"join"}"#;

        // when:
        let parsed_with: ClientEvent = serde_json::from_str(with_name).unwrap();
        let parsed_without: ClientEvent = serde_json::from_str(without_name).unwrap();

        // then:
        assert_eq!(
            parsed_with,
            ClientEvent::Join {
                name: Some("Ana".to_string())
            }
        );
        assert_eq!(parsed_without, ClientEvent::Join { name: None });
    }

    #[test]
    fn test_message_fields_default_to_none() {
        // given:
        let bare = r#"{"type":"message"}"#;

        // when:
        let parsed: ClientEvent = serde_json::from_str(bare).unwrap();

        // then:
        assert_eq!(
            parsed,
            ClientEvent::Message {
                name: None,
                text: None
            }
        );
    }

    #[test]
    fn test_unknown_type_is_rejected() {
        // given:
        let unknown = r#"{"type":"shout","text":"hi"}"#;
        let typeless = r#"{"text":"hi"}"#;

        // when / then:
        assert!(serde_json::from_str::<ClientEvent>(unknown).is_err());
        assert!(serde_json::from_str::<ClientEvent>(typeless).is_err());
    }

    #[test]
    fn test_client_cannot_inject_server_records() {
        // given: `system` and `history` are server→client only
        let system = r#"{"type":"system","text":"fake notice","time":1}"#;
        let history = r#"{"type":"history","data":[]}"#;

        // when / then:
        assert!(serde_json::from_str::<ClientEvent>(system).is_err());
        assert!(serde_json::from_str::<ClientEvent>(history).is_err());
    }

    #[test]
    fn test_server_message_wire_shape() {
        // given:
        let record = ServerEvent::Message {
            name: "Ana".to_string(),
            text: "hello".to_string(),
            time: 1_700_000_000_000,
        };

        // when:
        let json = serde_json::to_string(&record).unwrap();

        // then:
        assert_eq!(
            json,
            r#"{"type":"message","name":"Ana","text":"hello","time":1700000000000}"#
        );
    }

    #[test]
    fn test_history_replays_records_in_order() {
        // given:
        let replay = ServerEvent::History {
            data: vec![
                ServerEvent::System {
                    text: "Ana joined the chat".to_string(),
                    time: 1,
                },
                ServerEvent::Message {
                    name: "Ana".to_string(),
                    text: "hi".to_string(),
                    time: 2,
                },
            ],
        };

        // when:
        let json = serde_json::to_string(&replay).unwrap();
        let parsed: ServerEvent = serde_json::from_str(&json).unwrap();

        // then:
        assert_eq!(parsed, replay);
    }
}
