//! Message formatting utilities for client display.

use hearth_shared::{protocol::ServerEvent, time::timestamp_to_rfc3339};

/// Message formatter for client display
pub struct MessageFormatter;

impl MessageFormatter {
    /// Render any received server record for terminal display.
    pub fn format_event(event: &ServerEvent) -> String {
        match event {
            ServerEvent::Message { name, text, time } => Self::format_chat(name, text, *time),
            ServerEvent::System { text, time } => Self::format_system(text, *time),
            ServerEvent::History { data } => Self::format_history(data),
        }
    }

    /// Format a chat message line
    pub fn format_chat(name: &str, text: &str, time: i64) -> String {
        format!("\n[{}] {}: {}\n", timestamp_to_rfc3339(time), name, text)
    }

    /// Format a system notice
    pub fn format_system(text: &str, time: i64) -> String {
        format!("\n* {} ({})\n", text, timestamp_to_rfc3339(time))
    }

    /// Format the history replay block shown right after connecting
    pub fn format_history(records: &[ServerEvent]) -> String {
        let mut output = String::new();
        output.push_str("\n============================================================\n");

        if records.is_empty() {
            output.push_str("(no recent messages)\n");
        } else {
            output.push_str(&format!("Last {} messages:\n", records.len()));
            for record in records {
                match record {
                    ServerEvent::Message { name, text, time } => {
                        output.push_str(&format!(
                            "[{}] {}: {}\n",
                            timestamp_to_rfc3339(*time),
                            name,
                            text
                        ));
                    }
                    ServerEvent::System { text, time } => {
                        output.push_str(&format!("* {} ({})\n", text, timestamp_to_rfc3339(*time)));
                    }
                    // the relay never nests a replay inside a replay
                    ServerEvent::History { .. } => {}
                }
            }
        }

        output.push_str("============================================================\n");
        output
    }

    /// Format a frame that did not parse as a known record
    pub fn format_raw(text: &str) -> String {
        format!("\n{}\n", text)
    }

    /// Format a binary frame notification
    pub fn format_binary(byte_count: usize) -> String {
        format!("\n[binary message: {} bytes]\n", byte_count)
    }
}
