//! Bounded FIFO history of chat-visible records.

use std::collections::VecDeque;

use hearth_shared::protocol::ServerEvent;

/// Number of records replayed to a newly connected client.
pub const HISTORY_LIMIT: usize = 50;

/// Ordered store of recent `message`/`system` records.
///
/// Insertion order is arrival order at the engine. The buffer lives for the
/// process lifetime and is never persisted; a restart discards all history.
#[derive(Debug)]
pub struct HistoryBuffer {
    records: VecDeque<ServerEvent>,
    capacity: usize,
}

impl HistoryBuffer {
    pub fn new() -> Self {
        Self::with_capacity(HISTORY_LIMIT)
    }

    /// Buffer with a non-default capacity, for tests.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            records: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append a record, evicting the oldest when the buffer is full.
    pub fn append(&mut self, record: ServerEvent) {
        if self.records.len() == self.capacity {
            self.records.pop_front();
        }
        self.records.push_back(record);
    }

    /// All stored records, oldest first.
    pub fn snapshot(&self) -> Vec<ServerEvent> {
        self.records.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl Default for HistoryBuffer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(n: usize) -> ServerEvent {
        ServerEvent::Message {
            name: "Ana".to_string(),
            text: format!("message {n}"),
            time: n as i64,
        }
    }

    #[test]
    fn test_append_preserves_arrival_order() {
        // given:
        let mut buffer = HistoryBuffer::new();

        // when:
        for n in 0..5 {
            buffer.append(message(n));
        }

        // then:
        assert_eq!(buffer.len(), 5);
        let snapshot = buffer.snapshot();
        assert_eq!(snapshot, (0..5).map(message).collect::<Vec<_>>());
    }

    #[test]
    fn test_length_never_exceeds_capacity() {
        // given:
        let mut buffer = HistoryBuffer::new();

        // when: insert well past the limit
        for n in 0..(HISTORY_LIMIT * 2) {
            buffer.append(message(n));
            assert!(buffer.len() <= HISTORY_LIMIT);
        }

        // then:
        assert_eq!(buffer.len(), HISTORY_LIMIT);
    }

    #[test]
    fn test_oldest_records_are_evicted_first() {
        // given:
        let mut buffer = HistoryBuffer::new();

        // when: insert 60 records into a 50-slot buffer
        for n in 0..60 {
            buffer.append(message(n));
        }

        // then: exactly the last 50, still in arrival order
        let snapshot = buffer.snapshot();
        assert_eq!(snapshot.len(), HISTORY_LIMIT);
        assert_eq!(snapshot, (10..60).map(message).collect::<Vec<_>>());
    }

    #[test]
    fn test_small_capacity_evicts_fifo() {
        // given:
        let mut buffer = HistoryBuffer::with_capacity(2);

        // when:
        buffer.append(message(1));
        buffer.append(message(2));
        buffer.append(message(3));

        // then:
        assert_eq!(buffer.snapshot(), vec![message(2), message(3)]);
    }

    #[test]
    fn test_new_buffer_is_empty() {
        // given / when:
        let buffer = HistoryBuffer::new();

        // then:
        assert!(buffer.is_empty());
        assert!(buffer.snapshot().is_empty());
    }
}
