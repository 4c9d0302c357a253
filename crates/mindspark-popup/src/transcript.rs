//! Ordered chat transcript with transient loading entries.

use mindspark_protocols::{ChatMessage, ChatRole};

pub const THINKING_LABEL: &str = "MindSpark is thinking...";

/// Identifies a loading entry awaiting its reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PendingId(pub u64);

#[derive(Debug, Clone, PartialEq)]
pub enum TranscriptEntry {
    Message(ChatMessage),
    Pending(PendingId),
}

impl TranscriptEntry {
    /// Text shown for the entry.
    pub fn text(&self) -> &str {
        match self {
            TranscriptEntry::Message(message) => &message.text,
            TranscriptEntry::Pending(_) => THINKING_LABEL,
        }
    }

    pub fn role(&self) -> ChatRole {
        match self {
            TranscriptEntry::Message(message) => message.role,
            TranscriptEntry::Pending(_) => ChatRole::Model,
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, TranscriptEntry::Pending(_))
    }
}

#[derive(Debug, Clone, Default)]
pub struct Transcript {
    entries: Vec<TranscriptEntry>,
    next_pending: u64,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[TranscriptEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn last(&self) -> Option<&TranscriptEntry> {
        self.entries.last()
    }

    pub fn push(&mut self, message: ChatMessage) {
        self.entries.push(TranscriptEntry::Message(message));
    }

    /// Append a loading entry.
    pub fn push_pending(&mut self) -> PendingId {
        self.next_pending += 1;
        let id = PendingId(self.next_pending);
        self.entries.push(TranscriptEntry::Pending(id));
        id
    }

    /// Replace the loading entry `id` in place with `message`.
    ///
    /// Returns `false` if no such entry exists.
    pub fn resolve(&mut self, id: PendingId, message: ChatMessage) -> bool {
        match self
            .entries
            .iter_mut()
            .find(|e| **e == TranscriptEntry::Pending(id))
        {
            Some(entry) => {
                *entry = TranscriptEntry::Message(message);
                true
            }
            None => false,
        }
    }

    /// Drop a loading entry without a reply.
    pub fn remove_pending(&mut self, id: PendingId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| *e != TranscriptEntry::Pending(id));
        self.entries.len() != before
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pending_replaced_in_place() {
        let mut transcript = Transcript::new();
        transcript.push(ChatMessage::user("first"));
        let id = transcript.push_pending();
        transcript.push(ChatMessage::user("second"));

        assert_eq!(transcript.entries()[1].text(), THINKING_LABEL);
        assert!(transcript.resolve(id, ChatMessage::model("reply")));

        let texts: Vec<_> = transcript.entries().iter().map(|e| e.text()).collect();
        assert_eq!(texts, vec!["first", "reply", "second"]);
        assert!(!transcript.entries().iter().any(TranscriptEntry::is_pending));
    }

    #[test]
    fn test_resolve_unknown_id() {
        let mut transcript = Transcript::new();
        assert!(!transcript.resolve(PendingId(9), ChatMessage::model("x")));
        assert!(transcript.is_empty());
    }

    #[test]
    fn test_remove_pending() {
        let mut transcript = Transcript::new();
        let id = transcript.push_pending();
        assert!(transcript.remove_pending(id));
        assert!(!transcript.remove_pending(id));
        assert_eq!(transcript.len(), 0);
    }

    #[test]
    fn test_pending_entries_have_distinct_ids() {
        let mut transcript = Transcript::new();
        let a = transcript.push_pending();
        let b = transcript.push_pending();
        assert_ne!(a, b);
        assert_eq!(transcript.last().unwrap().role(), ChatRole::Model);
    }
}
