//! Bounded conversation memory.
//!
//! Keeps the most recent `k` question/answer turns and renders them as a
//! plain `Human:` / `AI:` transcript for the next prompt.

use std::collections::VecDeque;
use std::sync::Arc;

use tokio::sync::Mutex;

/// Label of the question line in a rendered transcript.
pub const HUMAN_LABEL: &str = "Human";
/// Label of the answer line in a rendered transcript.
pub const AI_LABEL: &str = "AI";

/// Default number of turns retained.
pub const DEFAULT_CAPACITY: usize = 5;

/// Memory handle shared between answerers of one session.
pub type SharedMemory = Arc<Mutex<ConversationMemory>>;

/// One question/answer exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    question: String,
    answer: String,
}

impl Turn {
    #[must_use]
    pub fn question(&self) -> &str {
        &self.question
    }

    #[must_use]
    pub fn answer(&self) -> &str {
        &self.answer
    }
}

/// FIFO window over the last `capacity` turns.
#[derive(Debug, Clone)]
pub struct ConversationMemory {
    turns: VecDeque<Turn>,
    capacity: usize,
}

impl ConversationMemory {
    /// Create an empty memory. A capacity of zero keeps nothing.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            turns: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Wrap a new memory in a shareable handle.
    #[must_use]
    pub fn shared(capacity: usize) -> SharedMemory {
        Arc::new(Mutex::new(Self::new(capacity)))
    }

    /// Record a turn as the most recent one, evicting the oldest turns while
    /// over capacity.
    pub fn append(&mut self, question: impl Into<String>, answer: impl Into<String>) {
        self.turns.push_back(Turn {
            question: question.into(),
            answer: answer.into(),
        });
        while self.turns.len() > self.capacity {
            self.turns.pop_front();
        }
    }

    /// Render retained turns, oldest first, two lines per turn.
    #[must_use]
    pub fn render(&self) -> String {
        self.turns
            .iter()
            .map(|turn| {
                format!(
                    "{HUMAN_LABEL}: {}\n{AI_LABEL}: {}",
                    turn.question, turn.answer
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.turns.len()
    }

    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn turns(&self) -> impl Iterator<Item = &Turn> {
        self.turns.iter()
    }

    pub fn clear(&mut self) {
        self.turns.clear();
    }
}

impl Default for ConversationMemory {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}
