//! AI tutor stand-in: an ordered keyword table of canned explanations.
//!
//! Nothing here understands the question. Rules are checked top to bottom
//! against the lower-cased input and the first hit wins.

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Notify;
use tokio::task::JoinHandle;

pub const GREETING: &str = "Hello! I'm your AI Tutor. I can help you understand concepts, explain difficult topics, and answer questions based on your study material. What would you like to learn about today?";

pub const FALLBACK: &str = "That's a great question! I'm here to help you understand any topic from your study materials. Could you provide more context or share the specific material you're studying? This helps me give you more accurate and relevant explanations.";

pub const QUICK_QUESTIONS: &[&str] = &[
    "Explain photosynthesis",
    "What is DNA?",
    "How do equations work?",
    "Tell me about gravity",
    "What is the cell cycle?",
    "Explain the water cycle",
];

pub const DEFAULT_REPLY_DELAY: Duration = Duration::from_millis(1500);

#[derive(Debug, Clone, Copy)]
pub struct ChatRule {
    pub keywords: &'static [&'static str],
    pub response: &'static str,
}

pub const RULES: &[ChatRule] = &[
    ChatRule {
        keywords: &["photosynthesis"],
        response: "Photosynthesis is the process plants use to convert sunlight into energy! It happens in two main stages: light reactions (in thylakoids) and the Calvin cycle (in stroma). The equation is: 6CO2 + 6H2O + light → C6H12O6 + 6O2. Would you like me to explain any specific part in more detail?",
    },
    ChatRule {
        keywords: &["mitochondria"],
        response: "Mitochondria are called the 'powerhouse of the cell' because they produce ATP (energy) through cellular respiration. They have two membranes and contain their own DNA! They're especially abundant in cells that need lots of energy, like muscle cells.",
    },
    ChatRule {
        keywords: &["equation", "math"],
        response: "I'd be happy to help with equations! Could you share the specific equation or math problem you're working on? I can break it down step by step and explain the concepts behind it.",
    },
    ChatRule {
        keywords: &["physics"],
        response: "Physics is all about understanding how the universe works! Whether it's mechanics, electricity, waves, or quantum physics, I can help explain concepts with real-world examples. What physics topic interests you?",
    },
];

pub fn respond(user_input: &str) -> &'static str {
    let lower = user_input.to_lowercase();
    RULES
        .iter()
        .find(|rule| rule.keywords.iter().any(|k| lower.contains(k)))
        .map(|rule| rule.response)
        .unwrap_or(FALLBACK)
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Assistant,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ChatMessage {
    pub id: u64,
    pub sender: Sender,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug)]
struct Transcript {
    messages: Vec<ChatMessage>,
    next_id: u64,
    pending: usize,
}

impl Transcript {
    fn push(&mut self, sender: Sender, text: String) -> ChatMessage {
        let msg = ChatMessage {
            id: self.next_id,
            sender,
            text,
            timestamp: Utc::now(),
        };
        self.next_id += 1;
        self.messages.push(msg.clone());
        msg
    }
}

/// One tutor conversation. Messages are append-only and live as long as the
/// session; clones share the same transcript.
#[derive(Debug, Clone)]
pub struct ChatSession {
    transcript: Arc<Mutex<Transcript>>,
    arrived: Arc<Notify>,
    reply_delay: Duration,
}

impl ChatSession {
    pub fn new(reply_delay: Duration) -> Self {
        let mut transcript = Transcript {
            messages: Vec::new(),
            next_id: 1,
            pending: 0,
        };
        transcript.push(Sender::Assistant, GREETING.to_string());

        Self {
            transcript: Arc::new(Mutex::new(transcript)),
            arrived: Arc::new(Notify::new()),
            reply_delay,
        }
    }

    pub fn messages(&self) -> Vec<ChatMessage> {
        self.transcript.lock().messages.clone()
    }

    /// Resolves once a reply has landed since the last call. A reply that
    /// lands while nobody is waiting is remembered, so none are missed.
    pub async fn reply_arrived(&self) {
        self.arrived.notified().await;
    }

    /// True while at least one reply is still on its timer.
    pub fn is_typing(&self) -> bool {
        self.transcript.lock().pending > 0
    }

    /// Appends the user's message now and schedules the canned reply.
    ///
    /// Blank input is ignored. A reply that is already scheduled is never
    /// cancelled, so two quick submissions both get answered in order.
    /// Must be called from within a tokio runtime.
    pub fn submit(&self, text: &str) -> Option<JoinHandle<ChatMessage>> {
        if text.trim().is_empty() {
            return None;
        }

        {
            let mut t = self.transcript.lock();
            t.push(Sender::User, text.to_string());
            t.pending += 1;
        }

        let reply = respond(text).to_string();
        let transcript = Arc::clone(&self.transcript);
        let arrived = Arc::clone(&self.arrived);
        // measured from submission, not from when the task first runs
        let deadline = tokio::time::Instant::now() + self.reply_delay;
        tracing::debug!("scheduling tutor reply in {:?}", self.reply_delay);

        Some(tokio::spawn(async move {
            tokio::time::sleep_until(deadline).await;
            let msg = {
                let mut t = transcript.lock();
                t.pending = t.pending.saturating_sub(1);
                t.push(Sender::Assistant, reply)
            };
            arrived.notify_one();
            msg
        }))
    }
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new(DEFAULT_REPLY_DELAY)
    }
}
