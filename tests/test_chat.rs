//! Tests for [`chanakya::chat`]
//!
//! Async tests run on a paused clock, so reply delays resolve instantly and
//! deterministically.

use chanakya::chat::{respond, ChatSession, Sender, FALLBACK, GREETING, RULES};
use std::time::Duration;

const DELAY: Duration = Duration::from_millis(1500);

// ── Rule table ───────────────────────────────────────────────────────────────

/// Test 1: photosynthesis always gets the same explanation, whatever the
/// casing or surrounding words.
#[test]
fn test_photosynthesis_is_verbatim() {
    let expected = RULES[0].response;
    for input in [
        "photosynthesis",
        "Explain PHOTOSYNTHESIS please",
        "what is photoSynthesis??",
        "tell me about photosynthesis and physics",
    ] {
        assert_eq!(respond(input), expected, "{input}");
    }
}

/// Test 2: each rule answers its own keywords.
#[test]
fn test_rules_match_their_keywords() {
    assert_eq!(respond("what do Mitochondria do"), RULES[1].response);
    assert_eq!(respond("solve this equation"), RULES[2].response);
    assert_eq!(respond("I hate MATH"), RULES[2].response);
    assert_eq!(respond("physics is hard"), RULES[3].response);
}

/// Test 3: earlier rules win when several keywords appear.
#[test]
fn test_rule_order() {
    assert_eq!(respond("math of mitochondria"), RULES[1].response);
    assert_eq!(respond("physics equation"), RULES[2].response);
}

/// Test 4: anything else gets the fallback.
#[test]
fn test_fallback() {
    assert_eq!(respond("tell me about the French Revolution"), FALLBACK);
    assert_eq!(respond(""), FALLBACK);
}

// ── Session ──────────────────────────────────────────────────────────────────

/// Test 5: a new session opens with the greeting.
#[tokio::test]
async fn test_session_starts_with_greeting() {
    let session = ChatSession::new(DELAY);
    let messages = session.messages();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].sender, Sender::Assistant);
    assert_eq!(messages[0].text, GREETING);
    assert!(!session.is_typing());
}

/// Test 6: the user's message lands at once; the reply after the delay.
#[tokio::test(start_paused = true)]
async fn test_reply_after_delay() {
    let session = ChatSession::new(DELAY);
    let start = tokio::time::Instant::now();

    let handle = session.submit("What is photosynthesis?").unwrap();
    assert_eq!(session.messages().len(), 2);
    assert_eq!(session.messages()[1].sender, Sender::User);
    assert!(session.is_typing());

    let reply = handle.await.unwrap();
    assert!(start.elapsed() >= DELAY);
    assert_eq!(reply.sender, Sender::Assistant);
    assert_eq!(reply.text, RULES[0].response);
    assert!(!session.is_typing());

    let messages = session.messages();
    assert_eq!(messages.len(), 3);
    assert_eq!(messages[2], reply);
}

/// Test 7: blank input is ignored.
#[tokio::test]
async fn test_blank_input_ignored() {
    let session = ChatSession::new(DELAY);
    assert!(session.submit("   ").is_none());
    assert_eq!(session.messages().len(), 1);
}

/// Test 8: a second submission does not cancel the first reply; both
/// arrive in order.
#[tokio::test(start_paused = true)]
async fn test_overlapping_submissions_both_answered() {
    let session = ChatSession::new(DELAY);

    let first = session.submit("mitochondria").unwrap();
    tokio::time::advance(Duration::from_millis(500)).await;
    let second = session.submit("physics").unwrap();
    assert!(session.is_typing());

    first.await.unwrap();
    assert!(session.is_typing());
    second.await.unwrap();
    assert!(!session.is_typing());

    let texts: Vec<String> = session.messages().into_iter().map(|m| m.text).collect();
    assert_eq!(
        texts,
        vec![
            GREETING.to_string(),
            "mitochondria".to_string(),
            "physics".to_string(),
            RULES[1].response.to_string(),
            RULES[3].response.to_string(),
        ]
    );
}

/// Test 9: message ids are unique and increasing.
#[tokio::test(start_paused = true)]
async fn test_message_ids_increase() {
    let session = ChatSession::new(DELAY);
    session.submit("one").unwrap().await.unwrap();
    session.submit("two").unwrap().await.unwrap();

    let ids: Vec<u64> = session.messages().iter().map(|m| m.id).collect();
    assert_eq!(ids, vec![1, 2, 3, 4, 5]);
}

/// Test 10: clones share one transcript.
#[tokio::test(start_paused = true)]
async fn test_clones_share_transcript() {
    let session = ChatSession::new(DELAY);
    let view = session.clone();
    session.submit("math").unwrap().await.unwrap();
    assert_eq!(view.messages().len(), 3);
}

/// Test 11: a reply lands on its own timer without anyone awaiting the
/// handle, and `reply_arrived` wakes the waiter.
#[tokio::test(start_paused = true)]
async fn test_reply_lands_without_awaiting_handle() {
    let session = ChatSession::new(DELAY);
    drop(session.submit("physics").unwrap());
    assert!(session.is_typing());

    session.reply_arrived().await;
    assert!(!session.is_typing());
    let messages = session.messages();
    assert_eq!(messages.len(), 3);
    assert_eq!(messages[2].text, RULES[3].response);
}

/// Test 12: a reply that landed before anyone waited is still reported.
#[tokio::test(start_paused = true)]
async fn test_reply_arrived_after_the_fact() {
    let session = ChatSession::new(DELAY);
    session.submit("math").unwrap().await.unwrap();

    tokio::time::timeout(Duration::from_millis(1), session.reply_arrived())
        .await
        .expect("landed reply should be remembered");
}

/// Test 13: with nothing pending, `reply_arrived` keeps waiting.
#[tokio::test(start_paused = true)]
async fn test_reply_arrived_waits_when_idle() {
    let session = ChatSession::new(DELAY);
    let waited = tokio::time::timeout(DELAY * 4, session.reply_arrived()).await;
    assert!(waited.is_err());
}
