//! Conversation workflow tests

use serde_json::json;
use study_companion::workflows::{ConversationPhase, ConversationWorkflow, Speaker, APOLOGY, GREETING};
use study_companion_sdk::Endpoint;
use tokio::runtime::Handle;

use super::common::*;

#[tokio::test]
async fn test_question_gets_answer_appended() {
    let transport = FakeTransport::new();
    transport.respond(
        Endpoint::Chat,
        Scripted::Body(json!({ "response": "Edge detection finds **intensity** discontinuities." })),
    );
    let mut chat = ConversationWorkflow::new(client(&transport), Handle::current());

    assert!(chat.submit("What is edge detection?"));
    assert_eq!(chat.phase(), ConversationPhase::AwaitingReply);
    assert!(chat.wait_for_response().await);

    let messages = chat.messages();
    assert_eq!(messages.len(), 3);
    assert_eq!(messages[0].content(), GREETING);
    assert_eq!(messages[1].role(), Speaker::User);
    assert_eq!(messages[1].content(), "What is edge detection?");
    assert_eq!(messages[2].role(), Speaker::Assistant);
    assert_eq!(messages[2].content(), "Edge detection finds **intensity** discontinuities.");
    assert_eq!(chat.phase(), ConversationPhase::Idle);
    assert!(chat.last_error().is_none());

    let calls = transport.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].body, Some(json!({ "query": "What is edge detection?" })));
}

#[tokio::test]
async fn test_blank_question_is_ignored() {
    let transport = FakeTransport::new();
    let mut chat = ConversationWorkflow::new(client(&transport), Handle::current());

    assert!(!chat.submit(""));
    assert!(!chat.submit("   \n\t"));

    assert_eq!(chat.messages().len(), 1);
    assert_eq!(chat.phase(), ConversationPhase::Idle);
    assert!(!chat.wait_for_response().await);
    assert!(transport.calls().is_empty());
}

#[tokio::test]
async fn test_question_is_trimmed() {
    let transport = FakeTransport::new();
    transport.respond(Endpoint::Chat, Scripted::Body(json!({ "response": "ok" })));
    let mut chat = ConversationWorkflow::new(client(&transport), Handle::current());

    chat.submit("  what is a kernel?  ");
    chat.wait_for_response().await;

    assert_eq!(chat.messages()[1].content(), "what is a kernel?");
    assert_eq!(transport.calls()[0].body, Some(json!({ "query": "what is a kernel?" })));
}

#[tokio::test]
async fn test_second_submit_while_waiting_is_ignored() {
    let transport = FakeTransport::new();
    transport.respond(Endpoint::Chat, Scripted::Body(json!({ "response": "first" })));
    let mut chat = ConversationWorkflow::new(client(&transport), Handle::current());

    assert!(chat.submit("first question"));
    assert!(!chat.submit("second question"));
    chat.wait_for_response().await;

    assert_eq!(transport.call_count(Endpoint::Chat), 1);
    let contents: Vec<&str> = chat.messages().iter().map(|m| m.content()).collect();
    assert_eq!(contents, vec![GREETING, "first question", "first"]);
}

#[tokio::test]
async fn test_failed_request_appends_apology() {
    let transport = FakeTransport::new();
    transport.respond(Endpoint::Chat, Scripted::Status(500, Some("vector store offline")));
    let mut chat = ConversationWorkflow::new(client(&transport), Handle::current());

    chat.submit("What is a Gaussian blur?");
    assert!(chat.wait_for_response().await);

    let last = chat.messages().last().unwrap();
    assert_eq!(last.role(), Speaker::Assistant);
    assert_eq!(last.content(), APOLOGY);
    assert!(chat.last_error().unwrap().contains("vector store offline"));
    assert_eq!(chat.phase(), ConversationPhase::Idle);

    // The workflow accepts the next question after a failure
    transport.respond(Endpoint::Chat, Scripted::Body(json!({ "response": "A low-pass filter." })));
    assert!(chat.submit("What is a Gaussian blur?"));
    chat.wait_for_response().await;
    assert_eq!(chat.messages().last().unwrap().content(), "A low-pass filter.");
    assert!(chat.last_error().is_none());
}

#[tokio::test]
async fn test_input_buffer_submits_and_clears() {
    let transport = FakeTransport::new();
    transport.respond(Endpoint::Chat, Scripted::Body(json!({ "response": "yes" })));
    let mut chat = ConversationWorkflow::new(client(&transport), Handle::current());

    chat.push_str("is Canny ");
    chat.push_char('?');
    chat.backspace();
    chat.push_str("multi-stage?");
    assert!(chat.can_submit());

    assert!(chat.submit_input());
    assert_eq!(chat.input(), "");
    assert!(!chat.can_submit());
    chat.wait_for_response().await;

    assert_eq!(chat.messages()[1].content(), "is Canny multi-stage?");
}

#[tokio::test]
async fn test_new_message_returns_to_tail() {
    let transport = FakeTransport::new();
    transport.respond(Endpoint::Chat, Scripted::Body(json!({ "response": "answer" })));
    let mut chat = ConversationWorkflow::new(client(&transport), Handle::current());

    chat.scroll_up(5);
    assert_eq!(chat.scroll_from_bottom(), 5);

    chat.submit("question");
    chat.wait_for_response().await;
    assert_eq!(chat.scroll_from_bottom(), 0);
}

#[tokio::test]
async fn test_scroll_up_stops_at_rendered_limit() {
    let transport = FakeTransport::new();
    let mut chat = ConversationWorkflow::new(client(&transport), Handle::current());

    chat.set_scroll_limit(3);
    chat.scroll_up(10);
    assert_eq!(chat.scroll_from_bottom(), 3);
    chat.scroll_down(1);
    assert_eq!(chat.scroll_from_bottom(), 2);

    chat.scroll_up(u16::MAX);
    chat.set_scroll_limit(1);
    assert_eq!(chat.effective_scroll(), 1);
}

#[tokio::test]
async fn test_poll_applies_reply_without_blocking() {
    let transport = FakeTransport::new();
    transport.respond(Endpoint::Chat, Scripted::Body(json!({ "response": "polled" })));
    let mut chat = ConversationWorkflow::new(client(&transport), Handle::current());

    chat.submit("question");
    // Nothing has run yet on this runtime
    assert!(!chat.poll());
    assert!(chat.is_awaiting_reply());

    for _ in 0..100 {
        tokio::task::yield_now().await;
        if chat.poll() {
            break;
        }
    }
    assert!(!chat.is_awaiting_reply());
    assert_eq!(chat.messages().last().unwrap().content(), "polled");
}
