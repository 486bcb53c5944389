//! Media analysis workflow tests

use serde_json::json;
use study_companion::preview::PreviewRegistry;
use study_companion::workflows::{MediaAnalysisWorkflow, MediaKind, MediaPhase, ReplyOutcome};
use study_companion_sdk::Endpoint;
use tokio::runtime::Handle;

use super::common::*;

fn workflow(kind: MediaKind, transport: &std::sync::Arc<FakeTransport>, previews: &PreviewRegistry) -> MediaAnalysisWorkflow {
    MediaAnalysisWorkflow::new(kind, client(transport), Handle::current(), previews.clone())
}

#[tokio::test]
async fn test_diagram_analysis_completes() {
    let transport = FakeTransport::new();
    transport.respond(
        Endpoint::ParseDiagram,
        Scripted::Body(json!({ "explanation": "This is a CNN filter." })),
    );
    let previews = PreviewRegistry::new();
    let mut diagram = workflow(MediaKind::Diagram, &transport, &previews);

    assert_eq!(diagram.phase(), MediaPhase::Empty);
    assert!(!diagram.can_analyze());

    diagram.select(image("cnn.png"));
    assert_eq!(diagram.phase(), MediaPhase::Ready);
    assert!(diagram.preview().is_some());

    assert!(diagram.analyze());
    assert_eq!(diagram.phase(), MediaPhase::Analyzing);
    assert!(diagram.wait_for_response().await);

    assert_eq!(diagram.phase(), MediaPhase::Complete);
    assert_eq!(diagram.result(), Some("This is a CNN filter."));
    assert!(diagram.error().is_none());

    let calls = transport.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].endpoint, Endpoint::ParseDiagram);
    assert_eq!(calls[0].file_name.as_deref(), Some("cnn.png"));
}

#[tokio::test]
async fn test_equation_failure_shows_backend_detail() {
    let transport = FakeTransport::new();
    transport.respond(Endpoint::SolveEquation, Scripted::Status(500, Some("OCR failed")));
    let previews = PreviewRegistry::new();
    let mut equation = workflow(MediaKind::Equation, &transport, &previews);

    equation.select(image("quadratic.png"));
    equation.analyze();
    equation.wait_for_response().await;

    assert_eq!(equation.phase(), MediaPhase::Failed);
    assert_eq!(equation.error(), Some("OCR failed"));
    assert!(equation.result().is_none());
}

#[tokio::test]
async fn test_failure_without_detail_uses_generic_message() {
    let transport = FakeTransport::new();
    transport.respond(Endpoint::ParseDiagram, Scripted::Status(502, None));
    transport.respond(Endpoint::SolveEquation, Scripted::Status(500, None));
    let previews = PreviewRegistry::new();

    let mut diagram = workflow(MediaKind::Diagram, &transport, &previews);
    diagram.select(image("a.png"));
    diagram.analyze();
    diagram.wait_for_response().await;
    assert_eq!(diagram.error(), Some("Failed to parse diagram. Please try again."));

    let mut equation = workflow(MediaKind::Equation, &transport, &previews);
    equation.select(image("b.png"));
    equation.analyze();
    equation.wait_for_response().await;
    assert_eq!(equation.error(), Some("Failed to solve equation. Please try again."));
}

#[tokio::test]
async fn test_missing_result_field_is_a_failure() {
    let transport = FakeTransport::new();
    transport.respond(Endpoint::SolveEquation, Scripted::Body(json!({ "answer": "x = 2" })));
    let previews = PreviewRegistry::new();
    let mut equation = workflow(MediaKind::Equation, &transport, &previews);

    equation.select(image("eq.png"));
    equation.analyze();
    equation.wait_for_response().await;

    assert_eq!(equation.phase(), MediaPhase::Failed);
    assert_eq!(equation.error(), Some(MediaKind::Equation.generic_error()));
}

#[tokio::test]
async fn test_analyze_while_analyzing_sends_nothing() {
    let transport = FakeTransport::new();
    transport.respond(Endpoint::ParseDiagram, Scripted::EchoFile("explanation"));
    let previews = PreviewRegistry::new();
    let mut diagram = workflow(MediaKind::Diagram, &transport, &previews);

    diagram.select(image("cnn.png"));
    assert!(diagram.analyze());
    let generation = diagram.generation();
    assert!(!diagram.analyze());
    assert_eq!(diagram.generation(), generation);

    diagram.wait_for_response().await;
    assert_eq!(transport.call_count(Endpoint::ParseDiagram), 1);
}

#[tokio::test]
async fn test_analyze_without_selection_sends_nothing() {
    let transport = FakeTransport::new();
    let previews = PreviewRegistry::new();
    let mut equation = workflow(MediaKind::Equation, &transport, &previews);

    assert!(!equation.analyze());
    assert_eq!(equation.phase(), MediaPhase::Empty);
    assert!(!equation.wait_for_response().await);
    assert!(transport.calls().is_empty());
}

#[tokio::test]
async fn test_reply_after_reselect_is_discarded() {
    let transport = FakeTransport::new();
    transport.respond(Endpoint::ParseDiagram, Scripted::EchoFile("explanation"));
    let previews = PreviewRegistry::new();
    let mut diagram = workflow(MediaKind::Diagram, &transport, &previews);

    diagram.select(image("old.png"));
    diagram.analyze();
    diagram.select(image("new.png"));

    assert_eq!(diagram.next_reply().await, Some(ReplyOutcome::Discarded));
    assert_eq!(diagram.phase(), MediaPhase::Ready);
    assert!(diagram.result().is_none());
    assert_eq!(diagram.selected_file().map(|f| f.name()), Some("new.png"));
}

#[tokio::test]
async fn test_reply_after_clear_is_discarded() {
    let transport = FakeTransport::new();
    transport.respond(Endpoint::SolveEquation, Scripted::Status(500, Some("OCR failed")));
    let previews = PreviewRegistry::new();
    let mut equation = workflow(MediaKind::Equation, &transport, &previews);

    equation.select(image("eq.png"));
    equation.analyze();
    equation.clear();

    assert_eq!(equation.next_reply().await, Some(ReplyOutcome::Discarded));
    assert_eq!(equation.phase(), MediaPhase::Empty);
    assert!(equation.error().is_none());
}

#[tokio::test]
async fn test_only_latest_analysis_lands() {
    let transport = FakeTransport::new();
    transport.respond(Endpoint::ParseDiagram, Scripted::EchoFile("explanation"));
    let previews = PreviewRegistry::new();
    let mut diagram = workflow(MediaKind::Diagram, &transport, &previews);

    diagram.select(image("first.png"));
    diagram.analyze();
    diagram.select(image("second.png"));
    diagram.analyze();

    assert!(diagram.wait_for_response().await);
    assert_eq!(diagram.phase(), MediaPhase::Complete);
    assert_eq!(diagram.result(), Some("analyzed second.png"));
    assert_eq!(transport.call_count(Endpoint::ParseDiagram), 2);
}

#[tokio::test]
async fn test_new_selection_resets_previous_outcome() {
    let transport = FakeTransport::new();
    transport.respond(Endpoint::ParseDiagram, Scripted::EchoFile("explanation"));
    transport.respond(Endpoint::SolveEquation, Scripted::Status(500, Some("OCR failed")));
    let previews = PreviewRegistry::new();

    let mut diagram = workflow(MediaKind::Diagram, &transport, &previews);
    diagram.select(image("a.png"));
    diagram.analyze();
    diagram.wait_for_response().await;
    assert_eq!(diagram.phase(), MediaPhase::Complete);

    diagram.select(image("b.png"));
    assert_eq!(diagram.phase(), MediaPhase::Ready);
    assert!(diagram.result().is_none());
    assert!(diagram.error().is_none());

    let mut equation = workflow(MediaKind::Equation, &transport, &previews);
    equation.select(image("c.png"));
    equation.analyze();
    equation.wait_for_response().await;
    assert_eq!(equation.phase(), MediaPhase::Failed);

    equation.select(image("d.png"));
    assert_eq!(equation.phase(), MediaPhase::Ready);
    assert!(equation.result().is_none());
    assert!(equation.error().is_none());
}

#[tokio::test]
async fn test_finished_analysis_needs_new_selection() {
    let transport = FakeTransport::new();
    transport.respond(Endpoint::ParseDiagram, Scripted::EchoFile("explanation"));
    let previews = PreviewRegistry::new();
    let mut diagram = workflow(MediaKind::Diagram, &transport, &previews);

    diagram.select(image("a.png"));
    diagram.analyze();
    diagram.wait_for_response().await;

    assert!(!diagram.analyze());
    assert_eq!(transport.call_count(Endpoint::ParseDiagram), 1);
}

#[tokio::test]
async fn test_previews_released_on_replace_and_clear() {
    let transport = FakeTransport::new();
    let previews = PreviewRegistry::new();
    let mut diagram = workflow(MediaKind::Diagram, &transport, &previews);

    diagram.select(image("a.png"));
    let first = diagram.preview().unwrap().uri().to_string();
    assert!(previews.is_live(&first));

    diagram.select(image("b.png"));
    let second = diagram.preview().unwrap().uri().to_string();
    assert!(!previews.is_live(&first));
    assert!(previews.is_live(&second));
    assert_eq!(previews.live_count(), 1);

    diagram.clear();
    assert!(diagram.preview().is_none());
    assert!(!previews.is_live(&second));
    assert_eq!(previews.live_count(), 0);
    assert_eq!(previews.created_count(), 2);
    assert_eq!(previews.released_count(), 2);

    // Clearing twice releases nothing more
    diagram.clear();
    assert_eq!(previews.released_count(), 2);
}

#[tokio::test]
async fn test_dropping_workflow_releases_preview() {
    let transport = FakeTransport::new();
    let previews = PreviewRegistry::new();
    {
        let mut equation = workflow(MediaKind::Equation, &transport, &previews);
        equation.select(image("eq.png"));
        assert_eq!(previews.live_count(), 1);
    }
    assert_eq!(previews.live_count(), 0);
    assert_eq!(previews.released_count(), 1);
}

#[tokio::test]
async fn test_every_selection_change_bumps_generation() {
    let transport = FakeTransport::new();
    let previews = PreviewRegistry::new();
    let mut diagram = workflow(MediaKind::Diagram, &transport, &previews);

    let start = diagram.generation();
    diagram.select(image("a.png"));
    assert!(diagram.generation() > start);

    let after_select = diagram.generation();
    diagram.clear();
    assert!(diagram.generation() > after_select);
}
