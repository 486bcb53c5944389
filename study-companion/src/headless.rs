//! One-shot commands driving the workflows without the terminal UI

use std::path::Path;

use study_companion_sdk::{FileHandle, StudyClient};
use tokio::runtime::Handle;
use tracing::info;

use crate::config::Command;
use crate::error::{StudyError, StudyResult};
use crate::preview::PreviewRegistry;
use crate::workflows::{
    ConversationWorkflow, MediaAnalysisWorkflow, MediaKind, MediaPhase, Outcome, UploadWorkflow,
};

/// Run `command` and print its result to stdout
pub async fn run(command: Command, client: StudyClient) -> StudyResult<()> {
    let output = execute(command, client).await?;
    println!("{}", output);
    Ok(())
}

/// Run `command` and return the text it would print
pub async fn execute(command: Command, client: StudyClient) -> StudyResult<String> {
    match command {
        Command::Ask { query } => ask(client, &query.join(" ")).await,
        Command::Upload { path } => upload(client, &path).await,
        Command::Diagram { path } => analyze(client, MediaKind::Diagram, &path).await,
        Command::Equation { path } => analyze(client, MediaKind::Equation, &path).await,
        Command::Documents => {
            let docs = client.documents().await?;
            if docs.is_empty() {
                Ok("No documents uploaded yet.".to_string())
            } else {
                Ok(docs.names().join("\n"))
            }
        }
        Command::Health => {
            let health = client.health().await?;
            if health.is_healthy() {
                Ok(format!("Backend is {}", health.status))
            } else {
                Err(StudyError::Rejected(format!("Backend reports status '{}'", health.status)))
            }
        }
    }
}

async fn ask(client: StudyClient, query: &str) -> StudyResult<String> {
    let mut conversation = ConversationWorkflow::new(client, Handle::current());
    if !conversation.submit(query) {
        return Err(StudyError::Validation("question must not be empty".to_string()));
    }
    if !conversation.wait_for_response().await {
        return Err(StudyError::Unknown("no reply from chat request".to_string()));
    }

    if let Some(error) = conversation.last_error() {
        return Err(StudyError::Rejected(format!("{} ({})", crate::workflows::APOLOGY, error)));
    }
    conversation
        .messages()
        .last()
        .map(|message| message.content().to_string())
        .ok_or_else(|| StudyError::Unknown("empty conversation".to_string()))
}

async fn upload(client: StudyClient, path: &Path) -> StudyResult<String> {
    let file = read_file(path).await?;
    let mut workflow = UploadWorkflow::new(client, Handle::current());
    workflow.drop_file(file);
    workflow.wait_for_response().await;

    match workflow.last_attempt() {
        Some(attempt) if attempt.outcome == Outcome::Success => Ok(attempt.detail.clone()),
        Some(attempt) => Err(StudyError::Rejected(attempt.detail.clone())),
        None => Err(StudyError::Unknown("upload did not complete".to_string())),
    }
}

async fn analyze(client: StudyClient, kind: MediaKind, path: &Path) -> StudyResult<String> {
    let file = read_file(path).await?;
    info!(?kind, file = file.name(), "running headless analysis");

    let mut workflow = MediaAnalysisWorkflow::new(kind, client, Handle::current(), PreviewRegistry::new());
    workflow.select(file);
    workflow.analyze();
    workflow.wait_for_response().await;

    let outcome = match workflow.phase() {
        MediaPhase::Complete => Ok(workflow.result().unwrap_or_default().to_string()),
        MediaPhase::Failed => Err(StudyError::Rejected(
            workflow.error().unwrap_or(kind.generic_error()).to_string(),
        )),
        phase => Err(StudyError::Unknown(format!("analysis stopped in {:?}", phase))),
    };
    workflow.clear();
    outcome
}

async fn read_file(path: &Path) -> StudyResult<FileHandle> {
    FileHandle::read(path).await.map_err(|source| StudyError::File {
        path: path.to_path_buf(),
        source,
    })
}
