use crate::session::Session;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use watchworthy_core::{AnalysisQuery, RequestState, SubmitError};

pub async fn run(session: &Session, url: &str, json: bool) -> anyhow::Result<()> {
    let orchestrator = session.orchestrator()?;
    let progress = spawn_progress(orchestrator.subscribe());

    let state = match orchestrator.submit(AnalysisQuery::new(url)).await {
        Ok(state) => state,
        Err(SubmitError::InvalidQuery) => {
            progress.abort();
            anyhow::bail!("Enter a video URL to analyze");
        }
        Err(e) => {
            progress.abort();
            return Err(e.into());
        }
    };

    // The terminal state ends the progress line
    progress.await.ok();

    match state {
        RequestState::Resolved { document } => super::print_document(&document, json),
        RequestState::Failed { reason } => anyhow::bail!(
            "Analysis failed: {}. Check that the service at {} is reachable and try again.",
            reason,
            session.config.endpoint
        ),
        other => anyhow::bail!("request ended in unexpected state {:?}", other),
    }
}

/// Redraw the elapsed-seconds line on stderr until the request leaves InFlight
fn spawn_progress(mut states: watch::Receiver<RequestState>) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut drawn = false;
        while states.changed().await.is_ok() {
            let state = states.borrow_and_update().clone();
            if !state.is_in_flight() {
                break;
            }
            eprint!(
                "\rGenerating summary... elapsed {}s",
                state.elapsed_seconds()
            );
            drawn = true;
        }
        if drawn {
            eprintln!();
        }
    })
}
