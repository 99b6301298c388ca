//! Open, edit, export and upload one worker photo

use std::path::{Path, PathBuf};
use std::time::Duration;

use annotation::{Confirm, EditorSession, LoadError, LoadOutcome};
use medstaff_client::ImageStore;
use tracing::{debug, info, warn};

use crate::error::AppError;
use crate::script::{EditScript, ReplaySummary};

/// Pause before the first retry; later retries wait proportionally longer
pub const RETRY_DELAY: Duration = Duration::from_millis(500);

/// One annotate run
#[derive(Debug, Clone)]
pub struct AnnotateJob {
    pub worker_id: i64,
    pub script: EditScript,
    /// Edit these bytes instead of the stored photo
    pub input: Option<Vec<u8>>,
    pub output: Option<PathBuf>,
    pub upload: bool,
    pub upload_attempts: u32,
    pub retry_delay: Duration,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotateOutcome {
    pub width: u32,
    pub height: u32,
    pub replay: ReplaySummary,
    pub history_len: usize,
    pub written: Option<PathBuf>,
    /// Attempts used by a successful upload; `None` when not uploading
    pub upload_attempts: Option<u32>,
}

/// Run an annotate job against a photo store
///
/// The engine lives in `session` for the whole run. If the upload keeps
/// failing the session is left open with its history intact, so the caller
/// can export or upload again without replaying the edits.
pub async fn annotate<S, C>(
    store: &S,
    session: &mut EditorSession,
    job: &AnnotateJob,
    confirm: &mut C,
) -> Result<AnnotateOutcome, AppError>
where
    S: ImageStore,
    C: Confirm + ?Sized,
{
    let ticket = session.begin_load();
    let bytes = match &job.input {
        Some(bytes) => bytes.clone(),
        None => match store.fetch_image(job.worker_id).await {
            Ok(Some(bytes)) => bytes,
            Ok(None) => return Err(fail(session, ticket, "worker has no photo")),
            Err(err) => return Err(fail(session, ticket, err.to_string())),
        },
    };

    let (width, height) = match session.complete_load(ticket, &bytes)? {
        LoadOutcome::Opened { width, height } => (width, height),
        LoadOutcome::Stale => return Err(AppError::Superseded),
    };
    let engine = session.engine_mut().ok_or(AppError::Superseded)?;

    let replay = job.script.replay(engine, confirm);
    info!(
        "Replayed {} actions ({} rejected, {} declined)",
        replay.applied, replay.rejected, replay.declined
    );

    let png = engine.export_bitmap()?;
    let history_len = engine.history().len();

    let written = match &job.output {
        Some(path) => {
            write_png(path, &png)?;
            Some(path.clone())
        }
        None => None,
    };

    let upload_attempts = if job.upload {
        Some(upload_with_retry(store, job, png).await?)
    } else {
        None
    };

    session.finish();
    Ok(AnnotateOutcome {
        width,
        height,
        replay,
        history_len,
        written,
        upload_attempts,
    })
}

fn fail(
    session: &mut EditorSession,
    ticket: annotation::LoadTicket,
    reason: impl Into<String>,
) -> AppError {
    let reason = reason.into();
    session
        .fail_load(ticket, reason.clone())
        .unwrap_or(LoadError::Fetch(reason))
        .into()
}

fn write_png(path: &Path, png: &[u8]) -> Result<(), AppError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, png)?;
    info!("Wrote {} ({} bytes)", path.display(), png.len());
    Ok(())
}

async fn upload_with_retry<S: ImageStore>(
    store: &S,
    job: &AnnotateJob,
    png: Vec<u8>,
) -> Result<u32, AppError> {
    let attempts = job.upload_attempts.max(1);
    let mut attempt = 1;
    loop {
        match store.store_image(job.worker_id, png.clone()).await {
            Ok(()) => {
                info!("Uploaded photo for worker {} (attempt {})", job.worker_id, attempt);
                return Ok(attempt);
            }
            Err(err) if attempt < attempts => {
                warn!("Upload attempt {}/{} failed: {}", attempt, attempts, err);
                let delay = job.retry_delay * attempt;
                if !delay.is_zero() {
                    debug!("Retrying in {:?}", delay);
                    tokio::time::sleep(delay).await;
                }
                attempt += 1;
            }
            Err(err) => {
                return Err(AppError::Upload {
                    attempts,
                    source: err,
                });
            }
        }
    }
}
