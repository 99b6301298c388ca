//! Editor session lifecycle: idle, loading, editing.
//!
//! Loading the source bitmap is the one asynchronous step. The session hands
//! out a [`LoadTicket`] when a load starts and only accepts the result for the
//! newest ticket; a load that completes after the editor was closed (or after
//! another load started) is dropped without touching any surface.

use medstaff_config::EditorConfig;
use tracing::{debug, info, warn};

use crate::confirm::Confirm;
use crate::constants::CLOSE_PROMPT;
use crate::engine::AnnotationEngine;
use crate::error::LoadError;

/// Identifies one load request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LoadTicket(u64);

/// Where the session is in its lifecycle
pub enum SessionState {
    /// No editor open
    Idle,
    /// Waiting for the source bitmap
    Loading(LoadTicket),
    /// Editor open
    Editing(Box<AnnotationEngine>),
}

/// Result of delivering a finished load
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The editor opened with a surface of this size
    Opened { width: u32, height: u32 },
    /// The ticket is no longer current; the result was ignored
    Stale,
}

/// Owns at most one editor and its load lifecycle
pub struct EditorSession {
    config: EditorConfig,
    state: SessionState,
    next_ticket: u64,
}

impl EditorSession {
    pub fn new(config: EditorConfig) -> Self {
        Self {
            config,
            state: SessionState::Idle,
            next_ticket: 0,
        }
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.state, SessionState::Idle)
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, SessionState::Loading(_))
    }

    /// The open editor, if any
    pub fn engine(&self) -> Option<&AnnotationEngine> {
        match &self.state {
            SessionState::Editing(engine) => Some(&**engine),
            _ => None,
        }
    }

    pub fn engine_mut(&mut self) -> Option<&mut AnnotationEngine> {
        match &mut self.state {
            SessionState::Editing(engine) => Some(&mut **engine),
            _ => None,
        }
    }

    /// Start loading a new source bitmap
    ///
    /// Any open editor or pending load is superseded.
    pub fn begin_load(&mut self) -> LoadTicket {
        let ticket = LoadTicket(self.next_ticket);
        self.next_ticket += 1;
        if matches!(self.state, SessionState::Editing(_)) {
            debug!("Reopening editor; previous session discarded");
        }
        self.state = SessionState::Loading(ticket);
        ticket
    }

    fn is_current(&self, ticket: LoadTicket) -> bool {
        matches!(self.state, SessionState::Loading(current) if current == ticket)
    }

    /// Deliver the bytes for a load started with `begin_load`
    ///
    /// Stale tickets are ignored. On a decode failure the session goes back
    /// to idle and the error is returned so the caller can ask for a fresh
    /// upload.
    pub fn complete_load(
        &mut self,
        ticket: LoadTicket,
        bytes: &[u8],
    ) -> Result<LoadOutcome, LoadError> {
        if !self.is_current(ticket) {
            debug!("Ignoring stale load {:?}", ticket);
            return Ok(LoadOutcome::Stale);
        }

        match AnnotationEngine::open_with_config(bytes, &self.config) {
            Ok(engine) => {
                let (width, height) = (engine.width(), engine.height());
                self.state = SessionState::Editing(Box::new(engine));
                info!("Editor open ({}x{})", width, height);
                Ok(LoadOutcome::Opened { width, height })
            }
            Err(err) => {
                warn!("Failed to open editor: {}", err);
                self.state = SessionState::Idle;
                Err(err)
            }
        }
    }

    /// Report that fetching the source failed
    ///
    /// Returns the error for the current ticket, or None if it was stale.
    pub fn fail_load(
        &mut self,
        ticket: LoadTicket,
        reason: impl Into<String>,
    ) -> Option<LoadError> {
        if !self.is_current(ticket) {
            return None;
        }
        self.state = SessionState::Idle;
        Some(LoadError::Fetch(reason.into()))
    }

    /// Close the editor without saving
    ///
    /// An open editor asks for confirmation first; a pending load is simply
    /// cancelled. Returns whether the session is now idle.
    pub fn close<C: Confirm + ?Sized>(&mut self, confirm: &mut C) -> bool {
        match self.state {
            SessionState::Idle => true,
            SessionState::Loading(ticket) => {
                debug!("Cancelling pending load {:?}", ticket);
                self.state = SessionState::Idle;
                true
            }
            SessionState::Editing(_) => {
                if !confirm.confirm(CLOSE_PROMPT) {
                    return false;
                }
                self.state = SessionState::Idle;
                info!("Editor closed without saving");
                true
            }
        }
    }

    /// Close after a successful save, handing back the engine
    pub fn finish(&mut self) -> Option<AnnotationEngine> {
        match std::mem::replace(&mut self.state, SessionState::Idle) {
            SessionState::Editing(engine) => Some(*engine),
            other => {
                self.state = other;
                None
            }
        }
    }
}
