//! Change notifications for review sessions.

use std::cell::RefCell;
use std::rc::Rc;

use chrono::{DateTime, Utc};
use rdl_core::enums::{ReviewAction, ReviewState};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::session::ReviewSession;

/// Position of a checklist item within a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ItemRef {
    pub category: usize,
    pub item: usize,
}

/// One applied mutation. Ignored mutations produce no event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ReviewEvent {
    pub project_id: u32,
    pub action: ReviewAction,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<ItemRef>,
    /// Session state after the mutation.
    pub state: ReviewState,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<serde_json::Value>,
    pub at: DateTime<Utc>,
}

/// Receives every applied mutation, after the session has been updated.
pub trait ReviewObserver {
    fn on_event(&mut self, event: &ReviewEvent, session: &ReviewSession);
}

/// Keeps events in memory. Clones share one buffer, so a test can keep a
/// handle after subscribing the observer to an engine.
#[derive(Debug, Clone, Default)]
pub struct RecordingObserver {
    events: Rc<RefCell<Vec<ReviewEvent>>>,
}

impl RecordingObserver {
    #[must_use]
    pub fn events(&self) -> Vec<ReviewEvent> {
        self.events.borrow().clone()
    }

    #[must_use]
    pub fn actions(&self) -> Vec<ReviewAction> {
        self.events.borrow().iter().map(|e| e.action).collect()
    }
}

impl ReviewObserver for RecordingObserver {
    fn on_event(&mut self, event: &ReviewEvent, _session: &ReviewSession) {
        self.events.borrow_mut().push(event.clone());
    }
}
