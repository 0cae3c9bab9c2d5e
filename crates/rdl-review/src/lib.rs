//! # rdl-review
//!
//! Checklist review sessions for Redline.
//!
//! A [`ReviewSession`] holds one project's checklist: AI verdicts, per-item
//! comment threads, drafts, and confirmation checkboxes. It is finalized only
//! once every item is confirmed, and only a finalized review can be exported.
//! [`ReviewEngine`] keeps one session per project, reports status changes to
//! a [`ProjectRegistry`], and notifies [`ReviewObserver`]s such as the JSONL
//! [`TrailObserver`].

pub mod clock;
pub mod engine;
pub mod error;
pub mod observer;
pub mod outcome;
pub mod paging;
pub mod persist;
pub mod registry;
pub mod session;
pub mod store;
pub mod trail;

pub use clock::{Clock, FixedClock, SystemClock};
pub use engine::{EngineSettings, ExportReport, ExportTicket, ReviewEngine};
pub use error::ReviewError;
pub use observer::{ItemRef, RecordingObserver, ReviewEvent, ReviewObserver};
pub use outcome::{DraftKeyResponse, IgnoreReason, KeySignal, Outcome};
pub use persist::StateFile;
pub use registry::{InMemoryRegistry, ProjectRegistry};
pub use session::ReviewSession;
pub use store::SessionStore;
pub use trail::{TrailObserver, TrailRecord};
