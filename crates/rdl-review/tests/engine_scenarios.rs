use std::path::PathBuf;

use chrono::DateTime;
use pretty_assertions::assert_eq;
use rdl_core::entities::Project;
use rdl_core::enums::{ExportFormat, ProjectStatus, ReviewAction, ReviewState};
use rdl_core::responses::ReviewView;
use rdl_export::{Artifact, ArtifactSink, ExportError, FileSink, SpreadsheetRenderer, renderer_for};
use rdl_review::{
    EngineSettings, FixedClock, IgnoreReason, InMemoryRegistry, KeySignal, Outcome,
    ProjectRegistry, RecordingObserver, ReviewEngine, ReviewError,
};
use tempfile::TempDir;

fn engine_with(settings: EngineSettings) -> (ReviewEngine<InMemoryRegistry>, RecordingObserver) {
    let at = DateTime::from_timestamp(1_724_112_000, 0).unwrap();
    let clock = FixedClock::new(at, "2024. 8. 20. 오후 3:00:00");
    let mut engine = ReviewEngine::new(InMemoryRegistry::seeded(), Box::new(clock), settings);
    let recorder = RecordingObserver::default();
    engine.subscribe(Box::new(recorder.clone()));
    (engine, recorder)
}

fn engine() -> (ReviewEngine<InMemoryRegistry>, RecordingObserver) {
    engine_with(EngineSettings::default())
}

struct BrokenSink;

impl ArtifactSink for BrokenSink {
    fn save(&self, _artifact: &Artifact) -> Result<PathBuf, ExportError> {
        Err(ExportError::Render("disk full".into()))
    }
}

/// Seeded registry that can refuse the completion status changes.
struct FlakyRegistry {
    inner: InMemoryRegistry,
    refuse_complete: bool,
    refuse_revert: bool,
}

impl FlakyRegistry {
    fn refusing(refuse_complete: bool, refuse_revert: bool) -> Self {
        Self {
            inner: InMemoryRegistry::seeded(),
            refuse_complete,
            refuse_revert,
        }
    }
}

impl ProjectRegistry for FlakyRegistry {
    fn project(&self, id: u32) -> Option<&Project> {
        self.inner.project(id)
    }

    fn start_review(&mut self, id: u32) -> Result<(), ReviewError> {
        self.inner.start_review(id)
    }

    fn mark_review_complete(&mut self, id: u32) -> Result<(), ReviewError> {
        if self.refuse_complete {
            return Err(ReviewError::State("registry offline".into()));
        }
        self.inner.mark_review_complete(id)
    }

    fn revert_review_complete(&mut self, id: u32) -> Result<(), ReviewError> {
        if self.refuse_revert {
            return Err(ReviewError::State("registry offline".into()));
        }
        self.inner.revert_review_complete(id)
    }
}

fn flaky_engine(registry: FlakyRegistry) -> (ReviewEngine<FlakyRegistry>, RecordingObserver) {
    let at = DateTime::from_timestamp(1_724_112_000, 0).unwrap();
    let clock = FixedClock::new(at, "2024. 8. 20. 오후 3:00:00");
    let mut engine = ReviewEngine::new(registry, Box::new(clock), EngineSettings::default());
    let recorder = RecordingObserver::default();
    engine.subscribe(Box::new(recorder.clone()));
    (engine, recorder)
}

#[test]
fn no_project_shows_select_prompt() {
    let (mut engine, recorder) = engine();
    let view = engine.view(None).unwrap();
    assert_eq!(
        view,
        ReviewView::NoProjectSelected {
            message: "프로젝트를 선택해주세요.".into()
        }
    );
    assert!(recorder.events().is_empty());
}

#[test]
fn unknown_project_is_an_error() {
    let (mut engine, _) = engine();
    assert!(matches!(
        engine.view(Some(42)),
        Err(ReviewError::ProjectNotFound(42))
    ));
}

#[test]
fn opening_an_unreviewed_project_starts_its_review() {
    let (mut engine, recorder) = engine();
    let view = engine.view(Some(2)).unwrap();
    let ReviewView::Selected { summary, categories } = view else {
        panic!("expected a selected view");
    };
    assert_eq!(summary.total_items, 15);
    assert_eq!(summary.checked_items, 0);
    assert_eq!(categories.len(), 2);
    assert_eq!(
        engine.registry().project(2).unwrap().status,
        ProjectStatus::Reviewing
    );
    assert_eq!(recorder.actions(), vec![ReviewAction::SessionOpened]);

    engine.view(Some(2)).unwrap();
    assert_eq!(recorder.actions().len(), 1);
}

#[test]
fn full_review_lifecycle() {
    let (mut engine, recorder) = engine();

    assert_eq!(engine.add_comment(1, 0, 0, "Looks fine").unwrap(), Outcome::Applied);
    engine.set_draft_comment(1, 0, 0, "Second").unwrap();
    let response = engine.submit_draft_on_key(1, 0, 0, KeySignal::Enter).unwrap();
    assert!(response.suppress_default);
    assert_eq!(response.outcome, Outcome::Applied);

    let item = engine.item(1, 0, 0).unwrap();
    let texts: Vec<&str> = item.comments.iter().map(|c| c.text.as_str()).collect();
    assert_eq!(texts, vec!["Second", "Looks fine"]);
    assert_eq!(item.comments[0].author, "작성자");
    assert_eq!(item.comments[0].timestamp, "2024. 8. 20. 오후 3:00:00");
    assert!(item.draft_comment.is_empty());

    assert_eq!(
        engine.finalize(1).unwrap(),
        Outcome::Ignored(IgnoreReason::NotAllChecked)
    );
    engine.set_all_checked(1, true).unwrap();
    assert_eq!(engine.finalize(1).unwrap(), Outcome::Applied);

    let summary = engine.summary(1).unwrap();
    assert_eq!(summary.state, ReviewState::Complete);
    assert!(summary.is_export_ready);
    let project = engine.registry().project(1).unwrap();
    assert_eq!(project.status, ProjectStatus::Reviewed);
    assert!(project.is_complete);

    assert_eq!(
        recorder.actions(),
        vec![
            ReviewAction::SessionOpened,
            ReviewAction::CommentAdded,
            ReviewAction::DraftUpdated,
            ReviewAction::CommentAdded,
            ReviewAction::AllChecksSet,
            ReviewAction::Finalized,
        ]
    );
}

#[test]
fn other_keys_are_left_to_the_editor() {
    let (mut engine, recorder) = engine();
    engine.set_draft_comment(1, 1, 2, "draft").unwrap();
    let response = engine.submit_draft_on_key(1, 1, 2, KeySignal::Other).unwrap();
    assert!(!response.suppress_default);
    assert_eq!(response.outcome, Outcome::Ignored(IgnoreReason::KeyNotHandled));
    assert_eq!(engine.item(1, 1, 2).unwrap().draft_comment, "draft");
    assert_eq!(recorder.actions().last(), Some(&ReviewAction::DraftUpdated));
}

#[test]
fn custom_author_is_recorded() {
    let (mut engine, _) = engine();
    engine.add_comment_as(1, 0, 1, "  대표자 확인 필요  ", "법무팀").unwrap();
    let comment = &engine.item(1, 0, 1).unwrap().comments[0];
    assert_eq!(comment.author, "법무팀");
    assert_eq!(comment.text, "대표자 확인 필요");
}

#[test]
fn out_of_range_item_is_an_error() {
    let (mut engine, _) = engine();
    assert!(matches!(
        engine.toggle_checked(1, 1, 3),
        Err(ReviewError::ItemNotFound { category: 1, item: 3 })
    ));
    assert!(matches!(
        engine.add_comment(1, 2, 0, "x"),
        Err(ReviewError::ItemNotFound { category: 2, item: 0 })
    ));
}

#[test]
fn completed_project_opens_read_only() {
    let (mut engine, recorder) = engine();
    let summary = engine.summary(3).unwrap();
    assert!(summary.is_complete);

    assert_eq!(
        engine.toggle_checked(3, 0, 0).unwrap(),
        Outcome::Ignored(IgnoreReason::ReviewComplete)
    );
    assert_eq!(
        engine.add_comment(3, 0, 0, "late").unwrap(),
        Outcome::Ignored(IgnoreReason::ReviewComplete)
    );
    assert_eq!(
        engine.finalize(3).unwrap(),
        Outcome::Ignored(IgnoreReason::AlreadyComplete)
    );
    assert_eq!(recorder.actions(), vec![ReviewAction::SessionOpened]);
}

#[test]
fn cancel_reverts_registry_when_configured() {
    let (mut engine, _) = engine();
    engine.set_all_checked(1, true).unwrap();
    engine.add_comment(1, 0, 0, "ok").unwrap();
    engine.finalize(1).unwrap();

    assert_eq!(engine.cancel_review(1).unwrap(), Outcome::Applied);
    let summary = engine.summary(1).unwrap();
    assert_eq!(summary.state, ReviewState::InProgress);
    assert!(summary.all_checked);
    assert_eq!(engine.item(1, 0, 0).unwrap().comments.len(), 1);

    let project = engine.registry().project(1).unwrap();
    assert_eq!(project.status, ProjectStatus::Reviewing);
    assert!(!project.is_complete);
}

#[test]
fn cancel_can_leave_registry_alone() {
    let (mut engine, _) = engine_with(EngineSettings {
        author: "작성자".into(),
        revert_registry_on_cancel: false,
    });
    engine.set_all_checked(1, true).unwrap();
    engine.finalize(1).unwrap();
    engine.cancel_review(1).unwrap();

    assert!(!engine.summary(1).unwrap().is_complete);
    assert_eq!(
        engine.registry().project(1).unwrap().status,
        ProjectStatus::Reviewed
    );
}

#[test]
fn cancel_while_in_progress_is_ignored() {
    let (mut engine, _) = engine();
    assert_eq!(
        engine.cancel_review(1).unwrap(),
        Outcome::Ignored(IgnoreReason::NotComplete)
    );
}

#[test]
fn export_requires_a_finalized_review() {
    let dir = TempDir::new().unwrap();
    let (mut engine, _) = engine();
    let report = engine
        .export_artifact(1, &SpreadsheetRenderer, &FileSink::new(dir.path()))
        .unwrap();
    assert_eq!(report.outcome, Outcome::Ignored(IgnoreReason::NotExportReady));
    assert!(report.path.is_none());
    assert!(std::fs::read_dir(dir.path()).unwrap().next().is_none());
}

#[test]
fn export_writes_the_review_table() {
    let dir = TempDir::new().unwrap();
    let (mut engine, recorder) = engine();
    engine.add_comment(1, 1, 1, "보증서 사본 첨부").unwrap();
    engine.set_all_checked(1, true).unwrap();
    engine.finalize(1).unwrap();

    let renderer = renderer_for(ExportFormat::Spreadsheet);
    let report = engine
        .export_artifact(1, renderer.as_ref(), &FileSink::new(dir.path()))
        .unwrap();
    assert_eq!(report.outcome, Outcome::Applied);
    let path = report.path.unwrap();
    assert_eq!(path.file_name().unwrap(), "review-DS00000001.csv");

    let text = std::fs::read_to_string(path).unwrap();
    assert_eq!(text.lines().count(), 16);
    assert!(text.contains("보증,계약이행보증,FAIL,작성자 (2024. 8. 20. 오후 3:00:00): 보증서 사본 첨부"));
    assert!(!engine.is_export_in_flight(1));
    assert_eq!(recorder.actions().last(), Some(&ReviewAction::Exported));
}

#[test]
fn second_export_while_in_flight_is_ignored() {
    let dir = TempDir::new().unwrap();
    let (mut engine, _) = engine();
    let ticket = engine
        .begin_export(3, ExportFormat::Pdf)
        .unwrap()
        .expect("project 3 is finalized");
    assert_eq!(ticket.table().rows.len(), 15);

    let report = engine
        .export_artifact(3, &SpreadsheetRenderer, &FileSink::new(dir.path()))
        .unwrap();
    assert_eq!(report.outcome, Outcome::Ignored(IgnoreReason::ExportInFlight));

    engine.abandon_export(ticket);
    let report = engine
        .export_artifact(3, &SpreadsheetRenderer, &FileSink::new(dir.path()))
        .unwrap();
    assert_eq!(report.outcome, Outcome::Applied);
}

#[test]
fn failed_export_releases_the_busy_flag() {
    let (mut engine, recorder) = engine();
    let result = engine.export_artifact(3, &SpreadsheetRenderer, &BrokenSink);
    assert!(matches!(result, Err(ReviewError::Export(_))));
    assert!(!engine.is_export_in_flight(3));
    assert!(engine.summary(3).unwrap().is_complete);
    assert!(!recorder.actions().contains(&ReviewAction::Exported));
}

#[test]
fn sessions_survive_project_switches() {
    let (mut engine, _) = engine();
    engine.toggle_checked(1, 0, 4).unwrap();
    engine.set_draft_comment(2, 0, 0, "half written").unwrap();
    engine.view(Some(1)).unwrap();

    assert!(engine.item(1, 0, 4).unwrap().is_checked);
    assert_eq!(engine.item(2, 0, 0).unwrap().draft_comment, "half written");
    assert!(!engine.item(2, 0, 4).unwrap().is_checked);
}

#[test]
fn refused_completion_rolls_the_session_back() {
    let (mut engine, recorder) = flaky_engine(FlakyRegistry::refusing(true, false));
    engine.set_all_checked(1, true).unwrap();

    assert!(matches!(engine.finalize(1), Err(ReviewError::State(_))));

    let summary = engine.summary(1).unwrap();
    assert_eq!(summary.state, ReviewState::InProgress);
    assert!(!summary.is_export_ready);
    let project = engine.registry().project(1).unwrap();
    assert_eq!(project.status, ProjectStatus::Reviewing);
    assert!(!project.is_complete);
    assert!(!recorder.actions().contains(&ReviewAction::Finalized));

    engine.registry_mut().refuse_complete = false;
    assert_eq!(engine.finalize(1).unwrap(), Outcome::Applied);
}

#[test]
fn refused_revert_keeps_the_review_finalized() {
    let (mut engine, recorder) = flaky_engine(FlakyRegistry::refusing(false, true));
    engine.set_all_checked(1, true).unwrap();
    assert_eq!(engine.finalize(1).unwrap(), Outcome::Applied);

    assert!(matches!(engine.cancel_review(1), Err(ReviewError::State(_))));

    let summary = engine.summary(1).unwrap();
    assert_eq!(summary.state, ReviewState::Complete);
    assert!(summary.is_export_ready);
    let project = engine.registry().project(1).unwrap();
    assert_eq!(project.status, ProjectStatus::Reviewed);
    assert!(project.is_complete);
    assert_eq!(recorder.actions().last(), Some(&ReviewAction::Finalized));
    assert!(!recorder.actions().contains(&ReviewAction::Cancelled));
}
