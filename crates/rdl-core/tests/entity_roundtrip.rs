//! Serde roundtrip and JsonSchema validation tests for entity and response types.

use chrono::Utc;
use rdl_core::catalog::{default_checklist, seed_projects};
use rdl_core::entities::*;
use rdl_core::enums::*;
use rdl_core::export::{ExportRow, ExportTable};
use rdl_core::responses::*;
use schemars::schema_for;

/// Validate a JSON value against a schemars-generated schema.
fn validate_against_schema(
    schema: &serde_json::Value,
    instance: &serde_json::Value,
) -> Vec<String> {
    let validator = jsonschema::validator_for(schema).expect("schema should be valid");
    validator
        .iter_errors(instance)
        .map(|e| format!("{e}"))
        .collect()
}

macro_rules! roundtrip_and_validate {
    ($name:ident, $ty:ty, $instance:expr) => {
        #[test]
        fn $name() {
            let val: $ty = $instance;

            let json_str = serde_json::to_string_pretty(&val).unwrap();
            let recovered: $ty = serde_json::from_str(&json_str).unwrap();
            pretty_assertions::assert_eq!(
                recovered,
                val,
                "serde roundtrip failed for {}",
                stringify!($ty)
            );

            let schema = serde_json::to_value(schema_for!($ty)).unwrap();
            let instance = serde_json::to_value(&val).unwrap();
            let errors = validate_against_schema(&schema, &instance);
            assert!(
                errors.is_empty(),
                "Schema validation failed for {}: {:?}",
                stringify!($ty),
                errors
            );
        }
    };
}

fn sample_comment() -> Comment {
    Comment {
        text: "대표자 확인 필요".into(),
        author: "작성자".into(),
        timestamp: "2024. 8. 20. 오후 3:12:45".into(),
    }
}

roundtrip_and_validate!(comment_roundtrip, Comment, sample_comment());

roundtrip_and_validate!(
    checklist_item_roundtrip,
    ChecklistItem,
    ChecklistItem {
        name: "계약대상 대표자".into(),
        result: Verdict::Fail,
        comments: vec![sample_comment()],
        is_checked: true,
        draft_comment: "half typed".into(),
    }
);

roundtrip_and_validate!(
    checklist_category_roundtrip,
    ChecklistCategory,
    default_checklist().remove(1)
);

roundtrip_and_validate!(project_roundtrip, Project, seed_projects().remove(0));

roundtrip_and_validate!(
    project_with_attachments_roundtrip,
    Project,
    Project {
        attachments: vec!["contract.pdf".into()],
        manager: Some("김민수".into()),
        contract_company: Some("한빛건설".into()),
        ..seed_projects().remove(1)
    }
);

roundtrip_and_validate!(
    candidate_roundtrip,
    ProjectCandidate,
    ProjectCandidate {
        key: "new3".into(),
        name: "신규 프로젝트 C".into(),
        description: "클라우드 마이그레이션".into(),
        manager: None,
        contract_company: Some("구름소프트".into()),
    }
);

roundtrip_and_validate!(
    review_summary_roundtrip,
    ReviewSummary,
    ReviewSummary {
        project_id: 1,
        project_name: "프로젝트 A".into(),
        state: ReviewState::Complete,
        checked_items: 15,
        total_items: 15,
        all_checked: true,
        is_complete: true,
        is_export_ready: true,
    }
);

roundtrip_and_validate!(no_project_view_roundtrip, ReviewView, ReviewView::no_project());

roundtrip_and_validate!(
    dashboard_roundtrip,
    DashboardStats,
    DashboardStats {
        reviewing: 1,
        reviewed: 1,
        not_reviewed: 1,
        awaiting_review: 0,
        total: 3,
        recent: seed_projects().iter().map(DashboardEntry::from_project).collect(),
    }
);

roundtrip_and_validate!(
    export_table_roundtrip,
    ExportTable,
    ExportTable {
        project_id: 1,
        project_code: "DS00000001".into(),
        project_name: "프로젝트 A".into(),
        exported_at: Utc::now(),
        rows: vec![ExportRow {
            category: "보증".into(),
            item: "계약이행보증".into(),
            result: Verdict::Fail,
            comments: vec![sample_comment()],
        }],
    }
);

#[test]
fn item_defaults_fill_missing_mutable_fields() {
    let json = r#"{"name":"계약일","result":"pass"}"#;
    let item: ChecklistItem = serde_json::from_str(json).unwrap();
    assert!(!item.is_checked);
    assert!(item.comments.is_empty());
    assert!(item.draft_comment.is_empty());
}

#[test]
fn review_view_is_internally_tagged() {
    let json = serde_json::to_value(ReviewView::no_project()).unwrap();
    assert_eq!(json["view"], "no_project_selected");
    assert_eq!(json["message"], ReviewView::SELECT_PROMPT);
}

#[test]
fn dashboard_labels_follow_project_state() {
    let labels: Vec<String> = seed_projects()
        .iter()
        .map(|p| DashboardEntry::from_project(p).status_label)
        .collect();
    pretty_assertions::assert_eq!(labels, vec!["검토중", "계약서 업로드 대기중", "최종검토 완료"]);
}
