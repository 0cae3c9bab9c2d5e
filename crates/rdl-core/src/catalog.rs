//! Static seed data: the AI checklist catalog, the initial project registry,
//! and the intake list of new projects.
//!
//! Verdicts here are fixed literals. Nothing in Redline computes them.

use chrono::{DateTime, NaiveDate, Utc};

use crate::entities::{ChecklistCategory, ChecklistItem, Project, ProjectCandidate};
use crate::enums::{ProjectStatus, Verdict};
use crate::ids::project_code;

const BASICS: &[(&str, Verdict)] = &[
    ("계약대상 업체명", Verdict::Pass),
    ("계약대상 대표자", Verdict::Fail),
    ("계약대상 주소", Verdict::NeedsReview),
    ("계약목적", Verdict::Pass),
    ("계약조건", Verdict::Pass),
    ("계약의무", Verdict::NeedsReview),
    ("계약기간", Verdict::Fail),
    ("계약일", Verdict::Pass),
    ("계약금액", Verdict::Pass),
    ("대금지급", Verdict::NeedsReview),
    ("대금지급시기", Verdict::Pass),
    ("대금지급 방법", Verdict::Pass),
];

const GUARANTEES: &[(&str, Verdict)] = &[
    ("선급금이행보증", Verdict::Pass),
    ("계약이행보증", Verdict::Fail),
    ("하자이행보증", Verdict::NeedsReview),
];

const INTAKE: &[(&str, &str)] = &[
    ("신규 프로젝트 A", "새로운 AI 기반 솔루션 개발"),
    ("신규 프로젝트 B", "기존 시스템 업그레이드"),
    ("신규 프로젝트 C", "클라우드 마이그레이션"),
    ("신규 프로젝트 D", "고객 관리 시스템 개선"),
    ("신규 프로젝트 E", "데이터 시각화 툴 개발"),
    ("신규 프로젝트 F", "사내 교육 플랫폼 구축"),
    ("신규 프로젝트 G", "이커머스 플랫폼 업그레이드"),
    ("신규 프로젝트 H", "보안 시스템 강화"),
    ("신규 프로젝트 I", "인공지능 고객 서비스 도입"),
    ("신규 프로젝트 J", "클라우드 기반 백업 솔루션"),
    ("신규 프로젝트 K", "자동화 시스템 개발"),
    ("신규 프로젝트 L", "빅데이터 분석 시스템 구축"),
    ("신규 프로젝트 M", "데이터 웨어하우스 구축"),
    ("신규 프로젝트 N", "모바일 앱 개발"),
    ("신규 프로젝트 O", "스마트 팩토리 구축"),
    ("신규 프로젝트 P", "AI 기반 예측 시스템 개발"),
    ("신규 프로젝트 Q", "마케팅 자동화 시스템 개발"),
    ("신규 프로젝트 R", "고객 데이터 분석 툴 개발"),
    ("신규 프로젝트 S", "사물인터넷(IoT) 플랫폼 개발"),
    ("신규 프로젝트 T", "자동차 자율주행 시스템 개발"),
];

fn category(name: &str, items: &[(&str, Verdict)]) -> ChecklistCategory {
    ChecklistCategory::new(
        name,
        items
            .iter()
            .map(|(label, verdict)| ChecklistItem::new(*label, *verdict))
            .collect(),
    )
}

/// The checklist every new review session starts from: all items unchecked,
/// no comments, empty drafts.
#[must_use]
pub fn default_checklist() -> Vec<ChecklistCategory> {
    vec![category("기본사항", BASICS), category("보증", GUARANTEES)]
}

fn date(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .unwrap_or_default()
}

fn seed_project(
    id: u32,
    name: &str,
    description: &str,
    status: ProjectStatus,
    uploaded_at: DateTime<Utc>,
) -> Project {
    Project {
        id,
        code: project_code(id),
        name: name.to_string(),
        description: description.to_string(),
        status,
        uploaded_at,
        is_complete: status == ProjectStatus::Reviewed,
        attachments: Vec::new(),
        manager: None,
        contract_company: None,
    }
}

/// Projects present in a fresh registry.
#[must_use]
pub fn seed_projects() -> Vec<Project> {
    vec![
        seed_project(
            1,
            "프로젝트 A",
            "AI 기반 고객 서비스 개선",
            ProjectStatus::Reviewing,
            date(2024, 8, 20),
        ),
        seed_project(
            2,
            "프로젝트 B",
            "데이터 분석 플랫폼 구축",
            ProjectStatus::NotReviewed,
            date(2024, 8, 18),
        ),
        seed_project(
            3,
            "프로젝트 C",
            "클라우드 마이그레이션 프로젝트",
            ProjectStatus::Reviewed,
            date(2024, 8, 19),
        ),
    ]
}

/// New projects available for loading into the registry (`new1`..`new20`).
#[must_use]
pub fn intake_candidates() -> Vec<ProjectCandidate> {
    INTAKE
        .iter()
        .enumerate()
        .map(|(index, (name, description))| ProjectCandidate {
            key: format!("new{}", index + 1),
            name: (*name).to_string(),
            description: (*description).to_string(),
            manager: None,
            contract_company: None,
        })
        .collect()
}
