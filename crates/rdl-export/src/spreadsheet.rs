//! CSV rendering of the review table.
//!
//! Records go through `csv::Writer` with CRLF terminators, so fields are
//! quoted only when needed. A UTF-8 byte order mark leads the file so
//! spreadsheet tools read the Korean headers correctly.

use rdl_core::entities::Comment;
use rdl_core::enums::ExportFormat;
use rdl_core::export::ExportTable;

use crate::artifact::{Artifact, ArtifactRenderer, artifact_file_name};
use crate::error::ExportError;

const BOM: &str = "\u{feff}";
const HEADERS: [&str; 4] = ["대분류", "항목", "검토 결과", "코멘트"];
pub const MEDIA_TYPE: &str = "text/csv; charset=utf-8";

#[derive(Debug, Clone, Copy, Default)]
pub struct SpreadsheetRenderer;

impl ArtifactRenderer for SpreadsheetRenderer {
    fn format(&self) -> ExportFormat {
        ExportFormat::Spreadsheet
    }

    fn render(&self, table: &ExportTable) -> Result<Artifact, ExportError> {
        let mut writer = csv::WriterBuilder::new()
            .terminator(csv::Terminator::CRLF)
            .from_writer(BOM.as_bytes().to_vec());
        writer.write_record(HEADERS).map_err(render_error)?;
        for row in &table.rows {
            writer
                .write_record([
                    row.category.as_str(),
                    row.item.as_str(),
                    row.result.label(),
                    comment_cell(&row.comments).as_str(),
                ])
                .map_err(render_error)?;
        }
        let bytes = writer
            .into_inner()
            .map_err(|e| ExportError::Render(e.to_string()))?;
        tracing::debug!(
            project_id = table.project_id,
            rows = table.rows.len(),
            "rendered spreadsheet export"
        );

        Ok(Artifact {
            file_name: artifact_file_name(table, "csv"),
            media_type: MEDIA_TYPE.to_string(),
            bytes,
        })
    }
}

fn render_error(e: csv::Error) -> ExportError {
    ExportError::Render(e.to_string())
}

/// Newest first, one `author (timestamp): text` line per comment.
#[must_use]
pub fn comment_cell(comments: &[Comment]) -> String {
    comments
        .iter()
        .map(|c| format!("{} ({}): {}", c.author, c.timestamp, c.text))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rdl_core::enums::Verdict;
    use rdl_core::export::ExportRow;
    use rstest::rstest;

    use super::*;

    fn table_with(item: &str, comments: Vec<Comment>) -> ExportTable {
        ExportTable {
            project_id: 1,
            project_code: "DS00000001".into(),
            project_name: "프로젝트 A".into(),
            exported_at: chrono::Utc::now(),
            rows: vec![ExportRow {
                category: "기본사항".into(),
                item: item.into(),
                result: Verdict::Pass,
                comments,
            }],
        }
    }

    fn rendered(table: &ExportTable) -> String {
        let artifact = SpreadsheetRenderer.render(table).unwrap();
        String::from_utf8(artifact.bytes).unwrap()
    }

    #[test]
    fn starts_with_bom_and_crlf_header() {
        let out = rendered(&table_with("계약일", vec![]));
        assert!(out.starts_with("\u{feff}대분류,항목,검토 결과,코멘트\r\n"));
        assert!(out.ends_with("\r\n"));
        assert_eq!(out.lines().count(), 2);
    }

    #[rstest]
    #[case("계약일", "기본사항,계약일,PASS,")]
    #[case("a,b", "기본사항,\"a,b\",PASS,")]
    #[case("say \"hi\"", "기본사항,\"say \"\"hi\"\"\",PASS,")]
    fn quotes_only_when_needed(#[case] item: &str, #[case] expected: &str) {
        let out = rendered(&table_with(item, vec![]));
        assert!(out.contains(expected), "{out}");
    }

    #[test]
    fn multiline_comment_cell_is_quoted() {
        let comments = vec![
            Comment {
                text: "Second".into(),
                author: "작성자".into(),
                timestamp: "t2".into(),
            },
            Comment {
                text: "Looks fine".into(),
                author: "법무팀".into(),
                timestamp: "t1".into(),
            },
        ];
        let out = rendered(&table_with("계약일", comments));
        assert!(out.contains("\"작성자 (t2): Second\n법무팀 (t1): Looks fine\"\r\n"));
    }

    #[test]
    fn joins_comments_newest_first() {
        let comments = vec![
            Comment {
                text: "Second".into(),
                author: "작성자".into(),
                timestamp: "t2".into(),
            },
            Comment {
                text: "Looks fine".into(),
                author: "법무팀".into(),
                timestamp: "t1".into(),
            },
        ];
        assert_eq!(
            comment_cell(&comments),
            "작성자 (t2): Second\n법무팀 (t1): Looks fine"
        );
    }

    #[test]
    fn no_comments_is_an_empty_cell() {
        assert_eq!(comment_cell(&[]), "");
    }
}
