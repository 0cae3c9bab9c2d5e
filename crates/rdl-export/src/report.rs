//! Print-ready HTML report of the review table.
//!
//! Printing this document (browser or headless renderer) yields the PDF.
//! Every piece of review text passes through `html_escape` before it lands in
//! markup.

use std::fmt::Write;

use rdl_core::enums::{ExportFormat, Verdict};
use rdl_core::export::{ExportRow, ExportTable};

use crate::artifact::{Artifact, ArtifactRenderer, artifact_file_name};
use crate::error::ExportError;

pub const MEDIA_TYPE: &str = "text/html; charset=utf-8";

const STYLE: &str = "body{font-family:sans-serif;margin:24px}\
table{border-collapse:collapse;width:100%}\
th,td{border:1px solid #ccc;padding:6px 8px;vertical-align:top;text-align:left}\
th{background:#f3f4f6}\
.pass{color:#15803d}.fail{color:#b91c1c}.needs-review{color:#a16207}\
ul{margin:0;padding-left:16px}\
@page{size:A4 landscape;margin:12mm}";

#[derive(Debug, Clone, Copy, Default)]
pub struct ReportRenderer;

impl ArtifactRenderer for ReportRenderer {
    fn format(&self) -> ExportFormat {
        ExportFormat::Pdf
    }

    fn render(&self, table: &ExportTable) -> Result<Artifact, ExportError> {
        let html = render_html(table).map_err(|e| ExportError::Render(e.to_string()))?;
        tracing::debug!(
            project_id = table.project_id,
            rows = table.rows.len(),
            "rendered printable report"
        );
        Ok(Artifact {
            file_name: artifact_file_name(table, "html"),
            media_type: MEDIA_TYPE.to_string(),
            bytes: html.into_bytes(),
        })
    }
}

const fn verdict_class(verdict: Verdict) -> &'static str {
    match verdict {
        Verdict::Pass => "pass",
        Verdict::Fail => "fail",
        Verdict::NeedsReview => "needs-review",
    }
}

fn render_html(table: &ExportTable) -> Result<String, std::fmt::Error> {
    let title = format!("{} ({})", table.project_name, table.project_code);
    let mut html = String::new();

    write!(
        html,
        "<!DOCTYPE html>\n<html lang=\"ko\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{}</title>\n<style>{STYLE}</style>\n</head>\n<body>\n",
        html_escape::encode_text(&title)
    )?;
    writeln!(html, "<h1>{}</h1>", html_escape::encode_text(&title))?;
    writeln!(
        html,
        "<p>{}</p>",
        table.exported_at.format("%Y-%m-%d %H:%M UTC")
    )?;
    html.push_str(
        "<table>\n<thead><tr><th>대분류</th><th>항목</th><th>검토 결과</th><th>코멘트</th></tr></thead>\n<tbody>\n",
    );
    for row in &table.rows {
        write_row(&mut html, row)?;
    }
    html.push_str("</tbody>\n</table>\n</body>\n</html>\n");
    Ok(html)
}

fn write_row(html: &mut String, row: &ExportRow) -> std::fmt::Result {
    write!(
        html,
        "<tr><td>{}</td><td>{}</td><td class=\"{}\">{}</td><td>",
        html_escape::encode_text(&row.category),
        html_escape::encode_text(&row.item),
        verdict_class(row.result),
        html_escape::encode_text(row.result.label()),
    )?;
    if !row.comments.is_empty() {
        html.push_str("<ul>");
        for comment in &row.comments {
            write!(
                html,
                "<li><strong>{}</strong> <small>{}</small><br>{}</li>",
                html_escape::encode_text(&comment.author),
                html_escape::encode_text(&comment.timestamp),
                html_escape::encode_text(&comment.text),
            )?;
        }
        html.push_str("</ul>");
    }
    html.push_str("</td></tr>\n");
    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::DateTime;
    use rdl_core::entities::Comment;

    use super::*;

    fn table(rows: Vec<ExportRow>) -> ExportTable {
        ExportTable {
            project_id: 1,
            project_code: "DS00000001".into(),
            project_name: "프로젝트 A".into(),
            exported_at: DateTime::from_timestamp(1_724_112_000, 0).unwrap_or_default(),
            rows,
        }
    }

    #[test]
    fn escapes_review_text() {
        let row = ExportRow {
            category: "기본사항".into(),
            item: "계약금액".into(),
            result: Verdict::Fail,
            comments: vec![Comment {
                text: "<script>alert(1)</script> & more".into(),
                author: "작성자".into(),
                timestamp: "t1".into(),
            }],
        };
        let artifact = ReportRenderer.render(&table(vec![row])).unwrap();
        let html = String::from_utf8(artifact.bytes).unwrap();

        assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt; &amp; more"));
        assert!(!html.contains("<script>"));
        assert!(html.contains("<td class=\"fail\">FAIL</td>"));
    }

    #[test]
    fn names_the_file_after_the_project_code() {
        let artifact = ReportRenderer.render(&table(Vec::new())).unwrap();
        assert_eq!(artifact.file_name, "review-DS00000001.html");
        assert_eq!(artifact.media_type, MEDIA_TYPE);
    }

    #[test]
    fn rows_keep_display_order() {
        let rows = ["계약목적", "계약조건", "계약의무"]
            .into_iter()
            .map(|item| ExportRow {
                category: "기본사항".into(),
                item: item.into(),
                result: Verdict::Pass,
                comments: Vec::new(),
            })
            .collect();
        let artifact = ReportRenderer.render(&table(rows)).unwrap();
        let html = String::from_utf8(artifact.bytes).unwrap();

        let first = html.find("계약목적").unwrap();
        let second = html.find("계약조건").unwrap();
        let third = html.find("계약의무").unwrap();
        assert!(first < second && second < third);
    }
}
