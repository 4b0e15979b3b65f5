//! Narrative report payloads and markdown rendering.
//!
//! Reports come back from the language model as markdown. The same source is
//! rendered for the on-screen modal and for a standalone print document.

use crate::forecast::{BloodType, Severity};
use chrono::NaiveDate;
use pulldown_cmark::{CowStr, Event, Options, Parser, Tag, html};
use tracing::warn;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Body shown in the report modal when generation fails.
pub const REPORT_FAILURE_MESSAGE: &str =
    "리포트 생성 중 오류가 발생했습니다. 잠시 후 다시 시도해주세요.";

/// Delay between writing the print document and opening the print dialog.
pub const DEFAULT_PRINT_DELAY_MS: u32 = 500;

/// Body of `POST /analyze`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeRequest {
    #[schema(example = "부산")]
    pub region: String,
    pub blood_type: BloodType,
    #[schema(example = 1)]
    pub month: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeResponse {
    /// Markdown report
    pub report: String,
    pub region: String,
    pub blood_type: BloodType,
    pub month: u8,
}

/// Markdown block types and the inline styles the report modal applies to
/// them, as `(selector, declarations)`.
pub const SCREEN_BLOCK_STYLES: &[(&str, &str)] = &[
    ("h1", "font-size: 1.5rem; font-weight: 700; margin: 1.5rem 0 0.75rem; color: #b91c1c;"),
    ("h2", "font-size: 1.25rem; font-weight: 700; margin: 1.25rem 0 0.5rem; border-bottom: 1px solid #e5e7eb; padding-bottom: 0.25rem;"),
    ("h3", "font-size: 1.1rem; font-weight: 600; margin: 1rem 0 0.5rem;"),
    ("h4", "font-size: 1rem; font-weight: 600; margin: 0.75rem 0 0.25rem;"),
    ("p", "margin: 0.5rem 0; line-height: 1.7;"),
    ("ul", "list-style: disc; padding-left: 1.5rem; margin: 0.5rem 0;"),
    ("ol", "list-style: decimal; padding-left: 1.5rem; margin: 0.5rem 0;"),
    ("li", "margin: 0.25rem 0;"),
    ("strong", "font-weight: 700;"),
    ("em", "font-style: italic;"),
    ("del", "text-decoration: line-through;"),
    ("code", "font-family: monospace; background: #f3f4f6; padding: 0.1rem 0.3rem; border-radius: 0.25rem;"),
    ("pre", "background: #1f2937; color: #f9fafb; padding: 0.75rem; border-radius: 0.5rem; overflow-x: auto;"),
    ("pre code", "background: transparent; padding: 0;"),
    ("blockquote", "border-left: 4px solid #f87171; padding-left: 1rem; color: #4b5563; margin: 0.75rem 0;"),
    ("hr", "border: none; border-top: 1px solid #e5e7eb; margin: 1.5rem 0;"),
    ("table", "border-collapse: collapse; width: 100%; margin: 0.75rem 0;"),
    ("th, td", "border: 1px solid #d1d5db; padding: 0.4rem 0.6rem; text-align: left;"),
    ("th", "background: #f9fafb; font-weight: 600;"),
];

/// `SCREEN_BLOCK_STYLES` as a stylesheet nested under `scope`.
///
/// Pass `"&"` to get selectors relative to a stylist scoped class.
pub fn screen_stylesheet(scope: &str) -> String {
    SCREEN_BLOCK_STYLES
        .iter()
        .map(|(selector, rules)| {
            let scoped: Vec<String> = selector
                .split(',')
                .map(|part| format!("{} {}", scope, part.trim()))
                .collect();
            format!("{} {{ {} }}", scoped.join(", "), rules)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Stylesheet embedded in the print document.
pub const PRINT_STYLESHEET: &str = r#"
@page { size: A4; margin: 18mm 16mm; }
* { box-sizing: border-box; }
body {
    font-family: 'Noto Sans KR', 'Malgun Gothic', -apple-system, sans-serif;
    font-size: 11pt;
    line-height: 1.7;
    color: #111827;
    margin: 0;
}
.report-header {
    border-bottom: 2px solid #b91c1c;
    padding-bottom: 8pt;
    margin-bottom: 16pt;
}
.report-header h1 { font-size: 18pt; margin: 0 0 6pt; color: #b91c1c; }
.report-meta { display: flex; flex-wrap: wrap; gap: 4pt 16pt; font-size: 10pt; color: #374151; }
.report-meta span strong { margin-right: 4pt; }
h1 { font-size: 16pt; margin: 16pt 0 8pt; }
h2 { font-size: 14pt; margin: 14pt 0 6pt; border-bottom: 1px solid #e5e7eb; padding-bottom: 2pt; }
h3 { font-size: 12pt; margin: 12pt 0 4pt; }
h4 { font-size: 11pt; margin: 10pt 0 4pt; }
p { margin: 4pt 0; }
ul, ol { padding-left: 18pt; margin: 4pt 0; }
li { margin: 2pt 0; }
code { font-family: monospace; background: #f3f4f6; padding: 0 2pt; }
pre { background: #f3f4f6; padding: 8pt; white-space: pre-wrap; }
blockquote { border-left: 3pt solid #f87171; margin: 8pt 0; padding-left: 8pt; color: #4b5563; }
hr { border: none; border-top: 1px solid #d1d5db; margin: 12pt 0; }
table { border-collapse: collapse; width: 100%; margin: 8pt 0; page-break-inside: avoid; }
th, td { border: 1px solid #9ca3af; padding: 3pt 6pt; text-align: left; }
th { background: #f3f4f6; }
h1, h2, h3, h4 { page-break-after: avoid; }
"#;

/// URL schemes allowed in link and image destinations.
const SAFE_URL_SCHEMES: [&str; 3] = ["http", "https", "mailto"];

/// Returns true for relative URLs and for the schemes in `SAFE_URL_SCHEMES`.
///
/// Browsers drop tabs, newlines and other control characters inside URLs, so
/// they are removed before the scheme is read.
fn is_safe_url(url: &str) -> bool {
    let cleaned: String = url
        .chars()
        .filter(|c| !c.is_ascii_whitespace() && !c.is_control())
        .collect();

    match cleaned.find([':', '/', '?', '#']) {
        Some(i) if cleaned[i..].starts_with(':') => {
            let scheme = cleaned[..i].to_ascii_lowercase();
            SAFE_URL_SCHEMES.contains(&scheme.as_str())
        }
        _ => true,
    }
}

fn sanitize_destination(dest_url: CowStr<'_>) -> CowStr<'_> {
    if is_safe_url(&dest_url) {
        dest_url
    } else {
        warn!("Dropping unsafe link destination in report markdown");
        CowStr::Borrowed("#")
    }
}

/// Converts report markdown to HTML.
///
/// Raw HTML blocks and inline tags are emitted as escaped text, and link or
/// image destinations with a scheme other than http, https or mailto are
/// replaced by `#`.
pub fn markdown_to_html(markdown: &str) -> String {
    let options = Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH;
    let parser = Parser::new_ext(markdown, options).map(|event| match event {
        Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
        Event::Start(Tag::Link { link_type, dest_url, title, id }) => Event::Start(Tag::Link {
            link_type,
            dest_url: sanitize_destination(dest_url),
            title,
            id,
        }),
        Event::Start(Tag::Image { link_type, dest_url, title, id }) => Event::Start(Tag::Image {
            link_type,
            dest_url: sanitize_destination(dest_url),
            title,
            id,
        }),
        other => other,
    });

    let mut html_body = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut html_body, parser);
    html_body
}

/// Segment details printed above the report body.
#[derive(Debug, Clone, PartialEq)]
pub struct PrintHeader {
    pub region: String,
    pub blood_type: BloodType,
    pub month: u8,
    pub severity: Option<Severity>,
    pub generated_on: NaiveDate,
}

impl PrintHeader {
    pub fn title(&self) -> String {
        format!("{} {}형 {}개월 후 혈액 수급 분석 리포트", self.region, self.blood_type, self.month)
    }
}

/// Builds the standalone HTML document used for printing.
pub fn print_document(markdown: &str, header: &PrintHeader) -> String {
    let severity = header
        .severity
        .as_ref()
        .map(|s| {
            format!(
                r#"<span><strong>경보 단계</strong>{}</span>"#,
                html_escape(s.label())
            )
        })
        .unwrap_or_default();

    format!(
        r#"<!DOCTYPE html>
<html lang="ko">
<head>
    <meta charset="UTF-8">
    <title>{title}</title>
    <style>
{css}
    </style>
</head>
<body>
    <header class="report-header">
        <h1>{title}</h1>
        <div class="report-meta">
            <span><strong>지역</strong>{region}</span>
            <span><strong>혈액형</strong>{blood_type}</span>
            <span><strong>예측 시점</strong>{month}개월 후</span>
            {severity}
            <span><strong>생성일</strong>{generated}</span>
        </div>
    </header>
    <article class="report-body">
{body}
    </article>
</body>
</html>"#,
        title = html_escape(&header.title()),
        css = PRINT_STYLESHEET,
        region = html_escape(&header.region),
        blood_type = header.blood_type,
        month = header.month,
        severity = severity,
        generated = header.generated_on.format("%Y-%m-%d"),
        body = markdown_to_html(markdown),
    )
}

/// Escape HTML special characters.
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header() -> PrintHeader {
        PrintHeader {
            region: "대구.경북".to_string(),
            blood_type: BloodType::B,
            month: 2,
            severity: Some(Severity::Warning),
            generated_on: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
        }
    }

    #[test]
    fn test_markdown_blocks_are_converted() {
        let html = markdown_to_html("# 제목\n\n- **부족**\n- *주의*\n\n> 인용\n\n---\n\n`code`");

        assert!(html.contains("<h1>제목</h1>"));
        assert!(html.contains("<li><strong>부족</strong></li>"));
        assert!(html.contains("<em>주의</em>"));
        assert!(html.contains("<blockquote>"));
        assert!(html.contains("<hr />"));
        assert!(html.contains("<code>code</code>"));
    }

    #[test]
    fn test_tables_and_strikethrough() {
        let html = markdown_to_html("| 지역 | 부족량 |\n|---|---|\n| 부산 | 120 |\n\n~~취소~~");

        assert!(html.contains("<table>"));
        assert!(html.contains("<td>부산</td>"));
        assert!(html.contains("<del>취소</del>"));
    }

    #[test]
    fn test_raw_html_is_escaped() {
        let html = markdown_to_html("<script>alert(1)</script>\n\ntext <b>bold</b>");

        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("<b>"));
    }

    #[test]
    fn test_script_link_destinations_are_neutralised() {
        let html = markdown_to_html(
            "[보고서 보기](javascript:alert(document.cookie))\n\n![차트](JaVaScRiPt:alert(1))\n\n[우회](<java\tscript:alert(1)>)",
        );

        assert!(!html.to_ascii_lowercase().contains("javascript:"));
        assert!(html.contains(r##"<a href="#">보고서 보기</a>"##));
        assert!(html.contains(r##"src="#""##));
        assert!(html.contains(r##"<a href="#">우회</a>"##));
    }

    #[test]
    fn test_safe_link_destinations_are_kept() {
        let html = markdown_to_html("[혈액원](https://www.bloodinfo.net) [문의](mailto:help@example.com) [목차](#summary)");

        assert!(html.contains(r#"href="https://www.bloodinfo.net""#));
        assert!(html.contains(r#"href="mailto:help@example.com""#));
        assert!(html.contains(r##"href="#summary""##));
    }

    #[test]
    fn test_url_scheme_check() {
        assert!(is_safe_url("https://example.com/a:b"));
        assert!(is_safe_url("/relative/path?x=1:2"));
        assert!(is_safe_url("docs/report.md"));
        assert!(!is_safe_url("data:text/html,<script>alert(1)</script>"));
        assert!(!is_safe_url(" vbscript:msgbox(1)"));
    }

    #[test]
    fn test_print_document_has_header_and_stylesheet() {
        let doc = print_document("## 1. 전반적인 분석\n\n내용", &header());

        assert!(doc.starts_with("<!DOCTYPE html>"));
        assert!(doc.contains(PRINT_STYLESHEET));
        assert!(doc.contains("대구.경북"));
        assert!(doc.contains("<strong>혈액형</strong>B"));
        assert!(doc.contains("2개월 후"));
        assert!(doc.contains("<strong>경보 단계</strong>경계"));
        assert!(doc.contains("2024-05-01"));
        assert!(doc.contains("<h2>1. 전반적인 분석</h2>"));
    }

    #[test]
    fn test_print_header_fields_are_escaped() {
        let mut header = header();
        header.region = "<img src=x>".to_string();
        header.severity = None;

        let doc = print_document("body", &header);

        assert!(!doc.contains("<img src=x>"));
        assert!(doc.contains("&lt;img src=x&gt;"));
        assert!(!doc.contains("경보 단계"));
    }

    #[test]
    fn test_screen_stylesheet_scopes_every_selector() {
        let css = screen_stylesheet(".report");

        assert!(css.contains(".report h1 {"));
        assert!(css.contains(".report th, .report td {"));
        assert!(css.contains(".report pre code {"));
        assert_eq!(css.lines().count(), SCREEN_BLOCK_STYLES.len());
    }
}
