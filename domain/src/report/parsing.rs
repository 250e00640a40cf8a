//! Report extraction from free-form model output.
//!
//! Two strategies, tried in order:
//!
//! | Function | Input | Notes |
//! |----------|-------|-------|
//! | [`parse_structured`] | JSON object, raw or in a ` ```json ` fence | needs a `findings` or `recommendations` key |
//! | [`parse_sections`] | Any text | blank-line sections classified by keyword |
//!
//! [`parse_report`] combines them and always returns a [`Report`].

use super::entities::Report;

const FINDING_KEYWORD: &str = "finding";
const RECOMMENDATION_KEYWORD: &str = "recommend";

/// Aggregate raw model output into a [`Report`].
pub fn parse_report(raw: &str) -> Report {
    parse_structured(raw).unwrap_or_else(|| parse_sections(raw))
}

/// Interpret the text as a JSON report.
///
/// Accepts the whole (trimmed) text or the first ` ```json ` fenced block.
/// Returns `None` when neither is a JSON object with at least one of the
/// report keys, or when those keys do not hold string arrays.
pub fn parse_structured(raw: &str) -> Option<Report> {
    if let Some(report) = report_from_json(raw.trim()) {
        return Some(report);
    }
    json_fence(raw).and_then(|block| report_from_json(&block))
}

/// Heuristic fallback: classify blank-line separated sections.
///
/// A section mentioning "finding" (any case) is a finding; otherwise one
/// mentioning "recommend" is a recommendation. Other sections are dropped.
pub fn parse_sections(raw: &str) -> Report {
    let normalized = raw.replace("\r\n", "\n");
    let mut report = Report::default();

    for section in split_sections(&normalized) {
        let lower = section.to_lowercase();
        if lower.contains(FINDING_KEYWORD) {
            report.findings.push(section);
        } else if lower.contains(RECOMMENDATION_KEYWORD) {
            report.recommendations.push(section);
        }
    }

    report
}

fn report_from_json(text: &str) -> Option<Report> {
    let value: serde_json::Value = serde_json::from_str(text).ok()?;
    let object = value.as_object()?;
    if !object.contains_key("findings") && !object.contains_key("recommendations") {
        return None;
    }
    serde_json::from_value(value).ok()
}

/// Contents of the first ` ```json ` fenced block, if any.
fn json_fence(raw: &str) -> Option<String> {
    let mut in_block = false;
    let mut block = String::new();

    for line in raw.lines() {
        let trimmed = line.trim();
        if !in_block {
            if trimmed.eq_ignore_ascii_case("```json") {
                in_block = true;
            }
        } else if trimmed == "```" {
            return Some(block);
        } else {
            block.push_str(line);
            block.push('\n');
        }
    }

    None
}

/// Split on lines that are empty or whitespace-only.
fn split_sections(text: &str) -> Vec<String> {
    let mut sections = Vec::new();
    let mut current: Vec<&str> = Vec::new();

    for line in text.lines() {
        if line.trim().is_empty() {
            flush(&mut current, &mut sections);
        } else {
            current.push(line);
        }
    }
    flush(&mut current, &mut sections);

    sections
}

fn flush(current: &mut Vec<&str>, sections: &mut Vec<String>) {
    if current.is_empty() {
        return;
    }
    let section = current.join("\n").trim().to_string();
    if !section.is_empty() {
        sections.push(section);
    }
    current.clear();
}
