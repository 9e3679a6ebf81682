//! Template rendering for CLI output using outstanding

use console::Style;
use outstanding::{render_auto, render_with_output, Theme};
use serde::Serialize;
use serde_json::Value;
use uistatlib::{FrameworkId, StatsReport};

/// Include templates at compile time
const HEADING_TEMPLATE: &str = include_str!("../templates/heading.jinja");
const STATS_REPORT_TEMPLATE: &str = include_str!("../templates/stats_report.jinja");

/// Re-export OutputMode for callers
pub use outstanding::OutputMode;

/// One key/value line of the report tree (pre-formatted)
#[derive(Debug, Serialize)]
struct TemplateLine {
    indent: String,
    /// Key with its colon, or `-` for list items
    key: String,
    /// Padding between key and value, aligning sibling scalars
    gap: String,
    value: String,
    numeric: bool,
}

/// A framework block of the report
#[derive(Debug, Serialize)]
struct TemplateSection {
    title: String,
    lines: Vec<TemplateLine>,
}

/// Data context for the stats report template
#[derive(Debug, Serialize)]
struct StatsReportContext {
    timestamp: String,
    sections: Vec<TemplateSection>,
}

#[derive(Debug, Serialize)]
struct HeadingContext {
    title: String,
}

/// Create the theme with styles
fn create_theme() -> Theme {
    Theme::new()
        .add("heading", Style::new().cyan().underlined())
        .add("section", Style::new().bold())
        .add("key", Style::new().green())
        .add("number", Style::new().cyan())
}

/// Heading printed before the stats
pub fn render_heading(
    framework1: &str,
    framework2: &str,
    output_mode: OutputMode,
) -> Result<String, Box<dyn std::error::Error>> {
    let context = HeadingContext {
        title: format!("Comparing {} with {}", framework1, framework2),
    };
    let rendered = render_with_output(HEADING_TEMPLATE, &context, &create_theme(), output_mode)?;
    Ok(rendered)
}

/// Render a stats report: JSON in structured modes, an indented key/value
/// tree per framework otherwise.
pub fn render_report(
    report: &StatsReport,
    output_mode: OutputMode,
) -> Result<String, Box<dyn std::error::Error>> {
    let theme = create_theme();

    // For JSON mode, use outstanding's render_auto for serialization
    if output_mode.is_structured() {
        return Ok(render_auto(
            STATS_REPORT_TEMPLATE,
            report,
            &theme,
            output_mode,
        )?);
    }

    let mut sections = Vec::new();
    for id in FrameworkId::ALL {
        let stats = report.framework(id);
        let mut lines = Vec::new();
        push_lines(&serde_json::to_value(stats)?, 2, &mut lines);
        sections.push(TemplateSection {
            title: format!("{}: {}", id, stats.name),
            lines,
        });
    }

    let context = StatsReportContext {
        timestamp: report.timestamp.to_rfc3339(),
        sections,
    };

    let rendered = render_with_output(STATS_REPORT_TEMPLATE, &context, &theme, output_mode)?;
    Ok(rendered)
}

fn is_scalar(value: &Value) -> bool {
    !matches!(value, Value::Object(_) | Value::Array(_))
}

fn is_empty_container(value: &Value) -> bool {
    match value {
        Value::Object(map) => map.is_empty(),
        Value::Array(items) => items.is_empty(),
        _ => false,
    }
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "(null)".to_string(),
        other => other.to_string(),
    }
}

fn line(indent: usize, key: String, gap: usize, value: &Value) -> TemplateLine {
    TemplateLine {
        indent: " ".repeat(indent),
        key,
        gap: " ".repeat(gap),
        value: scalar_text(value),
        numeric: value.is_number(),
    }
}

fn header(indent: usize, key: String, value: &str) -> TemplateLine {
    TemplateLine {
        indent: " ".repeat(indent),
        gap: if value.is_empty() { String::new() } else { " ".to_string() },
        key,
        value: value.to_string(),
        numeric: false,
    }
}

/// Flatten a serialized value into template lines.
///
/// Keys keep their serialization order. Scalars sharing an object are
/// aligned on the widest key.
fn push_lines(value: &Value, indent: usize, lines: &mut Vec<TemplateLine>) {
    match value {
        Value::Object(map) => {
            let width = map
                .iter()
                .filter(|(_, v)| is_scalar(v))
                .map(|(k, _)| k.len())
                .max()
                .unwrap_or(0);

            for (key, child) in map {
                let label = format!("{}:", key);
                if is_scalar(child) {
                    lines.push(line(indent, label, width - key.len() + 1, child));
                } else if is_empty_container(child) {
                    lines.push(header(indent, label, "(empty)"));
                } else {
                    lines.push(header(indent, label, ""));
                    push_lines(child, indent + 2, lines);
                }
            }
        }
        Value::Array(items) => {
            for item in items {
                if is_scalar(item) {
                    lines.push(line(indent, "-".to_string(), 1, item));
                } else {
                    lines.push(header(indent, "-".to_string(), ""));
                    push_lines(item, indent + 2, lines);
                }
            }
        }
        scalar => lines.push(line(indent, String::new(), 0, scalar)),
    }
}
