//! Rendering of check reports and blacklist output.

use abuseip_core::CheckReport;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::Serializer;

/// Render check reports for output.
///
/// A single report prints as one object; a batch prints as a JSON array of
/// the individual reports. Failed lookups arrive as `Value::Null` and stay
/// valid array elements. The output ends with a newline.
pub fn render_reports(reports: &[CheckReport]) -> serde_json::Result<String> {
    let mut rendered = match reports {
        [single] => to_pretty(single)?,
        many => to_pretty(many)?,
    };
    rendered.push('\n');
    Ok(rendered)
}

/// Convert a plaintext blacklist body into nginx deny directives, one per
/// listed address. Blank lines are dropped.
pub fn deny_directives(raw: &str) -> Vec<String> {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| format!("deny {line};"))
        .collect()
}

/// Pretty-print with the 4-space indent reports are conventionally read with
fn to_pretty<T: Serialize + ?Sized>(value: &T) -> serde_json::Result<String> {
    let mut out = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut serializer = Serializer::with_formatter(&mut out, formatter);
    value.serialize(&mut serializer)?;
    Ok(String::from_utf8(out).expect("serde_json emits UTF-8"))
}
