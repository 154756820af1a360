//! Attribute keys set by the parser on declarations and copied onto nodes.

use std::collections::BTreeMap;

pub const SOURCE_FILE: &str = "source.file";
pub const BEGIN_LINE: &str = "source.line.begin";
pub const END_LINE: &str = "source.line.end";

/// Inclusive line span, if both ends are present and well-formed.
pub fn line_span(attributes: &BTreeMap<String, String>) -> Option<(u64, u64)> {
    let begin = attributes.get(BEGIN_LINE)?.trim().parse::<u64>().ok()?;
    let end = attributes.get(END_LINE)?.trim().parse::<u64>().ok()?;
    (end >= begin).then_some((begin, end))
}
