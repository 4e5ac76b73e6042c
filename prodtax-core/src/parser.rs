use crate::error::ParseError;
use unicode_normalization::UnicodeNormalization;

/// Stable, language-invariant category identifier
pub type CategoryId = u64;

const ID_SEPARATOR: &str = " - ";
const LEVEL_SEPARATOR: &str = " > ";
const BYTE_ORDER_MARK: char = '\u{feff}';

/// One dataset line: a category id with its full ancestor chain
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryRecord {
    pub id: CategoryId,
    /// Root-to-parent names, excluding the category's own name
    pub ancestors: Vec<String>,
    pub name: String,
}

impl CategoryRecord {
    /// Number of ancestors above this category (0 for roots)
    pub fn depth(&self) -> usize {
        self.ancestors.len()
    }

    /// All names from the root down to this category, inclusive
    pub fn path(&self) -> impl Iterator<Item = &str> {
        self.ancestors
            .iter()
            .map(String::as_str)
            .chain(std::iter::once(self.name.as_str()))
    }
}

/// Parse one dataset line
/// Returns Ok(None) for blank lines and `#` comments
pub fn parse_line(line: &str, line_no: usize) -> Result<Option<CategoryRecord>, ParseError> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let (id_part, path_part) = line
        .split_once(ID_SEPARATOR)
        .ok_or_else(|| ParseError::MalformedRecord {
            line: line_no,
            reason: format!("missing '{}' between id and path", ID_SEPARATOR.trim()),
        })?;

    let id_part = id_part.trim();
    let id = id_part
        .parse::<CategoryId>()
        .map_err(|_| ParseError::InvalidIdentifier {
            line: line_no,
            value: id_part.to_string(),
        })?;

    if has_dangling_separator(path_part) {
        return Err(ParseError::MalformedRecord {
            line: line_no,
            reason: "level separator without a category name".to_string(),
        });
    }

    let mut segments = Vec::new();
    for (level, segment) in path_part.split(LEVEL_SEPARATOR).enumerate() {
        let segment = normalize_segment(segment);
        if segment.is_empty() {
            return Err(ParseError::MalformedRecord {
                line: line_no,
                reason: format!("empty category name at level {}", level + 1),
            });
        }
        segments.push(segment);
    }

    // split() always yields at least one segment
    let name = segments.pop().unwrap_or_default();

    Ok(Some(CategoryRecord {
        id,
        ancestors: segments,
        name,
    }))
}

/// Parse a whole dataset, skipping comments and blank lines
/// Line numbers in errors are 1-based
pub fn parse_records(text: &str) -> Result<Vec<CategoryRecord>, ParseError> {
    let text = text.strip_prefix(BYTE_ORDER_MARK).unwrap_or(text);
    let mut records = Vec::new();

    for (idx, line) in text.lines().enumerate() {
        if let Some(record) = parse_line(line, idx + 1)? {
            records.push(record);
        }
    }

    Ok(records)
}

/// A leading or trailing '>' whose surrounding space was trimmed away
fn has_dangling_separator(path: &str) -> bool {
    let marker = LEVEL_SEPARATOR.trim();
    let path = path.trim();
    path == marker
        || path.ends_with(LEVEL_SEPARATOR.trim_end())
        || path.starts_with(LEVEL_SEPARATOR.trim_start())
}

/// Trim and NFC-normalize a path segment
fn normalize_segment(segment: &str) -> String {
    segment.trim().nfc().collect()
}
