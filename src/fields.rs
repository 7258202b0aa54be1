//! Labeled-field extraction from page text
//!
//! Traveler pages carry lines like `Part: 84-1102` or `Asm : TOP-40`. This
//! module finds the first value following a named label on a page, with
//! tolerant matching: the label is case-insensitive, whitespace around the
//! colon is ignored, and the value runs to the end of the line.

use once_cell::sync::Lazy;
use regex::Regex;

/// Builds the tolerant matcher for one label: the label token at a word
/// boundary, optional whitespace, a colon, optional whitespace, then the
/// value captured up to (not including) any line terminator. The whitespace
/// run after the colon may cross a line break when the value wrapped onto
/// the next line; the captured value itself never does.
fn label_pattern(label: &str) -> Regex {
    Regex::new(&format!(r"(?i)\b{}\s*:\s*([^\r\n]+)", regex::escape(label))).unwrap()
}

/// First capture of `re` in `text`, trimmed; empty captures count as absent.
fn first_value(re: &Regex, text: &str) -> Option<String> {
    let value = re.captures(text)?.get(1)?.as_str().trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Returns the first value following `label` on the page, if any.
///
/// Only the first occurrence of the label counts; later occurrences on the
/// same page are ignored. A label whose value trims to nothing is treated
/// the same as no label at all.
pub fn extract_field(text: &str, label: &str) -> Option<String> {
    first_value(&label_pattern(label), text)
}

/// First "Part:" value on the page.
///
/// Pages sometimes list several part numbers separated by a slash; only the
/// first segment is authoritative, so anything from the first `/` on is cut.
pub fn extract_part(text: &str) -> Option<String> {
    static PART_RE: Lazy<Regex> = Lazy::new(|| label_pattern("Part"));

    let value = first_value(&PART_RE, text)?;
    let value = match value.split_once('/') {
        Some((first, _)) => first.trim().to_string(),
        None => value,
    };
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

/// First "Asm:" value on the page.
pub fn extract_asm(text: &str) -> Option<String> {
    static ASM_RE: Lazy<Regex> = Lazy::new(|| label_pattern("Asm"));
    first_value(&ASM_RE, text)
}

/// First "Job:" value on the page.
pub fn extract_job(text: &str) -> Option<String> {
    static JOB_RE: Lazy<Regex> = Lazy::new(|| label_pattern("Job"));
    first_value(&JOB_RE, text)
}

/// Extraction result for one page.
///
/// `asm` is normalized on construction: an absent "Asm:" line and one whose
/// value trimmed to nothing both become the empty string, so run comparison
/// treats them alike.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageExtraction {
    /// First "Job:" value on the page, if any.
    pub job: Option<String>,
    /// First "Part:" value on the page, if any. Pages without one never
    /// start, extend, or break a range.
    pub part: Option<String>,
    /// First "Asm:" value on the page, empty when absent.
    pub asm: String,
}

impl PageExtraction {
    /// Scans one page's text for all three labels. Pure function of the
    /// text; a page with none of the labels yields an all-empty record.
    pub fn scan(text: &str) -> Self {
        Self {
            job: extract_job(text),
            part: extract_part(text),
            asm: extract_asm(text).unwrap_or_default(),
        }
    }
}
