//! Run-length compression of per-page extractions into page ranges
//!
//! Consecutive pages sharing the same (Part, Asm) pair collapse into a
//! single range record. Pages without a Part value are skipped outright and
//! never split a run, so a blank divider page between two matching traveler
//! pages leaves the range intact. The fold also latches the first Job value
//! it sees; later pages never override it.

use std::fmt;

use crate::fields::PageExtraction;

/// An open run still being extended by the fold.
#[derive(Debug)]
struct Run {
    start: u32,
    end: u32,
    part: String,
    asm: String,
}

impl Run {
    fn open(page: u32, part: String, asm: String) -> Self {
        Run { start: page, end: page, part, asm }
    }

    fn matches(&self, part: &str, asm: &str) -> bool {
        self.part == part && self.asm == asm
    }

    fn into_record(self) -> RangeRecord {
        RangeRecord { start: self.start, end: self.end, part: self.part, asm: self.asm }
    }
}

/// A finalized run of pages sharing one (Part, Asm) pair.
///
/// Page numbers are 1-based and inclusive on both ends; `start == end` for
/// a single-page run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeRecord {
    pub start: u32,
    pub end: u32,
    pub part: String,
    pub asm: String,
}

impl RangeRecord {
    /// True when the record covers exactly one page.
    pub fn is_single_page(&self) -> bool {
        self.start == self.end
    }
}

impl fmt::Display for RangeRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_single_page() {
            write!(f, "Page {}  Asm: {}  Part: {}", self.start, self.asm, self.part)
        } else {
            write!(
                f,
                "Page {}-{}  Asm: {}  Part: {}",
                self.start, self.end, self.asm, self.part
            )
        }
    }
}

/// Completed summary for one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentReport {
    /// First non-empty "Job:" value seen anywhere in the document.
    pub job: Option<String>,
    /// Compressed ranges in page order.
    pub records: Vec<RangeRecord>,
}

impl DocumentReport {
    /// True when no page in the document carried a Part value.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Report lines: the job header (when known) followed by one line per
    /// range. A report with no records yields no lines at all, even when a
    /// job value was seen.
    pub fn render_lines(&self) -> Vec<String> {
        if self.records.is_empty() {
            return Vec::new();
        }
        let mut lines = Vec::with_capacity(self.records.len() + 1);
        if let Some(job) = &self.job {
            lines.push(format!("Job: {}", job));
        }
        for record in &self.records {
            lines.push(record.to_string());
        }
        lines
    }

    /// Full report text, newline-terminated. Empty reports render as the
    /// empty string.
    pub fn render(&self) -> String {
        let lines = self.render_lines();
        if lines.is_empty() {
            return String::new();
        }
        let mut out = lines.join("\n");
        out.push('\n');
        out
    }
}

/// Single forward fold over a document's pages.
///
/// Feed pages in document order with [`fold`](Self::fold) or
/// [`fold_text`](Self::fold_text), then call [`finish`](Self::finish) to
/// flush the open run and take the report. The compressor numbers pages
/// itself, starting at 1, so every page must be fed exactly once even when
/// it contributes nothing.
#[derive(Debug)]
pub struct RangeCompressor {
    /// 1-based index of the most recently folded page.
    page: u32,
    job: Option<String>,
    current: Option<Run>,
    records: Vec<RangeRecord>,
}

impl RangeCompressor {
    pub fn new() -> Self {
        RangeCompressor { page: 0, job: None, current: None, records: Vec::new() }
    }

    /// Folds the next page's extraction into the running state.
    pub fn fold(&mut self, extraction: PageExtraction) {
        self.page += 1;
        let PageExtraction { job, part, asm } = extraction;

        if self.job.is_none() {
            self.job = job;
        }

        // Pages without a Part value neither extend nor terminate a run.
        let part = match part {
            Some(part) => part,
            None => return,
        };

        match self.current.take() {
            None => {
                self.current = Some(Run::open(self.page, part, asm));
            }
            Some(mut run) if run.matches(&part, &asm) => {
                run.end = self.page;
                self.current = Some(run);
            }
            Some(done) => {
                self.records.push(done.into_record());
                self.current = Some(Run::open(self.page, part, asm));
            }
        }
    }

    /// Scans one page's raw text and folds the result.
    pub fn fold_text(&mut self, text: &str) {
        self.fold(PageExtraction::scan(text));
    }

    /// Flushes the open run, if any, and returns the finished report.
    pub fn finish(mut self) -> DocumentReport {
        if let Some(run) = self.current.take() {
            self.records.push(run.into_record());
        }
        DocumentReport { job: self.job, records: self.records }
    }
}

impl Default for RangeCompressor {
    fn default() -> Self {
        Self::new()
    }
}

/// Compresses an ordered sequence of raw page texts into a report.
pub fn compress<I, S>(pages: I) -> DocumentReport
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut compressor = RangeCompressor::new();
    for text in pages {
        compressor.fold_text(text.as_ref());
    }
    compressor.finish()
}
