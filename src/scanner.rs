use anyhow::{Context, Result};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

// Marker substrings emitted by the JCrew parser into the crawler log.
const START_MARKER: &str = "jcrew.JCrewParser - Start parsing:";
const TITLE_SECTION_MARKER: &str = "Started parsing title for JCrew Product Item";
const TITLE_VALUE_MARKER: &str = "Got the productTitle for JCrew Product Item";
const NULL_FIELD_MARKER: &str = "is null";
const END_MARKER: &str = "Finished parsing";

/// Title recorded for a failure when the log never showed one.
pub const UNKNOWN_TITLE: &str = "Unknown";

/// One failing URL together with the product titles observed for it, in the
/// order its failures appeared in the log.
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorEntry {
    pub url: String,
    pub titles: Vec<String>,
}

/// Failing URLs keyed by URL, iterated in first-seen order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ErrorIndex {
    entries: Vec<ErrorEntry>,
    by_url: HashMap<String, usize>,
}

impl ErrorIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a title to the entry for `url`, creating the entry first if
    /// this is the URL's first recorded failure.
    pub fn record(&mut self, url: &str, title: &str) {
        let slot = match self.by_url.get(url) {
            Some(&slot) => slot,
            None => {
                self.entries.push(ErrorEntry {
                    url: url.to_string(),
                    titles: Vec::new(),
                });
                let slot = self.entries.len() - 1;
                self.by_url.insert(url.to_string(), slot);
                slot
            }
        };
        self.entries[slot].titles.push(title.to_string());
    }

    /// Titles recorded for `url`, if it ever failed.
    pub fn get(&self, url: &str) -> Option<&[String]> {
        self.by_url
            .get(url)
            .map(|&slot| self.entries[slot].titles.as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = &ErrorEntry> {
        self.entries.iter()
    }

    /// Number of distinct failing URLs.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Result of a full scan: the grouped failures plus how many product records
/// had their title extracted.
#[derive(Debug, Clone, PartialEq)]
pub struct ScanReport {
    pub index: ErrorIndex,
    pub total_records: usize,
}

impl ScanReport {
    /// Number of distinct URLs that failed at least once.
    pub fn total_problems(&self) -> usize {
        self.index.len()
    }
}

/// Scan a crawler log for JCrew parser failures.
///
/// Walks the log line by line. A start marker opens a record and carries the
/// page URL; if the next line opens the title sub-record, every following
/// line up to the end marker is checked for a title value and for null-field
/// failures. Each failure is recorded against the current URL under the most
/// recently seen title. Lines outside a record are ignored, and end of input
/// terminates either loop gracefully.
pub fn scan_log(path: &Path) -> Result<ScanReport> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open log file {}", path.display()))?;
    let mut lines = BufReader::new(file).lines();

    let mut index = ErrorIndex::new();
    let mut total_records = 0;

    while let Some(line) = lines.next() {
        let line = line.context("Failed to read from log file")?;
        let Some(rest) = line.split_once(START_MARKER).map(|(_, rest)| rest) else {
            continue;
        };
        let current_url = rest.trim();

        // A record only counts if the very next line opens the title
        // sub-record; anything else sends us back to the outer scan.
        let Some(next) = lines.next() else { break };
        if !next
            .context("Failed to read from log file")?
            .contains(TITLE_SECTION_MARKER)
        {
            continue;
        }

        let mut title = UNKNOWN_TITLE.to_string();
        loop {
            // Truncated record at end of input: keep what we have.
            let Some(line) = lines.next() else { break };
            let line = line.context("Failed to read from log file")?;
            if line.contains(END_MARKER) {
                break;
            }
            if line.contains(TITLE_VALUE_MARKER) {
                // The title is whatever follows the last colon; log lines
                // carry timestamps with colons of their own.
                if let Some(value) = line.rsplit(':').next() {
                    title = value.trim().to_string();
                }
                total_records += 1;
            }
            if line.contains(NULL_FIELD_MARKER) {
                index.record(current_url, &title);
                println!("found problem: {}", current_url);
            }
        }
    }

    println!("totally found: {} records", total_records);
    println!("totally found: {} problems", index.len());

    Ok(ScanReport {
        index,
        total_records,
    })
}
