//! Browsing history: a bounded, timestamped log of loaded pages.

use std::collections::{BTreeMap, VecDeque};

use chrono::{DateTime, Local, NaiveDate};

/// Default number of entries kept before the oldest is evicted.
pub const MAX_HISTORY_LENGTH: usize = 100;

/// One successfully loaded page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub timestamp: DateTime<Local>,
    pub url: String,
}

impl HistoryEntry {
    /// Calendar date in local time, e.g. `Monday, January 6, 2025`.
    pub fn date_label(&self) -> String {
        date_label(self.timestamp.date_naive())
    }

    /// Time of day, e.g. `02:30 PM`.
    pub fn time_label(&self) -> String {
        self.timestamp.format("%I:%M %p").to_string()
    }
}

/// Entries that share a local calendar date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryGroup {
    pub date: NaiveDate,
    pub entries: Vec<HistoryEntry>,
}

impl HistoryGroup {
    pub fn label(&self) -> String {
        date_label(self.date)
    }
}

fn date_label(date: NaiveDate) -> String {
    date.format("%A, %B %-d, %Y").to_string()
}

/// FIFO log of visited URLs.
#[derive(Debug, Clone)]
pub struct HistoryLog {
    entries: VecDeque<HistoryEntry>,
    capacity: usize,
}

impl HistoryLog {
    pub fn new() -> Self {
        Self::with_capacity(MAX_HISTORY_LENGTH)
    }

    /// A log keeping at most `capacity` entries (at least one).
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Record `url` as loaded now.
    pub fn record(&mut self, url: impl Into<String>) {
        self.record_at(Local::now(), url);
    }

    /// Record `url` with an explicit timestamp, evicting the oldest entry
    /// when full.
    pub fn record_at(&mut self, timestamp: DateTime<Local>, url: impl Into<String>) {
        self.entries.push_back(HistoryEntry {
            timestamp,
            url: url.into(),
        });
        while self.entries.len() > self.capacity {
            self.entries.pop_front();
        }
    }

    /// All entries, oldest first.
    pub fn entries(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    /// The last `n` entries, newest first.
    pub fn recent_entries(&self, n: usize) -> Vec<&HistoryEntry> {
        self.entries.iter().rev().take(n).collect()
    }

    /// Entries partitioned by local calendar date. Dates ascend; entries
    /// within a date keep their recorded order.
    pub fn grouped_by_date(&self) -> Vec<HistoryGroup> {
        let mut groups: BTreeMap<NaiveDate, Vec<HistoryEntry>> = BTreeMap::new();
        for entry in &self.entries {
            groups
                .entry(entry.timestamp.date_naive())
                .or_default()
                .push(entry.clone());
        }
        groups
            .into_iter()
            .map(|(date, entries)| HistoryGroup { date, entries })
            .collect()
    }
}

impl Default for HistoryLog {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// HISTORY PAGE
// =============================================================================

/// Render the full history as a standalone HTML page. Each entry links to
/// its URL.
pub fn render_history_page(groups: &[HistoryGroup]) -> String {
    let mut body = String::new();
    if groups.is_empty() {
        body.push_str("<p class=\"empty\">No history yet.</p>\n");
    }
    for group in groups {
        body.push_str(&format!("<h2>{}</h2>\n<ul>\n", escape_html(&group.label())));
        for entry in &group.entries {
            let url = escape_html(&entry.url);
            body.push_str(&format!(
                "<li><span class=\"time\">{}</span> <a href=\"{url}\">{url}</a></li>\n",
                entry.time_label()
            ));
        }
        body.push_str("</ul>\n");
    }

    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>History</title>\n\
         <style>body{{font-family:sans-serif;margin:2em}}.time{{color:#666;margin-right:1em}}\
         li{{list-style:none;margin:.3em 0}}</style>\n</head>\n<body>\n<h1>History</h1>\n{body}</body>\n</html>\n"
    )
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(y, m, d, h, min, 0).single().unwrap()
    }

    #[test]
    fn never_exceeds_capacity_and_keeps_newest() {
        let mut log = HistoryLog::new();
        for i in 0..150 {
            log.record(format!("https://site{i}.example"));
        }
        assert_eq!(log.len(), MAX_HISTORY_LENGTH);
        let urls: Vec<&str> = log.entries().map(|e| e.url.as_str()).collect();
        assert_eq!(urls.first(), Some(&"https://site50.example"));
        assert_eq!(urls.last(), Some(&"https://site149.example"));
    }

    #[test]
    fn custom_capacity_is_respected() {
        let mut log = HistoryLog::with_capacity(3);
        for url in ["a", "b", "c", "d"] {
            log.record(url);
        }
        let urls: Vec<&str> = log.entries().map(|e| e.url.as_str()).collect();
        assert_eq!(urls, vec!["b", "c", "d"]);
        assert_eq!(HistoryLog::with_capacity(0).capacity(), 1);
    }

    #[test]
    fn recent_entries_are_reverse_chronological() {
        let mut log = HistoryLog::new();
        let start = at(2025, 1, 6, 9, 0);
        for i in 0..8 {
            log.record_at(start + Duration::minutes(i), format!("u{i}"));
        }
        let recent = log.recent_entries(5);
        let urls: Vec<&str> = recent.iter().map(|e| e.url.as_str()).collect();
        assert_eq!(urls, vec!["u7", "u6", "u5", "u4", "u3"]);
        assert!(recent.windows(2).all(|w| w[0].timestamp > w[1].timestamp));
    }

    #[test]
    fn recent_entries_with_fewer_than_n() {
        let mut log = HistoryLog::new();
        log.record("only");
        assert_eq!(log.recent_entries(5).len(), 1);
        assert!(HistoryLog::new().recent_entries(5).is_empty());
    }

    #[test]
    fn groups_by_local_date() {
        let mut log = HistoryLog::new();
        log.record_at(at(2025, 1, 6, 9, 0), "a");
        log.record_at(at(2025, 1, 6, 14, 30), "b");
        log.record_at(at(2025, 1, 7, 8, 15), "c");

        let groups = log.grouped_by_date();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].label(), "Monday, January 6, 2025");
        assert_eq!(groups[0].entries.len(), 2);
        assert_eq!(groups[0].entries[1].time_label(), "02:30 PM");
        assert_eq!(groups[1].label(), "Tuesday, January 7, 2025");
        assert_eq!(groups[1].entries[0].url, "c");
    }

    #[test]
    fn entry_labels() {
        let entry = HistoryEntry {
            timestamp: at(2025, 3, 1, 0, 5),
            url: "x".into(),
        };
        assert_eq!(entry.date_label(), "Saturday, March 1, 2025");
        assert_eq!(entry.time_label(), "12:05 AM");
    }

    #[test]
    fn history_page_escapes_urls() {
        let mut log = HistoryLog::new();
        log.record_at(at(2025, 1, 6, 9, 0), "https://example.com/?q=<b>&x=\"1\"");
        let html = render_history_page(&log.grouped_by_date());
        assert!(html.contains("Monday, January 6, 2025"));
        assert!(html.contains("https://example.com/?q=&lt;b&gt;&amp;x=&quot;1&quot;"));
        assert!(!html.contains("<b>"));
    }

    #[test]
    fn empty_history_page() {
        let html = render_history_page(&[]);
        assert!(html.contains("No history yet."));
    }
}
