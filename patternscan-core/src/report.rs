//! Report formatting — pure text builders for the notification
//! collaborator.
//!
//! The scan runs against the Korean session, so headers are stamped in
//! KST regardless of where the scanner itself runs.

use chrono::{DateTime, FixedOffset, Utc};

use crate::scan::{ScanOutcome, ScanStats};
use crate::universe::Universe;

const KST_SECONDS_EAST: i32 = 9 * 3600;

fn kst(now_utc: DateTime<Utc>) -> DateTime<FixedOffset> {
    let offset = FixedOffset::east_opt(KST_SECONDS_EAST).expect("KST offset is valid");
    now_utc.with_timezone(&offset)
}

/// The signal with the most matches; ties resolve to the first name in
/// lexicographic order.
pub fn top_signal_name(stats: &ScanStats) -> Option<&str> {
    stats
        .per_signal
        .iter()
        .max_by(|a, b| a.1.cmp(b.1).then_with(|| b.0.cmp(a.0)))
        .map(|(name, _)| name.as_str())
}

/// Two-line scan header: KST timestamp, then a status marker and the
/// dominant signal name.
pub fn scan_header(stats: &ScanStats, now_utc: DateTime<Utc>, shard_info: &str) -> String {
    let timestamp = kst(now_utc).format("%Y-%m-%d %H:%M KST");
    let marker = if stats.matched > 0 { "\u{1F534}" } else { "\u{26AB}" };
    let top = top_signal_name(stats).unwrap_or("none");
    let mut header = format!("scan {timestamp}");
    if !shard_info.is_empty() {
        header.push(' ');
        header.push_str(shard_info);
    }
    format!("{header}\nsignal: {marker} {top}")
}

/// Per-instrument caption: display name, bare code, last open/close, and
/// one line per triggered finding.
pub fn instrument_caption(universe: &Universe, outcome: &ScanOutcome) -> String {
    let symbol = outcome.symbol.as_str();
    let name = universe.display_name(symbol);
    let code = symbol.split('.').next().unwrap_or(symbol);
    let mut lines = vec![format!(
        "{name} ({code}) | O: {:.2} C: {:.2}",
        outcome.last_bar.open, outcome.last_bar.close
    )];
    for finding in &outcome.findings {
        lines.push(format!("- {}: {}", finding.name, finding.detail));
    }
    lines.join("\n")
}

/// One-line run summary for the tail of a notification batch.
pub fn run_summary(stats: &ScanStats, sent: usize) -> String {
    format!(
        "done: {sent} alert(s) sent | scanned {} ({} ok, {} empty, {} matched, {} errors)",
        stats.total, stats.ok, stats.empty, stats.matched, stats.errors
    )
}
