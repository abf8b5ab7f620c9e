//! Duration dialect detection.
//!
//! Print duration appears in at least three incompatible comment
//! conventions, depending on which slicer wrote the file:
//!
//! - Bambu Studio / OrcaSlicer: a labeled phrase with an `Xh Ym` value,
//!   e.g. `; total estimated time: 3h 45m` or `; model printing time = 2h 10m`
//! - PrusaSlicer: `; estimated printing time (normal mode) = 1h 20m 30s`
//! - Cura: a compact raw-seconds tag, `;TIME:4530`
//!
//! Each convention gets its own small pure detector; [`detect_duration`]
//! runs them in priority order and the first success wins. Later matches
//! never overwrite an earlier one, so a file carrying both a "total" and a
//! "model-only" phrasing keeps the first by scan order.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Which slicer convention supplied the print duration.
///
/// Informational only: hosts may disclose it in a UI, but no arithmetic
/// ever branches on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Slicer {
    /// No duration annotation was recognized.
    #[default]
    Unknown,
    /// Bambu Studio / OrcaSlicer labeled phrase.
    Bambu,
    /// PrusaSlicer labeled phrase.
    Prusa,
    /// Cura raw-seconds tag.
    Cura,
    /// Recovered from an `<int>h<int>m` pattern in the display filename.
    FilenameFallback,
}

/// A successfully recovered duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DurationMatch {
    /// Total duration in minutes.
    pub minutes: u32,
    /// The convention that produced it.
    pub slicer: Slicer,
}

static HOURS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\d+)\s*h").unwrap());
static MINUTES_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\d+)\s*m").unwrap());
static CURA_TIME_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^;TIME:(\d+)").unwrap());
static FILENAME_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)(\d+)h(\d+)m").unwrap());

/// Labeled phrases carrying an `Xh Ym` value, checked per line in this
/// order. The Bambu spellings come before the Prusa one so that a line is
/// attributed to the most specific phrase it contains.
const LABELED_PHRASES: &[(&str, Slicer)] = &[
    ("total estimated time", Slicer::Bambu),
    ("model printing time", Slicer::Bambu),
    ("estimated printing time", Slicer::Prusa),
];

/// Detect a labeled `Xh Ym` duration phrase (Bambu/Orca/Prusa style).
///
/// Single top-to-bottom pass; the first line that both carries a known
/// phrase and yields at least one of the hour/minute components wins.
pub fn detect_labeled(text: &str) -> Option<DurationMatch> {
    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        for (phrase, slicer) in LABELED_PHRASES {
            let Some(pos) = line.find(phrase) else {
                continue;
            };
            // Several labeled fields can share one line, `;`-delimited;
            // keep only this phrase's own field so a later field's value
            // cannot shadow it.
            let rest = &line[pos + phrase.len()..];
            let rest = rest.split(';').next().unwrap_or(rest);
            // Past the `:`/`=` separator, which may follow a qualifier
            // like "(normal mode)".
            let value = match rest.find([':', '=']) {
                Some(sep) => rest[sep + 1..].trim(),
                None => rest.trim(),
            };
            let hours = capture_u32(&HOURS_RE, value);
            let minutes = capture_u32(&MINUTES_RE, value);
            if hours.is_none() && minutes.is_none() {
                continue;
            }
            let total = hours.unwrap_or(0) * 60 + minutes.unwrap_or(0);
            return Some(DurationMatch {
                minutes: total,
                slicer: *slicer,
            });
        }
    }
    None
}

/// Detect the Cura raw-seconds tag `;TIME:<seconds>`.
///
/// Seconds convert to minutes by truncating integer division, never
/// rounding: 4530 s is exactly 75 min.
pub fn detect_raw_seconds(text: &str) -> Option<DurationMatch> {
    for line in text.lines() {
        let line = line.trim();
        if let Some(caps) = CURA_TIME_RE.captures(line) {
            let seconds: u64 = caps[1].parse().ok()?;
            let hours = seconds / 3600;
            let minutes = (seconds % 3600) / 60;
            return Some(DurationMatch {
                minutes: (hours * 60 + minutes) as u32,
                slicer: Slicer::Cura,
            });
        }
    }
    None
}

/// Last-resort duration recovery from the uploaded file's display name,
/// matching `<int>h<int>m` anywhere, case-insensitively.
pub fn detect_filename(name: &str) -> Option<DurationMatch> {
    let caps = FILENAME_RE.captures(name)?;
    let hours: u32 = caps[1].parse().ok()?;
    let minutes: u32 = caps[2].parse().ok()?;
    Some(DurationMatch {
        minutes: hours * 60 + minutes,
        slicer: Slicer::FilenameFallback,
    })
}

/// Run the in-content detectors in priority order; first success wins.
///
/// Labeled phrases outrank the raw-seconds tag. Returns `None` when no
/// convention matched anywhere in the text, which is not an error: the
/// assembler then falls back to the filename.
pub fn detect_duration(text: &str) -> Option<DurationMatch> {
    let detectors: [fn(&str) -> Option<DurationMatch>; 2] =
        [detect_labeled, detect_raw_seconds];
    let found = detectors.iter().find_map(|detect| detect(text));
    if let Some(m) = found {
        debug!(minutes = m.minutes, slicer = ?m.slicer, "duration annotation matched");
    }
    found
}

fn capture_u32(re: &Regex, text: &str) -> Option<u32> {
    re.captures(text).and_then(|c| c[1].parse().ok())
}
