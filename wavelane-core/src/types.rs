//! Core types for the waveform lane updater
//!
//! This module defines the value tokens the updater understands, the report it
//! hands back after every call, and the error taxonomy. None of the errors are
//! fatal to an update: they are collected in the [`UpdateReport`] and the
//! diagram degrades visually instead.

use std::fmt;

/// Result type for fallible library operations (description parsing, serialization)
pub type Result<T> = std::result::Result<T, UpdateError>;

/// One token of the comma-separated input value vector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaveValue {
    /// `h`: drive high
    High,
    /// `l`: drive low
    Low,
    /// `X`: unknown / undefined
    Unknown,
    /// `.`: keep the previous value
    Repeat,
}

impl WaveValue {
    /// Parse a single token. Surrounding whitespace is ignored.
    ///
    /// Returns `None` for anything outside `h`, `l`, `X` and `.`.
    pub fn parse(token: &str) -> Option<Self> {
        match token.trim() {
            "h" => Some(WaveValue::High),
            "l" => Some(WaveValue::Low),
            "X" => Some(WaveValue::Unknown),
            "." => Some(WaveValue::Repeat),
            _ => None,
        }
    }

    /// Parse a wave character as it appears in a WaveJSON `wave` string
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'h' => Some(WaveValue::High),
            'l' => Some(WaveValue::Low),
            'X' => Some(WaveValue::Unknown),
            '.' => Some(WaveValue::Repeat),
            _ => None,
        }
    }

    /// The token / wave character for this value
    pub fn as_char(&self) -> char {
        match self {
            WaveValue::High => 'h',
            WaveValue::Low => 'l',
            WaveValue::Unknown => 'X',
            WaveValue::Repeat => '.',
        }
    }
}

impl fmt::Display for WaveValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Why an update fell back to a full refresh
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FullRefreshReason {
    /// No input value vector was available
    NoInput,
    /// Tick 0 always redraws (first call or manual refresh)
    ZeroTick,
    /// The tick did not directly follow the previous one
    NonContiguous { last_tick: u64 },
    /// Lane count and token count differ and strict checking is enabled
    LaneCountMismatch,
}

impl fmt::Display for FullRefreshReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FullRefreshReason::NoInput => write!(f, "no input values"),
            FullRefreshReason::ZeroTick => write!(f, "tick 0"),
            FullRefreshReason::NonContiguous { last_tick } => {
                write!(f, "non-contiguous tick (last tick {})", last_tick)
            }
            FullRefreshReason::LaneCountMismatch => write!(f, "lane count mismatch"),
        }
    }
}

/// Which path an update took
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshPath {
    /// The renderer regenerated the whole diagram
    FullRefresh(FullRefreshReason),
    /// Lanes were shifted and the last tick patched in place
    Incremental,
}

/// Why (part of) the incremental path did nothing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IncrementalSkip {
    /// Lane 0 does not exist, the diagram was never rendered
    MissingReferenceLane,
    /// Lane 0 has no complete tick, nothing to shift or append
    EmptyDiagram,
}

/// Outcome of a single [`crate::WaveLaneUpdater::update`] call
#[derive(Debug)]
pub struct UpdateReport {
    /// The tick that was passed in (now the updater's `last_tick`)
    pub tick: u64,
    /// Full refresh or incremental
    pub path: RefreshPath,
    /// Set when the incremental path was taken but skipped some phases
    pub skipped: Option<IncrementalSkip>,
    /// Lanes that went through the shift phase
    pub lanes_shifted: usize,
    /// Lanes whose last tick was rewritten
    pub lanes_appended: usize,
    /// Tick markers hidden after the shift
    pub markers_hidden: usize,
    /// Non-fatal problems met along the way
    pub diagnostics: Vec<UpdateError>,
}

impl UpdateReport {
    pub(crate) fn new(tick: u64, path: RefreshPath) -> Self {
        Self {
            tick,
            path,
            skipped: None,
            lanes_shifted: 0,
            lanes_appended: 0,
            markers_hidden: 0,
            diagnostics: Vec::new(),
        }
    }

    /// True if the incremental path ran
    pub fn is_incremental(&self) -> bool {
        self.path == RefreshPath::Incremental
    }

    /// True if anything was reported during the update
    pub fn has_diagnostics(&self) -> bool {
        !self.diagnostics.is_empty()
    }
}

/// Errors reported by the updater and the waveform description
#[derive(Debug, thiserror::Error)]
pub enum UpdateError {
    #[error("Unsupported value {token:?} for lane {lane}")]
    UnsupportedValue { lane: usize, token: String },

    #[error("Lane count mismatch: {lanes} lanes, {tokens} values")]
    LaneCountMismatch { lanes: usize, tokens: usize },

    #[error("Lane {0} not found")]
    MissingLane(usize),

    #[error("Invalid waveform description: {0}")]
    InvalidDescription(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tokens() {
        assert_eq!(WaveValue::parse("h"), Some(WaveValue::High));
        assert_eq!(WaveValue::parse("l"), Some(WaveValue::Low));
        assert_eq!(WaveValue::parse("X"), Some(WaveValue::Unknown));
        assert_eq!(WaveValue::parse("."), Some(WaveValue::Repeat));
        assert_eq!(WaveValue::parse(" h "), Some(WaveValue::High));

        // Case matters: only upper-case X is unknown
        assert_eq!(WaveValue::parse("x"), None);
        assert_eq!(WaveValue::parse("H"), None);
        assert_eq!(WaveValue::parse("Z"), None);
        assert_eq!(WaveValue::parse(""), None);
    }

    #[test]
    fn test_wave_chars() {
        for c in ['h', 'l', 'X', '.'] {
            assert_eq!(WaveValue::from_char(c).map(|v| v.as_char()), Some(c));
        }
        assert_eq!(WaveValue::from_char('0'), None);
    }

    #[test]
    fn test_error_display() {
        let err = UpdateError::UnsupportedValue { lane: 2, token: "Z".to_string() };
        assert_eq!(err.to_string(), "Unsupported value \"Z\" for lane 2");

        let err = UpdateError::LaneCountMismatch { lanes: 3, tokens: 2 };
        assert_eq!(err.to_string(), "Lane count mismatch: 3 lanes, 2 values");
    }

    #[test]
    fn test_report_helpers() {
        let mut report = UpdateReport::new(4, RefreshPath::Incremental);
        assert!(report.is_incremental());
        assert!(!report.has_diagnostics());

        report.diagnostics.push(UpdateError::MissingLane(0));
        assert!(report.has_diagnostics());

        let report = UpdateReport::new(0, RefreshPath::FullRefresh(FullRefreshReason::ZeroTick));
        assert!(!report.is_incremental());
    }
}
