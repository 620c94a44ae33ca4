//! Replay summary output

use crate::replay::{Replay, ReplayStats};
use chrono::{DateTime, Local};
use std::fmt;

/// Text summary printed after a replay
pub struct Summary<'a> {
    replay: &'a Replay,
    started: DateTime<Local>,
    finished: DateTime<Local>,
}

impl<'a> Summary<'a> {
    pub fn new(replay: &'a Replay, started: DateTime<Local>, finished: DateTime<Local>) -> Self {
        Self {
            replay,
            started,
            finished,
        }
    }
}

impl fmt::Display for Summary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let stats = self.replay.stats();
        let diagram = self.replay.diagram();
        let viewport = diagram.viewport();

        writeln!(f, "═══════════════════════════════════════════════")?;
        writeln!(f, "  Waveform Replay Summary")?;
        writeln!(f, "═══════════════════════════════════════════════\n")?;
        writeln!(f, "{}", diagram.render_text())?;
        writeln!(f, "Ticks replayed:      {}", stats.ticks)?;
        writeln!(f, "Incremental updates: {}", stats.incremental)?;
        writeln!(f, "Full refreshes:      {}", stats.full_refreshes)?;
        if let Some(head) = diagram.description().head_tick() {
            writeln!(f, "First visible tick:  {}", head)?;
        }
        writeln!(
            f,
            "Viewport:            {}/{} px",
            viewport.scroll_left,
            viewport.max_scroll_left()
        )?;
        write!(f, "{}", Diagnostics(stats))?;
        writeln!(
            f,
            "\nFinished {} ({} ms)",
            self.finished.format("%Y-%m-%d %H:%M:%S"),
            (self.finished - self.started).num_milliseconds()
        )
    }
}

struct Diagnostics<'a>(&'a ReplayStats);

impl fmt::Display for Diagnostics<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let stats = self.0;
        if stats.unsupported_values == 0 && stats.lane_mismatches == 0 && stats.skipped == 0 {
            return writeln!(f, "Diagnostics:         none");
        }
        writeln!(f, "Diagnostics:")?;
        writeln!(f, "  Unsupported values: {}", stats.unsupported_values)?;
        writeln!(f, "  Lane mismatches:    {}", stats.lane_mismatches)?;
        writeln!(f, "  Skipped updates:    {}", stats.skipped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::trace::parse_trace;

    #[test]
    fn test_summary_contents() {
        let mut replay = Replay::new(vec!["clk".to_string()], &AppConfig::default());
        replay.run(&parse_trace("h\nl\nh\n").unwrap()).unwrap();

        let now = Local::now();
        let text = Summary::new(&replay, now, now).to_string();

        assert!(text.contains("clk | /-\\_/-"));
        assert!(text.contains("Ticks replayed:      3"));
        assert!(text.contains("Full refreshes:      3"));
        assert!(text.contains("Diagnostics:         none"));
        assert!(text.contains("(0 ms)"));
    }

    #[test]
    fn test_summary_lists_diagnostics() {
        let stats = ReplayStats {
            unsupported_values: 2,
            ..ReplayStats::default()
        };

        let text = format!("{}", Diagnostics(&stats));
        assert!(text.starts_with("Diagnostics:\n"));
        assert!(text.contains("  Unsupported values: 2"));
        assert!(text.contains("  Skipped updates:    0"));
    }
}
