//! Host simulation loop
//!
//! Replays a value trace one tick at a time: the newest values are recorded in
//! the waveform description, then the updater brings the diagram up to date.
//! Until the description has filled its buffer the diagram still grows, so
//! those ticks are passed as tick 0 and always redraw.

use crate::config::AppConfig;
use crate::trace::Trace;
use anyhow::{bail, Context, Result};
use wavelane_core::{
    Level, MemoryDiagram, RenderSurface, UpdateError, UpdateReport, WaveJson, WaveLaneUpdater,
    WaveValue,
};

/// Counters collected over a replay
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReplayStats {
    pub ticks: u64,
    pub full_refreshes: usize,
    pub incremental: usize,
    pub skipped: usize,
    pub unsupported_values: usize,
    pub lane_mismatches: usize,
}

impl ReplayStats {
    fn record(&mut self, report: &UpdateReport) {
        if report.is_incremental() {
            self.incremental += 1;
        } else {
            self.full_refreshes += 1;
        }
        if report.skipped.is_some() {
            self.skipped += 1;
        }

        for diagnostic in &report.diagnostics {
            match diagnostic {
                UpdateError::UnsupportedValue { .. } => self.unsupported_values += 1,
                UpdateError::LaneCountMismatch { .. } => self.lane_mismatches += 1,
                other => log::debug!("Tick {}: {}", report.tick, other),
            }
        }
    }
}

pub struct Replay {
    updater: WaveLaneUpdater,
    diagram: MemoryDiagram,
    levels: Vec<Level>,
    stats: ReplayStats,
}

impl Replay {
    pub fn new(signals: Vec<String>, config: &AppConfig) -> Self {
        let levels = vec![Level::Unknown; signals.len()];

        let mut description = WaveJson::new(signals);
        description.set_buffer_len(config.replay.buffer_len);

        let diagram = MemoryDiagram::new(description, &config.updater)
            .with_viewport(config.viewport.client_width, config.viewport.tick_width);

        Self {
            updater: WaveLaneUpdater::new(config.updater.clone()),
            diagram,
            levels,
            stats: ReplayStats::default(),
        }
    }

    /// Replay every step of a trace, starting at tick 0
    pub fn run(&mut self, trace: &Trace) -> Result<()> {
        for (tick, values) in trace.steps.iter().enumerate() {
            self.step(tick as u64, values)?;
        }
        log::info!(
            "Replayed {} ticks: {} incremental, {} full refreshes",
            self.stats.ticks,
            self.stats.incremental,
            self.stats.full_refreshes
        );
        Ok(())
    }

    /// Record one tick and update the diagram
    pub fn step(&mut self, tick: u64, values: &[WaveValue]) -> Result<UpdateReport> {
        if values.len() != self.levels.len() {
            bail!(
                "Tick {}: expected {} values, got {}",
                tick,
                self.levels.len(),
                values.len()
            );
        }

        for (level, &value) in self.levels.iter_mut().zip(values) {
            *level = Level::from_wave_value(value, *level);
        }

        let description = self.diagram.description();
        let was_full = description.num_ticks() >= description.buffer_len();

        self.diagram
            .description_mut()
            .push_values(&self.levels)
            .with_context(|| format!("Failed to record tick {}", tick))?;

        let host_tick = if was_full { tick } else { 0 };
        let last_values = self.diagram.description().last_values();
        let report = self
            .updater
            .update(&mut self.diagram, Some(last_values.as_str()), host_tick);

        log::trace!("Tick {} ({:?}): {:?}", tick, last_values, report.path);
        self.stats.ticks += 1;
        self.stats.record(&report);
        Ok(report)
    }

    /// Ticks that differ from a full refresh of the same description
    pub fn verify(&self) -> Vec<(usize, usize)> {
        let mut fresh = self.diagram.clone();
        fresh.full_redraw();
        self.diagram.drift(&fresh)
    }

    pub fn diagram(&self) -> &MemoryDiagram {
        &self.diagram
    }

    pub fn stats(&self) -> &ReplayStats {
        &self.stats
    }
}
