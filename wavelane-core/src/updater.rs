//! Waveform lane updater
//!
//! Keeps a rendered timing diagram in step with the simulation one tick at a
//! time. For a contiguous tick the lanes are shifted left by one tick and the
//! freed trailing tick is patched from the input value vector. Any other call
//! asks the renderer for a full redraw.

use crate::config::UpdaterConfig;
use crate::surface::RenderSurface;
use crate::types::{
    FullRefreshReason, IncrementalSkip, RefreshPath, UpdateError, UpdateReport, WaveValue,
};

/// Half-tick slots moved by one shift: an edge slot and a level slot
const SHIFT_SLOTS: usize = 2;

/// Incremental updater for a multi-lane timing diagram
///
/// Owns the only state carried between calls: the last tick it was given.
/// Create one per diagram view and [`reset`](WaveLaneUpdater::reset) it when the
/// diagram is re-created.
#[derive(Debug, Clone)]
pub struct WaveLaneUpdater {
    config: UpdaterConfig,
    last_tick: u64,
}

impl WaveLaneUpdater {
    /// Create an updater with `last_tick = 0`
    pub fn new(config: UpdaterConfig) -> Self {
        Self {
            config,
            last_tick: 0,
        }
    }

    pub fn config(&self) -> &UpdaterConfig {
        &self.config
    }

    /// Tick recorded by the most recent update
    pub fn last_tick(&self) -> u64 {
        self.last_tick
    }

    /// Forget the previous tick, e.g. after the diagram was re-created
    pub fn reset(&mut self) {
        self.last_tick = 0;
    }

    /// Manual refresh: always redraws the whole diagram
    pub fn refresh<S: RenderSurface + ?Sized>(&mut self, surface: &mut S) -> UpdateReport {
        self.update(surface, None, 0)
    }

    /// Bring the diagram up to date with `tick`
    ///
    /// `values` is the comma-separated value vector for the newest tick, one
    /// token per lane. The incremental path runs only when `values` is present,
    /// `tick` is not 0 and `tick == last_tick + 1`; otherwise the surface is
    /// fully redrawn. Either way `tick` becomes the new `last_tick` and the
    /// viewport is scrolled to the end.
    ///
    /// Never fails: problems are collected in [`UpdateReport::diagnostics`].
    pub fn update<S: RenderSurface + ?Sized>(
        &mut self,
        surface: &mut S,
        values: Option<&str>,
        tick: u64,
    ) -> UpdateReport {
        let report = match self.check_contiguous(values, tick) {
            Ok(values) => self.incremental_update(surface, values, tick),
            Err(reason) => Self::full_refresh(surface, tick, reason),
        };

        self.last_tick = tick;
        surface.scroll_to_end();
        report
    }

    /// Returns the value vector if the incremental path may run
    fn check_contiguous<'v>(
        &self,
        values: Option<&'v str>,
        tick: u64,
    ) -> std::result::Result<&'v str, FullRefreshReason> {
        let values = values.ok_or(FullRefreshReason::NoInput)?;
        if tick == 0 {
            return Err(FullRefreshReason::ZeroTick);
        }
        if self.last_tick.checked_add(1) != Some(tick) {
            return Err(FullRefreshReason::NonContiguous {
                last_tick: self.last_tick,
            });
        }
        Ok(values)
    }

    fn full_refresh<S: RenderSurface + ?Sized>(
        surface: &mut S,
        tick: u64,
        reason: FullRefreshReason,
    ) -> UpdateReport {
        log::debug!("Full refresh at tick {}: {}", tick, reason);
        surface.full_redraw();
        UpdateReport::new(tick, RefreshPath::FullRefresh(reason))
    }

    fn incremental_update<S: RenderSurface + ?Sized>(
        &self,
        surface: &mut S,
        values: &str,
        tick: u64,
    ) -> UpdateReport {
        let mut report = UpdateReport::new(tick, RefreshPath::Incremental);

        // Lane 0 is the reference lane for the diagram width
        let Some(reference_len) = surface.lane_len(0) else {
            log::debug!("No reference lane at tick {}, diagram not rendered yet", tick);
            report.skipped = Some(IncrementalSkip::MissingReferenceLane);
            return report;
        };

        let tokens: Vec<&str> = values.split(',').collect();
        let lanes = surface.lane_count();

        if lanes != tokens.len() {
            let mismatch = UpdateError::LaneCountMismatch {
                lanes,
                tokens: tokens.len(),
            };
            log::warn!("{} at tick {}", mismatch, tick);

            if self.config.strict_lane_count {
                let mut report =
                    Self::full_refresh(surface, tick, FullRefreshReason::LaneCountMismatch);
                report.diagnostics.push(mismatch);
                return report;
            }
            report.diagnostics.push(mismatch);
        }

        // Must be taken before the shift mutates anything
        let num_ticks = reference_len / 2;

        if num_ticks == 0 {
            log::debug!("Diagram has no ticks yet, nothing to shift at tick {}", tick);
            report.skipped = Some(IncrementalSkip::EmptyDiagram);
        } else {
            report.lanes_shifted = self.shift_lanes(surface, lanes);
            self.append_tick(surface, &tokens, lanes, num_ticks - 1, &mut report);
        }

        // The shift moved cells but not the markers, so their alignment is gone
        report.markers_hidden = self.suppress_markers(surface);

        log::debug!(
            "Incremental update at tick {}: {} lanes shifted, {} appended, {} markers hidden",
            tick,
            report.lanes_shifted,
            report.lanes_appended,
            report.markers_hidden
        );
        report
    }

    /// Shift every lane left by one tick
    fn shift_lanes<S: RenderSurface + ?Sized>(&self, surface: &mut S, lanes: usize) -> usize {
        let n = SHIFT_SLOTS;
        let mut shifted = 0;

        for lane in 0..lanes {
            let Some(len) = surface.lane_len(lane) else {
                continue;
            };

            // The last n slots have no source and are left untouched
            for pos in 0..len.saturating_sub(n) {
                if let Some(symbol) = surface.slot(lane, pos + n).map(str::to_owned) {
                    surface.set_slot(lane, pos, &symbol);
                }
            }
            shifted += 1;
        }

        shifted
    }

    /// Write the newest values into tick `last` of each lane
    fn append_tick<S: RenderSurface + ?Sized>(
        &self,
        surface: &mut S,
        tokens: &[&str],
        lanes: usize,
        last: usize,
        report: &mut UpdateReport,
    ) {
        let symbols = &self.config.symbols;
        let edge = last * 2;
        let level = edge + 1;

        // Lanes without a token are only shifted; surplus tokens are ignored
        for (lane, token) in tokens.iter().enumerate().take(lanes) {
            let written = match WaveValue::parse(token) {
                // Force the edge slot to the level, otherwise the old edge glyph
                // would show up in front of a flat level
                Some(WaveValue::Repeat) => match surface.slot(lane, level).map(str::to_owned) {
                    Some(previous) => surface.set_slot(lane, edge, &previous),
                    None => false,
                },
                Some(WaveValue::High) => {
                    write_tick(surface, lane, edge, &symbols.posedge, &symbols.high)
                }
                Some(WaveValue::Low) => {
                    write_tick(surface, lane, edge, &symbols.negedge, &symbols.low)
                }
                Some(WaveValue::Unknown) => {
                    write_tick(surface, lane, edge, &symbols.unknown, &symbols.unknown)
                }
                None => {
                    let err = UpdateError::UnsupportedValue {
                        lane,
                        token: token.to_string(),
                    };
                    log::warn!("{}", err);
                    report.diagnostics.push(err);
                    continue;
                }
            };

            if written {
                log::trace!("Lane {} tick {} set to {:?}", lane, last, token);
                report.lanes_appended += 1;
            } else {
                log::trace!("Lane {} has no tick {}, value dropped", lane, last);
            }
        }
    }

    /// Hide every muted marker, returns how many were hidden
    fn suppress_markers<S: RenderSurface + ?Sized>(&self, surface: &mut S) -> usize {
        let mut hidden = 0;
        for index in 0..surface.marker_count() {
            if surface.marker_class(index) == Some(self.config.muted_class.as_str()) {
                surface.hide_marker(index);
                hidden += 1;
            }
        }
        hidden
    }
}

impl Default for WaveLaneUpdater {
    fn default() -> Self {
        Self::new(UpdaterConfig::default())
    }
}

/// Set both half-ticks of one tick, returns false if either slot is missing
fn write_tick<S: RenderSurface + ?Sized>(
    surface: &mut S,
    lane: usize,
    edge: usize,
    edge_symbol: &str,
    level_symbol: &str,
) -> bool {
    let edge_written = surface.set_slot(lane, edge, edge_symbol);
    let level_written = surface.set_slot(lane, edge + 1, level_symbol);
    edge_written && level_written
}
