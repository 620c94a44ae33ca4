//! In-memory rendering surface
//!
//! [`MemoryDiagram`] renders a [`WaveJson`] description into lanes of symbolic
//! references the same way a WaveDrom-style renderer lays out its `<use>`
//! elements: two half-tick slots per tick, one muted grid marker per tick and a
//! horizontally scrollable viewport. It backs the CLI host and the tests, and
//! doubles as a reference for what a full refresh should produce.

use crate::config::{SymbolTable, UpdaterConfig};
use crate::surface::RenderSurface;
use crate::types::{Result, UpdateError, WaveValue};
use crate::wave_json::WaveJson;

/// Default width of one tick in pixels
pub const DEFAULT_TICK_WIDTH: u32 = 20;

/// Default visible width of the viewport in pixels
pub const DEFAULT_CLIENT_WIDTH: u32 = 800;

/// Horizontal scroll state of the diagram container
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub scroll_left: u32,
    pub scroll_width: u32,
    pub client_width: u32,
}

impl Viewport {
    pub fn max_scroll_left(&self) -> u32 {
        self.scroll_width.saturating_sub(self.client_width)
    }

    pub fn is_at_end(&self) -> bool {
        self.scroll_left == self.max_scroll_left()
    }
}

#[derive(Debug, Clone, PartialEq)]
struct Lane {
    name: String,
    slots: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
struct Marker {
    class: String,
    visible: bool,
}

/// Timing diagram held entirely in memory
///
/// Starts out empty: nothing exists until the first [`RenderSurface::full_redraw`].
#[derive(Debug, Clone)]
pub struct MemoryDiagram {
    description: WaveJson,
    symbols: SymbolTable,
    muted_class: String,
    tick_width: u32,
    lanes: Vec<Lane>,
    markers: Vec<Marker>,
    viewport: Viewport,
    full_redraws: usize,
}

impl MemoryDiagram {
    /// Create an unrendered diagram that uses the updater's symbols and marker class
    pub fn new(description: WaveJson, config: &UpdaterConfig) -> Self {
        Self {
            description,
            symbols: config.symbols.clone(),
            muted_class: config.muted_class.clone(),
            tick_width: DEFAULT_TICK_WIDTH,
            lanes: Vec::new(),
            markers: Vec::new(),
            viewport: Viewport {
                scroll_left: 0,
                scroll_width: 0,
                client_width: DEFAULT_CLIENT_WIDTH,
            },
            full_redraws: 0,
        }
    }

    /// Builder method: set viewport width and tick width in pixels
    pub fn with_viewport(mut self, client_width: u32, tick_width: u32) -> Self {
        self.viewport.client_width = client_width;
        self.tick_width = tick_width;
        self
    }

    pub fn description(&self) -> &WaveJson {
        &self.description
    }

    /// The description the next full redraw renders from
    pub fn description_mut(&mut self) -> &mut WaveJson {
        &mut self.description
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// How many times the diagram was fully redrawn
    pub fn full_redraws(&self) -> usize {
        self.full_redraws
    }

    /// Symbols of one lane
    pub fn lane_symbols(&self, lane: usize) -> Result<&[String]> {
        self.lanes
            .get(lane)
            .map(|l| l.slots.as_slice())
            .ok_or(UpdateError::MissingLane(lane))
    }

    pub fn visible_markers(&self) -> usize {
        self.markers.iter().filter(|m| m.visible).count()
    }

    /// Ticks whose glyphs differ between two diagrams, as `(lane, tick)`
    ///
    /// The edge slot of tick 0 is not compared: after a shift it still holds
    /// the edge of a tick that has scrolled out.
    pub fn drift(&self, other: &MemoryDiagram) -> Vec<(usize, usize)> {
        let mut drift = Vec::new();
        let lanes = self.lanes.len().max(other.lanes.len());

        for lane in 0..lanes {
            let ours = self.lanes.get(lane).map(|l| l.slots.as_slice()).unwrap_or(&[]);
            let theirs = other.lanes.get(lane).map(|l| l.slots.as_slice()).unwrap_or(&[]);
            let ticks = ours.len().max(theirs.len()) / 2;

            for tick in 0..ticks {
                let first = if tick == 0 { 1 } else { tick * 2 };
                let differs = (first..tick * 2 + 2).any(|pos| ours.get(pos) != theirs.get(pos));
                if differs {
                    drift.push((lane, tick));
                }
            }
        }

        drift
    }

    /// One line per lane: the lane name followed by one glyph per half-tick
    pub fn render_text(&self) -> String {
        let width = self.lanes.iter().map(|l| l.name.len()).max().unwrap_or(0);

        let mut out = String::new();
        for lane in &self.lanes {
            let glyphs: String = lane.slots.iter().map(|s| self.symbols.glyph(s)).collect();
            out.push_str(&format!("{:>width$} | {}\n", lane.name, glyphs, width = width));
        }
        out
    }

    /// Render one wave into half-tick slots, padded to `ticks` with the last level
    fn render_wave(&self, wave: &str, ticks: usize) -> Vec<String> {
        let symbols = &self.symbols;
        let mut slots = Vec::with_capacity(ticks * 2);
        let mut level = symbols.unknown.as_str();

        for c in wave.chars() {
            let (edge, next) = match WaveValue::from_char(c) {
                Some(WaveValue::High) => (symbols.posedge.as_str(), symbols.high.as_str()),
                Some(WaveValue::Low) => (symbols.negedge.as_str(), symbols.low.as_str()),
                Some(WaveValue::Unknown) => (symbols.unknown.as_str(), symbols.unknown.as_str()),
                Some(WaveValue::Repeat) | None => (level, level),
            };
            slots.push(edge.to_string());
            slots.push(next.to_string());
            level = next;
        }

        while slots.len() < ticks * 2 {
            slots.push(level.to_string());
        }
        slots
    }
}

impl RenderSurface for MemoryDiagram {
    fn full_redraw(&mut self) {
        let ticks = self.description.num_ticks();

        let lanes = self
            .description
            .signals()
            .iter()
            .map(|s| Lane {
                name: s.name().to_string(),
                slots: self.render_wave(s.wave(), ticks),
            })
            .collect();
        self.lanes = lanes;

        self.markers = (0..ticks)
            .map(|_| Marker {
                class: self.muted_class.clone(),
                visible: true,
            })
            .collect();

        self.viewport.scroll_width = u32::try_from(ticks)
            .unwrap_or(u32::MAX)
            .saturating_mul(self.tick_width);
        self.viewport.scroll_left = self.viewport.scroll_left.min(self.viewport.max_scroll_left());
        self.full_redraws += 1;

        log::trace!("Redrew {} lanes of {} ticks", self.lanes.len(), ticks);
    }

    fn lane_len(&self, lane: usize) -> Option<usize> {
        self.lanes.get(lane).map(|l| l.slots.len())
    }

    fn lane_count(&self) -> usize {
        self.lanes.len()
    }

    fn slot(&self, lane: usize, pos: usize) -> Option<&str> {
        self.lanes.get(lane)?.slots.get(pos).map(String::as_str)
    }

    fn set_slot(&mut self, lane: usize, pos: usize, symbol: &str) -> bool {
        match self.lanes.get_mut(lane).and_then(|l| l.slots.get_mut(pos)) {
            Some(slot) => {
                slot.clear();
                slot.push_str(symbol);
                true
            }
            None => false,
        }
    }

    fn marker_count(&self) -> usize {
        self.markers.len()
    }

    fn marker_class(&self, index: usize) -> Option<&str> {
        self.markers.get(index).map(|m| m.class.as_str())
    }

    fn hide_marker(&mut self, index: usize) {
        if let Some(marker) = self.markers.get_mut(index) {
            marker.visible = false;
        }
    }

    fn scroll_to_end(&mut self) {
        self.viewport.scroll_left = self.viewport.max_scroll_left();
    }
}
