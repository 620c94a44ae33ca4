//! Waveform Lane Updater Library
//!
//! Keeps a rendered multi-lane timing diagram in step with a running simulation
//! without redrawing it from scratch on every tick.
//!
//! # Architecture
//!
//! A lane is a row of half-tick slots, each holding a symbolic reference to a
//! reusable glyph (high, low, unknown, clock edges). On a contiguous tick the
//! [`WaveLaneUpdater`] shifts every lane left by one tick, patches the freed
//! last tick from the input value vector and hides the tick markers the shift
//! made stale. Anything else (tick 0, a skipped tick, no input) goes through
//! the renderer's full redraw.
//!
//! The renderer is reached only through the [`RenderSurface`] trait, so the
//! updater is plain logic over an abstract lane/slot model. [`MemoryDiagram`]
//! is an in-memory surface that renders a [`WaveJson`] description.
//!
//! The library does NOT:
//! - Simulate hardware or produce values on its own
//! - Lay out or paint geometry
//! - Decide when ticks happen (that is the host loop's job)
//!
//! # Example Usage
//!
//! ```
//! use wavelane_core::{Level, MemoryDiagram, RenderSurface, UpdaterConfig, WaveJson, WaveLaneUpdater};
//!
//! let config = UpdaterConfig::new();
//! let mut description = WaveJson::new(["clk", "q"]);
//! description.set_buffer_len(4);
//! for _ in 0..4 {
//!     description.push_values(&[Level::High, Level::Low]).unwrap();
//! }
//!
//! let mut diagram = MemoryDiagram::new(description, &config);
//! let mut updater = WaveLaneUpdater::new(config);
//!
//! // Tick 0 always renders the whole diagram
//! updater.refresh(&mut diagram);
//!
//! // Next tick: record it in the description, then patch the diagram in place
//! diagram.description_mut().push_values(&[Level::Low, Level::Low]).unwrap();
//! let values = diagram.description().last_values();
//! let report = updater.update(&mut diagram, Some(values.as_str()), 1);
//!
//! assert!(report.is_incremental());
//! assert_eq!(diagram.slot(0, 7), Some("#000"));
//! ```

// Public modules
pub mod config;
pub mod memory;
pub mod surface;
pub mod types;
pub mod updater;
pub mod wave_json;

// Re-export main types for convenience
pub use config::{SymbolTable, UpdaterConfig};
pub use memory::{MemoryDiagram, Viewport};
pub use surface::RenderSurface;
pub use types::{
    FullRefreshReason, IncrementalSkip, RefreshPath, Result, UpdateError, UpdateReport,
    WaveValue,
};
pub use updater::WaveLaneUpdater;
pub use wave_json::{Level, Signal, WaveJson};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_basics() {
        // Smoke test: a fresh updater has seen no ticks
        let updater = WaveLaneUpdater::default();
        assert_eq!(updater.last_tick(), 0);
        assert!(!VERSION.is_empty());
    }
}
