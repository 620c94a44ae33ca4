//! Updater configuration types
//!
//! Symbol names default to the references used by WaveDrom's narrow skin, so a
//! diagram drawn by WaveDrom can be patched without any extra setup.

use serde::{Deserialize, Serialize};

/// Configuration for the waveform lane updater
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdaterConfig {
    /// Symbol references written into cell slots
    #[serde(default)]
    pub symbols: SymbolTable,

    /// Marker class that gets hidden once lanes have been shifted
    #[serde(default = "default_muted_class")]
    pub muted_class: String,

    /// Fall back to a full refresh when lane and token counts differ
    #[serde(default)]
    pub strict_lane_count: bool,
}

fn default_muted_class() -> String {
    "muted".to_string()
}

impl Default for UpdaterConfig {
    fn default() -> Self {
        Self {
            symbols: SymbolTable::default(),
            muted_class: default_muted_class(),
            strict_lane_count: false,
        }
    }
}

impl UpdaterConfig {
    /// Create a new updater configuration with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: replace the symbol table
    pub fn with_symbols(mut self, symbols: SymbolTable) -> Self {
        self.symbols = symbols;
        self
    }

    /// Builder method: set the marker class hidden after a shift
    pub fn with_muted_class(mut self, class: impl Into<String>) -> Self {
        self.muted_class = class.into();
        self
    }

    /// Builder method: enable or disable strict lane/token count checking
    pub fn with_strict_lane_count(mut self, enabled: bool) -> Self {
        self.strict_lane_count = enabled;
        self
    }
}

/// Symbolic references for the glyphs a lane cell can point to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolTable {
    #[serde(default = "default_posedge")]
    pub posedge: String,
    #[serde(default = "default_high")]
    pub high: String,
    #[serde(default = "default_negedge")]
    pub negedge: String,
    #[serde(default = "default_low")]
    pub low: String,
    #[serde(default = "default_unknown")]
    pub unknown: String,
}

fn default_posedge() -> String {
    "#pclk".to_string()
}

fn default_high() -> String {
    "#111".to_string()
}

fn default_negedge() -> String {
    "#nclk".to_string()
}

fn default_low() -> String {
    "#000".to_string()
}

fn default_unknown() -> String {
    "#xxx".to_string()
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self {
            posedge: default_posedge(),
            high: default_high(),
            negedge: default_negedge(),
            low: default_low(),
            unknown: default_unknown(),
        }
    }
}

impl SymbolTable {
    /// Single-character glyph for a symbol, used for text rendering.
    /// Unknown references render as `?`.
    pub fn glyph(&self, symbol: &str) -> char {
        if symbol == self.posedge {
            '/'
        } else if symbol == self.high {
            '-'
        } else if symbol == self.negedge {
            '\\'
        } else if symbol == self.low {
            '_'
        } else if symbol == self.unknown {
            'x'
        } else {
            '?'
        }
    }
}
