//! WaveJSON waveform description
//!
//! The complete description a full refresh renders from. Each signal keeps a
//! WaveDrom `wave` string with one character per tick (`h`, `l`, `X`, or `.`
//! for "same as before"). The description can be limited to the last N ticks,
//! in which case `head.tick` tracks how far the visible window has moved.

use crate::types::{Result, UpdateError, WaveValue};
use serde::{Deserialize, Serialize};

/// A resolved signal level (no "repeat")
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    High,
    Low,
    Unknown,
}

impl Level {
    pub fn as_char(&self) -> char {
        match self {
            Level::High => 'h',
            Level::Low => 'l',
            Level::Unknown => 'X',
        }
    }

    /// Resolve a value token against the level it follows
    pub fn from_wave_value(value: WaveValue, previous: Level) -> Level {
        match value {
            WaveValue::High => Level::High,
            WaveValue::Low => Level::Low,
            WaveValue::Unknown => Level::Unknown,
            WaveValue::Repeat => previous,
        }
    }

    fn from_char(c: char) -> Option<Level> {
        match c {
            'h' => Some(Level::High),
            'l' => Some(Level::Low),
            'X' => Some(Level::Unknown),
            _ => None,
        }
    }
}

/// WaveDrom WaveJSON document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaveJson {
    signal: Vec<Signal>,
    #[serde(default)]
    head: Foot,
    #[serde(default)]
    foot: Foot,
    #[serde(skip, default = "unbounded")]
    max_buffer_len: usize,
}

fn unbounded() -> usize {
    usize::MAX
}

impl WaveJson {
    /// Create a description with one empty signal per name
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let signal = names.into_iter().map(|n| Signal::new(n.into())).collect();
        let mut head = Foot::default();
        head.tick = Some(0);

        Self {
            signal,
            head,
            foot: Foot::default(),
            max_buffer_len: unbounded(),
        }
    }

    /// Parse a WaveJSON document. Only `h`, `l`, `X` and `.` are accepted in waves.
    pub fn from_json(json: &str) -> Result<Self> {
        let wave_json: WaveJson = serde_json::from_str(json)?;

        for s in &wave_json.signal {
            if let Some(c) = s.wave.chars().find(|&c| WaveValue::from_char(c).is_none()) {
                return Err(UpdateError::InvalidDescription(format!(
                    "signal {:?} has unsupported wave character {:?}",
                    s.name, c
                )));
            }
        }

        Ok(wave_json)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Keep at most `len` ticks per signal from now on
    pub fn set_buffer_len(&mut self, len: usize) {
        self.max_buffer_len = len;
    }

    pub fn buffer_len(&self) -> usize {
        self.max_buffer_len
    }

    pub fn signals(&self) -> &[Signal] {
        &self.signal
    }

    /// Tick number shown at the left edge of the diagram
    pub fn head_tick(&self) -> Option<u64> {
        self.head.tick
    }

    /// Number of ticks in the longest wave
    pub fn num_ticks(&self) -> usize {
        self.signal
            .iter()
            .map(|s| s.wave.chars().count())
            .max()
            .unwrap_or(0)
    }

    /// Append one tick, one level per signal
    pub fn push_values(&mut self, values: &[Level]) -> Result<()> {
        if values.len() != self.signal.len() {
            return Err(UpdateError::InvalidDescription(format!(
                "expected {} values, got {}",
                self.signal.len(),
                values.len()
            )));
        }

        let mut removed = 0;
        for (s, &value) in self.signal.iter_mut().zip(values) {
            s.push_value(value);
            removed = removed.max(s.keep_last(self.max_buffer_len));
        }

        // The window moved right by the number of dropped ticks
        self.head.tick = self.head.tick.map(|t| t + removed as u64);
        Ok(())
    }

    /// Value vector for the newest tick, as handed to the updater
    ///
    /// One token per signal, comma separated; signals without any tick give `X`.
    pub fn last_values(&self) -> String {
        self.signal
            .iter()
            .map(|s| s.wave.chars().last().unwrap_or('X').to_string())
            .collect::<Vec<_>>()
            .join(",")
    }
}

/// One named signal and its wave string
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signal {
    name: String,
    wave: String,
}

impl Signal {
    fn new(name: String) -> Self {
        Signal {
            name,
            wave: String::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn wave(&self) -> &str {
        &self.wave
    }

    /// Last concrete level before `.` repeats, `X` if none
    fn last_level(wave: &str) -> Level {
        wave.chars()
            .filter_map(Level::from_char)
            .last()
            .unwrap_or(Level::Unknown)
    }

    fn push_value(&mut self, value: Level) {
        let c = if value == Self::last_level(&self.wave) {
            '.'
        } else {
            value.as_char()
        };
        self.wave.push(c);
    }

    /// Drop all but the last `n` ticks, returns how many were dropped
    fn keep_last(&mut self, n: usize) -> usize {
        let len = self.wave.chars().count();
        if len <= n {
            return 0;
        }
        let dropped = len - n;

        let (start, end) = match self.wave.char_indices().nth(dropped) {
            Some((split, _)) => self.wave.split_at(split),
            None => (self.wave.as_str(), ""),
        };

        // A kept wave must not start with '.', it would lose its level
        let mut kept = String::with_capacity(end.len());
        let mut chars = end.chars();
        match chars.next() {
            Some('.') => kept.push(Self::last_level(start).as_char()),
            Some(c) => kept.push(c),
            None => {}
        }
        kept.extend(chars);

        self.wave = kept;
        dropped
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
struct Foot {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    tick: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    tock: Option<u64>,
}
