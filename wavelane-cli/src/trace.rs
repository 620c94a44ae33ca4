//! Value trace files
//!
//! One comma-separated value vector per line (`h`, `l`, `X` or `.` per lane),
//! in simulation order. Blank lines and lines starting with `#` are skipped.

use anyhow::{bail, Context, Result};
use std::fs;
use std::path::Path;
use wavelane_core::WaveValue;

/// A parsed trace: every step has exactly `width` values
#[derive(Debug, Clone, PartialEq)]
pub struct Trace {
    pub width: usize,
    pub steps: Vec<Vec<WaveValue>>,
}

pub fn load_trace(path: &Path) -> Result<Trace> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read trace file: {:?}", path))?;

    parse_trace(&content).with_context(|| format!("Failed to parse trace file: {:?}", path))
}

pub fn parse_trace(content: &str) -> Result<Trace> {
    let mut steps: Vec<Vec<WaveValue>> = Vec::new();

    for (index, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let values = line
            .split(',')
            .map(|token| {
                WaveValue::parse(token).with_context(|| {
                    format!("line {}: unsupported value {:?}", index + 1, token.trim())
                })
            })
            .collect::<Result<Vec<_>>>()?;

        if let Some(first) = steps.first() {
            if first.len() != values.len() {
                bail!(
                    "line {}: expected {} values, found {}",
                    index + 1,
                    first.len(),
                    values.len()
                );
            }
        }
        steps.push(values);
    }

    let Some(width) = steps.first().map(Vec::len) else {
        bail!("trace contains no value vectors");
    };

    log::debug!("Parsed trace: {} steps of {} values", steps.len(), width);
    Ok(Trace { width, steps })
}
