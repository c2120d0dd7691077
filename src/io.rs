//! Tabular persistence for waves and sample buffers
//!
//! Waves serialize to a delimited text table with a `freq,amp,phase`
//! header and one row per component; sample buffers to a two-column
//! `Time,Signal` table used for golden-file comparison. Loading
//! validates the header exactly and rejects ragged rows and
//! non-numeric cells. Rendered buffers can additionally be exported as
//! 32-bit float WAV files.

use std::fs;
use std::io::Write;
use std::path::Path;

use hound::{SampleFormat, WavSpec, WavWriter};
use log::debug;

use crate::error::{ResonaError, Result};
use crate::wave::{Sinusoid, Wave};

/// Exact header of a wave table
const WAVE_HEADER: [&str; 3] = ["freq", "amp", "phase"];

/// Parse one delimited cell; empty cells read as zero
fn parse_cell(cell: &str, line: usize) -> Result<f64> {
    let trimmed = cell.trim();
    if trimmed.is_empty() {
        return Ok(0.0);
    }
    trimmed
        .parse::<f64>()
        .map_err(|_| ResonaError::NonNumericCell {
            line,
            cell: trimmed.to_string(),
        })
}

/// Split one data line into exactly `expected` numeric cells
fn parse_row(line: &str, line_number: usize, expected: usize) -> Result<Vec<f64>> {
    let cells: Vec<&str> = line.split(',').collect();
    if cells.len() != expected {
        return Err(ResonaError::MalformedRow {
            line: line_number,
            reason: format!("expected {} columns, got {}", expected, cells.len()),
        });
    }
    cells
        .iter()
        .map(|cell| parse_cell(cell, line_number))
        .collect()
}

// ============================================================================
// Wave Tables
// ============================================================================

/// Save a wave as a `freq,amp,phase` table
pub fn save_wave(path: &Path, wave: &Wave) -> Result<()> {
    let mut file = fs::File::create(path)?;
    writeln!(file, "{}", WAVE_HEADER.join(","))?;
    for row in wave.components() {
        writeln!(file, "{},{},{}", row.frequency, row.amplitude, row.phase)?;
    }
    debug!("saved {} components to {}", wave.len(), path.display());
    Ok(())
}

/// Load a wave from a `freq,amp,phase` table
///
/// The header must match the column names and count exactly.
pub fn load_wave(path: &Path) -> Result<Wave> {
    if !path.exists() {
        return Err(ResonaError::FileNotFound {
            path: path.display().to_string(),
        });
    }
    let contents = fs::read_to_string(path)?;
    let mut lines = contents.lines().enumerate();

    let (_, header_line) = lines.next().ok_or_else(|| ResonaError::HeaderMismatch {
        expected: WAVE_HEADER.join(","),
        actual: String::new(),
    })?;
    let header: Vec<&str> = header_line.split(',').map(str::trim).collect();
    if header != WAVE_HEADER {
        return Err(ResonaError::HeaderMismatch {
            expected: WAVE_HEADER.join(","),
            actual: header.join(","),
        });
    }

    let mut components = Vec::new();
    for (index, line) in lines {
        if line.trim().is_empty() {
            continue;
        }
        let row = parse_row(line, index + 1, 3)?;
        components.push(Sinusoid::new(row[0], row[1], row[2]));
    }
    Ok(Wave::new(components))
}

// ============================================================================
// Sample Tables
// ============================================================================

/// Save a timestamp/value pair sequence as a two-column table
pub fn save_samples(
    path: &Path,
    timestamps: &[f64],
    samples: &[f64],
    timestamps_title: &str,
    samples_title: &str,
) -> Result<()> {
    if timestamps.len() != samples.len() {
        return Err(ResonaError::LengthMismatch {
            context: "sample table columns",
            expected: timestamps.len(),
            actual: samples.len(),
        });
    }
    let mut file = fs::File::create(path)?;
    writeln!(file, "{},{}", timestamps_title, samples_title)?;
    for (t, s) in timestamps.iter().zip(samples) {
        writeln!(file, "{},{}", t, s)?;
    }
    Ok(())
}

/// Load a two-column timestamp/value table
///
/// The header row is required but its titles are not constrained;
/// golden files may carry any column names.
pub fn load_samples(path: &Path) -> Result<(Vec<f64>, Vec<f64>)> {
    if !path.exists() {
        return Err(ResonaError::FileNotFound {
            path: path.display().to_string(),
        });
    }
    let contents = fs::read_to_string(path)?;
    let mut lines = contents.lines().enumerate();

    let (_, header_line) = lines.next().ok_or_else(|| ResonaError::HeaderMismatch {
        expected: "two column titles".to_string(),
        actual: String::new(),
    })?;
    let header_count = header_line.split(',').count();
    if header_count != 2 {
        return Err(ResonaError::HeaderMismatch {
            expected: "two column titles".to_string(),
            actual: header_line.trim().to_string(),
        });
    }

    let mut timestamps = Vec::new();
    let mut samples = Vec::new();
    for (index, line) in lines {
        if line.trim().is_empty() {
            continue;
        }
        let row = parse_row(line, index + 1, 2)?;
        timestamps.push(row[0]);
        samples.push(row[1]);
    }
    Ok((timestamps, samples))
}

/// Sample a wave over a duration and save the result as a table
///
/// Without an explicit rate the wave's own Nyquist rate (twice its
/// highest frequency) is used, which is the coarsest alias-free grid.
pub fn save_wave_samples(
    path: &Path,
    wave: &Wave,
    duration: f64,
    sample_rate: Option<f64>,
) -> Result<()> {
    let rate = sample_rate
        .or_else(|| wave.nyquist_rate())
        .unwrap_or_default();
    let timestamps = Wave::generate_timestamps(duration, Some(rate));
    let samples = wave.samples(&timestamps);
    save_samples(path, &timestamps, &samples, "Time", "Signal")
}

// ============================================================================
// WAV Export
// ============================================================================

/// Export a mono sample buffer as a 32-bit float WAV file
pub fn export_wav(path: &Path, samples: &[f64], sample_rate: u32) -> Result<()> {
    let spec = WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 32,
        sample_format: SampleFormat::Float,
    };
    let mut writer = WavWriter::create(path, spec).map_err(wav_error)?;
    for &sample in samples {
        writer.write_sample(sample as f32).map_err(wav_error)?;
    }
    writer.finalize().map_err(wav_error)?;
    debug!("exported {} samples to {}", samples.len(), path.display());
    Ok(())
}

fn wav_error(err: hound::Error) -> ResonaError {
    match err {
        hound::Error::IoError(io) => ResonaError::Io(io),
        other => ResonaError::AudioBackend {
            reason: other.to_string(),
        },
    }
}
