//! Hover tooltip formatting.
//!
//! Formats the three tooltip lines for a hovered cell: `"<year> - <Month>"`,
//! the absolute temperature, and the signed variance. Temperatures are
//! truncated (not rounded) to one decimal place, so `7.49` displays as `7.4`.

use crate::data::{month_name, TemperatureRecord};
use crate::error::{Error, Result};

/// Truncate a value toward zero to one decimal place.
#[must_use]
pub fn truncate_tenth(value: f64) -> f64 {
    (value * 10.0).trunc() / 10.0
}

/// Formatted hover content for one cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tooltip {
    /// Title line, `"<year> - <MonthName>"`.
    pub title: String,
    /// Detail lines: absolute temperature, then signed variance.
    pub lines: Vec<String>,
}

impl Tooltip {
    /// Format the tooltip for a record against the dataset base temperature.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRecord`] when the record's month is out of
    /// range and no month name exists for it.
    pub fn format(record: &TemperatureRecord, base_temperature: f64) -> Result<Self> {
        let month = month_name(record.month)
            .ok_or(Error::InvalidRecord { year: record.year, month: record.month })?;

        let absolute = truncate_tenth(record.absolute(base_temperature));
        let variance = truncate_tenth(record.variance);
        let sign = if record.variance >= 0.0 { "+" } else { "" };

        Ok(Self {
            title: format!("{} - {}", record.year, month),
            lines: vec![format!("{absolute:.1}°C"), format!("{sign}{variance:.1}°C")],
        })
    }

    /// All lines joined for plain-text surfaces (SVG `<title>`, terminals).
    #[must_use]
    pub fn text(&self) -> String {
        let mut out = self.title.clone();
        for line in &self.lines {
            out.push('\n');
            out.push_str(line);
        }
        out
    }
}
