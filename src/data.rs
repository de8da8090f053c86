//! Dataset model: monthly temperature-variance records.
//!
//! The wire format is a single JSON object:
//!
//! ```json
//! {
//!   "baseTemperature": 8.66,
//!   "monthlyVariance": [
//!     { "year": 1753, "month": 1, "variance": -1.366 },
//!     ...
//!   ]
//! }
//! ```
//!
//! A [`Dataset`] is parsed once and treated as read-only for the lifetime of a
//! render pass. Everything derived from it (extents, buckets, geometry) is
//! recomputed wholesale when the dataset changes.

use std::io::Read;

use serde::Deserialize;

use crate::error::{Error, Result};

/// Months per year, and the number of vertical bands in the grid.
pub const MONTHS_PER_YEAR: usize = 12;

/// English month names, indexed by `month - 1`.
pub const MONTH_NAMES: [&str; MONTHS_PER_YEAR] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Look up the English name for a 1-based month, if in range.
#[must_use]
pub fn month_name(month: u32) -> Option<&'static str> {
    MONTH_NAMES.get(month.checked_sub(1)? as usize).copied()
}

/// One month's temperature deviation from the dataset base temperature.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct TemperatureRecord {
    /// Calendar year of the measurement.
    pub year: i32,
    /// Month of the measurement, 1 (January) through 12 (December).
    pub month: u32,
    /// Deviation in degrees Celsius from the base temperature.
    pub variance: f64,
}

impl TemperatureRecord {
    /// Absolute temperature: base temperature plus this record's variance.
    #[must_use]
    pub fn absolute(&self, base_temperature: f64) -> f64 {
        base_temperature + self.variance
    }

    /// Whether the month falls in 1..=12.
    #[must_use]
    pub fn month_in_range(&self) -> bool {
        (1..=MONTHS_PER_YEAR as u32).contains(&self.month)
    }
}

/// A closed interval derived from data; never stored, always recomputed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extent<T> {
    /// Smallest observed value.
    pub min: T,
    /// Largest observed value.
    pub max: T,
}

impl<T: PartialOrd + Copy> Extent<T> {
    /// Compute the extent of a non-empty sequence. Returns `None` when the
    /// sequence is empty.
    pub fn of(values: impl IntoIterator<Item = T>) -> Option<Self> {
        let mut iter = values.into_iter();
        let first = iter.next()?;
        let mut extent = Self { min: first, max: first };
        for value in iter {
            if value < extent.min {
                extent.min = value;
            }
            if value > extent.max {
                extent.max = value;
            }
        }
        Some(extent)
    }
}

/// The full dataset: a base temperature and an ordered sequence of records.
#[derive(Debug, Clone, Deserialize)]
pub struct Dataset {
    /// Reference average temperature in degrees Celsius.
    #[serde(rename = "baseTemperature")]
    pub base_temperature: f64,
    /// Monthly variance records, typically 12 per year.
    #[serde(rename = "monthlyVariance")]
    pub records: Vec<TemperatureRecord>,
}

impl Dataset {
    /// Parse and validate a dataset from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Json`] for malformed input or missing fields,
    /// [`Error::EmptyData`] when no records are present, and
    /// [`Error::InvalidRecord`] for an out-of-range month.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let dataset: Self = serde_json::from_str(json)?;
        dataset.validate()?;
        Ok(dataset)
    }

    /// Parse and validate a dataset from a reader.
    ///
    /// # Errors
    ///
    /// Same conditions as [`Dataset::from_json_str`].
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let dataset: Self = serde_json::from_reader(reader)?;
        dataset.validate()?;
        Ok(dataset)
    }

    /// Validate the dataset invariants: non-empty records, months in 1..=12.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyData`] or [`Error::InvalidRecord`] naming the
    /// first offending record.
    pub fn validate(&self) -> Result<()> {
        if self.records.is_empty() {
            return Err(Error::EmptyData);
        }

        if let Some(bad) = self.records.iter().find(|r| !r.month_in_range()) {
            return Err(Error::InvalidRecord { year: bad.year, month: bad.month });
        }

        Ok(())
    }

    /// Drop records with out-of-range months instead of failing.
    ///
    /// Returns how many records were removed. For callers that prefer
    /// skipping bad rows to rejecting the dataset; the strict path is
    /// [`Dataset::validate`].
    pub fn retain_valid(&mut self) -> usize {
        let before = self.records.len();
        self.records.retain(TemperatureRecord::month_in_range);
        before - self.records.len()
    }

    /// Extent of years covered by the records.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyData`] when there are no records.
    pub fn year_extent(&self) -> Result<Extent<i32>> {
        Extent::of(self.records.iter().map(|r| r.year)).ok_or(Error::EmptyData)
    }

    /// Extent of absolute temperatures (variance + base) across the records.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyData`] when there are no records.
    pub fn temp_extent(&self) -> Result<Extent<f64>> {
        Extent::of(self.records.iter().map(|r| r.absolute(self.base_temperature)))
            .ok_or(Error::EmptyData)
    }
}
