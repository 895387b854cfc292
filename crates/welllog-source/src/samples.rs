//! Bulk channel samples.

use serde::{Deserialize, Serialize};

/// The sample series of one channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Samples {
    /// One value per index.
    Scalar(Vec<f64>),
    /// One fixed-width vector per index.
    Vector(Vec<Vec<f64>>),
}

impl Samples {
    pub fn row_count(&self) -> usize {
        match self {
            Samples::Scalar(values) => values.len(),
            Samples::Vector(rows) => rows.len(),
        }
    }

    /// Number of values per index; the widest row for vector samples.
    pub fn width(&self) -> usize {
        match self {
            Samples::Scalar(_) => 1,
            Samples::Vector(rows) => rows.iter().map(Vec::len).max().unwrap_or(0),
        }
    }

    pub fn is_vector(&self) -> bool {
        matches!(self, Samples::Vector(_))
    }
}
