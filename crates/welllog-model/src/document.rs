//! Per-frame output documents.

use serde::{Deserialize, Serialize};

use crate::curve::{CurveDefinition, DataMatrix};
use crate::header::Header;
use crate::record::RecordSet;

/// The normalized document produced for one frame of a logical section.
///
/// All documents of a section carry identical header, parameter, equipment,
/// zone and tool values.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Document {
    pub header: Header,
    pub parameters: RecordSet,
    pub equipments: RecordSet,
    pub zones: RecordSet,
    pub tools: RecordSet,
    /// The frame's own normalized record.
    pub frame: RecordSet,
    pub curves: Vec<CurveDefinition>,
    pub data: DataMatrix,
}

impl Document {
    /// Name of the frame this document was built from.
    pub fn frame_name(&self) -> Option<&str> {
        self.frame.names().next()
    }
}
