//! Composition of per-frame documents.

use welllog_model::{CurveDefinition, DataMatrix, Document, Header, RecordSet};

/// Values shared by every document of a logical section.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SectionRecords {
    pub header: Header,
    pub parameters: RecordSet,
    pub equipments: RecordSet,
    pub zones: RecordSet,
    pub tools: RecordSet,
}

/// The frame-specific part of one document.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FrameOutput {
    /// The frame's own record, as a single-object record set.
    pub frame: RecordSet,
    pub curves: Vec<CurveDefinition>,
    pub data: DataMatrix,
}

/// Builds one document per frame, each with its own copy of the section
/// values.
pub fn assemble(section: &SectionRecords, frames: Vec<FrameOutput>) -> Vec<Document> {
    frames
        .into_iter()
        .map(|frame| Document {
            header: section.header.clone(),
            parameters: section.parameters.clone(),
            equipments: section.equipments.clone(),
            zones: section.zones.clone(),
            tools: section.tools.clone(),
            frame: frame.frame,
            curves: frame.curves,
            data: frame.data,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use welllog_model::Value;

    #[test]
    fn one_document_per_frame_sharing_section_values() {
        let mut header = Header::new();
        header.set("name", Value::Text("LF-1".to_string()));
        let section = SectionRecords {
            header,
            ..SectionRecords::default()
        };
        let mut main = RecordSet::new(Vec::new());
        main.objects.insert("MAIN", Vec::new());
        let mut repeat = RecordSet::new(Vec::new());
        repeat.objects.insert("REPEAT", Vec::new());

        let documents = assemble(
            &section,
            vec![
                FrameOutput {
                    frame: main,
                    ..FrameOutput::default()
                },
                FrameOutput {
                    frame: repeat,
                    ..FrameOutput::default()
                },
            ],
        );
        assert_eq!(documents.len(), 2);
        assert_eq!(documents[0].header, documents[1].header);
        assert_eq!(documents[0].frame_name(), Some("MAIN"));
        assert_eq!(documents[1].frame_name(), Some("REPEAT"));
        assert!(assemble(&section, Vec::new()).is_empty());
    }
}
