//! Single-pass scan of one logical section.
//!
//! # Flow
//!
//! 1. Origins → header
//! 2. Parameters, equipments, zones, tools, frames → record sets
//! 3. Per frame: channels → record set → sample retrieval → curves + matrix
//! 4. Assembly: one document per frame
//!
//! Every step contains its own failures, so a bad entity kind, frame or
//! channel never takes the rest of the section down with it.

use std::collections::BTreeSet;

use tracing::{error, info, info_span, warn};
use welllog_model::{Document, ExtractionOptions, RecordSet};
use welllog_source::{
    EntityKind, Samples, SourceChannel, SourceEntity, SourceFrame, SourceObjectGraph,
};

use crate::align::align;
use crate::assemble::{FrameOutput, SectionRecords, assemble};
use crate::curves::describe;
use crate::extract::EntityExtractor;
use crate::header::HeaderMapper;
use crate::schema::{
    EntitySchema, channel_schema, equipment_schema, frame_schema, parameter_schema, tool_schema,
    zone_schema,
};

/// Normalizes one logical section into its per-frame documents.
///
/// A section without frames yields no documents.
pub fn scan_section<G: SourceObjectGraph>(graph: &G, options: &ExtractionOptions) -> Vec<Document> {
    let section_id = graph.section_id();
    let span = info_span!("section", section_id = %section_id);
    let _guard = span.enter();

    let extractor = EntityExtractor::new(section_id, options);
    let origins = extractor.origins(
        graph.entities(EntityKind::Origin),
        graph.entity_table(EntityKind::Origin),
    );
    let header = HeaderMapper::new(&options.header_fields).map(&origins, section_id);

    let metadata = |schema: EntitySchema| {
        extractor.process(
            graph.entities(schema.kind),
            graph.entity_table(schema.kind),
            graph,
            &schema,
        )
    };
    let section = SectionRecords {
        header,
        parameters: metadata(parameter_schema()),
        equipments: metadata(equipment_schema()),
        zones: metadata(zone_schema()),
        tools: metadata(tool_schema()),
    };

    let frames = extractor.process(graph.frames(), graph.frame_table(), graph, &frame_schema());
    let outputs: Vec<FrameOutput> = graph
        .frames()
        .iter()
        .map(|frame| scan_frame(graph, &extractor, frame, &frames, options))
        .collect();

    let documents = assemble(&section, outputs);
    info!(
        documents = documents.len(),
        parameters = section.parameters.len(),
        equipments = section.equipments.len(),
        zones = section.zones.len(),
        tools = section.tools.len(),
        "section scanned"
    );
    documents
}

fn scan_frame<G: SourceObjectGraph>(
    graph: &G,
    extractor: &EntityExtractor<'_>,
    frame: &G::Frame,
    frames: &RecordSet,
    options: &ExtractionOptions,
) -> FrameOutput {
    let frame_name = frame.label().map(str::trim).unwrap_or_default();
    let native_channels = frame.channels();

    let mut channels = extractor.process(
        native_channels,
        graph.channel_table(),
        graph,
        &channel_schema(),
    );
    let nameless = native_channels
        .iter()
        .filter(|channel| channel.label().is_none_or(|name| name.trim().is_empty()))
        .count();
    if nameless > 0 {
        warn!(frame = frame_name, channels = nameless, "channels without a name; skipping curves");
    }
    channels.retain_names(|name| !name.is_empty());

    let mut survivors = BTreeSet::new();
    let mut samples: Vec<Samples> = Vec::with_capacity(channels.len());
    for name in channels.names() {
        let native = native_channels
            .iter()
            .find(|channel| channel.label().map(str::trim) == Some(name));
        let Some(native) = native else {
            error!(frame = frame_name, channel = name, "channel record has no native channel; excluding it");
            continue;
        };
        match native.samples() {
            Ok(series) => {
                survivors.insert(name.to_string());
                samples.push(series);
            }
            Err(err) => {
                error!(
                    frame = frame_name,
                    channel = name,
                    error = %err,
                    "channel samples unavailable; excluding channel"
                );
            }
        }
    }
    channels.retain_names(|name| survivors.contains(name));

    FrameOutput {
        frame: frames.subset(frame_name),
        curves: describe(&channels, options),
        data: align(&samples, options.null_value),
    }
}
