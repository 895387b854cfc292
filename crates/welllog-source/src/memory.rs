//! In-memory source object graphs.
//!
//! A [`MemorySource`] is a decoded snapshot of one source file: an ordered
//! list of logical sections, each a [`MemoryGraph`]. Format parsers (or
//! tests) build it directly or deserialize it from JSON. The source is an
//! ordinary value owned by the caller; several can be loaded and scanned at
//! the same time.
//!
//! # Snapshot layout
//!
//! ```json
//! {
//!   "format": "DLIS",
//!   "sections": [{
//!     "id": "LF-1",
//!     "origins": [{"name": "DEFINING", "attributes": {"well_name": "A-1"}}],
//!     "parameters": [{
//!       "name": "BHT",
//!       "attributes": {"values": [85], "long_name": "Bottom hole temperature"},
//!       "units": {"VALUES": "degC"}
//!     }],
//!     "frames": [{
//!       "name": "MAIN",
//!       "attributes": {"channels": [{"$ref": "DEPT"}]},
//!       "channels": [{"name": "DEPT", "samples": [1000.0, 1000.5]}]
//!     }]
//!   }]
//! }
//! ```

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use welllog_model::{OrderedMap, WellLogFormat};

use crate::error::{AttributeError, Result, SampleError, SourceError};
use crate::graph::{
    EntityKind, RelationshipResolver, SourceChannel, SourceEntity, SourceFrame,
    SourceObjectGraph, UnitLookup,
};
use crate::native::NativeValue;
use crate::samples::Samples;
use crate::table::AttributeTable;

const ORIGIN_ATTRIBUTES: &[&str] = &[
    "file_id",
    "file_set_name",
    "file_set_number",
    "file_number",
    "file_type",
    "product",
    "version",
    "programs",
    "creation_time",
    "order_number",
    "descent_number",
    "run_number",
    "well_id",
    "well_name",
    "field_name",
    "producer_code",
    "producer_name",
    "company",
    "namespace_name",
    "namespace_version",
];

const PARAMETER_ATTRIBUTES: &[&str] = &["name", "long_name", "dimension", "axis", "zones", "values"];

const EQUIPMENT_ATTRIBUTES: &[&str] = &[
    "name",
    "trademark_name",
    "status",
    "generic_type",
    "serial_number",
    "location",
    "height",
    "length",
    "diameter_min",
    "diameter_max",
    "volume",
    "weight",
    "hole_size",
    "pressure",
    "temperature",
    "vertical_depth",
    "radial_drift",
    "angular_drift",
];

const ZONE_ATTRIBUTES: &[&str] = &["name", "description", "domain", "maximum", "minimum"];

const TOOL_ATTRIBUTES: &[&str] = &[
    "name",
    "description",
    "trademark_name",
    "generic_name",
    "parts",
    "status",
    "channels",
    "parameters",
];

const FRAME_ATTRIBUTES: &[&str] = &[
    "name",
    "description",
    "channels",
    "index_type",
    "direction",
    "spacing",
    "encrypted",
    "index_min",
    "index_max",
];

const CHANNEL_ATTRIBUTES: &[&str] = &[
    "name",
    "long_name",
    "reprc",
    "units",
    "properties",
    "dimension",
    "axis",
    "element_limit",
    "source",
    "frame",
];

/// A native entity held as a property bag.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MemoryEntity {
    #[serde(default)]
    pub name: Option<String>,
    /// Native attributes in source order.
    #[serde(default)]
    pub attributes: OrderedMap<NativeValue>,
    /// Units keyed by upper-cased attribute name.
    #[serde(default)]
    pub units: BTreeMap<String, String>,
    /// Attributes whose native read fails.
    #[serde(default)]
    pub unreadable: Vec<String>,
}

impl MemoryEntity {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// An entity without a name.
    pub fn unnamed() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, attribute: impl Into<String>, value: impl Into<NativeValue>) -> Self {
        self.attributes.insert(attribute, value.into());
        self
    }

    #[must_use]
    pub fn with_unit(mut self, attribute: &str, unit: impl Into<String>) -> Self {
        self.units.insert(attribute.to_uppercase(), unit.into());
        self
    }

    #[must_use]
    pub fn with_unreadable(mut self, attribute: impl Into<String>) -> Self {
        self.unreadable.push(attribute.into());
        self
    }

    /// Reads a bag attribute; absent attributes read as null.
    ///
    /// # Errors
    ///
    /// Returns [`AttributeError::Unreadable`] for attributes listed in
    /// `unreadable`.
    pub fn read(&self, attribute: &str) -> std::result::Result<NativeValue, AttributeError> {
        if self.unreadable.iter().any(|name| name == attribute) {
            return Err(AttributeError::Unreadable {
                attribute: attribute.to_string(),
                reason: "native record could not be decoded".to_string(),
            });
        }
        Ok(self.attributes.get(attribute).cloned().unwrap_or_default())
    }
}

impl AsRef<MemoryEntity> for MemoryEntity {
    fn as_ref(&self) -> &MemoryEntity {
        self
    }
}

impl UnitLookup for MemoryEntity {
    fn unit(&self, attribute_upper: &str) -> Option<String> {
        if let Some(unit) = self.units.get(attribute_upper) {
            return Some(unit.clone());
        }
        self.units
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(attribute_upper))
            .map(|(_, unit)| unit.clone())
    }
}

impl SourceEntity for MemoryEntity {
    fn label(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

/// A channel with its decoded samples, or the reason they are missing.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MemoryChannel {
    #[serde(flatten)]
    pub entity: MemoryEntity,
    #[serde(default)]
    pub samples: Option<Samples>,
    #[serde(default)]
    pub sample_error: Option<String>,
}

impl MemoryChannel {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            entity: MemoryEntity::new(name),
            ..Self::default()
        }
    }

    pub fn unnamed() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, attribute: impl Into<String>, value: impl Into<NativeValue>) -> Self {
        self.entity = self.entity.with(attribute, value);
        self
    }

    #[must_use]
    pub fn with_samples(mut self, samples: Samples) -> Self {
        self.samples = Some(samples);
        self
    }

    #[must_use]
    pub fn with_sample_error(mut self, reason: impl Into<String>) -> Self {
        self.sample_error = Some(reason.into());
        self
    }
}

impl AsRef<MemoryEntity> for MemoryChannel {
    fn as_ref(&self) -> &MemoryEntity {
        &self.entity
    }
}

impl UnitLookup for MemoryChannel {
    fn unit(&self, attribute_upper: &str) -> Option<String> {
        self.entity.unit(attribute_upper)
    }
}

impl SourceEntity for MemoryChannel {
    fn label(&self) -> Option<&str> {
        self.entity.label()
    }
}

impl SourceChannel for MemoryChannel {
    fn samples(&self) -> std::result::Result<Samples, SampleError> {
        let channel = || self.entity.name.clone().unwrap_or_default();
        if let Some(reason) = &self.sample_error {
            return Err(SampleError::Unavailable {
                channel: channel(),
                reason: reason.clone(),
            });
        }
        self.samples
            .clone()
            .ok_or_else(|| SampleError::Missing { channel: channel() })
    }
}

/// A frame and its channels.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MemoryFrame {
    #[serde(flatten)]
    pub entity: MemoryEntity,
    #[serde(default)]
    pub channels: Vec<MemoryChannel>,
}

impl MemoryFrame {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            entity: MemoryEntity::new(name),
            channels: Vec::new(),
        }
    }

    #[must_use]
    pub fn with(mut self, attribute: impl Into<String>, value: impl Into<NativeValue>) -> Self {
        self.entity = self.entity.with(attribute, value);
        self
    }

    #[must_use]
    pub fn with_unit(mut self, attribute: &str, unit: impl Into<String>) -> Self {
        self.entity = self.entity.with_unit(attribute, unit);
        self
    }

    #[must_use]
    pub fn with_channel(mut self, channel: MemoryChannel) -> Self {
        self.channels.push(channel);
        self
    }
}

impl AsRef<MemoryEntity> for MemoryFrame {
    fn as_ref(&self) -> &MemoryEntity {
        &self.entity
    }
}

impl UnitLookup for MemoryFrame {
    fn unit(&self, attribute_upper: &str) -> Option<String> {
        self.entity.unit(attribute_upper)
    }
}

impl SourceEntity for MemoryFrame {
    fn label(&self) -> Option<&str> {
        self.entity.label()
    }
}

impl SourceFrame for MemoryFrame {
    type Channel = MemoryChannel;

    fn channels(&self) -> &[MemoryChannel] {
        &self.channels
    }
}

/// Attribute tables of one [`MemoryGraph`], built on first use.
#[derive(Debug, Clone)]
struct MemoryTables {
    origin: AttributeTable<MemoryEntity>,
    parameter: AttributeTable<MemoryEntity>,
    equipment: AttributeTable<MemoryEntity>,
    zone: AttributeTable<MemoryEntity>,
    tool: AttributeTable<MemoryEntity>,
    frame: AttributeTable<MemoryFrame>,
    channel: AttributeTable<MemoryChannel>,
    empty: AttributeTable<MemoryEntity>,
}

impl MemoryTables {
    fn build(graph: &MemoryGraph) -> Self {
        Self {
            origin: bag_table(ORIGIN_ATTRIBUTES, &graph.origins),
            parameter: bag_table(PARAMETER_ATTRIBUTES, &graph.parameters),
            equipment: bag_table(EQUIPMENT_ATTRIBUTES, &graph.equipments),
            zone: bag_table(ZONE_ATTRIBUTES, &graph.zones),
            tool: bag_table(TOOL_ATTRIBUTES, &graph.tools),
            frame: bag_table(FRAME_ATTRIBUTES, &graph.frames),
            channel: bag_table(
                CHANNEL_ATTRIBUTES,
                graph.frames.iter().flat_map(|frame| frame.channels.iter()),
            ),
            empty: AttributeTable::default(),
        }
    }
}

/// Builds a table over the known attributes of a kind plus any extra
/// attribute the snapshot carries, in first-seen order.
fn bag_table<'a, E>(known: &[&str], entities: impl IntoIterator<Item = &'a E>) -> AttributeTable<E>
where
    E: AsRef<MemoryEntity> + 'static,
{
    let mut keys: Vec<String> = known.iter().map(|key| (*key).to_string()).collect();
    for entity in entities {
        for key in entity.as_ref().attributes.keys() {
            if !keys.iter().any(|existing| existing == key) {
                keys.push(key.to_string());
            }
        }
    }

    let mut builder = AttributeTable::builder();
    for key in keys {
        if key == "name" {
            builder = builder.field(key, |entity: &E| {
                Ok(NativeValue::from(entity.as_ref().name.clone()))
            });
        } else {
            let attribute = key.clone();
            builder = builder.field(key, move |entity: &E| entity.as_ref().read(&attribute));
        }
    }
    builder.build()
}

/// One logical section held in memory.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MemoryGraph {
    pub id: String,
    #[serde(default)]
    pub origins: Vec<MemoryEntity>,
    #[serde(default)]
    pub parameters: Vec<MemoryEntity>,
    #[serde(default)]
    pub equipments: Vec<MemoryEntity>,
    #[serde(default)]
    pub zones: Vec<MemoryEntity>,
    #[serde(default)]
    pub tools: Vec<MemoryEntity>,
    #[serde(default)]
    pub frames: Vec<MemoryFrame>,
    #[serde(skip)]
    tables: OnceLock<MemoryTables>,
}

impl MemoryGraph {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_origin(mut self, origin: MemoryEntity) -> Self {
        self.origins.push(origin);
        self.invalidate()
    }

    #[must_use]
    pub fn with_parameter(mut self, parameter: MemoryEntity) -> Self {
        self.parameters.push(parameter);
        self.invalidate()
    }

    #[must_use]
    pub fn with_equipment(mut self, equipment: MemoryEntity) -> Self {
        self.equipments.push(equipment);
        self.invalidate()
    }

    #[must_use]
    pub fn with_zone(mut self, zone: MemoryEntity) -> Self {
        self.zones.push(zone);
        self.invalidate()
    }

    #[must_use]
    pub fn with_tool(mut self, tool: MemoryEntity) -> Self {
        self.tools.push(tool);
        self.invalidate()
    }

    #[must_use]
    pub fn with_frame(mut self, frame: MemoryFrame) -> Self {
        self.frames.push(frame);
        self.invalidate()
    }

    fn invalidate(mut self) -> Self {
        self.tables = OnceLock::new();
        self
    }

    fn tables(&self) -> &MemoryTables {
        self.tables.get_or_init(|| MemoryTables::build(self))
    }
}

impl RelationshipResolver for MemoryGraph {}

impl SourceObjectGraph for MemoryGraph {
    type Entity = MemoryEntity;
    type Frame = MemoryFrame;

    fn section_id(&self) -> &str {
        &self.id
    }

    fn entities(&self, kind: EntityKind) -> &[MemoryEntity] {
        match kind {
            EntityKind::Origin => &self.origins,
            EntityKind::Parameter => &self.parameters,
            EntityKind::Equipment => &self.equipments,
            EntityKind::Zone => &self.zones,
            EntityKind::Tool => &self.tools,
            EntityKind::Frame | EntityKind::Channel => &[],
        }
    }

    fn frames(&self) -> &[MemoryFrame] {
        &self.frames
    }

    fn entity_table(&self, kind: EntityKind) -> &AttributeTable<MemoryEntity> {
        let tables = self.tables();
        match kind {
            EntityKind::Origin => &tables.origin,
            EntityKind::Parameter => &tables.parameter,
            EntityKind::Equipment => &tables.equipment,
            EntityKind::Zone => &tables.zone,
            EntityKind::Tool => &tables.tool,
            EntityKind::Frame | EntityKind::Channel => &tables.empty,
        }
    }

    fn frame_table(&self) -> &AttributeTable<MemoryFrame> {
        &self.tables().frame
    }

    fn channel_table(&self) -> &AttributeTable<MemoryChannel> {
        &self.tables().channel
    }
}

/// A decoded source file: its logical sections in file order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MemorySource {
    #[serde(default)]
    pub format: Option<WellLogFormat>,
    #[serde(default)]
    pub sections: Vec<MemoryGraph>,
}

impl MemorySource {
    pub fn new(sections: Vec<MemoryGraph>) -> Self {
        Self {
            format: None,
            sections,
        }
    }

    /// Parses a JSON snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Json`] when the text is not a valid snapshot.
    pub fn from_json(text: &str) -> Result<Self> {
        let source: MemorySource = serde_json::from_str(text)?;
        source.warn_on_duplicate_sections();
        Ok(source)
    }

    /// Reads and parses a JSON snapshot file.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Io`] when the file cannot be read and
    /// [`SourceError::Snapshot`] when it is not a valid snapshot.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|error| SourceError::io(path, error))?;
        let source: MemorySource =
            serde_json::from_str(&text).map_err(|source| SourceError::Snapshot {
                path: path.to_path_buf(),
                source,
            })?;
        debug!(
            path = %path.display(),
            section_count = source.sections.len(),
            "snapshot loaded"
        );
        source.warn_on_duplicate_sections();
        Ok(source)
    }

    pub fn sections(&self) -> &[MemoryGraph] {
        &self.sections
    }

    /// Looks up a logical section by identifier.
    pub fn section(&self, id: &str) -> Option<&MemoryGraph> {
        self.sections.iter().find(|section| section.id == id)
    }

    pub fn section_ids(&self) -> impl Iterator<Item = &str> {
        self.sections.iter().map(|section| section.id.as_str())
    }

    fn warn_on_duplicate_sections(&self) {
        let mut seen = std::collections::BTreeSet::new();
        for id in self.section_ids() {
            if !seen.insert(id) {
                warn!(section_id = %id, "duplicate logical section identifier in snapshot");
            }
        }
    }
}
