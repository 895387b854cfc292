//! Per-kind extraction schemas.
//!
//! An [`EntitySchema`] declares which native attributes become which output
//! columns, which columns carry a physical unit and which hold references
//! to other entities. The built-in schemas follow the DLIS object model.

use welllog_model::NAME_COLUMN;
use welllog_source::EntityKind;

/// One native attribute and the output column it fills.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeMapping {
    pub native: String,
    pub column: String,
}

/// Extraction declarations for one entity kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntitySchema {
    pub kind: EntityKind,
    /// Native attribute to output column, in output order.
    pub attributes: Vec<AttributeMapping>,
    /// Output columns whose unit is appended as `<column>_unit`.
    pub unit_columns: Vec<String>,
    /// Output columns holding references, resolved to entity names.
    pub relation_columns: Vec<String>,
}

impl EntitySchema {
    /// A schema reading each attribute into a column of the same name.
    pub fn new(kind: EntityKind, attributes: &[&str]) -> Self {
        Self {
            kind,
            attributes: attributes
                .iter()
                .map(|attribute| AttributeMapping {
                    native: (*attribute).to_string(),
                    column: (*attribute).to_string(),
                })
                .collect(),
            unit_columns: Vec::new(),
            relation_columns: Vec::new(),
        }
    }

    /// Writes the native attribute `native` to column `column` instead.
    #[must_use]
    pub fn rename(mut self, native: &str, column: &str) -> Self {
        for mapping in &mut self.attributes {
            if mapping.native == native {
                mapping.column = column.to_string();
            }
        }
        self
    }

    #[must_use]
    pub fn with_units(mut self, columns: &[&str]) -> Self {
        self.unit_columns = columns.iter().map(|column| (*column).to_string()).collect();
        self
    }

    #[must_use]
    pub fn with_relations(mut self, columns: &[&str]) -> Self {
        self.relation_columns = columns.iter().map(|column| (*column).to_string()).collect();
        self
    }

    /// Mapped output columns, without the derived unit columns.
    pub fn base_columns(&self) -> impl Iterator<Item = &str> {
        self.attributes.iter().map(|mapping| mapping.column.as_str())
    }

    pub fn column_index(&self, column: &str) -> Option<usize> {
        self.base_columns().position(|existing| existing == column)
    }

    /// Every output column in staging order: mapped columns, then one
    /// `<column>_unit` per unit column.
    pub fn columns(&self) -> Vec<String> {
        self.base_columns()
            .map(str::to_string)
            .chain(self.unit_columns.iter().map(|column| unit_column(column)))
            .collect()
    }

    pub fn has_name(&self) -> bool {
        self.column_index(NAME_COLUMN).is_some()
    }

    /// The built-in schema of a metadata, frame or channel kind.
    ///
    /// Origins are exploded into `name`/`value` rows rather than mapped
    /// through a schema, so they have none.
    pub fn for_kind(kind: EntityKind) -> Option<Self> {
        match kind {
            EntityKind::Origin => None,
            EntityKind::Parameter => Some(parameter_schema()),
            EntityKind::Equipment => Some(equipment_schema()),
            EntityKind::Zone => Some(zone_schema()),
            EntityKind::Tool => Some(tool_schema()),
            EntityKind::Frame => Some(frame_schema()),
            EntityKind::Channel => Some(channel_schema()),
        }
    }
}

/// Name of the derived unit column of `column`.
pub fn unit_column(column: &str) -> String {
    format!("{column}_unit")
}

pub fn parameter_schema() -> EntitySchema {
    EntitySchema::new(EntityKind::Parameter, &["name", "values", "long_name"])
        .rename("long_name", "description")
        .with_units(&["values"])
}

pub fn equipment_schema() -> EntitySchema {
    EntitySchema::new(
        EntityKind::Equipment,
        &[
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
        ],
    )
    .with_units(&[
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
    ])
}

pub fn zone_schema() -> EntitySchema {
    EntitySchema::new(EntityKind::Zone, &["name", "domain", "maximum", "minimum"])
        .with_units(&["maximum", "minimum"])
}

pub fn tool_schema() -> EntitySchema {
    EntitySchema::new(
        EntityKind::Tool,
        &[
            "name",
            "description",
            "trademark_name",
            "generic_name",
            "status",
            "parts",
            "channels",
            "parameters",
        ],
    )
    .with_relations(&["parts", "channels", "parameters"])
}

pub fn frame_schema() -> EntitySchema {
    EntitySchema::new(
        EntityKind::Frame,
        &[
            "name",
            "description",
            "channels",
            "index_type",
            "direction",
            "spacing",
            "index_min",
            "index_max",
            "encrypted",
        ],
    )
    .with_units(&["spacing", "index_min", "index_max"])
    .with_relations(&["channels"])
}

pub fn channel_schema() -> EntitySchema {
    EntitySchema::new(
        EntityKind::Channel,
        &[
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
        ],
    )
    .rename("long_name", "description")
    .with_relations(&["frame", "source", "axis"])
}
