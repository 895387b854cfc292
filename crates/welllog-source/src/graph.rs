//! The source object graph consumed by the normalization engine.
//!
//! A format adapter exposes one logical section as a [`SourceObjectGraph`]:
//! ordered entity collections, attribute tables describing how to read them,
//! and the two capabilities the engine needs beyond plain attributes: unit
//! lookup and relationship resolution.

use std::fmt;

use crate::error::{RelationshipError, SampleError};
use crate::native::NativeValue;
use crate::samples::Samples;
use crate::table::AttributeTable;

/// Kinds of native entities in a logical section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EntityKind {
    Origin,
    Parameter,
    Equipment,
    Zone,
    Tool,
    Frame,
    Channel,
}

impl EntityKind {
    /// Kinds served by [`SourceObjectGraph::entities`].
    pub const METADATA: [EntityKind; 5] = [
        EntityKind::Origin,
        EntityKind::Parameter,
        EntityKind::Equipment,
        EntityKind::Zone,
        EntityKind::Tool,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Origin => "origin",
            EntityKind::Parameter => "parameter",
            EntityKind::Equipment => "equipment",
            EntityKind::Zone => "zone",
            EntityKind::Tool => "tool",
            EntityKind::Frame => "frame",
            EntityKind::Channel => "channel",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Physical-unit annotations of an entity's attributes.
pub trait UnitLookup {
    /// Unit of the attribute, keyed by its upper-cased name.
    fn unit(&self, attribute_upper: &str) -> Option<String>;
}

/// Turns a relationship cell into the names of the referenced entities.
pub trait RelationshipResolver {
    /// # Errors
    ///
    /// Returns [`RelationshipError::UnexpectedShape`] when the cell is
    /// neither absent, a reference, nor a list of references.
    fn resolve(&self, cell: &NativeValue) -> Result<Vec<String>, RelationshipError> {
        resolve_references(cell)
    }
}

/// Shared relationship resolution over [`NativeValue`] cells.
///
/// Absent cells resolve to no names, a reference to its name, and a list of
/// references to their names in order.
pub fn resolve_references(cell: &NativeValue) -> Result<Vec<String>, RelationshipError> {
    match cell {
        NativeValue::Null => Ok(Vec::new()),
        NativeValue::Reference(target) => Ok(vec![target.name.clone()]),
        NativeValue::List(items) => items
            .iter()
            .map(|item| match item {
                NativeValue::Reference(target) => Ok(target.name.clone()),
                other => Err(RelationshipError::UnexpectedShape {
                    found: other.shape(),
                }),
            })
            .collect(),
        other => Err(RelationshipError::UnexpectedShape {
            found: other.shape(),
        }),
    }
}

/// A native entity of any kind.
pub trait SourceEntity: UnitLookup + Send + Sync {
    /// Display label for log context; usually the entity name.
    fn label(&self) -> Option<&str>;
}

/// A channel: a named measurement series.
pub trait SourceChannel: SourceEntity {
    /// # Errors
    ///
    /// Returns a [`SampleError`] when the bulk samples cannot be retrieved.
    fn samples(&self) -> Result<Samples, SampleError>;
}

/// A frame: an index plus the channels sampled against it.
pub trait SourceFrame: SourceEntity {
    type Channel: SourceChannel;

    fn channels(&self) -> &[Self::Channel];
}

/// One logical section of a source file, as produced by a format parser.
///
/// Implementations are read-only; the engine never mutates them.
pub trait SourceObjectGraph: RelationshipResolver + Send + Sync {
    type Entity: SourceEntity;
    type Frame: SourceFrame;

    /// Identifier of the logical section.
    fn section_id(&self) -> &str;

    /// Entities of one metadata kind, in source order.
    ///
    /// Frames and channels have their own accessors; adapters return an
    /// empty slice for those kinds.
    fn entities(&self, kind: EntityKind) -> &[Self::Entity];

    fn frames(&self) -> &[Self::Frame];

    /// How to read attributes of metadata entities of `kind`.
    fn entity_table(&self, kind: EntityKind) -> &AttributeTable<Self::Entity>;

    fn frame_table(&self) -> &AttributeTable<Self::Frame>;

    fn channel_table(&self) -> &AttributeTable<<Self::Frame as SourceFrame>::Channel>;
}
