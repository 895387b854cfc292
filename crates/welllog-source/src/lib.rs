//! Source object graphs for well-log files.
//!
//! Format parsers expose each logical section of a file as a
//! [`SourceObjectGraph`]. The normalization engine in `welllog-core` reads
//! those graphs through [`AttributeTable`]s and the [`UnitLookup`] and
//! [`RelationshipResolver`] capabilities, never through the concrete types.
//!
//! [`MemorySource`] is the bundled adapter: a decoded snapshot held in
//! memory, loadable from JSON.

pub mod error;
pub mod format;
pub mod graph;
pub mod memory;
pub mod native;
pub mod samples;
pub mod table;

pub use error::{AttributeError, RelationshipError, Result, SampleError, SourceError};
pub use format::{SNIFF_LEN, identify_format, identify_path};
pub use graph::{
    EntityKind, RelationshipResolver, SourceChannel, SourceEntity, SourceFrame,
    SourceObjectGraph, UnitLookup, resolve_references,
};
pub use memory::{MemoryChannel, MemoryEntity, MemoryFrame, MemoryGraph, MemorySource};
pub use native::{EntityRef, NativeValue};
pub use samples::Samples;
pub use table::{AttributeTable, AttributeTableBuilder, ReadFn};
