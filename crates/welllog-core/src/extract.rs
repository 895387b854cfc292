//! Entity extraction into normalized record sets.
//!
//! [`EntityExtractor`] reads every declared attribute of a native entity
//! collection through the adapter's [`AttributeTable`], derives unit and
//! relationship columns, stages the rows through polars for null-row
//! filtering and name deduplication, and types the survivors.
//!
//! Failures are contained: an unreadable attribute becomes null, an odd
//! relationship cell becomes an empty list, and anything worse empties the
//! record set of that entity kind only.

use tracing::{debug, error, warn};
use welllog_model::{
    ExtractionOptions, LOGICAL_FILE_ID_COLUMN, NAME_COLUMN, RecordSet, is_identity_column,
};
use welllog_source::{AttributeTable, EntityKind, NativeValue, RelationshipResolver, SourceEntity};

use crate::error::ExtractError;
use crate::schema::EntitySchema;
use crate::staging::{cell_key, stage_rows};
use crate::typing::parse_value;

/// Output column holding an origin attribute's value.
pub const VALUE_COLUMN: &str = "value";

/// Extracts record sets for one logical section.
#[derive(Debug, Clone, Copy)]
pub struct EntityExtractor<'a> {
    section_id: &'a str,
    options: &'a ExtractionOptions,
}

impl<'a> EntityExtractor<'a> {
    pub fn new(section_id: &'a str, options: &'a ExtractionOptions) -> Self {
        Self {
            section_id,
            options,
        }
    }

    pub fn section_id(&self) -> &str {
        self.section_id
    }

    /// Builds the record set of `entities` as declared by `schema`.
    ///
    /// Never fails: a catastrophic error is logged and yields an empty
    /// record set.
    pub fn process<E, R>(
        &self,
        entities: &[E],
        table: &AttributeTable<E>,
        resolver: &R,
        schema: &EntitySchema,
    ) -> RecordSet
    where
        E: SourceEntity,
        R: RelationshipResolver + ?Sized,
    {
        self.try_process(entities, table, resolver, schema)
            .unwrap_or_else(|err| self.fail(schema.kind, &err))
    }

    /// Fallible form of [`EntityExtractor::process`].
    ///
    /// # Errors
    ///
    /// Returns an [`ExtractError`] when staging fails.
    pub fn try_process<E, R>(
        &self,
        entities: &[E],
        table: &AttributeTable<E>,
        resolver: &R,
        schema: &EntitySchema,
    ) -> Result<RecordSet, ExtractError>
    where
        E: SourceEntity,
        R: RelationshipResolver + ?Sized,
    {
        if entities.is_empty() {
            debug!(section_id = %self.section_id, kind = %schema.kind, "no entities to extract");
            return Ok(RecordSet::empty());
        }
        let mut columns = schema.columns();
        columns.push(LOGICAL_FILE_ID_COLUMN.to_string());

        let rows = entities
            .iter()
            .map(|entity| self.entity_row(entity, table, resolver, schema))
            .collect();
        let rows = stage_rows(&columns, rows, self.options)?;
        let set = record_set(&columns, rows);
        debug!(
            section_id = %self.section_id,
            kind = %schema.kind,
            entities = entities.len(),
            objects = set.len(),
            "extracted record set"
        );
        Ok(set)
    }

    /// Builds the origin record set: one `value` per origin attribute,
    /// first origin wins.
    pub fn origins<E: SourceEntity>(&self, origins: &[E], table: &AttributeTable<E>) -> RecordSet {
        self.try_origins(origins, table)
            .unwrap_or_else(|err| self.fail(EntityKind::Origin, &err))
    }

    /// Fallible form of [`EntityExtractor::origins`].
    ///
    /// # Errors
    ///
    /// Returns an [`ExtractError`] when staging fails.
    pub fn try_origins<E: SourceEntity>(
        &self,
        origins: &[E],
        table: &AttributeTable<E>,
    ) -> Result<RecordSet, ExtractError> {
        if origins.is_empty() {
            debug!(section_id = %self.section_id, kind = %EntityKind::Origin, "no entities to extract");
            return Ok(RecordSet::empty());
        }
        let columns = vec![
            NAME_COLUMN.to_string(),
            VALUE_COLUMN.to_string(),
            LOGICAL_FILE_ID_COLUMN.to_string(),
        ];

        let mut rows = Vec::new();
        for origin in origins {
            for attribute in table.attributes() {
                let cell = self.read(origin, table, EntityKind::Origin, attribute);
                match &cell {
                    NativeValue::Null => continue,
                    NativeValue::List(items) if items.is_empty() => {
                        warn!(
                            section_id = %self.section_id,
                            origin = origin.label().unwrap_or_default(),
                            attribute,
                            "origin attribute is an empty list; skipping"
                        );
                        continue;
                    }
                    _ => {}
                }
                rows.push(vec![
                    NativeValue::from(attribute),
                    cell,
                    NativeValue::from(self.section_id),
                ]);
            }
        }
        let rows = stage_rows(&columns, rows, self.options)?;
        Ok(record_set(&columns, rows))
    }

    fn fail(&self, kind: EntityKind, err: &ExtractError) -> RecordSet {
        error!(
            section_id = %self.section_id,
            kind = %kind,
            error = %err,
            "entity extraction failed; emitting an empty record set"
        );
        RecordSet::empty()
    }

    fn read<E: SourceEntity>(
        &self,
        entity: &E,
        table: &AttributeTable<E>,
        kind: EntityKind,
        attribute: &str,
    ) -> NativeValue {
        table.read(entity, attribute).unwrap_or_else(|err| {
            warn!(
                section_id = %self.section_id,
                kind = %kind,
                entity = entity.label().unwrap_or_default(),
                attribute,
                error = %err,
                "attribute read failed; using null"
            );
            NativeValue::Null
        })
    }

    fn entity_row<E, R>(
        &self,
        entity: &E,
        table: &AttributeTable<E>,
        resolver: &R,
        schema: &EntitySchema,
    ) -> Vec<NativeValue>
    where
        E: SourceEntity,
        R: RelationshipResolver + ?Sized,
    {
        let mut row: Vec<NativeValue> = schema
            .attributes
            .iter()
            .map(|mapping| self.read(entity, table, schema.kind, &mapping.native))
            .collect();

        for column in &schema.relation_columns {
            let Some(index) = schema.column_index(column) else {
                continue;
            };
            let cell = std::mem::take(&mut row[index]);
            row[index] = match resolver.resolve(&cell) {
                Ok(names) => NativeValue::List(names.into_iter().map(NativeValue::reference).collect()),
                Err(err) => {
                    warn!(
                        section_id = %self.section_id,
                        kind = %schema.kind,
                        entity = entity.label().unwrap_or_default(),
                        column = %column,
                        error = %err,
                        "relationship could not be resolved; using an empty list"
                    );
                    NativeValue::List(Vec::new())
                }
            };
        }

        for column in &schema.unit_columns {
            if let Some(index) = schema.column_index(column) {
                collapse_single(&mut row[index]);
            }
            row.push(NativeValue::from(entity.unit(&column.to_uppercase())));
        }

        row.push(NativeValue::from(self.section_id));
        row
    }
}

/// Replaces a single-element list with its element.
fn collapse_single(cell: &mut NativeValue) {
    if let NativeValue::List(items) = cell
        && items.len() == 1
        && let Some(item) = items.pop()
    {
        *cell = item;
    }
}

fn record_set(columns: &[String], rows: Vec<Vec<NativeValue>>) -> RecordSet {
    let name_index = columns.iter().position(|column| column == NAME_COLUMN);
    let kept: Vec<usize> = columns
        .iter()
        .enumerate()
        .filter(|(_, column)| !is_identity_column(column))
        .map(|(index, _)| index)
        .collect();

    let mut set = RecordSet::new(kept.iter().map(|index| columns[*index].clone()).collect());
    for row in rows {
        let name = name_index
            .and_then(|index| cell_key(&row[index]))
            .unwrap_or_default();
        let values = kept.iter().map(|index| parse_value(&row[*index])).collect();
        set.objects.insert(name, values);
    }
    set
}

#[cfg(test)]
mod tests {
    use super::*;
    use welllog_model::Value;
    use welllog_source::{MemoryEntity, MemoryGraph, SourceObjectGraph};

    use crate::schema::{parameter_schema, tool_schema};

    #[test]
    fn single_value_lists_collapse() {
        let mut cell = NativeValue::from(vec![7_i64]);
        collapse_single(&mut cell);
        assert_eq!(cell, NativeValue::Int(7));

        let mut cell = NativeValue::from(vec![1_i64, 2]);
        collapse_single(&mut cell);
        assert_eq!(cell, NativeValue::from(vec![1_i64, 2]));
    }

    #[test]
    fn parameter_values_and_units() {
        let graph = MemoryGraph::new("LF-1")
            .with_parameter(
                MemoryEntity::new("BHT")
                    .with("values", vec![85_i64])
                    .with("long_name", "Bottom hole temperature")
                    .with_unit("values", "degC"),
            )
            .with_parameter(MemoryEntity::new("MODES").with("values", vec![1_i64, 2, 3]));
        let options = ExtractionOptions::default();
        let extractor = EntityExtractor::new(graph.section_id(), &options);
        let set = extractor.process(
            graph.entities(EntityKind::Parameter),
            graph.entity_table(EntityKind::Parameter),
            &graph,
            &parameter_schema(),
        );

        assert_eq!(set.attributes, vec!["values", "description", "values_unit"]);
        assert_eq!(
            set.get("BHT"),
            Some(
                &[
                    Value::Number(85.0),
                    Value::Text("Bottom hole temperature".to_string()),
                    Value::Text("degC".to_string()),
                ][..]
            )
        );
        assert_eq!(
            set.value("MODES", "values"),
            Some(&Value::List(vec![
                Value::Number(1.0),
                Value::Number(2.0),
                Value::Number(3.0)
            ]))
        );
        assert_eq!(set.value("MODES", "values_unit"), Some(&Value::Null));
    }

    #[test]
    fn bad_relationships_become_empty_lists() {
        let graph = MemoryGraph::new("LF-1").with_tool(
            MemoryEntity::new("SONIC")
                .with("channels", "DT")
                .with("parts", vec![NativeValue::reference("TRANSMITTER")]),
        );
        let options = ExtractionOptions::default();
        let extractor = EntityExtractor::new("LF-1", &options);
        let set = extractor.process(
            graph.entities(EntityKind::Tool),
            graph.entity_table(EntityKind::Tool),
            &graph,
            &tool_schema(),
        );
        assert_eq!(set.value("SONIC", "channels"), Some(&Value::List(Vec::new())));
        assert_eq!(
            set.value("SONIC", "parts"),
            Some(&Value::List(vec![Value::Text("TRANSMITTER".to_string())]))
        );
        assert_eq!(set.value("SONIC", "parameters"), Some(&Value::List(Vec::new())));
    }
}
