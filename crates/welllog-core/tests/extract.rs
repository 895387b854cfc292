//! Property and behavior tests for entity extraction.

use proptest::prelude::*;
use welllog_core::schema::{
    EntitySchema, channel_schema, equipment_schema, parameter_schema, tool_schema,
};
use welllog_core::{EntityExtractor, ExtractError, VALUE_COLUMN};
use welllog_model::{ExtractionOptions, NullRowMatch, RecordSet, Value};
use welllog_source::{EntityKind, MemoryEntity, MemoryGraph, NativeValue, SourceObjectGraph};

const NAMES: [&str; 4] = ["ALPHA", "BETA", "GAMMA", "DELTA"];

fn parameters(graph: &MemoryGraph, options: &ExtractionOptions) -> RecordSet {
    EntityExtractor::new(graph.section_id(), options).process(
        graph.entities(EntityKind::Parameter),
        graph.entity_table(EntityKind::Parameter),
        graph,
        &parameter_schema(),
    )
}

fn graph_of(entries: &[(usize, Vec<i64>)]) -> MemoryGraph {
    entries
        .iter()
        .fold(MemoryGraph::new("LF-1"), |graph, (name, values)| {
            graph.with_parameter(MemoryEntity::new(NAMES[*name]).with("values", values.clone()))
        })
}

fn expected_values(values: &[i64]) -> Value {
    match values {
        [single] => Value::Number(*single as f64),
        many => Value::List(many.iter().map(|value| Value::Number(*value as f64)).collect()),
    }
}

proptest! {
    #[test]
    fn objects_are_first_occurrences_in_order(
        entries in prop::collection::vec((0usize..4, prop::collection::vec(0i64..5, 0..4)), 1..12)
    ) {
        let set = parameters(&graph_of(&entries), &ExtractionOptions::default());

        let mut expected: Vec<(&str, &Vec<i64>)> = Vec::new();
        for (name, values) in &entries {
            if !expected.iter().any(|(seen, _)| *seen == NAMES[*name]) {
                expected.push((NAMES[*name], values));
            }
        }
        let names: Vec<&str> = set.names().collect();
        let expected_names: Vec<&str> = expected.iter().map(|(name, _)| *name).collect();
        prop_assert_eq!(names, expected_names);
        for (name, values) in expected {
            let typed = expected_values(values);
            prop_assert_eq!(set.value(name, "values"), Some(&typed));
        }
        prop_assert!(!set.attributes.iter().any(|a| a == "name" || a == "logical-file-id"));
    }

    #[test]
    fn extraction_is_idempotent(
        entries in prop::collection::vec((0usize..4, prop::collection::vec(-3i64..3, 0..3)), 0..10)
    ) {
        let graph = graph_of(&entries);
        let options = ExtractionOptions::default().with_null_values(["-1"]);
        let first = serde_json::to_string(&parameters(&graph, &options)).expect("serialize");
        let second = serde_json::to_string(&parameters(&graph, &options)).expect("serialize");
        prop_assert_eq!(first, second);
    }
}

#[test]
fn list_values_type_element_wise() {
    let graph = graph_of(&[(0, vec![7]), (1, vec![1, 2, 3])]);
    let set = parameters(&graph, &ExtractionOptions::default());
    assert_eq!(set.value("ALPHA", "values"), Some(&Value::Number(7.0)));
    assert_eq!(
        set.value("BETA", "values"),
        Some(&Value::List(vec![
            Value::Number(1.0),
            Value::Number(2.0),
            Value::Number(3.0)
        ]))
    );
}

#[test]
fn duplicate_names_keep_the_first_even_with_different_lists() {
    let graph = graph_of(&[(0, vec![1, 2, 3]), (0, vec![4, 5])]);
    let set = parameters(&graph, &ExtractionOptions::default());
    assert_eq!(set.len(), 1);
    assert_eq!(
        set.value("ALPHA", "values"),
        Some(&expected_values(&[1, 2, 3]))
    );
}

#[test]
fn null_rows_are_dropped() {
    let graph = MemoryGraph::new("LF-1")
        .with_parameter(
            MemoryEntity::new("EMPTY")
                .with("values", -999.25)
                .with("long_name", "-999.25"),
        )
        .with_parameter(
            MemoryEntity::new("HALF")
                .with("values", -999.25)
                .with("long_name", "Half null"),
        );

    let options = ExtractionOptions::default().with_null_values(["-999.25"]);
    let names: Vec<String> = parameters(&graph, &options)
        .names()
        .map(str::to_string)
        .collect();
    // The unit column is null for both rows, so neither is all-null.
    assert_eq!(names, vec!["EMPTY", "HALF"]);

    let options = options.with_null_row_match(NullRowMatch::AnyCell);
    assert!(parameters(&graph, &options).is_empty());
}

#[test]
fn empty_input_is_an_empty_record_set() {
    let graph = MemoryGraph::new("LF-1");
    let set = parameters(&graph, &ExtractionOptions::default());
    assert_eq!(set, RecordSet::empty());
}

#[test]
fn equipment_units_are_appended_in_order() {
    let graph = MemoryGraph::new("LF-1").with_equipment(
        MemoryEntity::new("CASING")
            .with("length", 12.5)
            .with("weight", vec![NativeValue::Float(40.0)])
            .with_unit("length", "m")
            .with_unit("weight", "kg"),
    );
    let options = ExtractionOptions::default();
    let set = EntityExtractor::new("LF-1", &options).process(
        graph.entities(EntityKind::Equipment),
        graph.entity_table(EntityKind::Equipment),
        &graph,
        &equipment_schema(),
    );
    let unit_columns: Vec<&str> = set
        .attributes
        .iter()
        .map(String::as_str)
        .filter(|column| column.ends_with("_unit"))
        .collect();
    assert_eq!(unit_columns.len(), 12);
    assert_eq!(unit_columns[0], "height_unit");
    assert_eq!(set.value("CASING", "length_unit"), Some(&Value::Text("m".to_string())));
    assert_eq!(set.value("CASING", "weight"), Some(&Value::Number(40.0)));
    assert_eq!(set.value("CASING", "height_unit"), Some(&Value::Null));
}

#[test]
fn origins_explode_into_value_rows() {
    let graph = MemoryGraph::new("LF-1")
        .with_origin(
            MemoryEntity::new("O1")
                .with("well_name", "A-1")
                .with("run_number", "3")
                .with("programs", Vec::<NativeValue>::new()),
        )
        .with_origin(MemoryEntity::new("O2").with("well_name", "B-2"));
    let options = ExtractionOptions::default();
    let set = EntityExtractor::new("LF-1", &options).origins(
        graph.entities(EntityKind::Origin),
        graph.entity_table(EntityKind::Origin),
    );
    assert_eq!(set.attributes, vec![VALUE_COLUMN]);
    assert_eq!(set.value("well_name", VALUE_COLUMN), Some(&Value::Text("A-1".to_string())));
    assert_eq!(set.value("run_number", VALUE_COLUMN), Some(&Value::Number(3.0)));
    assert!(set.get("programs").is_none());
    assert!(set.get("file_id").is_none());
}

#[test]
fn channel_axis_references_resolve_to_names() {
    let graph = MemoryGraph::new("LF-1").with_frame(
        welllog_source::MemoryFrame::new("MAIN").with_channel(
            welllog_source::MemoryChannel::new("WAVE")
                .with("axis", vec![NativeValue::reference("TIME")])
                .with("long_name", "Waveform"),
        ),
    );
    let options = ExtractionOptions::default();
    let frame = &graph.frames()[0];
    let set = EntityExtractor::new("LF-1", &options).process(
        &frame.channels,
        graph.channel_table(),
        &graph,
        &channel_schema(),
    );
    assert_eq!(
        set.value("WAVE", "axis"),
        Some(&Value::List(vec![Value::Text("TIME".to_string())]))
    );
    assert_eq!(
        set.value("WAVE", "description"),
        Some(&Value::Text("Waveform".to_string()))
    );
}

#[test]
fn numeric_looking_relation_names_are_typed() {
    let graph = MemoryGraph::new("LF-1").with_tool(
        MemoryEntity::new("SONIC")
            .with(
                "channels",
                vec![NativeValue::reference("1"), NativeValue::reference("2")],
            )
            .with("parts", NativeValue::reference("DT")),
    );
    let options = ExtractionOptions::default();
    let set = EntityExtractor::new("LF-1", &options).process(
        graph.entities(EntityKind::Tool),
        graph.entity_table(EntityKind::Tool),
        &graph,
        &tool_schema(),
    );
    assert_eq!(
        set.value("SONIC", "channels"),
        Some(&Value::List(vec![Value::Number(1.0), Value::Number(2.0)]))
    );
    assert_eq!(
        set.value("SONIC", "parts"),
        Some(&Value::List(vec![Value::Text("DT".to_string())]))
    );
}

#[test]
fn broken_schema_empties_only_its_own_kind() {
    let graph = MemoryGraph::new("LF-1")
        .with_parameter(
            MemoryEntity::new("BHT")
                .with("values", 85_i64)
                .with("long_name", "Bottom hole temperature"),
        )
        .with_equipment(MemoryEntity::new("CASING").with("length", 12.5));
    let options = ExtractionOptions::default();
    let extractor = EntityExtractor::new("LF-1", &options);
    let broken = EntitySchema::new(EntityKind::Parameter, &["name", "values", "long_name"])
        .rename("long_name", "values");

    assert!(matches!(
        extractor.try_process(
            graph.entities(EntityKind::Parameter),
            graph.entity_table(EntityKind::Parameter),
            &graph,
            &broken,
        ),
        Err(ExtractError::DuplicateColumn { .. })
    ));

    let parameters = extractor.process(
        graph.entities(EntityKind::Parameter),
        graph.entity_table(EntityKind::Parameter),
        &graph,
        &broken,
    );
    assert_eq!(parameters, RecordSet::empty());

    let equipments = extractor.process(
        graph.entities(EntityKind::Equipment),
        graph.entity_table(EntityKind::Equipment),
        &graph,
        &equipment_schema(),
    );
    assert_eq!(equipments.len(), 1);
    assert_eq!(equipments.value("CASING", "length"), Some(&Value::Number(12.5)));
}
