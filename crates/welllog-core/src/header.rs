//! Canonical header mapping from origin records.

use std::collections::BTreeSet;

use tracing::debug;
use welllog_model::{Header, HeaderField, NAME_COLUMN, RecordSet, Value};

use crate::datetime::normalize_datetime;
use crate::extract::VALUE_COLUMN;

/// Maps an origin record set onto canonical header fields.
#[derive(Debug, Clone, Copy)]
pub struct HeaderMapper<'a> {
    fields: &'a [HeaderField],
}

impl<'a> HeaderMapper<'a> {
    pub fn new(fields: &'a [HeaderField]) -> Self {
        Self { fields }
    }

    /// Builds the header of section `section_id`.
    ///
    /// Canonical fields come first, in declared order, each taking the first
    /// alias with a non-null value (null when none matches). Origin fields
    /// no alias claims follow in origin order; one that shares a canonical
    /// field's name replaces that value in place. `name` is always the
    /// section identifier.
    pub fn map(&self, origins: &RecordSet, section_id: &str) -> Header {
        let mut header = Header::new();
        for field in self.fields {
            let value = self.resolve(field, origins);
            header.set(field.name.clone(), value);
        }

        let claimed: BTreeSet<&str> = self
            .fields
            .iter()
            .flat_map(|field| field.aliases.iter().map(String::as_str))
            .collect();
        for name in origins.names() {
            if claimed.contains(name) {
                continue;
            }
            header.set(name, origin_value(origins, name).cloned().unwrap_or_default());
        }

        header.set(NAME_COLUMN, Value::Text(section_id.to_string()));
        header
    }

    fn resolve(&self, field: &HeaderField, origins: &RecordSet) -> Value {
        let chosen = field
            .aliases
            .iter()
            .find_map(|alias| origin_value(origins, alias).filter(|value| !value.is_null()));
        let Some(value) = chosen else {
            return Value::Null;
        };
        if field.date {
            normalize_date_value(&field.name, value)
        } else {
            value.clone()
        }
    }
}

fn origin_value<'r>(origins: &'r RecordSet, field: &str) -> Option<&'r Value> {
    origins
        .value(field, VALUE_COLUMN)
        .or_else(|| origins.get(field).and_then(<[Value]>::first))
}

fn normalize_date_value(field: &str, value: &Value) -> Value {
    let Some(text) = value.as_str() else {
        debug!(field, "date field is not text; keeping it unchanged");
        return value.clone();
    };
    match normalize_datetime(text) {
        Some(normalized) => Value::Text(normalized),
        None => {
            debug!(field, value = text, "unparseable date; keeping it unchanged");
            value.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use welllog_model::default_header_fields;

    fn origins(entries: &[(&str, Value)]) -> RecordSet {
        let mut set = RecordSet::new(vec![VALUE_COLUMN.to_string()]);
        for (field, value) in entries {
            set.objects.insert(*field, vec![value.clone()]);
        }
        set
    }

    #[test]
    fn first_alias_wins() {
        let fields = vec![HeaderField::new("F", &["A", "B"])];
        let mapper = HeaderMapper::new(&fields);
        let header = mapper.map(
            &origins(&[("B", Value::Number(2.0)), ("A", Value::Number(1.0))]),
            "LF-1",
        );
        assert_eq!(header.get("F"), Some(&Value::Number(1.0)));
        assert!(!header.contains("A"));
        assert!(!header.contains("B"));
    }

    #[test]
    fn null_alias_falls_through() {
        let fields = vec![HeaderField::new("F", &["A", "B"])];
        let header = HeaderMapper::new(&fields).map(
            &origins(&[("A", Value::Null), ("B", Value::Number(2.0))]),
            "LF-1",
        );
        assert_eq!(header.get("F"), Some(&Value::Number(2.0)));
    }

    #[test]
    fn unclaimed_fields_are_copied_and_name_is_forced() {
        let fields = default_header_fields();
        let header = HeaderMapper::new(&fields).map(
            &origins(&[
                ("name", Value::Text("DEFINING".to_string())),
                ("well_name", Value::Text("A-1".to_string())),
                ("namespace_name", Value::Text("SLB".to_string())),
                ("creation_time", Value::Text("2019-03-12 08:15:00".to_string())),
            ]),
            "LF-7",
        );
        assert_eq!(header.name(), Some("LF-7"));
        assert_eq!(header.get("well"), Some(&Value::Text("A-1".to_string())));
        assert_eq!(header.get("operator"), Some(&Value::Null));
        assert_eq!(
            header.get("startTime"),
            Some(&Value::Text("2019-03-12T08:15:00".to_string()))
        );
        assert_eq!(
            header.get("namespace_name"),
            Some(&Value::Text("SLB".to_string()))
        );
        let fields: Vec<&str> = header.fields().map(|(field, _)| field).collect();
        assert_eq!(fields.first(), Some(&"well"));
        assert_eq!(&fields[fields.len() - 2..], &["name", "namespace_name"]);
    }

    #[test]
    fn unclaimed_origin_field_overrides_canonical_of_same_name() {
        let fields = vec![
            HeaderField::new("well", &["well_name"]),
            HeaderField::new("field", &["field_name"]),
        ];
        let header = HeaderMapper::new(&fields).map(
            &origins(&[
                ("well_name", Value::Text("A-1".to_string())),
                ("well", Value::Text("FROM-ORIGIN".to_string())),
            ]),
            "LF-1",
        );
        assert_eq!(
            header.get("well"),
            Some(&Value::Text("FROM-ORIGIN".to_string()))
        );
        let fields: Vec<&str> = header.fields().map(|(field, _)| field).collect();
        assert_eq!(fields, vec!["well", "field", "name"]);
    }

    #[test]
    fn unparseable_dates_pass_through() {
        let fields = vec![HeaderField::new("startTime", &["DATE"]).date()];
        let header = HeaderMapper::new(&fields).map(
            &origins(&[("DATE", Value::Text("sometime in spring".to_string()))]),
            "LF-1",
        );
        assert_eq!(
            header.get("startTime"),
            Some(&Value::Text("sometime in spring".to_string()))
        );
    }
}
