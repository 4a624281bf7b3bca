//! Schema resolution: external field names to positions and types.

use std::collections::HashMap;

use log::warn;

use crate::record::{FieldDef, Record};
use crate::value::FieldType;

/// Position and declared type of a visible field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldInfo {
    /// Index into the record's field table.
    pub position: usize,
    /// Declared type.
    pub ty: FieldType,
}

/// Lower-cased external field names of one record type.
#[derive(Debug, Clone, Default)]
pub struct Schema {
    fields: HashMap<String, FieldInfo>,
}

impl Schema {
    /// Resolves the schema of `R`.
    pub fn resolve<R: Record>() -> Self {
        Self::from_defs(R::fields())
    }

    /// Builds a schema from a field table.
    ///
    /// Hidden fields are skipped. Each visible field is keyed by its
    /// external name, lower-cased; when two names collide the later field
    /// wins.
    pub fn from_defs(defs: Vec<FieldDef>) -> Self {
        let mut fields = HashMap::with_capacity(defs.len());
        for (position, def) in defs.into_iter().enumerate() {
            if !def.is_visible() {
                continue;
            }
            let external = def.external_name();
            let info = FieldInfo {
                position,
                ty: def.ty,
            };
            if let Some(previous) = fields.insert(external.to_lowercase(), info) {
                warn!(
                    "field '{}' at position {} shadows position {} (names collide case-insensitively)",
                    external,
                    position,
                    previous.position
                );
            }
        }
        Schema { fields }
    }

    /// Looks up a field by its lower-cased name.
    pub fn get(&self, name: &str) -> Option<&FieldInfo> {
        self.fields.get(name)
    }

    /// Looks up a field, lower-casing `name` first.
    pub fn lookup(&self, name: &str) -> Option<&FieldInfo> {
        self.fields.get(&name.to_lowercase())
    }

    /// Returns the number of visible fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` if no field is visible.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterates over visible field names in no particular order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn defs() -> Vec<FieldDef> {
        vec![
            FieldDef::new("A", FieldType::I64),
            FieldDef::hidden("secret", "Secret"),
            FieldDef::new("B", FieldType::String).rename("Bar"),
        ]
    }

    #[test]
    fn names_are_lowercased() {
        let schema = Schema::from_defs(defs());
        assert_eq!(
            schema.get("a"),
            Some(&FieldInfo {
                position: 0,
                ty: FieldType::I64
            })
        );
        assert!(schema.get("A").is_none());
        assert!(schema.lookup("A").is_some());
    }

    #[test]
    fn rename_replaces_declared_name() {
        let schema = Schema::from_defs(defs());
        assert!(schema.get("b").is_none());
        assert_eq!(schema.get("bar").map(|f| f.position), Some(2));
    }

    #[test]
    fn hidden_fields_are_skipped_but_keep_positions() {
        let schema = Schema::from_defs(defs());
        assert_eq!(schema.len(), 2);
        assert!(schema.get("secret").is_none());
    }

    #[test]
    fn later_field_wins_on_collision() {
        let schema = Schema::from_defs(vec![
            FieldDef::new("Name", FieldType::String),
            FieldDef::new("NAME", FieldType::I32),
        ]);
        assert_eq!(schema.len(), 1);
        assert_eq!(schema.get("name").map(|f| f.position), Some(1));
        assert_eq!(schema.get("name").map(|f| &f.ty), Some(&FieldType::I32));
    }
}
