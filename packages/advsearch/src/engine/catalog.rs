use crate::engine::types::{FastMap, FieldValue, Record};
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;
use std::fmt;

/// Semantic type of a searchable field.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    String,
    Number,
    Date,
    Boolean,
    /// Any type name not listed above, as found in an external catalog.
    #[serde(other)]
    Unknown,
}

impl FieldType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::String => "string",
            FieldType::Number => "number",
            FieldType::Date => "date",
            FieldType::Boolean => "boolean",
            FieldType::Unknown => "unknown",
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct FieldDefinition {
    pub field: SmolStr,
    pub label: SmolStr,
    #[serde(rename = "type")]
    pub field_type: FieldType,
}

impl FieldDefinition {
    pub fn new(field: &str, label: &str, field_type: FieldType) -> Self {
        Self {
            field: SmolStr::new(field),
            label: SmolStr::new(label),
            field_type,
        }
    }
}

/// Ordered list of searchable fields with a by-name index.
#[derive(Clone, Debug, Default)]
pub struct FieldCatalog {
    definitions: Vec<FieldDefinition>,
    index: FastMap<SmolStr, usize>,
}

impl FieldCatalog {
    /// Builds a catalog; a repeated field name keeps its first definition.
    pub fn new(definitions: Vec<FieldDefinition>) -> Self {
        let mut index = FastMap::default();
        for (i, def) in definitions.iter().enumerate() {
            index.entry(def.field.clone()).or_insert(i);
        }
        Self { definitions, index }
    }

    /// The fields of the employee sample dataset.
    pub fn employees() -> Self {
        use FieldType::*;
        Self::new(vec![
            FieldDefinition::new("id", "ID", Number),
            FieldDefinition::new("name", "Name", String),
            FieldDefinition::new("email", "Email", String),
            FieldDefinition::new("age", "Age", Number),
            FieldDefinition::new("salary", "Salary", Number),
            FieldDefinition::new("score", "Score", Number),
            FieldDefinition::new("status", "Status", String),
            FieldDefinition::new("department", "Department", String),
            FieldDefinition::new("description", "Description", String),
            FieldDefinition::new("isActive", "Active", Boolean),
            FieldDefinition::new("isVerified", "Verified", Boolean),
            FieldDefinition::new("createdAt", "Created At", Date),
            FieldDefinition::new("updatedAt", "Updated At", Date),
            FieldDefinition::new("birthDate", "Birth Date", Date),
        ])
    }

    pub fn definitions(&self) -> &[FieldDefinition] {
        &self.definitions
    }

    pub fn get(&self, field: &str) -> Option<&FieldDefinition> {
        self.index.get(field).map(|&i| &self.definitions[i])
    }

    pub fn field_type(&self, field: &str) -> Option<FieldType> {
        self.get(field).map(|def| def.field_type)
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Marks string values of date-typed fields as dates.
    pub fn tag_record(&self, record: &mut Record) {
        for (key, value) in record.iter_mut() {
            if self.field_type(key) != Some(FieldType::Date) {
                continue;
            }
            if let FieldValue::Str(s) = value {
                *value = FieldValue::Date(s.clone());
            }
        }
    }
}

lazy_static::lazy_static! {
    static ref EMPLOYEE_CATALOG: FieldCatalog = FieldCatalog::employees();
}

/// Process-wide catalog for the built-in sample dataset.
pub fn default_catalog() -> &'static FieldCatalog {
    &EMPLOYEE_CATALOG
}
