//! Parameter schema construction for tool declarations.

use serde_json::json;

/// Builder for the object schema a tool's parameters follow.
#[derive(Debug, Clone, Default)]
pub struct ParameterSchema {
    properties: Vec<(String, serde_json::Value)>,
    required: Vec<String>,
    deny_additional: bool,
}

impl ParameterSchema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a typed property with a description.
    pub fn property(
        mut self,
        name: impl Into<String>,
        type_name: &str,
        description: impl Into<String>,
    ) -> Self {
        let mut schema = schema_from_type_name(type_name);
        schema["description"] = json!(description.into());
        self.properties.push((name.into(), schema));
        self
    }

    /// Add a string property restricted to `values`.
    pub fn enum_property(
        mut self,
        name: impl Into<String>,
        values: &[&str],
        description: impl Into<String>,
    ) -> Self {
        self.properties.push((
            name.into(),
            json!({
                "type": "string",
                "enum": values,
                "description": description.into(),
            }),
        ));
        self
    }

    /// Add a property with an arbitrary schema.
    pub fn raw_property(mut self, name: impl Into<String>, schema: serde_json::Value) -> Self {
        self.properties.push((name.into(), schema));
        self
    }

    pub fn required(mut self, names: &[&str]) -> Self {
        self.required = names.iter().map(|s| s.to_string()).collect();
        self
    }

    /// Reject argument keys that are not declared properties.
    pub fn deny_additional(mut self) -> Self {
        self.deny_additional = true;
        self
    }

    pub fn build(self) -> serde_json::Value {
        let mut map = serde_json::Map::new();
        map.insert("type".into(), json!("object"));

        let mut properties = serde_json::Map::new();
        for (name, schema) in self.properties {
            properties.insert(name, schema);
        }
        map.insert("properties".into(), properties.into());

        if !self.required.is_empty() {
            map.insert("required".into(), self.required.into());
        }

        if self.deny_additional {
            map.insert("additionalProperties".into(), json!(false));
        }

        map.into()
    }
}

pub fn schema_from_type_name(type_name: &str) -> serde_json::Value {
    match type_name {
        "string" => json!({"type": "string"}),
        "integer" => json!({"type": "integer"}),
        "number" => json!({"type": "number"}),
        "boolean" => json!({"type": "boolean"}),
        "array" => json!({"type": "array"}),
        "null" => json!({"type": "null"}),
        _ => json!({"type": "object"}),
    }
}

/// Derive a parameter schema from a Rust type.
///
/// The `$schema` and `title` keys schemars adds are dropped; servers only need the object shape.
pub fn json_schema_from_type<T: schemars::JsonSchema>() -> serde_json::Value {
    let schema = schemars::schema_for!(T);
    let mut value = serde_json::to_value(&schema).unwrap_or_else(|_| json!({}));
    if let Some(map) = value.as_object_mut() {
        map.remove("$schema");
        map.remove("title");
    }
    value
}
