//! Tool argument validation against a tool's declared parameter schema.

use jsonschema::{Draft, JSONSchema};
use serde_json::Value;

use crate::structured::error::ValidationError;
use crate::types::ToolSpec;
use crate::{Error, Result};

/// Compiled parameter schema for a single tool.
///
/// A `null` or empty-object schema accepts any argument object.
pub struct ArgumentValidator {
    schema: Option<JSONSchema>,
}

impl ArgumentValidator {
    /// Compile a JSON Schema (Draft 7).
    pub fn compile(schema: &Value) -> std::result::Result<Self, ValidationError> {
        let permissive = match schema {
            Value::Null => true,
            Value::Object(map) => map.is_empty(),
            _ => false,
        };
        if permissive {
            return Ok(Self { schema: None });
        }

        let compiled = JSONSchema::options()
            .with_draft(Draft::Draft7)
            .compile(schema)
            .map_err(|e| ValidationError::without_path(format!("invalid parameter schema: {}", e)))?;
        Ok(Self {
            schema: Some(compiled),
        })
    }

    /// Validate arguments, collecting every violation.
    pub fn validate(&self, arguments: &Value) -> std::result::Result<(), Vec<ValidationError>> {
        let schema = match &self.schema {
            Some(s) => s,
            None => return Ok(()),
        };

        schema.validate(arguments).map_err(|errors| {
            errors
                .map(|e| ValidationError::with_path(e.to_string(), e.instance_path.to_string()))
                .collect()
        })
    }

    pub fn is_valid(&self, arguments: &Value) -> bool {
        self.validate(arguments).is_ok()
    }
}

/// Validate parsed arguments for `tool`, mapping any failure to `MalformedToolArguments`.
pub fn validate_tool_arguments(tool: &ToolSpec, arguments: &Value) -> Result<()> {
    let validator = ArgumentValidator::compile(&tool.parameter_schema)
        .map_err(|e| Error::malformed_arguments(&tool.name, e.to_string()))?;
    validator
        .validate(arguments)
        .map_err(|errors| Error::malformed_arguments(&tool.name, ValidationError::join(&errors)))
}
