//! Structured tool arguments for ai-lib-chat.
//!
//! - `ArgumentValidator`: validate parsed tool arguments against a tool's JSON Schema
//! - `ParameterSchema`: build parameter schemas for tool declarations
//! - `json_schema_from_type`: derive a parameter schema from a Rust type
//!
//! # Examples
//!
//! ```
//! use ai_lib_chat::structured::{ArgumentValidator, ParameterSchema};
//! use serde_json::json;
//!
//! let schema = ParameterSchema::new()
//!     .property("expression", "string", "The mathematical expression to evaluate")
//!     .required(&["expression"])
//!     .build();
//!
//! let validator = ArgumentValidator::compile(&schema).unwrap();
//! assert!(validator.is_valid(&json!({"expression": "15 * 23 + 7"})));
//! assert!(!validator.is_valid(&json!({})));
//! ```

pub mod error;
pub mod schema;
pub mod validator;

pub use error::ValidationError;
pub use schema::{json_schema_from_type, schema_from_type_name, ParameterSchema};
pub use validator::{validate_tool_arguments, ArgumentValidator};
