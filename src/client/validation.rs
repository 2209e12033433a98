//! Local request validation. Runs before any network I/O.

use std::collections::HashSet;

use crate::structured::ArgumentValidator;
use crate::types::CompletionRequest;
use crate::{Error, ErrorContext, Result};

const TEMPERATURE_RANGE: std::ops::RangeInclusive<f64> = 0.0..=2.0;

fn invalid(message: impl Into<String>, field_path: impl Into<String>) -> Error {
    Error::invalid_request_with_context(
        message,
        ErrorContext::new()
            .with_field_path(field_path)
            .with_source("request_validator"),
    )
}

/// Validate a request against the caller-side contract.
pub(crate) fn validate_request(request: &CompletionRequest) -> Result<()> {
    if request.model.trim().is_empty() {
        return Err(invalid("model must not be empty", "request.model"));
    }

    if request.messages.is_empty() {
        return Err(invalid("messages must not be empty", "request.messages"));
    }

    let mut seen = HashSet::with_capacity(request.tools.len());
    for (i, tool) in request.tools.iter().enumerate() {
        if tool.name.trim().is_empty() {
            return Err(invalid(
                "tool name must not be empty",
                format!("request.tools[{}].name", i),
            ));
        }
        if !seen.insert(tool.name.as_str()) {
            return Err(Error::invalid_request_with_context(
                format!("duplicate tool name: {}", tool.name),
                ErrorContext::new()
                    .with_field_path(format!("request.tools[{}].name", i))
                    .with_details("tool names must be unique within a request")
                    .with_source("request_validator"),
            ));
        }
        if let Err(e) = ArgumentValidator::compile(&tool.parameter_schema) {
            return Err(Error::invalid_request_with_context(
                e.message,
                ErrorContext::new()
                    .with_field_path(format!("request.tools[{}].parameter_schema", i))
                    .with_source("request_validator"),
            ));
        }
    }

    if !request.tools.is_empty() {
        for (i, message) in request.messages.iter().enumerate() {
            if let Some(call) = &message.tool_call {
                if !seen.contains(call.name.as_str()) {
                    return Err(invalid(
                        format!("message references undeclared tool: {}", call.name),
                        format!("request.messages[{}].tool_call.name", i),
                    ));
                }
            }
        }
    }

    let sampling = &request.sampling;
    if !sampling.temperature.is_finite() || !TEMPERATURE_RANGE.contains(&sampling.temperature) {
        return Err(Error::invalid_request_with_context(
            format!("temperature out of range: {}", sampling.temperature),
            ErrorContext::new()
                .with_field_path("request.sampling.temperature")
                .with_details("expected a value in [0, 2]")
                .with_source("request_validator"),
        ));
    }

    if sampling.max_output_tokens == 0 {
        return Err(invalid(
            "max_output_tokens must be greater than zero",
            "request.sampling.max_output_tokens",
        ));
    }

    if let Some(top_p) = sampling.top_p {
        if !top_p.is_finite() || top_p <= 0.0 || top_p > 1.0 {
            return Err(Error::invalid_request_with_context(
                format!("top_p out of range: {}", top_p),
                ErrorContext::new()
                    .with_field_path("request.sampling.top_p")
                    .with_details("expected a value in (0, 1]")
                    .with_source("request_validator"),
            ));
        }
    }

    Ok(())
}
