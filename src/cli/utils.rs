use serde::Serialize;
use serde_json::{json, Value};

use crate::cli::OutputFormat;
use crate::client::HookResponse;

/// Failure that has already been printed; the binary only sets the exit code
#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct Reported(pub String);

/// Output a success message in the appropriate format
pub fn output_success(
    output_format: &OutputFormat,
    message: &str,
    data: Option<Value>,
) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            let mut response = json!({
                "success": true,
                "message": message
            });

            if let Some(data_value) = data {
                response["data"] = data_value;
            }

            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        OutputFormat::Text => {
            println!("✓ {}", message);
            if let Some(data_value) = data.filter(|d| !d.is_null()) {
                println!("{}", serde_json::to_string_pretty(&data_value)?);
            }
        }
    }
    Ok(())
}

/// Output an error message in the appropriate format
pub fn output_error(
    output_format: &OutputFormat,
    message: &str,
    error_code: Option<&str>,
) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            let mut response = json!({
                "success": false,
                "message": message
            });

            if let Some(code) = error_code {
                response["code"] = json!(code);
            }

            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        OutputFormat::Text => {
            eprintln!("Error: {}", message);
        }
    }
    Ok(())
}

/// Output an empty collection in the appropriate format
pub fn output_empty_collection(
    output_format: &OutputFormat,
    collection_name: &str,
    message: &str,
) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&json!({
                "success": true,
                collection_name: []
            }))?);
        }
        OutputFormat::Text => {
            println!("{}", message);
        }
    }
    Ok(())
}

/// Print a gateway response; a `success: false` answer becomes an error so the
/// process exits non-zero
pub fn output_response<T: Serialize>(
    output_format: &OutputFormat,
    message: &str,
    response: HookResponse<T>,
) -> anyhow::Result<()> {
    if !response.success {
        let reason = response
            .message
            .unwrap_or_else(|| "Request failed".to_string());
        output_error(output_format, &reason, None)?;
        return Err(Reported(reason).into());
    }

    let data = match response.data {
        Some(data) => Some(serde_json::to_value(data)?),
        None => None,
    };
    output_success(output_format, message, data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failed_response_is_reported_once() {
        let response = HookResponse::<Value>::failure("bad credentials");
        let err = output_response(&OutputFormat::Json, "Logged in", response).unwrap_err();
        let reported = err.downcast_ref::<Reported>().unwrap();
        assert_eq!(reported.0, "bad credentials");
    }

    #[test]
    fn successful_response_is_ok() {
        let response = HookResponse::ok(Some(json!({ "available": true })));
        assert!(output_response(&OutputFormat::Json, "Checked", response).is_ok());
    }
}
