//! EU VIES REST API client.

use serde::{Deserialize, Serialize};

use super::CheckResult;

const VIES_URL: &str = "https://ec.europa.eu/taxation_customs/vies/rest-api/check-vat-number";

const REQUEST_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(8);

/// VIES API request body.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ViesRequest {
    country_code: String,
    vat_number: String,
}

/// VIES API response structure.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ViesResponse {
    valid: Option<bool>,
    name: Option<String>,
    address: Option<String>,
    // Error fields
    error_wrappers: Option<Vec<ViesErrorWrapper>>,
}

#[derive(Debug, Deserialize)]
struct ViesErrorWrapper {
    error: Option<String>,
    message: Option<String>,
}

// The service reports missing name/address as "---".
fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| v != "---" && !v.trim().is_empty())
}

/// Check a VAT number against the EU VIES registry.
///
/// `country_code` is the 2-letter ISO code; the `GR` synonym is mapped to
/// `EL`, which is what VIES expects for Greece. `vat_number` is the number
/// part without the country prefix.
///
/// Problems with the request never fail the call: the result carries
/// `is_valid: None` and the transcript explains what happened, so callers
/// can retry or escalate rather than treat an outage as "invalid".
pub async fn check_vies(country_code: &str, vat_number: &str) -> CheckResult {
    let mut result = CheckResult::default();

    // Non-ISO code used for Greece.
    let country_code = match country_code.to_uppercase().as_str() {
        "GR" => "EL".to_string(),
        other => other.to_string(),
    };

    let req = ViesRequest {
        country_code,
        vat_number: vat_number.to_string(),
    };
    result.log_lines.push(format!(
        "> POST {VIES_URL} checking {}{}",
        req.country_code, req.vat_number
    ));

    let client = match reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build() {
        Ok(client) => client,
        Err(e) => {
            result
                .log_lines
                .push(format!("< could not build HTTP client: {e}"));
            return result;
        }
    };

    let response = match client.post(VIES_URL).json(&req).send().await {
        Ok(response) => response,
        Err(e) => {
            result.log_lines.push(format!("< request failed: {e}"));
            return result;
        }
    };

    let status = response.status();
    let body = match response.text().await {
        Ok(body) => body,
        Err(e) => {
            result
                .log_lines
                .push(format!("< could not read response body: {e}"));
            return result;
        }
    };
    result
        .log_lines
        .push(format!("< response with status {status}: {body}"));

    if !status.is_success() {
        result
            .log_lines
            .push("< response is nondeterministic due to non-success status".into());
        return result;
    }

    let parsed: ViesResponse = match serde_json::from_str(&body) {
        Ok(parsed) => parsed,
        Err(e) => {
            result
                .log_lines
                .push(format!("< response is nondeterministic, invalid body: {e}"));
            return result;
        }
    };

    if let Some(errors) = &parsed.error_wrappers {
        if let Some(err) = errors.first() {
            let msg = err
                .message
                .clone()
                .or_else(|| err.error.clone())
                .unwrap_or_else(|| "unknown error".into());
            result.log_lines.push(format!("< VIES reported: {msg}"));
            return result;
        }
    }

    result.is_valid = parsed.valid;
    result.business_name = present(parsed.name);
    result.business_address = present(parsed.address);
    result
}
