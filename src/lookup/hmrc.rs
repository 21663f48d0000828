//! UK HMRC check-VAT-number API client.
//!
//! Unlike VIES, HMRC requires OAuth2 client-credentials authentication.
//! Credentials come from the `GRENZVAT_UK_CLIENT_ID` /
//! `GRENZVAT_UK_CLIENT_SECRET` environment variables.

use serde::Deserialize;

use super::CheckResult;

const HMRC_URL: &str = "https://api.service.hmrc.gov.uk";
const HMRC_TEST_URL: &str = "https://test-api.service.hmrc.gov.uk";

const REQUEST_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(12);

const CLIENT_ID_VAR: &str = "GRENZVAT_UK_CLIENT_ID";
const CLIENT_SECRET_VAR: &str = "GRENZVAT_UK_CLIENT_SECRET";

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[derive(Debug, Deserialize)]
struct LookupResponse {
    target: Option<LookupTarget>,
}

#[derive(Debug, Deserialize)]
struct LookupTarget {
    name: Option<String>,
    address: Option<LookupAddress>,
}

#[derive(Debug, Deserialize)]
struct LookupAddress {
    line1: Option<String>,
    line2: Option<String>,
    postcode: Option<String>,
    #[serde(rename = "countryCode")]
    country_code: Option<String>,
}

impl LookupAddress {
    fn joined(&self) -> Option<String> {
        let parts: Vec<&str> = [
            self.line1.as_deref(),
            self.line2.as_deref(),
            self.postcode.as_deref(),
            self.country_code.as_deref(),
        ]
        .into_iter()
        .flatten()
        .collect();
        if parts.is_empty() {
            None
        } else {
            Some(parts.join(", "))
        }
    }
}

fn base_url(test_mode: bool) -> &'static str {
    if test_mode { HMRC_TEST_URL } else { HMRC_URL }
}

async fn fetch_token(
    client: &reqwest::Client,
    test_mode: bool,
    log_lines: &mut Vec<String>,
) -> Option<String> {
    let url = format!("{}/oauth/token", base_url(test_mode));
    let params = [
        ("grant_type", "client_credentials".to_string()),
        ("scope", "read:vat".to_string()),
        (
            "client_id",
            std::env::var(CLIENT_ID_VAR).unwrap_or_default(),
        ),
        (
            "client_secret",
            std::env::var(CLIENT_SECRET_VAR).unwrap_or_default(),
        ),
    ];

    log_lines.push(format!("> POST {url} (client credentials grant)"));
    let response = match client.post(&url).form(&params).send().await {
        Ok(response) => response,
        Err(e) => {
            log_lines.push(format!("< token request failed: {e}"));
            return None;
        }
    };

    if !response.status().is_success() {
        log_lines.push(format!(
            "< token request rejected with status {}",
            response.status()
        ));
        return None;
    }

    match response.json::<TokenResponse>().await {
        Ok(token) => Some(token.access_token),
        Err(e) => {
            log_lines.push(format!("< could not parse token response: {e}"));
            None
        }
    }
}

/// Check a UK VAT number against the HMRC registry.
///
/// `test_mode` targets the HMRC sandbox environment. An expired token is
/// refreshed once on a 401 before giving up. As with VIES, transport
/// problems yield a nondeterministic result rather than a hard failure.
pub async fn check_hmrc(vat_number: &str, test_mode: bool) -> CheckResult {
    let mut result = CheckResult::default();

    let client = match reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build() {
        Ok(client) => client,
        Err(e) => {
            result
                .log_lines
                .push(format!("< could not build HTTP client: {e}"));
            return result;
        }
    };

    let Some(mut token) = fetch_token(&client, test_mode, &mut result.log_lines).await else {
        return result;
    };

    let url = format!(
        "{}/organisations/vat/check-vat-number/lookup/{vat_number}",
        base_url(test_mode)
    );
    result.log_lines.push(format!("> GET {url}"));

    let mut response = match lookup(&client, &url, &token).await {
        Ok(response) => response,
        Err(e) => {
            result.log_lines.push(format!("< request failed: {e}"));
            return result;
        }
    };

    // Token may have expired between calls; authenticate once more.
    if response.status() == reqwest::StatusCode::UNAUTHORIZED {
        result.log_lines.push("< 401, refreshing token".into());
        let Some(fresh) = fetch_token(&client, test_mode, &mut result.log_lines).await else {
            return result;
        };
        token = fresh;
        response = match lookup(&client, &url, &token).await {
            Ok(response) => response,
            Err(e) => {
                result.log_lines.push(format!("< retry failed: {e}"));
                return result;
            }
        };
    }

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

    if status == reqwest::StatusCode::NOT_FOUND {
        result.is_valid = Some(false);
        return result;
    }
    if !status.is_success() {
        result
            .log_lines
            .push("< response is nondeterministic due to non-success status".into());
        return result;
    }

    let parsed: LookupResponse = match serde_json::from_str(&body) {
        Ok(parsed) => parsed,
        Err(e) => {
            result
                .log_lines
                .push(format!("< response is nondeterministic, invalid body: {e}"));
            return result;
        }
    };

    match parsed.target {
        Some(target) => {
            result.is_valid = Some(true);
            result.business_name = target.name;
            result.business_address = target.address.as_ref().and_then(LookupAddress::joined);
        }
        None => {
            result.is_valid = Some(false);
        }
    }
    result
}

async fn lookup(
    client: &reqwest::Client,
    url: &str,
    token: &str,
) -> Result<reqwest::Response, reqwest::Error> {
    client
        .get(url)
        .bearer_auth(token)
        .header("Accept", "application/vnd.hmrc.2.0+json")
        .send()
        .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn urls_are_https() {
        assert!(HMRC_URL.starts_with("https://"));
        assert!(HMRC_TEST_URL.starts_with("https://"));
    }

    #[test]
    fn test_mode_selects_sandbox() {
        assert_eq!(base_url(true), HMRC_TEST_URL);
        assert_eq!(base_url(false), HMRC_URL);
    }

    #[test]
    fn lookup_response_deserialization() {
        let json = r#"{
            "target": {
                "name": "Credite Sberger Donal Inc.",
                "vatNumber": "553557881",
                "address": {
                    "line1": "131B Barton Hamlet",
                    "postcode": "SW97 5CK",
                    "countryCode": "GB"
                }
            },
            "processingDate": "2025-01-29T12:08:48+01:00"
        }"#;
        let resp: LookupResponse = serde_json::from_str(json).unwrap();
        let target = resp.target.unwrap();
        assert_eq!(target.name.as_deref(), Some("Credite Sberger Donal Inc."));
        assert_eq!(
            target.address.unwrap().joined().as_deref(),
            Some("131B Barton Hamlet, SW97 5CK, GB")
        );
    }

    #[test]
    fn missing_target_means_invalid() {
        let resp: LookupResponse = serde_json::from_str(r#"{"processingDate":"x"}"#).unwrap();
        assert!(resp.target.is_none());
    }

    #[test]
    fn token_response_deserialization() {
        let resp: TokenResponse =
            serde_json::from_str(r#"{"access_token":"abc","token_type":"bearer"}"#).unwrap();
        assert_eq!(resp.access_token, "abc");
    }
}
