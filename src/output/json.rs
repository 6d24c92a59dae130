//! JSON output formatter

use crate::models::CertificateCheckResult;
use crate::runner::DomainOutcome;
use serde::Serialize;

/// Serializable failure description
#[derive(Debug, Serialize)]
pub struct JsonError {
    pub kind: String,
    pub message: String,
}

/// One entry per checked domain
#[derive(Debug, Serialize)]
pub struct JsonOutput<'a> {
    pub domain: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<&'a CertificateCheckResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonError>,
}

impl<'a> From<&'a DomainOutcome> for JsonOutput<'a> {
    fn from(outcome: &'a DomainOutcome) -> Self {
        match &outcome.result {
            Ok(result) => JsonOutput {
                domain: &outcome.domain,
                result: Some(result),
                error: None,
            },
            Err(e) => JsonOutput {
                domain: &outcome.domain,
                result: None,
                error: Some(JsonError {
                    kind: e.kind().to_string(),
                    message: e.to_string(),
                }),
            },
        }
    }
}

/// Render outcomes as a pretty JSON array
pub fn to_json(outcomes: &[DomainOutcome]) -> serde_json::Result<String> {
    let output: Vec<JsonOutput<'_>> = outcomes.iter().map(JsonOutput::from).collect();
    serde_json::to_string_pretty(&output)
}

/// Print outcomes as JSON to stdout
pub fn print_json(outcomes: &[DomainOutcome]) -> serde_json::Result<()> {
    println!("{}", to_json(outcomes)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::InspectError;

    #[test]
    fn test_error_entry() {
        let outcomes = vec![DomainOutcome {
            domain: "slow.test".to_string(),
            result: Err(InspectError::Timeout {
                domain: "slow.test".to_string(),
                seconds: 10,
            }),
        }];

        let json: serde_json::Value = serde_json::from_str(&to_json(&outcomes).unwrap()).unwrap();
        assert_eq!(json[0]["domain"], "slow.test");
        assert_eq!(json[0]["error"]["kind"], "timeout");
        assert!(json[0].get("result").is_none());
    }
}
