//! Problem request DTOs

use serde::{Deserialize, Deserializer};
use validator::Validate;

use crate::constants::MAX_STDIN_BYTES;

/// Run code request
#[derive(Debug, Deserialize, Validate)]
pub struct RunCodeRequest {
    pub code: Option<String>,

    #[serde(default, deserialize_with = "lenient_language_id")]
    pub language_id: Option<i32>,

    /// Custom stdin
    #[serde(alias = "stdin")]
    #[validate(length(max = MAX_STDIN_BYTES))]
    pub input: Option<String>,
}

/// Submit solution request
#[derive(Debug, Deserialize, Validate)]
pub struct SubmitSolutionRequest {
    pub code: Option<String>,

    #[serde(default, deserialize_with = "lenient_language_id")]
    pub language_id: Option<i32>,
}

/// Accept the language id as a number or a numeric string
///
/// Editor forms post `"71"`; API clients post `71`. Anything unparsable is
/// treated as missing so the caller gets the usual validation message.
fn lenient_language_id<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(i32),
        Text(String),
    }

    Ok(match Option::<Raw>::deserialize(deserializer)? {
        Some(Raw::Number(id)) => Some(id),
        Some(Raw::Text(text)) => text.trim().parse().ok(),
        None => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_id_accepts_number_or_string() {
        let numeric: SubmitSolutionRequest =
            serde_json::from_str(r#"{"code":"x","language_id":71}"#).unwrap();
        assert_eq!(numeric.language_id, Some(71));

        let text: SubmitSolutionRequest =
            serde_json::from_str(r#"{"code":"x","language_id":" 54 "}"#).unwrap();
        assert_eq!(text.language_id, Some(54));

        let junk: SubmitSolutionRequest =
            serde_json::from_str(r#"{"code":"x","language_id":"python"}"#).unwrap();
        assert_eq!(junk.language_id, None);

        let absent: SubmitSolutionRequest = serde_json::from_str(r#"{"code":"x"}"#).unwrap();
        assert_eq!(absent.language_id, None);
    }

    #[test]
    fn test_run_request_accepts_stdin_alias() {
        let req: RunCodeRequest =
            serde_json::from_str(r#"{"code":"x","language_id":71,"stdin":"1 2"}"#).unwrap();
        assert_eq!(req.input.as_deref(), Some("1 2"));
        assert!(req.validate().is_ok());
    }
}
