use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DestroyOutcome {
    Ok,
    NotFound,
    Other(String),
}

#[derive(Debug, Deserialize)]
pub(crate) struct DestroyResponse {
    pub result: String,
}

impl From<DestroyResponse> for DestroyOutcome {
    fn from(response: DestroyResponse) -> Self {
        match response.result.as_str() {
            "ok" => DestroyOutcome::Ok,
            "not found" => DestroyOutcome::NotFound,
            _ => DestroyOutcome::Other(response.result),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(body: &str) -> DestroyOutcome {
        serde_json::from_str::<DestroyResponse>(body).unwrap().into()
    }

    #[test]
    fn maps_known_results() {
        assert_eq!(outcome(r#"{"result":"ok"}"#), DestroyOutcome::Ok);
        assert_eq!(outcome(r#"{"result":"not found"}"#), DestroyOutcome::NotFound);
    }

    #[test]
    fn keeps_unknown_results() {
        assert_eq!(
            outcome(r#"{"result":"pending"}"#),
            DestroyOutcome::Other("pending".to_string())
        );
    }
}
