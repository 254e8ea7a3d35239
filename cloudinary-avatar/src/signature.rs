use std::collections::BTreeMap;

use sha1::{Digest, Sha1};

/// Request parameters that take part in the API signature.
///
/// Kept sorted by name, which is the order the signature is computed in.
/// `file`, `api_key`, `resource_type` and `cloud_name` must never be added here.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignedParams(BTreeMap<String, String>);

impl SignedParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn with_timestamp(self, unix_seconds: i64) -> Self {
        self.with("timestamp", unix_seconds.to_string())
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// `k1=v1&k2=v2...` in key order.
    pub fn to_sign(&self) -> String {
        self.0
            .iter()
            .filter(|(_, value)| !value.is_empty())
            .map(|(key, value)| format!("{key}={value}"))
            .collect::<Vec<_>>()
            .join("&")
    }

    /// Hex encoded SHA-1 of the serialized parameters followed by the API secret.
    pub fn signature(&self, api_secret: &str) -> String {
        let mut hasher = Sha1::new();
        hasher.update(self.to_sign().as_bytes());
        hasher.update(api_secret.as_bytes());
        hex::encode(hasher.finalize())
    }

    /// All form fields for a signed request: the parameters plus `api_key` and `signature`.
    pub fn into_form(self, api_key: &str, api_secret: &str) -> Vec<(String, String)> {
        let signature = self.signature(api_secret);
        let mut fields = self.0.into_iter().collect::<Vec<_>>();
        fields.push(("api_key".to_string(), api_key.to_string()));
        fields.push(("signature".to_string(), signature));
        fields
    }
}
