//! Terraform `external` data source protocol: one JSON object of strings in
//! on stdin, one JSON object of strings out on stdout.

use std::io::Read;
use std::path::PathBuf;

use brandsync_core::{BrandingRequest, InputError, LookupStrategy, MAX_PAYLOAD_BYTES, load_json};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ExternalQuery {
    pub user_pool_id: String,
    pub client_id: String,
    pub settings_path: PathBuf,
    pub assets_path: PathBuf,
    pub region: String,
    #[serde(default)]
    pub endpoint_url: Option<String>,
    #[serde(default)]
    pub lookup: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ExternalResult<'a> {
    pub branding_id: &'a str,
}

impl ExternalQuery {
    pub fn read_from(mut reader: impl Read) -> Result<Self, InputError> {
        let mut buf = String::new();
        reader
            .read_to_string(&mut buf)
            .map_err(|e| InputError::invalid_document(format!("failed to read stdin: {e}")))?;
        Self::parse(&buf)
    }

    pub fn parse(input: &str) -> Result<Self, InputError> {
        let query: Self = serde_json::from_str(input)
            .map_err(|e| InputError::invalid_document(e.to_string()))?;
        for (name, value) in [
            ("user_pool_id", query.user_pool_id.as_str()),
            ("client_id", query.client_id.as_str()),
            ("region", query.region.as_str()),
        ] {
            if value.trim().is_empty() {
                return Err(InputError::invalid_document(format!("{name} must not be empty")));
            }
        }
        Ok(query)
    }

    /// Lookup strategy requested in the query, if any.
    pub fn lookup_strategy(&self) -> Result<Option<LookupStrategy>, InputError> {
        self.lookup
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .map(|s| s.parse().map_err(InputError::invalid_document))
            .transpose()
    }

    /// Loads the referenced files into a request.
    pub fn into_request(self) -> Result<BrandingRequest, InputError> {
        let settings = load_json(&self.settings_path, MAX_PAYLOAD_BYTES)?;
        let assets = load_json(&self.assets_path, MAX_PAYLOAD_BYTES)?;
        Ok(BrandingRequest {
            pool_id: self.user_pool_id,
            client_id: self.client_id,
            region: self.region,
            settings,
            assets,
            use_cognito_provided_values: false,
            app_name: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn query_json() -> serde_json::Value {
        json!({
            "user_pool_id": "us-east-1_AbCdEf",
            "client_id": "client123",
            "settings_path": "settings.json",
            "assets_path": "assets.json",
            "region": "us-east-1"
        })
    }

    #[test]
    fn test_parse_query() {
        let query = ExternalQuery::parse(&query_json().to_string()).unwrap();
        assert_eq!(query.user_pool_id, "us-east-1_AbCdEf");
        assert_eq!(query.settings_path, PathBuf::from("settings.json"));
        assert_eq!(query.lookup_strategy().unwrap(), None);
    }

    #[test]
    fn test_parse_query_missing_field() {
        let mut value = query_json();
        value.as_object_mut().unwrap().remove("client_id");
        let err = ExternalQuery::parse(&value.to_string()).unwrap_err();
        assert!(err.to_string().contains("client_id"));
    }

    #[test]
    fn test_parse_query_empty_field() {
        let mut value = query_json();
        value["region"] = json!("");
        let err = ExternalQuery::parse(&value.to_string()).unwrap_err();
        assert!(err.to_string().contains("region must not be empty"));
    }

    #[test]
    fn test_parse_query_not_json() {
        assert!(matches!(
            ExternalQuery::parse("user_pool_id=x"),
            Err(InputError::InvalidDocument { .. })
        ));
    }

    #[test]
    fn test_lookup_from_query() {
        let mut value = query_json();
        value["lookup"] = json!("enumerate");
        let query = ExternalQuery::parse(&value.to_string()).unwrap();
        assert_eq!(query.lookup_strategy().unwrap(), Some(LookupStrategy::Enumerate));

        value["lookup"] = json!("bogus");
        let query = ExternalQuery::parse(&value.to_string()).unwrap();
        assert!(query.lookup_strategy().is_err());
    }

    #[test]
    fn test_into_request_loads_files() {
        let dir = tempfile::tempdir().unwrap();
        let settings = dir.path().join("settings.json");
        let assets = dir.path().join("assets.json");
        std::fs::write(&settings, r#"{"categories": {}}"#).unwrap();
        std::fs::write(&assets, "[]").unwrap();

        let mut value = query_json();
        value["settings_path"] = json!(settings);
        value["assets_path"] = json!(assets);
        let request = ExternalQuery::parse(&value.to_string())
            .unwrap()
            .into_request()
            .unwrap();

        assert_eq!(request.settings, json!({"categories": {}}));
        assert_eq!(request.assets, json!([]));
        assert_eq!(request.region, "us-east-1");
    }

    #[test]
    fn test_result_shape() {
        let out = serde_json::to_string(&ExternalResult { branding_id: "abc" }).unwrap();
        assert_eq!(out, r#"{"branding_id":"abc"}"#);
    }
}
