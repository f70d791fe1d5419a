//! JSON payloads to Cognito request shapes.

use std::collections::HashMap;

use aws_sdk_cognitoidentityprovider::primitives::Blob;
use aws_sdk_cognitoidentityprovider::types::{
    AssetCategoryType, AssetExtensionType, AssetType, ColorSchemeModeType,
};
use aws_smithy_types::{Document, Number};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde_json::{Map, Value};

#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    #[error("assets must be a JSON array or an object with an \"Assets\" array")]
    AssetsShape,

    #[error("asset #{index}: {message}")]
    Asset { index: usize, message: String },
}

/// Converts a JSON value into a smithy document, preserving number kinds.
pub fn to_document(value: &Value) -> Document {
    match value {
        Value::Null => Document::Null,
        Value::Bool(b) => Document::Bool(*b),
        Value::Number(n) => Document::Number(if let Some(u) = n.as_u64() {
            Number::PosInt(u)
        } else if let Some(i) = n.as_i64() {
            Number::NegInt(i)
        } else {
            Number::Float(n.as_f64().unwrap_or_default())
        }),
        Value::String(s) => Document::String(s.clone()),
        Value::Array(items) => Document::Array(items.iter().map(to_document).collect()),
        Value::Object(map) => Document::Object(
            map.iter()
                .map(|(k, v)| (k.clone(), to_document(v)))
                .collect::<HashMap<_, _>>(),
        ),
    }
}

/// Settings document, or `None` when the settings file held `null`.
pub fn settings_document(settings: &Value) -> Option<Document> {
    (!settings.is_null()).then(|| to_document(settings))
}

/// Parses asset descriptors.
///
/// Accepts a bare array or `{"Assets": [...]}`. Each entry needs `Category`,
/// `ColorMode`, `Extension` and base64 `Bytes`; `ResourceId` is optional.
/// `null` means "no assets".
pub fn to_assets(assets: &Value) -> Result<Option<Vec<AssetType>>, ConvertError> {
    let entries = match assets {
        Value::Null => return Ok(None),
        Value::Array(entries) => entries,
        Value::Object(map) => map
            .get("Assets")
            .and_then(Value::as_array)
            .ok_or(ConvertError::AssetsShape)?,
        _ => return Err(ConvertError::AssetsShape),
    };

    entries
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            let fields = entry.as_object().ok_or_else(|| ConvertError::Asset {
                index,
                message: "expected an object".into(),
            })?;
            to_asset(fields).map_err(|message| ConvertError::Asset { index, message })
        })
        .collect::<Result<Vec<_>, _>>()
        .map(Some)
}

fn field<'a>(fields: &'a Map<String, Value>, key: &str) -> Result<&'a str, String> {
    fields
        .get(key)
        .and_then(Value::as_str)
        .ok_or_else(|| format!("missing string field {key}"))
}

fn to_asset(fields: &Map<String, Value>) -> Result<AssetType, String> {
    let bytes = STANDARD
        .decode(field(fields, "Bytes")?)
        .map_err(|e| format!("Bytes is not valid base64: {e}"))?;

    AssetType::builder()
        .category(AssetCategoryType::from(field(fields, "Category")?))
        .color_mode(ColorSchemeModeType::from(field(fields, "ColorMode")?))
        .extension(AssetExtensionType::from(field(fields, "Extension")?))
        .bytes(Blob::new(bytes))
        .set_resource_id(fields.get("ResourceId").and_then(Value::as_str).map(String::from))
        .build()
        .map_err(|e| e.to_string())
}
