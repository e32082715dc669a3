// MyQ API response types
//
// The door service wraps every payload in a flat object carrying a
// `ReturnCode` ("0" on success) and an optional `ErrorMessage`. Identifier
// and timestamp fields arrive as either JSON strings or numbers depending on
// the endpoint, so they are normalised to strings on ingestion.

use serde::{Deserialize, Deserializer, Serialize, de};
use serde_json::Value;

/// `MyQDeviceTypeId` for garage door openers.
pub const DEVICE_TYPE_DOOR: u32 = 2;

// ── Envelope ─────────────────────────────────────────────────────────

/// Return-code header present on every MyQ response.
#[derive(Debug, Deserialize)]
pub struct Envelope {
    #[serde(rename = "ReturnCode", deserialize_with = "string_or_number")]
    pub return_code: String,
    #[serde(rename = "ErrorMessage", default)]
    pub error_message: Option<String>,
}

impl Envelope {
    pub fn is_ok(&self) -> bool {
        self.return_code == "0"
    }
}

// ── Authentication ───────────────────────────────────────────────────

/// Payload of `/Membership/ValidateUserWithCulture`.
#[derive(Debug, Deserialize)]
pub struct LoginResponse {
    #[serde(rename = "SecurityToken", default)]
    pub security_token: Option<String>,
}

// ── Devices ──────────────────────────────────────────────────────────

/// Payload of `/api/UserDeviceDetails`.
#[derive(Debug, Deserialize)]
pub struct DeviceDetailsResponse {
    #[serde(rename = "Devices", default)]
    pub devices: Vec<MyqDevice>,
}

/// A single device from the account listing. Only doors are interesting to
/// callers; gateways, structures and thermostats share the same shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MyqDevice {
    #[serde(rename = "MyQDeviceTypeId")]
    pub device_type_id: u32,
    #[serde(rename = "DeviceId", deserialize_with = "string_or_number")]
    pub device_id: String,
    #[serde(rename = "Attributes", default)]
    pub attributes: Vec<MyqAttribute>,
}

impl MyqDevice {
    pub fn is_door(&self) -> bool {
        self.device_type_id == DEVICE_TYPE_DOOR
    }

    /// Look up an attribute by its display name (`desc`, `doorstate`, ...).
    pub fn attribute(&self, name: &str) -> Option<&MyqAttribute> {
        self.attributes
            .iter()
            .find(|a| a.display_name.eq_ignore_ascii_case(name))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MyqAttribute {
    #[serde(rename = "AttributeDisplayName")]
    pub display_name: String,
    #[serde(rename = "Value", deserialize_with = "string_or_number")]
    pub value: String,
    /// Epoch milliseconds of the last change, when the attribute tracks one.
    #[serde(
        rename = "UpdatedTime",
        default,
        deserialize_with = "opt_string_or_number"
    )]
    pub updated_time: Option<String>,
}

/// Payload of `/Device/getDeviceAttribute`.
#[derive(Debug, Clone, Deserialize)]
pub struct AttributeResponse {
    #[serde(rename = "AttributeValue", deserialize_with = "string_or_number")]
    pub value: String,
    #[serde(
        rename = "UpdatedTime",
        default,
        deserialize_with = "opt_string_or_number"
    )]
    pub updated_time: Option<String>,
}

// ── Helpers ──────────────────────────────────────────────────────────

fn string_or_number<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    match Value::deserialize(d)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(de::Error::custom(format!(
            "expected string or number, got {other}"
        ))),
    }
}

fn opt_string_or_number<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    match Value::deserialize(d)? {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s)),
        Value::Number(n) => Ok(Some(n.to_string())),
        other => Err(de::Error::custom(format!(
            "expected string or number, got {other}"
        ))),
    }
}
