/// Request and response shapes shared by the gateway routes and the client

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// POST /api/auth/login body
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub account_id: Option<String>,
    pub password: Option<String>,
}

/// Token pair returned by the backend on login
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenData {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
}

/// POST /api/auth/signup body. Fields beyond the required ones are forwarded
/// to the backend untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    pub account_id: Option<String>,
    pub password: Option<String>,
    pub business_number: Option<String>,
    pub store_name: Option<String>,
    pub owner_name: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SignupRequest {
    pub const REQUIRED: [&'static str; 5] = ["accountId", "password", "businessNumber", "storeName", "ownerName"];
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckIdQuery {
    pub account_id: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountAvailability {
    pub available: bool,
}

impl AccountAvailability {
    /// The backend answers either a bare boolean or `{ "available": bool }`
    pub fn from_backend(data: Option<&Value>) -> Option<Self> {
        match data? {
            Value::Bool(available) => Some(Self { available: *available }),
            Value::Object(map) => map
                .get("available")
                .and_then(Value::as_bool)
                .map(|available| Self { available }),
            _ => None,
        }
    }
}

/// POST /api/merchant/qr body
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateQrRequest {
    pub table_id: Option<TableId>,
}

/// Table identifier as the backend sends it: a number or a string
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TableId {
    Number(i64),
    Text(String),
}

impl TableId {
    /// Key for matching ids across lists: `1` and `"1"` name the same table
    pub fn join_key(&self) -> String {
        match self {
            TableId::Number(n) => n.to_string(),
            TableId::Text(s) => s.trim().to_string(),
        }
    }
}

impl std::fmt::Display for TableId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TableId::Number(n) => write!(f, "{}", n),
            TableId::Text(s) => f.write_str(s),
        }
    }
}

/// Command-line and path input: digits become a number, anything else text
impl std::str::FromStr for TableId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.parse::<i64>() {
            Ok(n) => TableId::Number(n),
            Err(_) => TableId::Text(s.to_string()),
        })
    }
}

/// Dining table as listed by `GET /merchant/tables`. Only the id is read;
/// every other field is passed through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiningTable {
    pub table_id: TableId,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// QR record as listed by `GET /merchant/qr`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QrCode {
    pub table_id: TableId,
    #[serde(default)]
    pub qr_id: Option<Value>,
    #[serde(default)]
    pub qr_code_url: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// A table joined with its QR code, if it has one
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableQr {
    pub table_id: TableId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qr_id: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qr_code_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    /// Table fields (`tableNumber`, `capacity`, ...), passed through
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
