use serde::{Deserialize, Serialize};

pub const AUTH_TOKEN_TYPE: &str = "auth";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Claims {
    #[serde(rename = "tokenType")]
    pub token_type: String,
    pub iss: String,
    pub sub: String,
    pub iat: i64,
    pub nbf: i64,
    pub exp: i64,
    pub jti: String,
    pub aud: Vec<String>,
}
