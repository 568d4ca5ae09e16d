//! Fixed-shape JSON envelope returned by every endpoint.

use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ApiResponse {
    pub succeed: bool,
    pub code: u16,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(rename = "accessToken", skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl ApiResponse {
    pub fn ok(status: &str, message: &str) -> Self {
        Self {
            succeed: true,
            code: 200,
            status: status.to_string(),
            message: Some(message.to_string()),
            access_token: None,
            data: None,
        }
    }

    pub fn with_token(status: &str, message: &str, access_token: String) -> Self {
        Self {
            access_token: Some(access_token),
            ..Self::ok(status, message)
        }
    }

    pub fn with_data(status: &str, data: serde_json::Value) -> Self {
        Self {
            succeed: true,
            code: 200,
            status: status.to_string(),
            message: None,
            access_token: None,
            data: Some(data),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_response_shape() {
        let body = serde_json::to_value(ApiResponse::with_token(
            "Login Successful",
            "User logged in successfully",
            "abc.def.ghi".to_string(),
        ))
        .unwrap();

        assert_eq!(body["succeed"], true);
        assert_eq!(body["code"], 200);
        assert_eq!(body["accessToken"], "abc.def.ghi");
        assert!(body.get("data").is_none());
    }

    #[test]
    fn test_absent_fields_are_omitted() {
        let body = serde_json::to_value(ApiResponse::ok("OK", "done")).unwrap();
        assert!(body.get("accessToken").is_none());
        assert!(body.get("data").is_none());
    }
}
