use serde::Serialize;

/// Body returned after registration.
#[derive(Debug, Serialize)]
pub struct CreatedUser {
    pub user_id: i64,
}

/// Body returned after login; `session_token` is the opaque bearer token
/// for the `X-Authorization` header.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub user_id: i64,
    pub session_token: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_response_serialization() {
        let response = LoginResponse {
            user_id: 7,
            session_token: "tok".into(),
        };
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"user_id\":7"));
        assert!(json.contains("\"session_token\":\"tok\""));
    }
}
