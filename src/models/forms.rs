use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub full_name: Option<String>,
}

// OAuth2 password-grant form. Only username and password take part in login.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub grant_type: Option<String>,
    #[serde(default)]
    pub scope: Option<String>,
    #[serde(default)]
    pub client_id: Option<String>,
    #[serde(default)]
    pub client_secret: Option<String>,
}

/// Body of a task submission. Unknown fields, including any attempt to set
/// an owner, are dropped during deserialization.
#[derive(Debug, Deserialize)]
pub struct TaskRequest {
    pub task_name: String,
    pub task_description: String,
    pub status: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn task_request_ignores_owner_field() {
        let body = r#"{"task_name":"a","task_description":"b","status":"open","owner_username":"mallory"}"#;
        let request: TaskRequest = serde_json::from_str(body).unwrap();
        assert_eq!(request.task_name, "a");
        assert_eq!(request.status, "open");
    }

    #[test]
    fn task_request_requires_every_field() {
        let body = r#"{"task_name":"a","status":"open"}"#;
        assert!(serde_json::from_str::<TaskRequest>(body).is_err());
    }

    #[test]
    fn oauth2_extras_are_optional() {
        let form: LoginForm = serde_json::from_str(r#"{"username":"bob","password":"pw"}"#).unwrap();
        assert!(form.grant_type.is_none());
        assert!(form.scope.is_none());
        assert!(form.client_id.is_none());
        assert!(form.client_secret.is_none());

        let form: LoginForm = serde_json::from_str(
            r#"{"username":"bob","password":"pw","scope":"me","client_secret":"s3cret"}"#,
        )
        .unwrap();
        assert_eq!(form.scope.as_deref(), Some("me"));
        assert_eq!(form.client_secret.as_deref(), Some("s3cret"));
    }

    #[test]
    fn full_name_is_optional() {
        let form: RegisterForm = serde_json::from_str(r#"{"username":"bob","password":"pw"}"#).unwrap();
        assert!(form.full_name.is_none());
    }
}
