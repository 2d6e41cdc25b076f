use serde_json::Value;
use std::collections::BTreeMap;

use super::ApiClient;
use crate::models::User;

/// Route the sign-up form moves to on success
pub const SIGN_IN_ROUTE: &str = "/sign-in";
/// Route the sign-in form moves to on success
pub const HOME_ROUTE: &str = "/";

/// Controlled form state shared by the auth forms
#[derive(Debug, Clone, Default)]
pub struct FormState {
    /// Field id to current value
    pub fields: BTreeMap<String, String>,
    pub loading: bool,
    pub error: Option<String>,
}

impl FormState {
    pub fn handle_change(&mut self, id: &str, value: &str) {
        self.fields.insert(id.to_string(), value.to_string());
    }

    /// Post the fields; `Some(body)` only when the call succeeded
    async fn submit_to(&mut self, client: &ApiClient, path: &str) -> Option<Value> {
        self.loading = true;
        self.error = None;

        let result = client.post_json(path, &self.fields).await;
        self.loading = false;

        match result {
            Err(e) => {
                self.error = Some(e.to_string());
                None
            }
            Ok(body) if body.get("success") == Some(&Value::Bool(false)) => {
                let message = body
                    .get("message")
                    .and_then(Value::as_str)
                    .unwrap_or("Request failed");
                self.error = Some(message.to_string());
                None
            }
            Ok(body) => Some(body),
        }
    }
}

/// Sign-up form: username, email, password
#[derive(Debug, Clone, Default)]
pub struct SignUpForm {
    pub state: FormState,
}

impl SignUpForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handle_change(&mut self, id: &str, value: &str) {
        self.state.handle_change(id, value);
    }

    /// Returns the route to navigate to, or `None` when the form shows an error
    pub async fn submit(&mut self, client: &ApiClient) -> Option<&'static str> {
        self.state
            .submit_to(client, "/api/auth/signup")
            .await
            .map(|_| SIGN_IN_ROUTE)
    }
}

/// Sign-in form: email, password
#[derive(Debug, Clone, Default)]
pub struct SignInForm {
    pub state: FormState,
    /// User returned by a successful sign-in
    pub current_user: Option<User>,
}

impl SignInForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handle_change(&mut self, id: &str, value: &str) {
        self.state.handle_change(id, value);
    }

    pub async fn submit(&mut self, client: &ApiClient) -> Option<&'static str> {
        let body = self.state.submit_to(client, "/api/auth/signin").await?;

        match serde_json::from_value::<User>(body) {
            Ok(user) => {
                self.current_user = Some(user);
                Some(HOME_ROUTE)
            }
            Err(e) => {
                self.state.error = Some(e.to_string());
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handle_change_overwrites_field() {
        let mut form = SignUpForm::new();
        form.handle_change("email", "a@example.com");
        form.handle_change("email", "b@example.com");
        form.handle_change("username", "bee");

        assert_eq!(form.state.fields.len(), 2);
        assert_eq!(form.state.fields["email"], "b@example.com");
        assert!(!form.state.loading);
        assert!(form.state.error.is_none());
    }

    #[tokio::test]
    async fn test_transport_failure_sets_error() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = ApiClient::new(format!("http://{}", addr)).unwrap();
        let mut form = SignInForm::new();
        form.handle_change("email", "a@example.com");

        let route = form.submit(&client).await;

        assert!(route.is_none());
        assert!(form.state.error.is_some());
        assert!(!form.state.loading);
        assert!(form.current_user.is_none());
    }
}
