//! Signed-in recruiter state.

use crate::api::{ApiClient, Transport};
use crate::domain::{RegisterRequest, User};
use crate::error::AppError;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    user: Option<User>,
}

impl Session {
    /// Resolve the stored token into a user.
    ///
    /// No token means signed out. A token the server rejects (or any other
    /// failure of `me`) is discarded and the session starts signed out.
    pub fn load<T: Transport>(client: &ApiClient<T>) -> Self {
        if !client.has_token() {
            return Self::default();
        }
        match client.me() {
            Ok(user) => Self { user: Some(user) },
            Err(err) => {
                tracing::warn!(error = %err, "stored token rejected; signing out");
                if let Err(clear_err) = client.logout() {
                    tracing::warn!(error = %clear_err, "could not clear stored token");
                }
                Self::default()
            }
        }
    }

    pub fn login<T: Transport>(
        &mut self,
        client: &ApiClient<T>,
        email: &str,
        password: &str,
    ) -> Result<&User, AppError> {
        let auth = client.login(email, password)?;
        Ok(self.user.insert(auth.user))
    }

    pub fn register<T: Transport>(
        &mut self,
        client: &ApiClient<T>,
        email: &str,
        password: &str,
        full_name: &str,
    ) -> Result<&User, AppError> {
        let request = RegisterRequest {
            email: email.to_string(),
            password: password.to_string(),
            full_name: full_name.to_string(),
        };
        let auth = client.register(&request)?;
        Ok(self.user.insert(auth.user))
    }

    pub fn logout<T: Transport>(&mut self, client: &ApiClient<T>) -> Result<(), AppError> {
        self.user = None;
        client.logout()
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn is_signed_in(&self) -> bool {
        self.user.is_some()
    }

    /// The user, or the error every recruiter-only command reports.
    pub fn require_user(&self) -> Result<&User, AppError> {
        self.user.as_ref().ok_or_else(|| {
            AppError::new(
                crate::error::EXIT_LOCAL,
                "Not signed in. Run `sr login` first.",
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::testing::*;

    const USER_JSON: &str =
        r#"{"id": 1, "email": "hr@example.com", "full_name": "HR", "role": "recruiter"}"#;

    #[test]
    fn no_token_means_no_request() {
        let client = client();
        let session = Session::load(&client);
        assert!(!session.is_signed_in());
        assert_eq!(client.transport().request_count(), 0);
    }

    #[test]
    fn valid_token_loads_user() {
        let client = authed_client("jwt");
        client.transport().push_json(200, USER_JSON);
        let session = Session::load(&client);
        assert_eq!(session.user().map(|u| u.email.as_str()), Some("hr@example.com"));
    }

    #[test]
    fn rejected_token_is_cleared() {
        let client = authed_client("expired");
        client
            .transport()
            .push_json(401, r#"{"detail": "Token tidak valid"}"#);
        let session = Session::load(&client);
        assert!(!session.is_signed_in());
        assert!(!client.has_token());
        assert!(session.require_user().is_err());
    }

    #[test]
    fn register_then_logout() {
        let client = client();
        client.transport().push_json(
            200,
            &format!(r#"{{"access_token": "jwt-9", "user": {USER_JSON}}}"#),
        );
        let mut session = Session::default();
        session
            .register(&client, "hr@example.com", "secret", "HR")
            .unwrap();
        assert!(session.is_signed_in());
        assert_eq!(client.token().as_deref(), Some("jwt-9"));

        session.logout(&client).unwrap();
        assert!(!session.is_signed_in());
        assert_eq!(client.token(), None);
    }
}
