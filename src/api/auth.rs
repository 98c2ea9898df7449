use super::{decode, ApiClient, ApiRequest, Transport};
use crate::domain::{AuthResponse, LoginRequest, RegisterRequest, User};
use crate::error::AppError;

impl<T: Transport> ApiClient<T> {
    /// `POST /api/auth/login`; stores the returned token.
    pub fn login(&self, email: &str, password: &str) -> Result<AuthResponse, AppError> {
        let body = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let resp = self.send_public(ApiRequest::post("/api/auth/login").json(&body)?)?;
        self.accept_auth(decode(&resp)?)
    }

    /// `POST /api/auth/register`; stores the returned token.
    pub fn register(&self, request: &RegisterRequest) -> Result<AuthResponse, AppError> {
        let resp = self.send_public(ApiRequest::post("/api/auth/register").json(request)?)?;
        self.accept_auth(decode(&resp)?)
    }

    /// `POST /api/auth/refresh`; replaces the stored token.
    pub fn refresh_token(&self) -> Result<AuthResponse, AppError> {
        let resp = self.send_authed(ApiRequest::post("/api/auth/refresh"))?;
        self.accept_auth(decode(&resp)?)
    }

    /// `GET /api/auth/me`
    pub fn me(&self) -> Result<User, AppError> {
        decode(&self.send_authed(ApiRequest::get("/api/auth/me"))?)
    }

    /// Forget the stored token. Purely local; the API has no logout endpoint.
    pub fn logout(&self) -> Result<(), AppError> {
        self.clear_token()
    }

    fn accept_auth(&self, auth: AuthResponse) -> Result<AuthResponse, AppError> {
        self.store_token(&auth.access_token)?;
        tracing::info!(user = %auth.user.email, "signed in");
        Ok(auth)
    }
}
