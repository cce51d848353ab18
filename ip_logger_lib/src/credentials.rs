use crate::error::AuthError;

pub const ADMIN_EMAIL: &str = "admin";
pub const ADMIN_PASSWORD: &str = "admin";

/// Decides whether an email/password pair may enter the admin dashboard.
pub trait CredentialVerifier {
    fn verify(&self, email: &str, password: &str) -> bool;
}

/// A single fixed credential pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticCredentials {
    email: String,
    password: String,
}

impl StaticCredentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

impl Default for StaticCredentials {
    fn default() -> Self {
        Self::new(ADMIN_EMAIL, ADMIN_PASSWORD)
    }
}

impl CredentialVerifier for StaticCredentials {
    fn verify(&self, email: &str, password: &str) -> bool {
        email == self.email && password == self.password
    }
}

pub fn check<V: CredentialVerifier + ?Sized>(verifier: &V, email: &str, password: &str) -> Result<(), AuthError> {
    if verifier.verify(email, password) {
        Ok(())
    } else {
        Err(AuthError::InvalidCredentials)
    }
}
