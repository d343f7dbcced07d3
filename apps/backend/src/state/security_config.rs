use std::fmt;
use std::time::Duration;

use jsonwebtoken::Algorithm;

use crate::config::app::RuntimeEnv;

/// Session tokens live for seven days.
pub const SESSION_TTL: Duration = Duration::from_secs(7 * 24 * 60 * 60);

/// Configuration for session token signing and cookie delivery
#[derive(Clone)]
pub struct SecurityConfig {
    /// Secret key for signing and verifying session tokens
    pub jwt_secret: Vec<u8>,
    /// JWT algorithm to use (defaults to HS256)
    pub algorithm: Algorithm,
    /// Lifetime of a freshly minted session token
    pub session_ttl: Duration,
    /// Controls the `Secure` and `SameSite` cookie attributes
    pub runtime_env: RuntimeEnv,
}

impl SecurityConfig {
    /// Create a new SecurityConfig with the given JWT secret
    pub fn new(jwt_secret: impl Into<Vec<u8>>) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
            algorithm: Algorithm::HS256,
            session_ttl: SESSION_TTL,
            runtime_env: RuntimeEnv::Development,
        }
    }

    pub fn with_runtime_env(mut self, runtime_env: RuntimeEnv) -> Self {
        self.runtime_env = runtime_env;
        self
    }

    pub fn is_production(&self) -> bool {
        self.runtime_env == RuntimeEnv::Production
    }
}

impl fmt::Debug for SecurityConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecurityConfig")
            .field("jwt_secret", &"<redacted>")
            .field("algorithm", &self.algorithm)
            .field("session_ttl", &self.session_ttl)
            .field("runtime_env", &self.runtime_env)
            .finish()
    }
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self::new(b"default_secret_for_tests_only".to_vec())
    }
}
