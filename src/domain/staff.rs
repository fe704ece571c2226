//! Staff identity and the login exchange.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stands in for secrets in `Debug` output, which can reach the trace file.
pub const REDACTED: &str = "<redacted>";

/// The signed-in store employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Staff {
    pub staff_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub active: i64,
}

impl Staff {
    #[must_use]
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Body of `POST /auth/login`.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// Successful answer to `POST /auth/login`.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub message: String,
    pub token: String,
    pub staff: Staff,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &REDACTED)
            .finish()
    }
}

impl fmt::Debug for LoginResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginResponse")
            .field("message", &self.message)
            .field("token", &REDACTED)
            .field("staff", &self.staff)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_output_hides_secrets() {
        let credentials = Credentials {
            username: "Mike".into(),
            password: "hunter2".into(),
        };
        let shown = format!("{credentials:?}");
        assert!(shown.contains("Mike"));
        assert!(!shown.contains("hunter2"));

        let login = LoginResponse {
            message: "Login successful".into(),
            token: "tok-secret".into(),
            staff: Staff {
                staff_id: 1,
                first_name: "Mike".into(),
                last_name: "Hillyer".into(),
                username: "Mike".into(),
                active: 1,
            },
        };
        assert!(!format!("{login:?}").contains("tok-secret"));
    }
}
