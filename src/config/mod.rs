//! Configuration module
//!
//! This module handles configuration management and the mutable
//! session state shared between commands and the completer.

pub mod storage;

use std::sync::Arc;
use tokio::sync::RwLock;

/// Session state
///
/// Describes the connection target and what the operator has selected.
/// Commands mutate it through the accessors below while holding the write
/// lock, so a reader never observes a half-applied selection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    /// Server host
    pub host: String,
    /// Server port
    pub port: String,
    package: Option<String>,
    service: Option<String>,
}

impl Session {
    /// Create a new session for a connection target
    pub fn new(host: impl Into<String>, port: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port: port.into(),
            package: None,
            service: None,
        }
    }

    /// Get the selected package
    pub fn package(&self) -> Option<&str> {
        self.package.as_deref()
    }

    /// Get the selected service
    pub fn service(&self) -> Option<&str> {
        self.service.as_deref()
    }

    /// Select a package; the selected service no longer applies
    pub fn select_package(&mut self, package: String) {
        self.package = Some(package);
        self.service = None;
    }

    /// Select a service together with the package that owns it
    pub fn select_service(&mut self, package: String, service: String) {
        self.package = Some(package);
        self.service = Some(service);
    }

    /// Build the prompt string, decorated with the DSN when one is active
    pub fn prompt(&self, dsn: &str) -> String {
        let prompt = format!("{}:{}> ", self.host, self.port);
        if dsn.is_empty() {
            prompt
        } else {
            format!("{}@{}", dsn, prompt)
        }
    }
}

/// Shared session state
pub type SharedSession = Arc<RwLock<Session>>;

/// Create a new shared session for a connection target
pub fn create_shared_session(host: impl Into<String>, port: impl Into<String>) -> SharedSession {
    Arc::new(RwLock::new(Session::new(host, port)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_without_dsn() {
        let session = Session::new("localhost", "50051");
        assert_eq!(session.prompt(""), "localhost:50051> ");
    }

    #[test]
    fn test_prompt_with_dsn() {
        let session = Session::new("localhost", "50051");
        assert_eq!(session.prompt("mydb"), "mydb@localhost:50051> ");
    }

    #[test]
    fn test_select_package_clears_service() {
        let mut session = Session::new("localhost", "50051");
        session.select_service("api".to_string(), "Greeter".to_string());
        assert_eq!(session.service(), Some("Greeter"));

        session.select_package("admin".to_string());
        assert_eq!(session.package(), Some("admin"));
        assert_eq!(session.service(), None);
    }

    #[tokio::test]
    async fn test_shared_session() {
        let session = create_shared_session("127.0.0.1", "9000");
        {
            let mut guard = session.write().await;
            guard.select_package("api".to_string());
        }
        let guard = session.read().await;
        assert_eq!(guard.package(), Some("api"));
        assert_eq!(guard.host, "127.0.0.1");
    }
}
