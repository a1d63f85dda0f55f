//! Environment module
//!
//! The environment is the REPL's view of the remote service: it lists
//! packages, services, messages and RPCs, resolves names the operator types,
//! and performs calls. Commands only talk to the service through the
//! [`Environment`] trait.

pub mod catalog;
pub mod catalog_env;
pub mod listing;

use crate::config::Session;
use crate::error::Result;
use async_trait::async_trait;

// Re-exports
pub use catalog::{Catalog, Field, Message, Package, Rpc, Service};
pub use catalog_env::CatalogEnvironment;
pub use listing::Listing;

/// Schema introspection and call provider
///
/// Every method that depends on what the operator has selected takes the
/// current [`Session`]. Name lookups used for completion must be cheap and
/// never perform I/O.
#[async_trait]
pub trait Environment: Send + Sync {
    /// Data-source descriptor for the prompt; empty when there is none
    fn dsn(&self) -> String;

    /// All known packages
    fn packages(&self) -> Listing;

    /// Services of the selected package
    fn services(&self, session: &Session) -> Result<Listing>;

    /// Messages of the selected package
    fn messages(&self, session: &Session) -> Result<Listing>;

    /// RPCs of the selected service
    fn rpcs(&self, session: &Session) -> Result<Listing>;

    /// Resolve a package name, failing with `UnknownTarget` if it does not exist
    fn resolve_package(&self, name: &str) -> Result<String>;

    /// Resolve a service name to `(package, service)`
    ///
    /// Bare names are looked up in the selected package; fully-qualified
    /// names carry their own package.
    fn resolve_service(&self, session: &Session, name: &str) -> Result<(String, String)>;

    /// Structural detail of a message or service
    fn describe(&self, session: &Session, symbol: &str) -> Result<String>;

    /// Invoke an RPC of the selected service with a raw request body
    async fn call(&self, session: &Session, rpc: &str, body: &str) -> Result<String>;

    fn package_names(&self) -> Vec<String>;

    fn service_names(&self, session: &Session) -> Vec<String>;

    fn message_names(&self, session: &Session) -> Vec<String>;

    fn rpc_names(&self, session: &Session) -> Vec<String>;
}
