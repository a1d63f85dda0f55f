//! Catalog-backed environment
//!
//! Implements [`Environment`] over an in-memory [`Catalog`]. Calls are dry
//! runs: the request is checked against the request message, completed with
//! default values, and echoed back instead of being sent.

use crate::config::Session;
use crate::env::catalog::{Catalog, Message, Package, Service};
use crate::env::listing::Listing;
use crate::env::Environment;
use crate::error::{Result, ReplError};
use async_trait::async_trait;
use serde_json::{Map, Value};

/// Environment backed by a static catalog
#[derive(Debug, Clone, Default)]
pub struct CatalogEnvironment {
    catalog: Catalog,
    dsn: String,
}

impl CatalogEnvironment {
    /// Create an environment over a catalog
    pub fn new(catalog: Catalog, dsn: impl Into<String>) -> Self {
        Self {
            catalog,
            dsn: dsn.into(),
        }
    }

    fn current_package(&self, session: &Session) -> Result<&Package> {
        let name = session.package().ok_or(ReplError::PackageUnselected)?;
        self.catalog
            .get_package(name)
            .ok_or_else(|| ReplError::UnknownTarget(name.to_string()))
    }

    fn current_service(&self, session: &Session) -> Result<(&Package, &Service)> {
        let package = self.current_package(session)?;
        let name = session.service().ok_or(ReplError::ServiceUnselected)?;
        let service = package
            .get_service(name)
            .ok_or_else(|| ReplError::UnknownTarget(name.to_string()))?;
        Ok((package, service))
    }

    /// Pick the package a symbol lives in, plus its local name
    fn scope<'a>(&self, session: &Session, symbol: &'a str) -> Result<(&Package, &'a str)> {
        match self.catalog.split_qualified(symbol) {
            Some(scoped) => Ok(scoped),
            None => Ok((self.current_package(session)?, symbol)),
        }
    }

    fn request_message<'a>(&'a self, package: &'a Package, type_name: &str) -> Option<&'a Message> {
        self.catalog
            .split_qualified(type_name)
            .and_then(|(owner, local)| owner.get_message(local))
            .or_else(|| package.get_message(type_name))
    }

    fn describe_message(message: &Message) -> String {
        let mut listing = Listing::new(["field", "type", "number"]);
        for field in &message.fields {
            let field_type = if field.repeated {
                format!("repeated {}", field.field_type)
            } else {
                field.field_type.clone()
            };
            listing.push_row([field.name.clone(), field_type, field.number.to_string()]);
        }
        format!("message {}\n{}", message.name, listing)
    }

    fn describe_service(service: &Service) -> String {
        format!("service {}\n{}", service.name, rpc_listing(service))
    }
}

fn rpc_listing(service: &Service) -> Listing {
    let mut listing = Listing::new(["rpc", "request", "response"]);
    for rpc in &service.rpcs {
        listing.push_row([
            rpc.name.clone(),
            rpc.request_signature(),
            rpc.response_signature(),
        ]);
    }
    listing
}

#[async_trait]
impl Environment for CatalogEnvironment {
    fn dsn(&self) -> String {
        self.dsn.clone()
    }

    fn packages(&self) -> Listing {
        let mut listing = Listing::new(["package"]);
        for package in &self.catalog.packages {
            listing.push_row([package.name.as_str()]);
        }
        listing
    }

    fn services(&self, session: &Session) -> Result<Listing> {
        let package = self.current_package(session)?;
        let mut listing = Listing::new(["service", "rpcs"]);
        for service in &package.services {
            listing.push_row([service.name.clone(), service.rpcs.len().to_string()]);
        }
        Ok(listing)
    }

    fn messages(&self, session: &Session) -> Result<Listing> {
        let package = self.current_package(session)?;
        let mut listing = Listing::new(["message", "fields"]);
        for message in &package.messages {
            listing.push_row([message.name.clone(), message.fields.len().to_string()]);
        }
        Ok(listing)
    }

    fn rpcs(&self, session: &Session) -> Result<Listing> {
        let (_, service) = self.current_service(session)?;
        Ok(rpc_listing(service))
    }

    fn resolve_package(&self, name: &str) -> Result<String> {
        self.catalog
            .get_package(name)
            .map(|p| p.name.clone())
            .ok_or_else(|| ReplError::UnknownTarget(name.to_string()))
    }

    fn resolve_service(&self, session: &Session, name: &str) -> Result<(String, String)> {
        if let Some((package, local)) = self.catalog.split_qualified(name) {
            return package
                .get_service(local)
                .map(|service| (package.name.clone(), service.name.clone()))
                .ok_or_else(|| ReplError::UnknownTarget(name.to_string()));
        }

        let package = self.current_package(session)?;
        package
            .get_service(name)
            .map(|service| (package.name.clone(), service.name.clone()))
            .ok_or_else(|| ReplError::UnknownTarget(name.to_string()))
    }

    fn describe(&self, session: &Session, symbol: &str) -> Result<String> {
        let (package, local) = self.scope(session, symbol)?;

        if let Some(message) = package.get_message(local) {
            return Ok(Self::describe_message(message));
        }
        if let Some(service) = package.get_service(local) {
            return Ok(Self::describe_service(service));
        }

        Err(ReplError::UnknownTarget(symbol.to_string()))
    }

    async fn call(&self, session: &Session, rpc: &str, body: &str) -> Result<String> {
        let (package, service) = self.current_service(session)?;
        let method = service
            .get_rpc(rpc)
            .ok_or_else(|| ReplError::UnknownTarget(rpc.to_string()))?;
        let message = self.request_message(package, &method.request).ok_or_else(|| {
            ReplError::InvalidRequest(format!("request type {} is not described", method.request))
        })?;

        let mut request = if body.trim().is_empty() {
            Map::new()
        } else {
            match serde_json::from_str::<Value>(body) {
                Ok(Value::Object(fields)) => fields,
                Ok(_) => {
                    return Err(ReplError::InvalidRequest(
                        "request body must be a JSON object".to_string(),
                    ))
                }
                Err(e) => return Err(ReplError::InvalidRequest(e.to_string())),
            }
        };

        if let Some(unknown) = request.keys().find(|key| message.get_field(key).is_none()) {
            return Err(ReplError::InvalidRequest(format!(
                "{}: no such field in {}",
                unknown, message.name
            )));
        }

        for field in &message.fields {
            request
                .entry(field.name.clone())
                .or_insert_with(|| field.default_value());
        }

        let full_method = format!("{}.{}/{}", package.name, service.name, method.name);
        tracing::info!(method = %full_method, "dry-run call");

        Ok(format!(
            "{}\n{}",
            full_method,
            serde_json::to_string_pretty(&Value::Object(request))?
        ))
    }

    fn package_names(&self) -> Vec<String> {
        self.catalog.packages.iter().map(|p| p.name.clone()).collect()
    }

    fn service_names(&self, session: &Session) -> Vec<String> {
        self.current_package(session)
            .map(|p| p.services.iter().map(|s| s.name.clone()).collect())
            .unwrap_or_default()
    }

    fn message_names(&self, session: &Session) -> Vec<String> {
        self.current_package(session)
            .map(|p| p.messages.iter().map(|m| m.name.clone()).collect())
            .unwrap_or_default()
    }

    fn rpc_names(&self, session: &Session) -> Vec<String> {
        self.current_service(session)
            .map(|(_, s)| s.rpcs.iter().map(|r| r.name.clone()).collect())
            .unwrap_or_default()
    }
}
