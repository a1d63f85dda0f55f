//! Catalog data structures
//!
//! This module defines the in-memory description of a remote service:
//! packages, their messages and services, and the RPCs each service exposes.

use crate::error::{Result, ReplError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// A field of a message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    /// Field name
    pub name: String,
    /// Field type (scalar name or message name)
    #[serde(rename = "type")]
    pub field_type: String,
    /// Field number
    #[serde(default)]
    pub number: u32,
    /// Whether this is a repeated field
    #[serde(default)]
    pub repeated: bool,
}

impl Field {
    /// The value a request carries when the field is left out
    pub fn default_value(&self) -> serde_json::Value {
        if self.repeated {
            return serde_json::Value::Array(Vec::new());
        }
        scalar_default(&self.field_type)
            .unwrap_or_else(|| serde_json::Value::Object(serde_json::Map::new()))
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.repeated {
            write!(f, "repeated ")?;
        }
        write!(f, "{} {} = {}", self.field_type, self.name, self.number)
    }
}

fn scalar_default(field_type: &str) -> Option<serde_json::Value> {
    use serde_json::Value;

    match field_type {
        "string" | "bytes" => Some(Value::String(String::new())),
        "bool" => Some(Value::Bool(false)),
        "double" | "float" | "int32" | "int64" | "uint32" | "uint64" | "sint32" | "sint64"
        | "fixed32" | "fixed64" | "sfixed32" | "sfixed64" => Some(Value::from(0)),
        _ => None,
    }
}

/// A message type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Message name
    pub name: String,
    /// Message fields
    #[serde(default)]
    pub fields: Vec<Field>,
}

impl Message {
    /// Get a field by name
    pub fn get_field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// A remote method
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rpc {
    /// Method name
    pub name: String,
    /// Request message type
    pub request: String,
    /// Response message type
    pub response: String,
    #[serde(default)]
    pub client_streaming: bool,
    #[serde(default)]
    pub server_streaming: bool,
}

impl Rpc {
    /// Request type as written in a signature (`stream Foo` for streams)
    pub fn request_signature(&self) -> String {
        signature(&self.request, self.client_streaming)
    }

    /// Response type as written in a signature
    pub fn response_signature(&self) -> String {
        signature(&self.response, self.server_streaming)
    }
}

fn signature(type_name: &str, streaming: bool) -> String {
    if streaming {
        format!("stream {}", type_name)
    } else {
        type_name.to_string()
    }
}

/// A service and its methods
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Service {
    /// Service name
    pub name: String,
    /// Service methods
    #[serde(default)]
    pub rpcs: Vec<Rpc>,
}

impl Service {
    /// Get a method by name
    pub fn get_rpc(&self, name: &str) -> Option<&Rpc> {
        self.rpcs.iter().find(|r| r.name == name)
    }
}

/// A package: the namespace for messages and services
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Package {
    /// Package name (e.g. "helloworld", "api.v1")
    pub name: String,
    #[serde(default)]
    pub messages: Vec<Message>,
    #[serde(default)]
    pub services: Vec<Service>,
}

impl Package {
    /// Create an empty package
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            messages: Vec::new(),
            services: Vec::new(),
        }
    }

    /// Get a message by its local or fully-qualified name
    pub fn get_message(&self, name: &str) -> Option<&Message> {
        let local = self.local_name(name);
        self.messages.iter().find(|m| m.name == local)
    }

    /// Get a service by its local or fully-qualified name
    pub fn get_service(&self, name: &str) -> Option<&Service> {
        let local = self.local_name(name);
        self.services.iter().find(|s| s.name == local)
    }

    fn local_name<'a>(&self, name: &'a str) -> &'a str {
        name.strip_prefix(self.name.as_str())
            .and_then(|rest| rest.strip_prefix('.'))
            .unwrap_or(name)
    }
}

/// Complete service description
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub packages: Vec<Package>,
}

impl Catalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a catalog from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read a catalog from a JSON file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Get a package by name
    pub fn get_package(&self, name: &str) -> Option<&Package> {
        self.packages.iter().find(|p| p.name == name)
    }

    /// Split a fully-qualified name into a known package and the remainder
    ///
    /// Package names may themselves contain dots, so the longest matching
    /// package wins.
    pub fn split_qualified<'a>(&self, name: &'a str) -> Option<(&Package, &'a str)> {
        self.packages
            .iter()
            .filter_map(|p| {
                name.strip_prefix(p.name.as_str())
                    .and_then(|rest| rest.strip_prefix('.'))
                    .map(|rest| (p, rest))
            })
            .max_by_key(|(p, _)| p.name.len())
    }
}

#[cfg(test)]
pub(crate) fn greeter_catalog() -> Catalog {
    Catalog::from_json(
        r#"{
            "packages": [
                {
                    "name": "helloworld",
                    "messages": [
                        {
                            "name": "HelloRequest",
                            "fields": [
                                { "name": "name", "type": "string", "number": 1 },
                                { "name": "tags", "type": "string", "number": 2, "repeated": true }
                            ]
                        },
                        {
                            "name": "HelloReply",
                            "fields": [{ "name": "message", "type": "string", "number": 1 }]
                        }
                    ],
                    "services": [
                        {
                            "name": "Greeter",
                            "rpcs": [
                                { "name": "SayHello", "request": "HelloRequest", "response": "HelloReply" },
                                {
                                    "name": "SayHelloStream",
                                    "request": "HelloRequest",
                                    "response": "HelloReply",
                                    "server_streaming": true
                                }
                            ]
                        },
                        { "name": "Search", "rpcs": [] }
                    ]
                },
                {
                    "name": "helloworld.admin",
                    "messages": [
                        {
                            "name": "Ban",
                            "fields": [
                                { "name": "user", "type": "helloworld.HelloRequest", "number": 1 },
                                { "name": "days", "type": "int32", "number": 2 },
                                { "name": "permanent", "type": "bool", "number": 3 }
                            ]
                        }
                    ],
                    "services": [
                        {
                            "name": "Moderation",
                            "rpcs": [{ "name": "BanUser", "request": "Ban", "response": "helloworld.HelloReply" }]
                        }
                    ]
                }
            ]
        }"#,
    )
    .expect("fixture catalog is valid JSON")
}
