use super::{required, Command};
use crate::cli::completer::Suggestion;
use crate::config::{Session, SharedSession};
use crate::env::Environment;
use crate::error::{Result, ReplError};
use async_trait::async_trait;
use std::sync::Arc;

/// What `show` can list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShowTarget {
    Package,
    Service,
    Message,
    Rpc,
}

impl ShowTarget {
    /// Parse a target keyword; case-insensitive, short aliases accepted
    pub fn parse(keyword: &str) -> Option<Self> {
        match keyword.to_lowercase().as_str() {
            "p" | "package" | "packages" => Some(Self::Package),
            "s" | "svc" | "service" | "services" => Some(Self::Service),
            "m" | "msg" | "message" | "messages" => Some(Self::Message),
            "a" | "r" | "rpc" | "rpcs" | "api" => Some(Self::Rpc),
            _ => None,
        }
    }

    fn keyword(self) -> &'static str {
        match self {
            Self::Package => "package",
            Self::Service => "service",
            Self::Message => "message",
            Self::Rpc => "rpc",
        }
    }
}

/// `show <target>`: list packages, services, messages or RPCs
pub struct ShowCommand {
    env: Arc<dyn Environment>,
    session: SharedSession,
}

impl ShowCommand {
    pub fn new(env: Arc<dyn Environment>, session: SharedSession) -> Self {
        Self { env, session }
    }
}

#[async_trait]
impl Command for ShowCommand {
    fn name(&self) -> &'static str {
        "show"
    }

    fn synopsis(&self) -> &'static str {
        "show package, service, message or RPC names"
    }

    fn help(&self) -> &'static str {
        "usage: show <package | service | message | rpc>"
    }

    fn validate(&self, args: &[String]) -> Result<()> {
        required(args, "target type (package, service, message, rpc)").map(|_| ())
    }

    async fn run(&self, args: &[String]) -> Result<String> {
        let keyword = required(args, "target type (package, service, message, rpc)")?;
        let target =
            ShowTarget::parse(keyword).ok_or_else(|| ReplError::UnknownTarget(keyword.to_string()))?;

        let session = self.session.read().await;
        let listing = match target {
            ShowTarget::Package => self.env.packages(),
            ShowTarget::Service => self.env.services(&session)?,
            ShowTarget::Message => self.env.messages(&session)?,
            ShowTarget::Rpc => self.env.rpcs(&session)?,
        };

        Ok(listing.to_string())
    }

    fn candidates(&self, _session: &Session, position: usize) -> Vec<Suggestion> {
        if position != 0 {
            return Vec::new();
        }

        [
            ShowTarget::Package,
            ShowTarget::Service,
            ShowTarget::Message,
            ShowTarget::Rpc,
        ]
        .into_iter()
        .map(|target| Suggestion::new(target.keyword(), "target"))
        .collect()
    }
}
