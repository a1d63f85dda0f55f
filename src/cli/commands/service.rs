use super::{required, suggestions, Command};
use crate::cli::completer::Suggestion;
use crate::config::{Session, SharedSession};
use crate::env::Environment;
use crate::error::Result;
use async_trait::async_trait;
use std::sync::Arc;

/// `service <name>`: make a service the active one
pub struct ServiceCommand {
    env: Arc<dyn Environment>,
    session: SharedSession,
}

impl ServiceCommand {
    pub fn new(env: Arc<dyn Environment>, session: SharedSession) -> Self {
        Self { env, session }
    }
}

#[async_trait]
impl Command for ServiceCommand {
    fn name(&self) -> &'static str {
        "service"
    }

    fn synopsis(&self) -> &'static str {
        "set the service as the current selected service"
    }

    fn help(&self) -> &'static str {
        "usage: service <service name>"
    }

    fn validate(&self, args: &[String]) -> Result<()> {
        required(args, "service name").map(|_| ())
    }

    async fn run(&self, args: &[String]) -> Result<String> {
        let name = required(args, "service name")?;

        let mut session = self.session.write().await;
        let (package, service) = self.env.resolve_service(&session, name)?;
        tracing::info!(%package, %service, "service selected");
        session.select_service(package, service);

        Ok(String::new())
    }

    fn candidates(&self, session: &Session, position: usize) -> Vec<Suggestion> {
        match position {
            0 => suggestions(self.env.service_names(session), "service"),
            _ => Vec::new(),
        }
    }
}
