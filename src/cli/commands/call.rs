use super::{required, suggestions, Command};
use crate::cli::completer::Suggestion;
use crate::config::{Session, SharedSession};
use crate::env::Environment;
use crate::error::Result;
use async_trait::async_trait;
use std::sync::Arc;

/// `call <rpc> [body...]`: invoke an RPC of the selected service
///
/// Everything after the RPC name is re-joined with single spaces and handed
/// to the environment untouched; the environment owns body parsing.
pub struct CallCommand {
    env: Arc<dyn Environment>,
    session: SharedSession,
}

impl CallCommand {
    pub fn new(env: Arc<dyn Environment>, session: SharedSession) -> Self {
        Self { env, session }
    }
}

#[async_trait]
impl Command for CallCommand {
    fn name(&self) -> &'static str {
        "call"
    }

    fn synopsis(&self) -> &'static str {
        "call a RPC"
    }

    fn help(&self) -> &'static str {
        "usage: call <RPC name> [JSON request body]"
    }

    fn validate(&self, args: &[String]) -> Result<()> {
        required(args, "RPC name").map(|_| ())
    }

    async fn run(&self, args: &[String]) -> Result<String> {
        let rpc = required(args, "RPC name")?;
        let body = args[1..].join(" ");

        // Snapshot so the session is not locked for the whole call.
        let session = self.session.read().await.clone();
        tracing::debug!(%rpc, "calling");
        self.env.call(&session, rpc, &body).await
    }

    fn candidates(&self, session: &Session, position: usize) -> Vec<Suggestion> {
        match position {
            0 => suggestions(self.env.rpc_names(session), "rpc"),
            _ => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::commands::testing::{args, fixture};
    use crate::error::ReplError;

    #[tokio::test]
    async fn test_call_passes_body_through() {
        let (env, session) = fixture();
        session
            .write()
            .await
            .select_service("helloworld".to_string(), "Greeter".to_string());

        let cmd = CallCommand::new(env, session);
        let output = cmd
            .run(&args(&["SayHello", "{\"name\":", "\"a", "b\"}"]))
            .await
            .unwrap();
        assert!(output.starts_with("helloworld.Greeter/SayHello\n"));
        assert!(output.contains("\"a b\""));
    }

    #[tokio::test]
    async fn test_call_surfaces_environment_errors() {
        let (env, session) = fixture();
        let cmd = CallCommand::new(env, session);

        assert!(matches!(
            cmd.run(&args(&["SayHello"])).await,
            Err(ReplError::PackageUnselected)
        ));
        assert!(matches!(cmd.validate(&[]), Err(ReplError::ArgumentRequired(_))));
    }
}
