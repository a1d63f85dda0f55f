use super::{required, suggestions, Command};
use crate::cli::completer::Suggestion;
use crate::config::{Session, SharedSession};
use crate::env::Environment;
use crate::error::Result;
use async_trait::async_trait;
use std::sync::Arc;

/// `desc <symbol>`: show the structure of a message or service
pub struct DescCommand {
    env: Arc<dyn Environment>,
    session: SharedSession,
}

impl DescCommand {
    pub fn new(env: Arc<dyn Environment>, session: SharedSession) -> Self {
        Self { env, session }
    }
}

#[async_trait]
impl Command for DescCommand {
    fn name(&self) -> &'static str {
        "desc"
    }

    fn aliases(&self) -> &'static [&'static str] {
        &["describe"]
    }

    fn synopsis(&self) -> &'static str {
        "describe the structure of a message or service"
    }

    fn help(&self) -> &'static str {
        "usage: desc <message or service name>"
    }

    fn validate(&self, args: &[String]) -> Result<()> {
        required(args, "message or service name").map(|_| ())
    }

    async fn run(&self, args: &[String]) -> Result<String> {
        let symbol = required(args, "message or service name")?;
        let session = self.session.read().await;
        self.env.describe(&session, symbol)
    }

    fn candidates(&self, session: &Session, position: usize) -> Vec<Suggestion> {
        if position != 0 {
            return Vec::new();
        }

        let mut candidates = suggestions(self.env.message_names(session), "message");
        candidates.extend(suggestions(self.env.service_names(session), "service"));
        candidates
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::commands::testing::{args, fixture};
    use crate::error::ReplError;

    #[tokio::test]
    async fn test_describe_message() {
        let (env, session) = fixture();
        session.write().await.select_package("helloworld".to_string());

        let cmd = DescCommand::new(env, session);
        let output = cmd.run(&args(&["HelloReply"])).await.unwrap();
        assert!(output.starts_with("message HelloReply"));
        assert!(output.contains("string"));
    }

    #[tokio::test]
    async fn test_describe_without_package() {
        let (env, session) = fixture();
        let cmd = DescCommand::new(env, session);

        assert!(matches!(
            cmd.run(&args(&["HelloReply"])).await,
            Err(ReplError::PackageUnselected)
        ));
        assert!(cmd.run(&args(&["helloworld.HelloReply"])).await.is_ok());
    }

    #[tokio::test]
    async fn test_candidates_mix_messages_and_services() {
        let (env, session) = fixture();
        session.write().await.select_package("helloworld".to_string());

        let cmd = DescCommand::new(env, session.clone());
        let candidates = cmd.candidates(&*session.read().await, 0);
        assert!(candidates.contains(&Suggestion::new("HelloRequest", "message")));
        assert!(candidates.contains(&Suggestion::new("Greeter", "service")));
    }
}
