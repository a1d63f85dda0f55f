use super::{required, suggestions, Command};
use crate::cli::completer::Suggestion;
use crate::config::{Session, SharedSession};
use crate::env::Environment;
use crate::error::Result;
use async_trait::async_trait;
use std::sync::Arc;

/// `package <name>`: make a package the active one
pub struct PackageCommand {
    env: Arc<dyn Environment>,
    session: SharedSession,
}

impl PackageCommand {
    pub fn new(env: Arc<dyn Environment>, session: SharedSession) -> Self {
        Self { env, session }
    }
}

#[async_trait]
impl Command for PackageCommand {
    fn name(&self) -> &'static str {
        "package"
    }

    fn synopsis(&self) -> &'static str {
        "set the package as the current selected package"
    }

    fn help(&self) -> &'static str {
        "usage: package <package name>"
    }

    fn validate(&self, args: &[String]) -> Result<()> {
        required(args, "package name").map(|_| ())
    }

    async fn run(&self, args: &[String]) -> Result<String> {
        let name = required(args, "package name")?;
        let package = self.env.resolve_package(name)?;

        tracing::info!(%package, "package selected");
        self.session.write().await.select_package(package);

        Ok(String::new())
    }

    fn candidates(&self, _session: &Session, position: usize) -> Vec<Suggestion> {
        match position {
            0 => suggestions(self.env.package_names(), "package"),
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
    async fn test_select_package_resets_service() {
        let (env, session) = fixture();
        session
            .write()
            .await
            .select_service("helloworld".to_string(), "Greeter".to_string());

        let cmd = PackageCommand::new(env, session.clone());
        cmd.run(&args(&["helloworld.admin"])).await.unwrap();

        let session = session.read().await;
        assert_eq!(session.package(), Some("helloworld.admin"));
        assert_eq!(session.service(), None);
    }

    #[tokio::test]
    async fn test_unknown_package() {
        let (env, session) = fixture();
        let cmd = PackageCommand::new(env, session.clone());

        let result = cmd.run(&args(&["nowhere"])).await;
        assert!(matches!(result, Err(ReplError::UnknownTarget(name)) if name == "nowhere"));
        assert_eq!(session.read().await.package(), None);
    }

    #[test]
    fn test_candidates() {
        let (env, session) = fixture();
        let cmd = PackageCommand::new(env, session);
        let names: Vec<String> = cmd
            .candidates(&Session::default(), 0)
            .into_iter()
            .map(|s| s.text)
            .collect();
        assert_eq!(names, vec!["helloworld", "helloworld.admin"]);
    }
}
