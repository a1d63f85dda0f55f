//! Command registry
//!
//! Fixed name → command table built once when the REPL is constructed.

use crate::cli::commands::{
    CallCommand, Command, DescCommand, PackageCommand, ServiceCommand, ShowCommand,
};
use crate::config::SharedSession;
use crate::env::Environment;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Immutable table of commands, ordered by name
pub struct Registry {
    commands: BTreeMap<&'static str, Arc<dyn Command>>,
    aliases: BTreeMap<&'static str, &'static str>,
}

impl Registry {
    /// Build the standard command set
    pub fn new(env: Arc<dyn Environment>, session: SharedSession) -> Self {
        let commands: Vec<Arc<dyn Command>> = vec![
            Arc::new(CallCommand::new(env.clone(), session.clone())),
            Arc::new(DescCommand::new(env.clone(), session.clone())),
            Arc::new(PackageCommand::new(env.clone(), session.clone())),
            Arc::new(ServiceCommand::new(env.clone(), session.clone())),
            Arc::new(ShowCommand::new(env, session)),
        ];
        Self::from_commands(commands)
    }

    /// Build a registry from an explicit command list
    pub fn from_commands(commands: Vec<Arc<dyn Command>>) -> Self {
        let mut registry = Self {
            commands: BTreeMap::new(),
            aliases: BTreeMap::new(),
        };

        for command in commands {
            let name = command.name();
            for &alias in command.aliases() {
                registry.aliases.insert(alias, name);
            }
            registry.commands.insert(name, command);
        }

        registry
    }

    /// Look up a command by name or alias
    pub fn get(&self, name: &str) -> Option<&Arc<dyn Command>> {
        self.commands.get(name).or_else(|| {
            self.aliases
                .get(name)
                .and_then(|target| self.commands.get(target))
        })
    }

    /// Commands in name order
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &Arc<dyn Command>)> {
        self.commands.iter().map(|(name, command)| (*name, command))
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.commands.keys().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}
