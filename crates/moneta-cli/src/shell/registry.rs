//! Slash-command registry
//!
//! Builder-constructed lookup table mapping lower-cased names and aliases to
//! command entries. Built once at startup and passed by reference to the
//! dispatcher and to tests; immutable afterwards.
//!
//! ## Key semantics
//!
//! - Every registration inserts the entry under its canonical name and under
//!   each alias, all lower-cased
//! - A later registration for an already-used key silently wins; callers own
//!   the startup ordering
//! - `list_unique` walks keys in registration order and yields each distinct
//!   entry once, however many aliases point at it

use std::borrow::Borrow;
use std::collections::HashMap;
use std::sync::Arc;

use moneta_core::command::CommandDescriptor;
use moneta_core::traits::registry::{Registry, RegistryBuilder};
use moneta_core::traits::shell::CommandHandler;

/// A registered command: handler plus descriptor
pub struct SlashCommand {
    pub handler: Arc<dyn CommandHandler>,
    pub descriptor: CommandDescriptor,
}

impl SlashCommand {
    pub fn new(descriptor: CommandDescriptor, handler: Arc<dyn CommandHandler>) -> Self {
        Self {
            handler,
            descriptor,
        }
    }

    /// Every key this command registers under, lower-cased, canonical first
    fn keys(&self) -> Vec<String> {
        std::iter::once(&self.descriptor.name)
            .chain(self.descriptor.aliases.iter())
            .map(|k| k.to_lowercase())
            .collect()
    }
}

/// Immutable registry of slash commands
///
/// Many keys may point at the same entry; entry identity is the shared
/// allocation, not the key.
#[derive(Clone, Default)]
pub struct SlashRegistry {
    commands: HashMap<String, Arc<SlashCommand>>,
    /// Keys in first-registration order, for stable `list_unique` output
    ordered_keys: Vec<String>,
}

impl SlashRegistry {
    /// Case-insensitive lookup by name or alias
    pub fn lookup(&self, name: &str) -> Option<&Arc<SlashCommand>> {
        self.commands.get(&name.to_lowercase())
    }

    /// Distinct commands in registration order
    ///
    /// Aliases never produce a second entry: the first key reaching an entry
    /// wins, later keys pointing at the same allocation are skipped.
    pub fn list_unique(&self) -> Vec<&Arc<SlashCommand>> {
        let mut seen: Vec<*const SlashCommand> = Vec::new();
        let mut unique = Vec::new();
        for key in &self.ordered_keys {
            if let Some(cmd) = self.commands.get(key) {
                let ptr = Arc::as_ptr(cmd);
                if !seen.contains(&ptr) {
                    seen.push(ptr);
                    unique.push(cmd);
                }
            }
        }
        unique
    }
}

impl Registry for SlashRegistry {
    type Key = String;
    type Value = Arc<SlashCommand>;

    fn get<Q>(&self, key: &Q) -> Option<&Self::Value>
    where
        Self::Key: Borrow<Q>,
        Q: ?Sized + Eq + std::hash::Hash,
    {
        self.commands.get(key)
    }

    fn iter(&self) -> impl Iterator<Item = (&Self::Key, &Self::Value)> {
        self.commands.iter()
    }

    fn len(&self) -> usize {
        self.commands.len()
    }
}

/// Builder for [`SlashRegistry`]
#[derive(Default)]
pub struct SlashRegistryBuilder {
    commands: HashMap<String, Arc<SlashCommand>>,
    ordered_keys: Vec<String>,
}

impl SlashRegistryBuilder {
    /// Register a command under its canonical name and all aliases
    pub fn command(
        mut self,
        descriptor: CommandDescriptor,
        handler: Arc<dyn CommandHandler>,
    ) -> Self {
        let cmd = Arc::new(SlashCommand::new(descriptor, handler));
        for key in cmd.keys() {
            if !self.commands.contains_key(&key) {
                self.ordered_keys.push(key.clone());
            }
            self.commands.insert(key, Arc::clone(&cmd));
        }
        self
    }
}

impl RegistryBuilder for SlashRegistryBuilder {
    type Registry = SlashRegistry;
    type Key = String;
    type Value = Arc<SlashCommand>;

    fn register(mut self, key: Self::Key, value: Self::Value) -> Self {
        let key = key.to_lowercase();
        if !self.commands.contains_key(&key) {
            self.ordered_keys.push(key.clone());
        }
        self.commands.insert(key, value);
        self
    }

    fn build(self) -> Self::Registry {
        SlashRegistry {
            commands: self.commands,
            ordered_keys: self.ordered_keys,
        }
    }
}
