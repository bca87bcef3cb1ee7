//! Parameter Resolution
//!
//! Computes the effective identifier for a command from an explicit flag and
//! a config key. An explicit, non-empty flag always wins and the config is
//! never consulted for it.

use crate::config::{ConfigKey, ConfigStore};
use crate::error::CommandError;
use crate::output;

const SCOPE_CONFLICT: &str =
    "both --space-id and --folder-id provided. Defaulting to --folder-id value.";
const TARGET_CONFLICT: &str = "both name and ID provided. Defaulting to id.";

/// Outcome of resolving one identifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Supplied on the command line
    Explicit(String),
    /// Taken from the config file
    Configured(String),
    /// Absent from both; carries the key that was looked up
    Missing(ConfigKey),
}

impl Resolution {
    pub fn into_value(self) -> Option<String> {
        match self {
            Resolution::Explicit(v) | Resolution::Configured(v) => Some(v),
            Resolution::Missing(_) => None,
        }
    }

    pub fn is_explicit(&self) -> bool {
        matches!(self, Resolution::Explicit(_))
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Resolution::Missing(_))
    }

    /// Print the missing-key error but hand the resolution back unchanged,
    /// leaving the decision to continue with the caller.
    pub fn reported(self) -> Self {
        if let Resolution::Missing(key) = &self {
            output::error(&CommandError::MissingConfig(*key).to_string());
        }
        self
    }

    /// Turn an absent value into a [`CommandError::MissingConfig`]
    pub fn require(self) -> Result<String, CommandError> {
        match self {
            Resolution::Explicit(v) | Resolution::Configured(v) => Ok(v),
            Resolution::Missing(key) => Err(CommandError::MissingConfig(key)),
        }
    }
}

/// Parent container used to scope list lookups and listings
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scope {
    Folder(String),
    Space(String),
}

/// Resolves identifiers against a loaded config
#[derive(Debug, Clone, Copy)]
pub struct Resolver<'a> {
    config: &'a ConfigStore,
    interactive: bool,
}

impl<'a> Resolver<'a> {
    pub fn new(config: &'a ConfigStore, interactive: bool) -> Self {
        Self {
            config,
            interactive,
        }
    }

    /// Resolve a single identifier
    pub fn resolve(&self, explicit: Option<&str>, key: ConfigKey) -> Resolution {
        if let Some(value) = explicit.filter(|v| !v.is_empty()) {
            return Resolution::Explicit(value.to_string());
        }
        match self.config.get(key) {
            Some(value) => Resolution::Configured(value),
            None => {
                tracing::debug!("{} not set on command line or in config", key);
                Resolution::Missing(key)
            }
        }
    }

    /// Pick between a parent folder and a parent space.
    ///
    /// An explicit folder beats everything; an explicit space beats a
    /// configured folder; otherwise a configured folder beats a configured
    /// space.
    pub fn resolve_scope(
        &self,
        folder: Option<&str>,
        space: Option<&str>,
    ) -> Result<Scope, CommandError> {
        let folder = self.resolve(folder, ConfigKey::FolderId);
        let space = self.resolve(space, ConfigKey::SpaceId);

        if folder.is_missing() && space.is_missing() {
            return Err(CommandError::MissingScope);
        }

        if let Some(message) =
            self.conflict_warning(folder.is_explicit() && space.is_explicit(), SCOPE_CONFLICT)
        {
            output::warning(message);
        }

        let use_folder = folder.is_explicit() || (!folder.is_missing() && !space.is_explicit());
        let scope = if use_folder {
            folder.into_value().map(Scope::Folder)
        } else {
            space.into_value().map(Scope::Space)
        }
        .ok_or(CommandError::MissingScope)?;

        tracing::debug!("Resolved scope: {:?}", scope);
        Ok(scope)
    }

    /// Pick between an explicit id and a name; the id wins
    pub fn resolve_target(
        &self,
        name: Option<&str>,
        id: Option<&str>,
    ) -> Result<Target, CommandError> {
        let name = name.filter(|n| !n.is_empty());
        let id = id.filter(|i| !i.is_empty());

        match (name, id) {
            (None, None) => Err(CommandError::MissingNameOrId),
            (Some(_), Some(id)) => {
                if let Some(message) = self.conflict_warning(true, TARGET_CONFLICT) {
                    output::warning(message);
                }
                Ok(Target::Id(id.to_string()))
            }
            (None, Some(id)) => Ok(Target::Id(id.to_string())),
            (Some(name), None) => Ok(Target::Name(name.to_string())),
        }
    }

    /// Ambiguity warnings are for people at a terminal, never for scripts
    fn conflict_warning(&self, conflict: bool, message: &'static str) -> Option<&'static str> {
        (conflict && self.interactive).then_some(message)
    }
}

/// Entity addressed either by id or by name
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    Id(String),
    Name(String),
}
