//! Handler registry for tilecast's pluggable behaviors.
//!
//! The registry stores handlers under hierarchical paths (a list of string
//! segments, much like a filesystem path) and resolves lookups through a
//! [`PathTrie`]. How a path collision is settled - keep the old handler, let
//! the new one clobber it, escalate into an error - is decided by the
//! handlers themselves through their [`RegistrationPolicy`].
//!
//! Both the tile placement subsystem and the directory-to-table converter
//! select handlers through the same fallback chain, implemented here by
//! [`HandlerRegistry::select`]: the exact `[environment, translation-type]`
//! path first, then the environment-wide default at `[environment]`, then a
//! caller-chosen global default key.
//!
//! # Example
//!
//! ```ignore
//! use tilecast::registry::HandlerRegistry;
//!
//! let mut registry = HandlerRegistry::new();
//! registry.register(handler, &["terminal", "text"])?;
//!
//! let handler = registry.select("terminal", "text", "DEFAULT")?;
//! ```

mod policy;
mod trie;

pub use policy::{RegistrationPolicy, RegistryEntry};
pub use trie::PathTrie;

use crate::error::{Result, TilecastError};

/// Read-only registry view handed to pre-registration checks.
pub trait RegistryQuery {
    /// True if a handler can be retrieved at `path`.
    fn query_path(&self, path: &[&str]) -> bool;

    /// First segments of every successfully registered path.
    fn environments(&self) -> &[String];
}

/// Stores handlers under hierarchical paths with per-entry collision policy.
#[derive(Debug)]
pub struct HandlerRegistry<T> {
    handlers: PathTrie<T>,
    environments: Vec<String>,
}

impl<T: RegistryEntry> Default for HandlerRegistry<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: RegistryEntry> HandlerRegistry<T> {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            handlers: PathTrie::new(),
            environments: Vec::new(),
        }
    }

    /// Register a handler at `path`, honoring its registration policy.
    ///
    /// Returns whether the handler ended up stored at the path. The ordering
    /// is fixed: the pre-registration check runs strictly before the
    /// existence check, a clobbering entry is stored before any clobber
    /// escalation fires, and the net not-registered escalation is evaluated
    /// last regardless of which branch kept the entry out.
    pub fn register(&mut self, entry: T, path: &[&str]) -> Result<bool> {
        if path.is_empty() {
            return Err(TilecastError::EmptyPath);
        }

        let policy = entry.policy();

        if !entry.pre_registration_check(self) {
            if policy.error_if_check_fails {
                return Err(TilecastError::Registration {
                    message: format!(
                        "Pre-registration check failed for handler: {}",
                        entry.name()
                    ),
                });
            }
            return self.not_registered(&entry, policy.error_if_not_registered);
        }

        let existing = match self.handlers.get(path).0 {
            Some(existing) => Some((existing.name().to_string(), existing.policy())),
            None => None,
        };

        match existing {
            None => {
                self.store(entry, path);
                Ok(true)
            }
            Some((existing_name, existing_policy)) => {
                if policy.clobber && existing_policy.clobberable {
                    let new_name = entry.name().to_string();
                    self.store(entry, path);
                    if policy.error_if_clobber || existing_policy.error_if_clobbered {
                        return Err(TilecastError::Clobber {
                            new: new_name,
                            existing: existing_name,
                            new_escalated: policy.error_if_clobber,
                            existing_escalated: existing_policy.error_if_clobbered,
                        });
                    }
                    Ok(true)
                } else {
                    self.not_registered(&entry, policy.error_if_not_registered)
                }
            }
        }
    }

    /// True if a handler can be retrieved at `path`. The full-path flag is
    /// ignored here.
    pub fn query(&self, path: &[&str]) -> bool {
        !path.is_empty() && self.handlers.get(path).0.is_some()
    }

    /// Retrieve the handler at `path`, if any.
    ///
    /// A handler whose policy demands a full path fails the lookup when any
    /// intermediate node on the way to it is vacant.
    pub fn get(&self, path: &[&str]) -> Result<Option<&T>> {
        if path.is_empty() {
            return Err(TilecastError::EmptyPath);
        }

        let (occupant, full_path) = self.handlers.get(path);
        if let Some(entry) = &occupant {
            if entry.policy().require_full_path && !full_path {
                return Err(TilecastError::IncompletePath {
                    name: entry.name().to_string(),
                });
            }
        }

        Ok(occupant)
    }

    /// Mutable variant of [`get`](Self::get).
    pub fn get_mut(&mut self, path: &[&str]) -> Result<Option<&mut T>> {
        if path.is_empty() {
            return Err(TilecastError::EmptyPath);
        }

        let (occupant, full_path) = self.handlers.get_mut(path);
        if let Some(entry) = &occupant {
            if entry.policy().require_full_path && !full_path {
                return Err(TilecastError::IncompletePath {
                    name: entry.name().to_string(),
                });
            }
        }

        Ok(occupant)
    }

    /// Resolve the most specific handler for an (environment, translation
    /// type) pair: the exact pair, then the environment-wide default, then
    /// `default_key`.
    pub fn select(
        &self,
        environment: &str,
        translation_type: &str,
        default_key: &str,
    ) -> Result<&T> {
        let exact = [environment, translation_type];
        let env_only = [environment];
        let fallback = [default_key];
        let candidates: [&[&str]; 3] = [&exact, &env_only, &fallback];

        let chosen = candidates.into_iter().find(|path| self.query(path));
        let path = match chosen {
            Some(path) => path,
            None => return Err(self.unmatched(environment, translation_type)),
        };

        self.get(path)?
            .ok_or_else(|| self.unmatched(environment, translation_type))
    }

    /// Mutable variant of [`select`](Self::select).
    pub fn select_mut(
        &mut self,
        environment: &str,
        translation_type: &str,
        default_key: &str,
    ) -> Result<&mut T> {
        let exact = [environment, translation_type];
        let env_only = [environment];
        let fallback = [default_key];
        let candidates: [&[&str]; 3] = [&exact, &env_only, &fallback];

        let chosen = candidates.into_iter().find(|path| self.query(path));
        let path = match chosen {
            Some(path) => path,
            None => return Err(self.unmatched(environment, translation_type)),
        };

        let unmatched = self.unmatched(environment, translation_type);
        self.get_mut(path)?.ok_or(unmatched)
    }

    /// Environments seen so far: the first segment of every path that has
    /// held a registered handler.
    pub fn environments(&self) -> &[String] {
        &self.environments
    }

    fn store(&mut self, entry: T, path: &[&str]) {
        self.handlers.set(path, entry);
        if !self.environments.iter().any(|e| e == path[0]) {
            self.environments.push(path[0].to_string());
        }
    }

    fn not_registered(&self, entry: &T, escalate: bool) -> Result<bool> {
        if escalate {
            return Err(TilecastError::Registration {
                message: format!("Handler {} not registered.", entry.name()),
            });
        }
        Ok(false)
    }

    fn unmatched(&self, environment: &str, translation_type: &str) -> TilecastError {
        if self.environments.iter().any(|e| e == environment) {
            TilecastError::UnsupportedTranslationType {
                environment: environment.to_string(),
                translation_type: translation_type.to_string(),
            }
        } else {
            TilecastError::UnsupportedEnvironment {
                environment: environment.to_string(),
            }
        }
    }
}

impl<T: RegistryEntry> RegistryQuery for HandlerRegistry<T> {
    fn query_path(&self, path: &[&str]) -> bool {
        self.query(path)
    }

    fn environments(&self) -> &[String] {
        &self.environments
    }
}
