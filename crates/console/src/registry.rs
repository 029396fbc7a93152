//! Caller-owned map from host surfaces to consoles

use crate::controller::Console;
use crate::profile::Profile;
use crate::render::RenderTarget;
use std::collections::HashMap;
use std::hash::Hash;
use tracing::debug;

/// Consoles keyed by whatever identifies a host surface (window id, tab index)
pub struct ConsoleRegistry<K, T: RenderTarget> {
    consoles: HashMap<K, Console<T>>,
}

impl<K, T> ConsoleRegistry<K, T>
where
    K: Eq + Hash + std::fmt::Debug,
    T: RenderTarget,
{
    /// An empty registry
    pub fn new() -> Self {
        Self {
            consoles: HashMap::new(),
        }
    }

    /// The console for `key`, created with `create` on first use
    pub fn get_or_create(
        &mut self,
        key: K,
        create: impl FnOnce() -> Console<T>,
    ) -> &mut Console<T> {
        self.consoles.entry(key).or_insert_with(create)
    }

    /// The console for `key`
    pub fn get(&self, key: &K) -> Option<&Console<T>> {
        self.consoles.get(key)
    }

    /// The console for `key`, mutably
    pub fn get_mut(&mut self, key: &K) -> Option<&mut Console<T>> {
        self.consoles.get_mut(key)
    }

    /// Drop the console for `key` and hand it back
    pub fn remove(&mut self, key: &K) -> Option<Console<T>> {
        self.consoles.remove(key)
    }

    /// Apply `profile` to the console for `key`
    pub fn select(&mut self, key: &K, profile: &Profile) -> Option<&mut Console<T>> {
        debug!(subsystem = "console", key = ?key, profile = %profile.name, "Selecting profile");
        let console = self.consoles.get_mut(key)?;
        console.apply_profile(profile);
        Some(console)
    }

    /// Number of consoles
    pub fn len(&self) -> usize {
        self.consoles.len()
    }

    /// Whether the registry is empty
    pub fn is_empty(&self) -> bool {
        self.consoles.is_empty()
    }

    /// Registered keys, in no particular order
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.consoles.keys()
    }
}

impl<K, T> Default for ConsoleRegistry<K, T>
where
    K: Eq + Hash + std::fmt::Debug,
    T: RenderTarget,
{
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::ConsoleOptions;
    use crate::render::Transcript;
    use hueconsole_core::Color;

    fn make() -> Console<Transcript> {
        Console::new(ConsoleOptions::default(), Transcript::new())
    }

    #[test]
    fn test_get_or_create_reuses_console() {
        let mut registry: ConsoleRegistry<u32, Transcript> = ConsoleRegistry::new();
        registry.get_or_create(1, make).type_text("abc");
        let console = registry.get_or_create(1, || panic!("should exist"));
        assert_eq!(console.user_input(), "abc");
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_independent_consoles() {
        let mut registry = ConsoleRegistry::new();
        registry.get_or_create("left", make).type_text("l");
        registry.get_or_create("right", make).type_text("r");
        assert_eq!(registry.get(&"left").map(|c| c.user_input()), Some("l".to_string()));
        assert_eq!(registry.get(&"right").map(|c| c.user_input()), Some("r".to_string()));

        assert!(registry.remove(&"left").is_some());
        assert!(registry.get(&"left").is_none());
        assert_eq!(registry.keys().count(), 1);
    }

    #[test]
    fn test_select_applies_profile() {
        let mut registry = ConsoleRegistry::new();
        registry.get_or_create(7u8, make);

        let mut profile = Profile::new("alert");
        profile.foreground = Color::rgb(255, 0, 0);
        let console = registry.select(&7, &profile).unwrap();
        assert_eq!(console.foreground(), Color::rgb(255, 0, 0));

        assert!(registry.select(&8, &profile).is_none());
    }
}
