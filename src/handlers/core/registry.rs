//! Handler registry.
//!
//! The `Registry` maps exact commands and leading content tokens to handlers
//! and keeps per-route invocation counters. It is filled before the dispatch
//! loop starts and only read afterwards.

use super::context::Handler;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::debug;

struct Route {
    handler: Arc<dyn Handler>,
    calls: AtomicU64,
}

impl Route {
    fn new(handler: Arc<dyn Handler>) -> Self {
        Self {
            handler,
            calls: AtomicU64::new(0),
        }
    }

    fn hit(&self) -> Arc<dyn Handler> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        Arc::clone(&self.handler)
    }
}

/// Registry of command and prefix handlers.
#[derive(Default)]
pub struct Registry {
    commands: HashMap<String, Route>,
    prefixes: HashMap<String, Route>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Route messages whose command equals `command` exactly.
    ///
    /// Registering the same command again replaces the earlier handler.
    pub fn register_command(&mut self, command: impl Into<String>, handler: impl Handler + 'static) {
        let command = command.into();
        if self
            .commands
            .insert(command.clone(), Route::new(Arc::new(handler)))
            .is_some()
        {
            debug!(command = %command, "Replaced command handler");
        }
    }

    /// Route messages whose final parameter starts with the word `token`.
    ///
    /// Registering the same token again replaces the earlier handler.
    pub fn register_prefix(&mut self, token: impl Into<String>, handler: impl Handler + 'static) {
        let token = token.into();
        if self
            .prefixes
            .insert(token.clone(), Route::new(Arc::new(handler)))
            .is_some()
        {
            debug!(token = %token, "Replaced prefix handler");
        }
    }

    /// Look up a command handler, counting the hit.
    pub fn command(&self, command: &str) -> Option<Arc<dyn Handler>> {
        self.commands.get(command).map(Route::hit)
    }

    /// Look up a prefix handler by the first word of the final parameter,
    /// counting the hit.
    pub fn prefix(&self, token: &str) -> Option<Arc<dyn Handler>> {
        self.prefixes.get(token).map(Route::hit)
    }

    /// Number of registered routes (commands plus prefixes).
    pub fn len(&self) -> usize {
        self.commands.len() + self.prefixes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Invocation counts for every route hit at least once, busiest first.
    ///
    /// Prefix routes are reported under their token, command routes under
    /// their command.
    pub fn get_route_stats(&self) -> Vec<(String, u64)> {
        let mut stats: Vec<_> = self
            .commands
            .iter()
            .chain(self.prefixes.iter())
            .map(|(key, route)| (key.clone(), route.calls.load(Ordering::Relaxed)))
            .filter(|(_, count)| *count > 0)
            .collect();

        stats.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        stats
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("commands", &self.commands.keys().collect::<Vec<_>>())
            .field("prefixes", &self.prefixes.keys().collect::<Vec<_>>())
            .finish()
    }
}
