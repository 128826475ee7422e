//! Route tokens, canonical routes and the module loader table.

use std::fmt;
use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;

use crate::scene::{SceneKind, SceneModule};
use crate::scenes::builtin_module;

/// A gallery entry.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Route {
    Galaxy,
    Wave,
    Instanced,
    Raymarch,
}

impl Route {
    /// Navigation order.
    pub const ALL: [Route; 4] = [Route::Galaxy, Route::Wave, Route::Instanced, Route::Raymarch];

    /// Where unknown, empty and absent tokens land.
    pub const DEFAULT: Route = Route::Galaxy;

    pub fn path(self) -> &'static str {
        match self {
            Route::Galaxy => "/galaxy",
            Route::Wave => "/wave",
            Route::Instanced => "/instanced",
            Route::Raymarch => "/raymarch",
        }
    }

    /// Navigation token for this route, as a host would emit it.
    pub fn token(self) -> String {
        format!("#{}", self.path())
    }

    pub fn kind(self) -> SceneKind {
        match self {
            Route::Galaxy => SceneKind::ParticleField,
            Route::Wave => SceneKind::ShaderPlane,
            Route::Instanced => SceneKind::InstancedGrid,
            Route::Raymarch => SceneKind::RaymarchQuad,
        }
    }

    /// Exact, case-sensitive match of a canonical path.
    pub fn from_path(path: &str) -> Option<Route> {
        Route::ALL.into_iter().find(|r| r.path() == path)
    }

    /// Resolves any token to a route. Never fails.
    pub fn resolve(token: Option<&str>) -> Route {
        Route::from_path(&normalize_token(token)).unwrap_or(Route::DEFAULT)
    }

    pub fn index(self) -> usize {
        match self {
            Route::Galaxy => 0,
            Route::Wave => 1,
            Route::Instanced => 2,
            Route::Raymarch => 3,
        }
    }

    /// Next route in navigation order, wrapping.
    pub fn next(self) -> Route {
        Route::ALL[(self.index() + 1) % Route::ALL.len()]
    }

    /// Previous route in navigation order, wrapping.
    pub fn prev(self) -> Route {
        Route::ALL[(self.index() + Route::ALL.len() - 1) % Route::ALL.len()]
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Turns an arbitrary token into a canonical route path.
///
/// Surrounding whitespace and one leading `#` are dropped; an empty result
/// becomes the default route's path; a missing leading `/` is added. The
/// result may still name an unknown route.
pub fn normalize_token(token: Option<&str>) -> String {
    let trimmed = token.unwrap_or_default().trim();
    let route = trimmed.strip_prefix('#').unwrap_or(trimmed);

    if route.is_empty() {
        Route::DEFAULT.path().to_string()
    } else if route.starts_with('/') {
        route.to_string()
    } else {
        format!("/{route}")
    }
}

/// Asynchronous source of a scene module.
#[async_trait]
pub trait SceneLoader: Send + Sync {
    async fn load(&self) -> Result<Arc<dyn SceneModule>>;
}

/// Loads one of the modules compiled into the gallery.
#[derive(Debug, Copy, Clone)]
pub struct BuiltinLoader {
    kind: SceneKind,
}

impl BuiltinLoader {
    pub fn new(kind: SceneKind) -> Self {
        Self { kind }
    }
}

#[async_trait]
impl SceneLoader for BuiltinLoader {
    async fn load(&self) -> Result<Arc<dyn SceneModule>> {
        tokio::task::yield_now().await;
        Ok(builtin_module(self.kind))
    }
}

/// Closed table from route to module loader.
#[derive(Clone)]
pub struct RouteTable {
    loaders: [Arc<dyn SceneLoader>; 4],
}

impl RouteTable {
    /// Every route served by its built-in module.
    pub fn builtin() -> Self {
        Self {
            loaders: Route::ALL
                .map(|r| Arc::new(BuiltinLoader::new(r.kind())) as Arc<dyn SceneLoader>),
        }
    }

    /// Replaces the loader serving `route`.
    pub fn with_loader(mut self, route: Route, loader: Arc<dyn SceneLoader>) -> Self {
        self.loaders[route.index()] = loader;
        self
    }

    pub fn loader(&self, route: Route) -> Arc<dyn SceneLoader> {
        Arc::clone(&self.loaders[route.index()])
    }

    /// Token to route and the loader serving it.
    pub fn resolve(&self, token: Option<&str>) -> (Route, Arc<dyn SceneLoader>) {
        let route = Route::resolve(token);
        (route, self.loader(route))
    }
}

impl Default for RouteTable {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_hash_and_slash_forms() {
        assert_eq!(normalize_token(Some("#/wave")), "/wave");
        assert_eq!(normalize_token(Some("wave")), "/wave");
        assert_eq!(normalize_token(Some("/wave")), "/wave");
        assert_eq!(normalize_token(Some("  #/raymarch \n")), "/raymarch");
    }

    #[test]
    fn empty_and_absent_tokens_use_default_path() {
        assert_eq!(normalize_token(None), "/galaxy");
        assert_eq!(normalize_token(Some("")), "/galaxy");
        assert_eq!(normalize_token(Some("#")), "/galaxy");
        assert_eq!(normalize_token(Some("   ")), "/galaxy");
    }

    #[test]
    fn unknown_and_malformed_tokens_resolve_to_default() {
        for token in [None, Some(""), Some("#/doesnotexist"), Some("#/Wave"), Some("##/wave")] {
            assert_eq!(Route::resolve(token), Route::DEFAULT, "{token:?}");
        }
    }

    #[test]
    fn known_tokens_resolve() {
        for route in Route::ALL {
            assert_eq!(Route::resolve(Some(&route.token())), route);
            assert_eq!(Route::resolve(Some(route.path())), route);
        }
    }

    #[test]
    fn cycling_wraps() {
        assert_eq!(Route::Galaxy.prev(), Route::Raymarch);
        assert_eq!(Route::Raymarch.next(), Route::Galaxy);
        assert_eq!(Route::Wave.next(), Route::Instanced);
    }

    #[tokio::test]
    async fn builtin_table_loads_matching_modules() {
        let table = RouteTable::builtin();
        for route in Route::ALL {
            let (resolved, loader) = table.resolve(Some(&route.token()));
            assert_eq!(resolved, route);
            let module = loader.load().await.unwrap();
            assert_eq!(module.kind(), route.kind());
        }
    }
}
