use thiserror::Error;

use crate::route::Route;

/// Why a navigation did not install its scene.
///
/// In every case the previously active scene is left exactly as it was,
/// except for `Start`, which happens after the old scene was retired.
#[derive(Debug, Error)]
pub enum NavigateError {
    #[error("failed to load the {route} scene module")]
    Load {
        route: Route,
        #[source]
        source: anyhow::Error,
    },

    #[error("failed to construct the {route} scene")]
    Construct {
        route: Route,
        #[source]
        source: anyhow::Error,
    },

    #[error("failed to start the {route} scene")]
    Start {
        route: Route,
        #[source]
        source: anyhow::Error,
    },
}

impl NavigateError {
    pub fn route(&self) -> Route {
        match self {
            NavigateError::Load { route, .. }
            | NavigateError::Construct { route, .. }
            | NavigateError::Start { route, .. } => *route,
        }
    }
}
