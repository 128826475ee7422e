//! Vitrine gallery: scene lifecycle management and the built-in scenes.
//!
//! A `SceneDirector` owns the single active scene. Each `navigate` call
//! resolves a route token, loads the scene module, builds the new scene,
//! retires the previous one and starts the replacement, while guaranteeing
//! that no two scenes ever run at the same time.

pub mod config;
pub mod controls;
pub mod director;
pub mod error;
pub mod route;
pub mod scene;
pub mod scenes;

pub use config::{DirectorConfig, FramePacing};
pub use director::{PendingNavigation, SceneDirector, Transition};
pub use error::NavigateError;
pub use route::{normalize_token, Route, RouteTable, SceneLoader};
pub use scene::{Scene, SceneContext, SceneKind, SceneModule, SceneState};
