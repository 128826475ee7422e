use std::sync::Arc;

use tokio::sync::watch;
use vitrine_engine::coords::{ColorRgba, SurfaceSize};
use vitrine_engine::core::{App, AppControl, FrameCtx};
use vitrine_engine::draw::Frame;
use vitrine_engine::host::Container;
use vitrine_engine::input::{InputEvent, Key};
use vitrine_engine::render::{project_frame, SpriteRenderer};
use vitrine_engine::surface::{SharedSurface, SurfaceProvider};
use vitrine_gallery::Route;

use crate::host::GalleryHost;

/// Presents whatever the active scene last drew and turns keys into navigation.
///
/// Keys `1`..`4` jump to a route, arrows cycle through the gallery and
/// `Escape` quits. Pointer drags and wheel go to the scene's orbit controls.
pub struct GalleryApp {
    host: GalleryHost,
    container: Container,
    provider: SurfaceProvider,
    surface: Arc<SharedSurface>,
    renderer: SpriteRenderer,
    frame: Option<Frame>,
    active: watch::Receiver<Option<Route>>,
    cursor: RouteCursor,
}

impl GalleryApp {
    pub fn new(
        host: GalleryHost,
        container: Container,
        provider: SurfaceProvider,
        surface: Arc<SharedSurface>,
        requested: Route,
    ) -> Self {
        let active = host.watch_active();
        Self {
            host,
            container,
            provider,
            surface,
            renderer: SpriteRenderer::new(),
            frame: None,
            active,
            cursor: RouteCursor::new(requested),
        }
    }

    fn handle_input(&mut self, events: &[InputEvent]) -> AppControl {
        for event in events {
            match *event {
                InputEvent::KeyPressed {
                    key: Key::Escape, ..
                } => return AppControl::Exit,
                InputEvent::KeyPressed { repeat: true, .. } => {}
                InputEvent::KeyPressed { key, .. } => {
                    if let Some(route) = self.cursor.step(key) {
                        self.host.navigate(Some(route.token()));
                    }
                }
                InputEvent::Pointer(pointer) => self.container.dispatch_pointer(pointer),
            }
        }
        AppControl::Continue
    }
}

impl App for GalleryApp {
    fn on_resize(&mut self, logical: SurfaceSize) {
        self.container.resize(logical);
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        if self.handle_input(ctx.input.events()) == AppControl::Exit {
            return AppControl::Exit;
        }

        if self.active.has_changed().unwrap_or(false) {
            let route = *self.active.borrow_and_update();
            if route.is_none() {
                self.frame = None;
            }
            ctx.window.set_title(&window_title(route));
        }

        if let Some(frame) = self.surface.take_frame() {
            self.frame = Some(frame);
        }

        let Some(frame) = &self.frame else {
            return ctx.render(ColorRgba::black(), |_, _| {});
        };
        let renderer = &mut self.renderer;
        ctx.render(frame.clear, |rctx, target| {
            let sprites = project_frame(frame, rctx.viewport);
            renderer.render(rctx, target, &sprites);
        })
    }

    fn on_exit(&mut self) {
        self.host.shutdown();
        self.provider.dispose();
    }
}

/// The route most recently asked for.
///
/// Arrow keys cycle from here rather than from the active scene, which lags
/// behind while a transition is still loading.
#[derive(Debug, Copy, Clone)]
struct RouteCursor {
    requested: Route,
}

impl RouteCursor {
    fn new(requested: Route) -> Self {
        Self { requested }
    }

    fn step(&mut self, key: Key) -> Option<Route> {
        let route = route_for_key(key, Some(self.requested))?;
        self.requested = route;
        Some(route)
    }
}

fn route_for_key(key: Key, current: Option<Route>) -> Option<Route> {
    let current = current.unwrap_or(Route::DEFAULT);
    match key {
        Key::Digit(d @ 1..=4) => Some(Route::ALL[usize::from(d - 1)]),
        Key::ArrowRight | Key::ArrowDown => Some(current.next()),
        Key::ArrowLeft | Key::ArrowUp => Some(current.prev()),
        _ => None,
    }
}

fn window_title(route: Option<Route>) -> String {
    match route {
        Some(route) => format!("vitrine | {route}"),
        None => "vitrine".to_string(),
    }
}
