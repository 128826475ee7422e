use std::f32::consts::FRAC_PI_2;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use glam::Vec3;
use vitrine_engine::camera::Camera;
use vitrine_engine::host::{Container, ListenerId, PointerEvent};

/// Fraction of the pending rotation applied per frame.
const DAMPING: f32 = 0.05;
/// Orbit angle per dragged logical pixel.
const RADIANS_PER_PIXEL: f32 = 0.005;
/// Distance multiplier per wheel line.
const ZOOM_STEP: f32 = 0.95;
const PITCH_LIMIT: f32 = FRAC_PI_2 - 0.01;

#[derive(Debug)]
struct Orbit {
    yaw: f32,
    pitch: f32,
    distance: f32,
    pending_yaw: f32,
    pending_pitch: f32,
    pending_zoom: f32,
}

/// Damped orbit camera control fed by container pointer events.
///
/// Dragging orbits around the target, the wheel zooms. Input accumulates in
/// the listener and is applied gradually by `update`, once per frame.
pub struct OrbitControls {
    orbit: Arc<Mutex<Orbit>>,
    target: Vec3,
    min_distance: f32,
    max_distance: f32,
    container: Container,
    listener: Option<ListenerId>,
}

impl OrbitControls {
    /// Subscribes to `container` and starts from the camera's current placement.
    pub fn attach(container: &Container, camera: &Camera) -> Self {
        let offset = camera.eye - camera.target;
        let distance = offset.length().max(f32::EPSILON);
        let orbit = Arc::new(Mutex::new(Orbit {
            yaw: offset.x.atan2(offset.z),
            pitch: (offset.y / distance).clamp(-1.0, 1.0).asin(),
            distance,
            pending_yaw: 0.0,
            pending_pitch: 0.0,
            pending_zoom: 1.0,
        }));

        let input = Arc::clone(&orbit);
        let listener = container.add_pointer_listener(move |event| {
            let mut orbit = input.lock().unwrap_or_else(PoisonError::into_inner);
            match event {
                PointerEvent::Drag { dx, dy } => {
                    orbit.pending_yaw -= dx * RADIANS_PER_PIXEL;
                    orbit.pending_pitch += dy * RADIANS_PER_PIXEL;
                }
                PointerEvent::Wheel { delta } => {
                    orbit.pending_zoom *= ZOOM_STEP.powf(delta);
                }
            }
        });

        Self {
            orbit,
            target: camera.target,
            min_distance: distance * 0.25,
            max_distance: distance * 4.0,
            container: container.clone(),
            listener: Some(listener),
        }
    }

    /// Applies one frame of damped motion and places the camera.
    pub fn update(&self, camera: &mut Camera) {
        let mut orbit = self.lock();

        let yaw_step = orbit.pending_yaw * DAMPING;
        let pitch_step = orbit.pending_pitch * DAMPING;
        orbit.yaw += yaw_step;
        orbit.pitch = (orbit.pitch + pitch_step).clamp(-PITCH_LIMIT, PITCH_LIMIT);
        orbit.pending_yaw -= yaw_step;
        orbit.pending_pitch -= pitch_step;

        orbit.distance =
            (orbit.distance * orbit.pending_zoom).clamp(self.min_distance, self.max_distance);
        orbit.pending_zoom = 1.0;

        let (sin_yaw, cos_yaw) = orbit.yaw.sin_cos();
        let (sin_pitch, cos_pitch) = orbit.pitch.sin_cos();
        let dir = Vec3::new(sin_yaw * cos_pitch, sin_pitch, cos_yaw * cos_pitch);

        camera.target = self.target;
        camera.eye = self.target + dir * orbit.distance;
    }

    pub fn is_attached(&self) -> bool {
        self.listener.is_some()
    }

    /// Unsubscribes from the container. Idempotent.
    pub fn dispose(&mut self) {
        if let Some(id) = self.listener.take() {
            self.container.remove_listener(id);
        }
    }

    fn lock(&self) -> MutexGuard<'_, Orbit> {
        self.orbit.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Drop for OrbitControls {
    fn drop(&mut self) {
        self.dispose();
    }
}

#[cfg(test)]
mod tests {
    use vitrine_engine::coords::SurfaceSize;

    use super::*;

    fn camera() -> Camera {
        Camera::perspective(60.0, 1.0, 0.1, 100.0).looking_at(Vec3::new(0.0, 0.0, 10.0), Vec3::ZERO)
    }

    #[test]
    fn update_without_input_keeps_placement() {
        let container = Container::new(SurfaceSize::new(100, 100));
        let mut cam = camera();
        let controls = OrbitControls::attach(&container, &cam);

        controls.update(&mut cam);
        assert!((cam.eye - Vec3::new(0.0, 0.0, 10.0)).length() < 1e-4);
    }

    #[test]
    fn drag_is_applied_gradually() {
        let container = Container::new(SurfaceSize::new(100, 100));
        let mut cam = camera();
        let controls = OrbitControls::attach(&container, &cam);

        container.dispatch_pointer(PointerEvent::Drag { dx: -100.0, dy: 0.0 });
        controls.update(&mut cam);
        let first = cam.eye.x;
        controls.update(&mut cam);
        let second = cam.eye.x;

        assert!(first > 0.0);
        assert!(second > first);
        assert!((cam.distance() - 10.0).abs() < 1e-3);
    }

    #[test]
    fn wheel_zooms_within_limits() {
        let container = Container::new(SurfaceSize::new(100, 100));
        let mut cam = camera();
        let controls = OrbitControls::attach(&container, &cam);

        container.dispatch_pointer(PointerEvent::Wheel { delta: 1.0 });
        controls.update(&mut cam);
        assert!((cam.distance() - 9.5).abs() < 1e-3);

        container.dispatch_pointer(PointerEvent::Wheel { delta: -200.0 });
        controls.update(&mut cam);
        assert!((cam.distance() - 40.0).abs() < 1e-2);
    }

    #[test]
    fn dispose_unsubscribes_once() {
        let container = Container::new(SurfaceSize::new(100, 100));
        let mut controls = OrbitControls::attach(&container, &camera());
        assert_eq!(container.pointer_listener_count(), 1);

        controls.dispose();
        controls.dispose();
        assert!(!controls.is_attached());
        assert_eq!(container.pointer_listener_count(), 0);
    }
}
