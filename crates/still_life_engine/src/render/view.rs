//! Per-frame view and projection composition
//!
//! [`ViewManager`] owns the camera, the input controller and the frame timer.
//! Once per frame it advances the timer, applies held keys, and pushes the
//! resulting view and projection matrices through the shader binder.

use std::time::Instant;

use crate::config::{ProjectionConfig, StillLifeConfig};
use crate::foundation::math::{utils, Mat4, Mat4Ext};
use crate::foundation::time::FrameTimer;
use crate::input::{CameraController, FrameControl, KeyState};
use crate::render::camera::{Camera, ProjectionMode};
use crate::render::shader::ShaderStateBinder;

/// Camera, input and timing state of the viewer
#[derive(Debug, Clone)]
pub struct ViewManager {
    camera: Camera,
    controller: CameraController,
    timer: FrameTimer,
    projection_mode: ProjectionMode,
    projection: ProjectionConfig,
    aspect_ratio: f32,
}

impl ViewManager {
    /// Create a view manager from configuration, timing from now
    pub fn new(config: &StillLifeConfig) -> Self {
        Self::starting_at(config, Instant::now())
    }

    /// Create a view manager whose timer starts at `start`
    pub fn starting_at(config: &StillLifeConfig, start: Instant) -> Self {
        Self {
            camera: Camera::from_config(&config.camera),
            controller: CameraController::new(&config.controls),
            timer: FrameTimer::starting_at(start),
            projection_mode: ProjectionMode::default(),
            projection: config.projection.clone(),
            aspect_ratio: config.aspect_ratio(),
        }
    }

    /// Advance one frame and push view state to the shader
    pub fn prepare_scene_view(&mut self, keys: &dyn KeyState, binder: &mut ShaderStateBinder<'_>) -> FrameControl {
        self.prepare_scene_view_at(Instant::now(), keys, binder)
    }

    /// Advance to `now` and push view state to the shader
    pub fn prepare_scene_view_at(
        &mut self,
        now: Instant,
        keys: &dyn KeyState,
        binder: &mut ShaderStateBinder<'_>,
    ) -> FrameControl {
        self.timer.update_at(now);

        let outcome = self
            .controller
            .process_keyboard(&mut self.camera, keys, self.timer.delta_time());
        if let Some(mode) = outcome.projection {
            if mode != self.projection_mode {
                log::info!("Switching to {:?} projection", mode);
            }
            self.projection_mode = mode;
        }

        let view = self.camera.view_matrix();
        let projection = self.projection_matrix();
        binder.set_view(&view, &projection, &self.camera.position);

        log::trace!(
            "Frame {}: dt={:.4}s eye={:?}",
            self.timer.frame_count(),
            self.timer.delta_time(),
            self.camera.position
        );

        outcome.control
    }

    /// Restart frame timing from now
    ///
    /// Call after slow setup so the first frame does not see the setup time
    /// as its delta.
    pub fn restart_clock(&mut self) {
        self.restart_clock_at(Instant::now());
    }

    /// Restart frame timing from `now`
    pub fn restart_clock_at(&mut self, now: Instant) {
        self.timer.restart_at(now);
    }

    /// Projection matrix for the current mode and aspect ratio
    pub fn projection_matrix(&self) -> Mat4 {
        let ProjectionConfig { near, far, ortho_extent } = self.projection;
        match self.projection_mode {
            ProjectionMode::Perspective => Mat4::perspective(
                utils::deg_to_rad(self.camera.fov_degrees),
                self.aspect_ratio,
                near,
                far,
            ),
            ProjectionMode::Orthographic => Mat4::orthographic(ortho_extent, near, far),
        }
    }

    /// Feed an absolute cursor position
    pub fn handle_cursor(&mut self, x: f64, y: f64) {
        self.controller.process_mouse_move(&mut self.camera, x, y);
    }

    /// Feed a vertical scroll offset
    pub fn handle_scroll(&mut self, y_offset: f64) {
        self.controller.process_scroll(&mut self.camera, y_offset);
    }

    /// Re-seed the cursor position on the next cursor event
    pub fn reactivate_mouse(&mut self) {
        self.controller.reactivate();
    }

    /// Update the aspect ratio from a framebuffer size
    ///
    /// Zero-sized framebuffers (minimized windows) are ignored.
    pub fn set_aspect_ratio(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        let aspect = width as f32 / height as f32;
        if (self.aspect_ratio - aspect).abs() > 0.01 {
            log::info!("Aspect ratio changed: {:.3} -> {:.3}", self.aspect_ratio, aspect);
        }
        self.aspect_ratio = aspect;
    }

    /// Select the projection mode directly
    pub fn set_projection_mode(&mut self, mode: ProjectionMode) {
        self.projection_mode = mode;
    }

    /// Current projection mode
    pub const fn projection_mode(&self) -> ProjectionMode {
        self.projection_mode
    }

    /// Current aspect ratio
    pub const fn aspect_ratio(&self) -> f32 {
        self.aspect_ratio
    }

    /// Camera state
    pub const fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Frame timer
    pub const fn timer(&self) -> &FrameTimer {
        &self.timer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Vec3;
    use crate::input::{CameraAction, PressedActions};
    use crate::render::shader::spy::{SpyUniforms, Uniform};
    use crate::render::shader::uniforms;
    use approx::assert_relative_eq;
    use std::time::Duration;

    #[test]
    fn test_orthographic_projection_entries() {
        let mut manager = ViewManager::new(&StillLifeConfig::default());
        manager.set_projection_mode(ProjectionMode::Orthographic);
        let m = manager.projection_matrix();

        let (near, far) = (0.1_f32, 100.0_f32);
        assert_relative_eq!(m[(0, 0)], 0.1, epsilon = 1e-6);
        assert_relative_eq!(m[(1, 1)], 0.1, epsilon = 1e-6);
        assert_relative_eq!(m[(2, 2)], -2.0 / (far - near), epsilon = 1e-6);
        assert_relative_eq!(m[(2, 3)], -(far + near) / (far - near), epsilon = 1e-6);
        assert_relative_eq!(m[(0, 3)], 0.0);
        assert_relative_eq!(m[(1, 3)], 0.0);
        assert_relative_eq!(m.row(3).transpose(), nalgebra::Vector4::new(0.0, 0.0, 0.0, 1.0));
    }

    #[test]
    fn test_perspective_uses_fov_and_aspect() {
        let manager = ViewManager::new(&StillLifeConfig::default());
        let m = manager.projection_matrix();

        let f = 1.0 / (utils::deg_to_rad(80.0) / 2.0).tan();
        assert_relative_eq!(m[(1, 1)], f, epsilon = 1e-5);
        assert_relative_eq!(m[(0, 0)], f / 1.25, epsilon = 1e-5);
        assert_relative_eq!(m[(3, 2)], -1.0);
    }

    #[test]
    fn test_frame_pushes_view_and_moves_with_delta() {
        let start = Instant::now();
        let mut manager = ViewManager::starting_at(&StillLifeConfig::default(), start);
        let start_position = manager.camera().position;
        let front = manager.camera().front;

        let mut spy = SpyUniforms::default();
        let control = {
            let mut binder = ShaderStateBinder::new(&mut spy);
            let keys = PressedActions::of(&[CameraAction::Forward]);
            manager.prepare_scene_view_at(start + Duration::from_millis(500), &keys, &mut binder)
        };

        assert_eq!(control, FrameControl::Continue);
        assert_relative_eq!(manager.camera().position, start_position + front * 2.5, epsilon = 1e-4);
        assert_eq!(spy.names(), [uniforms::VIEW, uniforms::PROJECTION, uniforms::VIEW_POSITION]);
        assert_eq!(
            spy.last(uniforms::VIEW_POSITION),
            Some(&Uniform::Vec3(manager.camera().position))
        );
    }

    #[test]
    fn test_restarted_clock_ignores_setup_time() {
        let start = Instant::now();
        let mut manager = ViewManager::starting_at(&StillLifeConfig::default(), start);
        let start_position = manager.camera().position;
        let front = manager.camera().front;

        let loop_start = start + Duration::from_secs(4);
        manager.restart_clock_at(loop_start);
        let keys = PressedActions::of(&[CameraAction::Forward]);
        manager.prepare_scene_view_at(loop_start + Duration::from_millis(100), &keys, &mut ShaderStateBinder::detached());

        assert_relative_eq!(manager.camera().position, start_position + front * 0.5, epsilon = 1e-4);
    }

    #[test]
    fn test_projection_keys_are_sets_not_toggles() {
        let start = Instant::now();
        let mut manager = ViewManager::starting_at(&StillLifeConfig::default(), start);
        let mut binder = ShaderStateBinder::detached();
        let ortho = PressedActions::of(&[CameraAction::Orthographic]);

        for frame in 1..4 {
            manager.prepare_scene_view_at(start + Duration::from_millis(frame * 16), &ortho, &mut binder);
            assert_eq!(manager.projection_mode(), ProjectionMode::Orthographic);
        }

        let persp = PressedActions::of(&[CameraAction::Perspective]);
        manager.prepare_scene_view_at(start + Duration::from_millis(80), &persp, &mut binder);
        assert_eq!(manager.projection_mode(), ProjectionMode::Perspective);

        manager.prepare_scene_view_at(start + Duration::from_millis(96), &PressedActions::none(), &mut binder);
        assert_eq!(manager.projection_mode(), ProjectionMode::Perspective);
    }

    #[test]
    fn test_exit_key_stops_the_loop() {
        let mut manager = ViewManager::new(&StillLifeConfig::default());
        let control = manager.prepare_scene_view(
            &PressedActions::of(&[CameraAction::Exit]),
            &mut ShaderStateBinder::detached(),
        );
        assert_eq!(control, FrameControl::Exit);
    }

    #[test]
    fn test_window_events_are_forwarded() {
        let mut manager = ViewManager::new(&StillLifeConfig::default());
        let yaw = manager.camera().yaw;

        manager.handle_cursor(10.0, 10.0);
        manager.handle_cursor(20.0, 10.0);
        assert_relative_eq!(manager.camera().yaw, yaw + 1.0, epsilon = 1e-4);

        manager.reactivate_mouse();
        manager.handle_cursor(500.0, 10.0);
        assert_relative_eq!(manager.camera().yaw, yaw + 1.0, epsilon = 1e-4);

        manager.handle_scroll(1.0);
        assert_relative_eq!(manager.camera().movement_speed, 7.0);

        manager.set_aspect_ratio(1920, 1080);
        assert_relative_eq!(manager.aspect_ratio(), 1920.0 / 1080.0);
        manager.set_aspect_ratio(0, 0);
        assert_relative_eq!(manager.aspect_ratio(), 1920.0 / 1080.0);
        assert_relative_eq!(manager.camera().world_up, Vec3::y());
    }
}
