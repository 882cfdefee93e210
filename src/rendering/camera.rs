use bevy::prelude::*;
use bevy::window::WindowResized;

use crate::core::config::{hex_color, vec3, GameConfig};
use crate::core::system::FrameSet;

/// Marker for the single perspective camera.
#[derive(Component, Debug)]
pub struct GameCamera;

pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, (setup_camera, setup_lighting))
            .add_systems(Update, handle_window_resize.in_set(FrameSet::Presentation));
    }
}

/// `width / height`, or `None` for a zero-sized (minimized) window.
pub fn aspect_ratio(width: f32, height: f32) -> Option<f32> {
    if width > 0.0 && height > 0.0 && width.is_finite() && height.is_finite() {
        Some(width / height)
    } else {
        None
    }
}

fn setup_camera(mut commands: Commands, cfg: Res<GameConfig>) {
    let cam = &cfg.camera;
    let aspect = aspect_ratio(cfg.window.width, cfg.window.height).unwrap_or(16.0 / 9.0);
    commands.insert_resource(ClearColor(hex_color(cam.clear_color)));
    commands.spawn((
        Camera3d::default(),
        Projection::Perspective(PerspectiveProjection {
            fov: cam.fov_degrees.to_radians(),
            near: cam.near,
            far: cam.far,
            aspect_ratio: aspect,
        }),
        Transform::from_translation(vec3(cam.position)).looking_at(vec3(cam.look_at), Vec3::Y),
        GameCamera,
    ));
}

fn setup_lighting(mut commands: Commands, cfg: Res<GameConfig>) {
    let light = &cfg.lighting;
    commands.insert_resource(AmbientLight {
        color: Color::WHITE,
        brightness: light.ambient_brightness,
        ..default()
    });
    commands.spawn((
        DirectionalLight {
            illuminance: light.sun_illuminance,
            shadows_enabled: light.shadows,
            ..default()
        },
        Transform::from_translation(vec3(light.sun_position)).looking_at(Vec3::ZERO, Vec3::Y),
    ));
    info!(target: "scene", "Camera and lights ready");
}

pub fn handle_window_resize(
    mut resize_events: EventReader<WindowResized>,
    mut cameras: Query<&mut Projection, With<GameCamera>>,
) {
    let Some(last) = resize_events.read().last().cloned() else {
        return;
    };
    let Some(aspect) = aspect_ratio(last.width, last.height) else {
        debug!(target: "scene", "Ignoring resize to {}x{}", last.width, last.height);
        return;
    };
    for mut projection in &mut cameras {
        if let Projection::Perspective(p) = projection.as_mut() {
            p.aspect_ratio = aspect;
        }
    }
    debug!(target: "scene", "Viewport {}x{} (aspect {aspect:.3})", last.width, last.height);
}
