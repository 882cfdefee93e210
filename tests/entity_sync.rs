use bevy::prelude::*;
use button_rush::core::config::GameConfig;
use button_rush::gameplay::entities::{build_arena, scene_boxes, sync_entity_pairs, EntityArena};
use button_rush::physics::{build_world, PhysicsWorld};

fn synced_app() -> App {
    let cfg = GameConfig::default();
    let mut app = App::new();
    app.add_plugins(MinimalPlugins);
    let mut physics = build_world(&cfg);
    let arena = build_arena(&mut physics, &scene_boxes(&cfg), |spec| {
        app.world_mut()
            .spawn(Transform::from_translation(spec.position).with_scale(Vec3::splat(2.0)))
            .id()
    });
    app.insert_resource(physics).insert_resource(arena);
    app.add_systems(Update, sync_entity_pairs);
    app
}

fn snapshot(app: &App) -> Vec<Transform> {
    let arena = app.world().resource::<EntityArena>();
    arena
        .iter()
        .map(|p| *app.world().get::<Transform>(p.mesh).expect("mesh alive"))
        .collect()
}

#[test]
fn mesh_pose_equals_body_pose_after_steps() {
    let mut app = synced_app();
    for _ in 0..5 {
        app.world_mut().resource_mut::<PhysicsWorld>().step(1.0 / 60.0, 0.1);
        app.update();
        let physics = app.world().resource::<PhysicsWorld>();
        for pair in app.world().resource::<EntityArena>().iter() {
            let pose = physics.pose(pair.body).expect("body exists");
            let t = app.world().get::<Transform>(pair.mesh).expect("mesh alive");
            assert_eq!(t.translation.to_array(), pose.translation.to_array());
            assert_eq!(t.rotation.to_array(), pose.rotation.to_array());
            assert_eq!(t.scale, Vec3::splat(2.0));
        }
    }
}

#[test]
fn second_sync_without_step_changes_nothing() {
    let mut app = synced_app();
    app.world_mut().resource_mut::<PhysicsWorld>().step(1.0 / 60.0, 0.2);
    app.update();
    let first = snapshot(&app);
    app.update();
    assert_eq!(first, snapshot(&app));
}

#[test]
fn player_settles_on_ground_and_button_stays_put() {
    let mut app = synced_app();
    for _ in 0..180 {
        app.world_mut().resource_mut::<PhysicsWorld>().step(1.0 / 60.0, 1.0 / 60.0);
    }
    app.update();
    let arena = app.world().resource::<EntityArena>();
    let player = arena.player().expect("player pair");
    let button = arena.button().expect("button pair");
    let p = app.world().get::<Transform>(player.mesh).unwrap().translation;
    let b = app.world().get::<Transform>(button.mesh).unwrap().translation;
    assert!((p.y - 0.5).abs() < 0.05, "player y {}", p.y);
    assert_eq!(b, Vec3::new(0.0, 0.25, -5.0));
}
