// Host-side tests for the hero scene lifecycle: viewport, pointer damping,
// load gating, device branching and idle motion.

use hero_core::*;

const EPS: f32 = 1e-5;

fn wide_scene() -> HeroScene {
    HeroScene::new(
        SceneConfig::default(),
        ViewportState::new(1600.0, 900.0, 1.0),
        DeviceClass::Wide,
    )
}

fn test_model() -> Model {
    Model {
        root: Transform::default(),
        parts: vec![ground_plane()],
    }
}

#[test]
fn resize_keeps_halves_and_aspect_in_sync() {
    let mut hero = wide_scene();
    let vp = ViewportState::new(1280.0, 720.0, 3.0);
    hero.on_resize(vp);
    assert_eq!(hero.viewport().half_width, 640.0);
    assert_eq!(hero.viewport().half_height, 360.0);
    assert_eq!(hero.viewport().pixel_ratio, MAX_PIXEL_RATIO);
    assert!((hero.camera.aspect - 1280.0 / 720.0).abs() < EPS);
    assert_eq!(vp.physical_size(), (2560, 1440));
}

#[test]
fn camera_uses_configured_clip_planes() {
    let hero = wide_scene();
    assert_eq!(hero.camera.fov_deg, CAMERA_FOV_DEG);
    assert_eq!(hero.camera.near, CAMERA_NEAR);
    assert_eq!(hero.camera.far, CAMERA_FAR);
    assert_eq!(hero.camera.position.z, CAMERA_Z);
}

#[test]
fn pointer_target_is_normalised_from_centre() {
    let vp = ViewportState::new(800.0, 600.0, 1.0);
    let mut p = PointerState::default();
    p.set_target_from_client(0.0, 600.0, &vp);
    assert!((p.target_x - 1.0).abs() < EPS);
    assert!((p.target_y + 1.0).abs() < EPS);
    // Only the target moves until the next frame.
    assert_eq!(p.x, 0.0);
    assert_eq!(p.y, 0.0);
}

#[test]
fn pointer_relaxes_monotonically_without_overshoot() {
    let mut p = PointerState::default();
    p.target_x = 1.0;
    p.target_y = -0.5;
    let mut prev_x = p.x;
    let mut prev_y = p.y;
    for _ in 0..2000 {
        p.relax();
        assert!(p.x >= prev_x && p.x <= 1.0);
        assert!(p.y <= prev_y && p.y >= -0.5);
        prev_x = p.x;
        prev_y = p.y;
    }
    // Error shrinks geometrically with ratio (1 - damping).
    let expected = 1.0 - (1.0 - POINTER_DAMPING_X).powi(2000);
    assert!((p.x - expected).abs() < 1e-3);
}

#[test]
fn frame_is_a_no_op_while_load_is_pending() {
    let mut hero = wide_scene();
    hero.on_pointer_move(0.0, 0.0);
    let camera_before = hero.camera.position;
    for i in 0..600 {
        let t = i as f32 / 60.0;
        assert!(!hero.frame(t, 1.0 / 60.0));
    }
    assert_eq!(*hero.load_state(), LoadState::Pending);
    assert!(hero.scene.subject().is_none());
    assert!(hero.reveal().is_none());
    assert_eq!(hero.pointer.x, 0.0);
    assert_eq!(hero.camera.position, camera_before);
    assert_eq!(hero.frames(), 0);
}

#[test]
fn failed_load_stalls() {
    let mut hero = wide_scene();
    let err = LoadError::Http {
        status: 404,
        status_text: "Not Found".to_string(),
    };
    let transition = hero.complete_load(LoadOutcome::Failed(err.clone()));
    assert_eq!(transition, Ok(LoadTransition::Stalled));
    assert_eq!(*hero.load_state(), LoadState::Failed(err));
    assert!(!hero.frame(1.0, 0.016));
    assert!(hero.scene.subject().is_none());
    assert!(hero.reveal().is_none());
}

#[test]
fn second_completion_is_rejected() {
    let mut hero = wide_scene();
    assert_eq!(
        hero.complete_load(LoadOutcome::Loaded(test_model())),
        Ok(LoadTransition::StartLoop)
    );
    assert_eq!(
        hero.complete_load(LoadOutcome::Loaded(test_model())),
        Err(SceneError::AlreadyLoaded)
    );
}

#[test]
fn loaded_subject_is_flagged_scaled_and_revealed() {
    let mut hero = wide_scene();
    hero.complete_load(LoadOutcome::Loaded(test_model())).unwrap();
    assert!(hero.is_ready());
    let subject = hero.scene.subject().unwrap();
    assert!(subject.parts.iter().all(|p| p.cast_shadow && p.receive_shadow));
    assert_eq!(subject.root.scale.x, LOAD_SCALE_WIDE);
    assert!(hero.reveal().unwrap().is_playing());

    let dt = 1.0 / 60.0;
    let mut t = 0.0;
    // Before the scale step starts the load scale is untouched.
    while t < 1.7 {
        t += dt;
        hero.frame(t, dt);
    }
    assert_eq!(hero.scene.subject().unwrap().root.scale.x, LOAD_SCALE_WIDE);

    while t < 6.5 {
        t += dt;
        hero.frame(t, dt);
    }
    let root = hero.scene.subject().unwrap().root;
    assert_eq!(root.scale, glam::Vec3::splat(REVEAL_SCALE_WIDE));
    assert!(hero.reveal().unwrap().is_complete());
    // Motion writes rotation.x after the reveal every frame.
    assert_eq!(root.rotation.x, -hero.pointer.x);
    assert!((root.rotation.y - REVEAL_ROTATION).abs() < 0.1);
}

#[test]
fn device_class_drives_layout_and_scales() {
    let compact = DeviceClass::Compact;
    let wide = DeviceClass::Wide;
    assert_eq!(compact.reveal_scale(), 0.3);
    assert_eq!(wide.reveal_scale(), 0.5);
    assert_eq!(compact.load_scale(), 1.0);
    assert_eq!(wide.load_scale(), 3.0);
    assert_eq!(compact.title_position(), [50.0, 15.0]);
    assert_eq!(wide.title_position(), [25.0, 19.0]);

    let hero = HeroScene::new(
        SceneConfig::default(),
        ViewportState::new(375.0, 812.0, 3.0),
        compact,
    );
    assert_eq!(hero.camera.position.x, 1.0);
    assert_eq!(wide_scene().camera.position.x, 0.0);
}

#[test]
fn compact_reveal_targets_small_scale() {
    let mut hero = HeroScene::new(
        SceneConfig::default(),
        ViewportState::new(375.0, 812.0, 2.0),
        DeviceClass::Compact,
    );
    hero.complete_load(LoadOutcome::Loaded(test_model())).unwrap();
    assert_eq!(hero.scene.subject().unwrap().root.scale.x, 1.0);
    hero.frame(10.0, 10.0);
    assert_eq!(hero.scene.subject().unwrap().root.scale.y, 0.3);
}

#[test]
fn idle_bob_accumulates_sine_of_elapsed() {
    let mut hero = wide_scene();
    hero.complete_load(LoadOutcome::Loaded(test_model())).unwrap();
    let dt = 0.016_f32;
    let mut expected_y = 0.0_f32;
    for i in 1..=300 {
        let t = i as f32 * dt;
        expected_y += t.sin() * IDLE_BOB_RATE;
        assert!(hero.frame(t, dt));
    }
    let root = hero.scene.subject().unwrap().root;
    assert!((root.position.y - expected_y).abs() < 1e-4);
    // No pointer input: the subject sits at the top x offset.
    assert!((root.position.x - SUBJECT_TOP_X).abs() < EPS);
    assert_eq!(hero.frames(), 300);
}

#[test]
fn pointer_parallax_moves_subject_and_camera() {
    let mut hero = wide_scene();
    hero.complete_load(LoadOutcome::Loaded(test_model())).unwrap();
    // Top-left corner: target (1, 1).
    hero.on_pointer_move(0.0, 0.0);
    hero.frame(0.016, 0.016);
    let px = hero.pointer.x;
    let py = hero.pointer.y;
    assert!((px - POINTER_DAMPING_X).abs() < EPS);
    assert!((py - POINTER_DAMPING_Y).abs() < EPS);
    let root = hero.scene.subject().unwrap().root;
    assert!((root.position.x - (SUBJECT_TOP_X - px)).abs() < EPS);
    assert_eq!(root.rotation.x, -px);
    assert_eq!(hero.camera.position.y, -py);
}

#[test]
fn two_of_three_lights_cast_shadows() {
    let scene = Scene::new();
    assert_eq!(scene.lights.len(), 3);
    let casters: Vec<_> = scene.shadow_casters().collect();
    assert_eq!(casters.len(), 2);
    assert_eq!(casters[0].position, scene.lights[0].position);
    assert_eq!(casters[1].position, scene.lights[2].position);
    for light in casters {
        let shadow = light.shadow.unwrap();
        assert_eq!(shadow.half_extent, SHADOW_HALF_EXTENT);
        assert_eq!(shadow.map_size, SHADOW_MAP_SIZE);
        assert!(light.shadow_view_projection().is_some());
    }
    assert!(scene.lights[1].shadow_view_projection().is_none());
}

#[test]
fn ground_plane_sits_behind_subject() {
    let scene = Scene::new();
    let ground = &scene.ground;
    assert!(ground.cast_shadow && ground.receive_shadow);
    assert_eq!(ground.local.w_axis.z, GROUND_Z);
    assert_eq!(ground.mesh.indices.len(), 6);
}
