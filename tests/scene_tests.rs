use approx::assert_relative_eq;
use physics_scene::{
    BodyDescriptor, BodyFlags, BodyKind, ColliderDesc, ColliderShape, KinematicPath, Material, NodeStore, Pose,
    SceneApp, SceneConfig, SceneDescriptor, Vector3,
    bodies::{AutoCollider, VisualDesc},
    error::SceneError,
    scene::{
        demo, AudioSink, Color, CueLog, Geometry, InteractionController, MeshLibrary, SceneGraph,
    },
};

const DT: f32 = 1.0 / 60.0;

fn build(descriptor: &SceneDescriptor) -> SceneApp<NodeStore, CueLog> {
    let config = &descriptor.config;
    let controller = InteractionController::with_seed(CueLog::new(), config.jump_strength, config.cue.clone(), 7);
    SceneApp::with_controller(descriptor, NodeStore::new(), &mut demo::asset_library(), controller)
        .expect("scene should compose")
}

fn scene(bodies: Vec<BodyDescriptor>) -> SceneDescriptor {
    SceneDescriptor {
        bodies,
        ..SceneDescriptor::default()
    }
}

fn floor() -> BodyDescriptor {
    BodyDescriptor::fixed("floor")
        .at(Pose::from_xyz(0.0, -1.25, 0.0))
        .with_material(Material::grippy())
        .with_visual(VisualDesc::new(Geometry::cuboid(10.0, 0.5, 10.0), Color::GREEN_YELLOW))
}

fn node_pose(app: &SceneApp<NodeStore, CueLog>, name: &str) -> Pose {
    let node = app.node(name).expect("body should have a node");
    app.graph().transform(node).expect("node should exist")
}

#[test]
fn test_dynamic_node_follows_fall() {
    let ball = BodyDescriptor::dynamic("ball")
        .at(Pose::from_xyz(0.0, 10.0, 0.0))
        .with_visual(VisualDesc::new(Geometry::sphere(0.5), Color::ORANGE));
    let mut app = build(&scene(vec![ball]));

    let mut last_height = node_pose(&app, "ball").position.y;
    assert_relative_eq!(last_height, 10.0);

    for _ in 0..20 {
        let report = app.tick(DT).unwrap();
        assert_eq!(report.sync.read_back, 1);

        let height = node_pose(&app, "ball").position.y;
        assert!(height < last_height);
        last_height = height;

        // Exact copy, no smoothing
        let body = app.body("ball").unwrap();
        assert_eq!(node_pose(&app, "ball"), app.world().pose(body).unwrap());
    }
}

#[test]
fn test_fixed_node_never_changes() {
    let mut app = build(&demo::experience_with(10, 3));
    let initial = node_pose(&app, "floor");

    for _ in 0..120 {
        app.tick(DT).unwrap();
        assert_eq!(node_pose(&app, "floor"), initial);
    }
    assert_eq!(initial, Pose::from_xyz(0.0, -1.25, 0.0));
}

#[test]
fn test_mass_scaled_impulse_is_mass_independent() {
    let light = BodyDescriptor::dynamic("light")
        .with_material(Material::default().with_density(1.0))
        .with_colliders(vec![ColliderDesc::new(ColliderShape::ball(0.5))]);
    let heavy = BodyDescriptor::dynamic("heavy")
        .at(Pose::from_xyz(5.0, 0.0, 0.0))
        .with_material(Material::default().with_density(8.0))
        .with_colliders(vec![ColliderDesc::new(ColliderShape::ball(0.5))]);
    let mut descriptor = scene(vec![light, heavy]);
    descriptor.config = SceneConfig::default().with_gravity(Vector3::zeros());
    let mut app = build(&descriptor);
    app.tick(DT).unwrap();

    let light = app.body("light").unwrap();
    let heavy = app.body("heavy").unwrap();
    let m1 = app.world().mass(light).unwrap();
    let m2 = app.world().mass(heavy).unwrap();
    assert!((m1 - m2).abs() > 1.0);

    let k = 3.0;
    let world = app.world_mut();
    world.apply_impulse(light, Vector3::new(0.0, k * m1, 0.0)).unwrap();
    world.apply_impulse(heavy, Vector3::new(0.0, k * m2, 0.0)).unwrap();

    let v1 = app.world().linear_velocity(light).unwrap();
    let v2 = app.world().linear_velocity(heavy).unwrap();
    assert_relative_eq!(v1.y, k, epsilon = 1e-4);
    assert_relative_eq!(v1.y, v2.y, epsilon = 1e-4);
}

#[test]
fn test_orbit_law_is_exact() {
    let path = KinematicPath::twister(2.0, -0.8);

    for t in [0.0_f32, 0.25, 1.0, 3.7, 12.5] {
        let pose = path.pose_at(t);
        assert_relative_eq!(pose.position.x, 2.0 * (0.5 * t).cos(), epsilon = 1e-6);
        assert_relative_eq!(pose.position.y, -0.8);
        assert_relative_eq!(pose.position.z, 2.0 * (0.5 * t).sin(), epsilon = 1e-6);

        // Rotation of 3t about +Y sends +X to (cos 3t, 0, -sin 3t)
        let x = pose.rotation * Vector3::x();
        assert_relative_eq!(x.x, (3.0 * t).cos(), epsilon = 1e-5);
        assert_relative_eq!(x.y, 0.0, epsilon = 1e-5);
        assert_relative_eq!(x.z, -(3.0 * t).sin(), epsilon = 1e-5);
    }
}

#[test]
fn test_twister_is_driven_by_its_path() {
    let mut app = build(&demo::experience_with(0, 0));
    let twister = app.body("twister").unwrap();
    let path = app.registry().get(twister).and_then(|entry| entry.path).unwrap();

    for _ in 0..45 {
        let report = app.tick(DT).unwrap();
        assert_eq!(report.sync.driven, 1);
    }

    let expected = path.pose_at(app.world().time());
    let simulated = app.world().pose(twister).unwrap();
    assert_relative_eq!(simulated.position, expected.position, epsilon = 1e-4);
    assert!(simulated.rotation.angle_to(&expected.rotation) < 1e-3);

    let node = node_pose(&app, "twister");
    assert_relative_eq!(node.position, expected.position, epsilon = 1e-6);
}

#[test]
fn test_twister_speed_with_several_substeps() {
    let mut app = build(&demo::experience_with(0, 0));
    let twister = app.body("twister").unwrap();
    let path = app.registry().get(twister).and_then(|entry| entry.path).unwrap();

    // Two substeps per tick
    for _ in 0..10 {
        let report = app.tick(2.0 * DT).unwrap();
        assert_eq!(report.sync.driven, 1);

        // Orbit speed is radius * orbit_speed = 2 * 0.5
        let speed = app.world().linear_velocity(twister).unwrap().norm();
        assert_relative_eq!(speed, 1.0, epsilon = 1e-2);
    }

    let expected = path.pose_at(app.world().time());
    let simulated = app.world().pose(twister).unwrap();
    assert_relative_eq!(simulated.position, expected.position, epsilon = 1e-4);
    assert_relative_eq!(app.world().time(), 20.0 * DT, epsilon = 1e-4);
}

#[test]
fn test_double_click_doubles_impulse() {
    let descriptor = demo::experience_with(0, 0);

    let mut once = build(&descriptor);
    let mut twice = build(&descriptor);
    once.tick(DT).unwrap();
    twice.tick(DT).unwrap();

    let cube = once.body("cube").unwrap();
    let node = once.node("cube").unwrap();
    let before = once.world().linear_velocity(cube).unwrap().y;

    assert_eq!(once.click(node).unwrap(), Some(cube));
    assert_eq!(twice.click(node).unwrap(), Some(cube));
    assert_eq!(twice.click(node).unwrap(), Some(cube));

    let single = once.world().linear_velocity(cube).unwrap().y - before;
    let double = twice.world().linear_velocity(cube).unwrap().y - before;

    // Mass-scaled, so the jump is the configured velocity change
    assert_relative_eq!(single, descriptor.config.jump_strength, epsilon = 1e-3);
    assert_relative_eq!(double, 2.0 * single, epsilon = 1e-3);
}

#[test]
fn test_click_on_passive_body_is_noop() {
    let mut app = build(&demo::experience_with(0, 0));
    app.tick(DT).unwrap();

    let ball = app.body("ball").unwrap();
    let before = app.world().linear_velocity(ball).unwrap();
    let node = app.node("ball").unwrap();

    assert_eq!(app.click(node).unwrap(), None);
    assert_eq!(app.world().linear_velocity(ball).unwrap(), before);
}

#[test]
fn test_landing_plays_one_cue() {
    let cube = BodyDescriptor::dynamic("cube")
        .at(Pose::from_xyz(0.0, -0.45, 0.0))
        .with_material(Material::grippy())
        .with_visual(VisualDesc::new(Geometry::cuboid(1.0, 1.0, 1.0), Color::MEDIUM_PURPLE))
        .with_flags(BodyFlags::COLLISION_CUE);
    let mut app = build(&scene(vec![floor(), cube]));

    let mut cues = Vec::new();
    for _ in 0..240 {
        cues.push(app.tick(DT).unwrap().cues);
    }

    let first = cues.iter().position(|c| *c > 0).expect("landing should play a cue");
    assert_eq!(cues[first], 1);
    assert!(cues[first + 1..].iter().all(|c| *c == 0), "resting contact must stay silent");
    assert_eq!(app.controller().audio().count(), 1);

    let (cue, volume) = &app.controller().audio().played()[0];
    assert_eq!(cue, &SceneConfig::default().cue);
    assert!((0.0..1.0).contains(volume));
}

#[test]
fn test_contacts_without_cue_flag_are_silent() {
    let ball = BodyDescriptor::dynamic("ball")
        .at(Pose::from_xyz(0.0, 0.0, 0.0))
        .with_visual(VisualDesc::new(Geometry::sphere(0.5), Color::ORANGE));
    let mut app = build(&scene(vec![floor(), ball]));

    let mut started = 0;
    for _ in 0..120 {
        let report = app.tick(DT).unwrap();
        started += report.contacts_started;
        assert_eq!(report.cues, 0);
    }
    assert!(started >= 1);
    assert_eq!(app.controller().audio().count(), 0);
}

#[test]
fn test_ray_click_picks_cube() {
    let mut app = build(&demo::experience_with(0, 0));
    app.tick(DT).unwrap();

    let cube = app.body("cube").unwrap();
    let before = app.world().linear_velocity(cube).unwrap().y;
    let picked = app
        .click_ray(Vector3::new(1.5, 10.0, 0.0).into(), Vector3::new(0.0, -1.0, 0.0))
        .unwrap();

    assert_eq!(picked, Some(cube));
    assert!(app.world().linear_velocity(cube).unwrap().y > before + 4.0);

    // Nothing up there
    let missed = app
        .click_ray(Vector3::new(0.0, 10.0, 0.0).into(), Vector3::new(0.0, 1.0, 0.0))
        .unwrap();
    assert_eq!(missed, None);
}

#[test]
fn test_registry_pairs_bodies_and_nodes() {
    let app = build(&demo::experience_with(3, 0));
    let registry = app.registry();

    assert_eq!(registry.len(), 9);
    // Walls have colliders only
    assert_eq!(app.graph().len(), 8);
    assert!(app.node("walls").is_none());

    for entry in registry.iter() {
        if let Some(node) = entry.node {
            assert_eq!(registry.body_for_node(node).unwrap().handle, entry.handle);
            assert_eq!(app.graph().node(node).unwrap().name, entry.name);
        }
    }
    assert_eq!(registry.find("twister").unwrap().kind, BodyKind::KinematicPosition);
    assert_eq!(app.graph().lights().len(), 2);
}

#[test]
fn test_scaled_visual_node() {
    let app = build(&demo::experience_with(0, 0));
    let node = app.graph().node(app.node("hamburger").unwrap()).unwrap();

    assert_relative_eq!(node.scale, Vector3::repeat(0.25));
    assert!(matches!(node.geometry, Geometry::Cylinder { .. }));
}

#[test]
fn test_auto_collider_follows_visual_scale() {
    // The twister's unit box, held still at its starting pose
    let mut twister = demo::experience_with(0, 0)
        .bodies
        .into_iter()
        .find(|body| body.name == "twister")
        .unwrap();
    twister.kind = BodyKind::Fixed;
    twister.path = None;
    let start = twister.pose.position;
    assert_relative_eq!(start, Vector3::new(2.0, -0.8, 0.0), epsilon = 1e-6);

    let mut app = build(&scene(vec![twister]));
    app.tick(DT).unwrap();
    let handle = app.body("twister").unwrap();

    let faces = [
        (Vector3::new(10.0, -0.8, 0.0), Vector3::new(-1.0, 0.0, 0.0), 10.0 - 2.0 - 0.2),
        (Vector3::new(2.0, 10.0, 0.0), Vector3::new(0.0, -1.0, 0.0), 10.0 - (-0.8 + 0.2)),
        (Vector3::new(2.0, -0.8, 10.0), Vector3::new(0.0, 0.0, -1.0), 10.0 - 1.5),
    ];
    for (origin, direction, distance) in faces {
        let hit = app.world().cast_ray(origin.into(), direction, 100.0).expect("ray should hit the twister");
        assert_eq!(hit.body, handle);
        assert_relative_eq!(hit.distance, distance, epsilon = 1e-4);
    }
}

#[test]
fn test_cylinder_gets_analytic_collider() {
    let drum = Geometry::cylinder(0.5, 2.0);
    assert!(drum.has_analytic_collider());
    assert_eq!(AutoCollider::default_for(&drum), AutoCollider::Cylinder);

    let body = BodyDescriptor::dynamic("drum")
        .at(Pose::from_xyz(0.0, 3.0, 0.0))
        .with_visual(VisualDesc::new(drum, Color::RED).scaled(Vector3::new(2.0, 1.0, 2.0)));
    let mut descriptor = scene(vec![body]);
    descriptor.config = descriptor.config.with_debug(true);
    let app = build(&descriptor);

    let entry = app.registry().find("drum").unwrap();
    let outline = app.graph().node(entry.debug_nodes[0].0).unwrap();
    match outline.geometry {
        Geometry::Cylinder { radius, height, .. } => {
            assert_relative_eq!(radius, 1.0, epsilon = 1e-5);
            assert_relative_eq!(height, 2.0, epsilon = 1e-5);
        }
        ref other => panic!("expected a cylinder outline, got {other:?}"),
    }
}

#[test]
fn test_kinematic_velocity_body_is_read_back() {
    let slider = BodyDescriptor::new("slider", BodyKind::KinematicVelocity)
        .with_visual(VisualDesc::new(Geometry::cuboid(1.0, 1.0, 1.0), Color::WHITE));
    let mut app = build(&scene(vec![slider]));
    let handle = app.body("slider").unwrap();
    app.world_mut()
        .set_kinematic_velocity(handle, Vector3::new(1.0, 0.0, 0.0), Vector3::new(0.0, 0.5, 0.0))
        .unwrap();

    for _ in 0..30 {
        let report = app.tick(DT).unwrap();
        assert_eq!(report.sync.read_back, 1);
        assert_eq!(report.sync.driven, 0);
        assert_eq!(node_pose(&app, "slider"), app.world().pose(handle).unwrap());
    }

    assert_relative_eq!(node_pose(&app, "slider").position.x, 0.5, epsilon = 1e-3);
}

#[test]
fn test_missing_asset_aborts_setup() {
    let descriptor = demo::experience_with(0, 0);
    let result = SceneApp::new(&descriptor, NodeStore::new(), &mut MeshLibrary::new(), CueLog::new());

    match result {
        Err(SceneError::AssetNotFound(path)) => assert_eq!(path, demo::HAMBURGER),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("setup should fail without the burger mesh"),
    }
}

#[test]
fn test_auto_collider_needs_visual() {
    let body = BodyDescriptor::dynamic("ghost");
    let result = SceneApp::new(&scene(vec![body]), NodeStore::new(), &mut MeshLibrary::new(), CueLog::new());
    assert!(matches!(result, Err(SceneError::InvalidCollider(_))));
}

fn torus_outline_vertices(kind: BodyKind, auto: Option<AutoCollider>) -> usize {
    let mut torus = BodyDescriptor::new("torus", kind)
        .at(Pose::from_xyz(0.0, 3.0, 0.0))
        .with_visual(VisualDesc::new(Geometry::torus(1.0, 0.5, 16, 32), Color::MEDIUM_PURPLE));
    if let Some(auto) = auto {
        torus = torus.auto_collider(auto);
    }
    let mut descriptor = scene(vec![torus]);
    descriptor.config = descriptor.config.with_debug(true);
    let app = build(&descriptor);

    let entry = app.registry().find("torus").unwrap();
    assert_eq!(entry.debug_nodes.len(), 1);
    let outline = app.graph().node(entry.debug_nodes[0].0).unwrap();
    assert!(outline.wireframe);
    match &outline.geometry {
        Geometry::Mesh { vertices, .. } => vertices.len(),
        other => panic!("expected a mesh outline, got {other:?}"),
    }
}

#[test]
fn test_torus_defaults_to_convex_hull() {
    assert_eq!(AutoCollider::default_for(&Geometry::torus(1.0, 0.5, 16, 32)), AutoCollider::Hull);
    assert_eq!(AutoCollider::default_for(&Geometry::sphere(1.0)), AutoCollider::Ball);

    let (torus_vertices, _) = Geometry::torus(1.0, 0.5, 16, 32).triangulate(&Vector3::repeat(1.0));
    let hull = torus_outline_vertices(BodyKind::Dynamic, None);
    assert!(hull < torus_vertices.len());
}

#[test]
fn test_trimesh_only_on_fixed_bodies() {
    let (torus_vertices, _) = Geometry::torus(1.0, 0.5, 16, 32).triangulate(&Vector3::repeat(1.0));

    let fixed = torus_outline_vertices(BodyKind::Fixed, Some(AutoCollider::Trimesh));
    assert_eq!(fixed, torus_vertices.len());

    let dynamic = torus_outline_vertices(BodyKind::Dynamic, Some(AutoCollider::Trimesh));
    assert!(dynamic < torus_vertices.len());
}

#[test]
fn test_debug_outlines_follow_body() {
    let mut app = build(&demo::first_steps());
    let ball = app.registry().find("ball").unwrap().clone();
    assert_eq!(ball.debug_nodes.len(), 1);

    for _ in 0..30 {
        app.tick(DT).unwrap();
    }

    let body_pose = app.world().pose(ball.handle).unwrap();
    let outline = app.graph().transform(ball.debug_nodes[0].0).unwrap();
    assert_relative_eq!(outline.position, body_pose.position, epsilon = 1e-5);
    assert_eq!(app.registry().body_for_node(ball.debug_nodes[0].0).unwrap().handle, ball.handle);
}

#[test]
fn test_full_scene_runs() {
    let mut app = build(&demo::experience());
    for _ in 0..120 {
        app.tick(DT).unwrap();
    }

    // Everything that fell stays above the floor and inside the walls
    for entry in app.registry().iter().filter(|e| e.kind == BodyKind::Dynamic) {
        let pose = app.world().pose(entry.handle).unwrap();
        assert!(pose.position.y > -2.0, "{} fell through the floor", entry.name);
        assert!(
            pose.position.x.abs() < 5.0 && pose.position.z.abs() < 5.0,
            "{} left the arena",
            entry.name
        );
    }
}

struct Silent;

impl AudioSink for Silent {
    fn play(&mut self, _cue: &str, _volume: f32) {}
}

#[test]
fn test_custom_audio_sink() {
    let descriptor = demo::experience_with(0, 0);
    let mut app = SceneApp::new(&descriptor, NodeStore::new(), &mut demo::asset_library(), Silent).unwrap();
    app.tick(DT).unwrap();
    assert!(app.require_node("cube").is_ok());
    assert!(matches!(app.require_node("nope"), Err(SceneError::NodeNotFound(_))));
}
