use bevy::{
    prelude::*,
    render::{
        mesh::{Indices, PrimitiveTopology},
        render_asset::RenderAssetUsages,
    },
    window::PrimaryWindow,
};
use physics_scene::{
    NodeId, NodeStore, SceneApp,
    math::Vector3,
    scene::{demo, Color as SceneColor, Geometry, Light, TracingAudio},
};

// Resource holding the running scene
#[derive(Resource)]
struct SceneResource {
    app: SceneApp<NodeStore, TracingAudio>,
}

// Component linking a Bevy entity with a scene node
#[derive(Component)]
struct NodeLink(NodeId);

fn main() {
    let experience = demo::experience();
    let app = match SceneApp::new(&experience, NodeStore::new(), &mut demo::asset_library(), TracingAudio) {
        Ok(app) => app,
        Err(err) => {
            eprintln!("failed to build the scene: {err}");
            return;
        }
    };

    App::new()
        .add_plugins(DefaultPlugins)
        .insert_resource(ClearColor(Color::rgb(0.1, 0.1, 0.1)))
        .insert_resource(SceneResource { app })
        .add_systems(Startup, setup)
        .add_systems(Update, (
            click_bodies,
            physics_step,
            update_transforms,
            camera_controls,
        ).chain())
        .run();
}

fn setup(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    scene: Res<SceneResource>,
) {
    // Camera looking down at the arena
    commands.spawn(Camera3dBundle {
        transform: Transform::from_xyz(4.0, 5.0, 10.0).looking_at(Vec3::ZERO, Vec3::Y),
        ..default()
    });

    let graph = scene.app.graph();
    for light in graph.lights() {
        match *light {
            Light::Directional { position, intensity, cast_shadow } => {
                commands.spawn(DirectionalLightBundle {
                    directional_light: DirectionalLight {
                        illuminance: intensity * 2000.0,
                        shadows_enabled: cast_shadow,
                        ..default()
                    },
                    transform: Transform::from_xyz(position.x, position.y, position.z).looking_at(Vec3::ZERO, Vec3::Y),
                    ..default()
                });
            }
            Light::Ambient { intensity } => {
                commands.insert_resource(AmbientLight {
                    color: Color::WHITE,
                    brightness: intensity * 100.0,
                });
            }
        }
    }

    // One entity per visual node, outlines included
    for (id, node) in graph.iter() {
        let mesh = meshes.add(geometry_mesh(&node.geometry, &node.scale));
        let color = bevy_color(node.color);
        let material = materials.add(StandardMaterial {
            base_color: if node.wireframe { color.with_a(0.3) } else { color },
            alpha_mode: if node.wireframe { AlphaMode::Blend } else { AlphaMode::Opaque },
            double_sided: true,
            cull_mode: None,
            ..default()
        });

        commands.spawn((
            PbrBundle {
                mesh,
                material,
                transform: to_transform(&node.transform),
                ..default()
            },
            NodeLink(id),
        ));
    }
}

/// Builds a flat-shaded mesh with the node scale baked in
fn geometry_mesh(geometry: &Geometry, scale: &Vector3) -> Mesh {
    let (vertices, triangles) = geometry.triangulate(scale);
    let positions: Vec<[f32; 3]> = vertices.iter().map(|v| [v.x, v.y, v.z]).collect();
    let indices: Vec<u32> = triangles.into_iter().flatten().collect();

    let mut mesh = Mesh::new(PrimitiveTopology::TriangleList, RenderAssetUsages::default())
        .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, positions)
        .with_inserted_indices(Indices::U32(indices));
    mesh.duplicate_vertices();
    mesh.compute_flat_normals();
    mesh
}

fn bevy_color(color: SceneColor) -> Color {
    Color::rgb(color.r, color.g, color.b)
}

fn to_transform(pose: &physics_scene::Pose) -> Transform {
    let q = pose.rotation;
    Transform {
        translation: Vec3::new(pose.position.x, pose.position.y, pose.position.z),
        rotation: Quat::from_xyzw(q.i, q.j, q.k, q.w),
        ..default()
    }
}

fn click_bodies(
    mouse: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    cameras: Query<(&Camera, &GlobalTransform)>,
    mut scene: ResMut<SceneResource>,
) {
    if !mouse.just_pressed(MouseButton::Left) {
        return;
    }
    let Some(cursor) = windows.get_single().ok().and_then(|w| w.cursor_position()) else {
        return;
    };
    let Ok((camera, camera_transform)) = cameras.get_single() else {
        return;
    };
    let Some(ray) = camera.viewport_to_world(camera_transform, cursor) else {
        return;
    };

    let origin = Vector3::new(ray.origin.x, ray.origin.y, ray.origin.z);
    let direction = Vector3::new(ray.direction.x, ray.direction.y, ray.direction.z);
    if let Err(err) = scene.app.click_ray(origin.into(), direction) {
        warn!("click failed: {err}");
    }
}

fn physics_step(time: Res<Time>, mut scene: ResMut<SceneResource>) {
    if let Err(err) = scene.app.tick(time.delta_seconds()) {
        error!("tick failed: {err}");
    }
}

fn update_transforms(mut query: Query<(&mut Transform, &NodeLink)>, scene: Res<SceneResource>) {
    use physics_scene::scene::SceneGraph;

    // Mirror node transforms written by the synchronizer
    for (mut transform, link) in query.iter_mut() {
        if let Some(pose) = scene.app.graph().transform(link.0) {
            *transform = to_transform(&pose);
        }
    }
}

fn camera_controls(
    time: Res<Time>,
    keyboard_input: Res<ButtonInput<KeyCode>>,
    mut query: Query<&mut Transform, With<Camera>>,
) {
    let Ok(mut camera_transform) = query.get_single_mut() else {
        return;
    };
    let mut movement = Vec3::ZERO;
    let speed = 5.0;

    if keyboard_input.pressed(KeyCode::KeyW) {
        movement.z -= speed;
    }
    if keyboard_input.pressed(KeyCode::KeyS) {
        movement.z += speed;
    }
    if keyboard_input.pressed(KeyCode::KeyA) {
        movement.x -= speed;
    }
    if keyboard_input.pressed(KeyCode::KeyD) {
        movement.x += speed;
    }
    if keyboard_input.pressed(KeyCode::Space) {
        movement.y += speed;
    }
    if keyboard_input.pressed(KeyCode::ShiftLeft) {
        movement.y -= speed;
    }

    let local_movement = camera_transform.rotation * movement * time.delta_seconds();
    camera_transform.translation += local_movement;

    // Orbit around the arena centre
    if keyboard_input.pressed(KeyCode::ArrowLeft) {
        camera_transform.rotate_around(Vec3::ZERO, Quat::from_rotation_y(0.02));
    }
    if keyboard_input.pressed(KeyCode::ArrowRight) {
        camera_transform.rotate_around(Vec3::ZERO, Quat::from_rotation_y(-0.02));
    }
    if keyboard_input.pressed(KeyCode::ArrowUp) {
        let right = camera_transform.right();
        camera_transform.rotate_around(Vec3::ZERO, Quat::from_axis_angle(*right, 0.02));
    }
    if keyboard_input.pressed(KeyCode::ArrowDown) {
        let right = camera_transform.right();
        camera_transform.rotate_around(Vec3::ZERO, Quat::from_axis_angle(*right, -0.02));
    }
}
