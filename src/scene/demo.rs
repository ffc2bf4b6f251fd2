//! Built-in scene tables.
//!
//! Each function returns a complete [`SceneDescriptor`]; the demos and tests
//! build `SceneApp`s from them.

use std::f32::consts::FRAC_PI_2;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::bodies::{AutoCollider, BodyDescriptor, BodyFlags, ColliderDesc, ColliderShape, KinematicPath, Material, VisualDesc};
use crate::core::SceneConfig;
use crate::math::{rotation_from_euler, Pose, Vector3};
use crate::scene::assets::MeshLibrary;
use crate::scene::composer::{LightDesc, SceneDescriptor};
use crate::scene::geometry::{Color, Geometry};

/// Asset path of the loaded burger model
pub const HAMBURGER: &str = "hamburger.glb";

/// Number of falling cubes in [`experience`]
pub const INSTANCE_COUNT: usize = 100;

/// Arena walls span y = -1 to 23, above the highest cube layer
const WALL_HALF_HEIGHT: f32 = 12.0;
const WALL_CENTER: f32 = 11.0;

fn default_lights() -> Vec<LightDesc> {
    vec![
        LightDesc::Directional {
            position: Vector3::new(1.0, 2.0, 3.0),
            intensity: 4.5,
            cast_shadow: true,
        },
        LightDesc::Ambient { intensity: 1.5 },
    ]
}

fn floor() -> BodyDescriptor {
    BodyDescriptor::fixed("floor")
        .at(Pose::from_xyz(0.0, -1.25, 0.0))
        .with_material(Material::grippy())
        .with_visual(VisualDesc::new(Geometry::cuboid(10.0, 0.5, 10.0), Color::GREEN_YELLOW).receiving_shadow())
}

/// The first lesson: a ball dropping into a torus that rests on the floor.
///
/// The torus uses an explicit ball collider, so the ball bounces off an
/// invisible sphere; debug outlines make that visible.
pub fn first_steps() -> SceneDescriptor {
    let ball = BodyDescriptor::dynamic("ball")
        .at(Pose::from_xyz(0.0, 4.0, 0.0))
        .with_visual(VisualDesc::new(Geometry::sphere(1.0), Color::ORANGE))
        .auto_collider(AutoCollider::Ball);

    let torus = BodyDescriptor::dynamic("torus")
        .at(Pose::from_xyz(0.0, 1.0, 0.0).with_rotation(rotation_from_euler(FRAC_PI_2, 0.0, 0.0)))
        .with_visual(VisualDesc::new(Geometry::torus(1.0, 0.5, 16, 32), Color::MEDIUM_PURPLE))
        .with_colliders(vec![ColliderDesc::new(ColliderShape::ball(1.5))]);

    SceneDescriptor {
        config: SceneConfig::default().with_debug(true),
        lights: default_lights(),
        bodies: vec![ball, torus, floor()],
    }
}

/// The full scene with a fixed random layout for the falling cubes
pub fn experience() -> SceneDescriptor {
    experience_with(INSTANCE_COUNT, 0)
}

/// The full scene: ball, clickable cube, floor, twister, burger, walls and
/// `instances` cubes raining down from positions drawn with `seed`
pub fn experience_with(instances: usize, seed: u64) -> SceneDescriptor {
    let ball = BodyDescriptor::dynamic("ball")
        .at(Pose::from_xyz(-1.5, 2.0, 0.0))
        .with_visual(VisualDesc::new(Geometry::sphere(1.0), Color::ORANGE))
        .auto_collider(AutoCollider::Ball);

    let cube = BodyDescriptor::dynamic("cube")
        .at(Pose::from_xyz(1.5, 2.0, 0.0))
        .with_material(Material::grippy())
        .with_visual(VisualDesc::new(Geometry::cuboid(1.0, 1.0, 1.0), Color::MEDIUM_PURPLE))
        .with_colliders(vec![ColliderDesc::new(ColliderShape::cuboid(0.5, 0.5, 0.5)).with_mass(2.0)])
        .with_flags(BodyFlags::INTERACTIVE | BodyFlags::COLLISION_CUE);

    let twister = BodyDescriptor::kinematic("twister", KinematicPath::twister(2.0, -0.8))
        .with_material(Material::frictionless())
        .with_visual(VisualDesc::new(Geometry::cuboid(1.0, 1.0, 1.0), Color::RED).scaled(Vector3::new(0.4, 0.4, 3.0)))
        .auto_collider(AutoCollider::Cuboid);

    let hamburger = BodyDescriptor::dynamic("hamburger")
        .at(Pose::from_xyz(0.0, 4.0, 0.0))
        .with_visual(VisualDesc::asset(HAMBURGER).scaled(Vector3::repeat(0.25)))
        .with_colliders(vec![ColliderDesc::new(ColliderShape::cylinder(0.5, 1.25))]);

    // Tall enough to hold the whole rain of cubes
    let walls = BodyDescriptor::fixed("walls").with_colliders(vec![
        ColliderDesc::new(ColliderShape::cuboid(6.0, WALL_HALF_HEIGHT, 0.5)).at(Pose::from_xyz(0.0, WALL_CENTER, 5.5)),
        ColliderDesc::new(ColliderShape::cuboid(6.0, WALL_HALF_HEIGHT, 0.5)).at(Pose::from_xyz(0.0, WALL_CENTER, -5.5)),
        ColliderDesc::new(ColliderShape::cuboid(0.5, WALL_HALF_HEIGHT, 5.0)).at(Pose::from_xyz(5.5, WALL_CENTER, 0.0)),
        ColliderDesc::new(ColliderShape::cuboid(0.5, WALL_HALF_HEIGHT, 5.0)).at(Pose::from_xyz(-5.5, WALL_CENTER, 0.0)),
    ]);

    let mut bodies = vec![ball, cube, floor(), twister, hamburger, walls];
    bodies.extend(falling_cubes(instances, seed));

    SceneDescriptor {
        config: SceneConfig::default(),
        lights: default_lights(),
        bodies,
    }
}

/// Cubes stacked in jittered 4x4 layers above the floor, with random orientations.
///
/// Neighbours start further apart than a cube's diagonal, so no two overlap.
pub fn falling_cubes(count: usize, seed: u64) -> Vec<BodyDescriptor> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|i| {
            let layer = i / 16;
            let (row, col) = ((i % 16) / 4, i % 4);
            let position = Vector3::new(
                col as f32 * 2.0 - 3.0 + rng.gen_range(-0.1..0.1),
                6.0 + layer as f32 * 2.0,
                row as f32 * 2.0 - 3.0 + rng.gen_range(-0.1..0.1),
            );
            let rotation = rotation_from_euler(rng.gen(), rng.gen(), rng.gen());
            BodyDescriptor::dynamic(format!("cube{i}"))
                .at(Pose::new(position, rotation))
                .with_visual(VisualDesc::new(Geometry::cuboid(1.0, 1.0, 1.0), Color::TOMATO))
                .auto_collider(AutoCollider::Cuboid)
        })
        .collect()
}

/// Stand-in geometry for the burger model: a squat drum at model scale
pub fn hamburger_mesh() -> Geometry {
    Geometry::cylinder(5.0, 4.0)
}

/// Asset library holding every mesh the built-in scenes reference
pub fn asset_library() -> MeshLibrary {
    MeshLibrary::new().with(HAMBURGER, hamburger_mesh())
}
