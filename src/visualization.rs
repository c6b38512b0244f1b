//! Interactive 3D visualization of puzzle solutions using kiss3d.
//!
//! Only built when the `viz` feature is enabled; `main.rs` falls back to the
//! text renderer in `render.rs` otherwise.

use std::collections::HashMap;

use kiss3d::prelude::*;

use crate::bitboard::Space;
use crate::piece::{Piece, Problem};
use crate::solver::Solution;

fn piece_color(piece: &Piece) -> Color {
    let crate::piece::Color(r, g, b) = piece.color;
    Color::new(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, 1.0)
}

/// A single rendered cube in the 3D scene.
struct RenderedCube {
    node: SceneNode3d,
    base_position: Vec3,
    piece_id: usize,
}

fn build_scene(
    scene: &mut SceneNode3d,
    space: &Space,
    problem: &Problem,
    solution: &Solution,
) -> (Vec<RenderedCube>, HashMap<usize, Vec3>) {
    const CUBE_SIZE: f32 = 0.9;
    const CELL_SPACING: f32 = 1.0;
    let center_offset = Vec3::new(
        -((space.w as f32) - 1.0) / 2.0,
        -((space.h as f32) - 1.0) / 2.0,
        -((space.d as f32) - 1.0) / 2.0,
    );

    let mut piece_centroids: HashMap<usize, Vec3> = HashMap::new();
    let mut rendered_cubes = Vec::new();

    for &(piece_id, orientation) in solution {
        let cells: Vec<(i32, i32, i32)> = orientation.iter_cells(space).collect();
        let position_sum: Vec3 = cells
            .iter()
            .map(|&(x, y, z)| Vec3::new(x as f32, y as f32, z as f32))
            .fold(Vec3::ZERO, |acc, pos| acc + pos);
        piece_centroids.insert(piece_id, position_sum / cells.len() as f32);

        let color = piece_color(&problem.pieces[piece_id]);
        for (x, y, z) in cells {
            let base_position = Vec3::new(
                x as f32 * CELL_SPACING,
                y as f32 * CELL_SPACING,
                z as f32 * CELL_SPACING,
            ) + center_offset;
            let node = scene
                .add_cube(CUBE_SIZE, CUBE_SIZE, CUBE_SIZE)
                .set_color(color)
                .set_position(base_position);
            rendered_cubes.push(RenderedCube {
                node,
                base_position,
                piece_id,
            });
        }
    }

    (rendered_cubes, piece_centroids)
}

/// Displays all solutions in an interactive 3D viewer.
pub fn display(problem: Problem, solutions: Vec<Solution>) {
    pollster::block_on(display_async(problem, solutions));
}

async fn display_async(problem: Problem, solutions: Vec<Solution>) {
    if solutions.is_empty() {
        println!("No solutions to display");
        return;
    }

    let space = problem.space;
    let num_solutions = solutions.len();
    let mut current_solution_index = 0;

    let mut window = Window::new(&format!(
        "Solution 1/{} - [Left/Right] navigate, [W/S] explode, [R] reset",
        num_solutions
    ))
    .await;

    let max_dim = space.w.max(space.h).max(space.d);
    let mut camera = OrbitCamera3d::default();
    camera.set_dist(max_dim as f32 * 2.5);

    let mut scene = SceneNode3d::empty();
    scene
        .add_light(Light::point(100.0))
        .set_position(Vec3::new(5.0, 5.0, 5.0));

    let grid_center = Vec3::new(
        (space.w as f32 - 1.0) / 2.0,
        (space.h as f32 - 1.0) / 2.0,
        (space.d as f32 - 1.0) / 2.0,
    );
    let (mut rendered_cubes, mut piece_centroids) =
        build_scene(&mut scene, &space, &problem, &solutions[current_solution_index]);

    let mut explosion_amount: f32 = 0.0;
    const EXPLOSION_SPEED: f32 = 0.05;
    let mut needs_rebuild = false;
    let mut explode_in = false;
    let mut explode_out = false;

    loop {
        for event in window.events().iter() {
            if let kiss3d::event::WindowEvent::Key(key, action, _) = event.value {
                use kiss3d::event::{Action, Key};
                let pressed = action == Action::Press;
                match key {
                    Key::W => explode_out = pressed,
                    Key::S => explode_in = pressed,
                    Key::R if pressed => explosion_amount = 0.0,
                    Key::Right if pressed => {
                        current_solution_index = (current_solution_index + 1) % num_solutions;
                        needs_rebuild = true;
                    }
                    Key::Left if pressed => {
                        current_solution_index = current_solution_index
                            .checked_sub(1)
                            .unwrap_or(num_solutions - 1);
                        needs_rebuild = true;
                    }
                    _ => {}
                }
            }
        }

        if explode_out {
            explosion_amount += EXPLOSION_SPEED;
        }
        if explode_in {
            explosion_amount = (explosion_amount - EXPLOSION_SPEED).max(0.0);
        }

        if needs_rebuild {
            for mut cube in rendered_cubes.drain(..) {
                cube.node.remove();
            }
            let (new_cubes, new_centroids) =
                build_scene(&mut scene, &space, &problem, &solutions[current_solution_index]);
            rendered_cubes = new_cubes;
            piece_centroids = new_centroids;
            window.set_title(&format!(
                "Solution {}/{} - [Left/Right] navigate, [W/S] explode, [R] reset",
                current_solution_index + 1,
                num_solutions
            ));
            needs_rebuild = false;
        }

        for cube in &mut rendered_cubes {
            let centroid = piece_centroids.get(&cube.piece_id).unwrap();
            let explosion_direction = (*centroid - grid_center).normalize_or_zero();
            cube.node
                .set_position(cube.base_position + explosion_direction * explosion_amount * 2.0);
        }

        if !window.render_3d(&mut scene, &mut camera).await {
            break;
        }
    }
}
