//! Interactive lattice explorer: project screen points and place voxels.

use std::io::{self, Write};

use glam::Vec2;
use tracing_subscriber::EnvFilter;
use voxel_lattice::{CameraPose, LatticePosition, LatticeProjector, VoxelStore};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    println!();
    println!("╔══════════════════════════════════════════════════════════╗");
    println!("║                 Voxel Lattice Explorer                   ║");
    println!("╚══════════════════════════════════════════════════════════╝");
    println!();

    let cell_size: f32 = read_line("  Cell size (default 1.0): ")
        .trim().parse().ok().filter(|s: &f32| *s > 0.0).unwrap_or(1.0);
    let distance: f32 = read_line("  Build distance (default 6.0): ")
        .trim().parse().ok().filter(|d: &f32| *d > 0.0).unwrap_or(6.0);

    let projector = LatticeProjector::new(cell_size, distance);
    let camera    = CameraPose::default();
    let mut store = VoxelStore::new();

    println!("\n  ✓  cell {}  distance {}  fov {}°\n", cell_size, distance, camera.fov_y_degrees);

    loop {
        print_ops_menu();
        let choice = read_line("Command: ").trim().to_ascii_lowercase();

        match choice.as_str() {
            "1" => {
                let Some(screen) = read_screen_point() else { continue; };
                match projector.project_world(screen, &camera) {
                    Some(p) => println!("  World point  : ({:.3}, {:.3}, {:.3})", p.x, p.y, p.z),
                    None    => println!("  World point  : degenerate"),
                }
                println!("  Lattice cell : {}", projector.project(screen, &camera));
            }
            "2" => {
                let Some(screen) = read_screen_point() else { continue; };
                let pos = projector.project(screen, &camera);
                report_place(&mut store, pos);
            }
            "3" => {
                let raw = read_line("  Cell i j k: ");
                let parts: Vec<i32> = raw.split_whitespace()
                    .filter_map(|s| s.parse().ok())
                    .collect();
                if parts.len() != 3 {
                    println!("  ⚠  Enter three integers.");
                    continue;
                }
                report_place(&mut store, LatticePosition::new(parts[0], parts[1], parts[2]));
            }
            "4" => {
                if store.is_empty() {
                    println!("  Store is empty.");
                }
                for (n, v) in store.iter().enumerate() {
                    println!("    [{:>4}]  {}  #{:06X}", n, v.position, v.color & 0xFFFFFF);
                }
            }
            "5" => {
                store.clear();
                println!("  Cleared.  Count: {}", store.count());
            }
            "6" => println!("  Count: {}", store.count()),
            "q" | "quit" => {
                println!("\nGoodbye!\n");
                break;
            }
            _ => println!("  ⚠  Unknown command."),
        }
        println!();
    }
}

fn report_place(store: &mut VoxelStore, pos: LatticePosition) {
    if store.place(pos).placed() {
        println!("  Placed at {}.  Count: {}", pos, store.count());
    } else {
        println!("  {} already occupied.  Count: {}", pos, store.count());
    }
}

fn read_screen_point() -> Option<Vec2> {
    let raw = read_line("  Screen x y (0–1, origin top-left): ");
    let parts: Vec<f32> = raw.split_whitespace()
        .filter_map(|s| s.parse().ok())
        .collect();
    if parts.len() != 2 {
        println!("  ⚠  Enter two numbers.");
        return None;
    }
    Some(Vec2::new(parts[0], parts[1]))
}

fn print_ops_menu() {
    println!("  ┌─────────────────────────────────────────────────────────┐");
    println!("  │  1. Project screen point      4. List voxels            │");
    println!("  │  2. Place at screen point     5. Clear                  │");
    println!("  │  3. Place at cell i j k       6. Count     q. Quit      │");
    println!("  └─────────────────────────────────────────────────────────┘");
}

fn read_line(prompt: &str) -> String {
    print!("{}", prompt);
    io::stdout().flush().ok();
    let mut buf = String::new();
    io::stdin().read_line(&mut buf).ok();
    buf
}
