/// Example: Load and render an OBJ file in the terminal
///
/// Usage: cargo run --example load_obj -- path/to/model.obj

use anyhow::Context;
use prism3d_core::{parse_obj, Mesh};
use prism3d_terminal::App;
use std::env;
use std::fs;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    let mesh = if let Some(path) = args.get(1) {
        let source =
            fs::read_to_string(path).with_context(|| format!("failed to read {}", path))?;
        let mesh = parse_obj(&source).with_context(|| format!("failed to parse {}", path))?;
        println!("Loaded {} triangles from {}", mesh.triangles.len(), path);
        mesh
    } else {
        eprintln!("Usage: {} <obj-file>", args[0]);
        eprintln!("\nNo OBJ file provided, using default cube...");
        Mesh::cube(2.0)
    };

    println!("Starting terminal renderer (press Q to quit)...");
    std::thread::sleep(std::time::Duration::from_secs(1));

    let mut app = App::new(mesh)?;
    app.run()?;

    Ok(())
}
