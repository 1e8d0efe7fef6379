/// prism3d terminal viewer
///
/// Renders an OBJ model (or a built-in cube) with the CPU pipeline.
/// Controls:
///   - e: toggle wireframe / filled
///   - g: toggle flat / Gouraud shading
///   - h/j/k/l or arrows: rotate the model
///   - q/Esc: quit

use anyhow::Context;
use prism3d_core::{parse_obj, Mesh};
use prism3d_terminal::App;
use std::env;
use std::fs;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let mesh = match env::args().nth(1) {
        Some(path) => {
            let source = fs::read_to_string(&path)
                .with_context(|| format!("cannot open model file {}", path))?;
            parse_obj(&source).with_context(|| format!("cannot parse model file {}", path))?
        }
        None => Mesh::cube(2.0),
    };

    let mut app = App::new(mesh)?;
    app.run()?;

    Ok(())
}
