use std::path::PathBuf;
use std::process;

use clap::Parser;
use log::{ error, info };

use prism_tracer::consts::{ CANVAS_WIDTH, CANVAS_HEIGHT, OUT_FILE };
use prism_tracer::tuple::Tuple4D;
use prism_tracer::matrix::Matrix4D;
use prism_tracer::world::World;
use prism_tracer::camera::Camera;
use prism_tracer::scene::Scene;

/// Renders a JSON scene description to a PPM image.
#[derive(Parser, Debug)]
#[clap(author, version, about)]
struct Args {
    /// Scene description to render. Renders a built-in demo scene if omitted.
    scene: Option<PathBuf>,

    /// Where to write the rendered image.
    #[clap(short, long, default_value = OUT_FILE)]
    output: PathBuf,

    /// Override the canvas width from the scene.
    #[clap(long)]
    width: Option<usize>,

    /// Override the canvas height from the scene.
    #[clap(long)]
    height: Option<usize>,

    /// How many reflections a camera ray may follow.
    #[clap(short, long)]
    depth: Option<usize>,
}

/// Two spheres, viewed from slightly above.
fn demo_scene() -> prism_tracer::Result<Scene> {
    let camera = Camera::new(
        CANVAS_WIDTH,
        CANVAS_HEIGHT,
        std::f32::consts::PI / 3.0,
        Matrix4D::view_transform(
            Tuple4D::point(0.0, 1.5, -5.0),
            Tuple4D::point(0.0, 0.0, 0.0),
            Tuple4D::vector(0.0, 1.0, 0.0),
        )?,
    )?;

    Ok(Scene { world: World::example(), camera })
}

fn run(args: &Args) -> prism_tracer::Result<()> {
    let mut scene = match args.scene {
        Some(ref path) => Scene::load(path)?,
        None => {
            info!("no scene given, rendering the demo scene");
            demo_scene()?
        },
    };

    if args.width.is_some() || args.height.is_some() {
        let camera = &scene.camera;
        scene.camera = Camera::new(
            args.width.unwrap_or(camera.hsize),
            args.height.unwrap_or(camera.vsize),
            camera.field_of_view,
            *camera.transform(),
        )?;
    }

    if let Some(depth) = args.depth {
        scene.camera.recursion_depth = depth;
    }

    let canvas = scene.camera.render(&scene.world)?;
    canvas.save(&args.output)
}

fn main() {
    env_logger::init();

    let args = Args::parse();
    if let Err(e) = run(&args) {
        error!("render failed: {}", e);
        eprintln!("error: {}", e);
        process::exit(1);
    }
}
