use std::io::{ self, Write };
use std::path::{ Path, PathBuf };
use std::process;

use anyhow::Context;
use clap::{ ErrorKind, Parser };
use tracing::info;
use tracing_subscriber::EnvFilter;

use sphere_tracer::consts::{ DEFAULT_SHADOW_BIAS, DEFAULT_THREADS,
    IMAGE_EXTENSION, SCENE_EXTENSION };
use sphere_tracer::parallel::parallel_render;
use sphere_tracer::scene::Scene;

/// Renders a scene of spheres to a binary PPM image.
#[derive(Parser, Debug)]
#[clap(author, version, about)]
struct Cli {
    /// Scene description file, ending in `.scene`.
    scene: PathBuf,

    /// Render threads. 1 renders on the main thread, 0 uses one per core.
    #[clap(short, long, default_value_t = DEFAULT_THREADS)]
    threads: usize,

    /// Offset of shadow ray origins along the light direction.
    #[clap(long, default_value_t = DEFAULT_SHADOW_BIAS, allow_hyphen_values = true)]
    shadow_bias: f64,

    /// Where to write the image. Defaults to the scene path with `.ppm`.
    #[clap(short, long)]
    output: Option<PathBuf>,
}

fn write_usage(out: &mut impl Write, program: &str) -> io::Result<()> {
    writeln!(out, "Usage: {} <file{}>", program, SCENE_EXTENSION)
}

/// Prints the usage line on stdout and exits with status 1.
fn usage() -> ! {
    let program = std::env::args().next()
        .unwrap_or_else(|| env!("CARGO_PKG_NAME").to_string());
    let _ = write_usage(&mut io::stdout().lock(), &program);
    process::exit(1);
}

/// The image path next to a scene file, or `None` if it isn't a scene file.
fn image_path(scene: &Path) -> Option<PathBuf> {
    let base = scene.to_str()?.strip_suffix(SCENE_EXTENSION)?;
    Some(PathBuf::from(format!("{}{}", base, IMAGE_EXTENSION)))
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(),
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => e.exit(),
        Err(_) => usage(),
    };

    let output = match image_path(&cli.scene) {
        None => usage(),
        Some(default) => cli.output.clone().unwrap_or(default),
    };

    let mut scene = Scene::load(&cli.scene)
        .with_context(|| format!("failed to load {}", cli.scene.display()))?;
    scene.world.shadow_bias = cli.shadow_bias;

    let image = if cli.threads == 1 {
        scene.camera.render(&scene.world)?
    } else {
        parallel_render(&scene.world, &scene.camera, cli.threads)?
    };

    image.save(&output)
        .with_context(|| format!("failed to write {}", output.display()))?;
    info!(output = %output.display(), "done");

    Ok(())
}

#[test]
fn image_path_replaces_extension() {
    assert_eq!(image_path(Path::new("scenes/balls.scene")),
        Some(PathBuf::from("scenes/balls.ppm")));
    assert_eq!(image_path(Path::new("balls.scene.txt")), None);
    assert_eq!(image_path(Path::new("balls")), None);
}

#[test]
fn cli_parses_options() {
    let cli = Cli::try_parse_from(&["sphere-tracer", "-t", "4",
        "--shadow-bias", "0.001", "a.scene"]).unwrap();

    assert_eq!(cli.scene, PathBuf::from("a.scene"));
    assert_eq!(cli.threads, 4);
    assert_eq!(cli.shadow_bias, 0.001);
    assert_eq!(cli.output, None);
}

#[test]
fn cli_accepts_negative_shadow_bias() {
    let cli = Cli::try_parse_from(&["sphere-tracer",
        "--shadow-bias", "-0.1", "a.scene"]).unwrap();

    assert_eq!(cli.shadow_bias, -0.1);
    assert_eq!(cli.scene, PathBuf::from("a.scene"));
}

#[test]
fn cli_rejects_extra_arguments() {
    assert!(Cli::try_parse_from(&["sphere-tracer"]).is_err());
    assert!(Cli::try_parse_from(&["sphere-tracer", "a.scene", "b.scene"]).is_err());
}

#[test]
fn usage_names_program_and_extension() {
    let mut out = Vec::new();
    write_usage(&mut out, "sphere-tracer").unwrap();

    assert_eq!(out, b"Usage: sphere-tracer <file.scene>\n".to_vec());
}
