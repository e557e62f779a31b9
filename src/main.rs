use std::path::PathBuf;

use color_eyre::Result;
use planum::{load_samples, render_views, RenderSettings, Samples, Scene};
use rand::{prelude::StdRng, Rng, SeedableRng};
use structopt::StructOpt;
use tracing::info;
use tracing_subscriber::{filter::LevelFilter, EnvFilter};

#[derive(StructOpt, Debug)]
#[structopt(
    name = "planum",
    about = "inspect how a patch of sphere samples flattens onto a plane"
)]
struct Opt {
    /// number of samples on the sphere
    #[structopt(short = "n", long, default_value = "300")]
    samples: usize,

    /// neighbors gathered around the center sample
    #[structopt(short = "k", long, default_value = "8")]
    neighbors: usize,

    /// seed for the center selection, random if absent
    #[structopt(long)]
    seed: Option<u64>,

    /// index of the center sample, overrides the random choice
    #[structopt(long)]
    center: Option<usize>,

    /// read the sphere discretization from a PLY point cloud instead of
    /// generating a lattice
    #[structopt(long, parse(from_os_str))]
    sphere: Option<PathBuf>,

    /// edge length of the small panels in pixels
    #[structopt(long, default_value = "256")]
    panel_size: u32,

    /// scatter marker radius in pixels
    #[structopt(long, default_value = "4")]
    point_size: u32,

    #[structopt(short, long, parse(from_os_str), default_value = "patch.png")]
    output: PathBuf,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .from_env_lossy(),
        )
        .init();

    let opt = Opt::from_args();

    let samples = match &opt.sphere {
        Some(path) => load_samples(path)?,
        None => Samples::new(opt.samples),
    };

    let mut rng = match opt.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let center = opt
        .center
        .unwrap_or_else(|| rng.gen_range(0..samples.len()));

    let scene = Scene::from_samples(&samples, center, opt.neighbors)?;

    let settings = RenderSettings {
        panel_size: opt.panel_size,
        point_size: opt.point_size,
        ..RenderSettings::default()
    };
    let img = render_views(&scene, &settings);
    img.save(&opt.output)?;

    info!(center, output = %opt.output.display(), "rendered patch views");
    Ok(())
}
