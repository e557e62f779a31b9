use std::path::PathBuf;

use color_eyre::Result;
use planum::{export_scene, load_samples, Samples, Scene};
use rand::{prelude::StdRng, Rng, SeedableRng};
use structopt::StructOpt;
use tracing_subscriber::{filter::LevelFilter, EnvFilter};

#[derive(StructOpt, Debug)]
#[structopt(
    name = "export_patch",
    about = "sample a sphere patch and export it with its flattened image as PLY"
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

    #[structopt(short, long, parse(from_os_str), default_value = "patch.ply")]
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
    export_scene(&opt.output, &scene)?;

    Ok(())
}
