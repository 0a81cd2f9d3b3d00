//! depth-grasp CLI: grasp detection from depth images and boundary files.

use clap::{Args, Parser, Subcommand, ValueEnum};
use depth_grasp::detect;
use depth_grasp::efd::EfdGraspDetector;
use depth_grasp::io::{load_points_json, DepthGraspConfig, DepthGraspReport, EfdReport, Pipeline};
use depth_grasp::GraspMode;
use log::{info, LevelFilter};
use nalgebra::{Point2, Point3};
use std::path::{Path, PathBuf};
use std::time::Instant;

type CliError = Box<dyn std::error::Error>;
type CliResult<T> = Result<T, CliError>;

#[derive(Parser)]
#[command(name = "depth-grasp")]
#[command(about = "Estimate parallel-jaw grasps from a depth image or an object boundary")]
#[command(version)]
struct Cli {
    /// JSON config; missing fields take their defaults.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Emit JSON log lines (requires the `tracing` feature).
    #[arg(long, global = true)]
    json_logs: bool,

    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rotated mask search over a depth image.
    Mask(MaskArgs),

    /// Elliptic Fourier contact pair on a boundary.
    Efd(EfdArgs),

    /// Write the effective config as JSON.
    Config {
        #[arg(long)]
        out: PathBuf,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ModeArg {
    AllRotations,
    MajorComponentImage,
    MajorComponentMask,
}

impl From<ModeArg> for GraspMode {
    fn from(m: ModeArg) -> Self {
        match m {
            ModeArg::AllRotations => GraspMode::AllRotations,
            ModeArg::MajorComponentImage => GraspMode::MajorComponentImage,
            ModeArg::MajorComponentMask => GraspMode::MajorComponentMask,
        }
    }
}

#[derive(Debug, Clone, Args)]
struct MaskArgs {
    /// Depth image (16-bit or 8-bit gray PNG).
    #[arg(long)]
    depth: PathBuf,

    /// Report path; overrides the config's `output_path`.
    #[arg(long)]
    out: Option<PathBuf>,

    /// Angle selection strategy.
    #[arg(long, value_enum)]
    mode: Option<ModeArg>,

    /// Number of principal axes kept (1 or 2).
    #[arg(long)]
    top_k: Option<usize>,
}

#[derive(Debug, Clone, Args)]
struct EfdArgs {
    /// Gray image; the largest dark region is the object.
    #[arg(long, conflicts_with = "points", required_unless_present = "points")]
    image: Option<PathBuf>,

    /// JSON array of `[x, y]` boundary points or `[x, y, z]` cloud points.
    #[arg(long)]
    points: Option<PathBuf>,

    /// Report path; overrides the config's `output_path`.
    #[arg(long)]
    out: Option<PathBuf>,

    /// Number of harmonics.
    #[arg(long)]
    order: Option<usize>,
}

fn init_logging(verbose: u8, json: bool) {
    let level = match verbose {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    #[cfg(feature = "tracing")]
    {
        let _ = level;
        let _ = tracing_log::LogTracer::init();
        depth_grasp::core::init_tracing(json);
    }
    #[cfg(not(feature = "tracing"))]
    {
        if json {
            eprintln!("--json-logs needs the `tracing` feature; using plain logs");
        }
        let _ = depth_grasp::core::init_with_level(level);
    }
}

fn main() -> CliResult<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.json_logs);

    let config = match &cli.config {
        Some(path) => {
            info!("loading config {}", path.display());
            DepthGraspConfig::load_json(path)?
        }
        None => DepthGraspConfig::default(),
    };

    match cli.command {
        Commands::Mask(args) => run_mask(config, &args),
        Commands::Efd(args) => run_efd(config, &args),
        Commands::Config { out } => {
            config.write_json(&out)?;
            info!("config written to {}", out.display());
            Ok(())
        }
    }
}

fn ms_since(t: Instant) -> f64 {
    t.elapsed().as_secs_f64() * 1000.0
}

fn finish(report: &DepthGraspReport, out: &Path) -> CliResult<()> {
    report.write_json(out)?;
    info!("report written to {}", out.display());
    match &report.error {
        Some(err) => Err(err.clone().into()),
        None => Ok(()),
    }
}

// ── mask ───────────────────────────────────────────────────────────────

fn run_mask(mut config: DepthGraspConfig, args: &MaskArgs) -> CliResult<()> {
    if let Some(mode) = args.mode {
        config.mask.mode = mode.into();
    }
    if let Some(k) = args.top_k {
        config.mask.top_k = k;
    }
    let out = args.out.clone().unwrap_or_else(|| config.output_path());
    let mut report = DepthGraspReport::new(Pipeline::Mask, &args.depth, &config);

    let total = Instant::now();
    info!("loading depth image {}", args.depth.display());
    let depth = detect::load_depth(&args.depth, config.zero_depth_is_missing)?;
    report.timings_ms.load = ms_since(total);
    info!("depth frame {}x{}", depth.width, depth.height);

    let started = Instant::now();
    match detect::detect_mask(&depth, &config.mask) {
        Ok(result) => {
            let b = &result.best;
            info!(
                "grasp at ({:.1}, {:.1}), angle {:.1} deg, mask {}x{}, score {:.1}",
                b.x, b.y, b.angle_deg, b.mask_size, b.mask_width, b.score
            );
            report.set_mask(result);
        }
        Err(err) => report.set_error(err),
    }
    report.timings_ms.detect = ms_since(started);
    report.timings_ms.total = ms_since(total);
    finish(&report, &out)
}

// ── efd ────────────────────────────────────────────────────────────────

enum EfdInput {
    Planar(Vec<Point2<f64>>),
    Cloud(Vec<Point3<f64>>),
}

fn parse_points(raw: Vec<Vec<f64>>) -> CliResult<EfdInput> {
    if raw.iter().all(|p| p.len() == 2) {
        return Ok(EfdInput::Planar(
            raw.iter().map(|p| Point2::new(p[0], p[1])).collect(),
        ));
    }
    if raw.iter().all(|p| p.len() == 3) {
        return Ok(EfdInput::Cloud(
            raw.iter().map(|p| Point3::new(p[0], p[1], p[2])).collect(),
        ));
    }
    Err("points must all be [x, y] or all be [x, y, z]".into())
}

fn run_efd(mut config: DepthGraspConfig, args: &EfdArgs) -> CliResult<()> {
    if let Some(order) = args.order {
        config.efd.order = order;
    }
    let out = args.out.clone().unwrap_or_else(|| config.output_path());
    let total = Instant::now();

    let mut report = match (&args.image, &args.points) {
        (Some(image), _) => {
            let mut report = DepthGraspReport::new(Pipeline::Efd, image, &config);
            info!("loading image {}", image.display());
            let img = detect::load_gray(image)?;
            report.timings_ms.load = ms_since(total);

            let started = Instant::now();
            match detect::detect_efd_image(&img, &config.efd, &config.image) {
                Ok(result) => report.set_efd(EfdReport::from(&result)),
                Err(err) => report.set_error(err),
            }
            report.timings_ms.detect = ms_since(started);
            report
        }
        (None, Some(points)) => {
            let mut report = DepthGraspReport::new(Pipeline::Efd, points, &config);
            info!("loading points {}", points.display());
            let input = parse_points(load_points_json(points)?)?;
            report.timings_ms.load = ms_since(total);

            let detector = EfdGraspDetector::new(config.efd.clone())?;
            let started = Instant::now();
            let outcome = match input {
                EfdInput::Planar(pts) => detector.detect(&pts).map(|r| EfdReport::from(&r)),
                EfdInput::Cloud(cloud) => {
                    detector.detect_cloud(&cloud).map(|r| EfdReport::from(&r))
                }
            };
            match outcome {
                Ok(r) => report.set_efd(r),
                Err(err) => report.set_error(err),
            }
            report.timings_ms.detect = ms_since(started);
            report
        }
        (None, None) => return Err("one of --image or --points is required".into()),
    };

    report.timings_ms.total = ms_since(total);
    if let Some(efd) = &report.efd {
        info!(
            "contacts {:?}, normals {:.1} deg apart",
            efd.points, efd.normal_angle_deg
        );
    }
    finish(&report, &out)
}
