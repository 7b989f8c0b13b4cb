//! Command line interface shared by the `tractrix` binary and the Python entry point.
use crate::error::TractrixError;
use crate::model::constants::DEFAULT_NUM_POINTS;
use crate::model::params::TractrixParams;
use crate::model::rectifier::sine_rectifier;
use crate::model::surface::{tractrix, Surface};
use clap::{Args, Parser, Subcommand};
use itertools::izip;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

type Result<T> = std::result::Result<T, TractrixError>;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the sine rectifier of the IMF in nT
    Rectifier(RectifierArgs),
    /// Write a tractrix magnetopause surface as x,y CSV
    Surface(SurfaceArgs),
}

#[derive(Args, Debug)]
pub struct RectifierArgs {
    /// GSE X component of the IMF in nT
    #[arg(long, allow_negative_numbers = true)]
    pub bx: f64,

    /// GSE Y component of the IMF in nT
    #[arg(long, allow_negative_numbers = true)]
    pub by: f64,

    /// GSE Z component of the IMF in nT
    #[arg(long, allow_negative_numbers = true)]
    pub bz: f64,
}

#[derive(Args, Debug)]
pub struct SurfaceArgs {
    /// Sine rectifier of the IMF in nT
    #[arg(long, allow_negative_numbers = true, required_unless_present = "imf")]
    pub sin_rec: Option<f64>,

    /// IMF GSE components in nT, as bx,by,bz
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true, conflicts_with = "sin_rec")]
    pub imf: Option<Vec<f64>>,

    /// Solar wind dynamic pressure in nPa
    #[arg(long)]
    pub p_dyn: f64,

    /// Number of points in the surface
    #[arg(short = 'n', long = "num-points", default_value_t = DEFAULT_NUM_POINTS)]
    pub num_points: usize,

    /// Subsolar standoff parameters, as c0,c1,c2
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
    pub s_param: Option<Vec<f64>>,

    /// Asymptotic tail width parameters, as c0,c1,c2
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
    pub w_param: Option<Vec<f64>>,

    /// Output CSV file path, stdout if not given
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl SurfaceArgs {
    /// The sine rectifier given directly or computed from the IMF components.
    pub fn sine_rectifier(&self) -> Result<f64> {
        match (&self.sin_rec, &self.imf) {
            (Some(sin_rec), _) => Ok(*sin_rec),
            (None, Some(imf)) => match imf.as_slice() {
                [bx, by, bz] => Ok(sine_rectifier(*bx, *by, *bz)),
                _ => Err(TractrixError::InvalidParameters(format!(
                    "Expected 3 IMF components, found {}",
                    imf.len()
                ))),
            },
            (None, None) => Err(TractrixError::InvalidParameters(
                "Either a sine rectifier or IMF components are required".to_string(),
            )),
        }
    }

    pub fn params(&self) -> Result<TractrixParams> {
        TractrixParams::with_overrides(self.s_param.as_deref(), self.w_param.as_deref())
    }
}

/// Sets up logging to stderr. `RUST_LOG` is honoured when no `-v` flags are given.
pub fn init_logging(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        _ => EnvFilter::new("debug"),
    };
    // Already initialised if called twice from the same Python session
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(io::stderr)
        .try_init();
}

/// Writes the points of a surface as CSV with an `x,y` header.
pub fn write_surface_csv<W: Write>(writer: &mut W, surface: &Surface) -> io::Result<()> {
    writeln!(writer, "x,y")?;
    for (x, y) in izip!(surface.x.iter(), surface.y.iter()) {
        writeln!(writer, "{x},{y}")?;
    }
    writer.flush()
}

/// Executes a parsed command.
///
/// # Errors
/// Will return `Err` if the arguments are unsuitable for the model or output cannot be written.
pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Rectifier(args) => {
            let rec = sine_rectifier(args.bx, args.by, args.bz);
            info!(bx = args.bx, by = args.by, bz = args.bz, rec, "computed sine rectifier");
            println!("{rec}");
        }
        Command::Surface(args) => {
            let sin_rec = args.sine_rectifier()?;
            let params = args.params()?;
            let surface = tractrix(sin_rec, args.p_dyn, args.num_points, &params)?;
            if surface.x.iter().all(|x| x.is_nan()) {
                info!(sin_rec, p_dyn = args.p_dyn, "tail width is negative, surface is undefined");
            }
            match &args.output {
                Some(path) => {
                    let mut writer = BufWriter::new(File::create(path)?);
                    write_surface_csv(&mut writer, &surface)?;
                    info!(path = %path.display(), points = args.num_points, "wrote surface");
                }
                None => {
                    let stdout = io::stdout();
                    write_surface_csv(&mut stdout.lock(), &surface)?;
                }
            }
        }
    }
    Ok(())
}
