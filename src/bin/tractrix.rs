use clap::Parser;
use tractrix::cli::{self, Cli};

pub type BinResult<T, E = Box<dyn std::error::Error + Send + Sync>> = Result<T, E>;

fn main() {
    if let Err(e) = bin_main() {
        eprintln!("error: {e}");
        if let Some(e) = e.source() {
            eprintln!("error: {e}");
        }
        std::process::exit(1);
    }
}

fn bin_main() -> BinResult<()> {
    let args = Cli::parse();
    cli::init_logging(args.verbose);
    cli::run(args)?;
    Ok(())
}
