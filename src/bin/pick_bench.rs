use std::{
    error::Error,
    fs,
    io::{self, IsTerminal as _, Read as _, Write as _},
    path::PathBuf,
    process::ExitCode,
};

use clap::Parser;
use pyrrhic_host::bench::{pick, PickError, DEFAULT_TARGET};
use rand::{rngs::StdRng, SeedableRng as _};

/// Picks a benchmark set of FENs, spread evenly over piece counts
#[derive(Debug, Parser)]
struct Opt {
    /// Number of positions to pick
    #[arg(long, default_value_t = DEFAULT_TARGET)]
    target: usize,
    /// Seed for a reproducible selection
    #[arg(long)]
    seed: Option<u64>,
    /// File with one FEN per line. Defaults to stdin if piped, else fens.txt
    input: Option<PathBuf>,
}

fn read_input(input: Option<PathBuf>) -> io::Result<String> {
    match input {
        Some(path) => fs::read_to_string(path),
        None if !io::stdin().is_terminal() => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
        None => fs::read_to_string("fens.txt"),
    }
}

fn run(opt: Opt) -> Result<(), Box<dyn Error>> {
    let input = read_input(opt.input)?;

    let mut rng = match opt.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let picked = pick(input.lines(), opt.target, &mut rng)?;

    let mut stdout = io::stdout().lock();
    for fen in picked {
        writeln!(stdout, "{fen}")?;
    }
    Ok(())
}

fn main() -> ExitCode {
    match run(Opt::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) if err.is::<PickError>() => {
            eprintln!("No valid FENs parsed.");
            ExitCode::FAILURE
        }
        Err(err) => {
            eprintln!("pick-bench: {err}");
            ExitCode::FAILURE
        }
    }
}
