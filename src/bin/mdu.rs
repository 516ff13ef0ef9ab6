use clap::Parser;
use std::path::PathBuf;

/// Sum block counts across directory trees using a pool of worker threads.
#[derive(Parser)]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Args {
    #[arg(
        short = 'j',
        long = "jobs",
        default_value_t = 1,
        value_parser = clap::value_parser!(usize).range(1..),
        help = "Number of worker threads to use"
    )]
    jobs: usize,

    #[arg(value_name = "PATH", required = true, num_args = 1.., help = "One or more paths to measure")]
    paths: Vec<PathBuf>,
}

fn main() {
    let args = Args::parse();
    let status = coursetools::mdu::run_roots(&args.paths, args.jobs);
    std::process::exit(status);
}
