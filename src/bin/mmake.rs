use clap::Parser;
use coursetools::error::BuildError;
use coursetools::mmake::{build_target, Makefile};
use std::path::PathBuf;

/// A minimal rule-driven build tool.
#[derive(Parser)]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Args {
    #[arg(short = 'f', long = "file", default_value = "mmakefile", help = "Rule file to read")]
    makefile: PathBuf,

    #[arg(short = 'B', long = "always-make", help = "Force rebuild even if up to date")]
    force_rebuild: bool,

    #[arg(short = 's', long = "silent", help = "Don't print commands before running them")]
    silent: bool,

    #[arg(value_name = "TARGET", help = "Targets to build (defaults to the makefile's first rule)")]
    targets: Vec<String>,
}

fn main() {
    let args = Args::parse();

    let mf = match Makefile::parse(&args.makefile) {
        Ok(mf) => mf,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };

    let targets: Vec<String> = if args.targets.is_empty() {
        match mf.default_target() {
            Some(target) => vec![target.to_owned()],
            None => {
                eprintln!("{}", BuildError::NoDefaultTarget);
                std::process::exit(1);
            }
        }
    } else {
        args.targets
    };

    for target in &targets {
        if let Err(err) = build_target(target, &mf, args.force_rebuild, args.silent) {
            eprintln!("{err}");
            std::process::exit(1);
        }
    }
}
