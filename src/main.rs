use clap::Parser;
use hslinks::cli::{self, Args};
use std::error::Error;

fn main() {
    let args = Args::parse();
    if let Err(e) = cli::run(&args) {
        eprintln!("{}", e);
        if args.verbose {
            let mut source = e.source();
            while let Some(s) = source {
                eprintln!("  cause: {}", s);
                source = s.source();
            }
        }
        std::process::exit(e.exit_code());
    }
}
