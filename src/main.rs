use clap::Parser;

use bibliotool::cli::{run, CliArgs};
use bibliotool::observability::init_logging;

fn main() {
    let args = CliArgs::parse();
    init_logging(args.verbose);

    if let Err(e) = run(&args) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
