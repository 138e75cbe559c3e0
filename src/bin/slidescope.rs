//! slidescope CLI: verify the contents of a PowerPoint deck.
use clap::Parser;
use slidescope::pptx::Package;
use slidescope::verify::{verify_deck, write_report};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(
    name = "slidescope",
    version,
    about = "Inspects a .pptx deck and reports every visual element it contains"
)]
struct Args {
    /// Path to the .pptx file to verify
    deck: PathBuf,

    /// Suppress the transcript; only write the JSON report
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    if !args.deck.exists() {
        eprintln!("Error: File not found: {}", args.deck.display());
        return ExitCode::FAILURE;
    }

    let pkg = match Package::open(&args.deck) {
        Ok(pkg) => pkg,
        Err(e) => {
            eprintln!("Error: Cannot open {}: {}", args.deck.display(), e);
            return ExitCode::FAILURE;
        },
    };

    let report = match verify_deck(&pkg, &args.deck) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("Error: Verification failed: {}", e);
            return ExitCode::FAILURE;
        },
    };

    if !args.quiet {
        print!("{}", report.transcript);
    }

    match write_report(&report, &args.deck) {
        Ok(written) => {
            println!("Verification report saved to: {}", written.display());
            ExitCode::SUCCESS
        },
        Err(e) => {
            eprintln!("Error: Cannot write report: {}", e);
            ExitCode::FAILURE
        },
    }
}
