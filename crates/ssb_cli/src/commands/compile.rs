//! Compile command implementation.

use ssb_compiler::{BatchCompiler, BatchReport, CompilerConfig, FileOutcome};
use std::path::Path;

/// Runs the compile command.
///
/// Templates that fail to compile are reported but do not fail the command.
/// A halted batch does.
pub fn run(dir: &Path, config: CompilerConfig) -> Result<(), Box<dyn std::error::Error>> {
    let report = BatchCompiler::new(config).run(dir)?;

    print_summary(dir, &report);

    match &report.halted {
        Some(halt) => {
            Err(format!("batch stopped at {}: {}", halt.input.display(), halt.error).into())
        }
        None => Ok(()),
    }
}

fn print_summary(dir: &Path, report: &BatchReport) {
    println!("Compiled templates in {}", dir.display());
    println!();
    for outcome in &report.outcomes {
        match outcome {
            FileOutcome::Compiled {
                output, segments, ..
            } => println!("  ✓ {} ({segments} segments)", output.display()),
            FileOutcome::Failed { input, error, .. } => {
                println!("  ✗ {}: {error}", input.display());
            }
        }
    }
    if let Some(halt) = &report.halted {
        println!("  ✗ {}: {} (stopped)", halt.input.display(), halt.error);
    }
    println!();
    println!(
        "{} compiled, {} failed, {} segments",
        report.compiled(),
        report.failed(),
        report.total_segments()
    );
}
