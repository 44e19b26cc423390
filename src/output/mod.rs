mod styling;

use std::io::Write;
use std::process::ExitCode;

use crate::error::GateError;

use styling::{bright_green, bright_red, dim, magenta_bold};

/// Prints the banner to stderr.
pub fn print_banner() {
    eprintln!(
        r"
{} {}
  {}
",
        magenta_bold("✅ required-status-check"),
        dim(env!("CARGO_PKG_VERSION")),
        dim("CI gate for upstream job results and workflow coverage")
    );
}

/// Turns the outcome of a run into the process exit code.
///
/// Failures are reported the way GitHub Actions expects: the `::error::`
/// workflow command goes to `out` (stdout in `main`) so the runner annotates
/// the job, and a styled line goes to stderr for people reading the log.
pub fn finish(result: anyhow::Result<()>, out: &mut impl Write) -> ExitCode {
    match result {
        Ok(()) => {
            eprintln!("{}", bright_green("Required status check passed ✓"));
            ExitCode::SUCCESS
        }
        Err(err) => {
            let message = failure_message(&err);
            log::error!("{message}");
            eprintln!("{}", bright_red(format!("Required status check failed: {message}")));
            if let Err(e) = writeln!(out, "::error::{}", escape_data(&message)) {
                log::warn!("failed to write the error annotation: {e}");
            }
            ExitCode::FAILURE
        }
    }
}

/// Gate errors already embed their cause; anything else gets its full chain.
fn failure_message(err: &anyhow::Error) -> String {
    match err.downcast_ref::<GateError>() {
        Some(gate_err) => gate_err.to_string(),
        None => format!("{err:#}"),
    }
}

/// Escapes a message for use as workflow command data.
fn escape_data(message: &str) -> String {
    message
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}
