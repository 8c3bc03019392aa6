use std::process::ExitCode;

use submission_client::{
    DEFAULT_ENDPOINT, Payload, Result, SubmissionClient, SubmissionContext,
};
use tracing_subscriber::EnvFilter;
use url::Url;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    match run() {
        Ok(receipt) => {
            print_receipt(&receipt);
            ExitCode::SUCCESS
        }
        Err(err) => {
            report_failure(&err);
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<String> {
    let context = SubmissionContext::from_env()?;
    let payload = Payload::new(&context)?;
    let client = SubmissionClient::new(Url::parse(DEFAULT_ENDPOINT)?)?;
    let receipt = client.submit(&payload, &context.signing_secret)?;
    Ok(receipt.into_inner())
}

#[expect(clippy::print_stdout, reason = "the receipt is the program's output")]
fn print_receipt(receipt: &str) {
    println!("{receipt}");
}

#[expect(clippy::print_stderr, reason = "operator-visible failure diagnostics")]
fn report_failure(err: &submission_client::Error) {
    if let Some(diagnostics) = err.diagnostics() {
        eprintln!("Submission failed. Action link: {}", diagnostics.action_run_link);
        eprintln!("Signature (masked): {}", diagnostics.signature_masked);
    }
    eprintln!("{err}");
}
