//! Terminal output helpers: error boxes, warnings and the request spinner.

use indicatif::{ProgressBar, ProgressStyle};
use std::io::IsTerminal;
use std::time::Duration;

use crate::api::ApiError;

/// Width of error box separators.
const ERROR_BOX_WIDTH: usize = 60;

/// Print an error box with a title, a detail block and numbered hints.
///
/// ```text
/// ============================================================
/// Request failed with status 500
/// ============================================================
///
/// caused by: ...
/// ```
pub fn print_error_box(title: &str, detail: Option<&str>, hints: &[&str]) {
    eprintln!("\n{}", "=".repeat(ERROR_BOX_WIDTH));
    eprintln!("{title}");
    eprintln!("{}", "=".repeat(ERROR_BOX_WIDTH));

    if let Some(detail) = detail
        && !detail.is_empty()
    {
        eprintln!("\n{detail}");
    }

    for (i, hint) in hints.iter().enumerate() {
        if i == 0 {
            eprintln!();
        }
        eprintln!("{}. {hint}", i + 1);
    }
}

/// Show a failed command to the user.
///
/// The top-level message is the title; the remaining causes go in the body.
pub fn alert(error: &anyhow::Error) {
    let causes: Vec<String> = error.chain().skip(1).map(|c| format!("caused by: {c}")).collect();
    let detail = causes.join("\n");
    let hints = hints_for(error);
    print_error_box(&error.to_string(), Some(&detail), &hints);
}

fn hints_for(error: &anyhow::Error) -> Vec<&'static str> {
    match error.downcast_ref::<ApiError>() {
        Some(ApiError::Unauthenticated) => vec!["Sign in with `cabinet login <email>`"],
        Some(ApiError::Forbidden) => vec!["Ask an administrator to run this action"],
        Some(ApiError::Transport(_)) => vec![
            "Check that the backend is running",
            "Check `api.base_url` with `cabinet config show`",
        ],
        Some(e) if e.status_code() == Some(401) => {
            vec!["Your session may have expired, run `cabinet login` again"]
        },
        _ => Vec::new(),
    }
}

/// Print configuration warnings to stderr.
pub fn print_warnings(warnings: &[String]) {
    for warning in warnings {
        eprintln!("warning: {warning}");
    }
}

/// Spinner shown on stderr while a request is in flight.
///
/// Hidden when stderr is not a terminal so piped output stays clean.
pub fn spinner(message: impl Into<String>) -> ProgressBar {
    if !std::io::stderr().is_terminal() {
        return ProgressBar::hidden();
    }
    let bar = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
        bar.set_style(style);
    }
    bar.set_message(message.into());
    bar.enable_steady_tick(Duration::from_millis(100));
    bar
}

/// Await `fut` behind a spinner labelled `message`.
pub async fn with_spinner<F, T>(message: &str, fut: F) -> T
where
    F: std::future::Future<Output = T>,
{
    let bar = spinner(message);
    let out = fut.await;
    bar.finish_and_clear();
    out
}
