//! Formatting for user-facing output.

use console::style;

use crate::tagging::TagOutcome;

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red(), message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

/// Format and print a warning with a yellow marker.
pub fn display_warning(message: &str) {
    eprintln!("{} {}", style("⚠ WARNING:").yellow(), message);
}

/// One line summarizing a finished tagging run.
pub fn outcome_summary(outcome: &TagOutcome) -> String {
    let commit = outcome.tip.short_hash();
    match &outcome.reference {
        Some(_) => format!("Tagged {} as {}", commit, outcome.tag_name),
        None => format!("Would tag {} as {} (dry run)", commit, outcome.tag_name),
    }
}

/// Display a finished tagging run.
pub fn display_outcome(outcome: &TagOutcome) {
    if let Some(replaced) = &outcome.replaced {
        display_warning(&format!(
            "{} was already tagged {}; forcing {}",
            outcome.tip.short_hash(),
            replaced.short_name(),
            outcome.tag_name
        ));
    }

    match &outcome.reference {
        Some(_) => display_success(&outcome_summary(outcome)),
        None => display_status(&outcome_summary(outcome)),
    }
}
