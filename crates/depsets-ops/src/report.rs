//! Reporting of unknown dependency sets.

use depsets_resolver::merge::UnknownSetsWarning;
use depsets_util::progress::{columns, status_warn};

/// Width the known-id listing is wrapped to.
const LISTING_WIDTH: usize = 80;
const INDENT: &str = "    ";

/// Headline of an unknown-sets warning.
pub fn headline(warning: &UnknownSetsWarning) -> String {
    let ids: Vec<&str> = warning.unknown.iter().map(|id| id.as_str()).collect();
    format!(
        "{}: unknown dependency set(s) in {}: {}",
        warning.project,
        warning.context,
        ids.join(", ")
    )
}

/// The known-id listing that follows the headline.
pub fn known_listing(warning: &UnknownSetsWarning) -> String {
    if warning.known.is_empty() {
        return format!("{INDENT}no dependency sets are defined\n");
    }
    let known: Vec<String> = warning.known.iter().map(|id| id.to_string()).collect();
    let mut out = format!("{INDENT}known dependency sets:\n");
    for line in columns(&known, LISTING_WIDTH - 2 * INDENT.len()).lines() {
        out.push_str(INDENT);
        out.push_str(INDENT);
        out.push_str(line);
        out.push('\n');
    }
    out
}

/// Print every warning to stderr.
pub fn print_warnings(warnings: &[UnknownSetsWarning]) {
    for warning in warnings {
        status_warn("Warning", &headline(warning));
        eprint!("{}", known_listing(warning));
    }
}
