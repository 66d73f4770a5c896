use std::io::Write;

use console::Style;

/// Print a Cargo-style status line: `     Merging com.example:app`
///
/// The `label` is right-padded to 12 characters and printed in bold green,
/// followed by the `message` in the default terminal colour.
pub fn status(label: &str, message: &str) {
    let green_bold = Style::new().green().bold();
    let _ = writeln!(
        std::io::stderr(),
        "{:>12} {message}",
        green_bold.apply_to(label),
    );
}

/// Like [`status`] but uses bold cyan for informational (non-action) messages.
pub fn status_info(label: &str, message: &str) {
    let cyan_bold = Style::new().cyan().bold();
    let _ = writeln!(
        std::io::stderr(),
        "{:>12} {message}",
        cyan_bold.apply_to(label),
    );
}

/// Print a warning-style status line (bold yellow label).
pub fn status_warn(label: &str, message: &str) {
    let yellow_bold = Style::new().yellow().bold();
    let _ = writeln!(
        std::io::stderr(),
        "{:>12} {message}",
        yellow_bold.apply_to(label),
    );
}

/// Lay `items` out in left-aligned columns no wider than `width` characters.
///
/// Used for listing identifiers (known set ids, for instance) compactly.
pub fn columns(items: &[String], width: usize) -> String {
    let Some(widest) = items.iter().map(|s| s.chars().count()).max() else {
        return String::new();
    };
    let cell = widest + 2;
    let per_row = (width / cell).max(1);

    let mut out = String::new();
    for row in items.chunks(per_row) {
        let line: String = row.iter().map(|s| format!("{s:<cell$}")).collect();
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}
