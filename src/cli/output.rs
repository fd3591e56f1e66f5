use colored::Colorize;

/// Print an informational message.
pub fn info(msg: &str) {
    println!("  {} {}", "•".blue(), msg);
}

/// Print a warning message.
pub fn warning(msg: &str) {
    eprintln!("  {} {}", "⚠".yellow(), msg);
}

/// Print an error message.
pub fn error(msg: &str) {
    eprintln!("  {} {}", "✗".red(), msg);
}

/// Print a dimmed detail line.
pub fn detail(msg: &str) {
    println!("    {}", msg.dimmed());
}

/// Print a header line.
pub fn header(msg: &str) {
    println!("\n{}", msg.bold());
}
