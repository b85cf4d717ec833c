pub const FAIL: &str = "\x1b[91m";
pub const OK_GREEN: &str = "\x1b[92m";
pub const OK_BLUE: &str = "\x1b[94m";
pub const WARNING: &str = "\x1b[93m";
pub const BOLD: &str = "\x1b[1m";
pub const RESET: &str = "\x1b[0m";

/// Wraps `text` in the given escape code and resets afterwards.
pub fn paint(colour: &str, text: impl std::fmt::Display) -> String {
    format!("{colour}{text}{RESET}")
}
