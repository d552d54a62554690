//! Usage transcript lines.
//!
//! Columns are right-aligned short alias (width 7, at most 14 chars), then the
//! left-aligned long alias (width 15, at most 30 chars), then the left-aligned
//! description (width 15, at most 60 chars for parameters, 50 for flags).

use crate::value::Value;

/// Hint used in the usage header when no program name is configured.
pub const DEFAULT_PROGRAM: &str = "<program>";

/// One parameter line, newline-terminated.
///
/// `probe` is the parameter's resolver outcome for absent input: a default
/// value renders as `(default: ..)`, anything else as `(required)`.
pub fn param_line(short: &str, long: &str, desc: &str, probe: Option<&Value>) -> String {
    let mut line = format!("{short:>7.14} {long:<15.30} {desc:<15.60}");
    match probe {
        Some(value) => line.push_str(&format!(" (default: {value})")),
        None => line.push_str(" (required)"),
    }
    line.push('\n');
    line
}

/// One flag line.
///
/// No newline is appended, so consecutive flag lines run together.
pub fn flag_line(short: &str, long: &str, desc: &str) -> String {
    format!("{short:>7.14} {long:<15.30} {desc:<15.50}")
}

/// Full usage text: the invocation hint followed by the transcript.
pub fn render(program: &str, transcript: &str) -> String {
    format!("Usage: {program} [ARGUMENTS]\n{transcript}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn param_line_pads_columns() {
        let guest = Value::from("guest");
        let line = param_line("-u", "--user", "username to connect to the server", Some(&guest));
        assert_eq!(
            line,
            "     -u --user          username to connect to the server (default: guest)\n"
        );
    }

    #[test]
    fn param_line_marks_required() {
        let line = param_line("-s", "--seconds", "timeout in seconds", None);
        assert_eq!(line, "     -s --seconds       timeout in seconds (required)\n");
    }

    #[test]
    fn short_description_is_padded_to_fifteen() {
        let line = param_line("-x", "--x", "tiny", None);
        assert_eq!(line, "     -x --x             tiny            (required)\n");
    }

    #[test]
    fn long_columns_are_truncated() {
        let long = format!("--{}", "n".repeat(40));
        let line = flag_line("-n", &long, &"d".repeat(80));
        assert_eq!(line, format!("     -n {} {}", &long[..30], "d".repeat(50)));
    }

    #[test]
    fn flag_line_has_no_newline() {
        let line = flag_line("-v", "--verbose", "enable extra logging");
        assert_eq!(line, "     -v --verbose       enable extra logging");
    }
}
