//! Command line parser.
//!
//! Split on whitespace, max 3 arguments. The unsplit remainder after the
//! command token is kept verbatim for commands like `write` that take
//! free text.

/// Parsed command with up to 3 arguments.
#[derive(Debug, Clone)]
pub struct ParsedCommand<'a> {
    /// The command name (first token).
    pub command: &'a str,
    /// Up to 3 arguments.
    pub args: [Option<&'a str>; 3],
    /// Everything after the command token and one separating space,
    /// untouched.
    pub tail: &'a str,
}

impl<'a> ParsedCommand<'a> {
    /// Get argument by index (0-based).
    pub fn arg(&self, idx: usize) -> Option<&'a str> {
        self.args.get(idx).copied().flatten()
    }
}

/// Parse a command line into command, arguments and verbatim tail.
pub fn parse_line(line: &str) -> ParsedCommand<'_> {
    let mut parts = line.split_whitespace();

    let command = parts.next().unwrap_or("");

    let mut args = [None, None, None];
    for (i, arg) in parts.take(3).enumerate() {
        args[i] = Some(arg);
    }

    let tail = if command.is_empty() {
        ""
    } else {
        let leading = line.len() - line.trim_start().len();
        let rest = &line[leading + command.len()..];
        rest.strip_prefix(' ').unwrap_or(rest)
    };

    ParsedCommand {
        command,
        args,
        tail,
    }
}
