//! Slash-command line parser
//!
//! Total over all input strings: every line, including the empty one,
//! produces a well-formed [`ParsedInput`].

/// Structured form of one input line
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParsedInput {
    /// True when the trimmed line starts with `/`
    pub is_command: bool,
    /// Lower-cased command name, without the leading slash; empty for
    /// non-command lines
    pub command: String,
    /// Everything after the command name, trimmed; for non-command lines,
    /// the whole trimmed line
    pub args: String,
}

/// Parse one raw line of input
///
/// Outer whitespace is trimmed first. A leading `/` marks a command: the
/// token up to the first space (lower-cased, slash stripped) is the name,
/// the trimmed remainder is the argument string.
pub fn parse(raw: &str) -> ParsedInput {
    let trimmed = raw.trim();

    if let Some(rest) = trimmed.strip_prefix('/') {
        let (command, args) = match rest.find(' ') {
            Some(pos) => (&rest[..pos], rest[pos + 1..].trim()),
            None => (rest, ""),
        };
        ParsedInput {
            is_command: true,
            command: command.to_lowercase(),
            args: args.to_string(),
        }
    } else {
        ParsedInput {
            is_command: false,
            command: String::new(),
            args: trimmed.to_string(),
        }
    }
}
