//! Shell escaping for rendered `ExecStart=` command lines.
//!
//! Unit files hand the command line to a shell-compatible tokenizer, so
//! the executable path and every argument must survive tokenization
//! unchanged. Two rules apply: arguments are quoted as a whole when they
//! need it, while the executable path is escaped character by character so
//! it always stays a single unbroken token.

/// Characters that never need escaping on a shell command line.
fn is_safe(c: char) -> bool {
    c.is_ascii_alphanumeric()
        || matches!(c, '%' | '+' | ',' | '-' | '.' | '/' | ':' | '=' | '@' | '_')
}

/// Escapes a single command-line argument.
///
/// Arguments made entirely of safe characters pass through verbatim.
/// Anything else is wrapped in double quotes with `\`, `"`, `` ` `` and
/// `$` backslash-escaped, which a POSIX tokenizer folds back to the
/// original string. The empty argument quotes to `""` so it remains a
/// token.
pub fn quote_arg(arg: &str) -> String {
    if !arg.is_empty() && arg.chars().all(is_safe) {
        return arg.to_string();
    }

    let mut quoted = String::with_capacity(arg.len() + 2);
    quoted.push('"');
    for c in arg.chars() {
        if matches!(c, '"' | '\\' | '`' | '$') {
            quoted.push('\\');
        }
        quoted.push(c);
    }
    quoted.push('"');
    quoted
}

/// Escapes an executable path as one unbroken token.
///
/// Unsafe characters are backslash-escaped in place rather than quoted,
/// so the result contains no quote characters and tokenizes back to the
/// original path. Used for `ConditionFileIsExecutable=` and the path
/// segment of `ExecStart=`.
pub fn escape_path(path: &str) -> String {
    let mut escaped = String::with_capacity(path.len());
    for c in path.chars() {
        if !is_safe(c) {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
