//! Command text normalisation and the arguments that get signed.

/// Collapse every whitespace run into one space and trim the ends.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Free-text arguments of `command` (no leading slash, already collapsed)
/// that a server expects to be signed, as `(argument name, text)`.
pub fn signable_arguments(command: &str) -> Vec<(&'static str, String)> {
    let mut parts = command.splitn(3, ' ');
    let Some(root) = parts.next() else {
        return Vec::new();
    };
    let second = parts.next();
    let third = parts.next();

    let (name, text) = match root {
        "me" => ("action", rest_after_root(command, root)),
        "say" | "teammsg" | "tm" => ("message", rest_after_root(command, root)),
        "msg" | "tell" | "w" => ("message", second.and(third)),
        "ban" | "ban-ip" | "kick" => ("reason", second.and(third)),
        _ => return Vec::new(),
    };

    match text {
        Some(t) if !t.is_empty() => vec![(name, t.to_string())],
        _ => Vec::new(),
    }
}

fn rest_after_root<'a>(command: &'a str, root: &str) -> Option<&'a str> {
    command.get(root.len()..).map(str::trim_start)
}
