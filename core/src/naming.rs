//! Naming and documentation helpers for code emitters.

/// Words rendered fully upper-case by [`type_name`].
pub const ABBREVIATIONS: &[&str] = &[
    "id", "ppid", "pid", "mac", "ip", "iana", "uid", "ecs", "url", "os", "http", "dns", "ssl",
    "tls", "ttl", "uuid",
];

/// Text width used by [`comment`]: 75 columns minus the `" // "` gutter.
pub const COMMENT_WIDTH: usize = 71;

/// Line comment marker used by [`comment`].
pub const COMMENT_MARKER: &str = "// ";

/// Converts a dotted, underscored or `@`-prefixed field name into a single
/// title-cased identifier.
///
/// # Examples
///
/// ```
/// use fieldgen_core::type_name;
///
/// assert_eq!(type_name("ephemeral_id"), "EphemeralID");
/// assert_eq!(type_name("host.ip"), "HostIP");
/// assert_eq!(type_name("@timestamp"), "Timestamp");
/// ```
pub fn type_name(name: &str) -> String {
    name.split(is_separator)
        .filter(|word| !word.is_empty())
        .map(title_word)
        .collect()
}

fn is_separator(c: char) -> bool {
    matches!(c, '.' | '_' | '@')
}

fn title_word(word: &str) -> String {
    if ABBREVIATIONS.iter().any(|abv| abv.eq_ignore_ascii_case(word)) {
        return word.to_uppercase();
    }

    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Wraps `text` into `// ` prefixed lines of at most [`COMMENT_WIDTH`]
/// columns of text.
///
/// # Examples
///
/// ```
/// use fieldgen_core::comment;
///
/// assert_eq!(comment("Process id.\nUnique per host."), "// Process id. Unique per host.");
/// assert_eq!(comment(""), "");
/// ```
pub fn comment(text: &str) -> String {
    comment_with(text, COMMENT_WIDTH, COMMENT_MARKER)
}

/// Joins the lines of `text` into one paragraph, wraps it at `width` without
/// splitting words, and prefixes each line with `marker`.
///
/// Leading and trailing blank lines are dropped and every line is trimmed.
pub fn comment_with(text: &str, width: usize, marker: &str) -> String {
    let paragraph = text.lines().collect::<Vec<_>>().join(" ");
    let options = textwrap::Options::new(width.max(1))
        .break_words(false)
        .word_splitter(textwrap::WordSplitter::NoHyphenation)
        .wrap_algorithm(textwrap::WrapAlgorithm::FirstFit);

    let lines: Vec<String> = textwrap::wrap(&paragraph, options)
        .iter()
        .map(|line| line.trim().to_string())
        .collect();

    let start = lines.iter().position(|l| !l.is_empty()).unwrap_or(lines.len());
    let end = lines.iter().rposition(|l| !l.is_empty()).map_or(start, |i| i + 1);

    lines[start..end]
        .iter()
        .map(|line| format!("{marker}{line}").trim_end().to_string())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_name_splits_and_titles() {
        assert_eq!(type_name("ephemeral_id"), "EphemeralID");
        assert_eq!(type_name("user_agent.original"), "UserAgentOriginal");
        assert_eq!(type_name("host"), "Host");
    }

    #[test]
    fn test_type_name_abbreviations() {
        assert_eq!(type_name("host.ip"), "HostIP");
        assert_eq!(type_name("url.path"), "URLPath");
        assert_eq!(type_name("process.ppid"), "ProcessPPID");
        assert_eq!(type_name("Os"), "OS");
        assert_eq!(type_name("iptables"), "Iptables");
    }

    #[test]
    fn test_type_name_strips_separators() {
        assert_eq!(type_name("@timestamp"), "Timestamp");
        assert_eq!(type_name("a..b__c"), "ABC");
        assert_eq!(type_name(""), "");
    }

    #[test]
    fn test_comment_wraps_at_width() {
        let text = "The quick brown fox jumps over the lazy dog again and again until \
                    the sun goes down behind the hills.";
        let out = comment(text);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 2);
        for line in &lines {
            assert!(line.starts_with("// "));
            assert!(line.len() <= COMMENT_WIDTH + COMMENT_MARKER.len());
        }
        let rejoined: Vec<&str> = lines.iter().map(|l| &l[3..]).collect();
        assert_eq!(rejoined.join(" "), text);
    }

    #[test]
    fn test_comment_collapses_line_breaks() {
        assert_eq!(comment("first line\nsecond line\n"), "// first line second line");
    }

    #[test]
    fn test_comment_keeps_long_words_whole() {
        let word = "x".repeat(90);
        assert_eq!(comment(&format!("see {word}")), format!("// see\n// {word}"));
    }

    #[test]
    fn test_comment_blank_input() {
        assert_eq!(comment(""), "");
        assert_eq!(comment("\n\n  \n"), "");
    }

    #[test]
    fn test_comment_with_marker() {
        assert_eq!(comment_with("a b c", 3, "# "), "# a b\n# c");
    }
}
