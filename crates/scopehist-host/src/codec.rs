//! Flat history file format: one entry per line, inner newlines escaped
//! with a trailing backslash on the physical line (zsh convention).
//!
//! A physical line that ends in an odd run of backslashes continues the entry.
//! Backslashes that end a segment of the entry itself are doubled on disk, so
//! an even run is always literal text.

/// Append one entry, newline terminated, to `out`.
pub fn encode_entry(entry: &str, out: &mut String) {
    let mut segments = entry.split('\n').peekable();
    while let Some(segment) = segments.next() {
        let body = segment.trim_end_matches('\\');
        let trailing = segment.len() - body.len();
        out.push_str(body);
        out.extend(std::iter::repeat_n('\\', trailing * 2));
        if segments.peek().is_some() {
            out.push('\\');
        }
        out.push('\n');
    }
}

pub fn encode_all<'a>(entries: impl IntoIterator<Item = &'a str>) -> String {
    let mut out = String::new();
    for entry in entries {
        encode_entry(entry, &mut out);
    }
    out
}

/// Split file content back into entries. Blank entries are skipped.
pub fn decode(text: &str) -> Vec<String> {
    let mut entries = Vec::new();
    let mut current = String::new();
    let mut continued = false;
    for line in text.lines() {
        let body = line.trim_end_matches('\\');
        let trailing = line.len() - body.len();
        current.push_str(body);
        current.extend(std::iter::repeat_n('\\', trailing / 2));
        if trailing % 2 == 1 {
            current.push('\n');
            continued = true;
            continue;
        }
        continued = false;
        push_entry(&mut entries, &mut current);
    }
    if continued {
        // Truncated tail from an interrupted writer.
        current.pop();
        push_entry(&mut entries, &mut current);
    }
    entries
}

fn push_entry(entries: &mut Vec<String>, current: &mut String) {
    let entry = std::mem::take(current);
    if !entry.trim().is_empty() {
        entries.push(entry);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_line_entries() {
        let text = encode_all(["ls -la", "echo hi"]);
        assert_eq!(text, "ls -la\necho hi\n");
        assert_eq!(decode(&text), vec!["ls -la", "echo hi"]);
    }

    #[test]
    fn multiline_entry_uses_backslash_continuation() {
        let text = encode_all(["for f in *; do\necho $f\ndone"]);
        assert_eq!(text, "for f in *; do\\\necho $f\\\ndone\n");
        assert_eq!(decode(&text), vec!["for f in *; do\necho $f\ndone"]);
    }

    #[test]
    fn blank_lines_are_skipped() {
        assert_eq!(decode("a\n\n   \nb\n"), vec!["a", "b"]);
    }

    #[test]
    fn missing_final_newline_and_crlf() {
        assert_eq!(decode("a\r\nb"), vec!["a", "b"]);
    }

    #[test]
    fn trailing_backslash_does_not_join_next_entry() {
        let text = encode_all(["echo foo\\", "ls"]);
        assert_eq!(text, "echo foo\\\\\nls\n");
        assert_eq!(decode(&text), vec!["echo foo\\", "ls"]);

        let text = encode_all(["printf '\\\\'", "pwd"]);
        assert_eq!(decode(&text), vec!["printf '\\\\'", "pwd"]);

        let text = encode_all(["a\\\\", "b\\"]);
        assert_eq!(decode(&text), vec!["a\\\\", "b\\"]);
    }

    #[test]
    fn inner_backslashes_are_left_alone() {
        let text = encode_all([r"sed 's/\t/ /g' in.txt", r"echo a\b"]);
        assert_eq!(text, "sed 's/\\t/ /g' in.txt\necho a\\b\n");
        assert_eq!(decode(&text), vec![r"sed 's/\t/ /g' in.txt", r"echo a\b"]);
    }

    #[test]
    fn backslashes_mixed_with_newlines() {
        let entry = "cat <<'EOF'\nC:\\dir\\\nline \\ two\\\\\nEOF";
        let text = encode_all([entry, "next"]);
        assert_eq!(text.lines().count(), 5);
        assert_eq!(decode(&text), vec![entry, "next"]);
    }

    #[test]
    fn dangling_continuation_keeps_text() {
        assert_eq!(decode("echo one\\\n"), vec!["echo one"]);
    }
}
