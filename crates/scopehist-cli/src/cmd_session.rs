use crate::cmd_hook::{active_file, load_record};
use scopehist_core::Config;
use scopehist_host::{codec, HistoryBuffer};

/// `scopehist session-id`
pub fn new_id() -> anyhow::Result<()> {
    println!("{}", ulid::Ulid::new());
    Ok(())
}

/// `scopehist recall --session <id>`: the buffer, oldest first unless `reverse`.
pub fn recall(
    config: &Config,
    session: &str,
    reverse: bool,
    encoded: bool,
) -> anyhow::Result<()> {
    let Some(record) = load_record(config, session)? else {
        return Ok(());
    };
    print!("{}", recall_text(&record.buffer, reverse, encoded));
    Ok(())
}

/// Plain output is one entry per line for pickers; `encoded` keeps
/// multi-line entries intact for the shell's history reader.
fn recall_text(buffer: &HistoryBuffer, reverse: bool, encoded: bool) -> String {
    let mut entries: Vec<&str> = buffer.entries().collect();
    if reverse {
        entries.reverse();
    }
    if encoded {
        return codec::encode_all(entries);
    }
    let mut out = String::new();
    for entry in entries {
        out.push_str(entry);
        out.push('\n');
    }
    out
}

/// `scopehist status --session <id>`
pub fn status(config: &Config, session: &str) -> anyhow::Result<()> {
    let Some(record) = load_record(config, session)? else {
        println!("No session {session}. Run `scopehist hook start` first.");
        return Ok(());
    };
    let mode = match record.state.mode {
        scopehist_session::Mode::Global => "global",
        scopehist_session::Mode::Scoped => "scoped",
    };
    println!("Session {} (started {})", record.session_id, record.started_at);
    println!("Mode: {mode}");
    match &record.state.current_scope {
        Some(scope) => println!(
            "Scope: {} {}",
            scope.identity.kind_str(),
            scope.identity.anchor().display()
        ),
        None => println!("Scope: (none)"),
    }
    match active_file(config, &record) {
        Some(file) => println!("Active file: {}", file.display()),
        None => println!("Active file: (none)"),
    }
    println!("Buffered entries: {}", record.buffer.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buffer(entries: &[&str]) -> HistoryBuffer {
        let mut buffer = HistoryBuffer::new(10);
        for e in entries {
            buffer.push(e.to_string());
        }
        buffer
    }

    #[test]
    fn recall_orders_entries() {
        let b = buffer(&["one", "two"]);
        assert_eq!(recall_text(&b, false, false), "one\ntwo\n");
        assert_eq!(recall_text(&b, true, false), "two\none\n");
    }

    #[test]
    fn encoded_recall_reads_back_as_entries() {
        let b = buffer(&["for x in 1 2; do\necho $x\ndone", "echo trailing\\"]);
        let text = recall_text(&b, false, true);
        assert_eq!(
            codec::decode(&text),
            vec!["for x in 1 2; do\necho $x\ndone", "echo trailing\\"]
        );
    }
}
