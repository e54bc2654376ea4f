//! Parsing of the progress lines git writes to stderr with `--progress`.
//!
//! git redraws a line in place with `\r` and finishes it with `\n`, e.g.
//!
//! ```text
//! remote: Counting objects:  45% (45/100)\r
//! remote: Counting objects: 100% (100/100), done.\n
//! Receiving objects:  12% (123/1000), 1.00 MiB | 2.00 MiB/s\r
//! remote: Enumerating objects: 1234, done.\n
//! ```

use ragdoll_core::{OpCode, ProgressEvent, Stage};

/// Splits a raw stderr byte stream into lines on either `\r` or `\n`.
#[derive(Debug, Default)]
pub struct LineSplitter {
    buf: Vec<u8>,
}

impl LineSplitter {
    pub fn push(&mut self, chunk: &[u8]) -> Vec<String> {
        let mut lines = Vec::new();
        for &b in chunk {
            if b == b'\r' || b == b'\n' {
                if !self.buf.is_empty() {
                    lines.push(String::from_utf8_lossy(&self.buf).into_owned());
                    self.buf.clear();
                }
            } else {
                self.buf.push(b);
            }
        }
        lines
    }

    /// Remaining bytes after the stream closed without a final terminator.
    pub fn finish(&mut self) -> Option<String> {
        if self.buf.is_empty() {
            return None;
        }
        let line = String::from_utf8_lossy(&self.buf).into_owned();
        self.buf.clear();
        Some(line)
    }
}

/// Turns progress lines into events; remembers the previous op to tag `Stage::Begin`.
#[derive(Debug, Default)]
pub struct ProgressParser {
    last_op: Option<OpCode>,
}

impl ProgressParser {
    pub fn parse_line(&mut self, line: &str) -> Option<ProgressEvent> {
        let parsed = parse_line(line)?;
        let stage = if parsed.done {
            Stage::End
        } else if self.last_op != Some(parsed.op) {
            Stage::Begin
        } else {
            Stage::Progress
        };
        self.last_op = if parsed.done { None } else { Some(parsed.op) };

        Some(ProgressEvent {
            op: parsed.op,
            stage,
            current: parsed.current,
            total: parsed.total,
            message: parsed.message,
        })
    }
}

struct ParsedLine {
    op: OpCode,
    current: u64,
    total: Option<u64>,
    message: String,
    done: bool,
}

fn parse_line(line: &str) -> Option<ParsedLine> {
    let line = line.trim();
    let line = line
        .strip_prefix("remote:")
        .map(str::trim_start)
        .unwrap_or(line);

    let (label, rest) = line.split_once(':')?;
    let op = OpCode::from_label(label)?;
    let (lead, after) = leading_number(rest.trim_start())?;

    let (current, total, tail) = if let Some(after_pct) = after.strip_prefix('%') {
        // `NN% (cur/total)<tail>`
        let inner = after_pct.trim_start().strip_prefix('(')?;
        let (counts, tail) = inner.split_once(')')?;
        let (cur, tot) = counts.split_once('/')?;
        (
            cur.trim().parse::<u64>().ok()?,
            Some(tot.trim().parse::<u64>().ok()?),
            tail,
        )
    } else {
        (lead, None, after)
    };

    let tail = tail.trim().trim_start_matches(',').trim();
    let (message, done) = match tail.strip_suffix("done.") {
        Some(rest) => (rest.trim().trim_end_matches(',').trim_end(), true),
        None => (tail, false),
    };

    Some(ParsedLine {
        op,
        current,
        total,
        message: message.to_string(),
        done,
    })
}

fn leading_number(s: &str) -> Option<(u64, &str)> {
    let end = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
    if end == 0 {
        return None;
    }
    Some((s[..end].parse().ok()?, &s[end..]))
}
