use indexmap::IndexMap;
use regex::Regex;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

/// One violation reported by the linter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    pub path: String,
    pub line: u32,
    pub column: u32,
    pub code: String,
    pub message: String,
}

/// Counts of findings seen in the linter's output
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FindingTally {
    pub total: usize,
    /// Per-code counts in first-seen order
    pub by_code: IndexMap<String, usize>,
}

impl FindingTally {
    pub fn record(&mut self, finding: &Finding) {
        self.total += 1;
        *self.by_code.entry(finding.code.clone()).or_insert(0) += 1;
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Get a summary string of what was found
    pub fn summary(&self) -> String {
        if self.by_code.is_empty() {
            return "No findings".to_string();
        }

        let parts: Vec<String> = self
            .by_code
            .iter()
            .map(|(code, count)| format!("{} {}", count, code))
            .collect();
        format!("{} findings ({})", self.total, parts.join(", "))
    }
}

/// Recognises lines in flake8's default `path:line:col: CODE message` format.
pub struct FindingParser {
    pattern: Regex,
}

impl FindingParser {
    pub fn new() -> Self {
        Self {
            pattern: Regex::new(
                r"^(?P<path>.+?):(?P<line>\d+):(?P<col>\d+):\s+(?P<code>[A-Z]+[0-9]+)\s+(?P<msg>.*?)\s*$",
            )
            .expect("Invalid finding regex"),
        }
    }

    pub fn parse_line(&self, line: &str) -> Option<Finding> {
        let caps = self.pattern.captures(line)?;
        Some(Finding {
            path: caps["path"].to_string(),
            line: caps["line"].parse().ok()?,
            column: caps["col"].parse().ok()?,
            code: caps["code"].to_string(),
            message: caps["msg"].to_string(),
        })
    }

    /// Forward `reader` to `writer` unchanged while tallying recognised findings.
    ///
    /// Lines are copied as raw bytes including their terminator, so the output is
    /// byte-identical to what the linter produced.
    pub async fn pump<R, W>(&self, mut reader: R, writer: &mut W) -> std::io::Result<FindingTally>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut tally = FindingTally::default();
        let mut buf = Vec::new();

        loop {
            buf.clear();
            let n = reader.read_until(b'\n', &mut buf).await?;
            if n == 0 {
                break;
            }

            writer.write_all(&buf).await?;

            let text = String::from_utf8_lossy(&buf);
            if let Some(finding) = self.parse_line(text.trim_end_matches(['\r', '\n'])) {
                tracing::trace!(
                    "{}:{}:{} {}",
                    finding.path,
                    finding.line,
                    finding.column,
                    finding.code
                );
                tally.record(&finding);
            }
        }

        writer.flush().await?;
        Ok(tally)
    }
}

impl Default for FindingParser {
    fn default() -> Self {
        Self::new()
    }
}
