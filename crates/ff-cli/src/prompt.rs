//! Line input for passwords, codes and the test flow.

use std::io::Write;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Stdin};

/// Reads one trimmed line per call. Labels go to stderr so stdout stays
/// machine-readable.
pub struct Prompt<R> {
    reader: R,
}

impl Prompt<BufReader<Stdin>> {
    #[must_use]
    pub fn stdin() -> Self {
        Self::new(BufReader::new(tokio::io::stdin()))
    }
}

impl<R: AsyncBufRead + Unpin> Prompt<R> {
    pub const fn new(reader: R) -> Self {
        Self { reader }
    }

    /// Print `label` and read a line. `None` at end of input.
    pub async fn line(&mut self, label: &str) -> anyhow::Result<Option<String>> {
        if !label.is_empty() {
            let mut stderr = std::io::stderr();
            write!(stderr, "{label}")?;
            stderr.flush()?;
        }
        let mut buf = String::new();
        let read = self.reader.read_line(&mut buf).await?;
        if read == 0 {
            return Ok(None);
        }
        Ok(Some(buf.trim_end_matches(['\r', '\n']).to_string()))
    }

    /// Like [`Self::line`], but end of input is an error.
    pub async fn required(&mut self, label: &str) -> anyhow::Result<String> {
        self.line(label)
            .await?
            .ok_or_else(|| anyhow::anyhow!("input ended before {}", label.trim_end_matches([':', ' '])))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[tokio::test]
    async fn reads_lines_until_end_of_input() {
        let mut prompt = Prompt::new(&b"first\r\n\nlast"[..]);
        assert_eq!(prompt.line("").await.expect("read"), Some("first".into()));
        assert_eq!(prompt.line("").await.expect("read"), Some(String::new()));
        assert_eq!(prompt.line("").await.expect("read"), Some("last".into()));
        assert_eq!(prompt.line("").await.expect("read"), None);
    }

    #[tokio::test]
    async fn required_fails_at_end_of_input() {
        let mut prompt = Prompt::new(&b""[..]);
        let err = prompt.required("Password: ").await.expect_err("eof");
        assert!(err.to_string().contains("Password"));
    }
}
