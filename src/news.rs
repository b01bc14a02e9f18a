//! Human-readable news lines produced during a pass

use serde::{Deserialize, Serialize};

/// Ordered news sink, cleared at the start of every pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NewsFeed {
    lines: Vec<String>,
}

impl NewsFeed {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a line and log it
    pub fn push(&mut self, line: impl Into<String>) {
        let line = line.into();
        tracing::info!("{}", line);
        self.lines.push(line);
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn mentions(&self, needle: &str) -> bool {
        self.lines.iter().any(|l| l.contains(needle))
    }

    /// Every line followed by a newline
    pub fn to_message(&self) -> String {
        self.lines.iter().fold(String::new(), |mut out, line| {
            out.push_str(line);
            out.push('\n');
            out
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_joins_lines() {
        let mut feed = NewsFeed::new();
        feed.push("Davion invaded Kathil");
        feed.push("Liao fortifying on Sian. Control now 60");
        assert_eq!(
            feed.to_message(),
            "Davion invaded Kathil\nLiao fortifying on Sian. Control now 60\n"
        );
        assert!(feed.mentions("Kathil"));
    }

    #[test]
    fn test_clear() {
        let mut feed = NewsFeed::new();
        feed.push("x");
        feed.clear();
        assert!(feed.is_empty());
        assert_eq!(feed.to_message(), "");
    }
}
