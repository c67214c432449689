use crate::tween::FullTween;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Smallest highlighted unit. The style is opaque to the planner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    pub content: String,
    #[serde(default)]
    pub style: Value,
}

impl Token {
    pub fn new(content: impl Into<String>, style: Value) -> Self {
        Token {
            content: content.into(),
            style,
        }
    }

    pub fn plain(content: impl Into<String>) -> Self {
        Token::new(content, Value::Null)
    }

    /// Width in columns (chars).
    pub fn width(&self) -> usize {
        self.content.chars().count()
    }

    /// Splits the token after `column` chars, keeping the style on both halves.
    pub fn split_at(&self, column: usize) -> (Token, Token) {
        let byte = self
            .content
            .char_indices()
            .nth(column)
            .map_or(self.content.len(), |(i, _)| i);
        let (left, right) = self.content.split_at(byte);
        (
            Token::new(left, self.style.clone()),
            Token::new(right, self.style.clone()),
        )
    }
}

/// One source line as produced by the highlighter.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HighlightedLine {
    pub tokens: Vec<Token>,
}

impl HighlightedLine {
    pub fn new(tokens: Vec<Token>) -> Self {
        HighlightedLine { tokens }
    }

    /// Plain text of the line.
    pub fn text(&self) -> String {
        self.tokens.iter().map(|t| t.content.as_str()).collect()
    }
}

impl From<&str> for HighlightedLine {
    fn from(s: &str) -> Self {
        HighlightedLine::new(vec![Token::plain(s)])
    }
}

/// Plain text of every line, per state.
pub fn line_texts(lines: &FullTween<Vec<HighlightedLine>>) -> FullTween<Vec<String>> {
    lines
        .as_ref()
        .map(|lines, _| lines.iter().map(HighlightedLine::text).collect())
}

/// The whole code block per state: lines joined with newlines, trailing
/// whitespace dropped and a single final newline.
pub fn code_text(texts: &FullTween<Vec<String>>) -> FullTween<String> {
    texts.as_ref().map(|lines, _| {
        let mut code = lines.join("\n").trim_end().to_string();
        code.push('\n');
        code
    })
}
