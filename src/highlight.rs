use inksac::prelude::*;

/// Colours the console line: the command word, and dimmed completion hints.
#[derive(Debug, Clone, Copy)]
pub struct SyntaxHighlighter {
    color_support: ColorSupport,
}

impl Default for SyntaxHighlighter {
    fn default() -> Self {
        Self::new()
    }
}

impl SyntaxHighlighter {
    pub fn new() -> Self {
        let support = check_color_support().unwrap_or(ColorSupport::NoColor);
        Self::with_support(support)
    }

    pub fn with_support(color_support: ColorSupport) -> Self {
        Self { color_support }
    }

    fn enabled(&self) -> bool {
        !matches!(self.color_support, ColorSupport::NoColor)
    }

    /// Only the first word is styled; the rest of the line keeps its spacing.
    pub fn highlight_command(&self, input: &str) -> String {
        if !self.enabled() {
            return input.to_string();
        }

        let trimmed = input.trim_start();
        let Some(word) = trimmed.split_whitespace().next() else {
            return input.to_string();
        };
        let leading = &input[..input.len() - trimmed.len()];
        let rest = &trimmed[word.len()..];

        let command_style = Style::builder().foreground(Color::Cyan).bold().build();
        format!("{}{}{}", leading, word.style(command_style), rest)
    }

    pub fn highlight_error(&self, error: &str) -> String {
        if !self.enabled() {
            return error.to_string();
        }

        let error_style = Style::builder().foreground(Color::Red).bold().build();
        error.style(error_style).to_string()
    }

    pub fn highlight_hint(&self, hint: &str) -> String {
        if !self.enabled() {
            return hint.to_string();
        }

        let hint_style = Style::builder().foreground(Color::RGB(128, 128, 128)).build();
        hint.style(hint_style).to_string()
    }
}
