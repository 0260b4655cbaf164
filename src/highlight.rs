use inksac::prelude::*;

const PROMPT: &str = "$";

/// Prompt shown before each interactive read.
#[derive(Debug, Clone)]
pub struct Prompt {
    text: String,
}

impl Default for Prompt {
    fn default() -> Self {
        Self::new()
    }
}

impl Prompt {
    pub fn new() -> Self {
        let support = check_color_support().unwrap_or(ColorSupport::NoColor);
        Self::with_support(support)
    }

    pub fn plain() -> Self {
        Self::with_support(ColorSupport::NoColor)
    }

    fn with_support(support: ColorSupport) -> Self {
        if matches!(support, ColorSupport::NoColor) {
            return Self {
                text: format!("{} ", PROMPT),
            };
        }

        let prompt_style = Style::builder()
            .foreground(Color::Green)
            .bold()
            .build();
        Self {
            text: format!("{} ", PROMPT.style(prompt_style)),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}
