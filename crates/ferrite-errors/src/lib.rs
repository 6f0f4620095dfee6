use std::fmt::Display;

pub use annotate_snippets::Renderer;
use annotate_snippets::{Level, Snippet};
pub use text_size::TextRange;

/// A problem found in the source text, anchored at a range of it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, salsa::Update)]
pub struct Diagnostic {
    message: String,
    range: TextRange,
}

impl Diagnostic {
    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn range(&self) -> TextRange {
        self.range
    }

    pub fn error(message: impl Into<String>, range: TextRange) -> Self {
        Self { message: message.into(), range }
    }

    pub fn render<'a>(
        &'a self,
        renderer: &'a Renderer,
        path: &'a str,
        text: &'a str,
    ) -> impl Display + 'a {
        let message = Level::Error.title(&self.message).snippet(
            Snippet::source(text)
                .origin(path)
                .annotation(Level::Error.span(self.range.into()).label("here"))
                .fold(true),
        );
        renderer.render(message)
    }
}

#[cfg(test)]
mod tests {
    use super::{Diagnostic, Renderer, TextRange};

    #[test]
    fn render_points_at_range() {
        let text = "fn main() {\n    let x = ;\n}\n";
        let diagnostic = Diagnostic::error("expected an expression", TextRange::new(24.into(), 25.into()));

        let rendered = diagnostic.render(&Renderer::plain(), "main.rs", text).to_string();
        assert!(rendered.starts_with("error: expected an expression"), "{rendered}");
        assert!(rendered.contains("main.rs:2:13"), "{rendered}");
        assert!(rendered.contains("let x = ;"), "{rendered}");
        assert!(rendered.contains("^ here"), "{rendered}");
    }
}
