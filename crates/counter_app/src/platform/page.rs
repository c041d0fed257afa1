use std::io::{self, Write};

use counter_core::StyleTag;
use counter_engine::{DisplayTarget, TargetLocator, TARGET_ID};

/// Display target that prints each change of the counter element to stdout.
pub(crate) struct TerminalTarget {
    id: String,
    style: Option<StyleTag>,
}

impl TerminalTarget {
    fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            style: None,
        }
    }

    fn render(&self, text: &str) -> String {
        let class = self.style.map(StyleTag::class_name).unwrap_or("");
        format!("#{} class=\"{}\" text={:?}", self.id, class, text)
    }
}

impl DisplayTarget for TerminalTarget {
    fn set_style(&mut self, style: StyleTag) {
        self.style = Some(style);
    }

    fn set_text(&mut self, text: &str) {
        let line = self.render(text);
        // A closed stdout must not take the page down with it.
        let _ = writeln!(io::stdout().lock(), "{line}");
    }
}

/// A page that may or may not include the counter element.
pub(crate) struct TerminalPage {
    has_counter: bool,
}

impl TerminalPage {
    pub fn new(has_counter: bool) -> Self {
        Self { has_counter }
    }
}

impl TargetLocator for TerminalPage {
    type Target = TerminalTarget;

    fn locate(&mut self, id: &str) -> Option<TerminalTarget> {
        (self.has_counter && id == TARGET_ID).then(|| TerminalTarget::new(id))
    }
}
