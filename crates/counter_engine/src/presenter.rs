use counter_core::{Count, DisplayView, StyleTag};
use counter_logging::counter_transition;

/// Surface the widget writes into. Owned by the host page.
pub trait DisplayTarget: Send {
    fn set_style(&mut self, style: StyleTag);
    fn set_text(&mut self, text: &str);
}

impl<T: DisplayTarget + ?Sized> DisplayTarget for Box<T> {
    fn set_style(&mut self, style: StyleTag) {
        (**self).set_style(style);
    }

    fn set_text(&mut self, text: &str) {
        (**self).set_text(text);
    }
}

/// Apply a view: style first, then text.
pub fn present(target: &mut dyn DisplayTarget, view: &DisplayView) {
    counter_transition!(
        "Presenting {} with text {:?}",
        view.style.class_name(),
        view.text
    );
    target.set_style(view.style);
    target.set_text(&view.text);
}

pub fn present_loading(target: &mut dyn DisplayTarget) {
    present(target, &DisplayView::loading());
}

pub fn present_loaded(target: &mut dyn DisplayTarget, value: &Count) {
    present(target, &DisplayView::loaded(value));
}

pub fn present_error(target: &mut dyn DisplayTarget) {
    present(target, &DisplayView::error());
}
