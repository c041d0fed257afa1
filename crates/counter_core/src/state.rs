use crate::view_model::DisplayView;
use crate::Count;

/// A sequence writes to its target once for `loading` and once for the terminal state.
pub const MAX_PRESENTATIONS: u8 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Loading,
    Loaded,
    Error,
}

impl Phase {
    pub fn is_terminal(self) -> bool {
        matches!(self, Phase::Loaded | Phase::Error)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WidgetState {
    phase: Phase,
    value: Option<Count>,
    presentations: u8,
}

impl WidgetState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Count shown by a `Loaded` widget.
    pub fn value(&self) -> Option<&Count> {
        self.value.as_ref()
    }

    /// Number of views emitted so far in this sequence.
    pub fn presentations(&self) -> u8 {
        self.presentations
    }

    /// Current view, or `None` while nothing has been presented yet.
    pub fn view(&self) -> Option<DisplayView> {
        match self.phase {
            Phase::Idle => None,
            Phase::Loading => Some(DisplayView::loading()),
            Phase::Loaded => self.value.as_ref().map(DisplayView::loaded),
            Phase::Error => Some(DisplayView::error()),
        }
    }

    pub(crate) fn begin_loading(&mut self) -> DisplayView {
        debug_assert_eq!(self.phase, Phase::Idle);
        self.phase = Phase::Loading;
        self.presentations += 1;
        DisplayView::loading()
    }

    pub(crate) fn settle_loaded(&mut self, value: Count) -> DisplayView {
        debug_assert_eq!(self.phase, Phase::Loading);
        self.phase = Phase::Loaded;
        let view = DisplayView::loaded(&value);
        self.value = Some(value);
        self.presentations += 1;
        view
    }

    pub(crate) fn settle_error(&mut self) -> DisplayView {
        debug_assert_eq!(self.phase, Phase::Loading);
        self.phase = Phase::Error;
        self.presentations += 1;
        DisplayView::error()
    }
}
