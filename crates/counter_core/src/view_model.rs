use crate::Count;

/// Text shown while loading and after a failure.
pub const PLACEHOLDER_TEXT: &str = "--";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StyleTag {
    Loading,
    Loaded,
    Error,
}

impl StyleTag {
    /// Class name the host page styles this state with.
    pub fn class_name(self) -> &'static str {
        match self {
            StyleTag::Loading => "count-loading",
            StyleTag::Loaded => "count-loaded",
            StyleTag::Error => "count-error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayView {
    pub style: StyleTag,
    pub text: String,
}

impl DisplayView {
    pub fn loading() -> Self {
        Self {
            style: StyleTag::Loading,
            text: PLACEHOLDER_TEXT.to_string(),
        }
    }

    pub fn loaded(value: &Count) -> Self {
        Self {
            style: StyleTag::Loaded,
            text: value.to_string(),
        }
    }

    pub fn error() -> Self {
        Self {
            style: StyleTag::Error,
            text: PLACEHOLDER_TEXT.to_string(),
        }
    }
}
