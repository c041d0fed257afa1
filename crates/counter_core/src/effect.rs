use crate::DisplayView;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Write the view to the display target.
    Present(DisplayView),
    /// Launch the fetch and the minimum-duration timer.
    StartRace,
    /// No display target on the page; the sequence ends here.
    Abort,
}
