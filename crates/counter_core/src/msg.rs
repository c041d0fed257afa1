use crate::Count;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// The display target was found after the settle delay.
    TargetLocated,
    /// The page has no display target.
    TargetMissing,
    /// Both the fetch and the minimum timer have finished.
    RaceSettled(RaceOutcome),
}

/// What the race coordinator resolved to, stripped of transport detail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RaceOutcome {
    Counted(Count),
    Failed,
}
