use std::fmt;

/// Phase of a workout session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Plan overview, waiting for the user to start
    Detail,
    /// Get-ready countdown before an exercise
    Countdown,
    /// The user is performing the current exercise
    InProgress,
    /// Timed rest between two exercises
    Break,
    /// The session record is being submitted
    Saving,
    /// Terminal
    Finished,
}

impl Phase {
    pub fn display_name(&self) -> &'static str {
        match self {
            Phase::Detail => "Ready",
            Phase::Countdown => "Get Ready",
            Phase::InProgress => "In Progress",
            Phase::Break => "Rest",
            Phase::Saving => "Saving",
            Phase::Finished => "Complete",
        }
    }

    /// Whether a timer is live in this phase
    pub fn is_timed(&self) -> bool {
        matches!(self, Phase::Countdown | Phase::Break)
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Phase::Finished)
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}
