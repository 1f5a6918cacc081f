//! Open/close state machine for a single grid.

/// Lifecycle phase of the grid's preview.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Phase {
    #[default]
    Closed,
    Opening,
    Open,
    Closing,
}

/// Snapshot of a grid's open/close state.
///
/// `current` is `Some` exactly when the phase is not `Closed`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GridState {
    phase: Phase,
    current: Option<usize>,
}

/// Why a request was refused.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Refusal {
    Animating,
    AlreadyExpanded,
    NotExpanded,
}

impl GridState {
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Index of the open item, if any.
    pub fn current(&self) -> Option<usize> {
        self.current
    }

    pub fn is_expanded(&self) -> bool {
        self.phase != Phase::Closed
    }

    pub fn is_animating(&self) -> bool {
        matches!(self.phase, Phase::Opening | Phase::Closing)
    }

    /// `Closed -> Opening`.
    pub fn begin_open(&mut self, index: usize) -> Result<(), Refusal> {
        if self.is_animating() {
            return Err(Refusal::Animating);
        }
        if self.is_expanded() {
            return Err(Refusal::AlreadyExpanded);
        }
        self.phase = Phase::Opening;
        self.current = Some(index);
        Ok(())
    }

    /// `Opening -> Open`.
    pub fn finish_open(&mut self) {
        debug_assert_eq!(self.phase, Phase::Opening);
        self.phase = Phase::Open;
    }

    /// `Open -> Closing`.
    pub fn begin_close(&mut self) -> Result<usize, Refusal> {
        if self.is_animating() {
            return Err(Refusal::Animating);
        }
        match self.current {
            Some(index) if self.phase == Phase::Open => {
                self.phase = Phase::Closing;
                Ok(index)
            }
            _ => Err(Refusal::NotExpanded),
        }
    }

    /// `Closing -> Closed`.
    pub fn finish_close(&mut self) {
        debug_assert_eq!(self.phase, Phase::Closing);
        self.phase = Phase::Closed;
        self.current = None;
    }
}
