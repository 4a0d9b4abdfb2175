//! Shared stage lifecycle: Active ⇄ suspended-at-yield, then one of the
//! terminal states. Terminal means terminal; there is no silent recovery.

use rowtide_core::prelude::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StageState {
    /// Pulling is allowed.
    Active,
    /// Source drained normally; further pulls yield no elements, not errors.
    Exhausted,
    /// Explicitly closed by the consumer; further pulls are an error.
    Closed,
    /// An upstream fetch failed; the message is re-raised on every pull.
    Failed(String),
}

impl StageState {
    /// Gate a pull: `Ok(true)` to proceed, `Ok(false)` for a drained
    /// stream, `Err` for closed or failed ones.
    pub fn check_pull(&self) -> Result<bool> {
        match self {
            StageState::Active => Ok(true),
            StageState::Exhausted => Ok(false),
            StageState::Closed => Err(Error::Closed),
            StageState::Failed(msg) => Err(Error::Fetch(msg.clone())),
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, StageState::Active)
    }
}
