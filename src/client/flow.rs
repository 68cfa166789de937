use serde::{Deserialize, Serialize};

/// Status of a generation flow, as rendered by the module pages
///
/// `M` is the generated material (a script, a question), `R` the outcome of
/// working with it (a dictation report, a grade). The legal path is
/// idle -> generating -> ready -> result, with reset back to idle anywhere.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FlowState<M, R> {
    Idle,
    Generating,
    Ready(M),
    Result(M, R),
}

impl<M, R> FlowState<M, R> {
    /// Enter the generating state; refused while a generation is in flight
    /// (the UI disables the trigger rather than cancelling the request)
    pub fn begin(&mut self) -> bool {
        if matches!(self, FlowState::Generating) {
            return false;
        }
        *self = FlowState::Generating;
        true
    }

    /// Material arrived; the flow is ready for the user to work with it
    pub fn ready(&mut self, material: M) {
        *self = FlowState::Ready(material);
    }

    /// Attach the outcome, keeping the material visible alongside it
    pub fn finish(&mut self, result: R)
    where
        M: Clone,
    {
        if let FlowState::Ready(material) | FlowState::Result(material, _) = self {
            let material = material.clone();
            *self = FlowState::Result(material, result);
        }
    }

    /// Back to a retryable idle state (also the failure landing spot)
    pub fn reset(&mut self) {
        *self = FlowState::Idle;
    }

    pub fn is_generating(&self) -> bool {
        matches!(self, FlowState::Generating)
    }

    pub fn material(&self) -> Option<&M> {
        match self {
            FlowState::Ready(material) | FlowState::Result(material, _) => Some(material),
            _ => None,
        }
    }
}

impl<M, R> Default for FlowState<M, R> {
    fn default() -> Self {
        FlowState::Idle
    }
}
