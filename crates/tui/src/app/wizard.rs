//! Multi-stage data entry.
//!
//! A wizard is a stage enum plus a transition table mapping
//! `(stage, outcome)` to the next [`Step`]. Every stage owns its own text
//! buffer, so stepping back shows the value entered earlier.

use std::fmt::Debug;

use super::input::TextInput;

/// Static description of one stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageSpec {
    /// Line shown above the input.
    pub prompt: &'static str,
    pub placeholder: &'static str,
    pub limit: usize,
    /// Error shown when the stage is submitted blank; `None` for optional stages.
    pub required: Option<&'static str>,
}

/// What happened when a stage was submitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The value was accepted.
    Submitted,
    /// Accepted, and the association is already known.
    Preset,
    Yes,
    No,
    Back,
    /// Storage rejected the record as a duplicate.
    Conflict,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step<S> {
    Goto(S),
    Save,
    /// Abandon the wizard and return to the previous view.
    Leave,
}

pub trait Stage: Copy + Eq + Debug + 'static {
    const FIRST: Self;
    /// Every stage, in buffer order.
    const ALL: &'static [Self];
    const TRANSITIONS: &'static [(Self, Outcome, Step<Self>)];

    fn spec(self) -> StageSpec;
}

/// Look up the declared step for `outcome` on `stage`.
pub fn step_for<S: Stage>(stage: S, outcome: Outcome) -> Option<Step<S>> {
    S::TRANSITIONS
        .iter()
        .find(|(from, on, _)| *from == stage && *on == outcome)
        .map(|(_, _, step)| *step)
}

/// Interpret an association answer. Blank counts as "no".
pub fn yes_no(value: &str) -> Option<Outcome> {
    match value.trim().to_lowercase().as_str() {
        "y" | "yes" => Some(Outcome::Yes),
        "n" | "no" | "" => Some(Outcome::No),
        _ => None,
    }
}

#[derive(Debug, Clone)]
pub struct Wizard<S: Stage> {
    stage: S,
    buffers: Vec<TextInput>,
    error: Option<String>,
}

impl<S: Stage> Default for Wizard<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Stage> Wizard<S> {
    pub fn new() -> Self {
        let buffers = S::ALL
            .iter()
            .map(|stage| {
                let spec = stage.spec();
                TextInput::new(spec.placeholder, spec.limit)
            })
            .collect();
        Self {
            stage: S::FIRST,
            buffers,
            error: None,
        }
    }

    fn slot(stage: S) -> usize {
        S::ALL.iter().position(|s| *s == stage).unwrap_or(0)
    }

    pub fn stage(&self) -> S {
        self.stage
    }

    pub fn spec(&self) -> StageSpec {
        self.stage.spec()
    }

    pub fn input(&self) -> &TextInput {
        &self.buffers[Self::slot(self.stage)]
    }

    pub fn input_mut(&mut self) -> &mut TextInput {
        let slot = Self::slot(self.stage);
        &mut self.buffers[slot]
    }

    /// Trimmed content of the current stage.
    pub fn value(&self) -> &str {
        self.input().value().trim()
    }

    /// Trimmed content of any stage.
    pub fn value_of(&self, stage: S) -> &str {
        self.buffers[Self::slot(stage)].value().trim()
    }

    /// Pre-fill a stage's buffer (edit flows, current settings).
    pub fn fill(&mut self, stage: S, value: &str) {
        self.buffers[Self::slot(stage)].set(value);
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn fail(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
    }

    /// The current value, or `None` after flagging a blank required stage.
    pub fn require(&mut self) -> Option<String> {
        let value = self.value().to_string();
        match self.spec().required {
            Some(message) if value.is_empty() => {
                self.fail(message);
                None
            }
            _ => Some(value),
        }
    }

    /// Follow the transition table. Moving to another stage clears the error
    /// and selects whatever that stage already holds.
    ///
    /// Returns `None` when the table declares nothing for this pair.
    pub fn advance(&mut self, outcome: Outcome) -> Option<Step<S>> {
        let step = step_for(self.stage, outcome)?;
        if let Step::Goto(next) = step {
            self.stage = next;
            self.error = None;
            self.input_mut().select();
        }
        Some(step)
    }

    #[cfg(test)]
    pub(crate) fn jump(&mut self, stage: S) {
        self.stage = stage;
    }
}
