use engine::{Account, NewNote};
use ratatui::text::Line;

use super::{error_lines, lookup_association, styled};
use crate::{
    app::{
        input::TextInput,
        session::{Env, Screen, Transition},
        wizard::{Outcome, Stage, StageSpec, Step, Wizard, yes_no},
    },
    ui::{Role, Theme},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteStage {
    Content,
    AssociatePrompt,
    AssociateChoose,
}

impl Stage for NoteStage {
    const FIRST: Self = Self::Content;
    const ALL: &'static [Self] = &[Self::Content, Self::AssociatePrompt, Self::AssociateChoose];
    const TRANSITIONS: &'static [(Self, Outcome, Step<Self>)] = &[
        (Self::Content, Outcome::Submitted, Step::Goto(Self::AssociatePrompt)),
        (Self::Content, Outcome::Preset, Step::Save),
        (Self::Content, Outcome::Back, Step::Leave),
        (Self::AssociatePrompt, Outcome::Yes, Step::Goto(Self::AssociateChoose)),
        (Self::AssociatePrompt, Outcome::No, Step::Save),
        (Self::AssociatePrompt, Outcome::Back, Step::Goto(Self::Content)),
        (Self::AssociateChoose, Outcome::Submitted, Step::Save),
        (Self::AssociateChoose, Outcome::Back, Step::Goto(Self::AssociatePrompt)),
    ];

    fn spec(self) -> StageSpec {
        match self {
            Self::Content => StageSpec {
                prompt: "Type note text and press enter. '/' to cancel.",
                placeholder: "Note details",
                limit: 256,
                required: Some("Note cannot be empty"),
            },
            Self::AssociatePrompt => StageSpec {
                prompt: "Associate with an account? (y/n)",
                placeholder: "y/n",
                limit: 5,
                required: None,
            },
            Self::AssociateChoose => StageSpec {
                prompt: "Enter account name (blank to skip)",
                placeholder: "Type account name",
                limit: 96,
                required: None,
            },
        }
    }
}

#[derive(Debug)]
pub struct NoteWizard {
    wizard: Wizard<NoteStage>,
    /// Set when launched from an account; skips the association stages.
    preset: Option<Account>,
}

impl NoteWizard {
    pub fn open(preset: Option<Account>) -> Self {
        Self {
            wizard: Wizard::new(),
            preset,
        }
    }

    fn save(&mut self, env: &mut Env, account: Option<Account>) -> Transition {
        let note = NewNote {
            content: self.wizard.value_of(NoteStage::Content).to_string(),
            account_id: account.as_ref().map(|a| a.id),
            creator: env.creator(),
            created_at: Some(env.now()),
        };
        match env.store.create_note(note) {
            Ok(note) => {
                tracing::info!(id = note.id, account = ?note.account_id, "note saved");
                match account {
                    Some(account) => env.info(format!("Note saved for {}", account.name)),
                    None => env.info("Note saved"),
                }
                Transition::Pop
            }
            Err(err) => {
                tracing::warn!("save note failed: {err}");
                self.wizard.fail(format!("save note: {err}"));
                Transition::Stay
            }
        }
    }
}

impl Screen for NoteWizard {
    fn input(&self) -> &TextInput {
        self.wizard.input()
    }

    fn input_mut(&mut self) -> &mut TextInput {
        self.wizard.input_mut()
    }

    fn submit(&mut self, env: &mut Env, _text: &str) -> Transition {
        let mut linked = self.preset.clone();
        let outcome = match self.wizard.stage() {
            NoteStage::Content => {
                if self.wizard.require().is_none() {
                    return Transition::Stay;
                }
                if self.preset.is_some() {
                    Outcome::Preset
                } else {
                    Outcome::Submitted
                }
            }
            NoteStage::AssociatePrompt => match yes_no(self.wizard.value()) {
                Some(answer) => answer,
                None => {
                    self.wizard.input_mut().clear();
                    self.wizard.fail("Please answer y or n");
                    return Transition::Stay;
                }
            },
            NoteStage::AssociateChoose => match lookup_association(env, self.wizard.value()) {
                Ok(account) => {
                    linked = account;
                    Outcome::Submitted
                }
                Err(message) => {
                    self.wizard.input_mut().clear();
                    self.wizard.fail(message);
                    return Transition::Stay;
                }
            },
        };

        match self.wizard.advance(outcome) {
            Some(Step::Save) => self.save(env, linked),
            Some(Step::Leave) => Transition::Pop,
            _ => Transition::Stay,
        }
    }

    fn back(&mut self, _env: &mut Env) -> Transition {
        match self.wizard.advance(Outcome::Back) {
            Some(Step::Leave) => Transition::Pop,
            _ => Transition::Stay,
        }
    }

    fn render(&self, _env: &Env, theme: &Theme) -> Vec<Line<'static>> {
        let stage = self.wizard.stage();
        let mut lines = vec![styled(theme, Role::Title, "New Note")];
        match stage {
            NoteStage::Content => {
                lines.push(styled(theme, Role::Faint, stage.spec().prompt));
                if let Some(account) = &self.preset {
                    lines.push(styled(
                        theme,
                        Role::Faint,
                        format!("Will link to {}", account.name),
                    ));
                }
            }
            NoteStage::AssociatePrompt | NoteStage::AssociateChoose => {
                lines.push(styled(theme, Role::Secondary, stage.spec().prompt));
            }
        }
        lines.extend(error_lines(theme, self.wizard.error()));
        lines
    }
}
