use engine::{Account, NewAccount};
use ratatui::text::Line;

use super::{error_lines, styled};
use crate::{
    app::{
        input::TextInput,
        session::{Env, Screen, Transition},
        wizard::{Outcome, Stage, StageSpec, Step, Wizard},
    },
    ui::{Role, Theme},
};

const FIELD_LIMIT: usize = 96;
const REQUIRED: &str = "This field is required";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountStage {
    Name,
    Phone,
    Address,
    Email,
    DecisionMaker,
}

impl AccountStage {
    fn field(label: &'static str, required: bool) -> StageSpec {
        StageSpec {
            prompt: label,
            placeholder: label,
            limit: FIELD_LIMIT,
            required: required.then_some(REQUIRED),
        }
    }
}

impl Stage for AccountStage {
    const FIRST: Self = Self::Name;
    const ALL: &'static [Self] = &[
        Self::Name,
        Self::Phone,
        Self::Address,
        Self::Email,
        Self::DecisionMaker,
    ];
    const TRANSITIONS: &'static [(Self, Outcome, Step<Self>)] = &[
        (Self::Name, Outcome::Submitted, Step::Goto(Self::Phone)),
        (Self::Name, Outcome::Back, Step::Leave),
        (Self::Phone, Outcome::Submitted, Step::Goto(Self::Address)),
        (Self::Phone, Outcome::Back, Step::Goto(Self::Name)),
        (Self::Address, Outcome::Submitted, Step::Goto(Self::Email)),
        (Self::Address, Outcome::Back, Step::Goto(Self::Phone)),
        (Self::Email, Outcome::Submitted, Step::Goto(Self::DecisionMaker)),
        (Self::Email, Outcome::Back, Step::Goto(Self::Address)),
        (Self::DecisionMaker, Outcome::Submitted, Step::Save),
        (Self::DecisionMaker, Outcome::Back, Step::Goto(Self::Email)),
        (Self::DecisionMaker, Outcome::Conflict, Step::Goto(Self::Name)),
    ];

    fn spec(self) -> StageSpec {
        match self {
            Self::Name => Self::field("Account name", true),
            Self::Phone => Self::field("Phone", false),
            Self::Address => Self::field("Address", false),
            Self::Email => Self::field("Email", false),
            Self::DecisionMaker => Self::field("Decision maker", false),
        }
    }
}

/// Create or edit an account, one field per stage.
#[derive(Debug)]
pub struct AccountForm {
    wizard: Wizard<AccountStage>,
    /// The record being edited; `None` when creating.
    original: Option<Account>,
}

impl AccountForm {
    pub fn open(original: Option<Account>) -> Self {
        let mut wizard = Wizard::new();
        if let Some(account) = &original {
            wizard.fill(AccountStage::Name, &account.name);
            wizard.fill(AccountStage::Phone, &account.phone);
            wizard.fill(AccountStage::Address, &account.address);
            wizard.fill(AccountStage::Email, &account.email);
            wizard.fill(AccountStage::DecisionMaker, &account.decision_maker);
        }
        Self { wizard, original }
    }

    fn save(&mut self, env: &mut Env) -> Transition {
        let value = |stage| self.wizard.value_of(stage).to_string();
        let name = value(AccountStage::Name);
        let result = match &self.original {
            Some(original) => env
                .store
                .update_account(&Account {
                    name: name.clone(),
                    phone: value(AccountStage::Phone),
                    address: value(AccountStage::Address),
                    email: value(AccountStage::Email),
                    decision_maker: value(AccountStage::DecisionMaker),
                    ..original.clone()
                })
                .map(|account| format!("Account '{}' updated", account.name)),
            None => env
                .store
                .create_account(NewAccount {
                    name: name.clone(),
                    phone: value(AccountStage::Phone),
                    address: value(AccountStage::Address),
                    email: value(AccountStage::Email),
                    decision_maker: value(AccountStage::DecisionMaker),
                    creator: env.creator(),
                    created_at: Some(env.now()),
                })
                .map(|account| format!("Account '{}' created", account.name)),
        };

        match result {
            Ok(message) => {
                tracing::info!(account = %name, "account saved");
                env.info(message);
                Transition::Pop
            }
            Err(err) if err.is_duplicate() => {
                self.wizard.advance(Outcome::Conflict);
                self.wizard.fail("An account with that name already exists");
                Transition::Stay
            }
            Err(err) => {
                tracing::warn!(account = %name, "save account failed: {err}");
                self.wizard.fail(format!("save account: {err}"));
                Transition::Stay
            }
        }
    }
}

impl Screen for AccountForm {
    fn input(&self) -> &TextInput {
        self.wizard.input()
    }

    fn input_mut(&mut self) -> &mut TextInput {
        self.wizard.input_mut()
    }

    fn submit(&mut self, env: &mut Env, _text: &str) -> Transition {
        if self.wizard.require().is_none() {
            return Transition::Stay;
        }
        match self.wizard.advance(Outcome::Submitted) {
            Some(Step::Save) => self.save(env),
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
        let title = if self.original.is_some() {
            "Edit Account"
        } else {
            "Add Account"
        };
        let stage = self.wizard.stage();
        let position = AccountStage::ALL
            .iter()
            .position(|s| *s == stage)
            .unwrap_or(0)
            + 1;

        let mut lines = vec![
            styled(theme, Role::Title, title),
            styled(
                theme,
                Role::Faint,
                "Enter details. '/' to go back, 'exit.' to cancel.",
            ),
            Line::default(),
            styled(
                theme,
                Role::Secondary,
                format!("{position}/{}", AccountStage::ALL.len()),
            ),
            styled(theme, Role::Primary, format!("{}:", stage.spec().prompt)),
        ];
        lines.extend(error_lines(theme, self.wizard.error()));
        lines
    }
}
