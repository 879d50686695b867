use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;
use engine::{Account, NewEvent};
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

const SCHEDULE_FORMAT: &str = "%Y-%m-%d %H:%M";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventStage {
    Title,
    Details,
    Schedule,
    AssociatePrompt,
    AssociateChoose,
}

impl Stage for EventStage {
    const FIRST: Self = Self::Title;
    const ALL: &'static [Self] = &[
        Self::Title,
        Self::Details,
        Self::Schedule,
        Self::AssociatePrompt,
        Self::AssociateChoose,
    ];
    const TRANSITIONS: &'static [(Self, Outcome, Step<Self>)] = &[
        (Self::Title, Outcome::Submitted, Step::Goto(Self::Details)),
        (Self::Title, Outcome::Back, Step::Leave),
        (Self::Details, Outcome::Submitted, Step::Goto(Self::Schedule)),
        (Self::Details, Outcome::Back, Step::Goto(Self::Title)),
        (Self::Schedule, Outcome::Submitted, Step::Goto(Self::AssociatePrompt)),
        (Self::Schedule, Outcome::Preset, Step::Save),
        (Self::Schedule, Outcome::Back, Step::Goto(Self::Details)),
        (Self::AssociatePrompt, Outcome::Yes, Step::Goto(Self::AssociateChoose)),
        (Self::AssociatePrompt, Outcome::No, Step::Save),
        (Self::AssociatePrompt, Outcome::Back, Step::Goto(Self::Schedule)),
        (Self::AssociateChoose, Outcome::Submitted, Step::Save),
        (Self::AssociateChoose, Outcome::Back, Step::Goto(Self::AssociatePrompt)),
    ];

    fn spec(self) -> StageSpec {
        match self {
            Self::Title => StageSpec {
                prompt: "Event title:",
                placeholder: "Event title",
                limit: 96,
                required: Some("Title is required"),
            },
            Self::Details => StageSpec {
                prompt: "Details (optional):",
                placeholder: "Details (optional)",
                limit: 256,
                required: None,
            },
            Self::Schedule => StageSpec {
                prompt: "Schedule time (YYYY-MM-DD HH:MM, blank = now):",
                placeholder: "YYYY-MM-DD HH:MM (blank = now)",
                limit: 32,
                required: None,
            },
            Self::AssociatePrompt => StageSpec {
                prompt: "Associate with an account? (y/n)",
                placeholder: "y/n",
                limit: 5,
                required: None,
            },
            Self::AssociateChoose => StageSpec {
                prompt: "Enter account name (blank to skip):",
                placeholder: "Type account name",
                limit: 96,
                required: None,
            },
        }
    }
}

/// Parse a schedule typed in `zone`. Blank means "now" and yields `Ok(None)`.
///
/// Local times skipped by a DST jump are rejected.
fn parse_schedule(value: &str, zone: Tz) -> Result<Option<DateTime<Utc>>, ()> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }
    let naive = NaiveDateTime::parse_from_str(value, SCHEDULE_FORMAT).map_err(|_| ())?;
    zone.from_local_datetime(&naive)
        .earliest()
        .map(|local| Some(local.to_utc()))
        .ok_or(())
}

#[derive(Debug)]
pub struct EventWizard {
    wizard: Wizard<EventStage>,
    preset: Option<Account>,
    /// Parsed when the schedule stage is accepted.
    scheduled: Option<DateTime<Utc>>,
}

impl EventWizard {
    pub fn open(preset: Option<Account>) -> Self {
        Self {
            wizard: Wizard::new(),
            preset,
            scheduled: None,
        }
    }

    fn save(&mut self, env: &mut Env, account: Option<Account>) -> Transition {
        let event = NewEvent {
            title: self.wizard.value_of(EventStage::Title).to_string(),
            details: self.wizard.value_of(EventStage::Details).to_string(),
            event_time: self.scheduled.unwrap_or_else(|| env.now()),
            account_id: account.as_ref().map(|a| a.id),
            creator: env.creator(),
            created_at: Some(env.now()),
        };
        match env.store.create_event(event) {
            Ok(event) => {
                tracing::info!(id = event.id, account = ?event.account_id, "event created");
                match account {
                    Some(account) => env.info(format!("Event created for {}", account.name)),
                    None => env.info("Event created"),
                }
                Transition::Pop
            }
            Err(err) => {
                tracing::warn!("save event failed: {err}");
                self.wizard.fail(format!("save event: {err}"));
                Transition::Stay
            }
        }
    }
}

impl Screen for EventWizard {
    fn input(&self) -> &TextInput {
        self.wizard.input()
    }

    fn input_mut(&mut self) -> &mut TextInput {
        self.wizard.input_mut()
    }

    fn submit(&mut self, env: &mut Env, _text: &str) -> Transition {
        let mut linked = self.preset.clone();
        let outcome = match self.wizard.stage() {
            EventStage::Title | EventStage::Details => {
                if self.wizard.require().is_none() {
                    return Transition::Stay;
                }
                Outcome::Submitted
            }
            EventStage::Schedule => match parse_schedule(self.wizard.value(), env.zone()) {
                Ok(scheduled) => {
                    self.scheduled = scheduled;
                    if self.preset.is_some() {
                        Outcome::Preset
                    } else {
                        Outcome::Submitted
                    }
                }
                Err(()) => {
                    self.wizard.fail("Use format YYYY-MM-DD HH:MM");
                    return Transition::Stay;
                }
            },
            EventStage::AssociatePrompt => match yes_no(self.wizard.value()) {
                Some(answer) => answer,
                None => {
                    self.wizard.input_mut().clear();
                    self.wizard.fail("Please answer y or n");
                    return Transition::Stay;
                }
            },
            EventStage::AssociateChoose => match lookup_association(env, self.wizard.value()) {
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
        let mut lines = vec![
            styled(theme, Role::Title, "New Event"),
            styled(theme, Role::Secondary, stage.spec().prompt),
        ];
        if let (EventStage::Title, Some(account)) = (stage, &self.preset) {
            lines.push(styled(
                theme,
                Role::Faint,
                format!("Will link to {}", account.name),
            ));
        }
        lines.push(styled(
            theme,
            Role::Faint,
            "'/' goes back, 'exit.' returns home.",
        ));
        lines.extend(error_lines(theme, self.wizard.error()));
        lines
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;
    use crate::app::{
        nav::View,
        session::harness::{fixed_now, session},
        wizard::table_checks,
    };

    #[test]
    fn transition_table_is_well_formed() {
        table_checks::check_all::<EventStage>();
    }

    #[test]
    fn schedule_parses_in_zone() {
        let rome = chrono_tz::Europe::Rome;
        assert_eq!(
            parse_schedule("2025-03-04 15:30", rome),
            Ok(Some(Utc.with_ymd_and_hms(2025, 3, 4, 14, 30, 0).unwrap()))
        );
        assert_eq!(parse_schedule("  ", rome), Ok(None));
        assert_eq!(parse_schedule("tomorrow", rome), Err(()));
        assert_eq!(parse_schedule("2025-03-04", rome), Err(()));
        // 02:30 does not exist in Rome on the spring-forward night.
        assert_eq!(parse_schedule("2025-03-30 02:30", rome), Err(()));
    }

    #[test]
    fn malformed_schedule_keeps_the_stage() {
        let (mut session, store) = session();
        session.enter("4");
        session.enter("e");
        session.enter("Demo");
        session.enter("");
        session.enter("next week");
        assert!(session.rendered().contains("Use format YYYY-MM-DD HH:MM"));
        assert_eq!(session.input_value(), "next week");
        assert!(store.events().is_empty());
    }

    #[test]
    fn blank_schedule_means_now() {
        let (mut session, store) = session();
        session.enter("4");
        session.enter("2");
        session.enter("Call");
        session.enter("dial in");
        session.enter("");
        session.enter("n");

        assert!(session.rendered().contains("Event created"));
        let events = store.events();
        assert_eq!(events[0].event_time, fixed_now());
        assert_eq!(events[0].details, "dial in");
        assert_eq!(events[0].account_id, None);
    }

    #[test]
    fn title_is_required() {
        let (mut session, _) = session();
        session.enter("4");
        session.enter("2");
        session.enter("");
        assert!(session.rendered().contains("Title is required"));
        assert_eq!(session.active(), View::EventWizard);
    }

    #[test]
    fn linked_by_name_in_wizard() {
        let (mut session, store) = session();
        let globex = store.seed("Globex");
        session.enter("4");
        session.enter("2");
        session.enter("Kickoff");
        session.enter("");
        let when = fixed_now() + Duration::days(1);
        session.enter(&when.format("%Y-%m-%d %H:%M").to_string());
        session.enter("y");
        session.enter("GLOBEX");

        assert!(session.rendered().contains("Event created for Globex"));
        let events = store.events();
        assert_eq!(events[0].account_id, Some(globex.id));
        assert_eq!(events[0].event_time, when);
    }
}
