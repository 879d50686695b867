use engine::{Activity, Event};
use ratatui::text::Line;

use super::{activity_lines, styled};
use crate::{
    app::{
        agenda::{Agenda, classify},
        feed::{self, FEED_LIMIT},
        input::TextInput,
        session::{Env, Screen, Transition},
    },
    ui::{Role, Theme},
};

const UPCOMING_SHOWN: usize = 5;
const RECENT_SHOWN: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Events,
    Activity,
}

#[derive(Debug)]
pub struct Dashboard {
    input: TextInput,
    mode: Mode,
    agenda: Agenda,
    feed: Vec<Activity>,
}

impl Dashboard {
    pub fn open(env: &mut Env) -> Self {
        let mut dashboard = Self {
            input: TextInput::new("Command (t=toggle, r=refresh, /, exit.)", 48),
            mode: Mode::Events,
            agenda: Agenda::default(),
            feed: Vec::new(),
        };
        dashboard.load(env);
        dashboard
    }

    fn load(&mut self, env: &mut Env) {
        match env.store.list_events() {
            Ok(events) => self.agenda = classify(&events, env.local_now()),
            Err(err) => {
                tracing::warn!("load events failed: {err}");
                env.error(format!("load events: {err}"));
            }
        }
        match env.store.list_activity(FEED_LIMIT) {
            Ok(entries) => self.feed = entries,
            Err(err) => {
                tracing::warn!("load activity failed: {err}");
                env.error(format!("load activity: {err}"));
            }
        }
    }

    fn section(
        theme: &Theme,
        env: &Env,
        title: &str,
        events: &[Event],
        shown: usize,
        empty: &str,
        role: Role,
    ) -> Vec<Line<'static>> {
        let mut lines = vec![styled(theme, Role::Subtitle, title)];
        if events.is_empty() {
            lines.push(styled(theme, Role::Faint, empty));
        }
        lines.extend(
            events
                .iter()
                .take(shown)
                .map(|event| styled(theme, role, feed::event_line(event, env.zone()))),
        );
        lines
    }
}

impl Screen for Dashboard {
    fn input(&self) -> &TextInput {
        &self.input
    }

    fn input_mut(&mut self) -> &mut TextInput {
        &mut self.input
    }

    fn submit(&mut self, env: &mut Env, text: &str) -> Transition {
        self.input.clear();
        match text.trim().to_lowercase().as_str() {
            "" => {}
            "t" | "toggle" => {
                self.mode = match self.mode {
                    Mode::Events => Mode::Activity,
                    Mode::Activity => Mode::Events,
                };
            }
            "r" | "refresh" => self.load(env),
            "exit" => return Transition::Home,
            _ => env.error("Unknown dashboard command"),
        }
        Transition::Stay
    }

    fn resume(&mut self, env: &mut Env) {
        self.load(env);
    }

    fn render(&self, env: &Env, theme: &Theme) -> Vec<Line<'static>> {
        let mut lines = vec![
            styled(theme, Role::Title, "Dashboard"),
            styled(
                theme,
                Role::Faint,
                "Press t to toggle events/activity, r to refresh, '/' to go back.",
            ),
            Line::default(),
        ];

        match self.mode {
            Mode::Events => {
                let agenda = &self.agenda;
                lines.extend(Self::section(
                    theme,
                    env,
                    "Today's Events",
                    &agenda.today,
                    usize::MAX,
                    "Nothing scheduled today.",
                    Role::Success,
                ));
                lines.push(Line::default());
                lines.extend(Self::section(
                    theme,
                    env,
                    "Upcoming",
                    &agenda.upcoming,
                    UPCOMING_SHOWN,
                    "No upcoming events.",
                    Role::Warning,
                ));
                lines.push(Line::default());
                lines.extend(Self::section(
                    theme,
                    env,
                    "Recent",
                    &agenda.past,
                    RECENT_SHOWN,
                    "No recent events.",
                    Role::Danger,
                ));
            }
            Mode::Activity => {
                lines.push(styled(theme, Role::Subtitle, "Recent CRM Activity"));
                lines.extend(activity_lines(theme, &self.feed, env.zone()));
            }
        }
        lines
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use engine::NewEvent;

    use crate::{
        app::{nav::View, session::harness::{fixed_now, session}},
        store::Store,
    };

    fn schedule(store: &dyn Store, title: &str, hours: i64) {
        store
            .create_event(NewEvent {
                title: title.to_string(),
                details: String::new(),
                event_time: fixed_now() + Duration::hours(hours),
                account_id: None,
                creator: "sam".to_string(),
                created_at: None,
            })
            .unwrap();
    }

    #[test]
    fn empty_dashboard_explains_itself() {
        let (mut session, _) = session();
        session.enter("1");
        let screen = session.rendered();
        assert!(screen.contains("Nothing scheduled today."));
        assert!(screen.contains("No upcoming events."));
        assert!(screen.contains("No recent events."));
    }

    #[test]
    fn events_land_in_their_sections() {
        let (mut session, store) = session();
        schedule(store.as_ref(), "standup", 2);
        schedule(store.as_ref(), "kickoff", 48);
        schedule(store.as_ref(), "retro", -48);
        session.enter("1");

        let screen = session.rendered();
        let today = screen.find("Today's Events").unwrap();
        let upcoming = screen.find("Upcoming").unwrap();
        let recent = screen.find("Recent").unwrap();
        let standup = screen.find("standup").unwrap();
        let kickoff = screen.find("kickoff").unwrap();
        let retro = screen.find("retro").unwrap();
        assert!(today < standup && standup < upcoming);
        assert!(upcoming < kickoff && kickoff < recent);
        assert!(recent < retro);
    }

    #[test]
    fn upcoming_is_capped_at_five() {
        let (mut session, store) = session();
        for day in 1..=7 {
            schedule(store.as_ref(), &format!("call-{day}"), 24 * day + 1);
        }
        session.enter("1");
        let screen = session.rendered();
        assert!(screen.contains("call-5"));
        assert!(!screen.contains("call-6"));
    }

    #[test]
    fn toggle_refresh_and_unknown() {
        let (mut session, store) = session();
        session.enter("1");
        session.enter("t");
        assert!(session.rendered().contains("No activity yet."));

        store.seed("Acme");
        assert!(!session.rendered().contains("[Account] Acme"));
        session.enter("r");
        assert!(session.rendered().contains("[Account] Acme"));

        session.enter("toggle");
        assert!(session.rendered().contains("Today's Events"));

        session.enter("zap");
        assert!(session.rendered().contains("Unknown dashboard command"));
    }

    #[test]
    fn plain_exit_goes_home() {
        let (mut session, _) = session();
        session.enter("1");
        session.enter("exit");
        assert_eq!(session.active(), View::MainMenu);
        assert!(!session.should_quit());
    }

    #[test]
    fn times_render_in_the_configured_zone() {
        let (mut session, store) = session();
        schedule(store.as_ref(), "standup", 2);
        session.enter("5");
        session.enter("2");
        session.clear_line();
        session.enter("Asia/Tokyo");
        session.enter("exit.");
        session.enter("1");
        // 11:00 UTC is 20:00 in Tokyo.
        assert!(session.rendered().contains("Mon Mar 03 20:00 — standup"));
    }
}
