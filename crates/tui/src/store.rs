//! Synchronous storage seam used by the session.
//!
//! Input events are processed one at a time, so every call blocks until the
//! engine answers.

use std::{fs::File, path::Path};

use chrono_tz::Tz;
use engine::{
    Account, Activity, Engine, EngineError, Event, ImportReport, NewAccount, NewEvent, NewNote,
    Note,
};
use tokio::runtime::Runtime;

pub type StoreResult<T> = Result<T, EngineError>;

pub trait Store {
    fn list_accounts(&self) -> StoreResult<Vec<Account>>;
    fn search_accounts(&self, term: &str) -> StoreResult<Vec<Account>>;
    fn account_by_name(&self, name: &str) -> StoreResult<Account>;
    fn account_by_id(&self, id: i64) -> StoreResult<Account>;
    fn create_account(&self, account: NewAccount) -> StoreResult<Account>;
    fn update_account(&self, account: &Account) -> StoreResult<Account>;
    fn create_note(&self, note: NewNote) -> StoreResult<Note>;
    fn create_event(&self, event: NewEvent) -> StoreResult<Event>;
    fn list_events(&self) -> StoreResult<Vec<Event>>;
    fn list_activity(&self, limit: u64) -> StoreResult<Vec<Activity>>;
    fn list_account_activity(&self, account_id: i64, limit: u64) -> StoreResult<Vec<Activity>>;
    fn import_accounts_csv(
        &self,
        path: &Path,
        default_creator: &str,
        zone: Tz,
    ) -> StoreResult<ImportReport>;
}

/// [`Store`] backed by the sea-orm engine on a current-thread runtime.
pub struct EngineStore {
    engine: Engine,
    runtime: Runtime,
}

impl EngineStore {
    pub fn new(engine: Engine, runtime: Runtime) -> Self {
        Self { engine, runtime }
    }
}

impl Store for EngineStore {
    fn list_accounts(&self) -> StoreResult<Vec<Account>> {
        self.runtime.block_on(self.engine.list_accounts())
    }

    fn search_accounts(&self, term: &str) -> StoreResult<Vec<Account>> {
        self.runtime.block_on(self.engine.search_accounts(term))
    }

    fn account_by_name(&self, name: &str) -> StoreResult<Account> {
        self.runtime.block_on(self.engine.account_by_name(name))
    }

    fn account_by_id(&self, id: i64) -> StoreResult<Account> {
        self.runtime.block_on(self.engine.account_by_id(id))
    }

    fn create_account(&self, account: NewAccount) -> StoreResult<Account> {
        self.runtime.block_on(self.engine.create_account(account))
    }

    fn update_account(&self, account: &Account) -> StoreResult<Account> {
        self.runtime.block_on(self.engine.update_account(account))
    }

    fn create_note(&self, note: NewNote) -> StoreResult<Note> {
        self.runtime.block_on(self.engine.create_note(note))
    }

    fn create_event(&self, event: NewEvent) -> StoreResult<Event> {
        self.runtime.block_on(self.engine.create_event(event))
    }

    fn list_events(&self) -> StoreResult<Vec<Event>> {
        self.runtime.block_on(self.engine.list_events())
    }

    fn list_activity(&self, limit: u64) -> StoreResult<Vec<Activity>> {
        self.runtime.block_on(self.engine.list_activity(limit))
    }

    fn list_account_activity(&self, account_id: i64, limit: u64) -> StoreResult<Vec<Activity>> {
        self.runtime
            .block_on(self.engine.list_account_activity(account_id, limit))
    }

    fn import_accounts_csv(
        &self,
        path: &Path,
        default_creator: &str,
        zone: Tz,
    ) -> StoreResult<ImportReport> {
        let file = File::open(path)
            .map_err(|err| EngineError::InvalidInput(format!("{}: {err}", path.display())))?;
        self.runtime.block_on(
            self.engine
                .import_accounts_csv(file, default_creator, zone),
        )
    }
}

#[cfg(test)]
pub(crate) mod memory {
    //! In-memory [`Store`] for session tests.

    use std::{cell::RefCell, rc::Rc};

    use chrono::{DateTime, Utc};

    use super::*;

    #[derive(Default)]
    struct Tables {
        accounts: Vec<Account>,
        notes: Vec<Note>,
        events: Vec<Event>,
        next_id: i64,
    }

    impl Tables {
        fn next_id(&mut self) -> i64 {
            self.next_id += 1;
            self.next_id
        }

        fn name_taken(&self, name: &str, exclude: Option<i64>) -> bool {
            self.accounts
                .iter()
                .any(|a| a.name.eq_ignore_ascii_case(name) && Some(a.id) != exclude)
        }

        fn account_name(&self, id: Option<i64>) -> Option<String> {
            id.and_then(|id| self.accounts.iter().find(|a| a.id == id))
                .map(|a| a.name.clone())
        }
    }

    pub struct MemoryStore {
        tables: RefCell<Tables>,
        clock: fn() -> DateTime<Utc>,
    }

    impl MemoryStore {
        pub fn new(clock: fn() -> DateTime<Utc>) -> Self {
            Self {
                tables: RefCell::new(Tables::default()),
                clock,
            }
        }

        pub fn notes(&self) -> Vec<Note> {
            self.tables.borrow().notes.clone()
        }

        pub fn events(&self) -> Vec<Event> {
            self.tables.borrow().events.clone()
        }

        pub fn seed(&self, name: &str) -> Account {
            self.create_account(NewAccount::named(name, "seed"))
                .unwrap()
        }
    }

    fn summarize(entries: Vec<Activity>, limit: u64) -> Vec<Activity> {
        let mut entries = entries;
        entries.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        entries.truncate(if limit == 0 {
            engine::DEFAULT_ACTIVITY_LIMIT as usize
        } else {
            limit as usize
        });
        entries
    }

    impl Store for MemoryStore {
        fn list_accounts(&self) -> StoreResult<Vec<Account>> {
            let mut accounts = self.tables.borrow().accounts.clone();
            accounts.sort_by_key(|a| (a.name.to_lowercase(), a.id));
            Ok(accounts)
        }

        fn search_accounts(&self, term: &str) -> StoreResult<Vec<Account>> {
            let term = term.trim().to_lowercase();
            Ok(self
                .list_accounts()?
                .into_iter()
                .filter(|a| a.name.to_lowercase().contains(&term))
                .collect())
        }

        fn account_by_name(&self, name: &str) -> StoreResult<Account> {
            let name = name.trim();
            self.tables
                .borrow()
                .accounts
                .iter()
                .find(|a| a.name.eq_ignore_ascii_case(name))
                .cloned()
                .ok_or_else(|| EngineError::KeyNotFound(name.to_string()))
        }

        fn account_by_id(&self, id: i64) -> StoreResult<Account> {
            self.tables
                .borrow()
                .accounts
                .iter()
                .find(|a| a.id == id)
                .cloned()
                .ok_or_else(|| EngineError::KeyNotFound(format!("account #{id}")))
        }

        fn create_account(&self, account: NewAccount) -> StoreResult<Account> {
            let name = account.name.trim().to_string();
            if name.is_empty() {
                return Err(EngineError::InvalidInput("account name required".into()));
            }
            let mut tables = self.tables.borrow_mut();
            if tables.name_taken(&name, None) {
                return Err(EngineError::AccountExists(name));
            }
            let stored = Account {
                id: tables.next_id(),
                name,
                phone: account.phone.trim().to_string(),
                address: account.address.trim().to_string(),
                email: account.email.trim().to_string(),
                decision_maker: account.decision_maker.trim().to_string(),
                creator: account.creator,
                created_at: account.created_at.unwrap_or_else(self.clock),
            };
            tables.accounts.push(stored.clone());
            Ok(stored)
        }

        fn update_account(&self, account: &Account) -> StoreResult<Account> {
            let name = account.name.trim().to_string();
            let mut tables = self.tables.borrow_mut();
            if tables.name_taken(&name, Some(account.id)) {
                return Err(EngineError::AccountExists(name));
            }
            let slot = tables
                .accounts
                .iter_mut()
                .find(|a| a.id == account.id)
                .ok_or_else(|| EngineError::KeyNotFound(format!("account #{}", account.id)))?;
            let (creator, created_at) = (slot.creator.clone(), slot.created_at);
            *slot = Account {
                name,
                creator,
                created_at,
                ..account.clone()
            };
            Ok(slot.clone())
        }

        fn create_note(&self, note: NewNote) -> StoreResult<Note> {
            let mut tables = self.tables.borrow_mut();
            let stored = Note {
                id: tables.next_id(),
                content: note.content.trim().to_string(),
                account_id: note.account_id,
                account_name: tables.account_name(note.account_id),
                creator: note.creator,
                created_at: note.created_at.unwrap_or_else(self.clock),
            };
            tables.notes.push(stored.clone());
            Ok(stored)
        }

        fn create_event(&self, event: NewEvent) -> StoreResult<Event> {
            let mut tables = self.tables.borrow_mut();
            let stored = Event {
                id: tables.next_id(),
                title: event.title.trim().to_string(),
                details: event.details.trim().to_string(),
                event_time: event.event_time,
                account_id: event.account_id,
                account_name: tables.account_name(event.account_id),
                creator: event.creator,
                created_at: event.created_at.unwrap_or_else(self.clock),
            };
            tables.events.push(stored.clone());
            Ok(stored)
        }

        fn list_events(&self) -> StoreResult<Vec<Event>> {
            let mut events = self.events();
            events.sort_by_key(|e| (e.event_time, e.id));
            Ok(events)
        }

        fn list_activity(&self, limit: u64) -> StoreResult<Vec<Activity>> {
            self.list_account_activity_filtered(None, limit)
        }

        fn list_account_activity(
            &self,
            account_id: i64,
            limit: u64,
        ) -> StoreResult<Vec<Activity>> {
            self.list_account_activity_filtered(Some(account_id), limit)
        }

        fn import_accounts_csv(
            &self,
            path: &Path,
            _default_creator: &str,
            _zone: Tz,
        ) -> StoreResult<ImportReport> {
            Err(EngineError::InvalidInput(format!(
                "{}: import unsupported in memory",
                path.display()
            )))
        }
    }

    impl MemoryStore {
        fn list_account_activity_filtered(
            &self,
            account_id: Option<i64>,
            limit: u64,
        ) -> StoreResult<Vec<Activity>> {
            use engine::ActivityKind;

            let tables = self.tables.borrow();
            let scoped = |id: Option<i64>| account_id.is_none() || id == account_id;
            let mut entries = Vec::new();
            for a in tables.accounts.iter().filter(|a| scoped(Some(a.id))) {
                entries.push(Activity {
                    kind: ActivityKind::Account,
                    id: a.id,
                    title: a.name.clone(),
                    detail: a.phone.clone(),
                    created_at: a.created_at,
                });
            }
            for n in tables.notes.iter().filter(|n| scoped(n.account_id)) {
                entries.push(Activity {
                    kind: ActivityKind::Note,
                    id: n.id,
                    title: n.content.chars().take(80).collect(),
                    detail: String::new(),
                    created_at: n.created_at,
                });
            }
            for e in tables.events.iter().filter(|e| scoped(e.account_id)) {
                entries.push(Activity {
                    kind: ActivityKind::Event,
                    id: e.id,
                    title: e.title.clone(),
                    detail: e.details.chars().take(80).collect(),
                    created_at: e.created_at,
                });
            }
            Ok(summarize(entries, limit))
        }
    }

    /// Shared handle so tests can inspect the tables after boxing the store.
    impl Store for Rc<MemoryStore> {
        fn list_accounts(&self) -> StoreResult<Vec<Account>> {
            (**self).list_accounts()
        }

        fn search_accounts(&self, term: &str) -> StoreResult<Vec<Account>> {
            (**self).search_accounts(term)
        }

        fn account_by_name(&self, name: &str) -> StoreResult<Account> {
            (**self).account_by_name(name)
        }

        fn account_by_id(&self, id: i64) -> StoreResult<Account> {
            (**self).account_by_id(id)
        }

        fn create_account(&self, account: NewAccount) -> StoreResult<Account> {
            (**self).create_account(account)
        }

        fn update_account(&self, account: &Account) -> StoreResult<Account> {
            (**self).update_account(account)
        }

        fn create_note(&self, note: NewNote) -> StoreResult<Note> {
            (**self).create_note(note)
        }

        fn create_event(&self, event: NewEvent) -> StoreResult<Event> {
            (**self).create_event(event)
        }

        fn list_events(&self) -> StoreResult<Vec<Event>> {
            (**self).list_events()
        }

        fn list_activity(&self, limit: u64) -> StoreResult<Vec<Activity>> {
            (**self).list_activity(limit)
        }

        fn list_account_activity(
            &self,
            account_id: i64,
            limit: u64,
        ) -> StoreResult<Vec<Activity>> {
            (**self).list_account_activity(account_id, limit)
        }

        fn import_accounts_csv(
            &self,
            path: &Path,
            default_creator: &str,
            zone: Tz,
        ) -> StoreResult<ImportReport> {
            (**self).import_accounts_csv(path, default_creator, zone)
        }
    }
}
