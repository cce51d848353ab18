use std::collections::VecDeque;

use crate::{
    credentials::{CredentialVerifier, StaticCredentials},
    error::ReadError,
    geo_lookup::{locate_ip, GeoLookup},
    log_record::{LogRecord, NewLogRecord},
    session::{Command, Event, SessionState},
    telemetry::{fetch_all_logs, record_best_effort, LogStore},
};

/// Executes the commands produced by `SessionState::apply`.
pub struct Services<G, S> {
    pub lookup: G,
    pub store: S,
    pub user_agent: String,
}

impl<G: GeoLookup, S: LogStore> Services<G, S> {
    pub fn new(lookup: G, store: S, user_agent: impl Into<String>) -> Self {
        Self {
            lookup,
            store,
            user_agent: user_agent.into(),
        }
    }

    /// Run one command, returning the event that carries its result back to the reducer.
    pub async fn run(&self, command: Command) -> Option<Event> {
        match command {
            Command::RecordInitialVisit => Some(Event::InitialVisitRecorded {
                ip: self.record_initial_visit().await,
            }),
            Command::RecordLoginAttempt { ip, email } => {
                self.record_login_attempt(&ip, email).await;
                None
            }
            Command::FetchLogs { generation } => Some(Event::LogsLoaded {
                generation,
                result: self.fetch_logs().await,
            }),
        }
    }

    async fn record_initial_visit(&self) -> Option<String> {
        let ip = match self.lookup.resolve_ip().await {
            Ok(ip) => ip,
            Err(err) => {
                tracing::warn!("Failed to resolve IP: {err}");
                return None;
            }
        };

        match locate_ip(&self.lookup, &ip).await {
            Ok(location) => {
                record_best_effort(&self.store, NewLogRecord::new(location, None, &self.user_agent)).await;
            }
            Err(err) => tracing::warn!("Failed to locate {ip}: {err}"),
        }

        Some(ip)
    }

    async fn record_login_attempt(&self, ip: &str, email: String) {
        match locate_ip(&self.lookup, ip).await {
            Ok(location) => {
                record_best_effort(&self.store, NewLogRecord::new(location, Some(email), &self.user_agent)).await;
            }
            Err(err) => tracing::warn!("Failed to log login attempt from {ip}: {err}"),
        }
    }

    async fn fetch_logs(&self) -> Result<Vec<LogRecord>, ReadError> {
        let result = fetch_all_logs(&self.store).await;
        if let Err(err) = &result {
            tracing::warn!("Failed to fetch IP logs: {err}");
        }
        result
    }
}

/// State, services and credential check in one place. Runs the whole session in process,
/// awaiting each command in line; the browser client instead spawns one task per event.
pub struct SessionController<G, S, V = StaticCredentials> {
    state: SessionState,
    services: Services<G, S>,
    verifier: V,
}

impl<G: GeoLookup, S: LogStore, V: CredentialVerifier> SessionController<G, S, V> {
    pub fn new(services: Services<G, S>, verifier: V) -> Self {
        Self {
            state: SessionState::new(),
            services,
            verifier,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn services(&self) -> &Services<G, S> {
        &self.services
    }

    /// Apply `event` and every event its commands produce, running commands one at a time.
    pub async fn dispatch(&mut self, event: Event) {
        let mut pending = VecDeque::from([event]);

        while let Some(event) = pending.pop_front() {
            for command in self.state.apply(event, &self.verifier) {
                if let Some(result) = self.services.run(command).await {
                    pending.push_back(result);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};

    use chrono::{Duration, TimeZone, Utc};

    use super::*;
    use crate::{
        error::{LookupError, StoreError, WriteError},
        geo_lookup::GeoResponse,
        session::{LogsState, View},
    };

    struct FakeLookup {
        ip: Option<String>,
        geo_error: Cell<bool>,
        locate_calls: Cell<usize>,
    }

    impl FakeLookup {
        fn online() -> Self {
            Self { ip: Some("203.0.113.5".to_string()), geo_error: Cell::new(false), locate_calls: Cell::new(0) }
        }

        fn offline() -> Self {
            Self { ip: None, geo_error: Cell::new(false), locate_calls: Cell::new(0) }
        }
    }

    impl GeoLookup for FakeLookup {
        async fn resolve_ip(&self) -> Result<String, LookupError> {
            self.ip.clone().ok_or_else(|| LookupError::NetworkFailure("offline".to_string()))
        }

        async fn locate(&self, _ip: &str) -> Result<GeoResponse, LookupError> {
            self.locate_calls.set(self.locate_calls.get() + 1);
            Ok(GeoResponse {
                city: Some("Aarhus".to_string()),
                country_name: Some("Denmark".to_string()),
                error: self.geo_error.get(),
                reason: None,
            })
        }
    }

    #[derive(Default)]
    struct MemoryStore {
        logs: RefCell<Vec<LogRecord>>,
        inserts: Cell<usize>,
        fetches: Cell<usize>,
        broken: bool,
    }

    impl LogStore for MemoryStore {
        async fn insert_log(&self, record: NewLogRecord) -> Result<(), WriteError> {
            self.inserts.set(self.inserts.get() + 1);
            if self.broken {
                return Err(StoreError::ServiceError("insert rejected".to_string()));
            }
            let mut logs = self.logs.borrow_mut();
            let id = logs.len() as i64 + 1;
            let created_at = Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap() + Duration::minutes(id);
            logs.push(LogRecord::from_new(id, record, created_at));
            Ok(())
        }

        async fn fetch_all_logs(&self) -> Result<Vec<LogRecord>, ReadError> {
            self.fetches.set(self.fetches.get() + 1);
            if self.broken {
                return Err(StoreError::NetworkFailure("unreachable".to_string()));
            }
            Ok(self.logs.borrow().clone())
        }
    }

    fn controller(lookup: FakeLookup, store: MemoryStore) -> SessionController<FakeLookup, MemoryStore> {
        SessionController::new(Services::new(lookup, store, "test-agent/1.0"), StaticCredentials::default())
    }

    async fn log_in(controller: &mut SessionController<FakeLookup, MemoryStore>, email: &str, password: &str) {
        controller.dispatch(Event::SignInClicked).await;
        controller.dispatch(Event::EmailChanged(email.to_string())).await;
        controller.dispatch(Event::PasswordChanged(password.to_string())).await;
        controller.dispatch(Event::LoginSubmitted).await;
    }

    #[tokio::test]
    async fn page_load_logs_exactly_once() {
        let mut controller = controller(FakeLookup::online(), MemoryStore::default());

        controller.dispatch(Event::Mounted).await;
        controller.dispatch(Event::Mounted).await;
        controller.dispatch(Event::Mounted).await;

        let store = &controller.services().store;
        assert_eq!(store.inserts.get(), 1);
        let logs = store.logs.borrow();
        assert_eq!(logs[0].email, None);
        assert_eq!(logs[0].city.as_deref(), Some("Aarhus"));
        assert_eq!(logs[0].user_agent, "test-agent/1.0");
        assert_eq!(controller.state().last_known_ip.as_deref(), Some("203.0.113.5"));
    }

    #[tokio::test]
    async fn lookup_failure_still_shows_landing() {
        let mut controller = controller(FakeLookup::offline(), MemoryStore::default());
        controller.dispatch(Event::Mounted).await;

        assert_eq!(controller.state().view, View::Landing);
        assert!(controller.state().has_logged_initial_visit);
        assert_eq!(controller.services().store.inserts.get(), 0);
    }

    #[tokio::test]
    async fn geo_error_keeps_ip_for_login() {
        let lookup = FakeLookup { geo_error: Cell::new(true), ..FakeLookup::online() };
        let mut controller = controller(lookup, MemoryStore::default());
        controller.dispatch(Event::Mounted).await;

        assert_eq!(controller.services().store.inserts.get(), 0);
        assert_eq!(controller.state().last_known_ip.as_deref(), Some("203.0.113.5"));
    }

    #[tokio::test]
    async fn geo_error_at_login_skips_the_write() {
        let mut controller = controller(FakeLookup::online(), MemoryStore::default());
        controller.dispatch(Event::Mounted).await;
        assert_eq!(controller.services().store.inserts.get(), 1);

        controller.services().lookup.geo_error.set(true);
        log_in(&mut controller, "admin", "admin").await;

        assert_eq!(controller.services().lookup.locate_calls.get(), 2);
        assert_eq!(controller.services().store.inserts.get(), 1);
        assert_eq!(controller.state().view, View::AdminDashboard);
        assert_eq!(controller.state().logs.records().len(), 1);
    }

    #[tokio::test]
    async fn admin_login_fetches_logs_newest_first() {
        let mut controller = controller(FakeLookup::online(), MemoryStore::default());
        controller.dispatch(Event::Mounted).await;
        log_in(&mut controller, "admin", "admin").await;

        assert_eq!(controller.state().view, View::AdminDashboard);
        let records = controller.state().logs.records();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].email.as_deref(), Some("admin"));
        assert_eq!(records[1].email, None);
        assert!(records[0].created_at > records[1].created_at);
    }

    #[tokio::test]
    async fn bad_login_is_logged_but_rejected() {
        let mut controller = controller(FakeLookup::online(), MemoryStore::default());
        controller.dispatch(Event::Mounted).await;
        log_in(&mut controller, "visitor@example.com", "guess").await;

        assert_eq!(controller.state().view, View::Login);
        assert_eq!(controller.state().login_error.map(|err| err.to_string()).as_deref(), Some("Invalid credentials"));
        let store = &controller.services().store;
        assert_eq!(store.inserts.get(), 2);
        assert_eq!(store.fetches.get(), 0);
        assert_eq!(store.logs.borrow()[1].email.as_deref(), Some("visitor@example.com"));
    }

    #[tokio::test]
    async fn login_without_ip_writes_nothing() {
        let mut controller = controller(FakeLookup::offline(), MemoryStore::default());
        controller.dispatch(Event::Mounted).await;
        log_in(&mut controller, "admin", "admin").await;

        assert_eq!(controller.services().store.inserts.get(), 0);
        assert_eq!(controller.services().lookup.locate_calls.get(), 0);
        assert_eq!(controller.state().view, View::AdminDashboard);
    }

    #[tokio::test]
    async fn broken_store_never_blocks_the_user() {
        let store = MemoryStore { broken: true, ..Default::default() };
        let mut controller = controller(FakeLookup::online(), store);
        controller.dispatch(Event::Mounted).await;
        log_in(&mut controller, "admin", "admin").await;

        assert_eq!(controller.state().view, View::AdminDashboard);
        assert_eq!(controller.state().logs, LogsState::Failed);
        assert_eq!(controller.services().store.inserts.get(), 2);
    }

    #[tokio::test]
    async fn sign_out_discards_and_reentry_refetches() {
        let mut controller = controller(FakeLookup::online(), MemoryStore::default());
        controller.dispatch(Event::Mounted).await;
        log_in(&mut controller, "admin", "admin").await;

        controller.dispatch(Event::SignOutClicked).await;
        assert_eq!(controller.state().view, View::Landing);
        assert_eq!(controller.state().logs, LogsState::Idle);

        log_in(&mut controller, "admin", "admin").await;
        assert_eq!(controller.services().store.fetches.get(), 2);
        assert_eq!(controller.state().logs.records().len(), 3);
    }
}
