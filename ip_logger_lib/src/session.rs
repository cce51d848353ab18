use crate::{
    credentials::{self, CredentialVerifier},
    error::{AuthError, ReadError},
    log_record::LogRecord,
    telemetry::sort_by_recency,
};

/// The mutually exclusive screens of the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Landing,
    Login,
    AdminDashboard,
}

/// Dashboard data. `Failed` renders as an empty table, but stays distinguishable from `Loaded(vec![])`.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum LogsState {
    #[default]
    Idle,
    Loading,
    Loaded(Vec<LogRecord>),
    Failed,
}

impl LogsState {
    pub fn records(&self) -> &[LogRecord] {
        match self {
            LogsState::Loaded(records) => records,
            _ => &[],
        }
    }
}

/// Per page load state. Only `apply` mutates it.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SessionState {
    pub view: View,
    pub email: String,
    pub password: String,
    pub login_error: Option<AuthError>,
    pub has_logged_initial_visit: bool,
    pub last_known_ip: Option<String>,
    pub logs: LogsState,
    /// Bumped on every fetch, so only the answer to the latest one is shown.
    pub fetch_generation: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Mounted,
    /// The page-load lookup finished. `ip` is set when IP resolution itself succeeded.
    InitialVisitRecorded { ip: Option<String> },
    SignInClicked,
    EmailChanged(String),
    PasswordChanged(String),
    LoginSubmitted,
    LogsLoaded { generation: u64, result: Result<Vec<LogRecord>, ReadError> },
    SignOutClicked,
}

/// Side effects requested by a transition. Commands of one event run in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    RecordInitialVisit,
    RecordLoginAttempt { ip: String, email: String },
    FetchLogs { generation: u64 },
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply<V: CredentialVerifier + ?Sized>(&mut self, event: Event, verifier: &V) -> Vec<Command> {
        match event {
            Event::Mounted => {
                if self.has_logged_initial_visit {
                    return Vec::new();
                }
                // Set before the lookup starts, so a re-render while it is in flight does nothing
                self.has_logged_initial_visit = true;
                vec![Command::RecordInitialVisit]
            }
            Event::InitialVisitRecorded { ip } => {
                if ip.is_some() {
                    self.last_known_ip = ip;
                }
                Vec::new()
            }
            Event::SignInClicked => {
                if self.view == View::Landing {
                    self.view = View::Login;
                    self.login_error = None;
                }
                Vec::new()
            }
            Event::EmailChanged(email) => {
                self.email = email;
                Vec::new()
            }
            Event::PasswordChanged(password) => {
                self.password = password;
                Vec::new()
            }
            Event::LoginSubmitted => {
                if self.view != View::Login {
                    return Vec::new();
                }
                self.submit_login(verifier)
            }
            Event::LogsLoaded { generation, result } => {
                // Late answer for a dashboard that was already left, or for an earlier visit
                if generation != self.fetch_generation
                    || self.view != View::AdminDashboard
                    || self.logs != LogsState::Loading
                {
                    return Vec::new();
                }
                self.logs = match result {
                    Ok(mut records) => {
                        sort_by_recency(&mut records);
                        LogsState::Loaded(records)
                    }
                    Err(_) => LogsState::Failed,
                };
                Vec::new()
            }
            Event::SignOutClicked => {
                if self.view == View::AdminDashboard {
                    self.view = View::Landing;
                    self.logs = LogsState::Idle;
                }
                Vec::new()
            }
        }
    }

    fn submit_login<V: CredentialVerifier + ?Sized>(&mut self, verifier: &V) -> Vec<Command> {
        let mut commands = Vec::new();

        // Without a resolved IP there is nothing to log
        if let Some(ip) = &self.last_known_ip {
            commands.push(Command::RecordLoginAttempt {
                ip: ip.clone(),
                email: self.email.clone(),
            });
        }

        match credentials::check(verifier, &self.email, &self.password) {
            Ok(()) => {
                self.view = View::AdminDashboard;
                self.login_error = None;
                self.email.clear();
                self.password.clear();
                self.logs = LogsState::Loading;
                self.fetch_generation += 1;
                commands.push(Command::FetchLogs { generation: self.fetch_generation });
            }
            Err(err) => {
                self.login_error = Some(err);
                self.password.clear();
            }
        }

        commands
    }
}
