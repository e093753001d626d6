/// Lifecycle of one browsing session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunState {
    #[default]
    NotStarted,
    Running,
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// Browse every known type.
    All,
    Selected(String),
    /// The requested type is not known; the previous filter stays.
    Rejected(String),
}

/// State shared by the commands of one session.
#[derive(Debug, Clone, Default)]
pub struct Session {
    current_type: String,
    store_location: String,
    known_types: Vec<String>,
    verbose: bool,
    state: RunState,
}

impl Session {
    pub fn new(store_location: impl Into<String>) -> Self {
        Self {
            store_location: store_location.into(),
            ..Self::default()
        }
    }

    /// Empty when every known type is browsed.
    pub fn current_type(&self) -> &str {
        &self.current_type
    }

    pub fn store_location(&self) -> &str {
        &self.store_location
    }

    pub fn known_types(&self) -> &[String] {
        &self.known_types
    }

    pub fn replace_types(&mut self, types: Vec<String>) {
        self.known_types = types;
    }

    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    pub fn set_verbose(&mut self, verbose: bool) {
        self.verbose = verbose;
    }

    pub fn select(&mut self, requested: &str) -> Selection {
        if requested.is_empty() {
            self.current_type.clear();
            return Selection::All;
        }

        if !self.known_types.iter().any(|t| t == requested) {
            return Selection::Rejected(format!("{} is not a valid transaction type", requested));
        }

        self.current_type = requested.to_string();
        Selection::Selected(self.current_type.clone())
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == RunState::Running
    }

    /// Returns false when the session was already started or cancelled.
    pub fn start(&mut self) -> bool {
        if self.state != RunState::NotStarted {
            return false;
        }
        self.state = RunState::Running;
        true
    }

    /// Returns true only on the first cancellation. Quitting before the
    /// session started is allowed and also ends it; the session can then
    /// never start.
    pub fn cancel(&mut self) -> bool {
        if self.state == RunState::Cancelled {
            return false;
        }
        self.state = RunState::Cancelled;
        true
    }
}
