//! Backend commands queued from UI to backend worker.

pub enum BackendCommand {
    LoadRoster,
    Enroll { activity: String, email: String },
    Unregister { activity: String, email: String },
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            BackendCommand::LoadRoster => "load_roster",
            BackendCommand::Enroll { .. } => "enroll",
            BackendCommand::Unregister { .. } => "unregister",
        }
    }
}
