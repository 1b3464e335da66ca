use serde::Serialize;

use readme_sync::SyncReport;

use crate::error::ExitStatus;

pub mod check;
pub mod sync;

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CommandResult {
    Synced { report: SyncReport },
    Checked { report: SyncReport },
}

impl CommandResult {
    pub fn exit_status(&self) -> ExitStatus {
        match self {
            CommandResult::Synced { .. } => ExitStatus::Success,
            CommandResult::Checked { report } => {
                if report.up_to_date() {
                    ExitStatus::Success
                } else {
                    ExitStatus::InvalidInput
                }
            }
        }
    }
}
