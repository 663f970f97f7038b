use thiserror::Error;

use crate::checkin::InputError;
use crate::config::ConfigError;
use crate::external::ExternalError;
use crate::history::StoreError;
use crate::report::ReportError;

/// Every error a command can end with. The wrapped error carries the
/// detail and is reported as this error's source.
#[derive(Debug, Error)]
pub enum CoachLiteError {
    #[error("Config error")]
    Config(#[from] ConfigError),

    #[error("Invalid input")]
    Input(#[from] InputError),

    #[error("Check-in log error")]
    Store(#[from] StoreError),

    #[error("Report error")]
    Report(#[from] ReportError),

    #[error("External command error")]
    External(#[from] ExternalError),
}

pub type Result<T> = std::result::Result<T, CoachLiteError>;
