//! External control requests
//!
//! Requests arrive from the wireless callback context and are handed to the
//! loop through a single-slot [`Mailbox`]. The loop drains at most one per
//! iteration.

use core::fmt;

use crate::config::{ConfigError, ConfigPatch};
use crate::controller::Side;
use crate::mailbox::{Mailbox, MailboxReceiver, MailboxSender};
use crate::motion::CalibrationError;
use crate::sync::SyncState;

/// A state change requested by the control link or the sync mesh
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ControlRequest {
    /// Apply a partial configuration update
    Configure(ConfigPatch),
    /// Select a preset by id
    SetPreset(u8),
    StartCalibration,
    /// Capture the current calibration pose
    NextCalibrationStep,
    ResetCalibration,
    /// `None` turns the manual blinker off
    ManualBlinker(Option<Side>),
    ManualBrake(bool),
    /// Replay the configured startup sequence
    TestStartup,
    /// State received from the sync leader
    ApplySync(SyncState),
}

/// Why a drained request had no effect
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestError {
    Config(ConfigError),
    Calibration(CalibrationError),
    /// The addressed controller is disabled
    ControllerDisabled,
    /// Sync is off, this vehicle leads, or a motion override is active
    SyncIgnored,
}

impl fmt::Display for RequestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(error) => write!(f, "configuration rejected: {error}"),
            Self::Calibration(error) => write!(f, "calibration failed: {error}"),
            Self::ControllerDisabled => f.write_str("controller is disabled"),
            Self::SyncIgnored => f.write_str("sync update ignored"),
        }
    }
}

impl From<ConfigError> for RequestError {
    fn from(error: ConfigError) -> Self {
        Self::Config(error)
    }
}

impl From<CalibrationError> for RequestError {
    fn from(error: CalibrationError) -> Self {
        Self::Calibration(error)
    }
}

/// Type alias for the request mailbox
pub type RequestMailbox = Mailbox<ControlRequest>;

/// Type alias for the request sender
pub type RequestSender<'a> = MailboxSender<'a, ControlRequest>;

/// Type alias for the request receiver
pub type RequestReceiver<'a> = MailboxReceiver<'a, ControlRequest>;
