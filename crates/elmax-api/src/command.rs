use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::constants::{COMMAND_ARM, COMMAND_DISARM, COMMAND_OFF, COMMAND_ON};

/// An action sent to a single endpoint.
///
/// `On`/`Off` drive outputs, `Arm`/`Disarm` drive areas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    On,
    Off,
    Arm,
    Disarm,
}

impl Command {
    /// The path segment the API expects.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::On => COMMAND_ON,
            Self::Off => COMMAND_OFF,
            Self::Arm => COMMAND_ARM,
            Self::Disarm => COMMAND_DISARM,
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown command '{0}' (expected on, off, arm/ins or disarm/dis)")]
pub struct UnknownCommand(pub String);

impl FromStr for Command {
    type Err = UnknownCommand;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "on" => Ok(Self::On),
            "off" => Ok(Self::Off),
            "arm" | "ins" => Ok(Self::Arm),
            "disarm" | "dis" => Ok(Self::Disarm),
            _ => Err(UnknownCommand(s.to_owned())),
        }
    }
}
