//! Session and worker configuration, validation, and error types.

use std::error::Error;
use std::fmt;
use std::time::Duration;

use ltank_core::SimError;

// ── SessionConfig ──────────────────────────────────────────────────

/// Rule parameters for one [`GameSession`](crate::GameSession).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionConfig {
    /// Tools and special ammunition cost nothing. Default: false.
    pub cheats: bool,
    /// Blast radius in cells. Default: 2. Range: 1..=8.
    pub blast_radius: u8,
    /// Ticks a stunned turret stays inactive. Default: 3. Minimum: 1.
    pub stun_turns: u8,
    /// Cells a magnet move travels. Default: 3. Must be 3.
    pub magnet_reach: u8,
    /// Cells a boost move travels. Default: 2. Must be 2.
    pub boost_reach: u8,
    /// Record live intents into the replay log. Default: true.
    pub recording: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cheats: false,
            blast_radius: 2,
            stun_turns: 3,
            magnet_reach: 3,
            boost_reach: 2,
            recording: true,
        }
    }
}

impl SessionConfig {
    /// Check every field against its documented range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=8).contains(&self.blast_radius) {
            return Err(ConfigError::InvalidBlastRadius {
                value: self.blast_radius,
            });
        }
        if self.stun_turns == 0 {
            return Err(ConfigError::InvalidStunTurns);
        }
        // The movement entry point classifies deltas by length, so the
        // reaches are fixed.
        if self.boost_reach != 2 {
            return Err(ConfigError::InvalidReach {
                name: "boost_reach",
                value: self.boost_reach,
                expected: 2,
            });
        }
        if self.magnet_reach != 3 {
            return Err(ConfigError::InvalidReach {
                name: "magnet_reach",
                value: self.magnet_reach,
                expected: 3,
            });
        }
        Ok(())
    }
}

// ── WorkerConfig ───────────────────────────────────────────────────

/// Configuration for [`SimulationWorker`](crate::SimulationWorker).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WorkerConfig {
    /// Name given to each run's thread. Default: `"ltank-mlo"`.
    pub thread_name: String,
    /// Pause after each discrete step, for presentation. Default: zero.
    /// Must be under one second.
    pub step_delay: Duration,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            thread_name: "ltank-mlo".to_string(),
            step_delay: Duration::ZERO,
        }
    }
}

impl WorkerConfig {
    /// Longest accepted step delay.
    pub const MAX_STEP_DELAY: Duration = Duration::from_secs(1);

    /// Check every field against its documented range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.thread_name.is_empty() {
            return Err(ConfigError::EmptyThreadName);
        }
        if self.step_delay >= Self::MAX_STEP_DELAY {
            return Err(ConfigError::StepDelayTooLong {
                millis: self.step_delay.as_millis() as u64,
            });
        }
        Ok(())
    }
}

// ── ConfigError ────────────────────────────────────────────────────

/// Errors detected while validating configuration or loading a level.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// `blast_radius` outside `1..=8`.
    InvalidBlastRadius {
        /// The configured value.
        value: u8,
    },
    /// `stun_turns` is zero.
    InvalidStunTurns,
    /// A tool reach other than the one the movement rules accept.
    InvalidReach {
        /// Which field.
        name: &'static str,
        /// The configured value.
        value: u8,
        /// The only accepted value.
        expected: u8,
    },
    /// `thread_name` is empty.
    EmptyThreadName,
    /// `step_delay` is one second or more.
    StepDelayTooLong {
        /// The configured delay.
        millis: u64,
    },
    /// The level could not be loaded into a session.
    Level(SimError),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidBlastRadius { value } => {
                write!(f, "blast_radius {value} is outside 1..=8")
            }
            Self::InvalidStunTurns => write!(f, "stun_turns must be at least 1"),
            Self::InvalidReach {
                name,
                value,
                expected,
            } => write!(f, "{name} must be {expected}, got {value}"),
            Self::EmptyThreadName => write!(f, "thread_name must not be empty"),
            Self::StepDelayTooLong { millis } => {
                write!(f, "step_delay {millis}ms must be under 1000ms")
            }
            Self::Level(e) => write!(f, "level: {e}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Level(e) => Some(e),
            _ => None,
        }
    }
}

impl From<SimError> for ConfigError {
    fn from(e: SimError) -> Self {
        Self::Level(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert_eq!(SessionConfig::default().validate(), Ok(()));
        assert_eq!(WorkerConfig::default().validate(), Ok(()));
    }

    #[test]
    fn blast_radius_bounds() {
        let mut cfg = SessionConfig::default();
        cfg.blast_radius = 0;
        assert_eq!(
            cfg.validate(),
            Err(ConfigError::InvalidBlastRadius { value: 0 })
        );
        cfg.blast_radius = 9;
        assert!(cfg.validate().is_err());
        cfg.blast_radius = 8;
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn reaches_are_fixed() {
        let cfg = SessionConfig {
            magnet_reach: 4,
            ..SessionConfig::default()
        };
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::InvalidReach {
                name: "magnet_reach",
                ..
            })
        ));
    }

    #[test]
    fn step_delay_must_stay_under_a_second() {
        let cfg = WorkerConfig {
            step_delay: Duration::from_secs(1),
            ..WorkerConfig::default()
        };
        assert_eq!(
            cfg.validate(),
            Err(ConfigError::StepDelayTooLong { millis: 1000 })
        );
    }
}
