// ── Door domain types ──

use std::str::FromStr;

use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::error::CoreError;

/// Presentation format for door timestamps, e.g. `Mon 01 Jan 2024 10:00:00`.
const TIMESTAMP_FORMAT: &str = "%a %d %b %Y %H:%M:%S";

/// Door state as reported by the door service.
///
/// Upstream sends a numeric code, which the registry maps through
/// [`DoorState::from_code`]. The variant names are the text form used by
/// the HTTP and CLI output.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
pub enum DoorState {
    Open,
    Closed,
    Stopped,
    Opening,
    Closing,
    Unknown,
}

impl DoorState {
    /// Map an upstream state code. Code 0 is unused upstream and reads as
    /// `Unknown`; anything above 5 is rejected.
    pub fn from_code(code: u8) -> Result<Self, CoreError> {
        match code {
            0 => Ok(Self::Unknown),
            1 => Ok(Self::Open),
            2 => Ok(Self::Closed),
            3 => Ok(Self::Stopped),
            4 => Ok(Self::Opening),
            5 => Ok(Self::Closing),
            other => Err(CoreError::upstream(format!(
                "door state code {other} out of range"
            ))),
        }
    }

    /// Parse the textual code carried in attribute payloads.
    pub fn parse_code(raw: &str) -> Result<Self, CoreError> {
        let code = raw
            .trim()
            .parse::<u8>()
            .map_err(|_| CoreError::upstream(format!("malformed door state code {raw:?}")))?;
        Self::from_code(code)
    }

    /// Open or on its way there.
    pub fn is_opening_or_open(self) -> bool {
        matches!(self, Self::Open | Self::Opening)
    }

    /// Closed or on its way there.
    pub fn is_closing_or_closed(self) -> bool {
        matches!(self, Self::Closed | Self::Closing)
    }
}

/// Direction a client may request. Parsed case-insensitively from
/// `"open"` / `"close"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DesiredState {
    Open,
    Close,
}

impl DesiredState {
    /// Value written to the `desireddoorstate` attribute.
    pub fn code(self) -> u8 {
        match self {
            Self::Close => 0,
            Self::Open => 1,
        }
    }

    /// Whether a door in `state` already satisfies this request, either
    /// settled or in transit.
    pub fn is_satisfied_by(self, state: DoorState) -> bool {
        match self {
            Self::Open => state.is_opening_or_open(),
            Self::Close => state.is_closing_or_closed(),
        }
    }
}

impl FromStr for DesiredState {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("open") {
            Ok(Self::Open)
        } else if s.eq_ignore_ascii_case("close") {
            Ok(Self::Close)
        } else {
            Err(CoreError::InvalidState {
                input: s.to_owned(),
            })
        }
    }
}

/// A single garage door as cached by the registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Door {
    /// Upstream device id; the identity key.
    pub id: String,
    pub name: String,
    pub state: DoorState,
    /// Upstream-reported time of the last state transition.
    pub changed_at: DateTime<Utc>,
    /// Local time this state was fetched.
    pub observed_at: DateTime<Utc>,
}

impl Door {
    pub fn format_changed(&self) -> String {
        format_timestamp(self.changed_at)
    }

    pub fn format_updated(&self) -> String {
        format_timestamp(self.observed_at)
    }
}

fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.with_timezone(&Local).format(TIMESTAMP_FORMAT).to_string()
}

/// Parse an upstream `UpdatedTime` (epoch milliseconds, possibly fractional).
pub fn parse_epoch_millis(raw: &str) -> Result<DateTime<Utc>, CoreError> {
    let raw = raw.trim();
    let millis = raw
        .parse::<i64>()
        .ok()
        .or_else(|| {
            raw.parse::<f64>()
                .ok()
                .filter(|f| f.is_finite())
                .map(|f| f.trunc() as i64)
        })
        .ok_or_else(|| CoreError::upstream(format!("malformed timestamp {raw:?}")))?;

    DateTime::from_timestamp_millis(millis)
        .ok_or_else(|| CoreError::upstream(format!("timestamp {millis} out of range")))
}
