//! Store timezone resolution.
//!
//! Maps a store's stored IANA zone name onto the fixed set of zones the
//! fleet operates in. Missing or unrecognized assignments fall back to the
//! default zone; resolution never errors.

use chrono_tz::Tz;

/// IANA name of the fallback zone.
pub const DEFAULT_TIMEZONE_NAME: &str = "America/Chicago";

/// The timezones a store can resolve to.
///
/// An explicit tagged union rather than a free-form zone string: the
/// observation fleet only spans these zones, and anything outside the set
/// is treated the same as a missing assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreTimezone {
    Beirut,
    Boise,
    Denver,
    Phoenix,
    NewYork,
    LosAngeles,
    /// Fallback for absent or unrecognized assignments.
    Chicago,
}

impl StoreTimezone {
    /// Resolve a stored timezone name.
    ///
    /// `None` and unrecognized names both resolve to Chicago.
    pub fn resolve(name: Option<&str>) -> Self {
        match name {
            Some("Asia/Beirut") => StoreTimezone::Beirut,
            Some("America/Boise") => StoreTimezone::Boise,
            Some("America/Denver") => StoreTimezone::Denver,
            Some("America/Phoenix") => StoreTimezone::Phoenix,
            Some("America/New_York") => StoreTimezone::NewYork,
            Some("America/Los_Angeles") => StoreTimezone::LosAngeles,
            Some(other) => {
                log::warn!(
                    "unrecognized timezone {:?}, defaulting to {}",
                    other,
                    DEFAULT_TIMEZONE_NAME
                );
                StoreTimezone::Chicago
            }
            None => StoreTimezone::Chicago,
        }
    }

    /// IANA name of the resolved zone.
    pub fn name(&self) -> &'static str {
        match self {
            StoreTimezone::Beirut => "Asia/Beirut",
            StoreTimezone::Boise => "America/Boise",
            StoreTimezone::Denver => "America/Denver",
            StoreTimezone::Phoenix => "America/Phoenix",
            StoreTimezone::NewYork => "America/New_York",
            StoreTimezone::LosAngeles => "America/Los_Angeles",
            StoreTimezone::Chicago => DEFAULT_TIMEZONE_NAME,
        }
    }

    /// chrono-tz zone used for localization.
    pub fn tz(&self) -> Tz {
        match self {
            StoreTimezone::Beirut => chrono_tz::Asia::Beirut,
            StoreTimezone::Boise => chrono_tz::America::Boise,
            StoreTimezone::Denver => chrono_tz::America::Denver,
            StoreTimezone::Phoenix => chrono_tz::America::Phoenix,
            StoreTimezone::NewYork => chrono_tz::America::New_York,
            StoreTimezone::LosAngeles => chrono_tz::America::Los_Angeles,
            StoreTimezone::Chicago => chrono_tz::America::Chicago,
        }
    }
}
