use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::info::DeviceMetadata;

use super::driver::{DS4_WIRED_VERSION, WIRELESS_HEADER_SIZE};

/// Transport the controller is attached over
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectionMode {
    #[default]
    Wired,
    Wireless,
}

impl ConnectionMode {
    /// Classify the connection from the version string the device reported
    /// when attached. Anything other than the wired version is wireless.
    /// Missing or unparseable versions fall back to [ConnectionMode::Wired].
    pub fn detect(version: Option<&str>, wired_version: u16) -> Self {
        let Some(version) = version else {
            log::warn!("Device did not report a version. Assuming wired connection.");
            return Self::Wired;
        };
        let Some(value) = parse_version(version) else {
            log::warn!("Unable to parse device version '{version}'. Assuming wired connection.");
            return Self::Wired;
        };

        log::debug!("Checking device version: {value} against {wired_version}");
        if value == u32::from(wired_version) {
            Self::Wired
        } else {
            Self::Wireless
        }
    }
}

impl Display for ConnectionMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let value = match self {
            ConnectionMode::Wired => "wired",
            ConnectionMode::Wireless => "wireless",
        };
        write!(f, "{}", value)
    }
}

/// Parse a decimal or "0x" prefixed hexadecimal version number
fn parse_version(version: &str) -> Option<u32> {
    let version = version.trim();
    if let Some(hex) = version
        .strip_prefix("0x")
        .or_else(|| version.strip_prefix("0X"))
    {
        return u32::from_str_radix(hex, 16).ok();
    }
    version.parse().ok()
}

/// Describes where every input report field lives for a given connection
/// mode. Wireless reports carry two extra header bytes in front of the
/// fields, so every field offset is shifted by the same amount.
///
/// A profile is a plain value: once selected for a device it is copied into
/// the [super::Codec] and never changes for the lifetime of that session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct LayoutProfile {
    mode: ConnectionMode,
}

impl LayoutProfile {
    pub const WIRED: Self = Self::new(ConnectionMode::Wired);
    pub const WIRELESS: Self = Self::new(ConnectionMode::Wireless);

    pub const fn new(mode: ConnectionMode) -> Self {
        Self { mode }
    }

    /// Select the profile for a newly attached device
    pub fn select(metadata: &DeviceMetadata) -> Self {
        Self::select_with(metadata, DS4_WIRED_VERSION)
    }

    /// Select the profile for a newly attached device, using the given
    /// version number as the wired sentinel.
    pub fn select_with(metadata: &DeviceMetadata, wired_version: u16) -> Self {
        let mode = ConnectionMode::detect(metadata.version.as_deref(), wired_version);
        log::debug!("Selected {mode} layout for device {:?}", metadata.path);
        Self::new(mode)
    }

    pub const fn mode(&self) -> ConnectionMode {
        self.mode
    }

    /// Byte shift applied to every field
    pub const fn offset(&self) -> usize {
        match self.mode {
            ConnectionMode::Wired => 0,
            ConnectionMode::Wireless => WIRELESS_HEADER_SIZE,
        }
    }

    /// Bit shift applied to every field
    pub const fn offset_bits(&self) -> usize {
        self.offset() * 8
    }

    /// Returns the effective byte offset of a field whose wired offset is `base`
    pub const fn field_offset(&self, base: usize) -> usize {
        base + self.offset()
    }
}
