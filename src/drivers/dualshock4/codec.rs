use crate::{
    config::{DeviceConfig, DeviceMatch, Hidraw},
    info::DeviceMetadata,
};

use super::{
    driver::{
        DS4_MANUFACTURER_PATTERN, DS4_PID, DS4_PRODUCT_PATTERN, DS4_VID, DS4_WIRED_VERSION,
        OUTPUT_REPORT_SIZE,
    },
    hid_report::ReportError,
    layout::LayoutProfile,
    output::{self, OutputCommand, OutputError},
    state::GamepadState,
};

/// Codec name used in device configs
pub const CODEC_NAME: &str = "dualshock4";

/// Decoder and encoder bound to the layout of one attached device. The
/// profile is fixed at construction; a codec is a plain value that can be
/// shared between threads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Codec {
    profile: LayoutProfile,
}

impl Codec {
    pub const fn new(profile: LayoutProfile) -> Self {
        Self { profile }
    }

    /// Create a codec for a newly attached device
    pub fn attach(metadata: &DeviceMetadata) -> Self {
        Self::new(LayoutProfile::select(metadata))
    }

    pub fn profile(&self) -> LayoutProfile {
        self.profile
    }

    /// Decode a raw input report
    pub fn decode(&self, buf: &[u8]) -> Result<GamepadState, ReportError> {
        GamepadState::decode(buf, &self.profile)
    }

    /// Encode a command into a raw output report
    pub fn encode(&self, command: &OutputCommand) -> Result<[u8; OUTPUT_REPORT_SIZE], OutputError> {
        output::encode(command, &self.profile)
    }
}

/// Construct a codec for a device matched by the given config
pub fn construct(config: &DeviceConfig, metadata: &DeviceMetadata) -> Codec {
    let wired_version = config.wired_version.unwrap_or(DS4_WIRED_VERSION);
    Codec::new(LayoutProfile::select_with(metadata, wired_version))
}

/// Built-in device config for the DualShock 4
pub fn device_config() -> DeviceConfig {
    DeviceConfig {
        version: 1,
        kind: "DeviceConfig".to_string(),
        name: "Sony DualShock 4".to_string(),
        codec: CODEC_NAME.to_string(),
        matches: vec![
            DeviceMatch::hidraw(Hidraw {
                vendor_id: Some(DS4_VID),
                product_id: Some(DS4_PID),
                ..Default::default()
            }),
            DeviceMatch::hidraw(Hidraw {
                manufacturer: Some(DS4_MANUFACTURER_PATTERN.to_string()),
                product: Some(DS4_PRODUCT_PATTERN.to_string()),
                ..Default::default()
            }),
        ],
        wired_version: Some(DS4_WIRED_VERSION),
    }
}
