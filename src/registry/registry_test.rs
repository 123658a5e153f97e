use std::error::Error;

use crate::{
    config::DeviceConfig,
    drivers::dualshock4::{
        codec::{self, Codec},
        driver::{DS4_PID, DS4_VID},
        layout::{ConnectionMode, LayoutProfile},
    },
    info::DeviceMetadata,
    registry::{constructor_for, Registry},
};

/// Always returns a wireless codec
fn wireless_codec(_config: &DeviceConfig, _device: &DeviceMetadata) -> Codec {
    Codec::new(LayoutProfile::WIRELESS)
}

#[test]
fn test_empty_registry() {
    let registry = Registry::new();
    let device = DeviceMetadata::new(DS4_VID, DS4_PID).with_version("256");
    assert!(registry.is_empty());
    assert!(registry.find(&device).is_none());
    assert!(registry.attach(&device).is_none());
}

#[test]
fn test_builtin_registration() -> Result<(), Box<dyn Error>> {
    let mut registry = Registry::new();
    registry.register(codec::device_config(), codec::construct);
    assert_eq!(registry.len(), 1);

    let wired = DeviceMetadata::new(DS4_VID, DS4_PID).with_version("256");
    let codec = registry.attach(&wired).ok_or("no codec for wired device")?;
    assert_eq!(codec.profile().mode(), ConnectionMode::Wired);

    let wireless = DeviceMetadata::new(DS4_VID, DS4_PID).with_version("0");
    let codec = registry.attach(&wireless).ok_or("no codec for wireless device")?;
    assert_eq!(codec.profile().mode(), ConnectionMode::Wireless);

    // Matched by name when the ids differ
    let renamed = DeviceMetadata::new(0x1234, 0x5678)
        .with_names("Sony Interactive Entertainment", "Wireless Controller")
        .with_version("256");
    assert!(registry.is_supported(&renamed));

    let other = DeviceMetadata::new(DS4_VID, 0x05c4).with_names("Sony", "Gamepad");
    assert!(!registry.is_supported(&other));

    Ok(())
}

#[test]
fn test_first_registration_wins() -> Result<(), Box<dyn Error>> {
    let mut registry = Registry::new();
    registry.register(codec::device_config(), wireless_codec);
    registry.register(codec::device_config(), codec::construct);

    let wired = DeviceMetadata::new(DS4_VID, DS4_PID).with_version("256");
    let codec = registry.attach(&wired).ok_or("no codec")?;
    assert_eq!(codec.profile(), LayoutProfile::WIRELESS);

    Ok(())
}

#[test]
fn test_register_config() -> Result<(), Box<dyn Error>> {
    let mut registry = Registry::new();

    let mut config = codec::device_config();
    config.codec = "dualsense".to_string();
    assert!(!registry.register_config(config));
    assert!(registry.is_empty());

    let mut config = codec::device_config();
    config.wired_version = Some(0x0200);
    assert!(registry.register_config(config));
    let device = DeviceMetadata::new(DS4_VID, DS4_PID).with_version("512");
    let codec = registry.attach(&device).ok_or("no codec")?;
    assert_eq!(codec.profile().mode(), ConnectionMode::Wired);

    Ok(())
}

#[test]
fn test_constructor_for() {
    assert!(constructor_for("dualshock4").is_some());
    assert!(constructor_for("DualShock4").is_none());
    assert!(constructor_for("").is_none());
}

#[test]
fn test_init_includes_builtin() {
    let registry = Registry::init();
    let device = DeviceMetadata::new(DS4_VID, DS4_PID).with_version("256");
    assert!(registry.is_supported(&device));
    assert!(registry
        .registrations()
        .iter()
        .any(|r| r.config == codec::device_config()));
}
