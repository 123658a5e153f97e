use std::error::Error;

use crate::{
    config::{DeviceConfig, Hidraw},
    drivers::dualshock4::{codec, driver::DS4_WIRED_VERSION},
    info::DeviceMetadata,
};

const DEVICE_CONFIG: &str = "./rootfs/usr/share/ds4-codec/devices/50-dualshock4.yaml";

#[tokio::test]
async fn test_load_shipped_config() -> Result<(), Box<dyn Error>> {
    let config = DeviceConfig::from_yaml_file(DEVICE_CONFIG.to_string())?;
    assert_eq!(config, codec::device_config());
    assert_eq!(config.wired_version, Some(DS4_WIRED_VERSION));

    // Every shipped config must load and name a known codec
    let mut config_dir = tokio::fs::read_dir("./rootfs/usr/share/ds4-codec/devices").await?;
    while let Some(entry) = config_dir.next_entry().await? {
        let content = tokio::fs::read_to_string(entry.path()).await?;
        let config = DeviceConfig::from_yaml(content)?;
        assert!(
            crate::registry::constructor_for(config.codec.as_str()).is_some(),
            "unknown codec in {:?}",
            entry.path()
        );
    }

    Ok(())
}

#[test]
fn test_load_from_yaml() -> Result<(), Box<dyn Error>> {
    let yaml = r#"
version: 1
kind: DeviceConfig
name: Test Controller
codec: dualshock4
matches:
  - hidraw:
      vendor_id: 1356
      interface_num: 3
"#;
    let config = DeviceConfig::from_yaml(yaml.to_string())?;
    assert_eq!(config.name, "Test Controller");
    assert_eq!(config.wired_version, None);
    assert_eq!(config.matches.len(), 1);

    let mut device = DeviceMetadata::new(1356, 1);
    assert!(!config.has_matching_device(&device));
    device.interface_number = Some(3);
    assert!(config.has_matching_device(&device));
    device.interface_number = Some(0);
    assert!(!config.has_matching_device(&device));

    Ok(())
}

#[test]
fn test_invalid_yaml() {
    assert!(DeviceConfig::from_yaml("version: [".to_string()).is_err());
    assert!(DeviceConfig::from_yaml_file("./does-not-exist.yaml".to_string()).is_err());
}

#[test]
fn test_match_hidraw() {
    let config = codec::device_config();
    let hidraw = Hidraw {
        manufacturer: Some("Sony*Entertainment".to_string()),
        product: Some("Wireless Controller".to_string()),
        ..Default::default()
    };

    let device =
        DeviceMetadata::new(0, 0).with_names("Sony Computer Entertainment", "Wireless Controller");
    assert!(config.has_matching_hidraw(&device, &hidraw));

    let device =
        DeviceMetadata::new(0, 0).with_names("Sony Interactive Entertainment", "Wireless Controller");
    assert!(config.has_matching_hidraw(&device, &hidraw));

    // Name patterns are case sensitive
    let device =
        DeviceMetadata::new(0, 0).with_names("SONY ENTERTAINMENT", "Wireless Controller");
    assert!(!config.has_matching_hidraw(&device, &hidraw));

    let device =
        DeviceMetadata::new(0, 0).with_names("Sony Entertainment", "Wireless Controller 2");
    assert!(!config.has_matching_hidraw(&device, &hidraw));

    // Missing names never match a name pattern
    let device = DeviceMetadata::new(0, 0);
    assert!(!config.has_matching_hidraw(&device, &hidraw));

    // An empty hidraw entry matches anything
    assert!(config.has_matching_hidraw(&device, &Hidraw::default()));
}
