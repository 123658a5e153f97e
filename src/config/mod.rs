pub mod path;

#[cfg(test)]
pub mod config_test;

use std::{io, path::Path};

use glob_match::glob_match;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::info::DeviceMetadata;

/// Represents all possible errors loading a [DeviceConfig]
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Could not read: {0}")]
    IoError(#[from] io::Error),
    #[error("Unable to deserialize: {0}")]
    DeserializeError(#[from] serde_yaml::Error),
}

/// Describes which devices a codec should be used for
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "snake_case")]
pub struct DeviceConfig {
    pub version: u32,
    pub kind: String,
    pub name: String,
    /// Name of the codec to construct for matching devices (e.g. "dualshock4")
    pub codec: String,
    /// A device matches the config if any one of these entries matches
    pub matches: Vec<DeviceMatch>,
    /// Device version reported when attached over a wired connection. Any
    /// other version is treated as a wireless connection.
    pub wired_version: Option<u16>,
}

/// Defines a device match for loading a [DeviceConfig]
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
#[serde(rename_all = "snake_case")]
pub struct DeviceMatch {
    pub hidraw: Option<Hidraw>,
}

impl DeviceMatch {
    pub fn hidraw(hidraw: Hidraw) -> Self {
        Self {
            hidraw: Some(hidraw),
        }
    }
}

/// Devices that match all of the given hidraw properties. Manufacturer and
/// product names are glob patterns.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
#[serde(rename_all = "snake_case")]
pub struct Hidraw {
    pub vendor_id: Option<u16>,
    pub product_id: Option<u16>,
    pub interface_num: Option<i32>,
    pub manufacturer: Option<String>,
    pub product: Option<String>,
}

impl DeviceConfig {
    /// Load a [DeviceConfig] from the given YAML string
    pub fn from_yaml(content: String) -> Result<DeviceConfig, LoadError> {
        let device: DeviceConfig = serde_yaml::from_str(content.as_str())?;
        Ok(device)
    }

    /// Load a [DeviceConfig] from the given YAML file
    pub fn from_yaml_file(path: String) -> Result<DeviceConfig, LoadError> {
        Self::from_yaml_path(Path::new(&path))
    }

    /// Load a [DeviceConfig] from the given YAML file path
    pub fn from_yaml_path(path: &Path) -> Result<DeviceConfig, LoadError> {
        let file = std::fs::File::open(path)?;
        let device: DeviceConfig = serde_yaml::from_reader(file)?;
        Ok(device)
    }

    /// Returns true if any of the match entries match the given device
    pub fn has_matching_device(&self, device: &DeviceMetadata) -> bool {
        self.matches.iter().any(|entry| {
            entry
                .hidraw
                .as_ref()
                .is_some_and(|hidraw| self.has_matching_hidraw(device, hidraw))
        })
    }

    /// Returns true if a given device matches the given hidraw config
    pub fn has_matching_hidraw(&self, device: &DeviceMetadata, hidraw_config: &Hidraw) -> bool {
        log::trace!("Checking hidraw config '{:?}'", hidraw_config);

        if let Some(vendor_id) = hidraw_config.vendor_id {
            let vid = device.vendor_id;
            log::trace!("Checking vendor id: {vendor_id} against {vid}");
            if vid != vendor_id {
                return false;
            }
        }

        if let Some(product_id) = hidraw_config.product_id {
            let pid = device.product_id;
            log::trace!("Checking product_id: {product_id} against {pid}");
            if pid != product_id {
                return false;
            }
        }

        if let Some(interface_num) = hidraw_config.interface_num {
            let Some(ifnum) = device.interface_number else {
                return false;
            };
            log::trace!("Checking interface number: {interface_num} against {ifnum}");
            if ifnum != interface_num {
                return false;
            }
        }

        if let Some(manufacturer) = hidraw_config.manufacturer.as_ref() {
            let Some(dmanufacturer) = device.manufacturer.as_ref() else {
                return false;
            };
            log::trace!("Checking manufacturer: {manufacturer} against {dmanufacturer}");
            if !glob_match(manufacturer.as_str(), dmanufacturer.as_str()) {
                return false;
            }
        }

        if let Some(product) = hidraw_config.product.as_ref() {
            let Some(dproduct) = device.product.as_ref() else {
                return false;
            };
            log::trace!("Checking product: {product} against {dproduct}");
            if !glob_match(product.as_str(), dproduct.as_str()) {
                return false;
            }
        }

        true
    }
}

/// Load every device config found in the config search paths. Files that
/// fail to load are skipped.
pub fn load_device_configs() -> Vec<DeviceConfig> {
    let paths = path::get_devices_paths();
    let files = path::get_multidir_sorted_files(paths.as_slice(), |entry| {
        entry.path().extension().is_some_and(|ext| ext == "yaml")
    });

    let mut configs = Vec::with_capacity(files.len());
    for file in files {
        match DeviceConfig::from_yaml_path(&file) {
            Ok(config) => {
                log::debug!("Loaded device config '{}' from {file:?}", config.name);
                configs.push(config);
            }
            Err(e) => log::warn!("Unable to load device config {file:?}: {e}"),
        }
    }

    configs
}
