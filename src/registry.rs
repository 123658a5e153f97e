//! Registrations of supported devices. Each registration pairs a
//! [DeviceConfig] describing which devices it matches with the constructor
//! of the codec to use for them.
use crate::{
    config::{self, DeviceConfig},
    drivers::dualshock4::{self, codec::Codec},
    info::DeviceMetadata,
};

/// Creates a codec for a device that matched the given config
pub type CodecConstructor = fn(&DeviceConfig, &DeviceMetadata) -> Codec;

/// Returns the constructor for the codec with the given name
pub fn constructor_for(name: &str) -> Option<CodecConstructor> {
    match name {
        dualshock4::codec::CODEC_NAME => Some(dualshock4::codec::construct),
        _ => None,
    }
}

#[derive(Clone)]
pub struct Registration {
    pub config: DeviceConfig,
    pub constructor: CodecConstructor,
}

impl std::fmt::Debug for Registration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registration")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Registration {
    pub fn matches(&self, device: &DeviceMetadata) -> bool {
        self.config.has_matching_device(device)
    }
}

/// Ordered list of registrations. The first registration that matches a
/// device wins.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    registrations: Vec<Registration>,
}

impl Registry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding every device config found in the config
    /// search paths followed by the built-in DualShock 4 registration.
    pub fn init() -> Self {
        let mut registry = Self::new();
        for config in config::load_device_configs() {
            registry.register_config(config);
        }
        registry.register(dualshock4::codec::device_config(), dualshock4::codec::construct);
        registry
    }

    pub fn register(&mut self, config: DeviceConfig, constructor: CodecConstructor) {
        log::debug!("Registering device config: {}", config.name);
        self.registrations.push(Registration {
            config,
            constructor,
        });
    }

    /// Register a config using the codec it names. Returns false if the codec
    /// is unknown.
    pub fn register_config(&mut self, config: DeviceConfig) -> bool {
        let Some(constructor) = constructor_for(config.codec.as_str()) else {
            log::warn!(
                "Skipping device config '{}': unknown codec '{}'",
                config.name,
                config.codec
            );
            return false;
        };
        self.register(config, constructor);
        true
    }

    pub fn registrations(&self) -> &[Registration] {
        self.registrations.as_slice()
    }

    pub fn len(&self) -> usize {
        self.registrations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registrations.is_empty()
    }

    /// Find the first registration matching the given device
    pub fn find(&self, device: &DeviceMetadata) -> Option<&Registration> {
        let registration = self.registrations.iter().find(|r| r.matches(device));
        log::trace!(
            "Device {:04x}:{:04x} matched config: {:?}",
            device.vendor_id,
            device.product_id,
            registration.map(|r| r.config.name.as_str())
        );
        registration
    }

    /// Returns true if any registration matches the given device
    pub fn is_supported(&self, device: &DeviceMetadata) -> bool {
        self.find(device).is_some()
    }

    /// Construct a codec for a newly attached device
    pub fn attach(&self, device: &DeviceMetadata) -> Option<Codec> {
        let registration = self.find(device)?;
        Some((registration.constructor)(&registration.config, device))
    }
}

#[cfg(test)]
pub mod registry_test;
