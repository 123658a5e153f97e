use hidapi::DeviceInfo;

/// Identification data reported by a HID device when it is attached. This is
/// what the [crate::registry::Registry] matches against and what the
/// connection mode is detected from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeviceMetadata {
    /// Device path (e.g. "/dev/hidraw0")
    pub path: Option<String>,
    pub vendor_id: u16,
    pub product_id: u16,
    pub manufacturer: Option<String>,
    pub product: Option<String>,
    /// Release number of the device (bcdDevice) as a string
    pub version: Option<String>,
    pub interface_number: Option<i32>,
}

impl DeviceMetadata {
    /// Create metadata with only the vendor and product id set
    pub fn new(vendor_id: u16, product_id: u16) -> Self {
        Self {
            vendor_id,
            product_id,
            ..Default::default()
        }
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    pub fn with_names(mut self, manufacturer: impl Into<String>, product: impl Into<String>) -> Self {
        self.manufacturer = Some(manufacturer.into());
        self.product = Some(product.into());
        self
    }
}

impl From<&DeviceInfo> for DeviceMetadata {
    fn from(info: &DeviceInfo) -> Self {
        Self {
            path: Some(info.path().to_string_lossy().to_string()),
            vendor_id: info.vendor_id(),
            product_id: info.product_id(),
            manufacturer: info.manufacturer_string().map(String::from),
            product: info.product_string().map(String::from),
            version: Some(info.release_number().to_string()),
            interface_number: Some(info.interface_number()),
        }
    }
}
