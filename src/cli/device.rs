use std::{
    error::Error,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
};

use tabled::{
    settings::{Panel, Style},
    Table, Tabled,
};

use crate::{
    drivers::dualshock4::driver::Driver, info::DeviceMetadata, registry::Registry,
};

#[derive(Tabled)]
struct DeviceRow {
    #[tabled(rename = "Path")]
    path: String,
    #[tabled(rename = "Id")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Version")]
    version: String,
    #[tabled(rename = "Config")]
    config: String,
    #[tabled(rename = "Mode")]
    mode: String,
}

impl DeviceRow {
    fn new(device: &DeviceMetadata, registry: &Registry) -> Self {
        let registration = registry.find(device);
        let config = registration
            .map(|r| r.config.name.clone())
            .unwrap_or_else(|| "-".to_string());
        let mode = registry
            .attach(device)
            .map(|codec| codec.profile().mode().to_string())
            .unwrap_or_else(|| "-".to_string());
        let name = format!(
            "{} {}",
            device.manufacturer.as_deref().unwrap_or_default(),
            device.product.as_deref().unwrap_or_default()
        );

        Self {
            path: device.path.clone().unwrap_or_default(),
            id: format!("{:04x}:{:04x}", device.vendor_id, device.product_id),
            name: name.trim().to_string(),
            version: device.version.clone().unwrap_or_default(),
            config,
            mode,
        }
    }
}

/// List connected HID devices
pub fn handle_devices(registry: &Registry, all: bool) -> Result<(), Box<dyn Error + Send + Sync>> {
    let api = hidapi::HidApi::new()?;
    let mut devices: Vec<DeviceRow> = Vec::new();
    for info in api.device_list() {
        let device = DeviceMetadata::from(info);
        if !all && !registry.is_supported(&device) {
            continue;
        }
        devices.push(DeviceRow::new(&device, registry));
    }
    let count = devices.len();

    let mut table = Table::new(devices);
    table
        .with(Style::modern_rounded())
        .with(Panel::header("HID Devices"));
    println!("{table}");
    println!("Found {count} device(s)");

    Ok(())
}

/// Print events from the device at the given path until interrupted
pub async fn handle_monitor(
    registry: Registry,
    path: String,
) -> Result<(), Box<dyn Error + Send + Sync>> {
    let running = Arc::new(AtomicBool::new(true));

    // Reads from the device block, so poll in a dedicated thread
    let mut task = tokio::task::spawn_blocking({
        let running = running.clone();
        move || -> Result<(), Box<dyn Error + Send + Sync>> {
            let mut driver = Driver::with_registry(path, &registry)?;
            println!("Monitoring device in {} mode", driver.profile().mode());
            while running.load(Ordering::Relaxed) {
                for event in driver.poll()? {
                    println!("{event:?}");
                }
            }
            Ok(())
        }
    });

    tokio::select! {
        result = &mut task => return result?,
        _ = tokio::signal::ctrl_c() => {
            log::info!("Stopping device monitor");
            running.store(false, Ordering::Relaxed);
        }
    }
    task.await??;

    Ok(())
}

/// Set the light bar color of the device at the given path
pub fn handle_led(
    registry: &Registry,
    path: String,
    r: f32,
    g: f32,
    b: f32,
) -> Result<(), Box<dyn Error + Send + Sync>> {
    let driver = Driver::with_registry(path, registry)?;
    driver.set_led_color(r, g, b)?;
    println!("Set light bar color to: {r}, {g}, {b}");
    Ok(())
}

/// Set the rumble motor speeds of the device at the given path
pub fn handle_rumble(
    registry: &Registry,
    path: String,
    low: f32,
    high: f32,
) -> Result<(), Box<dyn Error + Send + Sync>> {
    let driver = Driver::with_registry(path, registry)?;
    driver.rumble(low, high)?;
    println!("Set motor speeds to: {low}, {high}");
    Ok(())
}
