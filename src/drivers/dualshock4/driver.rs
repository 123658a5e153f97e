use std::{error::Error, ffi::CString};

use hidapi::HidDevice;

use crate::{info::DeviceMetadata, registry::Registry};

use super::{
    codec::Codec,
    event::{
        AxisEvent, AxisInput, BatteryInput, BinaryInput, ButtonEvent, Event, MotionEvent,
        MotionInput, TouchAxisInput, TriggerEvent, TriggerInput,
    },
    layout::LayoutProfile,
    output::OutputCommand,
    state::{GamepadState, TouchSlot},
};

// Source: https://github.com/torvalds/linux/blob/master/drivers/hid/hid-sony.c
pub const DS4_VID: u16 = 0x054c;
pub const DS4_PID: u16 = 0x09cc;
pub const DS4_MANUFACTURER_PATTERN: &str = "Sony*Entertainment";
pub const DS4_PRODUCT_PATTERN: &str = "Wireless Controller";
/// Release number reported by the controller when attached over USB
pub const DS4_WIRED_VERSION: u16 = 0x0100;

pub const INPUT_REPORT_USB: u8 = 0x01;
pub const INPUT_REPORT_SIZE: usize = 64;
/// Size of the buffer used to read reports from the device
pub const INPUT_READ_BUFFER_SIZE: usize = 78;
/// Extra header bytes in front of every field in wireless reports
pub const WIRELESS_HEADER_SIZE: usize = 2;
/// Wired byte offset and size of [super::hid_report::InputState]
pub const INPUT_STATE_OFFSET: usize = 1;
pub const INPUT_STATE_SIZE: usize = 42;

pub const OUTPUT_REPORT_ID: u8 = 0x11;
pub const OUTPUT_REPORT_MODE: u8 = 0x80;
pub const OUTPUT_REPORT_SIZE: usize = 78;
pub const OUTPUT_FLAG_RUMBLE: u8 = 0x01;
pub const OUTPUT_FLAG_COLOR: u8 = 0x02;

// Input report value ranges
pub const STICK_CENTER: u8 = 128;
pub const DPAD_NEUTRAL: u8 = 8;
pub const BATTERY_LEVEL_MAX: u8 = 10;
pub const TOUCH_NO_CONTACT: u32 = 0x80;
pub const TOUCHPAD_WIDTH: u16 = 1920;
pub const TOUCHPAD_HEIGHT: u16 = 942;

/// Timeout in milliseconds for a single read from the device
const READ_TIMEOUT_MS: i32 = 100;

/// DualShock 4 driver for reading gamepad input and writing output commands
pub struct Driver {
    device: HidDevice,
    codec: Codec,
    state: Option<GamepadState>,
}

impl Driver {
    /// Open the device at the given path (e.g. "/dev/hidraw0") using the
    /// built-in device registrations.
    pub fn new(path: String) -> Result<Self, Box<dyn Error + Send + Sync>> {
        Self::with_registry(path, &Registry::init())
    }

    /// Open the device at the given path. The layout profile is selected from
    /// the device information exactly once, here.
    pub fn with_registry(
        path: String,
        registry: &Registry,
    ) -> Result<Self, Box<dyn Error + Send + Sync>> {
        let c_path = CString::new(path.clone())?;
        let api = hidapi::HidApi::new()?;
        let device = api.open_path(&c_path)?;
        let info = device.get_device_info()?;
        let metadata = DeviceMetadata::from(&info);
        let Some(codec) = registry.attach(&metadata) else {
            return Err(format!(
                "Device '{path}' is not a DualShock 4 controller: {:04x}:{:04x}",
                metadata.vendor_id, metadata.product_id
            )
            .into());
        };
        log::info!(
            "Attached DualShock 4 at '{path}' in {} mode",
            codec.profile().mode()
        );

        Ok(Self {
            device,
            codec,
            state: None,
        })
    }

    /// Returns the layout profile selected when the device was attached
    pub fn profile(&self) -> LayoutProfile {
        self.codec.profile()
    }

    /// Returns the most recently decoded gamepad state
    pub fn state(&self) -> Option<&GamepadState> {
        self.state.as_ref()
    }

    /// Returns the touch slot at the given index from the latest state
    pub fn touch(&self, index: usize) -> Option<TouchSlot> {
        self.state.as_ref().and_then(|state| state.touch(index))
    }

    /// Poll the device and read input reports
    pub fn poll(&mut self) -> Result<Vec<Event>, Box<dyn Error + Send + Sync>> {
        // Read data from the device into a buffer
        let mut buf = [0; INPUT_READ_BUFFER_SIZE];
        let bytes_read = self.device.read_timeout(&mut buf[..], READ_TIMEOUT_MS)?;
        if bytes_read == 0 {
            return Ok(Vec::new());
        }
        let slice = &buf[..bytes_read];

        // Handle the incoming input report
        let events = self.handle_input_report(slice)?;

        Ok(events)
    }

    /// Writes the given output command to the gamepad
    pub fn write(&self, command: &OutputCommand) -> Result<(), Box<dyn Error + Send + Sync>> {
        let buf = self.codec.encode(command)?;
        let _bytes_written = self.device.write(&buf)?;

        Ok(())
    }

    /// Set the color of the light bar. Channels range from 0.0 to 1.0.
    pub fn set_led_color(&self, r: f32, g: f32, b: f32) -> Result<(), Box<dyn Error + Send + Sync>> {
        log::debug!("Setting LED color to: {r}, {g}, {b}");
        let command = OutputCommand::new().with_color(r, g, b);
        self.write(&command)
    }

    /// Set the speed of both rumble motors. Speeds range from 0.0 to 1.0.
    pub fn rumble(
        &self,
        low_frequency: f32,
        high_frequency: f32,
    ) -> Result<(), Box<dyn Error + Send + Sync>> {
        log::debug!("Setting motor speeds to: {low_frequency}, {high_frequency}");
        let command = OutputCommand::new().with_motor_speeds(low_frequency, high_frequency);
        self.write(&command)
    }

    /// Decodes the buffer into a [GamepadState] and updates the internal
    /// gamepad state
    fn handle_input_report(
        &mut self,
        buf: &[u8],
    ) -> Result<Vec<Event>, Box<dyn Error + Send + Sync>> {
        let state = self.codec.decode(buf)?;

        // Update the state
        let old_state = self.state.replace(state);

        // Translate the state into a stream of input events
        let Some(old_state) = old_state else {
            return Ok(Vec::new());
        };

        Ok(translate(&old_state, &state))
    }
}

/// Translate the difference between two states into events
pub fn translate(old_state: &GamepadState, state: &GamepadState) -> Vec<Event> {
    let mut events = Vec::new();

    // Button events
    let (old, new) = (&old_state.buttons, &state.buttons);
    push_button(&mut events, old.south, new.south, ButtonEvent::Cross);
    push_button(&mut events, old.east, new.east, ButtonEvent::Circle);
    push_button(&mut events, old.west, new.west, ButtonEvent::Square);
    push_button(&mut events, old.north, new.north, ButtonEvent::Triangle);
    push_button(&mut events, old.select, new.select, ButtonEvent::Share);
    push_button(&mut events, old.start, new.start, ButtonEvent::Options);
    push_button(&mut events, old.system, new.system, ButtonEvent::Guide);
    push_button(&mut events, old.l1, new.l1, ButtonEvent::L1);
    push_button(&mut events, old.r1, new.r1, ButtonEvent::R1);
    push_button(&mut events, old.l2, new.l2, ButtonEvent::L2);
    push_button(&mut events, old.r2, new.r2, ButtonEvent::R2);
    push_button(&mut events, old.l3, new.l3, ButtonEvent::L3);
    push_button(&mut events, old.r3, new.r3, ButtonEvent::R3);
    push_button(&mut events, old.touchpad, new.touchpad, ButtonEvent::PadPress);

    // DPad events
    let (old, new) = (&old_state.dpad, &state.dpad);
    push_button(&mut events, old.up(), new.up(), ButtonEvent::DPadUp);
    push_button(&mut events, old.right(), new.right(), ButtonEvent::DPadRight);
    push_button(&mut events, old.down(), new.down(), ButtonEvent::DPadDown);
    push_button(&mut events, old.left(), new.left(), ButtonEvent::DPadLeft);

    // Trigger events
    if state.l2_trigger != old_state.l2_trigger {
        events.push(Event::Trigger(TriggerEvent::L2(TriggerInput {
            value: state.l2_trigger,
        })));
    }
    if state.r2_trigger != old_state.r2_trigger {
        events.push(Event::Trigger(TriggerEvent::R2(TriggerInput {
            value: state.r2_trigger,
        })));
    }

    // Axis events
    if state.left_stick != old_state.left_stick {
        events.push(Event::Axis(AxisEvent::LStick(AxisInput {
            x: state.left_stick.x(),
            y: state.left_stick.y(),
        })));
    }
    if state.right_stick != old_state.right_stick {
        events.push(Event::Axis(AxisEvent::RStick(AxisInput {
            x: state.right_stick.x(),
            y: state.right_stick.y(),
        })));
    }

    // Touch events
    for (index, (touch, old_touch)) in state.touches.iter().zip(&old_state.touches).enumerate() {
        if touch == old_touch {
            continue;
        }
        events.push(Event::Axis(AxisEvent::Pad(TouchAxisInput {
            index: index as u8,
            contact_id: touch.contact_id,
            is_touching: touch.is_touching,
            x: touch.x,
            y: touch.y,
        })));
    }

    // Motion events
    if state.gyro != old_state.gyro {
        events.push(Event::Motion(MotionEvent::Gyro(MotionInput::from(
            state.gyro,
        ))));
    }
    if state.accel != old_state.accel {
        events.push(Event::Motion(MotionEvent::Accelerometer(MotionInput::from(
            state.accel,
        ))));
    }

    // Battery events
    if state.battery != old_state.battery {
        events.push(Event::Battery(BatteryInput {
            level: state.battery.level,
            charging: state.battery.charging,
        }));
    }

    events
}

/// Push a button event if the pressed state changed
fn push_button(
    events: &mut Vec<Event>,
    old: bool,
    new: bool,
    event: fn(BinaryInput) -> ButtonEvent,
) {
    if old != new {
        events.push(Event::Button(event(BinaryInput { pressed: new })));
    }
}
