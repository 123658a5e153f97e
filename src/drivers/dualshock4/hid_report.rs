//! Report layouts for the DualShock 4 controller. Offsets follow the USB
//! input report; the wireless layout is the same block shifted by the
//! [super::layout::LayoutProfile] offset.
//! Source: https://www.psdevwiki.com/ps4/DS4-USB
use std::fmt::Display;

use packed_struct::prelude::*;
use thiserror::Error;

use super::{driver::*, layout::LayoutProfile};

/// Possible errors when reading an input report
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("invalid report size: expected at least {expected} bytes, got {got}")]
    InvalidSize { expected: usize, got: usize },
    #[error("unable to unpack report: {0:?}")]
    PackingError(#[from] PackingError),
}

/// Input report fields following the report id byte. Byte numbers in the
/// comments are relative to the start of the report in wired mode.
#[derive(PackedStruct, Debug, Copy, Clone, PartialEq)]
#[packed_struct(bit_numbering = "msb0", size_bytes = "42")]
pub struct InputState {
    // byte 1-4
    #[packed_field(bytes = "0")]
    pub joystick_l_x: u8,
    #[packed_field(bytes = "1")]
    pub joystick_l_y: u8,
    #[packed_field(bytes = "2")]
    pub joystick_r_x: u8,
    #[packed_field(bytes = "3")]
    pub joystick_r_y: u8,

    // byte 5
    #[packed_field(bits = "32")]
    pub triangle: bool,
    #[packed_field(bits = "33")]
    pub circle: bool,
    #[packed_field(bits = "34")]
    pub cross: bool,
    #[packed_field(bits = "35")]
    pub square: bool,
    #[packed_field(bits = "36..=39")]
    pub dpad: Integer<u8, packed_bits::Bits<4>>, // 0-7 clockwise from north, 8 released

    // byte 6
    #[packed_field(bits = "40")]
    pub r3: bool,
    #[packed_field(bits = "41")]
    pub l3: bool,
    #[packed_field(bits = "42")]
    pub options: bool,
    #[packed_field(bits = "43")]
    pub share: bool,
    #[packed_field(bits = "44")]
    pub r2: bool,
    #[packed_field(bits = "45")]
    pub l2: bool,
    #[packed_field(bits = "46")]
    pub r1: bool,
    #[packed_field(bits = "47")]
    pub l1: bool,

    // byte 7
    #[packed_field(bits = "48..=53")]
    pub counter: Integer<u8, packed_bits::Bits<6>>,
    #[packed_field(bits = "54")]
    pub touchpad: bool,
    #[packed_field(bits = "55")]
    pub ps: bool,

    // byte 8-9
    #[packed_field(bytes = "7")]
    pub l2_trigger: u8,
    #[packed_field(bytes = "8")]
    pub r2_trigger: u8,

    // byte 10-12
    #[packed_field(bytes = "9..=10", endian = "lsb")]
    pub timestamp: Integer<u16, packed_bits::Bits<16>>,
    #[packed_field(bytes = "11")]
    pub temperature: u8,

    // byte 13-24
    #[packed_field(bytes = "12..=13", endian = "lsb")]
    pub gyro_x: Integer<i16, packed_bits::Bits<16>>,
    #[packed_field(bytes = "14..=15", endian = "lsb")]
    pub gyro_y: Integer<i16, packed_bits::Bits<16>>,
    #[packed_field(bytes = "16..=17", endian = "lsb")]
    pub gyro_z: Integer<i16, packed_bits::Bits<16>>,
    #[packed_field(bytes = "18..=19", endian = "lsb")]
    pub accel_x: Integer<i16, packed_bits::Bits<16>>,
    #[packed_field(bytes = "20..=21", endian = "lsb")]
    pub accel_y: Integer<i16, packed_bits::Bits<16>>,
    #[packed_field(bytes = "22..=23", endian = "lsb")]
    pub accel_z: Integer<i16, packed_bits::Bits<16>>,

    // byte 30
    #[packed_field(bits = "232..=234")]
    pub _unkn_power: Integer<u8, packed_bits::Bits<3>>,
    #[packed_field(bits = "235")]
    pub charging: bool,
    #[packed_field(bits = "236..=239")]
    pub battery_level: Integer<u8, packed_bits::Bits<4>>, // 0x00 - 0x0A

    // byte 33-34
    #[packed_field(bytes = "32")]
    pub touch_packets: u8,
    #[packed_field(bytes = "33")]
    pub touch_timestamp: u8,

    // byte 35-42
    #[packed_field(bytes = "34..=37", endian = "lsb")]
    pub touch_1: Integer<u32, packed_bits::Bits<32>>,
    #[packed_field(bytes = "38..=41", endian = "lsb")]
    pub touch_2: Integer<u32, packed_bits::Bits<32>>,
}

impl Default for InputState {
    fn default() -> Self {
        Self {
            joystick_l_x: STICK_CENTER,
            joystick_l_y: STICK_CENTER,
            joystick_r_x: STICK_CENTER,
            joystick_r_y: STICK_CENTER,
            triangle: Default::default(),
            circle: Default::default(),
            cross: Default::default(),
            square: Default::default(),
            dpad: Integer::from_primitive(DPAD_NEUTRAL),
            r3: Default::default(),
            l3: Default::default(),
            options: Default::default(),
            share: Default::default(),
            r2: Default::default(),
            l2: Default::default(),
            r1: Default::default(),
            l1: Default::default(),
            counter: Default::default(),
            touchpad: Default::default(),
            ps: Default::default(),
            l2_trigger: Default::default(),
            r2_trigger: Default::default(),
            timestamp: Default::default(),
            temperature: Default::default(),
            gyro_x: Default::default(),
            gyro_y: Default::default(),
            gyro_z: Default::default(),
            accel_x: Default::default(),
            accel_y: Default::default(),
            accel_z: Default::default(),
            _unkn_power: Default::default(),
            charging: Default::default(),
            battery_level: Default::default(),
            touch_packets: Default::default(),
            touch_timestamp: Default::default(),
            // No contact in either slot
            touch_1: Integer::from_primitive(TOUCH_NO_CONTACT),
            touch_2: Integer::from_primitive(TOUCH_NO_CONTACT),
        }
    }
}

/// A decoded input report together with the report id found at the
/// (shifted) start of the report.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct InputReport {
    pub report_id: u8,
    pub state: InputState,
}

impl InputReport {
    /// Unpack the given buffer using the given layout. The buffer must hold at
    /// least [INPUT_REPORT_SIZE] bytes; any byte pattern of that length is a
    /// valid report.
    pub fn unpack(buf: &[u8], profile: &LayoutProfile) -> Result<Self, ReportError> {
        if buf.len() < INPUT_REPORT_SIZE {
            return Err(ReportError::InvalidSize {
                expected: INPUT_REPORT_SIZE,
                got: buf.len(),
            });
        }

        let report_id = buf[profile.field_offset(0)];
        let start = profile.field_offset(INPUT_STATE_OFFSET);
        let end = start + INPUT_STATE_SIZE;
        log::trace!("Unpacking {} input report from bytes {start}..{end}", profile.mode());
        let state = InputState::unpack_from_slice(&buf[start..end])?;

        Ok(Self { report_id, state })
    }
}

impl Display for InputReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Report ID: {:#04x}", self.report_id)?;
        write!(f, "{}", self.state)
    }
}

/// Output report carrying rumble motor speeds and the light bar color. Only
/// the groups whose flag is set are applied by the controller.
#[derive(PackedStruct, Debug, Copy, Clone, PartialEq)]
#[packed_struct(bit_numbering = "msb0", size_bytes = "78")]
pub struct OutputReport {
    // byte 0-1
    #[packed_field(bytes = "0")]
    pub report_id: u8, // Report ID (always 0x11)
    #[packed_field(bytes = "1")]
    pub report_mode: u8, // Always 0x80

    // byte 3
    #[packed_field(bits = "30")]
    pub allow_led_color: bool,
    #[packed_field(bits = "31")]
    pub allow_rumble: bool,

    // byte 6-7
    #[packed_field(bytes = "6")]
    pub rumble_weak: u8, // High frequency motor
    #[packed_field(bytes = "7")]
    pub rumble_strong: u8, // Low frequency motor

    // byte 8-10
    #[packed_field(bytes = "8")]
    pub led_red: u8,
    #[packed_field(bytes = "9")]
    pub led_green: u8,
    #[packed_field(bytes = "10")]
    pub led_blue: u8,
}

impl Default for OutputReport {
    fn default() -> Self {
        Self {
            report_id: OUTPUT_REPORT_ID,
            report_mode: OUTPUT_REPORT_MODE,
            allow_led_color: false,
            allow_rumble: false,
            rumble_weak: 0,
            rumble_strong: 0,
            led_red: 0,
            led_green: 0,
            led_blue: 0,
        }
    }
}

impl OutputReport {
    /// Returns the capability flags byte as it appears on the wire
    pub fn flags(&self) -> u8 {
        let mut flags = 0;
        if self.allow_rumble {
            flags |= OUTPUT_FLAG_RUMBLE;
        }
        if self.allow_led_color {
            flags |= OUTPUT_FLAG_COLOR;
        }
        flags
    }
}
