//! Decoded view of a DualShock 4 input report.
use packed_struct::types::SizedInteger;

use super::{
    driver::{
        BATTERY_LEVEL_MAX, DPAD_NEUTRAL, STICK_CENTER, TOUCHPAD_HEIGHT, TOUCHPAD_WIDTH,
        TOUCH_NO_CONTACT,
    },
    hid_report::{InputReport, InputState, ReportError},
    layout::LayoutProfile,
};

/// Normalize a raw stick byte to 0.0 - 1.0 with [STICK_CENTER] at exactly 0.5.
pub fn normalize(value: u8) -> f32 {
    let center = STICK_CENTER as f32;
    if value <= STICK_CENTER {
        value as f32 / (2.0 * center)
    } else {
        0.5 + (value - STICK_CENTER) as f32 / (2.0 * (u8::MAX - STICK_CENTER) as f32)
    }
}

/// Inverse of [normalize]. Values outside 0.0 - 1.0 are clamped, NaN maps to 0.
pub fn denormalize(value: f32) -> u8 {
    let value = value.clamp(0.0, 1.0);
    let center = STICK_CENTER as f32;
    let raw = if value <= 0.5 {
        value * 2.0 * center
    } else {
        center + (value - 0.5) * 2.0 * (u8::MAX - STICK_CENTER) as f32
    };
    raw.round() as u8
}

/// Raw position of an analog stick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stick {
    pub x: u8,
    pub y: u8,
}

impl Default for Stick {
    fn default() -> Self {
        Self {
            x: STICK_CENTER,
            y: STICK_CENTER,
        }
    }
}

impl Stick {
    /// Horizontal position from 0.0 (left) to 1.0 (right)
    pub fn x(&self) -> f32 {
        normalize(self.x)
    }

    /// Vertical position from 0.0 (down) to 1.0 (up). The device reports down
    /// as the larger value, so the raw byte is inverted.
    pub fn y(&self) -> f32 {
        1.0 - normalize(self.y)
    }

    /// Horizontal deflection from -1.0 (left) to 1.0 (right)
    pub fn x_axis(&self) -> f32 {
        (self.x() - 0.5) * 2.0
    }

    /// Vertical deflection from -1.0 (down) to 1.0 (up)
    pub fn y_axis(&self) -> f32 {
        (self.y() - 0.5) * 2.0
    }

    pub fn left(&self) -> f32 {
        (-self.x_axis()).max(0.0)
    }

    pub fn right(&self) -> f32 {
        self.x_axis().max(0.0)
    }

    pub fn up(&self) -> f32 {
        self.y_axis().max(0.0)
    }

    pub fn down(&self) -> f32 {
        (-self.y_axis()).max(0.0)
    }
}

/// A button backed by a range of values in a multi-bit field. When `min` is
/// greater than `max` the range wraps: values from `min` up to `wrap_at`
/// and values up to `max` press the button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiscreteButton {
    pub min: u8,
    pub max: u8,
    pub wrap_at: Option<u8>,
    pub null: u8,
}

impl DiscreteButton {
    pub fn is_pressed(&self, value: u8) -> bool {
        if value == self.null {
            return false;
        }
        if self.min > self.max {
            let wrap_at = self.wrap_at.unwrap_or(self.min);
            return (value >= self.min && value <= wrap_at) || value <= self.max;
        }
        value >= self.min && value <= self.max
    }
}

pub const DPAD_UP: DiscreteButton = DiscreteButton {
    min: 7,
    max: 1,
    wrap_at: Some(7),
    null: DPAD_NEUTRAL,
};
pub const DPAD_RIGHT: DiscreteButton = DiscreteButton {
    min: 1,
    max: 3,
    wrap_at: None,
    null: DPAD_NEUTRAL,
};
pub const DPAD_DOWN: DiscreteButton = DiscreteButton {
    min: 3,
    max: 5,
    wrap_at: None,
    null: DPAD_NEUTRAL,
};
pub const DPAD_LEFT: DiscreteButton = DiscreteButton {
    min: 5,
    max: 7,
    wrap_at: None,
    null: DPAD_NEUTRAL,
};

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum Direction {
    North = 0,
    NorthEast = 1,
    East = 2,
    SouthEast = 3,
    South = 4,
    SouthWest = 5,
    West = 6,
    NorthWest = 7,
    #[default]
    None = 8,
}

impl Direction {
    /// Values 9-15 never come from the hardware and are treated as released
    pub fn from_raw(value: u8) -> Self {
        match value {
            0 => Self::North,
            1 => Self::NorthEast,
            2 => Self::East,
            3 => Self::SouthEast,
            4 => Self::South,
            5 => Self::SouthWest,
            6 => Self::West,
            7 => Self::NorthWest,
            _ => Self::None,
        }
    }

    pub fn as_bitflag(&self) -> u8 {
        match *self {
            Self::North => 1,                   // 00000001
            Self::NorthEast => 1 | 1 << 1,      // 00000011
            Self::East => 1 << 1,               // 00000010
            Self::SouthEast => 1 << 2 | 1 << 1, // 00000110
            Self::South => 1 << 2,              // 00000100
            Self::SouthWest => 1 << 2 | 1 << 3, // 00001100
            Self::West => 1 << 3,               // 00001000
            Self::NorthWest => 1 | 1 << 3,      // 00001001
            Self::None => 0,                    // 00000000
        }
    }
}

/// Direction pad holding the raw 4-bit hat value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DPad {
    pub raw: u8,
}

impl Default for DPad {
    fn default() -> Self {
        Self { raw: DPAD_NEUTRAL }
    }
}

impl DPad {
    pub fn direction(&self) -> Direction {
        Direction::from_raw(self.raw)
    }

    pub fn up(&self) -> bool {
        DPAD_UP.is_pressed(self.raw)
    }

    pub fn right(&self) -> bool {
        DPAD_RIGHT.is_pressed(self.raw)
    }

    pub fn down(&self) -> bool {
        DPAD_DOWN.is_pressed(self.raw)
    }

    pub fn left(&self) -> bool {
        DPAD_LEFT.is_pressed(self.raw)
    }

    /// Returns true if no direction is pressed
    pub fn is_neutral(&self) -> bool {
        !(self.up() || self.right() || self.down() || self.left())
    }
}

/// Digital buttons, named by their position on a generic gamepad
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Buttons {
    /// Square
    pub west: bool,
    /// Cross
    pub south: bool,
    /// Circle
    pub east: bool,
    /// Triangle
    pub north: bool,
    pub l1: bool,
    pub r1: bool,
    pub l2: bool,
    pub r2: bool,
    /// Share
    pub select: bool,
    /// Options
    pub start: bool,
    pub l3: bool,
    pub r3: bool,
    /// PS button
    pub system: bool,
    pub touchpad: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Battery {
    /// Charge level, 0 - 10 in practice
    pub level: u8,
    pub charging: bool,
}

impl Battery {
    pub fn percent(&self) -> u8 {
        self.level.min(BATTERY_LEVEL_MAX) * 10
    }
}

/// Raw, unscaled readings of a three axis motion sensor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MotionAxes {
    pub x: i16,
    pub y: i16,
    pub z: i16,
}

/// One touchpad contact, unpacked from a 32-bit little-endian value:
///
/// | bits    | field                          |
/// |---------|--------------------------------|
/// | 0 - 6   | contact id                     |
/// | 7       | set when there is no contact   |
/// | 8 - 19  | x                              |
/// | 20 - 31 | y                              |
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TouchSlot {
    pub contact_id: u8,
    pub is_touching: bool,
    pub x: u16,
    pub y: u16,
}

impl Default for TouchSlot {
    fn default() -> Self {
        Self::from_packed(TOUCH_NO_CONTACT)
    }
}

impl TouchSlot {
    pub const fn from_packed(packed: u32) -> Self {
        Self {
            contact_id: (packed & 0x7F) as u8,
            is_touching: (packed >> 7) & 1 == 0,
            x: ((packed >> 8) & 0xFFF) as u16,
            y: ((packed >> 20) & 0xFFF) as u16,
        }
    }

    pub const fn to_packed(&self) -> u32 {
        let no_contact = if self.is_touching { 0 } else { 1 };
        (self.contact_id as u32 & 0x7F)
            | no_contact << 7
            | (self.x as u32 & 0xFFF) << 8
            | (self.y as u32 & 0xFFF) << 20
    }

    pub fn position(&self) -> (u16, u16) {
        (self.x, self.y)
    }

    /// Position scaled to 0.0 - 1.0 across the touchpad surface
    pub fn normalized_position(&self) -> (f64, f64) {
        let x = self.x as f64 / TOUCHPAD_WIDTH as f64;
        let y = self.y as f64 / TOUCHPAD_HEIGHT as f64;
        (x.min(1.0), y.min(1.0))
    }
}

/// Every logical field of an input report. Recomputed from each report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GamepadState {
    pub report_id: u8,
    pub left_stick: Stick,
    pub right_stick: Stick,
    pub dpad: DPad,
    pub buttons: Buttons,
    pub l2_trigger: u8,
    pub r2_trigger: u8,
    /// Report counter, increments with every report
    pub counter: u8,
    pub timestamp: u16,
    pub gyro: MotionAxes,
    pub accel: MotionAxes,
    pub battery: Battery,
    /// Number of touch packets in the report
    pub touch_packets: u8,
    pub touches: [TouchSlot; 2],
}

impl GamepadState {
    /// Decode a raw input report. Fails only if the buffer is shorter than
    /// a full report.
    pub fn decode(buf: &[u8], profile: &LayoutProfile) -> Result<Self, ReportError> {
        let report = InputReport::unpack(buf, profile)?;
        Ok(Self::from(&report))
    }

    /// Returns the touch slot at the given index (0 or 1)
    pub fn touch(&self, index: usize) -> Option<TouchSlot> {
        self.touches.get(index).copied()
    }

    /// Returns true if any touches are detected
    pub fn has_touches(&self) -> bool {
        self.touches.iter().any(|touch| touch.is_touching)
    }
}

impl From<&InputReport> for GamepadState {
    fn from(report: &InputReport) -> Self {
        let state: &InputState = &report.state;
        Self {
            report_id: report.report_id,
            left_stick: Stick {
                x: state.joystick_l_x,
                y: state.joystick_l_y,
            },
            right_stick: Stick {
                x: state.joystick_r_x,
                y: state.joystick_r_y,
            },
            dpad: DPad {
                raw: state.dpad.to_primitive(),
            },
            buttons: Buttons {
                west: state.square,
                south: state.cross,
                east: state.circle,
                north: state.triangle,
                l1: state.l1,
                r1: state.r1,
                l2: state.l2,
                r2: state.r2,
                select: state.share,
                start: state.options,
                l3: state.l3,
                r3: state.r3,
                system: state.ps,
                touchpad: state.touchpad,
            },
            l2_trigger: state.l2_trigger,
            r2_trigger: state.r2_trigger,
            counter: state.counter.to_primitive(),
            timestamp: state.timestamp.to_primitive(),
            gyro: MotionAxes {
                x: state.gyro_x.to_primitive(),
                y: state.gyro_y.to_primitive(),
                z: state.gyro_z.to_primitive(),
            },
            accel: MotionAxes {
                x: state.accel_x.to_primitive(),
                y: state.accel_y.to_primitive(),
                z: state.accel_z.to_primitive(),
            },
            battery: Battery {
                level: state.battery_level.to_primitive(),
                charging: state.charging,
            },
            touch_packets: state.touch_packets,
            touches: [
                TouchSlot::from_packed(state.touch_1.to_primitive()),
                TouchSlot::from_packed(state.touch_2.to_primitive()),
            ],
        }
    }
}
