use super::state::MotionAxes;

/// Events that can be emitted by the DualShock 4 controller
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    Button(ButtonEvent),
    Axis(AxisEvent),
    Trigger(TriggerEvent),
    Motion(MotionEvent),
    Battery(BatteryInput),
}

/// Binary input contain either pressed or unpressed
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BinaryInput {
    pub pressed: bool,
}

/// Button events represent binary inputs
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ButtonEvent {
    Cross(BinaryInput),
    Circle(BinaryInput),
    Square(BinaryInput),
    Triangle(BinaryInput),
    Share(BinaryInput),
    Options(BinaryInput),
    Guide(BinaryInput),
    DPadDown(BinaryInput),
    DPadUp(BinaryInput),
    DPadLeft(BinaryInput),
    DPadRight(BinaryInput),
    L1(BinaryInput),
    L2(BinaryInput),
    L3(BinaryInput),
    R1(BinaryInput),
    R2(BinaryInput),
    R3(BinaryInput),
    PadPress(BinaryInput),
}

/// Axis input contains normalized (x, y) values from 0.0 to 1.0 where up
/// and right are 1.0
#[derive(Clone, Debug, PartialEq)]
pub struct AxisInput {
    pub x: f32,
    pub y: f32,
}

/// Touch input for a single touch slot
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TouchAxisInput {
    pub index: u8,
    pub contact_id: u8,
    pub is_touching: bool,
    pub x: u16,
    pub y: u16,
}

/// Axis events are events that have (x, y) values
#[derive(Clone, Debug, PartialEq)]
pub enum AxisEvent {
    Pad(TouchAxisInput),
    LStick(AxisInput),
    RStick(AxisInput),
}

/// Trigger input contains non-negative integers
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TriggerInput {
    pub value: u8,
}

/// Trigger events contain positive values indicating how far a trigger is pulled
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TriggerEvent {
    L2(TriggerInput),
    R2(TriggerInput),
}

/// MotionInput represents the raw (x, y, z) values of a motion sensor
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MotionInput {
    pub x: i16,
    pub y: i16,
    pub z: i16,
}

impl From<MotionAxes> for MotionInput {
    fn from(value: MotionAxes) -> Self {
        Self {
            x: value.x,
            y: value.y,
            z: value.z,
        }
    }
}

/// MotionEvent has data from the gyro or accelerometer
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MotionEvent {
    /// Pitch, yaw, roll
    Gyro(MotionInput),
    Accelerometer(MotionInput),
}

/// Battery level (0-10) and charging state
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BatteryInput {
    pub level: u8,
    pub charging: bool,
}
