use packed_struct::prelude::*;
use thiserror::Error;

use super::{
    driver::OUTPUT_REPORT_SIZE,
    hid_report::OutputReport,
    layout::{ConnectionMode, LayoutProfile},
};

/// Possible errors when encoding an output report
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("output reports are not supported over a {0} connection")]
    UnsupportedTransport(ConnectionMode),
    #[error("unable to pack output report: {0:?}")]
    PackingError(#[from] PackingError),
}

/// Speeds of the two rumble motors from 0.0 to 1.0
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MotorSpeeds {
    /// Strong (left) motor
    pub low_frequency: f32,
    /// Weak (right) motor
    pub high_frequency: f32,
}

/// Light bar color with channels from 0.0 to 1.0
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }
}

/// A command for the controller. Groups left unset are not flagged in the
/// output report and the controller keeps their current values.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct OutputCommand {
    pub rumble: Option<MotorSpeeds>,
    pub color: Option<Color>,
}

impl OutputCommand {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_motor_speeds(mut self, low_frequency: f32, high_frequency: f32) -> Self {
        self.set_motor_speeds(low_frequency, high_frequency);
        self
    }

    pub fn with_color(mut self, r: f32, g: f32, b: f32) -> Self {
        self.set_color(r, g, b);
        self
    }

    pub fn set_motor_speeds(&mut self, low_frequency: f32, high_frequency: f32) {
        self.rumble = Some(MotorSpeeds {
            low_frequency,
            high_frequency,
        });
    }

    pub fn set_color(&mut self, r: f32, g: f32, b: f32) {
        self.color = Some(Color::new(r, g, b));
    }

    /// Build the output report for this command
    pub fn to_report(&self) -> OutputReport {
        let mut report = OutputReport::default();
        if let Some(rumble) = self.rumble {
            report.allow_rumble = true;
            report.rumble_strong = scale_unit(rumble.low_frequency);
            report.rumble_weak = scale_unit(rumble.high_frequency);
        }
        if let Some(color) = self.color {
            report.allow_led_color = true;
            report.led_red = scale_unit(color.r);
            report.led_green = scale_unit(color.g);
            report.led_blue = scale_unit(color.b);
        }
        report
    }
}

/// Scale a 0.0 - 1.0 value to a byte, rounding to the nearest value. Values
/// outside the range are clamped and NaN maps to 0.
pub fn scale_unit(value: f32) -> u8 {
    if !(0.0..=1.0).contains(&value) {
        log::trace!("Clamping out of range value: {value}");
    }
    (value * u8::MAX as f32).round().clamp(0.0, u8::MAX as f32) as u8
}

/// Encode the command into a raw output report. Only wired connections
/// have an output path.
pub fn encode(
    command: &OutputCommand,
    profile: &LayoutProfile,
) -> Result<[u8; OUTPUT_REPORT_SIZE], OutputError> {
    let mode = profile.mode();
    if mode != ConnectionMode::Wired {
        return Err(OutputError::UnsupportedTransport(mode));
    }

    let report = command.to_report();
    log::trace!("Encoding output report: {report:?}");
    Ok(report.pack()?)
}
