use std::error::Error;

use crate::drivers::dualshock4::{
    driver::{OUTPUT_FLAG_COLOR, OUTPUT_FLAG_RUMBLE, OUTPUT_REPORT_SIZE},
    layout::{ConnectionMode, LayoutProfile},
    output::{encode, scale_unit, OutputCommand, OutputError},
};

#[test]
fn test_encode_rumble_and_color() -> Result<(), Box<dyn Error>> {
    let command = OutputCommand::new()
        .with_motor_speeds(1.5, -1.0)
        .with_color(2.0, -1.0, 0.5);
    let buf = encode(&command, &LayoutProfile::WIRED)?;

    assert_eq!(buf.len(), OUTPUT_REPORT_SIZE);
    assert_eq!(buf[0], 0x11);
    assert_eq!(buf[1], 0x80);
    assert_eq!(buf[3], OUTPUT_FLAG_RUMBLE | OUTPUT_FLAG_COLOR);
    // High frequency motor first, then low frequency
    assert_eq!(buf[6], 0);
    assert_eq!(buf[7], 255);
    assert_eq!(&buf[8..11], &[255, 0, 128]);

    Ok(())
}

#[test]
fn test_encode_flags() -> Result<(), Box<dyn Error>> {
    let buf = encode(&OutputCommand::new(), &LayoutProfile::WIRED)?;
    assert_eq!(buf[3], 0);
    assert!(buf[2..].iter().all(|b| *b == 0));

    let command = OutputCommand::new().with_motor_speeds(0.25, 0.75);
    let buf = encode(&command, &LayoutProfile::WIRED)?;
    assert_eq!(buf[3], OUTPUT_FLAG_RUMBLE);
    assert_eq!(buf[6], 191);
    assert_eq!(buf[7], 64);
    assert_eq!(&buf[8..11], &[0, 0, 0]);

    let command = OutputCommand::new().with_color(0.0, 1.0, 0.0);
    let buf = encode(&command, &LayoutProfile::WIRED)?;
    assert_eq!(buf[3], OUTPUT_FLAG_COLOR);
    assert_eq!(&buf[6..8], &[0, 0]);
    assert_eq!(&buf[8..11], &[0, 255, 0]);

    Ok(())
}

#[test]
fn test_encode_zero_padding() -> Result<(), Box<dyn Error>> {
    let command = OutputCommand::new()
        .with_motor_speeds(1.0, 1.0)
        .with_color(1.0, 1.0, 1.0);
    let buf = encode(&command, &LayoutProfile::WIRED)?;
    assert_eq!(buf[2], 0);
    assert_eq!(&buf[4..6], &[0, 0]);
    assert!(buf[11..].iter().all(|b| *b == 0));

    Ok(())
}

#[test]
fn test_encode_wireless_unsupported() {
    let command = OutputCommand::new().with_color(1.0, 0.0, 0.0);
    let result = encode(&command, &LayoutProfile::WIRELESS);
    assert!(matches!(
        result,
        Err(OutputError::UnsupportedTransport(ConnectionMode::Wireless))
    ));
}

#[test]
fn test_scale_unit() {
    assert_eq!(scale_unit(0.0), 0);
    assert_eq!(scale_unit(1.0), 255);
    assert_eq!(scale_unit(0.5), 128);
    assert_eq!(scale_unit(-0.1), 0);
    assert_eq!(scale_unit(10.0), 255);
    assert_eq!(scale_unit(f32::NAN), 0);
    assert_eq!(scale_unit(f32::INFINITY), 255);
    assert_eq!(scale_unit(f32::NEG_INFINITY), 0);
}

#[test]
fn test_set_overrides() {
    let mut command = OutputCommand::new().with_motor_speeds(1.0, 1.0);
    command.set_motor_speeds(0.0, 0.0);
    command.set_color(1.0, 1.0, 1.0);
    let report = command.to_report();
    assert!(report.allow_rumble);
    assert!(report.allow_led_color);
    assert_eq!(report.rumble_strong, 0);
    assert_eq!(report.led_blue, 255);
}
