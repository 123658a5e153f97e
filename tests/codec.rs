use std::error::Error;

use ds4_codec::{
    drivers::dualshock4::{
        driver::{DS4_PID, DS4_VID, INPUT_REPORT_SIZE},
        layout::ConnectionMode,
        output::{OutputCommand, OutputError},
        Codec,
    },
    info::DeviceMetadata,
    registry::Registry,
};

/// Wired report with the cross button held, the left stick pushed up and one
/// finger on the touchpad.
fn wired_report() -> Vec<u8> {
    let mut buf = vec![0; INPUT_REPORT_SIZE];
    buf[0] = 0x01;
    buf[1..=4].copy_from_slice(&[0x80, 0x00, 0x80, 0x80]);
    buf[5] = 0x28;
    buf[35..=38].copy_from_slice(&[0x7F, 0xC5, 0x23, 0x4B]);
    buf[39] = 0x80;
    buf
}

#[test]
fn test_attach_and_decode() -> Result<(), Box<dyn Error>> {
    let registry = Registry::init();

    let wired = DeviceMetadata::new(DS4_VID, DS4_PID).with_version("256");
    let codec = registry.attach(&wired).ok_or("wired device not supported")?;
    assert_eq!(codec.profile().mode(), ConnectionMode::Wired);

    let report = wired_report();
    let state = codec.decode(&report)?;
    assert!(state.buttons.south);
    assert_eq!(state.left_stick.y(), 1.0);
    assert_eq!(state.left_stick.x(), 0.5);
    let touch = state.touch(0).ok_or("missing touch slot")?;
    assert!(touch.is_touching);
    assert_eq!(touch.contact_id, 127);
    assert_eq!(touch.position(), (965, 1202));
    assert!(state.touch(2).is_none());

    // Same report received over a wireless connection
    let wireless = DeviceMetadata::new(DS4_VID, DS4_PID).with_version("0x0000");
    let codec = registry.attach(&wireless).ok_or("wireless device not supported")?;
    assert_eq!(codec.profile().mode(), ConnectionMode::Wireless);

    let mut shifted = vec![0x11, 0xC0];
    shifted.extend_from_slice(&report);
    assert_eq!(codec.decode(&shifted)?, state);

    Ok(())
}

#[test]
fn test_encode_output() -> Result<(), Box<dyn Error>> {
    let command = OutputCommand::new()
        .with_motor_speeds(1.0, 0.0)
        .with_color(0.0, 0.0, 1.0);

    let codec = Codec::attach(&DeviceMetadata::new(DS4_VID, DS4_PID).with_version("256"));
    let buf = codec.encode(&command)?;
    assert_eq!(&buf[..11], &[0x11, 0x80, 0x00, 0x03, 0x00, 0x00, 0x00, 0xFF, 0x00, 0x00, 0xFF]);

    let codec = Codec::attach(&DeviceMetadata::new(DS4_VID, DS4_PID).with_version("1"));
    let result = codec.encode(&command);
    assert!(matches!(result, Err(OutputError::UnsupportedTransport(_))));

    Ok(())
}
