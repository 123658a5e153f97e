use std::error::Error;

use crate::drivers::dualshock4::{
    driver::translate,
    event::{
        AxisEvent, AxisInput, BatteryInput, BinaryInput, ButtonEvent, Event, TouchAxisInput,
        TriggerEvent, TriggerInput,
    },
    hid_report_test::sample_report,
    layout::LayoutProfile,
    state::{DPad, GamepadState},
};

#[test]
fn test_translate_unchanged() -> Result<(), Box<dyn Error>> {
    let state = GamepadState::decode(&sample_report(), &LayoutProfile::WIRED)?;
    assert!(translate(&state, &state).is_empty());

    Ok(())
}

#[test]
fn test_translate_changes() -> Result<(), Box<dyn Error>> {
    let old_state = GamepadState::default();
    let state = GamepadState::decode(&sample_report(), &LayoutProfile::WIRED)?;
    let events = translate(&old_state, &state);
    for event in events.iter() {
        println!("{event:?}");
    }

    let pressed = BinaryInput { pressed: true };
    assert!(events.contains(&Event::Button(ButtonEvent::Cross(pressed.clone()))));
    assert!(events.contains(&Event::Button(ButtonEvent::Options(pressed.clone()))));
    assert!(events.contains(&Event::Button(ButtonEvent::L1(pressed.clone()))));
    assert!(events.contains(&Event::Button(ButtonEvent::PadPress(pressed))));
    assert!(events.contains(&Event::Trigger(TriggerEvent::L2(TriggerInput {
        value: 64
    }))));
    assert!(events.contains(&Event::Trigger(TriggerEvent::R2(TriggerInput {
        value: 255
    }))));
    assert!(events.contains(&Event::Axis(AxisEvent::LStick(AxisInput {
        x: 0.0,
        y: 0.0
    }))));
    assert!(events.contains(&Event::Axis(AxisEvent::Pad(TouchAxisInput {
        index: 0,
        contact_id: 5,
        is_touching: true,
        x: 1919,
        y: 1068,
    }))));
    assert!(events.contains(&Event::Battery(BatteryInput {
        level: 8,
        charging: true
    })));

    // Unchanged values produce no events
    assert!(!events
        .iter()
        .any(|event| matches!(event, Event::Axis(AxisEvent::RStick(_)))));
    assert!(!events
        .iter()
        .any(|event| matches!(event, Event::Button(ButtonEvent::Circle(_)))));

    Ok(())
}

#[test]
fn test_translate_dpad() {
    let old_state = GamepadState::default();
    let state = GamepadState {
        dpad: DPad { raw: 1 },
        ..Default::default()
    };
    let events = translate(&old_state, &state);
    let pressed = BinaryInput { pressed: true };
    assert_eq!(
        events,
        vec![
            Event::Button(ButtonEvent::DPadUp(pressed.clone())),
            Event::Button(ButtonEvent::DPadRight(pressed)),
        ]
    );

    // Moving from north east to east releases up only
    let next = GamepadState {
        dpad: DPad { raw: 2 },
        ..Default::default()
    };
    let events = translate(&state, &next);
    assert_eq!(
        events,
        vec![Event::Button(ButtonEvent::DPadUp(BinaryInput {
            pressed: false
        }))]
    );
}
