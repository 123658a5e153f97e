use std::error::Error;

use tabled::{
    settings::{Panel, Style},
    Table, Tabled,
};

use crate::drivers::dualshock4::{
    codec::Codec,
    layout::{ConnectionMode, LayoutProfile},
    state::GamepadState,
};

#[derive(Tabled)]
struct FieldRow {
    #[tabled(rename = "Field")]
    field: String,
    #[tabled(rename = "Value")]
    value: String,
}

impl FieldRow {
    fn new(field: &str, value: impl ToString) -> Self {
        Self {
            field: field.to_string(),
            value: value.to_string(),
        }
    }
}

/// Parse a hex string into bytes. Whitespace, ':' and ',' separators and a
/// leading "0x" are ignored.
pub fn parse_hex(hex: &str) -> Result<Vec<u8>, Box<dyn Error + Send + Sync>> {
    let hex = hex.trim();
    let hex = hex.strip_prefix("0x").unwrap_or(hex);
    let digits: Vec<char> = hex
        .chars()
        .filter(|c| !c.is_whitespace() && *c != ':' && *c != ',')
        .collect();
    if digits.len() % 2 != 0 {
        return Err(format!("Odd number of hex digits: {}", digits.len()).into());
    }

    let mut bytes = Vec::with_capacity(digits.len() / 2);
    for pair in digits.chunks(2) {
        let pair: String = pair.iter().collect();
        let byte = u8::from_str_radix(pair.as_str(), 16)
            .map_err(|e| format!("Invalid hex byte '{pair}': {e}"))?;
        bytes.push(byte);
    }

    Ok(bytes)
}

/// Decode the given hex encoded report and print every field
pub fn handle_decode(hex: &str, mode: ConnectionMode) -> Result<(), Box<dyn Error + Send + Sync>> {
    let bytes = parse_hex(hex)?;
    let codec = Codec::new(LayoutProfile::new(mode));
    let state = codec.decode(bytes.as_slice())?;

    let mut table = Table::new(state_rows(&state));
    table
        .with(Style::modern_rounded())
        .with(Panel::header(format!("Input Report ({mode})")));
    println!("{table}");

    Ok(())
}

fn state_rows(state: &GamepadState) -> Vec<FieldRow> {
    let buttons = &state.buttons;
    let pressed: Vec<&str> = [
        (buttons.south, "Cross"),
        (buttons.east, "Circle"),
        (buttons.west, "Square"),
        (buttons.north, "Triangle"),
        (buttons.l1, "L1"),
        (buttons.r1, "R1"),
        (buttons.l2, "L2"),
        (buttons.r2, "R2"),
        (buttons.select, "Share"),
        (buttons.start, "Options"),
        (buttons.l3, "L3"),
        (buttons.r3, "R3"),
        (buttons.system, "PS"),
        (buttons.touchpad, "Touchpad"),
    ]
    .into_iter()
    .filter_map(|(is_pressed, name)| is_pressed.then_some(name))
    .collect();

    let stick = |x: f32, y: f32| format!("{x:.3}, {y:.3}");
    let mut rows = vec![
        FieldRow::new("Report ID", format!("{:#04x}", state.report_id)),
        FieldRow::new("Left Stick", stick(state.left_stick.x(), state.left_stick.y())),
        FieldRow::new(
            "Right Stick",
            stick(state.right_stick.x(), state.right_stick.y()),
        ),
        FieldRow::new(
            "DPad",
            format!("{:?} ({})", state.dpad.direction(), state.dpad.raw),
        ),
        FieldRow::new("Buttons", pressed.join(" ")),
        FieldRow::new("L2 Trigger", state.l2_trigger),
        FieldRow::new("R2 Trigger", state.r2_trigger),
        FieldRow::new("Counter", state.counter),
        FieldRow::new("Timestamp", state.timestamp),
        FieldRow::new(
            "Gyro",
            format!("{}, {}, {}", state.gyro.x, state.gyro.y, state.gyro.z),
        ),
        FieldRow::new(
            "Accelerometer",
            format!("{}, {}, {}", state.accel.x, state.accel.y, state.accel.z),
        ),
        FieldRow::new(
            "Battery",
            format!(
                "{}%{}",
                state.battery.percent(),
                if state.battery.charging { " (charging)" } else { "" }
            ),
        ),
        FieldRow::new("Touch Packets", state.touch_packets),
    ];
    for (index, touch) in state.touches.iter().enumerate() {
        let value = if touch.is_touching {
            format!("#{} at {}, {}", touch.contact_id, touch.x, touch.y)
        } else {
            "-".to_string()
        };
        rows.push(FieldRow::new(format!("Touch {index}").as_str(), value));
    }

    rows
}
