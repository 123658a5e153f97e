//! Report codec for the Sony DualShock 4 controller over HID.
//!
//! Input reports are decoded into a [drivers::dualshock4::state::GamepadState]
//! using a [drivers::dualshock4::layout::LayoutProfile] that is selected once
//! when a device is attached. Output commands (rumble and light bar color) are
//! encoded into the wired output report format.
pub mod cli;
pub mod config;
pub mod drivers;
pub mod info;
pub mod registry;
