pub mod codec;
pub mod driver;
#[cfg(test)]
pub mod driver_test;
pub mod event;
pub mod hid_report;
pub mod layout;
pub mod output;
#[cfg(test)]
pub mod output_test;
pub mod state;

pub use codec::Codec;
