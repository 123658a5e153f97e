pub mod device;
pub mod report;

use std::{error::Error, io, path::PathBuf};

use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use device::{handle_devices, handle_led, handle_monitor, handle_rumble};
use report::handle_decode;

use crate::{
    config::DeviceConfig, drivers::dualshock4::layout::ConnectionMode, registry::Registry,
};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Device config file to register ahead of the installed configs
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
    #[command(subcommand)]
    pub cmd: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// List connected HID devices handled by a registered codec
    Devices {
        /// Also list devices without a matching codec
        #[arg(long, action)]
        all: bool,
    },
    /// Print input events read from a device until interrupted
    Monitor {
        /// Path to the hidraw device (e.g. "/dev/hidraw0")
        path: String,
    },
    /// Decode a hex encoded input report
    Decode {
        /// Report bytes as hex (e.g. "01 80 80 ..." or "018080...")
        hex: String,
        /// Layout to decode the report with
        #[arg(long, value_enum, default_value_t = Mode::Wired)]
        mode: Mode,
    },
    /// Set the color of the light bar
    Led {
        /// Path to the hidraw device (e.g. "/dev/hidraw0")
        path: String,
        /// Red intensity from 0.0 to 1.0
        r: f32,
        /// Green intensity from 0.0 to 1.0
        g: f32,
        /// Blue intensity from 0.0 to 1.0
        b: f32,
    },
    /// Set the speed of the rumble motors
    Rumble {
        /// Path to the hidraw device (e.g. "/dev/hidraw0")
        path: String,
        /// Low frequency (strong) motor speed from 0.0 to 1.0
        low: f32,
        /// High frequency (weak) motor speed from 0.0 to 1.0
        high: f32,
    },
    /// Generate shell completions
    Completions { shell: Shell },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// USB connection
    Wired,
    /// Bluetooth connection
    Wireless,
}

impl From<Mode> for ConnectionMode {
    fn from(value: Mode) -> Self {
        match value {
            Mode::Wired => ConnectionMode::Wired,
            Mode::Wireless => ConnectionMode::Wireless,
        }
    }
}

pub async fn main_cli(args: Args) -> Result<(), Box<dyn Error + Send + Sync>> {
    let Some(cmd) = args.cmd else {
        let mut command = Args::command();
        command.print_help()?;
        return Ok(());
    };

    match cmd {
        Commands::Devices { all } => {
            let registry = load_registry(args.config)?;
            handle_devices(&registry, all)?
        }
        Commands::Monitor { path } => {
            let registry = load_registry(args.config)?;
            handle_monitor(registry, path).await?
        }
        Commands::Decode { hex, mode } => handle_decode(hex.as_str(), mode.into())?,
        Commands::Led { path, r, g, b } => {
            let registry = load_registry(args.config)?;
            handle_led(&registry, path, r, g, b)?
        }
        Commands::Rumble { path, low, high } => {
            let registry = load_registry(args.config)?;
            handle_rumble(&registry, path, low, high)?
        }
        Commands::Completions { shell } => {
            let mut command = Args::command();
            let name = command.get_name().to_string();
            clap_complete::generate(shell, &mut command, name, &mut io::stdout());
        }
    }

    Ok(())
}

/// Build the device registry, placing the given config file first
pub fn load_registry(config: Option<PathBuf>) -> Result<Registry, Box<dyn Error + Send + Sync>> {
    let mut registry = Registry::new();
    if let Some(path) = config {
        let config = DeviceConfig::from_yaml_path(&path)?;
        if !registry.register_config(config) {
            return Err(format!("Device config {path:?} names an unknown codec").into());
        }
    }
    for registration in Registry::init().registrations() {
        registry.register(registration.config.clone(), registration.constructor);
    }

    Ok(registry)
}
