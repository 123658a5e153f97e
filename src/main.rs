use std::env;
use std::error::Error;

use clap::Parser;
use ds4_codec::cli::{main_cli, Args};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    let log_level = match env::var("LOG_LEVEL") {
        Ok(value) => value,
        Err(_) => "info".to_string(),
    };
    env::set_var("RUST_LOG", log_level);
    env_logger::init();

    let args = Args::parse();
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    log::debug!("Starting ds4-codec v{}", VERSION);

    main_cli(args).await
}
