use anyhow::Result;

use linkshort::config::Config;
use linkshort::{logging, server};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let config = Config::from_env()?;
    config.validate()?;

    logging::init(&config.log_level, &config.log_format);

    server::run(config).await
}
