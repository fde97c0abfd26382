mod age;
mod config;
mod github;
mod logging;
mod stats;
mod template;
mod update;

use config::Config;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    logging::init_logger();

    let result = match Config::from_env() {
        Ok(config) => {
            tracing::debug!(?config, "Loaded configuration");
            update::update_readme(&config)
                .await
                .map(|()| config.output_path)
        }
        Err(e) => Err(e),
    };

    match result {
        Ok(output) => {
            tracing::info!(output = %output.display(), "Template updated successfully");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("Error updating template: {e:#}");
            ExitCode::FAILURE
        }
    }
}
