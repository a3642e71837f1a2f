//! CapyLauncher - application launcher list for desktop shells
//!
//! Single owner task for the app list; scans, the directory watcher and the
//! console front-end all talk to it through messages.

mod console;
mod services;

use capy_apps::LauncherConfig;
use log::info;
use std::error::Error;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    info!("Starting CapyLauncher...");

    let config = LauncherConfig::load_default();
    let services = services::start_all(&config).await;

    console::run(&services.launcher).await?;

    info!("CapyLauncher exiting");
    Ok(())
}
