//! Detached process launching.

use crate::error::LauncherError;
use log::{info, warn};
use std::os::unix::process::CommandExt;
use std::process::{Command, Stdio};

/// Launch tweaks that depend on the shell around the launcher.
#[derive(Clone, Debug)]
pub struct LaunchOptions {
    /// Screenshot tool that must wait for the launcher to hide.
    pub screenshot_command: String,
    /// Delay handed to the screenshot tool, in milliseconds.
    pub screenshot_delay_ms: u32,
}

impl Default for LaunchOptions {
    fn default() -> Self {
        Self {
            screenshot_command: "cutefish-screenshot".to_string(),
            screenshot_delay_ms: 200,
        }
    }
}

/// Split args into program and arguments, applying launch tweaks.
pub fn build_command(args: &[String], options: &LaunchOptions) -> Option<(String, Vec<String>)> {
    let (program, rest) = args.split_first()?;
    if program.is_empty() {
        return None;
    }

    // The launcher plays a hide animation, so the screenshot has to wait for it.
    let arguments = if *program == options.screenshot_command {
        vec!["-d".to_string(), options.screenshot_delay_ms.to_string()]
    } else {
        rest.to_vec()
    };

    Some((program.clone(), arguments))
}

/// Start the entry's command as a detached child and return its pid.
/// stdin is closed; stdout and stderr go wherever ours go.
pub fn spawn_detached(id: &str, args: &[String], options: &LaunchOptions) -> Result<u32, LauncherError> {
    let (program, arguments) =
        build_command(args, options).ok_or_else(|| LauncherError::EmptyCommand(id.to_string()))?;

    let mut child = Command::new(&program)
        .args(&arguments)
        .stdin(Stdio::null())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .process_group(0)
        .spawn()
        .map_err(|source| LauncherError::Spawn {
            program: program.clone(),
            source,
        })?;

    let pid = child.id();
    info!("Launched {} (pid {})", program, pid);

    // Reap the child so it does not linger as a zombie.
    if let Err(e) = std::thread::Builder::new()
        .name("launch-reaper".to_string())
        .spawn(move || {
            let _ = child.wait();
        })
    {
        warn!("Failed to spawn reaper for {}: {}", program, e);
    }

    Ok(pid)
}
