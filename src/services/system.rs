//! Desktop integration: browser launch and notifications

use tokio::process::Command;
use tracing::{debug, info};

/// Program and arguments that open `url` in the default browser
pub fn browser_command(url: &str) -> Result<(&'static str, Vec<String>), String> {
    if cfg!(target_os = "linux") {
        Ok(("xdg-open", vec![url.to_string()]))
    } else if cfg!(target_os = "macos") {
        Ok(("open", vec![url.to_string()]))
    } else if cfg!(target_os = "windows") {
        Ok(("rundll32", vec!["url.dll,FileProtocolHandler".to_string(), url.to_string()]))
    } else {
        Err("Opening a browser is not supported on this platform".to_string())
    }
}

/// Program and arguments that show a desktop notification
pub fn notification_command(title: &str, body: &str) -> Result<(&'static str, Vec<String>), String> {
    if cfg!(target_os = "linux") {
        Ok(("notify-send", vec![title.to_string(), body.to_string()]))
    } else if cfg!(target_os = "macos") {
        Ok((
            "osascript",
            vec![
                "-e".to_string(),
                format!("display notification {:?} with title {:?}", body, title),
            ],
        ))
    } else if cfg!(target_os = "windows") {
        Ok((
            "powershell",
            vec![
                "-Command".to_string(),
                format!(
                    "New-BurntToastNotification -Text '{}', '{}'",
                    title.replace('\'', "''"),
                    body.replace('\'', "''")
                ),
            ],
        ))
    } else {
        Err("Desktop notifications are not supported on this platform".to_string())
    }
}

/// Open `url` in the default browser
///
/// The launcher is spawned and not waited on.
pub async fn open_browser(url: &str) -> Result<(), String> {
    let (program, args) = browser_command(url)?;
    debug!("Opening browser with {} {:?}", program, args);

    Command::new(program)
        .args(&args)
        .spawn()
        .map_err(|e| format!("Failed to execute {}: {}", program, e))?;

    info!("Opened {} in the default browser", url);
    Ok(())
}

/// Show a desktop notification and wait for the helper to exit
pub async fn send_desktop_notification(title: &str, body: &str) -> Result<(), String> {
    let (program, args) = notification_command(title, body)?;
    debug!("Sending desktop notification with {}", program);

    let output = Command::new(program)
        .args(&args)
        .output()
        .await
        .map_err(|e| format!("Failed to execute {}: {}", program, e))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(format!("{} failed: {}", program, stderr));
    }

    info!("Desktop notification sent");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(target_os = "linux")]
    #[test]
    fn linux_commands() {
        let (program, args) = browser_command("http://127.0.0.1:8080/").unwrap();
        assert_eq!(program, "xdg-open");
        assert_eq!(args, vec!["http://127.0.0.1:8080/"]);

        let (program, args) = notification_command("Timer", "Time's up!").unwrap();
        assert_eq!(program, "notify-send");
        assert_eq!(args, vec!["Timer", "Time's up!"]);
    }

    #[cfg(target_os = "macos")]
    #[test]
    fn macos_notification_quotes_text() {
        let (program, args) = notification_command("Timer", "Time's up!").unwrap();
        assert_eq!(program, "osascript");
        assert_eq!(args[1], "display notification \"Time's up!\" with title \"Timer\"");
    }
}
