/*!
 * Best-effort desktop notification for fatal errors
 */

use std::process::{Command, Stdio};

use log::debug;

/// Title of the error dialog
pub const DIALOG_TITLE: &str = "Error en Arbre Directoris";

/// Something that can show an error to the user outside the terminal.
///
/// Implementations swallow their own failures.
pub trait Notifier {
    /// Show `message`
    fn notify(&self, message: &str);
}

/// Shows an error dialog through `zenity`
#[derive(Debug, Default, Clone, Copy)]
pub struct ZenityNotifier;

impl Notifier for ZenityNotifier {
    fn notify(&self, message: &str) {
        let text = format!("--text={}", message);
        let title = format!("--title={}", DIALOG_TITLE);

        let result = Command::new("zenity")
            .args(["--error", text.as_str(), title.as_str()])
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status();

        match result {
            Ok(status) if status.success() => {}
            Ok(status) => debug!("zenity exited with {}", status),
            Err(e) => debug!("Failed to spawn zenity: {}", e),
        }
    }
}

/// Discards every notification
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopNotifier;

impl Notifier for NoopNotifier {
    fn notify(&self, _message: &str) {}
}

/// Notifier selected by the configuration
pub fn notifier(enabled: bool) -> Box<dyn Notifier> {
    if enabled {
        Box::new(ZenityNotifier)
    } else {
        Box::new(NoopNotifier)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    struct Recording(RefCell<Vec<String>>);

    impl Notifier for Recording {
        fn notify(&self, message: &str) {
            self.0.borrow_mut().push(message.to_string());
        }
    }

    #[test]
    fn test_notifier_capability() {
        let recording = Recording(RefCell::new(Vec::new()));
        let as_dyn: &dyn Notifier = &recording;
        as_dyn.notify("disk full");
        assert_eq!(*recording.0.borrow(), vec!["disk full".to_string()]);
    }

    #[test]
    fn test_disabled_notifier_is_silent() {
        // Must not spawn anything or panic
        notifier(false).notify("ignored");
    }
}
