mod local;

pub use local::CommandDispatcher;

use log::{debug, warn};

use aster_types::Command;

use crate::popup::PopupRegistry;

/// Dispatch a parsed command and produce the response text.
///
/// Never fails: requests that cannot be acted on are answered with a
/// description of the problem. An empty response means "handled".
pub fn dispatch_command(command: &Command, popups: &mut dyn PopupRegistry) -> String {
    match command {
        Command::TogglePopup(id) => match popups.toggle(id) {
            Some(visible) => {
                debug!("popup {} is now {}", id, if visible { "shown" } else { "hidden" });
                String::new()
            }
            None => {
                warn!("toggle-popup: no popup named {}", id);
                format!("no such popup: {}", id)
            }
        },
        Command::Unknown(raw) => {
            warn!("unknown command {:?}", raw);
            unknown_command(command.name())
        }
    }
}

fn unknown_command(name: &str) -> String {
    if name.is_empty() {
        "unknown command".to_string()
    } else {
        format!("unknown command: {}", name)
    }
}
