//! Command channel grammar.
//!
//! A request is a single line split on whitespace runs: the first word names
//! the command, the rest are its arguments. There is no quoting or escaping.
//! Parsing never fails; anything that is not a recognized command becomes
//! [`Command::Unknown`].

use crate::SurfaceId;

pub const TOGGLE_POPUP: &str = "toggle-popup";

/// A parsed command channel request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Flip the visibility of the popup window named by the first argument.
    TogglePopup(SurfaceId),
    /// Anything else, kept verbatim so it can be reported back.
    Unknown(String),
}

impl Command {
    pub fn parse(request: &str) -> Command {
        let mut words = request.split_whitespace();
        let name = words.next().unwrap_or("");

        match name {
            TOGGLE_POPUP => match words.next() {
                Some(id) => Command::TogglePopup(SurfaceId::new(id)),
                None => Command::Unknown(request.to_string()),
            },
            _ => Command::Unknown(request.to_string()),
        }
    }

    /// The command word, as it would appear first on the wire.
    pub fn name(&self) -> &str {
        match self {
            Command::TogglePopup(_) => TOGGLE_POPUP,
            Command::Unknown(raw) => raw.split_whitespace().next().unwrap_or(""),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_toggle_popup() {
        assert_eq!(
            Command::parse("toggle-popup bar-popup"),
            Command::TogglePopup(SurfaceId::new("bar-popup"))
        );
    }

    #[test]
    fn whitespace_runs_separate_arguments() {
        assert_eq!(
            Command::parse("  toggle-popup \t  launcher  "),
            Command::TogglePopup(SurfaceId::new("launcher"))
        );
    }

    #[test]
    fn extra_arguments_are_ignored() {
        assert_eq!(
            Command::parse("toggle-popup panel now"),
            Command::TogglePopup(SurfaceId::new("panel"))
        );
    }

    #[test]
    fn missing_id_is_unknown() {
        let cmd = Command::parse("toggle-popup");
        assert_eq!(cmd, Command::Unknown("toggle-popup".into()));
        assert_eq!(cmd.name(), "toggle-popup");
    }

    #[test]
    fn empty_request_is_unknown() {
        let cmd = Command::parse("");
        assert_eq!(cmd, Command::Unknown(String::new()));
        assert_eq!(cmd.name(), "");
    }

    #[test]
    fn unrecognized_name_is_kept() {
        let cmd = Command::parse("reload-css --force");
        assert_eq!(cmd.name(), "reload-css");
        assert_eq!(cmd, Command::Unknown("reload-css --force".into()));
    }

    #[test]
    fn command_names_are_case_sensitive() {
        assert!(matches!(Command::parse("Toggle-Popup x"), Command::Unknown(_)));
    }
}
