//! CommandDispatcher: RequestHandler implementation for the command channel.

use aster_types::{Command, RequestHandler};

use crate::popup::PopupRegistry;

use super::dispatch_command;

/// Stateless request handler: parses each request line and routes it.
///
/// Owns only the popup registry it delegates visibility changes to; nothing
/// is remembered between requests.
pub struct CommandDispatcher<P> {
    popups: P,
}

impl<P: PopupRegistry> CommandDispatcher<P> {
    pub fn new(popups: P) -> Self {
        Self { popups }
    }

    pub fn dispatch(&mut self, command: &Command) -> String {
        dispatch_command(command, &mut self.popups)
    }

    pub fn popups(&self) -> &P {
        &self.popups
    }
}

impl<P: PopupRegistry> RequestHandler for CommandDispatcher<P> {
    fn handle(&mut self, request: &str) -> String {
        self.dispatch(&Command::parse(request))
    }
}
