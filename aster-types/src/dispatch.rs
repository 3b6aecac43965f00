//! Request handler abstraction for the command channel.

/// Synchronous handler for command channel requests.
///
/// Implementations answer every request with a string; an empty string means
/// "handled, no payload". Handlers must not fail: anything they cannot act on
/// is reported in the response text instead.
pub trait RequestHandler {
    fn handle(&mut self, request: &str) -> String;
}

impl<F> RequestHandler for F
where
    F: FnMut(&str) -> String,
{
    fn handle(&mut self, request: &str) -> String {
        self(request)
    }
}
