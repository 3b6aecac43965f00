/// Notification popups are transient and driven by the notification daemon,
/// so there is nothing to register for the command channel.
pub fn build() {
    log::info!("notification popups constructed");
}
