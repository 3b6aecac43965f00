pub fn build() {
    log::info!("bar constructed");
}
