use aster_core::popup::SharedPopups;
use aster_core::SurfaceId;

/// Popup id toggled by `toggle-popup panel`.
pub const POPUP: &str = "panel";

pub fn build(popups: &SharedPopups) {
    popups.borrow_mut().register(SurfaceId::new(POPUP));
    log::info!("panel constructed (hidden)");
}
