use aster_core::popup::SharedPopups;
use aster_core::SurfaceId;

/// Popup id toggled by `toggle-popup launcher`.
pub const POPUP: &str = "launcher";

pub fn build(popups: &SharedPopups) {
    popups.borrow_mut().register(SurfaceId::new(POPUP));
    log::info!("launcher constructed (hidden)");
}
