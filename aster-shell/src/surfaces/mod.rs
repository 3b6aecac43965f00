//! Construction entry points for the four UI surfaces.
//!
//! Rendering lives outside this crate; each surface here registers the popup
//! windows it owns so the command channel can toggle them.

mod bar;
mod launcher;
mod notifications;
mod panel;

use std::rc::Rc;

use aster_core::bootstrap::Surfaces;
use aster_core::popup::SharedPopups;

/// Entry points for every surface, sharing `popups`.
pub fn all(popups: &SharedPopups) -> Surfaces {
    let launcher_popups = Rc::clone(popups);
    let panel_popups = Rc::clone(popups);

    Surfaces {
        bar: Box::new(bar::build),
        launcher: Box::new(move || launcher::build(&launcher_popups)),
        notification_popups: Box::new(notifications::build),
        panel: Box::new(move || panel::build(&panel_popups)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aster_core::SurfaceId;

    #[test]
    fn building_all_registers_popups() {
        let popups = SharedPopups::default();
        assert_eq!(all(&popups).build_all(), 4);

        let registry = popups.borrow();
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.is_visible(&SurfaceId::new(launcher::POPUP)), Some(false));
        assert_eq!(registry.is_visible(&SurfaceId::new(panel::POPUP)), Some(false));
    }
}
