use std::borrow::Cow;

/// Position of a fragment in the assembled source.
///
/// Later slots override earlier ones under the cascade, so the declaration
/// order here is the order fragments are written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FragmentSlot {
    Misc,
    Bar,
    Panel,
    Notifications,
    Launcher,
}

impl FragmentSlot {
    pub const ORDER: [FragmentSlot; 5] = [
        FragmentSlot::Misc,
        FragmentSlot::Bar,
        FragmentSlot::Panel,
        FragmentSlot::Notifications,
        FragmentSlot::Launcher,
    ];

    fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            FragmentSlot::Misc => "misc",
            FragmentSlot::Bar => "bar",
            FragmentSlot::Panel => "panel",
            FragmentSlot::Notifications => "notifications",
            FragmentSlot::Launcher => "launcher",
        }
    }
}

/// One style-language block per slot. Empty slots contribute nothing.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FragmentSet {
    slots: [Cow<'static, str>; 5],
}

impl FragmentSet {
    /// The fragments compiled into the binary.
    pub fn builtin() -> Self {
        Self::empty()
            .with(FragmentSlot::Misc, include_str!("../../scss/misc.scss"))
            .with(FragmentSlot::Bar, include_str!("../../scss/bar.scss"))
            .with(FragmentSlot::Panel, include_str!("../../scss/panel.scss"))
            .with(FragmentSlot::Notifications, include_str!("../../scss/notif.scss"))
            .with(FragmentSlot::Launcher, include_str!("../../scss/launcher.scss"))
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with(mut self, slot: FragmentSlot, text: impl Into<Cow<'static, str>>) -> Self {
        self.slots[slot.index()] = text.into();
        self
    }

    pub fn get(&self, slot: FragmentSlot) -> &str {
        &self.slots[slot.index()]
    }

    /// Fragments in cascade order.
    pub fn iter(&self) -> impl Iterator<Item = (FragmentSlot, &str)> {
        FragmentSlot::ORDER
            .iter()
            .map(move |&slot| (slot, self.get(slot)))
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(|s| s.is_empty())
    }
}
