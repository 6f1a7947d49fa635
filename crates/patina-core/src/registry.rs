//! Per-widget side tables.
//!
//! A [`WidgetRegistry`] associates foreign widget handles with engine-specific
//! data. The registry never owns the widget; entries are kept alive strictly
//! between registration and the widget's destroy notification. Every entry
//! carries a [`HookSet`] recording which foreign notification channels were
//! subscribed for it, so teardown happens exactly once no matter which path
//! removes the entry.

use ahash::HashMap;
use tracing::warn;

use crate::WidgetHandle;

bitflags::bitflags! {
    /// Foreign notification channels an entry is subscribed to.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Hooks: u8 {
        const DESTROY = 1 << 0;
        const STYLE_CHANGE = 1 << 1;
        const ENTER_LEAVE = 1 << 2;
        const MOTION = 1 << 3;
    }
}

/// Scoped subscription bookkeeping for one registry entry.
///
/// Replaces the per-signal integer ids of a raw toolkit binding with a single
/// record that disarms on drop. Explicit [`HookSet::disarm`] exists for paths
/// that must tear down before the entry goes away; disarming twice is a logic
/// error caught in debug builds.
#[derive(Debug)]
pub struct HookSet {
    hooks: Hooks,
    armed: bool,
}

impl HookSet {
    fn new(hooks: Hooks) -> Self {
        HookSet {
            hooks,
            armed: !hooks.is_empty(),
        }
    }

    pub fn hooks(&self) -> Hooks {
        self.hooks
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    /// Tear down the subscriptions.
    pub fn disarm(&mut self) {
        debug_assert!(
            self.armed || self.hooks.is_empty(),
            "hook set disarmed twice"
        );
        self.armed = false;
    }
}

impl Drop for HookSet {
    fn drop(&mut self) {
        // RAII path: dropping the entry tears the subscriptions down.
        self.armed = false;
    }
}

#[derive(Debug)]
struct Entry<T> {
    data: T,
    hooks: HookSet,
}

/// Generic association of widget handles to per-widget engine data.
#[derive(Debug)]
pub struct WidgetRegistry<T> {
    entries: HashMap<WidgetHandle, Entry<T>>,
}

impl<T: Default> WidgetRegistry<T> {
    pub fn new() -> Self {
        WidgetRegistry {
            entries: HashMap::default(),
        }
    }

    /// Register a widget with no notification subscriptions.
    ///
    /// Returns false (without side effects) when the handle is null or
    /// already present.
    pub fn register(&mut self, widget: WidgetHandle) -> bool {
        self.register_with_hooks(widget, Hooks::empty())
    }

    /// Register a widget, subscribing it to the given notification channels.
    pub fn register_with_hooks(&mut self, widget: WidgetHandle, hooks: Hooks) -> bool {
        if widget.is_null() || self.entries.contains_key(&widget) {
            return false;
        }
        self.entries.insert(
            widget,
            Entry {
                data: T::default(),
                hooks: HookSet::new(hooks),
            },
        );
        true
    }

    /// Unregister a widget the caller knows is present.
    ///
    /// Unregistering an absent widget is a programming error: callers are
    /// expected to track membership. Debug builds assert; release builds log
    /// and continue.
    pub fn unregister(&mut self, widget: WidgetHandle) {
        match self.entries.remove(&widget) {
            Some(mut entry) => entry.hooks.disarm(),
            None => {
                debug_assert!(false, "unregister of untracked widget {widget}");
                warn!(%widget, "unregister of untracked widget");
            }
        }
    }

    /// Remove a widget if present, returning its data.
    ///
    /// This is the safe no-op variant used by destruction fan-out, where most
    /// registries never contained the widget.
    pub fn remove(&mut self, widget: WidgetHandle) -> Option<T> {
        self.entries.remove(&widget).map(|mut entry| {
            entry.hooks.disarm();
            entry.data
        })
    }

    pub fn contains(&self, widget: WidgetHandle) -> bool {
        self.entries.contains_key(&widget)
    }

    /// Get-or-default access to a widget's data.
    ///
    /// Creates a default entry (with no subscriptions) on first access; call
    /// sites use this for lazy initialization.
    pub fn value(&mut self, widget: WidgetHandle) -> &mut T {
        &mut self
            .entries
            .entry(widget)
            .or_insert_with(|| Entry {
                data: T::default(),
                hooks: HookSet::new(Hooks::empty()),
            })
            .data
    }

    pub fn get(&self, widget: WidgetHandle) -> Option<&T> {
        self.entries.get(&widget).map(|entry| &entry.data)
    }

    pub fn get_mut(&mut self, widget: WidgetHandle) -> Option<&mut T> {
        self.entries.get_mut(&widget).map(|entry| &mut entry.data)
    }

    pub fn hooks(&self, widget: WidgetHandle) -> Option<&HookSet> {
        self.entries.get(&widget).map(|entry| &entry.hooks)
    }

    pub fn iter(&self) -> impl Iterator<Item = (WidgetHandle, &T)> {
        self.entries.iter().map(|(&widget, entry)| (widget, &entry.data))
    }

    pub fn for_each(&mut self, mut f: impl FnMut(WidgetHandle, &mut T)) {
        for (&widget, entry) in self.entries.iter_mut() {
            f(widget, &mut entry.data);
        }
    }

    pub fn handles(&self) -> impl Iterator<Item = WidgetHandle> + '_ {
        self.entries.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl<T: Default> Default for WidgetRegistry<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default, PartialEq)]
    struct Data {
        count: u32,
    }

    #[test]
    fn test_register_rejects_null_and_duplicates() {
        let mut registry = WidgetRegistry::<Data>::new();
        let w = WidgetHandle::from_raw(1);

        assert!(!registry.register(WidgetHandle::NULL));
        assert!(registry.register(w));
        assert!(!registry.register(w));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_value_is_get_or_default() {
        let mut registry = WidgetRegistry::<Data>::new();
        let w = WidgetHandle::from_raw(7);

        assert!(!registry.contains(w));
        registry.value(w).count = 3;
        assert!(registry.contains(w));
        assert_eq!(registry.get(w), Some(&Data { count: 3 }));
    }

    #[test]
    fn test_remove_is_safe_noop_when_absent() {
        let mut registry = WidgetRegistry::<Data>::new();
        let w = WidgetHandle::from_raw(9);

        assert_eq!(registry.remove(w), None);
        registry.register(w);
        assert_eq!(registry.remove(w), Some(Data::default()));
        assert!(!registry.contains(w));
    }

    #[test]
    #[should_panic]
    #[cfg(debug_assertions)]
    fn test_unregister_absent_asserts() {
        let mut registry = WidgetRegistry::<Data>::new();
        registry.unregister(WidgetHandle::from_raw(4));
    }

    #[test]
    fn test_hooks_recorded_and_armed() {
        let mut registry = WidgetRegistry::<Data>::new();
        let w = WidgetHandle::from_raw(2);

        registry.register_with_hooks(w, Hooks::DESTROY | Hooks::STYLE_CHANGE);
        let hooks = registry.hooks(w).unwrap();
        assert!(hooks.is_armed());
        assert_eq!(hooks.hooks(), Hooks::DESTROY | Hooks::STYLE_CHANGE);
    }

    #[test]
    fn test_iteration() {
        let mut registry = WidgetRegistry::<Data>::new();
        for raw in 1..=3 {
            registry.register(WidgetHandle::from_raw(raw));
        }
        registry.for_each(|_, data| data.count += 1);
        assert!(registry.iter().all(|(_, data)| data.count == 1));
        assert_eq!(registry.handles().count(), 3);
    }
}
