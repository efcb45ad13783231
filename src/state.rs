//! Selected-index state for one wheel.

use std::fmt;
use std::ops::RangeInclusive;

use crate::error::PickerError;

/// Ordered, non-empty item list backing one wheel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WheelItems<T>(Vec<T>);

impl<T> WheelItems<T> {
    pub fn new(items: Vec<T>) -> Result<Self, PickerError> {
        if items.is_empty() {
            return Err(PickerError::EmptyItems);
        }
        Ok(Self(items))
    }

    /// For the built-in clock domains, which are never empty.
    pub(crate) fn from_known(items: Vec<T>) -> Self {
        debug_assert!(!items.is_empty());
        Self(items)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; kept for API symmetry with slices.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.0.get(index)
    }

    /// Item at `index`, falling back to the first item.
    pub fn get_or_first(&self, index: usize) -> &T {
        self.0.get(index).unwrap_or(&self.0[0])
    }

    pub fn last_index(&self) -> usize {
        self.0.len() - 1
    }
}

impl<T: PartialEq> WheelItems<T> {
    pub fn position(&self, item: &T) -> Option<usize> {
        self.0.iter().position(|candidate| candidate == item)
    }
}

impl WheelItems<u32> {
    /// Numeric wheel over `range`; an empty range is rejected.
    pub fn range(range: RangeInclusive<u32>) -> Result<Self, PickerError> {
        Self::new(range.collect())
    }
}

/// Handle returned by [`PickerState::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(usize)>;

/// Authoritative selected index of one wheel.
///
/// Writes are clamped into range and published synchronously to every
/// subscriber. Only the owning engine writes.
pub struct PickerState<T> {
    items: WheelItems<T>,
    selected_index: usize,
    version: u64,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
}

impl<T: fmt::Debug> fmt::Debug for PickerState<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PickerState")
            .field("items", &self.items)
            .field("selected_index", &self.selected_index)
            .field("version", &self.version)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl<T> PickerState<T> {
    /// `initial_index` is clamped like any other write.
    pub fn new(items: WheelItems<T>, initial_index: usize) -> Self {
        let selected_index = initial_index.min(items.last_index());
        Self {
            items,
            selected_index,
            version: 0,
            listeners: Vec::new(),
            next_subscription: 0,
        }
    }

    pub fn items(&self) -> &WheelItems<T> {
        &self.items
    }

    pub fn selected_index(&self) -> usize {
        self.selected_index
    }

    pub fn selected_item(&self) -> &T {
        self.items.get_or_first(self.selected_index)
    }

    /// Number of accepted writes so far.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Stores `new_index` clamped into range and notifies subscribers.
    pub(crate) fn update_selected_index(&mut self, new_index: usize) {
        let clamped = new_index.min(self.items.last_index());
        self.selected_index = clamped;
        self.version += 1;
        for (_, listener) in self.listeners.iter_mut() {
            listener(clamped);
        }
    }

    pub fn subscribe(&mut self, listener: impl FnMut(usize) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Returns false if `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(existing, _)| *existing != id);
        self.listeners.len() != before
    }
}
