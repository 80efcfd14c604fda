//! Fixed-capacity recycling pool for short-lived world objects.
//!
//! Slots live in a slab; a free-list stack hands indices out in O(1).
//! Exhaustion is non-fatal: the effect is simply skipped for a tick.

/// Objects a [`Pool`] can recycle
pub trait Poolable: Default {
    /// Restore default state; called on every slot before handoff
    fn reset(&mut self);
}

/// Opaque handle to an in-use pool slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PoolHandle(usize);

pub struct Pool<T> {
    items: Vec<T>,
    in_use: Vec<bool>,
    available: Vec<usize>,
    max_size: usize,
}

impl<T: Poolable> Pool<T> {
    /// Pre-allocate `initial_size` instances; the pool never grows past
    /// `max_size` live slots in total.
    pub fn new(initial_size: usize, max_size: usize) -> Self {
        let initial_size = initial_size.min(max_size);
        let mut items = Vec::with_capacity(initial_size);
        let mut available = Vec::with_capacity(initial_size);
        for i in 0..initial_size {
            items.push(T::default());
            available.push(i);
        }
        Self {
            in_use: vec![false; initial_size],
            items,
            available,
            max_size,
        }
    }

    /// Take a slot: pop an available one, or construct a new instance while
    /// under the cap. Returns `None` (logged) when the pool is exhausted.
    pub fn obtain(&mut self) -> Option<PoolHandle> {
        let index = if let Some(index) = self.available.pop() {
            index
        } else if self.items.len() < self.max_size {
            self.items.push(T::default());
            self.in_use.push(false);
            self.items.len() - 1
        } else {
            log::warn!("pool exhausted ({} slots in use)", self.max_size);
            return None;
        };
        self.items[index].reset();
        self.in_use[index] = true;
        Some(PoolHandle(index))
    }

    /// Return a slot to the available set. No-op for slots not in use.
    pub fn free(&mut self, handle: PoolHandle) {
        if self.in_use.get(handle.0).copied().unwrap_or(false) {
            self.in_use[handle.0] = false;
            self.available.push(handle.0);
        }
    }

    pub fn get(&self, handle: PoolHandle) -> Option<&T> {
        if self.in_use.get(handle.0).copied().unwrap_or(false) {
            self.items.get(handle.0)
        } else {
            None
        }
    }

    pub fn get_mut(&mut self, handle: PoolHandle) -> Option<&mut T> {
        if self.in_use.get(handle.0).copied().unwrap_or(false) {
            self.items.get_mut(handle.0)
        } else {
            None
        }
    }

    pub fn iter_in_use(&self) -> impl Iterator<Item = (PoolHandle, &T)> {
        self.items
            .iter()
            .enumerate()
            .filter(|(i, _)| self.in_use[*i])
            .map(|(i, item)| (PoolHandle(i), item))
    }

    pub fn iter_in_use_mut(&mut self) -> impl Iterator<Item = (PoolHandle, &mut T)> {
        let in_use = &self.in_use;
        self.items
            .iter_mut()
            .enumerate()
            .filter(move |(i, _)| in_use[*i])
            .map(|(i, item)| (PoolHandle(i), item))
    }

    pub fn in_use_count(&self) -> usize {
        self.items.len() - self.available.len()
    }

    pub fn available_count(&self) -> usize {
        self.available.len()
    }

    /// Total allocated slots (in use + available)
    pub fn allocated(&self) -> usize {
        self.items.len()
    }
}
