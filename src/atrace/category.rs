/*!
 * Category Flags
 * Per-category enabled bits read lock-free by producers
 *
 * The registry itself is owned by the sink and only mutated while the
 * shared lock is held; producers keep `Arc<Category>` handles and poll the
 * atomic flag byte on the hot path.
 */

use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;

/// Bit set of reasons a category is enabled
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct CategoryFlags(u8);

impl CategoryFlags {
    pub const NONE: CategoryFlags = CategoryFlags(0);
    /// Enabled for the in-process recording buffer
    pub const RECORDING: CategoryFlags = CategoryFlags(1 << 0);
    /// Enabled because the atrace sink is open
    pub const ATRACE: CategoryFlags = CategoryFlags(1 << 1);

    #[inline]
    pub const fn from_bits(bits: u8) -> Self {
        CategoryFlags(bits)
    }

    #[inline]
    pub const fn bits(self) -> u8 {
        self.0
    }

    #[inline]
    pub const fn contains(self, other: CategoryFlags) -> bool {
        self.0 & other.0 == other.0
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub fn insert(&mut self, other: CategoryFlags) {
        self.0 |= other.0;
    }

    #[inline]
    pub fn remove(&mut self, other: CategoryFlags) {
        self.0 &= !other.0;
    }

    #[inline]
    pub fn set(&mut self, other: CategoryFlags, value: bool) {
        if value {
            self.insert(other);
        } else {
            self.remove(other);
        }
    }
}

impl std::ops::BitOr for CategoryFlags {
    type Output = CategoryFlags;

    fn bitor(self, rhs: Self) -> Self {
        CategoryFlags(self.0 | rhs.0)
    }
}

/// A registered category and its current flags
#[derive(Debug)]
pub struct Category {
    name: String,
    flags: AtomicU8,
}

impl Category {
    fn new(name: &str, flags: CategoryFlags) -> Self {
        Self {
            name: name.to_string(),
            flags: AtomicU8::new(flags.bits()),
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn flags(&self) -> CategoryFlags {
        CategoryFlags::from_bits(self.flags.load(Ordering::Relaxed))
    }

    /// Any reason to emit events for this category
    #[inline]
    pub fn is_enabled(&self) -> bool {
        !self.flags().is_empty()
    }

    #[inline]
    pub fn is_enabled_for_atrace(&self) -> bool {
        self.flags().contains(CategoryFlags::ATRACE)
    }

    pub(crate) fn store(&self, flags: CategoryFlags) {
        self.flags.store(flags.bits(), Ordering::Relaxed);
    }
}

/// Registry of known categories
///
/// Lives behind the sink's lock; see [`crate::atrace::AtraceLock`].
#[derive(Debug, Default)]
pub struct CategoryRegistry {
    categories: Vec<Arc<Category>>,
}

impl CategoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a category by name
    pub fn get(&self, name: &str) -> Option<Arc<Category>> {
        self.categories.iter().find(|c| c.name == name).cloned()
    }

    /// Return the existing handle for `name` or register it with `initial`
    pub(crate) fn get_or_insert(&mut self, name: &str, initial: CategoryFlags) -> Arc<Category> {
        if let Some(existing) = self.get(name) {
            return existing;
        }
        let category = Arc::new(Category::new(name, initial));
        self.categories.push(Arc::clone(&category));
        category
    }

    /// Rewrite every category's flags through `f`
    pub(crate) fn update_all(&self, mut f: impl FnMut(&mut CategoryFlags)) {
        for category in &self.categories {
            let mut flags = category.flags();
            f(&mut flags);
            category.store(flags);
        }
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<Category>> {
        self.categories.iter()
    }
}
