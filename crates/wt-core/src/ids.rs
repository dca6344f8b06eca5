use core::fmt;
use core::num::NonZeroU32;

/// Identifies a line, text label or arrow on a plot surface.
///
/// Stored as `index + 1` so `Option<OverlayId>` costs nothing extra.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OverlayId(NonZeroU32);

impl OverlayId {
    /// 0-based creation index.
    pub fn index(self) -> u32 {
        self.0.get() - 1
    }
}

impl fmt::Debug for OverlayId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "OverlayId({})", self.index())
    }
}

impl fmt::Display for OverlayId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.index())
    }
}

/// Hands out overlay ids in creation order. Ids are never reused, so an id
/// held after its item was deleted stays dangling rather than aliasing a
/// newer item.
#[derive(Debug, Clone)]
pub struct IdAllocator {
    next: NonZeroU32,
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self {
            next: NonZeroU32::MIN,
        }
    }
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn allocate(&mut self) -> OverlayId {
        let id = OverlayId(self.next);
        self.next = self.next.saturating_add(1);
        id
    }
}
