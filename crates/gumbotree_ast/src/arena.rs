//! Arena allocator for parse tree nodes.

use bumpalo::Bump;

/// Bump arena that owns every node, string and slice of one parse tree.
///
/// Nothing allocated here is dropped individually; the whole tree is
/// released when the arena goes out of scope. Cursors borrow from the
/// arena and therefore can never outlive it.
#[derive(Default)]
pub struct TreeArena {
    bump: Bump,
}

impl TreeArena {
    /// Creates an empty arena.
    pub fn new() -> Self {
        Self { bump: Bump::new() }
    }

    /// Moves `value` into the arena.
    #[inline]
    pub fn alloc<T>(&self, value: T) -> &mut T {
        self.bump.alloc(value)
    }

    /// Copies a string into the arena.
    #[inline]
    pub fn alloc_str(&self, value: &str) -> &str {
        self.bump.alloc_str(value)
    }

    /// Copies a slice of `Copy` values into the arena.
    #[inline]
    pub fn alloc_slice_copy<T: Copy>(&self, values: &[T]) -> &[T] {
        self.bump.alloc_slice_copy(values)
    }

    /// Total bytes handed out by the arena so far.
    pub fn allocated_bytes(&self) -> usize {
        self.bump.allocated_bytes()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alloc_str_copies() {
        let arena = TreeArena::new();
        let owned = String::from("hello");
        let copied = arena.alloc_str(&owned);
        drop(owned);
        assert_eq!(copied, "hello");
    }

    #[test]
    fn test_alloc_slice_copy() {
        let arena = TreeArena::new();
        let slice = arena.alloc_slice_copy(&[1u32, 2, 3]);
        assert_eq!(slice, &[1, 2, 3]);
    }

    #[test]
    fn test_allocated_bytes_grows() {
        let arena = TreeArena::new();
        let before = arena.allocated_bytes();
        arena.alloc_str(&"x".repeat(4096));
        assert!(arena.allocated_bytes() > before);
    }
}
