use dynbuf_common::{Result, error::Error};

/// The contiguous backing storage of a `DynamicBuffer`.
///
/// The whole allocation is initialized (zero-filled on creation), so the length
/// of `storage` is the capacity of the region. How many of these bytes are
/// meaningful is tracked by the owner.
pub(crate) struct Region {
    storage: Vec<u8>,
}

impl Region {
    /// Allocates a zero-filled region of exactly `size` bytes.
    ///
    /// Panics if `size` exceeds `isize::MAX`; allocation failure aborts the
    /// process, as with any `Vec` allocation.
    pub fn zeroed(size: usize) -> Region {
        Region {
            storage: vec![0u8; size],
        }
    }

    /// Allocates a zero-filled region of exactly `size` bytes, reporting
    /// allocation failure as `OutOfMemory`.
    pub fn allocate(size: usize) -> Result<Region> {
        let mut storage = Vec::new();
        storage
            .try_reserve_exact(size)
            .map_err(|e| Error::out_of_memory(size, e))?;
        storage.resize(size, 0);
        Ok(Region { storage })
    }

    /// Allocates a region of `size` bytes whose first `prefix.len()` bytes are
    /// a copy of `prefix`.
    ///
    /// `self` is left untouched, so a failed allocation keeps the previous region
    /// intact.
    pub fn allocate_with_prefix(size: usize, prefix: &[u8]) -> Result<Region> {
        debug_assert!(prefix.len() <= size);
        let mut region = Region::allocate(size)?;
        region.write_at(0, prefix);
        Ok(region)
    }

    /// Takes over a vector as a fully used region of `storage.len()` bytes.
    ///
    /// The allocation is reused as is when the vector has no spare capacity;
    /// otherwise it is shrunk first, which may reallocate and copy.
    pub fn from_vec(mut storage: Vec<u8>) -> Region {
        storage.shrink_to_fit();
        Region { storage }
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.storage.len()
    }

    #[inline]
    pub fn as_slice(&self) -> &[u8] {
        &self.storage
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        &mut self.storage
    }

    /// Copies `data` into the region starting at `offset`.
    ///
    /// # Panics
    ///
    /// Panics if `offset + data.len()` exceeds the capacity.
    #[inline]
    pub fn write_at(&mut self, offset: usize, data: &[u8]) {
        self.storage[offset..offset + data.len()].copy_from_slice(data);
    }

    /// Consumes the region, returning the whole storage (including unwritten bytes).
    pub fn into_vec(self) -> Vec<u8> {
        self.storage
    }
}
