//! A growable byte buffer for incrementally building binary payloads (protocol
//! messages, file contents) whose final size is not known up front.
//!
//! [`DynamicBuffer`] owns a single contiguous backing region and keeps track of
//! how many of its bytes have been written. Every mutating operation first makes
//! sure the region is large enough, growing it by a configurable factor so that
//! a sequence of appends costs amortized constant time per byte.

use std::ops::{Deref, DerefMut};

use dynbuf_common::error::Error;

use region::Region;

pub mod growth;
pub mod options;
mod region;


pub use dynbuf_common::Result;
pub use dynbuf_common::error::{self, ErrorKind};
pub use options::DynamicBufferOptions;

/// A mutable, growable buffer of bytes.
///
/// The buffer maintains `len() <= capacity()` at all times. Appends
/// ([`append`](Self::append), [`write_byte`](Self::write_byte),
/// [`concat`](Self::concat)) return `&mut Self` on success, so calls can be
/// chained with `?`:
///
/// ```
/// use dynbuf::DynamicBuffer;
///
/// let mut buf = DynamicBuffer::new();
/// buf.append("a")?.append("b")?.write_byte(99)?;
/// assert_eq!(buf.get_buffer(), b"abc");
/// # Ok::<(), dynbuf::error::Error>(())
/// ```
///
/// Views returned by [`get_buffer`](Self::get_buffer) and
/// [`get_buffer_mut`](Self::get_buffer_mut) borrow the buffer and therefore
/// cannot outlive the next mutating call.
pub struct DynamicBuffer {
    region: Region,
    len: usize,
    growth_factor: f64,
    reallocations: usize,
}

impl DynamicBuffer {
    pub const DEFAULT_CAPACITY: usize = DynamicBufferOptions::DEFAULT_CAPACITY;
    pub const DEFAULT_GROWTH_FACTOR: f64 = DynamicBufferOptions::DEFAULT_GROWTH_FACTOR;

    /// Creates an empty buffer with a 512-byte backing region and a growth
    /// factor of `2.0`.
    pub fn new() -> DynamicBuffer {
        Self::with_capacity(Self::DEFAULT_CAPACITY)
    }

    /// Creates an empty buffer with a backing region of exactly `capacity` bytes
    /// and the default growth factor.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` exceeds `isize::MAX`, and aborts if the region cannot
    /// be allocated. Use [`with_options`](Self::with_options) to get these
    /// failures back as `CapacityOverflow`/`OutOfMemory` errors instead.
    pub fn with_capacity(capacity: usize) -> DynamicBuffer {
        DynamicBuffer {
            region: Region::zeroed(capacity),
            len: 0,
            growth_factor: Self::DEFAULT_GROWTH_FACTOR,
            reallocations: 0,
        }
    }

    /// Creates an empty buffer from validated options.
    ///
    /// Fails with `InvalidArgument` if the growth factor is not a finite number
    /// greater than `1.0`, or with `OutOfMemory` if the initial region cannot be
    /// allocated.
    pub fn with_options(options: &DynamicBufferOptions) -> Result<DynamicBuffer> {
        options.validate()?;
        Ok(DynamicBuffer {
            region: Region::allocate(options.initial_capacity)?,
            len: 0,
            growth_factor: options.growth_factor,
            reallocations: 0,
        })
    }

    /// Returns the options that would create a buffer with the current capacity
    /// and growth factor.
    pub fn options(&self) -> DynamicBufferOptions {
        DynamicBufferOptions::new()
            .initial_capacity(self.capacity())
            .growth_factor(self.growth_factor)
    }

    /// Returns the number of bytes written so far.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if nothing has been written.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the size of the backing region in bytes.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.region.capacity()
    }

    #[inline]
    pub fn growth_factor(&self) -> f64 {
        self.growth_factor
    }

    /// Returns how many times the backing region has been replaced, either by
    /// growth or by [`resize_underlying_buffer`](Self::resize_underlying_buffer).
    #[inline]
    pub fn reallocations(&self) -> usize {
        self.reallocations
    }

    /// Makes sure the backing region can take `additional` more bytes.
    ///
    /// When the region is too small, a new one of
    /// `floor((len + additional) * growth_factor)` bytes is allocated and the
    /// written bytes are copied over. On failure (`OutOfMemory` or
    /// `CapacityOverflow`) the buffer is left unchanged.
    #[inline]
    pub fn reserve(&mut self, additional: usize) -> Result<()> {
        let needed = growth::required_capacity(self.len, additional)?;
        if needed <= self.capacity() {
            return Ok(());
        }
        self.grow(needed)
    }

    /// Appends the UTF-8 encoding of `text`.
    pub fn append(&mut self, text: &str) -> Result<&mut Self> {
        self.push_slice(text.as_bytes())?;
        Ok(self)
    }

    /// Appends a single byte.
    pub fn write_byte(&mut self, value: u8) -> Result<&mut Self> {
        self.reserve(1)?;
        self.region.write_at(self.len, &[value]);
        self.len += 1;
        Ok(self)
    }

    /// Appends a single signed byte, stored in two's complement.
    pub fn write_i8(&mut self, value: i8) -> Result<&mut Self> {
        self.write_byte(value as u8)
    }

    /// Appends the bytes of `source`.
    ///
    /// Passing another `DynamicBuffer` appends exactly its written bytes, never
    /// the unused tail of its backing region.
    pub fn concat(&mut self, source: impl AsRef<[u8]>) -> Result<&mut Self> {
        self.push_slice(source.as_ref())?;
        Ok(self)
    }

    /// Creates an independent copy of this buffer.
    ///
    /// The copy gets a backing region of `new_capacity` bytes when that is at
    /// least `len()`, otherwise the same capacity as `self`. The growth factor
    /// is `new_growth_factor` when given (and validated), otherwise inherited.
    pub fn try_clone_with(
        &self,
        new_capacity: Option<usize>,
        new_growth_factor: Option<f64>,
    ) -> Result<DynamicBuffer> {
        let capacity = match new_capacity {
            Some(capacity) if capacity >= self.len => capacity,
            Some(capacity) => {
                log::debug!(
                    "clone capacity {capacity} is below the buffer length {}, keeping {}",
                    self.len,
                    self.capacity()
                );
                self.capacity()
            }
            None => self.capacity(),
        };
        let options = DynamicBufferOptions::new()
            .initial_capacity(capacity)
            .growth_factor(new_growth_factor.unwrap_or(self.growth_factor));
        let mut clone = DynamicBuffer::with_options(&options)?;
        clone.concat(self)?;
        Ok(clone)
    }

    /// Replaces the backing region with one of exactly `new_size` bytes
    /// (`len()` when `None`, i.e. shrink to fit), keeping the written bytes.
    ///
    /// A `new_size` below `len()` is rejected with `InvalidArgument`, leaving
    /// the buffer unchanged.
    pub fn resize_underlying_buffer(&mut self, new_size: Option<usize>) -> Result<&mut Self> {
        let new_size = new_size.unwrap_or(self.len);
        if new_size < self.len {
            log::debug!(
                "rejected resize to {new_size} bytes, buffer holds {} bytes",
                self.len
            );
            return Err(Error::invalid_arg(
                "new_size",
                format!("{new_size} is below the buffer length {}", self.len),
            ));
        }
        if new_size != self.capacity() {
            log::debug!(
                "resizing backing region: {} -> {new_size} bytes",
                self.capacity()
            );
            self.reallocate(new_size)?;
        }
        Ok(self)
    }

    /// Shrinks the backing region to exactly `len()` bytes.
    pub fn shrink_to_fit(&mut self) -> Result<&mut Self> {
        self.resize_underlying_buffer(None)
    }

    /// Returns the written bytes.
    #[inline]
    pub fn get_buffer(&self) -> &[u8] {
        &self.region.as_slice()[..self.len]
    }

    /// Returns the written bytes for in-place modification.
    #[inline]
    pub fn get_buffer_mut(&mut self) -> &mut [u8] {
        &mut self.region.as_mut_slice()[..self.len]
    }

    /// Returns an owned copy of the written bytes.
    pub fn to_vec(&self) -> Vec<u8> {
        self.get_buffer().to_vec()
    }

    /// Discards the written bytes, keeping the backing region.
    pub fn clear(&mut self) {
        self.len = 0;
    }

    /// Consumes the buffer and returns the written bytes.
    pub fn into_vec(self) -> Vec<u8> {
        let mut vec = self.region.into_vec();
        vec.truncate(self.len);
        vec
    }
}

impl DynamicBuffer {
    #[inline]
    fn push_slice(&mut self, data: &[u8]) -> Result<()> {
        self.reserve(data.len())?;
        self.region.write_at(self.len, data);
        self.len += data.len();
        Ok(())
    }

    #[cold]
    fn grow(&mut self, needed: usize) -> Result<()> {
        let new_capacity = growth::grown_capacity(needed, self.growth_factor);
        self.reallocate(new_capacity)
    }

    /// Moves the written bytes into a fresh region of `new_capacity` bytes.
    ///
    /// The current region is released only after the new one is populated.
    fn reallocate(&mut self, new_capacity: usize) -> Result<()> {
        debug_assert!(new_capacity >= self.len);
        let region = Region::allocate_with_prefix(new_capacity, self.get_buffer())?;
        log::trace!(
            "reallocated backing region: {} -> {new_capacity} bytes, len {}",
            self.capacity(),
            self.len
        );
        self.region = region;
        self.reallocations += 1;
        Ok(())
    }
}

impl Default for DynamicBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for DynamicBuffer {
    fn clone(&self) -> DynamicBuffer {
        let mut region = Region::zeroed(self.capacity());
        region.write_at(0, self.get_buffer());
        DynamicBuffer {
            region,
            len: self.len,
            growth_factor: self.growth_factor,
            reallocations: 0,
        }
    }
}

impl std::fmt::Debug for DynamicBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DynamicBuffer")
            .field("values", &self.get_buffer())
            .field("len", &self.len)
            .field("cap", &self.capacity())
            .field("growth_factor", &self.growth_factor)
            .finish_non_exhaustive()
    }
}

impl PartialEq for DynamicBuffer {
    fn eq(&self, other: &Self) -> bool {
        self.get_buffer() == other.get_buffer()
    }
}

impl Eq for DynamicBuffer {}

impl Deref for DynamicBuffer {
    type Target = [u8];

    #[inline]
    fn deref(&self) -> &Self::Target {
        self.get_buffer()
    }
}

impl DerefMut for DynamicBuffer {
    #[inline]
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.get_buffer_mut()
    }
}

impl AsRef<[u8]> for DynamicBuffer {
    #[inline]
    fn as_ref(&self) -> &[u8] {
        self.get_buffer()
    }
}

impl std::io::Write for DynamicBuffer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.push_slice(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl std::fmt::Write for DynamicBuffer {
    fn write_str(&mut self, s: &str) -> std::fmt::Result {
        self.push_slice(s.as_bytes()).map_err(|_| std::fmt::Error)
    }
}

impl From<Vec<u8>> for DynamicBuffer {
    fn from(vec: Vec<u8>) -> Self {
        let len = vec.len();
        DynamicBuffer {
            region: Region::from_vec(vec),
            len,
            growth_factor: Self::DEFAULT_GROWTH_FACTOR,
            reallocations: 0,
        }
    }
}

impl From<&[u8]> for DynamicBuffer {
    fn from(s: &[u8]) -> Self {
        Self::from(s.to_vec())
    }
}

impl From<&str> for DynamicBuffer {
    fn from(s: &str) -> Self {
        Self::from(s.as_bytes())
    }
}

impl From<String> for DynamicBuffer {
    fn from(s: String) -> Self {
        Self::from(s.into_bytes())
    }
}

impl From<DynamicBuffer> for Vec<u8> {
    fn from(buf: DynamicBuffer) -> Self {
        buf.into_vec()
    }
}
