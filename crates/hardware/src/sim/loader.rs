//! Binary Image Loader.
//!
//! This module materializes external binary files in the shared address space. It performs:
//! 1. **Binary loading:** Reads a whole file from disk into a byte buffer.
//! 2. **Placement:** Pairs each buffer with its base address; the boot ROM always lands at
//!    [`BOOT_ROM_BASE`], independent of the primary image's address.
//! 3. **Writing:** Copies the bytes into the address space one address at a time.
//!
//! Loading is deterministic: the same images loaded into a fresh address space always
//! produce the same contents.

use std::fs;
use std::path::Path;

use crate::common::{Addr, BOOT_ROM_BASE, SimError};
use crate::soc::memory::AddressSpace;

/// Loads a binary file from disk into a byte vector.
///
/// # Arguments
///
/// * `path` - Path to the binary file.
/// * `what` - Description used in the error message (e.g., `"memory image"`).
///
/// # Returns
///
/// The raw bytes of the file.
///
/// # Errors
///
/// Returns [`SimError::Io`] if the file is missing or unreadable.
pub fn load_binary(path: impl AsRef<Path>, what: &'static str) -> Result<Vec<u8>, SimError> {
    let path = path.as_ref();
    fs::read(path).map_err(|source| SimError::Io {
        what,
        path: path.to_path_buf(),
        source,
    })
}

/// A byte sequence and the address its first byte is placed at.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MemoryImage {
    base: Addr,
    bytes: Vec<u8>,
}

impl MemoryImage {
    /// Creates an image from bytes already in memory.
    pub const fn new(base: Addr, bytes: Vec<u8>) -> Self {
        Self { base, bytes }
    }

    /// Reads the primary memory image from `path`, to be placed at `base`.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Io`] if the file cannot be read.
    pub fn read(path: impl AsRef<Path>, base: Addr) -> Result<Self, SimError> {
        Ok(Self::new(base, load_binary(path, "memory image")?))
    }

    /// Reads a boot ROM image from `path`; it is always placed at [`BOOT_ROM_BASE`].
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Io`] if the file cannot be read.
    pub fn read_boot_rom(path: impl AsRef<Path>) -> Result<Self, SimError> {
        Ok(Self::new(BOOT_ROM_BASE, load_binary(path, "bootrom image")?))
    }

    /// Returns the address of the first byte.
    pub const fn base(&self) -> Addr {
        self.base
    }

    /// Returns the image contents.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Returns the image size in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Returns `true` if the image has no bytes.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// The primary image and the optional boot ROM of one simulation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImageSet {
    /// Required program image.
    pub primary: MemoryImage,
    /// Optional boot firmware placed at [`BOOT_ROM_BASE`].
    pub boot_rom: Option<MemoryImage>,
}

impl ImageSet {
    /// Reads every image of a simulation from disk.
    ///
    /// Not supplying a boot ROM is fine; supplying one that cannot be read is not.
    ///
    /// # Arguments
    ///
    /// * `primary` - Path of the required memory image.
    /// * `base` - Address of the first byte of the memory image.
    /// * `boot_rom` - Optional path of the boot ROM image.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Io`] naming the image that could not be read.
    pub fn read(
        primary: impl AsRef<Path>,
        base: Addr,
        boot_rom: Option<&Path>,
    ) -> Result<Self, SimError> {
        let primary = MemoryImage::read(primary, base)?;
        let boot_rom = boot_rom
            .map(|path| MemoryImage::read_boot_rom(path))
            .transpose()?;
        Ok(Self { primary, boot_rom })
    }
}

/// Writes `image` into `memory`, one byte per address starting at its base.
///
/// Address wrap-around past the top of the address space is left to
/// [`AddressSpace::write_bytes`].
pub fn load_image(memory: &AddressSpace, image: &MemoryImage) {
    memory.write_bytes(image.base, &image.bytes);
}
