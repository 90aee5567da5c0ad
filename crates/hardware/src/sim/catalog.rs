//! Backend catalog.
//!
//! The catalog decouples the driver from concrete backend types. It is an explicit
//! value, built once at startup and passed by reference to the assembler. It provides:
//! 1. **Registration:** Named factories (or cloneable prototypes) per backend kind.
//! 2. **Enumeration:** Registered names in registration order.
//! 3. **Lookup:** A fresh, independently owned instance per request.

use std::fmt;

use crate::common::SimError;
use crate::core::Sequencer;
use crate::soc::devices::Dram;
use crate::soc::traits::{BackendKind, Device, Processor};

/// Factory producing a fresh backend instance.
pub type Factory<T> = Box<dyn Fn() -> Box<T>>;

/// A named backend factory.
pub struct BackendDescriptor<T: ?Sized> {
    name: String,
    factory: Factory<T>,
}

impl<T: ?Sized> BackendDescriptor<T> {
    /// Returns the registered name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Produces a new instance.
    pub fn instantiate(&self) -> Box<T> {
        (self.factory)()
    }
}

impl<T: ?Sized> fmt::Debug for BackendDescriptor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BackendDescriptor")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Descriptors of one kind, kept in registration order.
struct Shelf<T: ?Sized> {
    kind: BackendKind,
    entries: Vec<BackendDescriptor<T>>,
}

impl<T: ?Sized> Shelf<T> {
    const fn new(kind: BackendKind) -> Self {
        Self {
            kind,
            entries: Vec::new(),
        }
    }

    fn register(&mut self, name: String, factory: Factory<T>) -> Result<(), SimError> {
        if self.entries.iter().any(|d| d.name == name) {
            return Err(SimError::DuplicateBackend {
                kind: self.kind,
                name,
            });
        }
        self.entries.push(BackendDescriptor { name, factory });
        Ok(())
    }

    fn lookup(&self, name: &str) -> Result<Box<T>, SimError> {
        if self.entries.is_empty() {
            return Err(SimError::EmptyCatalog(self.kind));
        }
        self.entries
            .iter()
            .find(|d| d.name == name)
            .map(BackendDescriptor::instantiate)
            .ok_or_else(|| SimError::BackendUnavailable {
                kind: self.kind,
                name: name.to_string(),
            })
    }

    fn names(&self) -> Vec<&str> {
        self.entries.iter().map(BackendDescriptor::name).collect()
    }
}

/// Registry of processor and device backends.
pub struct Catalog {
    processors: Shelf<dyn Processor>,
    devices: Shelf<dyn Device>,
}

impl Catalog {
    /// Creates an empty catalog.
    pub const fn new() -> Self {
        Self {
            processors: Shelf::new(BackendKind::Processor),
            devices: Shelf::new(BackendKind::Device),
        }
    }

    /// Creates a catalog holding the built-in backends (`Sequencer` and `DRAM`).
    pub fn with_builtins() -> Self {
        let mut catalog = Self::new();
        // Names are distinct, so registration into a fresh catalog cannot fail.
        let _ = catalog.register_processor_prototype(Sequencer::new());
        let _ = catalog.register_device_prototype(Dram::new());
        catalog
    }

    /// Registers a processor factory under `name`.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::DuplicateBackend`] if `name` is already a registered processor.
    pub fn register_processor<F>(
        &mut self,
        name: impl Into<String>,
        factory: F,
    ) -> Result<(), SimError>
    where
        F: Fn() -> Box<dyn Processor> + 'static,
    {
        self.processors.register(name.into(), Box::new(factory))
    }

    /// Registers a device factory under `name`.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::DuplicateBackend`] if `name` is already a registered device.
    pub fn register_device<F>(
        &mut self,
        name: impl Into<String>,
        factory: F,
    ) -> Result<(), SimError>
    where
        F: Fn() -> Box<dyn Device> + 'static,
    {
        self.devices.register(name.into(), Box::new(factory))
    }

    /// Registers a processor prototype under its own name; lookups return clones of it.
    ///
    /// The prototype is moved into the catalog and is never handed out itself, so
    /// mutating an instance cannot affect it or any other instance.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::DuplicateBackend`] if the name is already registered.
    pub fn register_processor_prototype<P>(&mut self, prototype: P) -> Result<(), SimError>
    where
        P: Processor + Clone + 'static,
    {
        let name = prototype.name();
        self.register_processor(name, move || -> Box<dyn Processor> {
            Box::new(prototype.clone())
        })
    }

    /// Registers a device prototype under its own name; lookups return clones of it.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::DuplicateBackend`] if the name is already registered.
    pub fn register_device_prototype<D>(&mut self, prototype: D) -> Result<(), SimError>
    where
        D: Device + Clone + 'static,
    {
        let name = prototype.name();
        self.register_device(name, move || -> Box<dyn Device> {
            Box::new(prototype.clone())
        })
    }

    /// Returns the registered names of `kind`, in registration order.
    pub fn names(&self, kind: BackendKind) -> Vec<&str> {
        match kind {
            BackendKind::Processor => self.processors.names(),
            BackendKind::Device => self.devices.names(),
        }
    }

    /// Returns the number of backends registered for `kind`.
    pub fn len(&self, kind: BackendKind) -> usize {
        match kind {
            BackendKind::Processor => self.processors.entries.len(),
            BackendKind::Device => self.devices.entries.len(),
        }
    }

    /// Returns `true` if no backend of `kind` is registered.
    pub fn is_empty(&self, kind: BackendKind) -> bool {
        self.len(kind) == 0
    }

    /// Returns a fresh instance of the processor registered as `name`.
    ///
    /// # Errors
    ///
    /// * [`SimError::EmptyCatalog`] if no processor is registered at all.
    /// * [`SimError::BackendUnavailable`] if `name` is not registered.
    pub fn processor(&self, name: &str) -> Result<Box<dyn Processor>, SimError> {
        self.processors.lookup(name)
    }

    /// Returns a fresh instance of the device registered as `name`.
    ///
    /// # Errors
    ///
    /// * [`SimError::EmptyCatalog`] if no device is registered at all.
    /// * [`SimError::BackendUnavailable`] if `name` is not registered.
    pub fn device(&self, name: &str) -> Result<Box<dyn Device>, SimError> {
        self.devices.lookup(name)
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Catalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Catalog")
            .field("processors", &self.processors.names())
            .field("devices", &self.devices.names())
            .finish()
    }
}
