//! Per-adapter attribute tables.
//!
//! Adapters describe how each native attribute is read with an explicit
//! table of typed read functions, built once. The extractor only ever asks
//! the table, so it never needs to know the concrete entity type.

use std::fmt;
use std::sync::Arc;

use crate::error::AttributeError;
use crate::native::NativeValue;

/// Reads one attribute from a native entity.
pub type ReadFn<E> = Arc<dyn Fn(&E) -> Result<NativeValue, AttributeError> + Send + Sync>;

/// Maps native attribute names to read functions, in declaration order.
pub struct AttributeTable<E> {
    readers: Vec<(String, ReadFn<E>)>,
}

impl<E> AttributeTable<E> {
    pub fn builder() -> AttributeTableBuilder<E> {
        AttributeTableBuilder {
            readers: Vec::new(),
        }
    }

    /// Reads `attribute` from `entity`.
    ///
    /// # Errors
    ///
    /// Returns [`AttributeError::Unsupported`] when the table has no reader
    /// for the attribute, or whatever the reader itself reports.
    pub fn read(&self, entity: &E, attribute: &str) -> Result<NativeValue, AttributeError> {
        match self.reader(attribute) {
            Some(read) => read(entity),
            None => Err(AttributeError::Unsupported {
                attribute: attribute.to_string(),
            }),
        }
    }

    pub fn contains(&self, attribute: &str) -> bool {
        self.reader(attribute).is_some()
    }

    /// Attribute names in declaration order.
    pub fn attributes(&self) -> impl Iterator<Item = &str> {
        self.readers.iter().map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.readers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.readers.is_empty()
    }

    fn reader(&self, attribute: &str) -> Option<&ReadFn<E>> {
        self.readers
            .iter()
            .find(|(name, _)| name == attribute)
            .map(|(_, read)| read)
    }
}

impl<E> Clone for AttributeTable<E> {
    fn clone(&self) -> Self {
        Self {
            readers: self.readers.clone(),
        }
    }
}

impl<E> Default for AttributeTable<E> {
    fn default() -> Self {
        Self {
            readers: Vec::new(),
        }
    }
}

impl<E> fmt::Debug for AttributeTable<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AttributeTable")
            .field("attributes", &self.attributes().collect::<Vec<_>>())
            .finish()
    }
}

/// Builder for [`AttributeTable`].
pub struct AttributeTableBuilder<E> {
    readers: Vec<(String, ReadFn<E>)>,
}

impl<E> AttributeTableBuilder<E> {
    /// Registers a reader. A later registration for the same attribute
    /// replaces the earlier one but keeps its position.
    #[must_use]
    pub fn field<F>(mut self, attribute: impl Into<String>, read: F) -> Self
    where
        F: Fn(&E) -> Result<NativeValue, AttributeError> + Send + Sync + 'static,
    {
        let attribute = attribute.into();
        let read: ReadFn<E> = Arc::new(read);
        if let Some(slot) = self.readers.iter_mut().find(|(name, _)| *name == attribute) {
            slot.1 = read;
        } else {
            self.readers.push((attribute, read));
        }
        self
    }

    pub fn build(self) -> AttributeTable<E> {
        AttributeTable {
            readers: self.readers,
        }
    }
}
