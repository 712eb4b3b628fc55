use std::any::{type_name, Any};
use std::collections::BTreeMap;
use std::fmt;
use std::marker::PhantomData;

use crate::BlackboardError;

/// A blackboard key bound to a value type at compile time.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BbKey<T: 'static> {
    name: &'static str,
    _phantom: PhantomData<fn() -> T>,
}

impl<T: 'static> Copy for BbKey<T> {}

impl<T: 'static> Clone for BbKey<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: 'static> BbKey<T> {
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            _phantom: PhantomData,
        }
    }

    pub fn name(self) -> &'static str {
        self.name
    }
}

struct Slot {
    value: Box<dyn Any>,
    type_name: &'static str,
}

/// String-keyed store of dynamically typed values shared by one agent's conditions and states.
///
/// Reads are checked: a missing key or a read with the wrong type yields a [`BlackboardError`]
/// instead of panicking.
#[derive(Default)]
pub struct Blackboard {
    values: BTreeMap<String, Slot>,
}

impl fmt::Debug for Blackboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.values.iter().map(|(k, slot)| (k, slot.type_name)))
            .finish()
    }
}

fn mismatch<T: 'static>(key: &str, slot: &Slot) -> BlackboardError {
    BlackboardError::TypeMismatch {
        key: key.to_owned(),
        expected: type_name::<T>(),
        found: slot.type_name,
    }
}

fn not_found(key: &str) -> BlackboardError {
    BlackboardError::KeyNotFound {
        key: key.to_owned(),
    }
}

impl Blackboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Keys in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    /// Overwrites unconditionally, including a value of a different type.
    pub fn set<T: 'static>(&mut self, key: impl Into<String>, value: T) {
        self.values.insert(
            key.into(),
            Slot {
                value: Box::new(value),
                type_name: type_name::<T>(),
            },
        );
    }

    pub fn get<T: 'static>(&self, key: &str) -> Result<&T, BlackboardError> {
        let slot = self.values.get(key).ok_or_else(|| not_found(key))?;
        slot.value
            .downcast_ref::<T>()
            .ok_or_else(|| mismatch::<T>(key, slot))
    }

    pub fn get_mut<T: 'static>(&mut self, key: &str) -> Result<&mut T, BlackboardError> {
        let slot = self.values.get_mut(key).ok_or_else(|| not_found(key))?;
        let found = slot.type_name;
        slot.value
            .downcast_mut::<T>()
            .ok_or_else(|| BlackboardError::TypeMismatch {
                key: key.to_owned(),
                expected: type_name::<T>(),
                found,
            })
    }

    /// Returns a clone of the stored value, or `default` on any lookup error.
    pub fn get_or<T: Clone + 'static>(&self, key: &str, default: T) -> T {
        self.get::<T>(key).cloned().unwrap_or(default)
    }

    /// Removes and returns the value. On a type mismatch the entry stays in place.
    pub fn remove<T: 'static>(&mut self, key: &str) -> Result<T, BlackboardError> {
        let slot = self.values.get(key).ok_or_else(|| not_found(key))?;
        if !slot.value.is::<T>() {
            return Err(mismatch::<T>(key, slot));
        }

        let slot = self.values.remove(key).ok_or_else(|| not_found(key))?;
        let found = slot.type_name;
        slot.value
            .downcast::<T>()
            .map(|b| *b)
            .map_err(|_| BlackboardError::TypeMismatch {
                key: key.to_owned(),
                expected: type_name::<T>(),
                found,
            })
    }

    pub fn fetch<T: 'static>(&self, key: BbKey<T>) -> Result<&T, BlackboardError> {
        self.get(key.name)
    }

    pub fn fetch_mut<T: 'static>(&mut self, key: BbKey<T>) -> Result<&mut T, BlackboardError> {
        self.get_mut(key.name)
    }

    pub fn store<T: 'static>(&mut self, key: BbKey<T>, value: T) {
        self.set(key.name, value);
    }
}
