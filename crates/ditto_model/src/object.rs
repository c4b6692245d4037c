//! Shared, interior-mutable class instances.
//!
//! An [`Object`] is a reference: cloning the handle shares the instance.
//! The class definition is fixed at construction; only the slot vector sits
//! behind the lock, and no method holds that lock while touching another
//! object.

use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;
use rustc_hash::FxHashSet;

use crate::{ClassDef, ClassId, ModelError, Value};

struct ObjectData {
    class: Arc<ClassDef>,
    slots: RwLock<Vec<Value>>,
}

/// Releases child objects from a work-list instead of through nested drops,
/// so a long chain of last references does not exhaust the native stack.
impl Drop for ObjectData {
    fn drop(&mut self) {
        let mut pending = Vec::new();
        take_objects(self.slots.get_mut(), &mut pending);

        while let Some(data) = pending.pop() {
            // Only the last handle takes the children; the data itself then
            // drops with object-free slots.
            if let Some(mut data) = Arc::into_inner(data) {
                take_objects(data.slots.get_mut(), &mut pending);
            }
        }
    }
}

fn take_objects(slots: &mut [Value], out: &mut Vec<Arc<ObjectData>>) {
    for slot in slots {
        if matches!(slot, Value::Object(_)) {
            if let Value::Object(Object(data)) = std::mem::take(slot) {
                out.push(data);
            }
        }
    }
}

/// Handle to an instance of a class.
#[derive(Clone)]
pub struct Object(Arc<ObjectData>);

impl Object {
    /// Run the class's parameterless construction.
    pub fn construct(class: Arc<ClassDef>) -> Result<Self, ModelError> {
        let slots = class.construct_slots()?;
        Ok(Object(Arc::new(ObjectData {
            class,
            slots: RwLock::new(slots),
        })))
    }

    pub fn class(&self) -> &Arc<ClassDef> {
        &self.0.class
    }

    #[inline]
    pub fn class_id(&self) -> ClassId {
        self.0.class.id()
    }

    /// Read an attribute by name.
    pub fn get(&self, name: &str) -> Result<Value, ModelError> {
        let attr = self.0.class.attr(name).ok_or_else(|| self.no_such(name))?;
        Ok(self.0.slots.read()[attr.slot].clone())
    }

    /// Write an attribute by name, checking the value against the declared type.
    pub fn set(&self, name: &str, value: impl Into<Value>) -> Result<(), ModelError> {
        let attr = self.0.class.attr(name).ok_or_else(|| self.no_such(name))?;
        self.set_slot(attr.slot, value.into())
    }

    /// Read a slot by index. Returns `None` when out of range.
    pub fn get_slot(&self, slot: usize) -> Option<Value> {
        self.0.slots.read().get(slot).cloned()
    }

    /// Write a slot by index, checking the value against the declared type.
    pub fn set_slot(&self, slot: usize, value: Value) -> Result<(), ModelError> {
        let attr = self
            .0
            .class
            .attrs()
            .get(slot)
            .ok_or_else(|| self.no_such(&format!("#{slot}")))?;
        if !value.conforms_to(attr.ty) {
            return Err(ModelError::TypeMismatch {
                class: self.0.class.name().to_string(),
                attr: attr.name.to_string(),
                expected: attr.ty,
                found: value.kind_name(),
            });
        }
        self.0.slots.write()[slot] = value;
        Ok(())
    }

    /// Copy of every slot, taken under one short read lock.
    pub fn snapshot(&self) -> Vec<Value> {
        self.0.slots.read().clone()
    }

    /// Returns `true` if both handles refer to the same instance.
    #[inline]
    pub fn ptr_eq(&self, other: &Object) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    /// Identity key, stable for the lifetime of the instance.
    #[inline]
    pub fn addr(&self) -> usize {
        Arc::as_ptr(&self.0) as usize
    }

    /// Structural equality over public read/write attributes, at every level.
    ///
    /// Objects are compared by content, callables by identity. Pairs already
    /// under comparison are assumed equal, so cyclic graphs terminate. The
    /// walk keeps its own work-list, so graph depth is not limited by the
    /// native stack.
    pub fn deep_eq(&self, other: &Object) -> bool {
        let mut seen = FxHashSet::default();
        let mut pending = vec![(self.clone(), other.clone())];

        while let Some((lhs, rhs)) = pending.pop() {
            if lhs.ptr_eq(&rhs) || !seen.insert((lhs.addr(), rhs.addr())) {
                continue;
            }
            if lhs.class_id() != rhs.class_id() {
                return false;
            }
            let (left, right) = (lhs.snapshot(), rhs.snapshot());
            for attr in lhs.0.class.attrs().iter().filter(|attr| attr.is_cloneable()) {
                match (&left[attr.slot], &right[attr.slot]) {
                    (Value::Object(a), Value::Object(b)) => pending.push((a.clone(), b.clone())),
                    (a, b) if a == b => {}
                    _ => return false,
                }
            }
        }
        true
    }

    fn no_such(&self, attr: &str) -> ModelError {
        ModelError::NoSuchAttribute {
            class: self.0.class.name().to_string(),
            attr: attr.to_string(),
        }
    }
}

impl fmt::Debug for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{:#x}", self.0.class.name(), self.addr())
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    reason = "tests use unwrap to panic on unexpected state"
)]
