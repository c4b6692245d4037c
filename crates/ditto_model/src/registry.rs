//! Thread-safe class and enum registry.
//!
//! Classes are registered in two steps so attribute types can refer to
//! classes that are still being described (self and mutual references):
//!
//! ```text
//! let node = registry.declare("Node");
//! registry.define(node, ClassBuilder::new("Node")
//!     .field("label", Ty::Str)
//!     .field("child", Ty::Class(node)))?;
//! ```
//!
//! `register` does both steps at once for classes without forward references.

use std::sync::{Arc, OnceLock};

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use crate::{ClassBuilder, ClassDef, ClassId, EnumDef, EnumId, ModelError, Object, Ty};

enum ClassEntry {
    /// Declared, awaiting `define`.
    Declared(Arc<str>),
    Defined(Arc<ClassDef>),
}

#[derive(Default)]
struct ClassTable {
    by_id: FxHashMap<ClassId, ClassEntry>,
    /// Defined classes only; the latest definition wins for a given name.
    by_name: FxHashMap<Arc<str>, ClassId>,
}

impl ClassTable {
    fn insert(&mut self, def: &Arc<ClassDef>) {
        self.by_name.insert(Arc::from(def.name()), def.id());
        self.by_id.insert(def.id(), ClassEntry::Defined(Arc::clone(def)));
    }
}

/// Store of class and enum definitions.
#[derive(Default)]
pub struct Registry {
    classes: RwLock<ClassTable>,
    enums: RwLock<FxHashMap<EnumId, Arc<EnumDef>>>,
}

static GLOBAL_REGISTRY: OnceLock<Arc<Registry>> = OnceLock::new();

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process-wide registry used by `ditto_clone::clone_deep`.
    pub fn global() -> Arc<Registry> {
        GLOBAL_REGISTRY
            .get_or_init(|| Arc::new(Registry::new()))
            .clone()
    }

    /// Reserve an id for a class that will be defined later.
    ///
    /// The name is only used in errors until `define` succeeds; lookups by
    /// name see defined classes only.
    pub fn declare(&self, name: impl Into<Arc<str>>) -> ClassId {
        let id = ClassId::fresh();
        self.classes
            .write()
            .by_id
            .insert(id, ClassEntry::Declared(name.into()));
        id
    }

    /// Attach a definition to a declared id.
    pub fn define(&self, id: ClassId, builder: ClassBuilder) -> Result<Arc<ClassDef>, ModelError> {
        let def = self.validate(id, builder)?;
        let mut table = self.classes.write();
        match table.by_id.get(&id) {
            None => return Err(ModelError::UnknownClass(id)),
            Some(ClassEntry::Defined(existing)) => {
                return Err(ModelError::AlreadyDefined {
                    class: existing.name().to_string(),
                })
            }
            Some(ClassEntry::Declared(_)) => {}
        }
        table.insert(&def);
        Ok(def)
    }

    /// Declare and define in one step. Nothing is recorded if the
    /// definition is rejected.
    pub fn register(&self, builder: ClassBuilder) -> Result<ClassId, ModelError> {
        let id = ClassId::fresh();
        let def = self.validate(id, builder)?;
        self.classes.write().insert(&def);
        Ok(id)
    }

    /// Register an enumeration. At least one variant is required, since the
    /// first one is the zero value of attributes of this type.
    pub fn register_enum(
        &self,
        name: impl Into<Arc<str>>,
        variants: &[&str],
    ) -> Result<EnumId, ModelError> {
        let name = name.into();
        if variants.is_empty() {
            return Err(ModelError::EmptyEnum {
                name: name.to_string(),
            });
        }
        let id = EnumId::fresh();
        let def = EnumDef::new(id, name, variants.iter().map(|&v| Arc::from(v)).collect());
        self.enums.write().insert(id, Arc::new(def));
        Ok(id)
    }

    /// Look up a defined class.
    pub fn class(&self, id: ClassId) -> Result<Arc<ClassDef>, ModelError> {
        match self.classes.read().by_id.get(&id) {
            Some(ClassEntry::Defined(def)) => Ok(def.clone()),
            Some(ClassEntry::Declared(name)) => Err(ModelError::UndefinedClass {
                class: name.to_string(),
            }),
            None => Err(ModelError::UnknownClass(id)),
        }
    }

    pub fn class_by_name(&self, name: &str) -> Option<Arc<ClassDef>> {
        let id = *self.classes.read().by_name.get(name)?;
        self.class(id).ok()
    }

    pub fn enum_def(&self, id: EnumId) -> Result<Arc<EnumDef>, ModelError> {
        self.enums
            .read()
            .get(&id)
            .cloned()
            .ok_or(ModelError::UnknownEnum(id))
    }

    /// Construct a new instance with the class's parameterless construction.
    pub fn instantiate(&self, id: ClassId) -> Result<Object, ModelError> {
        Object::construct(self.class(id)?)
    }

    /// Number of declared classes (defined or not).
    pub fn len(&self) -> usize {
        self.classes.read().by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn validate(&self, id: ClassId, builder: ClassBuilder) -> Result<Arc<ClassDef>, ModelError> {
        let def = builder.finish(id)?;
        for attr in def.attrs() {
            self.check_ty(attr.ty)?;
        }
        Ok(Arc::new(def))
    }

    /// Class and enum attribute types must name entries of this registry.
    fn check_ty(&self, ty: Ty) -> Result<(), ModelError> {
        match ty {
            Ty::Class(id) if !self.classes.read().by_id.contains_key(&id) => {
                Err(ModelError::UnknownClass(id))
            }
            Ty::Enum(id) if !self.enums.read().contains_key(&id) => {
                Err(ModelError::UnknownEnum(id))
            }
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    reason = "tests use unwrap to panic on unexpected state"
)]
