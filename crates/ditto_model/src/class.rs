//! Class and enumeration definitions.

use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::{AttrFlags, ClassId, EnumId, EnumValue, ModelError, Ty, Value};

/// How instances of a class come into existence.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Default)]
pub enum Construction {
    /// Parameterless construction: every slot starts at its attribute default.
    #[default]
    Default,
    /// No parameterless constructor. Instantiation by the engine fails.
    Unavailable,
}

/// One attribute of a class.
#[derive(Clone, Debug)]
pub struct AttrDef {
    pub name: Arc<str>,
    pub ty: Ty,
    pub flags: AttrFlags,
    /// Value the slot holds right after construction.
    pub default: Value,
    /// Index into the instance's slot vector.
    pub slot: usize,
}

impl AttrDef {
    #[inline]
    pub fn is_cloneable(&self) -> bool {
        self.flags.is_cloneable()
    }
}

/// A fully defined class.
#[derive(Debug)]
pub struct ClassDef {
    id: ClassId,
    name: Arc<str>,
    construction: Construction,
    attrs: Vec<AttrDef>,
    slot_by_name: FxHashMap<Arc<str>, usize>,
}

impl ClassDef {
    pub fn id(&self) -> ClassId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn construction(&self) -> Construction {
        self.construction
    }

    /// Attributes in declaration (slot) order.
    pub fn attrs(&self) -> &[AttrDef] {
        &self.attrs
    }

    pub fn attr(&self, name: &str) -> Option<&AttrDef> {
        let slot = *self.slot_by_name.get(name)?;
        self.attrs.get(slot)
    }

    /// Produce the slot vector of a freshly constructed instance.
    pub fn construct_slots(&self) -> Result<Vec<Value>, ModelError> {
        match self.construction {
            Construction::Default => Ok(self.attrs.iter().map(|a| a.default.clone()).collect()),
            Construction::Unavailable => Err(ModelError::ConstructionFailure {
                class: self.name.to_string(),
            }),
        }
    }
}

struct AttrDecl {
    name: Arc<str>,
    ty: Ty,
    flags: AttrFlags,
    default: Option<Value>,
}

/// Builder for [`ClassDef`].
///
/// ```text
/// let point = registry.register(
///     ClassBuilder::new("Point").field("x", Ty::Int).field("y", Ty::Int),
/// )?;
/// ```
pub struct ClassBuilder {
    name: Arc<str>,
    construction: Construction,
    attrs: Vec<AttrDecl>,
}

impl ClassBuilder {
    pub fn new(name: impl Into<Arc<str>>) -> Self {
        ClassBuilder {
            name: name.into(),
            construction: Construction::Default,
            attrs: Vec::new(),
        }
    }

    /// Public read/write attribute starting at the type's zero value.
    #[must_use]
    pub fn field(self, name: impl Into<Arc<str>>, ty: Ty) -> Self {
        self.attr(name, ty, AttrFlags::CLONEABLE, None)
    }

    /// Public read/write attribute with an explicit construction default.
    #[must_use]
    pub fn field_with_default(self, name: impl Into<Arc<str>>, ty: Ty, default: Value) -> Self {
        self.attr(name, ty, AttrFlags::CLONEABLE, Some(default))
    }

    /// Attribute with explicit flags and optional default.
    #[must_use]
    pub fn attr(
        mut self,
        name: impl Into<Arc<str>>,
        ty: Ty,
        flags: AttrFlags,
        default: Option<Value>,
    ) -> Self {
        self.attrs.push(AttrDecl {
            name: name.into(),
            ty,
            flags,
            default,
        });
        self
    }

    /// Mark the class as lacking a parameterless constructor.
    #[must_use]
    pub fn without_default_constructor(mut self) -> Self {
        self.construction = Construction::Unavailable;
        self
    }

    /// Validate the attribute list and freeze it under `id`.
    pub(crate) fn finish(self, id: ClassId) -> Result<ClassDef, ModelError> {
        let mut attrs = Vec::with_capacity(self.attrs.len());
        let mut slot_by_name = FxHashMap::default();

        for (slot, decl) in self.attrs.into_iter().enumerate() {
            if slot_by_name.insert(decl.name.clone(), slot).is_some() {
                return Err(ModelError::DuplicateAttribute {
                    class: self.name.to_string(),
                    attr: decl.name.to_string(),
                });
            }
            let default = match decl.default {
                Some(value) if value.conforms_to(decl.ty) => value,
                Some(value) => {
                    return Err(ModelError::BadDefault {
                        class: self.name.to_string(),
                        attr: decl.name.to_string(),
                        expected: decl.ty,
                        found: value.kind_name(),
                    })
                }
                None => Value::zero(decl.ty),
            };
            attrs.push(AttrDef {
                name: decl.name,
                ty: decl.ty,
                flags: decl.flags,
                default,
                slot,
            });
        }

        Ok(ClassDef {
            id,
            name: self.name,
            construction: self.construction,
            attrs,
            slot_by_name,
        })
    }
}

/// A registered enumeration.
#[derive(Debug)]
pub struct EnumDef {
    id: EnumId,
    name: Arc<str>,
    variants: Vec<Arc<str>>,
}

impl EnumDef {
    pub(crate) fn new(id: EnumId, name: Arc<str>, variants: Vec<Arc<str>>) -> Self {
        EnumDef { id, name, variants }
    }

    pub fn id(&self) -> EnumId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn variants(&self) -> &[Arc<str>] {
        &self.variants
    }

    /// Look up a variant by name.
    pub fn value(&self, variant: &str) -> Option<EnumValue> {
        let index = self.variants.iter().position(|v| &**v == variant)?;
        Some(EnumValue {
            ty: self.id,
            variant: u32::try_from(index).ok()?,
        })
    }

    pub fn variant_name(&self, value: EnumValue) -> Option<&str> {
        if value.ty != self.id {
            return None;
        }
        self.variants.get(value.variant as usize).map(|v| &**v)
    }
}
