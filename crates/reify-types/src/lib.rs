//! Reify Type Model
//!
//! Type expressions describing the declared and actual types of structure
//! members, as consumed by the resolver in `reify-resolve`.
//!
//! ## Shapes
//!
//! A [`TypeExpr`] is one of four shapes:
//! - **Raw**: a concrete, non-generic type such as `String`
//! - **Parameterized**: a generic type with arguments such as `Map<K, List<V>>`
//! - **ArrayOf**: an array of any other shape such as `T[]` or `List<String>[][]`
//! - **Variable**: a reference to a formal type parameter such as `T`
//!
//! Expressions are immutable. Children live behind [`Arc`], so cloning an
//! expression is cheap and expressions can be shared freely between threads.
//!
//! ## Example
//!
//! ```rust
//! use reify_types::TypeExpr;
//!
//! let map = TypeExpr::parameterized(
//!     "Map",
//!     [TypeExpr::raw("String"), TypeExpr::variable("Cache", "V", 0)],
//! );
//! assert_eq!(map.to_string(), "Map<String, V>");
//! assert!(map.contains_variables());
//! assert_eq!(map.raw_type(), Some(TypeExpr::raw("Map")));
//! ```

mod descriptor;

pub use descriptor::{ArrayDescriptor, TypeDescriptor};

use smol_str::SmolStr;
use std::borrow::Borrow;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

// ============================================================================
// Type Identities
// ============================================================================

/// Identity of a declared type (a class, interface or record).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeName(SmolStr);

impl TypeName {
    pub fn new(name: impl AsRef<str>) -> Self {
        Self(SmolStr::new(name))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl From<&str> for TypeName {
    fn from(name: &str) -> Self {
        Self(SmolStr::new(name))
    }
}

impl From<String> for TypeName {
    fn from(name: String) -> Self {
        Self(SmolStr::from(name))
    }
}

impl From<SmolStr> for TypeName {
    fn from(name: SmolStr) -> Self {
        Self(name)
    }
}

impl From<&TypeName> for TypeName {
    fn from(name: &TypeName) -> Self {
        name.clone()
    }
}

impl Borrow<str> for TypeName {
    fn borrow(&self) -> &str {
        self.as_str()
    }
}

impl PartialEq<str> for TypeName {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<&str> for TypeName {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

impl fmt::Display for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A reference to the `index`-th formal type parameter declared by `owner`.
///
/// `index` is the position in the raw declaration of `owner`, never the
/// position in some subtype's parameter list.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeVariable {
    pub owner: TypeName,
    pub name: SmolStr,
    pub index: usize,
}

impl TypeVariable {
    pub fn new(owner: impl Into<TypeName>, name: impl Into<SmolStr>, index: usize) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
            index,
        }
    }
}

impl fmt::Display for TypeVariable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

// ============================================================================
// Type Expressions
// ============================================================================

/// A structural description of a type.
#[derive(Debug, Clone)]
pub enum TypeExpr {
    /// A concrete, non-generic type. Substitution never changes it.
    Raw(TypeName),

    /// A generic type instantiated with arguments.
    ///
    /// `args` follows the declaration order of the base type's formal
    /// parameters. `owner` is the enclosing type of a nested generic type
    /// and does not take part in equality.
    Parameterized {
        base: TypeName,
        owner: Option<Arc<TypeExpr>>,
        args: Arc<[TypeExpr]>,
    },

    /// An array whose component may be any shape, including another array.
    ArrayOf(Arc<TypeExpr>),

    /// An unbound reference to a formal type parameter.
    Variable(TypeVariable),
}

impl TypeExpr {
    pub fn raw(name: impl Into<TypeName>) -> Self {
        TypeExpr::Raw(name.into())
    }

    pub fn parameterized(
        base: impl Into<TypeName>,
        args: impl IntoIterator<Item = TypeExpr>,
    ) -> Self {
        TypeExpr::Parameterized {
            base: base.into(),
            owner: None,
            args: args.into_iter().collect(),
        }
    }

    /// A parameterized type nested inside `owner`, such as `Outer<K>.Entry<V>`.
    pub fn nested(
        owner: TypeExpr,
        base: impl Into<TypeName>,
        args: impl IntoIterator<Item = TypeExpr>,
    ) -> Self {
        TypeExpr::Parameterized {
            base: base.into(),
            owner: Some(Arc::new(owner)),
            args: args.into_iter().collect(),
        }
    }

    pub fn array_of(component: TypeExpr) -> Self {
        TypeExpr::ArrayOf(Arc::new(component))
    }

    pub fn variable(owner: impl Into<TypeName>, name: impl Into<SmolStr>, index: usize) -> Self {
        TypeExpr::Variable(TypeVariable::new(owner, name, index))
    }

    /// Identity of a raw or parameterized type.
    pub fn base_name(&self) -> Option<&TypeName> {
        match self {
            TypeExpr::Raw(name) | TypeExpr::Parameterized { base: name, .. } => Some(name),
            TypeExpr::ArrayOf(_) | TypeExpr::Variable(_) => None,
        }
    }

    /// Type arguments of a parameterized type; empty for every other shape.
    pub fn args(&self) -> &[TypeExpr] {
        match self {
            TypeExpr::Parameterized { args, .. } => args,
            _ => &[],
        }
    }

    pub fn owner(&self) -> Option<&TypeExpr> {
        match self {
            TypeExpr::Parameterized { owner, .. } => owner.as_deref(),
            _ => None,
        }
    }

    pub fn as_variable(&self) -> Option<&TypeVariable> {
        match self {
            TypeExpr::Variable(variable) => Some(variable),
            _ => None,
        }
    }

    pub fn is_raw(&self) -> bool {
        matches!(self, TypeExpr::Raw(_))
    }

    pub fn is_parameterized(&self) -> bool {
        matches!(self, TypeExpr::Parameterized { .. })
    }

    pub fn is_array(&self) -> bool {
        matches!(self, TypeExpr::ArrayOf(_))
    }

    pub fn is_variable(&self) -> bool {
        matches!(self, TypeExpr::Variable(_))
    }

    /// The component of an array, one level down.
    pub fn component(&self) -> Option<&TypeExpr> {
        match self {
            TypeExpr::ArrayOf(component) => Some(component),
            _ => None,
        }
    }

    /// Number of array dimensions; zero for non-array shapes.
    pub fn array_depth(&self) -> usize {
        let mut depth = 0;
        let mut current = self;
        while let TypeExpr::ArrayOf(component) = current {
            depth += 1;
            current = component;
        }
        depth
    }

    /// The innermost non-array component (the expression itself for non-arrays).
    pub fn element_type(&self) -> &TypeExpr {
        let mut current = self;
        while let TypeExpr::ArrayOf(component) = current {
            current = component;
        }
        current
    }

    /// Erase type arguments, keeping array dimensions.
    ///
    /// `List<String>` becomes `List` and `List<String>[]` becomes `List[]`.
    /// A type variable has no raw type, and neither has an array of one.
    pub fn raw_type(&self) -> Option<TypeExpr> {
        match self {
            TypeExpr::Raw(_) => Some(self.clone()),
            TypeExpr::Parameterized { base, .. } => Some(TypeExpr::Raw(base.clone())),
            TypeExpr::ArrayOf(component) => {
                let raw = component.raw_type()?;
                if raw == **component {
                    Some(self.clone())
                } else {
                    Some(TypeExpr::array_of(raw))
                }
            }
            TypeExpr::Variable(_) => None,
        }
    }

    /// The first type variable found in a depth-first walk, owner before arguments.
    pub fn first_variable(&self) -> Option<&TypeVariable> {
        match self {
            TypeExpr::Raw(_) => None,
            TypeExpr::Variable(variable) => Some(variable),
            TypeExpr::ArrayOf(component) => component.first_variable(),
            TypeExpr::Parameterized { owner, args, .. } => owner
                .as_deref()
                .and_then(TypeExpr::first_variable)
                .or_else(|| args.iter().find_map(TypeExpr::first_variable)),
        }
    }

    pub fn contains_variables(&self) -> bool {
        self.first_variable().is_some()
    }
}

impl PartialEq for TypeExpr {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (TypeExpr::Raw(a), TypeExpr::Raw(b)) => a == b,
            (
                TypeExpr::Parameterized { base: b1, args: a1, .. },
                TypeExpr::Parameterized { base: b2, args: a2, .. },
            ) => b1 == b2 && a1 == a2,
            (TypeExpr::ArrayOf(c1), TypeExpr::ArrayOf(c2)) => c1 == c2,
            (TypeExpr::Variable(v1), TypeExpr::Variable(v2)) => v1 == v2,
            _ => false,
        }
    }
}

impl Eq for TypeExpr {}

// Must agree with `PartialEq`: the owner of a parameterized type is skipped.
impl Hash for TypeExpr {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            TypeExpr::Raw(name) => name.hash(state),
            TypeExpr::Parameterized { base, args, .. } => {
                base.hash(state);
                args.hash(state);
            }
            TypeExpr::ArrayOf(component) => component.hash(state),
            TypeExpr::Variable(variable) => variable.hash(state),
        }
    }
}

impl From<TypeVariable> for TypeExpr {
    fn from(variable: TypeVariable) -> Self {
        TypeExpr::Variable(variable)
    }
}

impl fmt::Display for TypeExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeExpr::Raw(name) => write!(f, "{}", name),
            TypeExpr::Parameterized { base, owner, args } => {
                if let Some(owner) = owner {
                    write!(f, "{}.", owner)?;
                }
                write!(f, "{}", base)?;
                if !args.is_empty() {
                    write!(f, "<")?;
                    for (i, arg) in args.iter().enumerate() {
                        if i > 0 {
                            write!(f, ", ")?;
                        }
                        write!(f, "{}", arg)?;
                    }
                    write!(f, ">")?;
                }
                Ok(())
            }
            TypeExpr::ArrayOf(component) => write!(f, "{}[]", component),
            TypeExpr::Variable(variable) => write!(f, "{}", variable),
        }
    }
}
