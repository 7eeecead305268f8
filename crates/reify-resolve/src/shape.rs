//! Member introspection boundary.
//!
//! Whatever enumerates the members of a declared type reports their types
//! as [`TypeShape`]s. Unlike [`TypeExpr`], the shape set is open: it includes
//! wildcards and intersections, which the resolver rejects when classifying.

use crate::error::{ResolveError, ResolveResult, UnsupportedReason};
use reify_types::{TypeExpr, TypeName, TypeVariable};
use smol_str::SmolStr;
use std::fmt;

/// A declared type as reported by member introspection.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeShape {
    Class(TypeName),
    Parameterized {
        base: TypeName,
        owner: Option<Box<TypeShape>>,
        args: Vec<TypeShape>,
    },
    GenericArray(Box<TypeShape>),
    Variable(TypeVariable),
    /// `?`, `? extends A & B` or `? super C`
    Wildcard {
        upper: Vec<TypeShape>,
        lower: Vec<TypeShape>,
    },
    /// `A & B`
    Intersection(Vec<TypeShape>),
}

impl TypeShape {
    pub fn class(name: impl Into<TypeName>) -> Self {
        TypeShape::Class(name.into())
    }

    pub fn parameterized(base: impl Into<TypeName>, args: impl IntoIterator<Item = TypeShape>) -> Self {
        TypeShape::Parameterized {
            base: base.into(),
            owner: None,
            args: args.into_iter().collect(),
        }
    }

    pub fn array(component: TypeShape) -> Self {
        TypeShape::GenericArray(Box::new(component))
    }

    pub fn variable(owner: impl Into<TypeName>, name: impl Into<SmolStr>, index: usize) -> Self {
        TypeShape::Variable(TypeVariable::new(owner, name, index))
    }

    /// The unbounded wildcard `?`.
    pub fn wildcard() -> Self {
        TypeShape::Wildcard {
            upper: Vec::new(),
            lower: Vec::new(),
        }
    }

    /// Classify into one of the four resolvable shapes.
    ///
    /// Fails with `UnsupportedTypeExpression` when a wildcard or intersection
    /// appears anywhere in the tree, including inside type arguments. The
    /// error names the whole shape, so `List<?>` is reported as `List<?>`.
    pub fn to_type_expr(&self) -> ResolveResult<TypeExpr> {
        self.classify()
            .map_err(|reason| ResolveError::unsupported(self, reason))
    }

    fn classify(&self) -> Result<TypeExpr, UnsupportedReason> {
        match self {
            TypeShape::Class(name) => Ok(TypeExpr::Raw(name.clone())),
            TypeShape::Parameterized { base, owner, args } => {
                let args = args
                    .iter()
                    .map(TypeShape::classify)
                    .collect::<Result<Vec<_>, _>>()?;
                match owner {
                    Some(owner) => Ok(TypeExpr::nested(owner.classify()?, base, args)),
                    None => Ok(TypeExpr::parameterized(base, args)),
                }
            }
            TypeShape::GenericArray(component) => Ok(TypeExpr::array_of(component.classify()?)),
            TypeShape::Variable(variable) => Ok(TypeExpr::Variable(variable.clone())),
            TypeShape::Wildcard { .. } => Err(UnsupportedReason::Wildcard),
            TypeShape::Intersection(_) => Err(UnsupportedReason::Intersection),
        }
    }
}

impl From<&TypeExpr> for TypeShape {
    fn from(expr: &TypeExpr) -> Self {
        match expr {
            TypeExpr::Raw(name) => TypeShape::Class(name.clone()),
            TypeExpr::Parameterized { base, owner, args } => TypeShape::Parameterized {
                base: base.clone(),
                owner: owner.as_deref().map(|owner| Box::new(TypeShape::from(owner))),
                args: args.iter().map(TypeShape::from).collect(),
            },
            TypeExpr::ArrayOf(component) => TypeShape::array(TypeShape::from(&**component)),
            TypeExpr::Variable(variable) => TypeShape::Variable(variable.clone()),
        }
    }
}

impl From<TypeExpr> for TypeShape {
    fn from(expr: TypeExpr) -> Self {
        TypeShape::from(&expr)
    }
}

fn write_joined(f: &mut fmt::Formatter<'_>, shapes: &[TypeShape], sep: &str) -> fmt::Result {
    for (i, shape) in shapes.iter().enumerate() {
        if i > 0 {
            write!(f, "{}", sep)?;
        }
        write!(f, "{}", shape)?;
    }
    Ok(())
}

impl fmt::Display for TypeShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeShape::Class(name) => write!(f, "{}", name),
            TypeShape::Parameterized { base, owner, args } => {
                if let Some(owner) = owner {
                    write!(f, "{}.", owner)?;
                }
                write!(f, "{}", base)?;
                if !args.is_empty() {
                    write!(f, "<")?;
                    write_joined(f, args, ", ")?;
                    write!(f, ">")?;
                }
                Ok(())
            }
            TypeShape::GenericArray(component) => write!(f, "{}[]", component),
            TypeShape::Variable(variable) => write!(f, "{}", variable),
            TypeShape::Wildcard { upper, lower } => {
                write!(f, "?")?;
                if !upper.is_empty() {
                    write!(f, " extends ")?;
                    write_joined(f, upper, " & ")?;
                }
                if !lower.is_empty() {
                    write!(f, " super ")?;
                    write_joined(f, lower, " & ")?;
                }
                Ok(())
            }
            TypeShape::Intersection(bounds) => write_joined(f, bounds, " & "),
        }
    }
}

/// A member (field) of a declared type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    pub name: SmolStr,
    pub declared: TypeShape,
    pub declaring_type: TypeName,
}

impl Member {
    pub fn new(
        declaring_type: impl Into<TypeName>,
        name: impl Into<SmolStr>,
        declared: impl Into<TypeShape>,
    ) -> Self {
        Self {
            name: name.into(),
            declared: declared.into(),
            declaring_type: declaring_type.into(),
        }
    }
}

impl fmt::Display for Member {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.declaring_type, self.name)
    }
}
