//! The closed set of types a native signature can mention.
//!
//! Native callables and conversion operators are declared against `Ty`.
//! Every consumer matches on it exhaustively, so adding a kind is a
//! compile error at each site that has to handle it.

use std::fmt;

use crate::{Name, StringLookup};

/// Reference to a nominal type declared in a package.
///
/// Used for struct receivers (`http:Response`) and connectors
/// (`http:Connector`).
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TypeRef {
    /// Fully-qualified package name.
    pub package: Name,
    /// Type name within the package.
    pub name: Name,
}

impl TypeRef {
    /// Create a new type reference.
    #[inline]
    pub const fn new(package: Name, name: Name) -> Self {
        TypeRef { package, name }
    }
}

/// A type as seen by native signatures and conversion operators.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Ty {
    /// 64-bit signed integer.
    Int,
    /// 64-bit floating point.
    Float,
    /// `true` / `false`.
    Boolean,
    /// UTF-8 string.
    String,
    /// Raw byte buffer.
    Blob,
    /// Dynamically shaped JSON document.
    Json,
    /// XML document.
    Xml,
    /// String-keyed map of `any`.
    Map,
    /// Top type; accepts every value.
    Any,
    /// The absent value, carried in an error slot when no error occurred.
    Nil,
    /// The built-in error struct filling the last slot of fallible results.
    Error,
    /// Homogeneous array.
    Array(Box<Ty>),
    /// Nominal struct type.
    Struct(TypeRef),
    /// Connector type; actions are invoked through values of this type.
    Connector(TypeRef),
}

impl Ty {
    /// Map a primitive type keyword to its type.
    ///
    /// Returns `None` for anything that is not a built-in keyword.
    pub fn from_keyword(keyword: &str) -> Option<Ty> {
        let ty = match keyword {
            "int" => Ty::Int,
            "float" => Ty::Float,
            "boolean" => Ty::Boolean,
            "string" => Ty::String,
            "blob" => Ty::Blob,
            "json" => Ty::Json,
            "xml" => Ty::Xml,
            "map" => Ty::Map,
            "any" => Ty::Any,
            "error" => Ty::Error,
            _ => return None,
        };
        Some(ty)
    }

    /// The keyword for primitive types, `None` for composite ones.
    pub fn keyword(&self) -> Option<&'static str> {
        let kw = match self {
            Ty::Int => "int",
            Ty::Float => "float",
            Ty::Boolean => "boolean",
            Ty::String => "string",
            Ty::Blob => "blob",
            Ty::Json => "json",
            Ty::Xml => "xml",
            Ty::Map => "map",
            Ty::Any => "any",
            Ty::Nil => "nil",
            Ty::Error => "error",
            Ty::Array(_) | Ty::Struct(_) | Ty::Connector(_) => return None,
        };
        Some(kw)
    }

    /// Create an array type of `element`.
    pub fn array_of(element: Ty) -> Ty {
        Ty::Array(Box::new(element))
    }

    /// Check if this is a built-in primitive type.
    #[inline]
    pub fn is_primitive(&self) -> bool {
        self.keyword().is_some()
    }

    /// Element type if this is an array.
    pub fn element(&self) -> Option<&Ty> {
        match self {
            Ty::Array(elem) => Some(elem),
            _ => None,
        }
    }

    /// Nominal reference if this is a struct or connector.
    pub fn type_ref(&self) -> Option<TypeRef> {
        match self {
            Ty::Struct(r) | Ty::Connector(r) => Some(*r),
            _ => None,
        }
    }

    /// Render this type with names resolved through `interner`.
    pub fn display<'a, I: StringLookup + ?Sized>(&'a self, interner: &'a I) -> TyDisplay<'a, I> {
        TyDisplay { ty: self, interner }
    }
}

/// Display adapter produced by [`Ty::display`].
pub struct TyDisplay<'a, I: ?Sized> {
    ty: &'a Ty,
    interner: &'a I,
}

impl<I: StringLookup + ?Sized> fmt::Display for TyDisplay<'_, I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.ty {
            Ty::Array(elem) => write!(f, "{}[]", elem.display(self.interner)),
            Ty::Struct(r) | Ty::Connector(r) => write!(
                f,
                "{}:{}",
                self.interner.lookup(r.package),
                self.interner.lookup(r.name)
            ),
            primitive => match primitive.keyword() {
                Some(kw) => f.write_str(kw),
                None => write!(f, "{primitive:?}"),
            },
        }
    }
}
