use std::fmt::{self, Display};

use rustc_hash::FxHashMap;

use crate::ast::types::TypeNode;

/// Canonical type handle.
///
/// Handles are only meaningful for the [`TypeInterner`] that produced them.
/// Two handles from the same interner are equal exactly when the types they
/// stand for have the same shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Type(u32);

impl Type {
    pub const INT: Type = Type(0);
    pub const BOOL: Type = Type(1);
    pub const BYTE: Type = Type(2);
    pub const VOID: Type = Type(3);
    pub const ERROR: Type = Type(4);

    pub fn is_int(self) -> bool {
        self == Type::INT
    }

    pub fn is_bool(self) -> bool {
        self == Type::BOOL
    }

    pub fn is_byte(self) -> bool {
        self == Type::BYTE
    }

    pub fn is_void(self) -> bool {
        self == Type::VOID
    }

    pub fn is_error(self) -> bool {
        self == Type::ERROR
    }

    /// `Some(ERROR)` when this is the poison type, `None` otherwise.
    ///
    /// Rules use it to skip checks on a subterm that was already reported.
    pub fn as_error(self) -> Option<Type> {
        if self.is_error() {
            Some(self)
        } else {
            None
        }
    }

    /// Int or Byte.
    pub fn is_numeric(self) -> bool {
        self.is_int() || self.is_byte()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BasicKind {
    Int,
    Bool,
    Byte,
    Void,
}

/// Structural shape of a type, the key the interner deduplicates on.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeKind {
    Basic(BasicKind),
    Array { elem: Type, size: u32 },
    Fn { formals: Vec<Type>, ret: Type },
    Error,
}

/// Interning factory owned by one checking run.
///
/// The basic types and the error type are interned up front at the fixed
/// handles exposed as `Type::INT`, `Type::BOOL`, ... so their predicates need
/// no lookup.
#[derive(Debug, Clone)]
pub struct TypeInterner {
    kinds: Vec<TypeKind>,
    lookup: FxHashMap<TypeKind, Type>,
}

impl Default for TypeInterner {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeInterner {
    pub fn new() -> Self {
        let mut interner = TypeInterner {
            kinds: vec![],
            lookup: FxHashMap::default(),
        };

        // Order must match the `Type` constants.
        interner.intern(TypeKind::Basic(BasicKind::Int));
        interner.intern(TypeKind::Basic(BasicKind::Bool));
        interner.intern(TypeKind::Basic(BasicKind::Byte));
        interner.intern(TypeKind::Basic(BasicKind::Void));
        interner.intern(TypeKind::Error);

        interner
    }

    fn intern(&mut self, kind: TypeKind) -> Type {
        if let Some(existing) = self.lookup.get(&kind) {
            return *existing;
        }

        let ty = Type(self.kinds.len() as u32);
        tracing::trace!(?kind, handle = ty.0, "interned new type shape");
        self.kinds.push(kind.clone());
        self.lookup.insert(kind, ty);
        ty
    }

    pub fn basic(&self, kind: BasicKind) -> Type {
        match kind {
            BasicKind::Int => Type::INT,
            BasicKind::Bool => Type::BOOL,
            BasicKind::Byte => Type::BYTE,
            BasicKind::Void => Type::VOID,
        }
    }

    /// Array of `size` elements of `elem`.
    ///
    /// Arrays need at least one element; a zero size yields the error type.
    pub fn array(&mut self, elem: Type, size: u32) -> Type {
        if size == 0 {
            return Type::ERROR;
        }
        self.intern(TypeKind::Array { elem, size })
    }

    pub fn function(&mut self, formals: Vec<Type>, ret: Type) -> Type {
        self.intern(TypeKind::Fn { formals, ret })
    }

    pub fn error(&self) -> Type {
        Type::ERROR
    }

    pub fn kind(&self, ty: Type) -> &TypeKind {
        &self.kinds[ty.0 as usize]
    }

    pub fn is_array(&self, ty: Type) -> bool {
        matches!(self.kind(ty), TypeKind::Array { .. })
    }

    pub fn is_function(&self, ty: Type) -> bool {
        matches!(self.kind(ty), TypeKind::Fn { .. })
    }

    /// Element type and size of an array type.
    pub fn as_array(&self, ty: Type) -> Option<(Type, u32)> {
        match self.kind(ty) {
            TypeKind::Array { elem, size } => Some((*elem, *size)),
            _ => None,
        }
    }

    /// Formal types and return type of a function type.
    pub fn as_function(&self, ty: Type) -> Option<(&[Type], Type)> {
        match self.kind(ty) {
            TypeKind::Fn { formals, ret } => Some((formals.as_slice(), *ret)),
            _ => None,
        }
    }

    /// Number of distinct shapes interned so far.
    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }

    /// Lowers a source annotation to its canonical type.
    ///
    /// Callers validate annotations first; a zero-sized array or an array of
    /// an invalid element lowers to the error type.
    pub fn lower(&mut self, node: &TypeNode) -> Type {
        match node {
            TypeNode::Int => Type::INT,
            TypeNode::Bool => Type::BOOL,
            TypeNode::Byte => Type::BYTE,
            TypeNode::Void => Type::VOID,
            TypeNode::Array { elem, size } => {
                let elem = self.lower(elem);
                if elem.is_error() || elem.is_void() {
                    Type::ERROR
                } else {
                    self.array(elem, *size)
                }
            }
        }
    }

    pub fn display(&self, ty: Type) -> TypeDisplay<'_> {
        TypeDisplay { types: self, ty }
    }
}

/// Renders a type in Crona source spelling.
pub struct TypeDisplay<'a> {
    types: &'a TypeInterner,
    ty: Type,
}

impl Display for TypeDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.types.kind(self.ty) {
            TypeKind::Basic(BasicKind::Int) => write!(f, "int"),
            TypeKind::Basic(BasicKind::Bool) => write!(f, "bool"),
            TypeKind::Basic(BasicKind::Byte) => write!(f, "byte"),
            TypeKind::Basic(BasicKind::Void) => write!(f, "void"),
            TypeKind::Array { elem, size } => {
                write!(f, "{} array[{}]", self.types.display(*elem), size)
            }
            TypeKind::Fn { formals, ret } => {
                write!(f, "(")?;
                for (i, formal) in formals.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", self.types.display(*formal))?;
                }
                write!(f, ") -> {}", self.types.display(*ret))
            }
            TypeKind::Error => write!(f, "<error>"),
        }
    }
}
