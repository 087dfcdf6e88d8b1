//! Type system definitions for the AST.
//!
//! This module defines the types of the language:
//!
//! - Primitive types (`Int`, `Bool`, `String`, `Unit`)
//! - Pointer types (`*T`)
//! - Function types (`[T1, T2] -> R`)
//!
//! Types live in a [`TypeArena`] and are referred to by [`TypeId`]. The
//! parser allocates the types it reads from signatures, the type evaluator
//! only hands out ids that already exist. Equality is structural, never by
//! identity.

use std::fmt::Display;

/// Index of a type inside its [`TypeArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeId(u32);

impl TypeId {
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Primitive {
    Int,
    Bool,
    String,
    Unit,
}

impl Display for Primitive {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Primitive::Int => write!(f, "Int"),
            Primitive::Bool => write!(f, "Bool"),
            Primitive::String => write!(f, "String"),
            Primitive::Unit => write!(f, "Unit"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Type {
    Primitive(Primitive),
    Pointer(TypeId),
    Function {
        arguments: Vec<TypeId>,
        return_type: TypeId,
    },
}

/// Append-only storage for every type of a compilation unit.
#[derive(Debug, Clone)]
pub struct TypeArena {
    types: Vec<Type>,
}

impl TypeArena {
    pub const INT: TypeId = TypeId(0);
    pub const BOOL: TypeId = TypeId(1);
    pub const STRING: TypeId = TypeId(2);
    pub const UNIT: TypeId = TypeId(3);

    /// Creates an arena holding the four primitive singletons.
    pub fn new() -> Self {
        TypeArena {
            types: vec![
                Type::Primitive(Primitive::Int),
                Type::Primitive(Primitive::Bool),
                Type::Primitive(Primitive::String),
                Type::Primitive(Primitive::Unit),
            ],
        }
    }

    pub fn primitive(&self, primitive: Primitive) -> TypeId {
        match primitive {
            Primitive::Int => Self::INT,
            Primitive::Bool => Self::BOOL,
            Primitive::String => Self::STRING,
            Primitive::Unit => Self::UNIT,
        }
    }

    pub fn pointer(&mut self, underlying: TypeId) -> TypeId {
        self.alloc(Type::Pointer(underlying))
    }

    pub fn function(&mut self, arguments: Vec<TypeId>, return_type: TypeId) -> TypeId {
        self.alloc(Type::Function {
            arguments,
            return_type,
        })
    }

    fn alloc(&mut self, ty: Type) -> TypeId {
        self.types.push(ty);
        TypeId((self.types.len() - 1) as u32)
    }

    pub fn get(&self, id: TypeId) -> &Type {
        &self.types[id.index()]
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Returns the argument and return types if `id` is a function type.
    pub fn as_function(&self, id: TypeId) -> Option<(&[TypeId], TypeId)> {
        match self.get(id) {
            Type::Function {
                arguments,
                return_type,
            } => Some((arguments.as_slice(), *return_type)),
            _ => None,
        }
    }

    /// Structural equality. Argument lists compare in order.
    pub fn equals(&self, a: TypeId, b: TypeId) -> bool {
        if a == b {
            return true;
        }

        match (self.get(a), self.get(b)) {
            (Type::Primitive(left), Type::Primitive(right)) => left == right,
            (Type::Pointer(left), Type::Pointer(right)) => self.equals(*left, *right),
            (
                Type::Function {
                    arguments: left_args,
                    return_type: left_ret,
                },
                Type::Function {
                    arguments: right_args,
                    return_type: right_ret,
                },
            ) => {
                left_args.len() == right_args.len()
                    && left_args
                        .iter()
                        .zip(right_args.iter())
                        .all(|(l, r)| self.equals(*l, *r))
                    && self.equals(*left_ret, *right_ret)
            }
            _ => false,
        }
    }

    pub fn format(&self, id: TypeId) -> String {
        match self.get(id) {
            Type::Primitive(primitive) => primitive.to_string(),
            Type::Pointer(underlying) => format!("*{}", self.format(*underlying)),
            Type::Function {
                arguments,
                return_type,
            } => {
                let arguments = arguments
                    .iter()
                    .map(|arg| self.format(*arg))
                    .collect::<Vec<String>>()
                    .join(", ");

                format!("[{}] -> {}", arguments, self.format(*return_type))
            }
        }
    }
}

impl Default for TypeArena {
    fn default() -> Self {
        Self::new()
    }
}
