//! The `Type` algebra and named declarations.

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Type {
    TInt,
    TBool,
    TChar,
    TString,
    TArray(Box<Type>),
    TPair(Box<Type>, Box<Type>),
    TPtr(Box<Type>),
    TStruct(String),
    TFun(Box<Type>, Vec<Declaration>),
    /// Wildcard used for empty-array and `null`-pair literals; matches any
    /// type in both directions under [`crate::typing::equal_types`].
    TArb,
}

impl Type {
    pub fn array_of(elem: Type) -> Type {
        Type::TArray(Box::new(elem))
    }

    pub fn pair_of(fst: Type, snd: Type) -> Type {
        Type::TPair(Box::new(fst), Box::new(snd))
    }

    pub fn ptr_of(inner: Type) -> Type {
        Type::TPtr(Box::new(inner))
    }
}

/// A name bound to a type: a function parameter, a struct field, a variable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub name: String,
    pub ty: Type,
}

impl Declaration {
    pub fn new(name: impl Into<String>, ty: Type) -> Self {
        Declaration {
            name: name.into(),
            ty,
        }
    }
}
