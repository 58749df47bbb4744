use core::fmt::Display;

/// Static type of a SeqLang expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Type {
    Integer,
    Float,
    IntegerSequence,
    FloatSequence,
}

impl Type {
    pub fn is_numeric(self) -> bool {
        matches!(self, Type::Integer | Type::Float)
    }

    pub fn is_sequence(self) -> bool {
        !self.is_numeric()
    }

    /// The sequence type with `self` as element type.
    ///
    /// Callers must have checked `is_numeric` first.
    pub fn to_sequence(self) -> Type {
        match self {
            Type::Integer => Type::IntegerSequence,
            Type::Float => Type::FloatSequence,
            _ => unreachable!("to_sequence called on sequence type {}", self),
        }
    }

    /// The element type of a sequence type.
    ///
    /// Callers must have checked `is_sequence` first.
    pub fn to_numeric(self) -> Type {
        match self {
            Type::IntegerSequence => Type::Integer,
            Type::FloatSequence => Type::Float,
            _ => unreachable!("to_numeric called on numeric type {}", self),
        }
    }

    /// Type of a binary arithmetic result on two numeric operands.
    pub fn promote(self, other: Type) -> Type {
        if self == Type::Float || other == Type::Float {
            Type::Float
        } else {
            Type::Integer
        }
    }
}

impl Display for Type {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Type::Integer => write!(f, "Integer"),
            Type::Float => write!(f, "Float"),
            Type::IntegerSequence => write!(f, "Sequence[Integer]"),
            Type::FloatSequence => write!(f, "Sequence[Float]"),
        }
    }
}
