//! Handles to expressions in the parser's arena.

use std::fmt;

/// Arena index of an expression.
///
/// A conversion node refers to its operand through an `ExprId`; what the
/// operand looks like is the parser's business.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[repr(transparent)]
pub struct ExprId(u32);

impl ExprId {
    #[inline]
    pub const fn new(index: u32) -> Self {
        ExprId(index)
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Renders as `expr#N`, the form used in conversion node dumps.
impl fmt::Display for ExprId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "expr#{}", self.0)
    }
}
