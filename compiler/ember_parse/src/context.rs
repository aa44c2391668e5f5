//! Parse context flags for context-sensitive parsing.
//!
//! Several productions change meaning with their surroundings: `await` and
//! `yield` are operators only inside async functions and generators, `in`
//! is not a binary operator inside a `for` initializer, and `super` is
//! only valid inside methods.

/// Context flags for parsing.
///
/// Multiple flags can be combined using bitwise OR.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ParseContext(u16);

impl ParseContext {
    /// No special context.
    pub const NONE: Self = Self(0);

    /// Inside a function body. Makes `return` valid.
    pub const IN_FUNCTION: Self = Self(1 << 0);

    /// Inside an async function. `await` is an operator.
    pub const IN_ASYNC: Self = Self(1 << 1);

    /// Inside a generator. `yield` is an operator.
    pub const IN_GENERATOR: Self = Self(1 << 2);

    /// Strict mode code.
    pub const STRICT: Self = Self(1 << 3);

    /// `in` is not a binary operator (a `for` initializer).
    pub const NO_IN: Self = Self(1 << 4);

    /// Inside a class body.
    pub const IN_CLASS: Self = Self(1 << 5);

    /// Inside a loop body. Makes `break` and `continue` valid.
    pub const IN_LOOP: Self = Self(1 << 6);

    /// Inside a switch body. Makes `break` valid.
    pub const IN_SWITCH: Self = Self(1 << 7);

    /// `super.x` and `super[x]` are allowed (methods).
    pub const ALLOW_SUPER: Self = Self(1 << 8);

    /// `super(...)` is allowed (constructor of a derived class).
    pub const ALLOW_SUPER_CALL: Self = Self(1 << 9);

    /// Parsing formal parameters; `await`/`yield` expressions are errors.
    pub const IN_PARAMETERS: Self = Self(1 << 10);

    #[inline]
    pub const fn new() -> Self {
        Self::NONE
    }

    #[inline]
    pub const fn has(self, flag: Self) -> bool {
        (self.0 & flag.0) != 0
    }

    #[inline]
    #[must_use]
    pub const fn with(self, flag: Self) -> Self {
        Self(self.0 | flag.0)
    }

    #[inline]
    #[must_use]
    pub const fn without(self, flag: Self) -> Self {
        Self(self.0 & !flag.0)
    }

    /// Set or clear `flag`.
    #[inline]
    #[must_use]
    pub const fn set(self, flag: Self, on: bool) -> Self {
        if on {
            self.with(flag)
        } else {
            self.without(flag)
        }
    }

    #[inline]
    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    #[inline]
    pub const fn is_strict(self) -> bool {
        self.has(Self::STRICT)
    }

    #[inline]
    pub const fn in_function(self) -> bool {
        self.has(Self::IN_FUNCTION)
    }

    #[inline]
    pub const fn in_async(self) -> bool {
        self.has(Self::IN_ASYNC)
    }

    #[inline]
    pub const fn in_generator(self) -> bool {
        self.has(Self::IN_GENERATOR)
    }

    #[inline]
    pub const fn allows_in(self) -> bool {
        !self.has(Self::NO_IN)
    }

    #[inline]
    pub const fn in_loop(self) -> bool {
        self.has(Self::IN_LOOP)
    }

    /// `break` without a label is valid here.
    #[inline]
    pub const fn allows_break(self) -> bool {
        self.has(Self::IN_LOOP) || self.has(Self::IN_SWITCH)
    }

    /// Context for a new function body: keeps strictness and class
    /// membership, drops everything tied to the enclosing body.
    #[inline]
    #[must_use]
    pub const fn enter_function(self, is_async: bool, is_generator: bool) -> Self {
        let kept = Self(self.0 & (Self::STRICT.0 | Self::IN_CLASS.0));
        kept.with(Self::IN_FUNCTION)
            .set(Self::IN_ASYNC, is_async)
            .set(Self::IN_GENERATOR, is_generator)
    }
}
