use std::fmt;

/// Error codes for all pipeline diagnostics.
///
/// Format: E#### where the first digit is the phase:
/// - E0xxx: lexical errors
/// - E1xxx: syntax errors
/// - E2xxx: scope errors
/// - E3xxx: transform errors
/// - E9xxx: internal errors (malformed AST reaching the generator)
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCode {
    // Lexical (E0xxx)
    /// Unterminated string literal
    E0001,
    /// Unexpected character
    E0002,
    /// Malformed number literal
    E0003,
    /// Unterminated comment
    E0004,
    /// Invalid escape sequence
    E0005,
    /// Unterminated template literal
    E0006,
    /// Unterminated regular expression
    E0007,

    // Syntax (E1xxx)
    /// Unexpected token
    E1001,
    /// Expected expression
    E1002,
    /// Reserved word used as identifier
    E1003,
    /// Invalid assignment target
    E1004,
    /// Import/export outside module code
    E1005,
    /// Statement not allowed in this context
    E1006,
    /// Syntax requires a plugin that is not active
    E1007,
    /// Invalid or duplicate label
    E1008,

    // Scope (E2xxx)
    /// Duplicate declaration
    E2001,

    // Transform (E3xxx)
    /// A transform handler failed
    E3001,
    /// Invalid tree mutation
    E3002,

    // Internal (E9xxx)
    /// Malformed AST node
    E9001,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E0001 => "E0001",
            ErrorCode::E0002 => "E0002",
            ErrorCode::E0003 => "E0003",
            ErrorCode::E0004 => "E0004",
            ErrorCode::E0005 => "E0005",
            ErrorCode::E0006 => "E0006",
            ErrorCode::E0007 => "E0007",
            ErrorCode::E1001 => "E1001",
            ErrorCode::E1002 => "E1002",
            ErrorCode::E1003 => "E1003",
            ErrorCode::E1004 => "E1004",
            ErrorCode::E1005 => "E1005",
            ErrorCode::E1006 => "E1006",
            ErrorCode::E1007 => "E1007",
            ErrorCode::E1008 => "E1008",
            ErrorCode::E2001 => "E2001",
            ErrorCode::E3001 => "E3001",
            ErrorCode::E3002 => "E3002",
            ErrorCode::E9001 => "E9001",
        }
    }

    pub fn is_lexical(&self) -> bool {
        self.as_str().starts_with("E0")
    }

    pub fn is_syntax(&self) -> bool {
        self.as_str().starts_with("E1")
    }

    /// Internal faults are bugs in a transform or in the pipeline itself,
    /// never in the user's input.
    pub fn is_internal(&self) -> bool {
        self.as_str().starts_with("E9")
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_classification() {
        assert!(ErrorCode::E0003.is_lexical());
        assert!(ErrorCode::E1001.is_syntax());
        assert!(!ErrorCode::E2001.is_syntax());
        assert!(ErrorCode::E9001.is_internal());
    }

    #[test]
    fn test_display() {
        assert_eq!(ErrorCode::E3001.to_string(), "E3001");
    }
}
