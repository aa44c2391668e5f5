//! Stack growth for deeply nested programs.
//!
//! The parser, the scope analyzer and the code generator all recurse once
//! per nesting level of the input. Minified bundles and generated code can
//! nest expressions thousands of levels deep, so each recursive entry point
//! runs its body through [`ensure_sufficient_stack`].
//!
//! On native targets the stack is grown on demand with `stacker`; on wasm
//! the closure is called directly.

/// Grow the stack when less than this many bytes remain.
const RED_ZONE: usize = 128 * 1024;

/// Size of each newly allocated stack segment.
const SEGMENT_SIZE: usize = 1024 * 1024;

/// Run `f`, first growing the stack if the red zone has been reached.
///
/// ```text
/// fn parse_unary(&mut self) -> ParseResult<NodeId> {
///     ensure_sufficient_stack(|| self.parse_unary_inner())
/// }
/// ```
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, SEGMENT_SIZE, f)
}

/// Wasm manages its own stack; call straight through.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Models a nested-parenthesis walk: `((((x))))`.
    fn nesting_depth(input: &[u8]) -> usize {
        ensure_sufficient_stack(|| match input.split_first() {
            Some((b'(', rest)) => 1 + nesting_depth(rest),
            _ => 0,
        })
    }

    #[test]
    fn test_shallow_nesting() {
        assert_eq!(nesting_depth(b"(((x)))"), 3);
    }

    #[test]
    fn test_deep_nesting_does_not_overflow() {
        let input = vec![b'('; 200_000];
        assert_eq!(nesting_depth(&input), 200_000);
    }

    #[test]
    fn test_propagates_result() {
        let result: Result<u8, String> = ensure_sufficient_stack(|| Err("nope".to_string()));
        assert_eq!(result, Err("nope".to_string()));
    }
}
