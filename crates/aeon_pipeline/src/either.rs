//! A small ad hoc two-case sum (§10.6), standing in for the original
//! implementation's `black::support::either<Cases...>` where only two
//! shapes are ever in play: used by the surrogate encoder to distinguish
//! "this subterm needed no rewriting" from "this subterm's own node was
//! replaced by a fresh surrogate atom", without declaring a one-off variant
//! family just for that distinction.

/// Either a `Left` or a `Right` value, never both.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Either<L, R> {
    Left(L),
    Right(R),
}

impl<L, R> Either<L, R> {
    /// Collapses both cases through their own handler into a common type.
    pub fn either<T>(self, left: impl FnOnce(L) -> T, right: impl FnOnce(R) -> T) -> T {
        match self {
            Either::Left(l) => left(l),
            Either::Right(r) => right(r),
        }
    }

    pub fn is_left(&self) -> bool {
        matches!(self, Either::Left(_))
    }

    pub fn is_right(&self) -> bool {
        matches!(self, Either::Right(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn either_collapses_through_the_matching_handler() {
        let l: Either<i32, &str> = Either::Left(3);
        let r: Either<i32, &str> = Either::Right("surrogate");
        assert_eq!(l.either(|n| n * 2, |_| -1), 6);
        assert_eq!(r.either(|n| n * 2, |s| s.len() as i32), 10);
    }

    #[test]
    fn is_left_and_is_right_report_the_active_case() {
        let l: Either<i32, &str> = Either::Left(1);
        assert!(l.is_left());
        assert!(!l.is_right());
    }
}
