use verity_types::Inspect;

use crate::check::{CheckLink, FluentCheck};
use crate::error::CheckResult;

/// Primitive numbers the numeric checks accept.
pub trait Numeric: Inspect + Copy + PartialOrd {
    fn zero() -> Self;
    /// `|self - other| <= tolerance`, computed without leaving `Self`'s
    /// precision. A negative tolerance is never met.
    fn is_within(self, other: Self, tolerance: Self) -> bool;
}

macro_rules! impl_numeric {
    (signed: $($s:ty),*; unsigned: $($u:ty),*; float: $($f:ty),* $(;)?) => {
        $(
            impl Numeric for $s {
                fn zero() -> Self {
                    0
                }

                fn is_within(self, other: Self, tolerance: Self) -> bool {
                    tolerance >= 0 && self.abs_diff(other) <= tolerance.unsigned_abs()
                }
            }
        )*
        $(
            impl Numeric for $u {
                fn zero() -> Self {
                    0
                }

                fn is_within(self, other: Self, tolerance: Self) -> bool {
                    self.abs_diff(other) <= tolerance
                }
            }
        )*
        $(
            impl Numeric for $f {
                fn zero() -> Self {
                    0.0
                }

                fn is_within(self, other: Self, tolerance: Self) -> bool {
                    (self - other).abs() <= tolerance
                }
            }
        )*
    };
}

impl_numeric!(
    signed: i8, i16, i32, i64, i128, isize;
    unsigned: u8, u16, u32, u64, u128, usize;
    float: f32, f64;
);

/// Checks on numbers. Comparisons involving NaN never hold.
pub trait NumberCheck<N>: Sized {
    fn is_zero(self) -> CheckResult<CheckLink<N>>;
    fn is_not_zero(self) -> CheckResult<CheckLink<N>>;
    fn is_strictly_positive(self) -> CheckResult<CheckLink<N>>;
    fn is_positive_or_zero(self) -> CheckResult<CheckLink<N>>;
    fn is_strictly_negative(self) -> CheckResult<CheckLink<N>>;
    fn is_negative_or_zero(self) -> CheckResult<CheckLink<N>>;
    /// Strictly greater than `other`.
    fn is_after(self, other: N) -> CheckResult<CheckLink<N>>;
    /// Strictly less than `other`.
    fn is_before(self, other: N) -> CheckResult<CheckLink<N>>;
    /// Greater than or equal to `other`.
    fn is_greater_than(self, other: N) -> CheckResult<CheckLink<N>>;
    fn is_strictly_greater_than(self, other: N) -> CheckResult<CheckLink<N>>;
    /// Less than or equal to `other`.
    fn is_less_than(self, other: N) -> CheckResult<CheckLink<N>>;
    fn is_strictly_less_than(self, other: N) -> CheckResult<CheckLink<N>>;
    /// Within `tolerance` of `expected`, bounds included.
    fn is_close_to(self, expected: N, tolerance: N) -> CheckResult<CheckLink<N>>;
}

impl<N: Numeric> NumberCheck<N> for FluentCheck<N> {
    fn is_zero(self) -> CheckResult<CheckLink<N>> {
        let passed = self.value == N::zero();
        sign(self, "is_zero", passed, "equal to zero")
    }

    fn is_not_zero(self) -> CheckResult<CheckLink<N>> {
        self.not().is_zero()
    }

    fn is_strictly_positive(self) -> CheckResult<CheckLink<N>> {
        let passed = self.value > N::zero();
        sign(self, "is_strictly_positive", passed, "strictly positive")
    }

    fn is_positive_or_zero(self) -> CheckResult<CheckLink<N>> {
        let passed = self.value >= N::zero();
        sign(self, "is_positive_or_zero", passed, "positive or zero")
    }

    fn is_strictly_negative(self) -> CheckResult<CheckLink<N>> {
        let passed = self.value < N::zero();
        sign(self, "is_strictly_negative", passed, "strictly negative")
    }

    fn is_negative_or_zero(self) -> CheckResult<CheckLink<N>> {
        let passed = self.value <= N::zero();
        sign(self, "is_negative_or_zero", passed, "negative or zero")
    }

    fn is_after(self, other: N) -> CheckResult<CheckLink<N>> {
        let passed = self.value > other;
        relate(self, "is_after", passed, "after", other)
    }

    fn is_before(self, other: N) -> CheckResult<CheckLink<N>> {
        let passed = self.value < other;
        relate(self, "is_before", passed, "before", other)
    }

    fn is_greater_than(self, other: N) -> CheckResult<CheckLink<N>> {
        let passed = self.value >= other;
        relate(self, "is_greater_than", passed, "greater than or equal to", other)
    }

    fn is_strictly_greater_than(self, other: N) -> CheckResult<CheckLink<N>> {
        let passed = self.value > other;
        relate(self, "is_strictly_greater_than", passed, "strictly greater than", other)
    }

    fn is_less_than(self, other: N) -> CheckResult<CheckLink<N>> {
        let passed = self.value <= other;
        relate(self, "is_less_than", passed, "less than or equal to", other)
    }

    fn is_strictly_less_than(self, other: N) -> CheckResult<CheckLink<N>> {
        let passed = self.value < other;
        relate(self, "is_strictly_less_than", passed, "strictly less than", other)
    }

    fn is_close_to(self, expected: N, tolerance: N) -> CheckResult<CheckLink<N>> {
        let passed = self.value.is_within(expected, tolerance);
        self.decide(
            "is_close_to",
            passed,
            |c| {
                c.message("The {0} is not close to the {1}.")
                    .on(c.checked())
                    .expected(expected.inspect())
                    .comparison("close to")
                    .with_given_value(tolerance.inspect())
                    .label("The tolerance:")
            },
            |c| {
                c.message("The {0} is close to the {1} whereas it must not.")
                    .on(c.checked())
                    .expected(expected.inspect())
                    .comparison("not close to")
                    .with_given_value(tolerance.inspect())
                    .label("The tolerance:")
            },
        )
    }
}

fn sign<N: Numeric>(
    check: FluentCheck<N>,
    name: &'static str,
    passed: bool,
    description: &str,
) -> CheckResult<CheckLink<N>> {
    check.decide(
        name,
        passed,
        |c| c.message(format!("The {{0}} is not {description}.")).on(c.checked()),
        |c| {
            c.message(format!("The {{0}} is {description} whereas it must not."))
                .on(c.checked())
        },
    )
}

fn relate<N: Numeric>(
    check: FluentCheck<N>,
    name: &'static str,
    passed: bool,
    relation: &str,
    other: N,
) -> CheckResult<CheckLink<N>> {
    check.decide(
        name,
        passed,
        |c| {
            c.message(format!("The {{0}} is not {relation} the {{1}}."))
                .on(c.checked())
                .expected(other.inspect())
                .comparison(relation)
        },
        |c| {
            c.message(format!("The {{0}} is {relation} the {{1}} whereas it must not."))
                .on(c.checked())
                .expected(other.inspect())
                .comparison(format!("not {relation}"))
        },
    )
}
