//! Checks on a piece of code: whether it panics, and how long it takes.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::time::{Duration, Instant};

use tracing::trace;
use verity_describe::DescribeOptions;
use verity_message::FluentMessage;
use verity_types::{CheckConfig, Inspect, Value};

use crate::check::{failed, FluentCheck};
use crate::error::{CheckError, CheckResult};

const ENTITY: &str = "code";

/// Code that already ran, with its outcome and duration.
///
/// Built by [`Check::that_code`](crate::Check::that_code). A panic is
/// caught and recorded as the outcome instead of unwinding into the test.
#[derive(Debug)]
pub struct CodeCheck<R> {
    outcome: Result<R, String>,
    elapsed: Duration,
    negated: bool,
    config: CheckConfig,
}

impl<R> CodeCheck<R> {
    pub(crate) fn run(code: impl FnOnce() -> R, config: CheckConfig) -> Self {
        let started = Instant::now();
        let outcome = panic::catch_unwind(AssertUnwindSafe(code)).map_err(panic_text);
        let elapsed = started.elapsed();
        trace!(?elapsed, panicked = outcome.is_err(), "code ran");
        Self {
            outcome,
            elapsed,
            negated: false,
            config,
        }
    }

    /// Negate the next check.
    #[allow(clippy::should_implement_trait)]
    pub fn not(mut self) -> Self {
        self.negated = !self.negated;
        self
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// The panic message, if the code panicked.
    pub fn panic_message(&self) -> Option<&str> {
        self.outcome.as_ref().err().map(String::as_str)
    }

    fn message(&self, template: &str) -> FluentMessage {
        FluentMessage::new(template)
            .with_options(DescribeOptions::from_config(&self.config))
            .for_entity(ENTITY)
    }

    fn conclude(
        self,
        check: &'static str,
        passed: bool,
        failure: impl FnOnce(&Self) -> FluentMessage,
        negated_failure: impl FnOnce(&Self) -> FluentMessage,
    ) -> CheckResult<CodeLink<R>> {
        if passed != self.negated {
            return Ok(CodeLink { check: self });
        }
        let message = if self.negated {
            negated_failure(&self)
        } else {
            failure(&self)
        };
        Err(failed(check, self.negated, message))
    }

    /// The code returned normally. `which()` checks the returned value.
    pub fn does_not_throw(self) -> CheckResult<CodeLink<R>> {
        let passed = self.outcome.is_ok();
        self.conclude(
            "does_not_throw",
            passed,
            |c| {
                c.message("The {0} raised a panic, whereas it must not.")
                    .with_given_value(Value::Str(c.panic_message().unwrap_or_default().into()))
                    .label("The panic message:")
                    .and()
            },
            |c| c.message("The {0} did not raise a panic, whereas it must."),
        )
    }

    /// The code panicked. `with_message()` checks the panic message.
    ///
    /// # Errors
    ///
    /// Returns [`CheckError::InvalidOperation`] after `not()`; use
    /// [`Self::does_not_throw`] instead.
    pub fn throws_any(self) -> CheckResult<PanicLink> {
        if self.negated {
            return Err(CheckError::InvalidOperation(
                "throws_any() cannot be negated, use does_not_throw()".into(),
            ));
        }
        match self.outcome {
            Err(message) => Ok(PanicLink {
                message,
                config: self.config,
            }),
            Ok(_) => {
                let message = self.message("The {0} did not raise a panic, whereas it must.");
                Err(failed("throws_any", false, message))
            }
        }
    }

    /// The code ran in less than `limit`.
    pub fn lasts_less_than(self, limit: Duration) -> CheckResult<CodeLink<R>> {
        let passed = self.elapsed < limit;
        self.conclude(
            "lasts_less_than",
            passed,
            |c| {
                c.message("The {0} took more than the allowed duration.")
                    .with_given_value(c.elapsed.inspect())
                    .label("The execution time:")
                    .expected(limit.inspect())
                    .label("The allowed duration:")
                    .and()
            },
            |c| {
                c.message("The {0} took less than the given duration whereas it must not.")
                    .with_given_value(c.elapsed.inspect())
                    .label("The execution time:")
                    .expected(limit.inspect())
                    .label("The given duration:")
                    .and()
            },
        )
    }
}

fn panic_text(payload: Box<dyn Any + Send>) -> String {
    if let Some(text) = payload.downcast_ref::<&str>() {
        (*text).to_string()
    } else if let Some(text) = payload.downcast_ref::<String>() {
        text.clone()
    } else {
        "<non-string panic payload>".to_string()
    }
}

/// A passing code check.
#[derive(Debug)]
pub struct CodeLink<R> {
    check: CodeCheck<R>,
}

impl<R> CodeLink<R> {
    /// Chain another check on the same run, with negation reset.
    pub fn and(mut self) -> CodeCheck<R> {
        self.check.negated = false;
        self.check
    }

    /// Check the value the code returned.
    ///
    /// # Errors
    ///
    /// Returns [`CheckError::InvalidOperation`] when the code panicked.
    pub fn which(self) -> CheckResult<FluentCheck<R>> {
        match self.check.outcome {
            Ok(value) => Ok(FluentCheck::new(value, self.check.config)),
            Err(_) => Err(CheckError::InvalidOperation(
                "which() has no returned value: the code panicked".into(),
            )),
        }
    }
}

/// A caught panic.
#[derive(Clone, Debug)]
pub struct PanicLink {
    message: String,
    config: CheckConfig,
}

impl PanicLink {
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The panic message equals `expected`.
    pub fn with_message(self, expected: &str) -> CheckResult<PanicLink> {
        if self.message == expected {
            return Ok(self);
        }
        let message = FluentMessage::new("The {0} is different from the {1}.")
            .with_options(DescribeOptions::from_config(&self.config))
            .for_entity("panic message")
            .for_expected_entity("panic message")
            .on(Value::Str(self.message.clone()))
            .expected(Value::Str(expected.into()));
        Err(failed("with_message", false, message.into()))
    }
}
