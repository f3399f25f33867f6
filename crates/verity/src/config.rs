//! Per-thread check configuration.
//!
//! Test harnesses run tests on parallel threads, so each thread owns its
//! copy. A check snapshots the configuration when it is created.

use std::cell::RefCell;

use tracing::debug;
use verity_types::CheckConfig;

thread_local! {
    static CURRENT: RefCell<CheckConfig> = RefCell::new(CheckConfig::default());
}

/// Snapshot of the calling thread's configuration.
pub(crate) fn current() -> CheckConfig {
    CURRENT.with(|config| config.borrow().clone())
}

/// Apply `change` to the calling thread's configuration.
pub(crate) fn update(change: impl FnOnce(&mut CheckConfig)) {
    CURRENT.with(|config| {
        let mut config = config.borrow_mut();
        change(&mut config);
        debug!(
            string_truncation_length = config.string_truncation_length,
            max_items = config.max_items,
            equal_mode = ?config.equal_mode,
            decimal_separator = %config.decimal_separator,
            "check configuration updated"
        );
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use verity_types::EqualMode;

    #[test]
    fn updates_stay_on_their_thread() {
        update(|config| config.equal_mode = EqualMode::Equals);
        assert_eq!(current().equal_mode, EqualMode::Equals);

        let other = thread::spawn(|| current().equal_mode).join().unwrap();
        assert_eq!(other, EqualMode::FluentEquals);

        update(|config| *config = CheckConfig::default());
    }
}
