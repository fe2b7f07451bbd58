//! Regression test module wiring for session behaviors.

mod timing;

/// Shared imports for session tests.
mod support {
    pub(super) use super::super::*;
    pub(super) use crate::game::test_support::*;
    pub(super) use crate::*;

    pub(super) fn difficulty(value: u8) -> Difficulty {
        Difficulty::new(value).unwrap()
    }
}
