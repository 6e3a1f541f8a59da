use thiserror::Error;

use crate::SelectionPolicy;

/// Fatal tree errors. Lifecycle misuse is not listed here: it panics in [`crate::Slot`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BtError {
    #[error("unimplemented selection policy: {0:?}")]
    UnimplementedPolicy(SelectionPolicy),
}
