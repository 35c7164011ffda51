use thiserror::Error;

/// Failures of the adjustment stage.
///
/// Malformed input data (unsorted suffixes, corrupt records) is a caller
/// precondition and is not reported here.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum AdjustError {
    #[error("no chain positions supplied")]
    NoPositions,

    #[error("chain position {index} carries order {found} records, expected order {expected}")]
    OrderMismatch {
        index: usize,
        expected: usize,
        found: usize,
    },

    #[error("downstream consumer of order {order} hung up")]
    Disconnected { order: usize },

    #[error("order {order} chain ran out of blocks to write into")]
    Exhausted { order: usize },

    #[error("order {order} discount for count class {class} is {value}")]
    BadDiscount { order: usize, class: usize, value: f32 },
}
