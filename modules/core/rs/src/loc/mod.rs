pub use direction::Direction;
pub use span::{Span, SpanOp};

mod direction;
mod span;
