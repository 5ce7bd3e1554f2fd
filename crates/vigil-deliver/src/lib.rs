//! Size-tiered delivery shaping and the outbound send seam.
//!
//! Rendered audit text is shaped into one of three payload variants by
//! body length alone: short bodies go out as plain text, medium bodies as a
//! rich block with accent color and footer, and anything larger as a file
//! attachment. The thresholds are fixed platform constants; the three
//! bands are contiguous and exhaustive.
//!
//! Actual delivery happens through the [`DeliverySink`] trait, the single
//! asynchronous boundary of the pipeline. [`HttpSink`] is the reqwest-backed
//! reference implementation; tests substitute their own recording sinks.

mod http;
mod payload;
mod sink;

pub use http::HttpSink;
pub use payload::{
    shape, DeliveryPayload, PayloadKind, PLAIN_TEXT_MAX_CHARS, RICH_BLOCK_MAX_CHARS,
};
pub use sink::{DeliverySink, SendError};
