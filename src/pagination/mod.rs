//! Pagination module
//!
//! Turns a cursor-paginated endpoint into a lazy, cancellable stream of
//! page batches.
//!
//! # Overview
//!
//! A `PageStream` owns one background fetch loop. The loop issues one
//! request per page, hands the decoded batch to the consumer and only then
//! follows `nextPageCursor`. It stops when the page limit is reached, the
//! server returns no cursor, or a request fails. Failures travel on a
//! separate error channel so "no more data" and "failed mid-stream" stay
//! distinguishable; pages delivered before a failure remain valid.
//!
//! The loop holds at most one undelivered page. It does not start the next
//! request until the consumer has taken the previous page, and it stops
//! issuing requests as soon as the consumer drops the stream.

mod stream;
mod types;

pub use stream::{ErrorReceiver, PageReceiver, PageStream};
pub use types::{CursorPage, FetchState, Page, PageRequest};
