//! Building blocks of the `sharepaste` binary: the HTTP transport and draft
//! store selection.

pub mod drafts;
pub mod transport;

pub use drafts::open_draft_store;
pub use transport::HttpTransport;
