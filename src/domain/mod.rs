//! Domain models for attachsync
//!
//! Contains the attachment reference logic without any I/O concerns.

mod reference;

pub use reference::AttachmentReference;
