//! Signed licence documents for licencekit.
//!
//! A licence names an owner, an expiry and a list of features. It is
//! serialized with a fixed, language-neutral schema, signed, wrapped in an
//! obfuscated envelope and rendered as a block of base64 between two marker
//! lines, so it can be pasted into e-mails or files alongside other text.
//!
//! Verification is all-or-nothing: a document whose signature does not check
//! out decodes to `None`, and its payload is never parsed.

mod document;
mod error;
mod licence;
mod payload;

pub use document::{ENVELOPE_XOR, LICENCE_END, LICENCE_START, LINE_WIDTH, LicenceDocumentCodec};
pub use error::{LicenceError, LicenceResult};
pub use licence::ProductLicence;
pub use payload::{decode_payload, encode_payload};
