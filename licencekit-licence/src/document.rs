//! The textual licence document.
//!
//! ```text
//! ---------------------- my-application licence - START ----------------------
//! <base64 of the obfuscated envelope, wrapped at the marker width>
//! ---------------------- my-application licence -  END  ----------------------
//!
//! ```
//!
//! The envelope is `u32 signature_len | signature | payload` with every byte
//! XORed by [`ENVELOPE_XOR`]. The XOR only keeps the base64 from being
//! recognizable at a glance; the signature is what protects the payload.

use std::path::Path;
use std::sync::Arc;

use base64::{Engine, engine::general_purpose::STANDARD};
use licencekit_crypto::SignatureEngine;
use tracing::debug;

use crate::error::{LicenceError, LicenceResult};
use crate::licence::ProductLicence;
use crate::payload::{decode_payload, encode_payload};

/// First line of a licence block.
pub const LICENCE_START: &str =
    "---------------------- my-application licence - START ----------------------";

/// Last line of a licence block.
pub const LICENCE_END: &str =
    "---------------------- my-application licence -  END  ----------------------";

/// Byte every envelope byte is XORed with.
pub const ENVELOPE_XOR: u8 = 0x26;

/// Width of the base64 body lines.
pub const LINE_WIDTH: usize = LICENCE_START.len();

/// Writes and reads signed licence documents.
#[derive(Debug, Clone)]
pub struct LicenceDocumentCodec {
    engine: Arc<SignatureEngine>,
}

impl LicenceDocumentCodec {
    /// Creates a codec over a loaded signature engine.
    #[must_use]
    pub fn new(engine: Arc<SignatureEngine>) -> Self {
        Self { engine }
    }

    /// The engine used to sign and verify.
    #[must_use]
    pub fn engine(&self) -> &SignatureEngine {
        &self.engine
    }

    /// Signs a licence and renders it as a document.
    ///
    /// # Errors
    ///
    /// Returns an error if the engine cannot sign (no private key) or a
    /// field is too large for the payload schema.
    pub fn encode(&self, licence: &ProductLicence) -> LicenceResult<String> {
        let payload = encode_payload(licence)?;
        let signature = self.engine.sign(&payload)?;
        let signature_len = u32::try_from(signature.len())
            .map_err(|_| LicenceError::FieldTooLarge("signature"))?;

        let mut envelope = Vec::with_capacity(4 + signature.len() + payload.len());
        envelope.extend_from_slice(&signature_len.to_be_bytes());
        envelope.extend_from_slice(&signature);
        envelope.extend_from_slice(&payload);
        xor(&mut envelope);

        let encoded = STANDARD.encode(&envelope);
        let mut document = String::with_capacity(encoded.len() + 4 * LINE_WIDTH);
        document.push_str(LICENCE_START);
        document.push('\n');
        for line in encoded.as_bytes().chunks(LINE_WIDTH) {
            document.push_str(&String::from_utf8_lossy(line));
            document.push('\n');
        }
        document.push_str(LICENCE_END);
        document.push_str("\n\n");
        Ok(document)
    }

    /// Reads the licence block out of `document` and verifies it.
    ///
    /// Text around the block is ignored. Returns `Ok(None)` when the block is
    /// missing or malformed, or its signature does not verify.
    ///
    /// # Errors
    ///
    /// Returns [`LicenceError::CorruptPayload`] if the signature verifies but
    /// the payload does not parse.
    pub fn decode(&self, document: &str) -> LicenceResult<Option<ProductLicence>> {
        let Some(body) = extract_body(document) else {
            debug!("licence markers not found");
            return Ok(None);
        };
        let Ok(mut envelope) = STANDARD.decode(body.as_bytes()) else {
            debug!("licence body is not base64");
            return Ok(None);
        };
        xor(&mut envelope);

        let Some((signature, payload)) = split_envelope(&envelope) else {
            debug!(len = envelope.len(), "licence envelope truncated");
            return Ok(None);
        };
        if !self.engine.verify(payload, signature) {
            debug!("licence signature rejected");
            return Ok(None);
        }
        decode_payload(payload).map(Some)
    }

    /// Signs a licence and writes the document to `path`.
    ///
    /// # Errors
    ///
    /// As [`encode`](Self::encode), plus I/O errors.
    pub fn encode_to_file(
        &self,
        licence: &ProductLicence,
        path: impl AsRef<Path>,
    ) -> LicenceResult<()> {
        let document = self.encode(licence)?;
        std::fs::write(path, document)?;
        Ok(())
    }

    /// Reads and verifies the licence document at `path`.
    ///
    /// # Errors
    ///
    /// As [`decode`](Self::decode), plus I/O errors.
    pub fn decode_file(
        &self,
        path: impl AsRef<Path>,
    ) -> LicenceResult<Option<ProductLicence>> {
        let document = std::fs::read_to_string(path)?;
        self.decode(&document)
    }
}

fn xor(bytes: &mut [u8]) {
    for b in bytes {
        *b ^= ENVELOPE_XOR;
    }
}

/// Concatenates the lines strictly between the two markers.
fn extract_body(document: &str) -> Option<String> {
    let mut lines = document.lines();
    lines.by_ref().find(|line| line.contains(LICENCE_START))?;

    let mut body = String::new();
    for line in lines {
        if line.contains(LICENCE_END) {
            return Some(body);
        }
        body.push_str(line.trim());
    }
    None
}

fn split_envelope(envelope: &[u8]) -> Option<(&[u8], &[u8])> {
    let (len, rest) = envelope.split_first_chunk::<4>()?;
    let len = u32::from_be_bytes(*len) as usize;
    (len <= rest.len()).then(|| rest.split_at(len))
}
