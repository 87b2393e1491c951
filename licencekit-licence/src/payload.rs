//! Portable binary schema for the signed licence payload.
//!
//! All integers are big-endian:
//!
//! ```text
//! u32 owner_len | owner (UTF-8)
//! i64 expire_at (milliseconds since the Unix epoch)
//! u32 feature_count | { u32 len | feature (UTF-8) } * feature_count
//! ```

use chrono::DateTime;

use crate::error::{LicenceError, LicenceResult};
use crate::licence::ProductLicence;

/// Serializes a licence into its payload bytes.
///
/// # Errors
///
/// Returns [`LicenceError::FieldTooLarge`] if a string or the feature list
/// exceeds `u32::MAX` entries.
pub fn encode_payload(licence: &ProductLicence) -> LicenceResult<Vec<u8>> {
    let mut out = Vec::new();
    put_str(&mut out, licence.owner(), "owner")?;
    out.extend_from_slice(&licence.expire_at().timestamp_millis().to_be_bytes());
    put_len(&mut out, licence.features().len(), "features")?;
    for feature in licence.features() {
        put_str(&mut out, feature, "feature")?;
    }
    Ok(out)
}

/// Parses payload bytes back into a licence.
///
/// # Errors
///
/// Returns [`LicenceError::CorruptPayload`] if the bytes do not follow the
/// schema exactly, including trailing bytes.
pub fn decode_payload(bytes: &[u8]) -> LicenceResult<ProductLicence> {
    let mut reader = Reader { bytes };
    let owner = reader.string("owner")?;
    let millis = i64::from_be_bytes(reader.array("expiry")?);
    let expire_at = DateTime::from_timestamp_millis(millis)
        .ok_or_else(|| corrupt(format!("expiry {millis} out of range")))?;

    let count = reader.u32("feature count")? as usize;
    // Every feature needs at least its 4-byte length.
    if count > reader.bytes.len() / 4 {
        return Err(corrupt(format!("{count} features cannot fit")));
    }
    let mut features = Vec::with_capacity(count);
    for _ in 0..count {
        features.push(reader.string("feature")?);
    }

    if !reader.bytes.is_empty() {
        return Err(corrupt(format!("{} trailing bytes", reader.bytes.len())));
    }
    Ok(ProductLicence::new(owner, expire_at, features))
}

fn put_len(out: &mut Vec<u8>, len: usize, field: &'static str) -> LicenceResult<()> {
    let len = u32::try_from(len).map_err(|_| LicenceError::FieldTooLarge(field))?;
    out.extend_from_slice(&len.to_be_bytes());
    Ok(())
}

fn put_str(out: &mut Vec<u8>, value: &str, field: &'static str) -> LicenceResult<()> {
    put_len(out, value.len(), field)?;
    out.extend_from_slice(value.as_bytes());
    Ok(())
}

fn corrupt(reason: String) -> LicenceError {
    LicenceError::CorruptPayload(reason)
}

struct Reader<'a> {
    bytes: &'a [u8],
}

impl<'a> Reader<'a> {
    fn take(&mut self, n: usize, field: &str) -> LicenceResult<&'a [u8]> {
        if n > self.bytes.len() {
            return Err(corrupt(format!("truncated {field}")));
        }
        let (head, rest) = self.bytes.split_at(n);
        self.bytes = rest;
        Ok(head)
    }

    fn array<const N: usize>(&mut self, field: &str) -> LicenceResult<[u8; N]> {
        let (head, rest) = self
            .bytes
            .split_first_chunk::<N>()
            .ok_or_else(|| corrupt(format!("truncated {field}")))?;
        self.bytes = rest;
        Ok(*head)
    }

    fn u32(&mut self, field: &str) -> LicenceResult<u32> {
        self.array(field).map(u32::from_be_bytes)
    }

    fn string(&mut self, field: &str) -> LicenceResult<String> {
        let len = self.u32(field)? as usize;
        let raw = self.take(len, field)?;
        String::from_utf8(raw.to_vec()).map_err(|_| corrupt(format!("{field} is not UTF-8")))
    }
}
