//! The licence record.

use chrono::{DateTime, SubsecRound, Utc};
use serde::Serialize;

/// What a licence grants: who owns it, until when, and which features.
///
/// Expiry is kept to millisecond precision, the resolution of the signed
/// payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductLicence {
    owner: String,
    expire_at: DateTime<Utc>,
    features: Vec<String>,
}

impl ProductLicence {
    /// Creates a licence. Feature order and duplicates are preserved.
    pub fn new<I, S>(owner: impl Into<String>, expire_at: DateTime<Utc>, features: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            owner: owner.into(),
            expire_at: expire_at.trunc_subsecs(3),
            features: features.into_iter().map(Into::into).collect(),
        }
    }

    /// The licence holder.
    #[must_use]
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// When the licence stops being valid.
    #[must_use]
    pub fn expire_at(&self) -> DateTime<Utc> {
        self.expire_at
    }

    /// Enabled feature labels, in issue order.
    #[must_use]
    pub fn features(&self) -> &[String] {
        &self.features
    }

    /// Returns true if `feature` is enabled.
    #[must_use]
    pub fn has_feature(&self, feature: &str) -> bool {
        self.features.iter().any(|f| f == feature)
    }

    /// Returns true if the licence has expired at `now`.
    #[must_use]
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expire_at
    }

    /// Returns true if the licence has expired.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }
}
