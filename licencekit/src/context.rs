//! The immutable licensing context.
//!
//! Key material and the permutation signature are loaded once, here, and
//! never change afterwards. Everything else takes the context by reference.

use std::sync::Arc;

use licencekit_crypto::{DirectoryKeyStore, KeyStore, SignatureEngine};
use licencekit_licence::{LicenceDocumentCodec, LicenceResult, ProductLicence};
use licencekit_productkey::{ProductKeyCodec, ProductKeyResult, format_key, normalize, salt};
use tracing::{debug, info};

use crate::config::LicensingConfig;
use crate::error::ConfigResult;

/// Loaded keys plus both codecs.
#[derive(Debug)]
pub struct LicensingContext {
    licences: LicenceDocumentCodec,
    product_keys: ProductKeyCodec,
    key_length: usize,
    group_size: usize,
}

impl LicensingContext {
    /// Builds a context, reading key files from `config.key_dir`.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or key material
    /// cannot be loaded.
    pub fn from_config(config: &LicensingConfig) -> ConfigResult<Self> {
        let store = DirectoryKeyStore::new(&config.key_dir);
        Self::with_store(config, &store)
    }

    /// Builds a context, reading key material from `store`.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or key material
    /// cannot be loaded.
    pub fn with_store(config: &LicensingConfig, store: &dyn KeyStore) -> ConfigResult<Self> {
        config.validate()?;
        let engine =
            SignatureEngine::from_store(store, &config.public_key, config.private_key.as_deref())?;
        info!(
            can_sign = engine.can_sign(),
            has_signature = config.permutation_signature.is_some(),
            "licensing context loaded"
        );
        Ok(Self::from_parts(
            engine,
            config.product_key_codec()?,
            config.key_length,
            config.group_size,
        ))
    }

    /// Assembles a context from already-loaded parts.
    #[must_use]
    pub fn from_parts(
        engine: SignatureEngine,
        product_keys: ProductKeyCodec,
        key_length: usize,
        group_size: usize,
    ) -> Self {
        Self {
            licences: LicenceDocumentCodec::new(Arc::new(engine)),
            product_keys,
            key_length,
            group_size,
        }
    }

    /// The signature engine.
    #[must_use]
    pub fn engine(&self) -> &SignatureEngine {
        self.licences.engine()
    }

    /// The licence document codec.
    #[must_use]
    pub fn licences(&self) -> &LicenceDocumentCodec {
        &self.licences
    }

    /// The product key codec.
    #[must_use]
    pub fn product_keys(&self) -> &ProductKeyCodec {
        &self.product_keys
    }

    /// Signs a licence into a document.
    pub fn issue_licence(&self, licence: &ProductLicence) -> LicenceResult<String> {
        self.licences.encode(licence)
    }

    /// Verifies and reads a licence document; `None` if it is not valid.
    pub fn load_licence(&self, document: &str) -> LicenceResult<Option<ProductLicence>> {
        self.licences.decode(document)
    }

    /// Packs values into a display-formatted product key bound to `owner`.
    pub fn issue_product_key(
        &self,
        owner: &str,
        values: &[u32],
        sizes: &[u8],
    ) -> ProductKeyResult<String> {
        let key = self
            .product_keys
            .pack(values, sizes, self.key_length, &salt(owner))?;
        Ok(format_key(&key, self.group_size))
    }

    /// Reads a product key issued to `owner`; `None` if it is not valid.
    ///
    /// A key whose length differs from the configured `key_length` is
    /// invalid, even when the signature slots all fall inside it.
    pub fn read_product_key(
        &self,
        owner: &str,
        key: &str,
        sizes: &[u8],
    ) -> ProductKeyResult<Option<Vec<u32>>> {
        let length = normalize(key).chars().count();
        if length != self.key_length {
            debug!(length, expected = self.key_length, "product key has wrong length");
            return Ok(None);
        }
        self.product_keys.unpack(key, &salt(owner), sizes)
    }
}
