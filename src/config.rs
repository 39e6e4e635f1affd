use crate::Error;

/// Largest plaintext a DTLS 1.2 record may carry (2^14).
pub const MAX_PLAINTEXT_LEN: usize = 16_384;

/// How the 8 byte explicit part of the AEAD nonce is produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExplicitNonce {
    /// epoch(2) + sequence_number(6) of the record being protected.
    ///
    /// Unique per key as long as the record layer never reuses a sequence.
    #[default]
    Sequence,
    /// 8 fresh random bytes per record.
    Random,
}

/// Record protection configuration.
#[derive(Debug, Clone)]
pub struct Config {
    explicit_nonce: ExplicitNonce,
    max_plaintext_len: usize,
}

impl Config {
    /// Create a new configuration builder.
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder {
            explicit_nonce: ExplicitNonce::default(),
            max_plaintext_len: MAX_PLAINTEXT_LEN,
        }
    }

    /// Source of the explicit nonce written in front of each ciphertext.
    #[inline(always)]
    pub fn explicit_nonce(&self) -> ExplicitNonce {
        self.explicit_nonce
    }

    /// Max plaintext length accepted by `encrypt`.
    #[inline(always)]
    pub fn max_plaintext_len(&self) -> usize {
        self.max_plaintext_len
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            explicit_nonce: ExplicitNonce::default(),
            max_plaintext_len: MAX_PLAINTEXT_LEN,
        }
    }
}

/// Builder for [`Config`].
pub struct ConfigBuilder {
    explicit_nonce: ExplicitNonce,
    max_plaintext_len: usize,
}

impl ConfigBuilder {
    /// Set how explicit nonces are produced.
    ///
    /// Defaults to [`ExplicitNonce::Sequence`].
    pub fn explicit_nonce(mut self, explicit_nonce: ExplicitNonce) -> Self {
        self.explicit_nonce = explicit_nonce;
        self
    }

    /// Set the max plaintext length per record.
    ///
    /// Defaults to 16384, which is also the upper bound.
    pub fn max_plaintext_len(mut self, max_plaintext_len: usize) -> Self {
        self.max_plaintext_len = max_plaintext_len;
        self
    }

    pub fn build(self) -> Result<Config, Error> {
        if self.max_plaintext_len == 0 || self.max_plaintext_len > MAX_PLAINTEXT_LEN {
            return Err(Error::Config(format!(
                "max_plaintext_len must be in 1..={}, got {}",
                MAX_PLAINTEXT_LEN, self.max_plaintext_len
            )));
        }

        Ok(Config {
            explicit_nonce: self.explicit_nonce,
            max_plaintext_len: self.max_plaintext_len,
        })
    }
}
