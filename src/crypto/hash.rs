use sha2::{Digest, Sha256, Sha384};

use crate::types::HashAlgorithm;
use crate::Error;

/// A hash context that supports SHA256 and SHA384 algorithms
pub enum Hash {
    Sha256(Sha256),
    Sha384(Sha384),
}

impl Hash {
    /// Create a new hash context with the specified algorithm
    pub fn new(algorithm: HashAlgorithm) -> Result<Self, Error> {
        match algorithm {
            HashAlgorithm::SHA256 => Ok(Hash::Sha256(Sha256::new())),
            HashAlgorithm::SHA384 => Ok(Hash::Sha384(Sha384::new())),
            _ => Err(Error::Digest(format!(
                "Unsupported hash algorithm: {:?}",
                algorithm
            ))),
        }
    }

    pub fn update(&mut self, data: &[u8]) {
        match self {
            Hash::Sha256(hasher) => hasher.update(data),
            Hash::Sha384(hasher) => hasher.update(data),
        }
    }

    pub fn finalize(self) -> Vec<u8> {
        match self {
            Hash::Sha256(hasher) => hasher.finalize().to_vec(),
            Hash::Sha384(hasher) => hasher.finalize().to_vec(),
        }
    }
}
