//! TLS 1.2 PRF and key expansion (RFC 5246 Sections 5 and 6.3).

use hmac::{Hmac, Mac};
use sha2::{Sha256, Sha384};
use tinyvec::TinyVec;
use zeroize::Zeroize;

use crate::types::HashAlgorithm;
use crate::Error;

/// PRF for TLS 1.2.
///
/// PRF(secret, label, seed) = P_<hash>(secret, label + seed)
///
/// The seed is the seed data WITHOUT the label; the label is prepended here.
pub fn prf_tls12(
    secret: &[u8],
    label: &str,
    seed: &[u8],
    output_len: usize,
    hash: HashAlgorithm,
) -> Result<Vec<u8>, Error> {
    if !label.is_ascii() {
        return Err(Error::Derivation(format!("Non-ASCII PRF label: {:?}", label)));
    }

    let mut full_seed: TinyVec<[u8; 128]> = TinyVec::default();
    full_seed.extend_from_slice(label.as_bytes());
    full_seed.extend_from_slice(seed);

    let mut out = Vec::with_capacity(output_len);

    match hash {
        HashAlgorithm::SHA256 => p_hash::<Hmac<Sha256>>(secret, &full_seed, &mut out, output_len)?,
        HashAlgorithm::SHA384 => p_hash::<Hmac<Sha384>>(secret, &full_seed, &mut out, output_len)?,
        _ => {
            return Err(Error::Derivation(format!(
                "Unsupported PRF hash for TLS1.2: {:?}",
                hash
            )))
        }
    }

    Ok(out)
}

fn p_hash<M: Mac + Clone>(
    secret: &[u8],
    full_seed: &[u8],
    out: &mut Vec<u8>,
    output_len: usize,
) -> Result<(), Error>
where
    M: hmac::digest::KeyInit,
{
    let keyed = <M as Mac>::new_from_slice(secret)
        .map_err(|_| Error::Derivation("Invalid HMAC key length".to_string()))?;

    // A(1) = HMAC_hash(secret, A(0)) where A(0) = seed
    let mut mac = keyed.clone();
    mac.update(full_seed);
    let mut a = mac.finalize().into_bytes();

    while out.len() < output_len {
        // HMAC_hash(secret, A(i) + seed)
        let mut mac = keyed.clone();
        mac.update(&a);
        mac.update(full_seed);
        let block = mac.finalize().into_bytes();

        let to_copy = (output_len - out.len()).min(block.len());
        out.extend_from_slice(&block[..to_copy]);

        // A(i+1) = HMAC_hash(secret, A(i))
        let mut mac = keyed.clone();
        mac.update(&a);
        a = mac.finalize().into_bytes();
    }

    Ok(())
}

/// Key material split out of the key block, in RFC 5246 Section 6.3 order.
///
/// Every field is wiped on drop.
pub struct KeyBlock {
    pub client_mac_key: Vec<u8>,
    pub server_mac_key: Vec<u8>,
    pub client_write_key: Vec<u8>,
    pub server_write_key: Vec<u8>,
    pub client_write_iv: Vec<u8>,
    pub server_write_iv: Vec<u8>,
}

impl Drop for KeyBlock {
    fn drop(&mut self) {
        self.client_mac_key.zeroize();
        self.server_mac_key.zeroize();
        self.client_write_key.zeroize();
        self.server_write_key.zeroize();
        self.client_write_iv.zeroize();
        self.server_write_iv.zeroize();
    }
}

impl std::fmt::Debug for KeyBlock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyBlock")
            .field("mac_key_len", &self.client_mac_key.len())
            .field("key_len", &self.client_write_key.len())
            .field("iv_len", &self.client_write_iv.len())
            .finish()
    }
}

/// Key expansion for TLS 1.2.
///
/// key_block = PRF(master_secret, "key expansion", server_random + client_random)
pub fn key_expansion(
    master_secret: &[u8],
    client_random: &[u8],
    server_random: &[u8],
    mac_len: usize,
    key_len: usize,
    iv_len: usize,
    hash: HashAlgorithm,
) -> Result<KeyBlock, Error> {
    // The seed order is reversed relative to the master secret computation.
    let mut seed: TinyVec<[u8; 64]> = TinyVec::default();
    seed.extend_from_slice(server_random);
    seed.extend_from_slice(client_random);

    let total = 2 * (mac_len + key_len + iv_len);
    let mut material = prf_tls12(master_secret, "key expansion", &seed, total, hash)?;

    let mut offset = 0;
    let mut take = |len: usize| {
        let part = material[offset..offset + len].to_vec();
        offset += len;
        part
    };

    let block = KeyBlock {
        client_mac_key: take(mac_len),
        server_mac_key: take(mac_len),
        client_write_key: take(key_len),
        server_write_key: take(key_len),
        client_write_iv: take(iv_len),
        server_write_iv: take(iv_len),
    };

    material.zeroize();

    Ok(block)
}
