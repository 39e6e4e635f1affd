//! Handshake transcript cache.
//!
//! Every handshake message sent or received is pushed here as it happens,
//! possibly out of order and possibly more than once when flights are
//! retransmitted. Queries impose the order: a caller names the messages it
//! wants as a list of [`PullRule`]s and gets them back in exactly that order,
//! independent of arrival.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::crypto::Hash;
use crate::types::{HandshakeType, HashAlgorithm};
use crate::Error;

/// One cached handshake message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandshakeCacheItem {
    pub message_type: HandshakeType,
    /// Whether the client sent the message.
    pub is_client: bool,
    /// Handshake message_seq, unique per direction.
    pub message_seq: u16,
    /// Serialized message, owned by the cache.
    pub data: Vec<u8>,
}

/// "The message of this type, sent by this side."
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PullRule {
    pub message_type: HandshakeType,
    pub is_client: bool,
}

impl PullRule {
    pub const fn new(message_type: HandshakeType, is_client: bool) -> Self {
        Self {
            message_type,
            is_client,
        }
    }
}

/// Messages covered by the session hash, in RFC 5246 Section 7.3 order.
///
/// See RFC 7627 Section 3 for the extended master secret use.
pub const SESSION_HASH_RULES: [PullRule; 8] = [
    PullRule::new(HandshakeType::ClientHello, true),
    PullRule::new(HandshakeType::ServerHello, false),
    PullRule::new(HandshakeType::Certificate, false),
    PullRule::new(HandshakeType::ServerKeyExchange, false),
    PullRule::new(HandshakeType::CertificateRequest, false),
    PullRule::new(HandshakeType::ServerHelloDone, false),
    PullRule::new(HandshakeType::Certificate, true),
    PullRule::new(HandshakeType::ClientKeyExchange, true),
];

/// Thread safe store of the handshake messages of one connection.
#[derive(Debug, Default)]
pub struct HandshakeCache {
    items: Mutex<Vec<Arc<HandshakeCacheItem>>>,
}

impl HandshakeCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a message. `data` is copied.
    ///
    /// Returns `false`, storing nothing, if a message with the same
    /// `(message_seq, is_client)` is already cached.
    pub fn push(
        &self,
        data: &[u8],
        message_seq: u16,
        message_type: HandshakeType,
        is_client: bool,
    ) -> bool {
        let mut items = self.items.lock();

        if items
            .iter()
            .any(|i| i.message_seq == message_seq && i.is_client == is_client)
        {
            trace!(
                "Dupe handshake {:?} message_seq: {} is_client: {}",
                message_type,
                message_seq,
                is_client
            );
            return false;
        }

        items.push(Arc::new(HandshakeCacheItem {
            message_type,
            is_client,
            message_seq,
            data: data.to_vec(),
        }));

        trace!(
            "Cached handshake {:?} message_seq: {} is_client: {} ({} bytes)",
            message_type,
            message_seq,
            is_client,
            data.len()
        );

        true
    }

    /// One entry per rule, positionally aligned. An entry is `None` when no
    /// message matches; otherwise the match with the highest `message_seq`
    /// (e.g. the second ClientHello after a HelloVerifyRequest).
    pub fn pull(&self, rules: &[PullRule]) -> Vec<Option<Arc<HandshakeCacheItem>>> {
        let items = self.items.lock();
        pull_locked(&items, rules)
    }

    /// [`pull`](Self::pull), then concatenate the matched data in rule order.
    pub fn pull_and_merge(&self, rules: &[PullRule]) -> Vec<u8> {
        let items = self.items.lock();

        let mut merged = Vec::new();
        for item in pull_locked(&items, rules).iter().flatten() {
            merged.extend_from_slice(&item.data);
        }
        merged
    }

    /// Digest over [`SESSION_HASH_RULES`], skipping messages not present
    /// (e.g. no client certificate).
    pub fn session_hash(&self, hash: HashAlgorithm) -> Result<Vec<u8>, Error> {
        let mut ctx = Hash::new(hash)?;

        let items = self.items.lock();
        for item in pull_locked(&items, &SESSION_HASH_RULES).iter().flatten() {
            ctx.update(&item.data);
        }

        Ok(ctx.finalize())
    }

    /// Number of cached messages.
    pub fn len(&self) -> usize {
        self.items.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.lock().is_empty()
    }
}

fn pull_locked(
    items: &[Arc<HandshakeCacheItem>],
    rules: &[PullRule],
) -> Vec<Option<Arc<HandshakeCacheItem>>> {
    rules
        .iter()
        .map(|rule| {
            items
                .iter()
                .filter(|i| i.message_type == rule.message_type && i.is_client == rule.is_client)
                .max_by_key(|i| i.message_seq)
                .cloned()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_push_is_rejected() {
        let cache = HandshakeCache::new();
        assert!(cache.push(&[1, 2, 3], 0, HandshakeType::ClientHello, true));
        assert!(!cache.push(&[9, 9], 0, HandshakeType::ClientHello, true));
        // Same sequence from the other side is a different message.
        assert!(cache.push(&[4], 0, HandshakeType::ServerHello, false));
        assert_eq!(cache.len(), 2);

        let pulled = cache.pull(&[PullRule::new(HandshakeType::ClientHello, true)]);
        assert_eq!(pulled[0].as_ref().unwrap().data, vec![1, 2, 3]);
    }

    #[test]
    fn duplicate_seq_with_other_type_is_rejected() {
        let cache = HandshakeCache::new();
        assert!(cache.push(&[1], 4, HandshakeType::Certificate, false));
        assert!(!cache.push(&[2], 4, HandshakeType::ServerHelloDone, false));

        let pulled = cache.pull(&[PullRule::new(HandshakeType::ServerHelloDone, false)]);
        assert!(pulled[0].is_none());
    }

    #[test]
    fn push_copies_data() {
        let cache = HandshakeCache::new();
        let mut buf = vec![1, 2, 3];
        cache.push(&buf, 0, HandshakeType::ClientHello, true);
        buf[0] = 0xFF;

        let merged = cache.pull_and_merge(&[PullRule::new(HandshakeType::ClientHello, true)]);
        assert_eq!(merged, vec![1, 2, 3]);
    }

    #[test]
    fn pull_highest_sequence_wins() {
        let cache = HandshakeCache::new();
        cache.push(&[2], 2, HandshakeType::ClientHello, true);
        cache.push(&[0], 0, HandshakeType::ClientHello, true);
        cache.push(&[1], 1, HandshakeType::ClientHello, true);

        let pulled = cache.pull(&[PullRule::new(HandshakeType::ClientHello, true)]);
        let item = pulled[0].as_ref().unwrap();
        assert_eq!(item.message_seq, 2);
        assert_eq!(item.data, vec![2]);
    }

    #[test]
    fn pull_is_positional() {
        let cache = HandshakeCache::new();
        cache.push(&[1], 0, HandshakeType::ClientHello, true);
        cache.push(&[2], 0, HandshakeType::ServerHello, false);

        let pulled = cache.pull(&[
            PullRule::new(HandshakeType::ServerHello, false),
            PullRule::new(HandshakeType::Finished, true),
            PullRule::new(HandshakeType::ClientHello, true),
            // Right type, wrong direction.
            PullRule::new(HandshakeType::ClientHello, false),
        ]);

        assert_eq!(pulled.len(), 4);
        assert_eq!(pulled[0].as_ref().unwrap().data, vec![2]);
        assert!(pulled[1].is_none());
        assert_eq!(pulled[2].as_ref().unwrap().data, vec![1]);
        assert!(pulled[3].is_none());
    }

    #[test]
    fn pull_on_empty_cache() {
        let cache = HandshakeCache::new();
        assert!(cache.is_empty());
        let pulled = cache.pull(&SESSION_HASH_RULES);
        assert_eq!(pulled.len(), 8);
        assert!(pulled.iter().all(Option::is_none));
        assert!(cache.pull(&[]).is_empty());
        assert!(cache.pull_and_merge(&SESSION_HASH_RULES).is_empty());
    }

    #[test]
    fn merge_follows_rule_order() {
        let cache = HandshakeCache::new();
        cache.push(b"world", 1, HandshakeType::ServerHello, false);
        cache.push(b"hello ", 0, HandshakeType::ClientHello, true);

        let merged = cache.pull_and_merge(&[
            PullRule::new(HandshakeType::ClientHello, true),
            PullRule::new(HandshakeType::CertificateRequest, false),
            PullRule::new(HandshakeType::ServerHello, false),
        ]);
        assert_eq!(merged, b"hello world");
    }

    #[test]
    fn session_hash_known_answer() {
        let cache = HandshakeCache::new();
        cache.push(b"world", 0, HandshakeType::ServerHello, false);
        cache.push(b" ", 1, HandshakeType::ServerHelloDone, false);
        cache.push(b"hello", 0, HandshakeType::ClientHello, true);
        // Not part of the session hash.
        cache.push(b"ignored", 1, HandshakeType::Finished, true);

        // SHA256("hello" || "world" || " ")
        let mut expected = Hash::new(HashAlgorithm::SHA256).unwrap();
        expected.update(b"helloworld ");

        assert_eq!(
            cache.session_hash(HashAlgorithm::SHA256).unwrap(),
            expected.finalize()
        );
    }

    #[test]
    fn session_hash_unsupported_algorithm() {
        let cache = HandshakeCache::new();
        assert!(matches!(
            cache.session_hash(HashAlgorithm::SHA1),
            Err(Error::Digest(_))
        ));
    }
}
