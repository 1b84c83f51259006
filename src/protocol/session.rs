//! # Session Credentials and Collaborators
//!
//! Who we log in as, and the two external collaborators the login sequence
//! consults when a server asks for encryption:
//!
//! - [`SessionService`]: validates the account against the identity provider
//!   (the "join server" call). Implemented outside this crate.
//! - [`SessionProofStore`]: remembers servers already validated so a repeat
//!   connection can skip the service. [`crate::transport::session_cache::SessionCache`]
//!   is the in-memory implementation.

use crate::error::Result;
use crate::utils::crypto;
use crate::utils::time;
use futures::future::BoxFuture;
use md5::{Digest, Md5};
use rsa::{RsaPrivateKey, RsaPublicKey};
use std::fmt;
use uuid::{Builder, Uuid};
use zeroize::Zeroizing;

/// Profile key pair issued by the identity provider for chat signing.
#[derive(Clone)]
pub struct PlayerKeyPair {
    pub private_key: RsaPrivateKey,
    /// DER SubjectPublicKeyInfo of the public half.
    pub public_key_der: Vec<u8>,
    /// Expiry in epoch milliseconds.
    pub expires_at: i64,
    /// Provider signature over the key, as sent on 1.19.
    pub signature_v1: Vec<u8>,
    /// Provider signature over the key and profile id, as sent on 1.19.1+.
    pub signature_v2: Vec<u8>,
}

impl PlayerKeyPair {
    pub fn new(
        private_key: RsaPrivateKey,
        expires_at: i64,
        signature_v1: Vec<u8>,
        signature_v2: Vec<u8>,
    ) -> Result<Self> {
        let public_key_der = crypto::public_key_der(&private_key.to_public_key())?;
        Ok(Self {
            private_key,
            public_key_der,
            expires_at,
            signature_v1,
            signature_v2,
        })
    }

    pub fn public_key(&self) -> RsaPublicKey {
        self.private_key.to_public_key()
    }

    pub fn is_expired(&self) -> bool {
        time::is_expired(self.expires_at)
    }
}

impl fmt::Debug for PlayerKeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlayerKeyPair")
            .field("expires_at", &self.expires_at)
            .finish_non_exhaustive()
    }
}

/// Account identity supplied at construction.
#[derive(Clone)]
pub struct SessionCredentials {
    pub username: String,
    pub uuid: Uuid,
    access_token: Option<Zeroizing<String>>,
    pub key_pair: Option<PlayerKeyPair>,
}

impl SessionCredentials {
    /// Offline account: the UUID is derived from the name the way servers do.
    pub fn offline(username: impl Into<String>) -> Self {
        let username = username.into();
        Self {
            uuid: offline_uuid(&username),
            username,
            access_token: None,
            key_pair: None,
        }
    }

    /// Authenticated account.
    pub fn online(username: impl Into<String>, uuid: Uuid, access_token: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            uuid,
            access_token: Some(Zeroizing::new(access_token.into())),
            key_pair: None,
        }
    }

    pub fn with_key_pair(mut self, key_pair: PlayerKeyPair) -> Self {
        self.key_pair = Some(key_pair);
        self
    }

    pub fn access_token(&self) -> Option<&str> {
        self.access_token.as_ref().map(|t| t.as_str())
    }

    pub fn is_authenticated(&self) -> bool {
        self.access_token.is_some()
    }

    /// Key pair usable for signing right now.
    pub fn signing_keys(&self) -> Option<&PlayerKeyPair> {
        self.key_pair.as_ref().filter(|k| !k.is_expired())
    }
}

impl fmt::Debug for SessionCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionCredentials")
            .field("username", &self.username)
            .field("uuid", &self.uuid)
            .field("authenticated", &self.is_authenticated())
            .field("key_pair", &self.key_pair)
            .finish()
    }
}

/// Name-based UUID used by servers for unauthenticated players.
///
/// MD5 of `"OfflinePlayer:" + name` with the version 3 and RFC 4122 variant bits set.
pub fn offline_uuid(username: &str) -> Uuid {
    let digest = Md5::digest(format!("OfflinePlayer:{username}").as_bytes());
    let mut bytes = [0u8; 16];
    bytes.copy_from_slice(&digest);
    Builder::from_md5_bytes(bytes).into_uuid()
}

/// Proof that a given server was already validated for this account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedSessionProof {
    pub username: String,
    pub server_public_key: Vec<u8>,
    pub validated_at: i64,
}

/// External identity validation.
pub trait SessionService: Send + Sync {
    /// Announce that `credentials` is joining the server identified by `server_hash`.
    /// Any error ends the login with `SessionCheckFailed`.
    fn join_server<'a>(
        &'a self,
        credentials: &'a SessionCredentials,
        server_hash: &'a str,
    ) -> BoxFuture<'a, Result<()>>;
}

/// Cache of validated servers, keyed by server identity hash.
pub trait SessionProofStore: Send + Sync {
    fn lookup<'a>(&'a self, server_identity: &'a str) -> BoxFuture<'a, Option<CachedSessionProof>>;

    fn store<'a>(
        &'a self,
        server_identity: &'a str,
        proof: CachedSessionProof,
    ) -> BoxFuture<'a, ()>;
}

/// Identity of a server independent of the per-connection secret.
pub fn server_identity_hash(server_id: &str, server_public_key: &[u8]) -> String {
    crypto::server_hash(server_id, &[], server_public_key)
}
