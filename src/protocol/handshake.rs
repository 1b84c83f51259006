//! # Login Sequence
//!
//! Strictly sequential state machine run on the full-duplex transport before
//! play begins:
//!
//! 1. **Handshake**: protocol version, (possibly mod-tagged) host, port,
//!    next state = login.
//! 2. **Login Start**: username, plus the profile key and UUID on versions
//!    that carry them.
//! 3. **Login loop**: read login packets until Login Success. Set Compression
//!    and Login Plugin Request are handled in place; Login Disconnect is fatal.
//! 4. **Encryption** (when requested): fresh shared secret, optional session
//!    check (skipped for offline accounts, for server id `"-"`, and when a
//!    cached proof matches the server key), Encryption Response, then the
//!    one-way switch to AES/CFB8.
//!
//! Every failure is returned as an error that maps onto a terminal
//! [`DisconnectReason`](crate::error::DisconnectReason); there is no partially
//! logged-in state.

use crate::error::{constants, ProtocolError, Result};
use crate::protocol::forge::ModLoaderHandshake;
use crate::protocol::packet_type::login;
use crate::protocol::packets::login::{
    decode_disconnect, decode_set_compression, encode_encryption_response, encode_handshake,
    encode_login_start, encode_plugin_response, EncryptionRequest, LoginOutcome,
    LoginPluginRequest, VerifyProof,
};
use crate::protocol::session::{
    server_identity_hash, CachedSessionProof, SessionCredentials, SessionProofStore,
    SessionService,
};
use crate::protocol::version::{EncryptionResponseLayout, LoginStartLayout, WireLayout};
use crate::transport::Transport;
use crate::utils::crypto::{self, SharedSecret};
use crate::utils::metrics::Timer;
use crate::utils::time;
use crate::utils::timeout::with_timeout_error;
use std::time::Duration;
use tokio::io::{AsyncRead, AsyncWrite};
use tracing::{debug, info, instrument, trace, warn};

/// Everything the login sequence consults besides the transport.
pub struct LoginContext<'a> {
    pub layout: &'a WireLayout,
    pub host: &'a str,
    pub port: u16,
    pub credentials: &'a SessionCredentials,
    pub mod_loader: &'a dyn ModLoaderHandshake,
    pub session_service: Option<&'a dyn SessionService>,
    pub proof_store: Option<&'a dyn SessionProofStore>,
    pub read_timeout: Duration,
    pub packet_limit: u32,
}

/// What login hands over to the play phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginSuccess {
    pub outcome: LoginOutcome,
    /// The server asked for encryption, so chat signatures can be trusted.
    pub online: bool,
    /// Negotiated threshold, or -1 when compression stayed off.
    pub compression_threshold: i32,
}

/// Run the full login sequence.
#[instrument(skip_all, fields(host = ctx.host, port = ctx.port, protocol = ctx.layout.protocol))]
pub async fn login<S>(transport: &mut Transport<S>, ctx: &LoginContext<'_>) -> Result<LoginSuccess>
where
    S: AsyncRead + AsyncWrite,
{
    let _timer = Timer::start("login");
    send_handshake(transport, ctx).await?;
    send_login_start(transport, ctx).await?;

    let mut online = false;
    for _ in 0..ctx.packet_limit {
        let frame = with_timeout_error(transport.read_frame(), ctx.read_timeout).await?;
        let mut r = frame.reader();
        match frame.id {
            login::IN_DISCONNECT => {
                let reason = decode_disconnect(&mut r)
                    .map_err(|e| e.in_packet("LoginDisconnect", frame.id, ctx.layout.protocol, true))?;
                warn!(reason = %reason, "Login rejected by server");
                return Err(ProtocolError::LoginRejected(reason));
            }
            login::IN_ENCRYPTION_REQUEST => {
                let request = EncryptionRequest::decode(&mut r).map_err(|e| {
                    e.in_packet("EncryptionRequest", frame.id, ctx.layout.protocol, true)
                })?;
                if transport.is_encrypted() {
                    return Err(ProtocolError::Crypto(constants::ERR_ALREADY_ENCRYPTED.into()));
                }
                online = true;
                start_encryption(transport, ctx, &request).await?;
            }
            login::IN_LOGIN_SUCCESS => {
                let outcome = LoginOutcome::decode(&mut r, ctx.layout)
                    .map_err(|e| e.in_packet("LoginSuccess", frame.id, ctx.layout.protocol, true))?;
                info!(
                    uuid = %outcome.uuid,
                    username = %outcome.username,
                    online,
                    "Login successful"
                );
                ctx.mod_loader.complete()?;
                return Ok(LoginSuccess {
                    outcome,
                    online,
                    compression_threshold: transport.compression_threshold(),
                });
            }
            login::IN_SET_COMPRESSION => {
                let threshold = decode_set_compression(&mut r)
                    .map_err(|e| e.in_packet("SetCompression", frame.id, ctx.layout.protocol, true))?;
                transport.set_compression_threshold(threshold)?;
            }
            login::IN_PLUGIN_REQUEST => {
                let request = LoginPluginRequest::decode(&mut r).map_err(|e| {
                    e.in_packet("LoginPluginRequest", frame.id, ctx.layout.protocol, true)
                })?;
                answer_plugin_request(transport, ctx, &request).await?;
            }
            other => {
                trace!(packet_id = other, "Skipping unexpected login packet");
            }
        }
    }

    Err(ProtocolError::TransportError(
        constants::ERR_LOGIN_LOOP_LIMIT.into(),
    ))
}

async fn send_handshake<S>(transport: &mut Transport<S>, ctx: &LoginContext<'_>) -> Result<()>
where
    S: AsyncRead + AsyncWrite,
{
    let address = ctx.mod_loader.server_address(ctx.host);
    let body = encode_handshake(ctx.layout.protocol, &address, ctx.port, login::NEXT_STATE_LOGIN);
    transport.write_frame(login::HANDSHAKE, &body).await?;
    debug!(mod_loader = ctx.mod_loader.name(), "Handshake sent");
    Ok(())
}

async fn send_login_start<S>(transport: &mut Transport<S>, ctx: &LoginContext<'_>) -> Result<()>
where
    S: AsyncRead + AsyncWrite,
{
    let key = match ctx.layout.login_start {
        LoginStartLayout::NameOnly => None,
        _ => ctx.credentials.signing_keys(),
    };
    let body = encode_login_start(
        ctx.layout,
        &ctx.credentials.username,
        key,
        ctx.credentials.uuid,
    );
    transport.write_frame(login::OUT_LOGIN_START, &body).await?;
    debug!(username = %ctx.credentials.username, signed = key.is_some(), "Login start sent");
    Ok(())
}

async fn answer_plugin_request<S>(
    transport: &mut Transport<S>,
    ctx: &LoginContext<'_>,
    request: &LoginPluginRequest,
) -> Result<()>
where
    S: AsyncRead + AsyncWrite,
{
    let response = ctx.mod_loader.handle_login_plugin_request(request)?;
    debug!(
        channel = %request.channel,
        message_id = request.message_id,
        understood = response.is_some(),
        "Answering login plugin request"
    );
    let body = encode_plugin_response(request.message_id, response.as_deref());
    transport.write_frame(login::OUT_PLUGIN_RESPONSE, &body).await
}

#[instrument(skip_all, fields(server_id = %request.server_id))]
async fn start_encryption<S>(
    transport: &mut Transport<S>,
    ctx: &LoginContext<'_>,
    request: &EncryptionRequest,
) -> Result<()>
where
    S: AsyncRead + AsyncWrite,
{
    let server_key = crypto::parse_public_key(&request.public_key)?;
    let secret = SharedSecret::generate()?;

    if request.server_id != "-" && ctx.credentials.is_authenticated() {
        check_session(ctx, request, &secret).await?;
    } else {
        debug!("Session check not required");
    }

    let encrypted_secret = crypto::rsa_encrypt(&server_key, secret.as_bytes())?;
    let proof = match (ctx.layout.encryption_response, ctx.credentials.signing_keys()) {
        (EncryptionResponseLayout::TokenOrSaltSignature, Some(keys)) => {
            let salt = crypto::random_salt();
            let mut signed = request.verify_token.clone();
            signed.extend_from_slice(&salt.to_be_bytes());
            VerifyProof::Signature {
                salt,
                signature: crypto::sign_sha256(&keys.private_key, &signed)?,
            }
        }
        _ => VerifyProof::Token(crypto::rsa_encrypt(&server_key, &request.verify_token)?),
    };

    let body = encode_encryption_response(ctx.layout, &encrypted_secret, &proof);
    transport
        .write_frame(login::OUT_ENCRYPTION_RESPONSE, &body)
        .await?;
    transport.switch_to_encrypted(&secret)?;
    info!("Encryption enabled");
    Ok(())
}

async fn check_session(
    ctx: &LoginContext<'_>,
    request: &EncryptionRequest,
    secret: &SharedSecret,
) -> Result<()> {
    let identity = server_identity_hash(&request.server_id, &request.public_key);

    if let Some(store) = ctx.proof_store {
        if let Some(proof) = store.lookup(&identity).await {
            if proof.server_public_key == request.public_key
                && proof.username == ctx.credentials.username
            {
                debug!("Reusing cached session proof");
                return Ok(());
            }
        }
    }

    let service = ctx.session_service.ok_or_else(|| {
        ProtocolError::SessionCheckFailed("no session service configured".into())
    })?;
    let hash = crypto::server_hash(&request.server_id, secret.as_bytes(), &request.public_key);
    service
        .join_server(ctx.credentials, &hash)
        .await
        .map_err(|e| {
            warn!(error = %e, "Session check failed");
            ProtocolError::SessionCheckFailed(format!("{}: {e}", constants::ERR_SESSION_REJECTED))
        })?;

    if let Some(store) = ctx.proof_store {
        store
            .store(
                &identity,
                CachedSessionProof {
                    username: ctx.credentials.username.clone(),
                    server_public_key: request.public_key.clone(),
                    validated_at: time::now_millis(),
                },
            )
            .await;
    }
    Ok(())
}
