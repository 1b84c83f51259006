//! # Client Connection
//!
//! Wires every layer together for one server session:
//!
//! 1. resolve the version palette (before any socket is opened)
//! 2. log in over the full-duplex [`Transport`]
//! 3. split the transport, start the reader and processor tasks
//! 4. hand back a [`Connection`] exposing the outbound API
//!
//! Login failures are reported through the same single terminal notification
//! as failures during play.
//!
//! ## Example
//! ```rust,no_run
//! use blockwire::config::ClientConfig;
//! use blockwire::protocol::session::SessionCredentials;
//! use blockwire::service::ConnectionBuilder;
//!
//! # async fn run() -> blockwire::error::Result<()> {
//! let config = ClientConfig::default_with_overrides(|c| {
//!     c.server.host = "play.example.com".into();
//! });
//! let mut conn = ConnectionBuilder::new(config, SessionCredentials::offline("OfflinePlayer"))
//!     .connect()
//!     .await?;
//! conn.send_chat("hello").await?;
//! conn.disconnect().await?;
//! # Ok(())
//! # }
//! ```

use super::dispatch::{processor_loop, reader_loop, Terminator};
use super::handler::{NoopHandler, ProtocolHandler};
use super::play::{send_acknowledgment, PlayHandler};
use super::sender::PacketSender;
use super::state::ConnectionState;
use crate::chat::command::{collapse_whitespace, signable_arguments};
use crate::chat::ChatChain;
use crate::config::{ChatConfig, ClientConfig};
use crate::core::types::{Location, PacketReader, PacketWriter};
use crate::error::{DisconnectReason, Result};
use crate::protocol::dispatcher::{ChannelDispatcher, BRAND_CHANNEL};
use crate::protocol::forge;
use crate::protocol::handshake::{login, LoginContext};
use crate::protocol::packet_type::PacketTypeOut;
use crate::protocol::packets::outbound::{self, ChatPayload, ClientSettings, Hand};
use crate::protocol::palette::{resolve, VersionPalette};
use crate::protocol::session::{SessionCredentials, SessionProofStore, SessionService};
use crate::protocol::version::WireLayout;
use crate::transport::{SessionCache, Transport};
use crate::utils::metrics::ProtocolMetrics;
use crate::utils::timeout::SHUTDOWN_TIMEOUT;
use crate::utils::{crypto, time};
use bytes::Bytes;
use std::sync::{Arc, Weak};
use tokio::io::{AsyncRead, AsyncWrite, WriteHalf};
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument, warn};

/// Collects everything a connection needs, then connects.
pub struct ConnectionBuilder {
    config: ClientConfig,
    credentials: SessionCredentials,
    handler: Arc<dyn ProtocolHandler>,
    session_service: Option<Arc<dyn SessionService>>,
    proof_store: Option<Arc<dyn SessionProofStore>>,
    dispatcher: ChannelDispatcher,
    metrics: Arc<ProtocolMetrics>,
}

impl ConnectionBuilder {
    pub fn new(config: ClientConfig, credentials: SessionCredentials) -> Self {
        Self {
            config,
            credentials,
            handler: Arc::new(NoopHandler),
            session_service: None,
            proof_store: None,
            dispatcher: ChannelDispatcher::new(),
            metrics: Arc::new(ProtocolMetrics::new()),
        }
    }

    /// Offline account named by `config.session.username`.
    pub fn from_config(config: ClientConfig) -> Self {
        let credentials = SessionCredentials::offline(config.session.username.clone());
        Self::new(config, credentials)
    }

    pub fn handler(mut self, handler: Arc<dyn ProtocolHandler>) -> Self {
        self.handler = handler;
        self
    }

    /// External identity check run during encryption. Without one, online
    /// servers are joined without a session check.
    pub fn session_service(mut self, service: Arc<dyn SessionService>) -> Self {
        self.session_service = Some(service);
        self
    }

    pub fn proof_store(mut self, store: Arc<dyn SessionProofStore>) -> Self {
        self.proof_store = Some(store);
        self
    }

    /// Use an in-memory [`SessionCache`] sized from the session config.
    pub fn with_session_cache(self) -> Self {
        let cache = SessionCache::from_config(&self.config.session);
        self.proof_store(Arc::new(cache))
    }

    /// Channel listeners to run for play-phase plugin messages. The brand
    /// listener is added on top.
    pub fn dispatcher(mut self, dispatcher: ChannelDispatcher) -> Self {
        self.dispatcher = dispatcher;
        self
    }

    pub fn metrics(mut self, metrics: Arc<ProtocolMetrics>) -> Self {
        self.metrics = metrics;
        self
    }

    /// Validate the config, resolve the palette, open the TCP connection and
    /// log in.
    #[instrument(skip_all, fields(host = %self.config.server.host, port = self.config.server.port))]
    pub async fn connect(self) -> Result<Connection<TcpStream>> {
        self.config.validate_strict()?;
        let server = &self.config.server;
        resolve(server.protocol_version, server.forge)?;
        let transport = Transport::connect(
            &server.host,
            server.port,
            server.connect_timeout,
            self.metrics.clone(),
        )
        .await?;
        self.establish(transport).await
    }

    /// Log in over an already-open transport and start the play-phase tasks.
    pub async fn establish<S>(self, mut transport: Transport<S>) -> Result<Connection<S>>
    where
        S: AsyncRead + AsyncWrite + Send + 'static,
    {
        let server = &self.config.server;
        let layout = WireLayout::for_version(server.protocol_version)?;
        let palette = resolve(server.protocol_version, server.forge)?;
        let mod_loader = forge::for_palette(palette.forge_enabled());

        let cancel = CancellationToken::new();
        let terminator = Arc::new(Terminator::new(cancel.clone(), self.handler.clone()));

        let ctx = LoginContext {
            layout: &layout,
            host: &server.host,
            port: server.port,
            credentials: &self.credentials,
            mod_loader: &*mod_loader,
            session_service: self.session_service.as_deref(),
            proof_store: self.proof_store.as_deref(),
            read_timeout: server.read_timeout,
            packet_limit: self.config.dispatch.login_packet_limit,
        };
        let success = match login(&mut transport, &ctx).await {
            Ok(success) => success,
            Err(e) => {
                terminator.terminate(e.disconnect_reason(), &e.to_string());
                if let Err(close) = transport.disconnect().await {
                    debug!(error = %close, "Close after failed login");
                }
                return Err(e);
            }
        };
        self.handler.on_login_success(&success.outcome);

        let chat = ChatChain::new(
            success.online,
            self.credentials.uuid,
            self.credentials.signing_keys().cloned(),
        );
        let state = Arc::new(ConnectionState::new(
            layout,
            success,
            transport.is_encrypted(),
            chat,
        ));
        register_brand_listener(&self.dispatcher, Arc::downgrade(&state))?;

        let (reader, writer) = transport.into_split();
        let sender = PacketSender::new(writer, palette.clone());
        let (tx, rx) = mpsc::channel(self.config.dispatch.queue_capacity);

        let play = PlayHandler::new(
            state.clone(),
            sender.clone(),
            self.handler.clone(),
            self.dispatcher.clone(),
            terminator.clone(),
            self.metrics.clone(),
        );
        let tasks = vec![
            tokio::spawn(reader_loop(reader, tx, cancel.clone())),
            tokio::spawn(processor_loop(
                rx,
                play,
                self.handler.clone(),
                terminator.clone(),
                self.config.dispatch.tick_interval,
            )),
        ];
        info!(
            version = palette.name(),
            protocol = palette.protocol(),
            online = state.is_online(),
            "Entered play phase"
        );

        Ok(Connection {
            chat_config: self.config.chat,
            state,
            sender,
            palette,
            dispatcher: self.dispatcher,
            terminator,
            metrics: self.metrics,
            tasks,
        })
    }
}

fn register_brand_listener(
    dispatcher: &ChannelDispatcher,
    state: Weak<ConnectionState>,
) -> Result<()> {
    dispatcher.register(BRAND_CHANNEL, move |data: &[u8]| {
        let brand = PacketReader::new(Bytes::copy_from_slice(data)).read_string()?;
        debug!(brand = %brand, "Server brand");
        if let Some(state) = state.upgrade() {
            state.set_brand(brand);
        }
        Ok(())
    })
}

/// A logged-in play-phase connection.
///
/// Sends go straight to the socket; inbound packets are handled by the
/// background tasks and reported to the [`ProtocolHandler`]. Dropping the
/// connection without [`Connection::disconnect`] still stops both tasks.
pub struct Connection<S> {
    chat_config: ChatConfig,
    state: Arc<ConnectionState>,
    sender: PacketSender<WriteHalf<S>>,
    palette: Arc<VersionPalette>,
    dispatcher: ChannelDispatcher,
    terminator: Arc<Terminator>,
    metrics: Arc<ProtocolMetrics>,
    tasks: Vec<JoinHandle<()>>,
}

impl<S: AsyncRead + AsyncWrite> Connection<S> {
    pub fn state(&self) -> &Arc<ConnectionState> {
        &self.state
    }

    pub fn layout(&self) -> &WireLayout {
        self.state.layout()
    }

    pub fn palette(&self) -> &VersionPalette {
        &self.palette
    }

    pub fn metrics(&self) -> &Arc<ProtocolMetrics> {
        &self.metrics
    }

    pub fn dispatcher(&self) -> &ChannelDispatcher {
        &self.dispatcher
    }

    pub async fn is_connected(&self) -> bool {
        !self.terminator.is_terminated() && self.sender.is_connected().await
    }

    /// Resolves once the connection has ended for any reason.
    pub async fn closed(&self) {
        self.terminator.token().cancelled().await;
    }

    /// Send a chat line. Text starting with `/` goes out as a command on
    /// versions that have a command packet. Empty text is ignored.
    pub async fn send_chat(&self, text: &str) -> Result<()> {
        if text.is_empty() {
            return Ok(());
        }
        let layout = *self.state.layout();
        if text.starts_with('/') && layout.has_chat_commands() {
            return self.send_chat_command(text).await;
        }

        let timestamp = time::now_millis();
        let (body, advance) = {
            let chat = self.state.chat()?;
            let (ack, mut advance) = chat.outgoing_acknowledgment(&layout);
            let sign = self.chat_config.sign_chat && chat.is_online() && chat.can_sign();
            let salt = if sign { crypto::random_salt() } else { 0 };
            let signature = if sign {
                chat.prepare_chat(&layout, text, timestamp, salt, &ack, &mut advance)?
            } else {
                None
            };
            let body = outbound::chat_message(
                &layout,
                &ChatPayload {
                    message: text,
                    timestamp,
                    salt,
                    signature: signature.as_deref(),
                    acknowledgment: Some(&ack),
                },
            );
            (body, advance)
        };
        self.sender.send(PacketTypeOut::ChatMessage, &body).await?;
        self.state.chat()?.commit(advance);
        Ok(())
    }

    /// Send a command, with or without the leading slash. Whitespace runs are
    /// collapsed and free-text arguments signed when possible.
    pub async fn send_chat_command(&self, text: &str) -> Result<()> {
        let command = collapse_whitespace(text.strip_prefix('/').unwrap_or(text));
        if command.is_empty() {
            return Ok(());
        }
        let layout = *self.state.layout();
        if !layout.has_chat_commands() {
            let line = format!("/{command}");
            let body = outbound::chat_message(
                &layout,
                &ChatPayload {
                    message: &line,
                    timestamp: 0,
                    salt: 0,
                    signature: None,
                    acknowledgment: None,
                },
            );
            return self.sender.send(PacketTypeOut::ChatMessage, &body).await;
        }

        let timestamp = time::now_millis();
        let (body, advance) = {
            let chat = self.state.chat()?;
            let (ack, mut advance) = chat.outgoing_acknowledgment(&layout);
            let sign = self.chat_config.sign_commands && chat.is_online() && chat.can_sign();
            let salt = if sign { crypto::random_salt() } else { 0 };
            let arguments = if sign {
                chat.prepare_command_arguments(
                    &layout,
                    &signable_arguments(&command),
                    timestamp,
                    salt,
                    &ack,
                    &mut advance,
                )?
            } else {
                Vec::new()
            };
            let body =
                outbound::chat_command(&layout, &command, timestamp, salt, &arguments, Some(&ack));
            (body, advance)
        };
        self.sender.send(PacketTypeOut::ChatCommand, &body).await?;
        self.state.chat()?.commit(advance);
        Ok(())
    }

    /// Flush the last-seen acknowledgment now. No-op before 1.19.1.
    pub async fn send_message_acknowledgment(&self) -> Result<()> {
        send_acknowledgment(&self.state, &self.sender, &self.metrics).await
    }

    pub async fn send_entity_action(&self, entity_id: i32, action: i32) -> Result<()> {
        self.sender
            .send(PacketTypeOut::EntityAction, &outbound::entity_action(entity_id, action))
            .await
    }

    pub async fn send_player_digging(
        &self,
        status: i32,
        location: Location,
        face: u8,
        sequence: i32,
    ) -> Result<()> {
        let body = outbound::player_digging(self.layout(), status, location, face, sequence);
        self.sender.send(PacketTypeOut::PlayerDigging, &body).await
    }

    pub async fn send_player_block_placement(
        &self,
        hand: Hand,
        location: Location,
        face: i32,
        sequence: i32,
    ) -> Result<()> {
        let body = outbound::player_block_placement(self.layout(), hand, location, face, sequence);
        self.sender.send(PacketTypeOut::PlayerBlockPlacement, &body).await
    }

    pub async fn send_use_item(&self, hand: Hand, sequence: i32) -> Result<()> {
        let body = outbound::use_item(self.layout(), hand, sequence);
        self.sender.send(PacketTypeOut::UseItem, &body).await
    }

    /// Client Status "perform respawn".
    pub async fn send_respawn(&self) -> Result<()> {
        self.sender
            .send(PacketTypeOut::ClientStatus, &outbound::client_status_respawn())
            .await
    }

    pub async fn send_client_settings(&self, settings: &ClientSettings) -> Result<()> {
        self.sender
            .send(PacketTypeOut::ClientSettings, &settings.encode())
            .await
    }

    pub async fn send_held_item_change(&self, slot: i16) -> Result<()> {
        self.sender
            .send(PacketTypeOut::HeldItemChange, &outbound::held_item_change(slot))
            .await
    }

    pub async fn send_animation(&self, hand: Hand) -> Result<()> {
        self.sender
            .send(PacketTypeOut::Animation, &outbound::animation(hand))
            .await
    }

    pub async fn send_close_window(&self, window_id: u8) -> Result<()> {
        self.sender
            .send(PacketTypeOut::CloseWindow, &outbound::close_window(window_id))
            .await
    }

    pub async fn send_plugin_message(&self, channel: &str, data: &[u8]) -> Result<()> {
        self.sender
            .send(PacketTypeOut::PluginMessage, &outbound::plugin_message(channel, data))
            .await
    }

    /// Announce the client brand on `minecraft:brand`.
    pub async fn send_brand(&self, brand: &str) -> Result<()> {
        let mut w = PacketWriter::new();
        w.string(brand);
        self.send_plugin_message(BRAND_CHANNEL, &w.finish()).await
    }

    /// Player position, with rotation as `(yaw, pitch)` when it changed.
    pub async fn send_location(
        &self,
        x: f64,
        y: f64,
        z: f64,
        rotation: Option<(f32, f32)>,
        on_ground: bool,
    ) -> Result<()> {
        match rotation {
            Some((yaw, pitch)) => {
                let body = outbound::player_position_and_rotation(x, y, z, yaw, pitch, on_ground);
                self.sender
                    .send(PacketTypeOut::PlayerPositionAndRotation, &body)
                    .await
            }
            None => {
                let body = outbound::player_position(x, y, z, on_ground);
                self.sender.send(PacketTypeOut::PlayerPosition, &body).await
            }
        }
    }

    /// Close the connection, notify the handler with `UserLogout` and wait
    /// for both tasks to stop.
    #[instrument(skip_all)]
    pub async fn disconnect(&mut self) -> Result<()> {
        self.terminator
            .terminate(DisconnectReason::UserLogout, "Disconnected by client");
        if let Err(e) = self.sender.shutdown().await {
            debug!(error = %e, "Writer already closed");
        }
        for task in self.tasks.drain(..) {
            match tokio::time::timeout(SHUTDOWN_TIMEOUT, task).await {
                Ok(Ok(())) => {}
                Ok(Err(e)) => warn!(error = %e, "Connection task failed"),
                Err(_) => warn!("Connection task did not stop in time"),
            }
        }
        self.metrics.log_metrics();
        Ok(())
    }
}

impl<S> Drop for Connection<S> {
    fn drop(&mut self) {
        if !self.tasks.is_empty() {
            self.terminator
                .terminate(DisconnectReason::UserLogout, "Connection dropped");
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::protocol::packet_type::{login as ids, PacketTypeIn};
    use crate::protocol::packets::inbound::LastSeenEntry;
    use crate::protocol::packets::login::LoginOutcome;
    use std::sync::Mutex;
    use std::time::Duration;
    use tokio::io::{duplex, DuplexStream};
    use uuid::Uuid;

    #[derive(Default)]
    struct Recorder {
        lost: Mutex<Vec<(DisconnectReason, String)>>,
    }

    impl ProtocolHandler for Recorder {
        fn on_connection_lost(&self, reason: DisconnectReason, detail: &str) {
            self.lost.lock().unwrap().push((reason, detail.to_string()));
        }
    }

    fn config(protocol: i32) -> ClientConfig {
        ClientConfig::default_with_overrides(|c| {
            c.server.host = "play.example.com".into();
            c.server.protocol_version = protocol;
            c.server.read_timeout = Duration::from_secs(5);
            c.dispatch.tick_interval = Duration::from_millis(5);
        })
    }

    /// Reads handshake and login start, then answers Login Success.
    async fn accept(server: &mut Transport<DuplexStream>, layout: &WireLayout) {
        server.read_frame().await.unwrap();
        server.read_frame().await.unwrap();
        let success = LoginOutcome {
            uuid: Uuid::from_u128(7),
            username: "OfflinePlayer".into(),
            properties: vec![],
        };
        server
            .write_frame(ids::IN_LOGIN_SUCCESS, &success.encode(layout))
            .await
            .unwrap();
    }

    async fn connected(
        protocol: i32,
        handler: Arc<Recorder>,
    ) -> (Connection<DuplexStream>, Transport<DuplexStream>) {
        let (a, b) = duplex(64 * 1024);
        let metrics = Arc::new(ProtocolMetrics::new());
        let client = Transport::from_stream(a, metrics.clone());
        let mut server = Transport::from_stream(b, metrics.clone());
        let layout = WireLayout::for_version(protocol).unwrap();
        let builder = ConnectionBuilder::new(
            config(protocol),
            SessionCredentials::offline("OfflinePlayer"),
        )
        .handler(handler)
        .metrics(metrics);
        let (conn, ()) = tokio::join!(builder.establish(client), accept(&mut server, &layout));
        (conn.unwrap(), server)
    }

    #[tokio::test]
    async fn test_login_reaches_play() {
        let recorder = Arc::new(Recorder::default());
        let (mut conn, _server) = connected(760, recorder.clone()).await;
        assert!(conn.is_connected().await);
        assert!(!conn.state().is_online());
        assert_eq!(conn.state().profile().username, "OfflinePlayer");
        assert!(conn.dispatcher().is_registered(BRAND_CHANNEL));
        conn.disconnect().await.unwrap();
        assert_eq!(
            recorder.lost.lock().unwrap().as_slice(),
            &[(DisconnectReason::UserLogout, "Disconnected by client".to_string())]
        );
    }

    #[tokio::test]
    async fn test_config_username_used_for_offline_login() {
        let (a, b) = duplex(64 * 1024);
        let metrics = Arc::new(ProtocolMetrics::new());
        let mut server = Transport::from_stream(b, metrics.clone());
        let layout = WireLayout::for_version(758).unwrap();
        let mut config = config(758);
        config.session.username = "ConfigPlayer".into();
        let builder = ConnectionBuilder::from_config(config);

        let script = async {
            server.read_frame().await.unwrap();
            let start = server.read_frame().await.unwrap();
            let name = start.reader().read_string().unwrap();
            let success = LoginOutcome {
                uuid: crate::protocol::session::offline_uuid(&name),
                username: name.clone(),
                properties: vec![],
            };
            server
                .write_frame(ids::IN_LOGIN_SUCCESS, &success.encode(&layout))
                .await
                .unwrap();
            name
        };
        let (conn, name) = tokio::join!(
            builder.establish(Transport::from_stream(a, metrics)),
            script
        );
        let mut conn = conn.unwrap();
        assert_eq!(name, "ConfigPlayer");
        assert_eq!(conn.state().profile().username, "ConfigPlayer");
        conn.disconnect().await.unwrap();
    }

    #[tokio::test]
    async fn test_login_rejection_reported_once() {
        let (a, b) = duplex(64 * 1024);
        let metrics = Arc::new(ProtocolMetrics::new());
        let mut server = Transport::from_stream(b, metrics.clone());
        let recorder = Arc::new(Recorder::default());
        let builder = ConnectionBuilder::new(config(758), SessionCredentials::offline("Steve"))
            .handler(recorder.clone());
        let reject = async {
            server.read_frame().await.unwrap();
            server.read_frame().await.unwrap();
            let mut w = PacketWriter::new();
            w.string("{\"text\":\"Whitelist only\"}");
            server.write_frame(ids::IN_DISCONNECT, &w.finish()).await.unwrap();
        };
        let (result, ()) = tokio::join!(
            builder.establish(Transport::from_stream(a, metrics)),
            reject
        );
        assert!(result.is_err());
        let lost = recorder.lost.lock().unwrap();
        assert_eq!(lost.len(), 1);
        assert_eq!(lost[0].0, DisconnectReason::LoginRejected);
    }

    #[tokio::test]
    async fn test_brand_recorded() {
        let recorder = Arc::new(Recorder::default());
        let (conn, mut server) = connected(759, recorder).await;
        let mut brand = PacketWriter::new();
        brand.string("vanilla");
        let id = conn.palette().incoming_id(PacketTypeIn::PluginMessage).unwrap();
        server
            .write_frame(id, &outbound::plugin_message(BRAND_CHANNEL, &brand.finish()))
            .await
            .unwrap();
        tokio::time::timeout(Duration::from_secs(2), async {
            while conn.state().brand().is_none() {
                tokio::time::sleep(Duration::from_millis(5)).await;
            }
        })
        .await
        .unwrap();
        assert_eq!(conn.state().brand().as_deref(), Some("vanilla"));
    }

    #[tokio::test]
    async fn test_command_routing() {
        let recorder = Arc::new(Recorder::default());
        let (conn, mut server) = connected(760, recorder).await;
        conn.send_chat("/say   hello    world").await.unwrap();
        let frame = server.read_frame().await.unwrap();
        assert_eq!(conn.palette().outgoing_type(frame.id), Some(PacketTypeOut::ChatCommand));
        let mut r = frame.reader();
        assert_eq!(r.read_string().unwrap(), "say hello world");
        r.read_i64().unwrap();
        assert_eq!(r.read_i64().unwrap(), 0);
        assert_eq!(r.read_varint().unwrap(), 0);

        let (legacy, mut legacy_server) = connected(758, Arc::new(Recorder::default())).await;
        legacy.send_chat_command("me  waves").await.unwrap();
        let frame = legacy_server.read_frame().await.unwrap();
        assert_eq!(legacy.palette().outgoing_type(frame.id), Some(PacketTypeOut::ChatMessage));
        assert_eq!(frame.reader().read_string().unwrap(), "/me waves");
    }

    #[tokio::test]
    async fn test_failed_send_leaves_chat_state_alone() {
        let recorder = Arc::new(Recorder::default());
        let (conn, _server) = connected(760, recorder).await;
        {
            let mut chat = conn.state().chat().unwrap();
            for n in 0..3u8 {
                chat.record_seen(LastSeenEntry {
                    profile: Uuid::from_u128(0xB0B),
                    signature: vec![n],
                });
            }
        }
        conn.sender.shutdown().await.unwrap();

        assert!(conn.send_chat("hello").await.is_err());
        assert!(conn.send_chat_command("/say hello").await.is_err());
        assert!(conn.send_message_acknowledgment().await.is_err());
        assert_eq!(conn.state().chat().unwrap().pending(), 3);
    }

    #[tokio::test]
    async fn test_server_close_is_connection_lost() {
        let recorder = Arc::new(Recorder::default());
        let (conn, server) = connected(758, recorder.clone()).await;
        drop(server);
        tokio::time::timeout(Duration::from_secs(2), conn.closed())
            .await
            .unwrap();
        let lost = recorder.lost.lock().unwrap();
        assert_eq!(lost.len(), 1);
        assert_eq!(lost[0].0, DisconnectReason::ConnectionLost);
    }
}
