//! End-to-end tests: a full client connection against a scripted in-memory
//! server speaking raw frames over `tokio::io::duplex`.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use blockwire::config::ClientConfig;
use blockwire::core::codec::FrameCodec;
use blockwire::core::types::{peek_varint, varint_len, PacketReader, PacketWriter};
use blockwire::protocol::packet_type::{login, PacketTypeIn, PacketTypeOut};
use blockwire::protocol::packets::login::LoginOutcome;
use blockwire::protocol::palette::{resolve, VersionPalette};
use blockwire::protocol::session::SessionCredentials;
use blockwire::protocol::version::WireLayout;
use blockwire::service::{Connection, ConnectionBuilder, ProtocolHandler};
use blockwire::transport::Transport;
use blockwire::utils::compression::decompress_exact;
use blockwire::utils::metrics::ProtocolMetrics;
use blockwire::DisconnectReason;
use bytes::{Bytes, BytesMut};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::io::{duplex, AsyncReadExt, AsyncWriteExt, DuplexStream};
use uuid::Uuid;

const HOST: &str = "play.example.com";
const PORT: u16 = 25565;

/// Server side of the pipe, working on raw frame bytes.
struct ScriptedServer {
    stream: DuplexStream,
    codec: FrameCodec,
}

/// One frame as it appeared on the wire.
struct RawFrame {
    /// `None` without compression, otherwise the inner data-length marker.
    marker: Option<i32>,
    id: i32,
    payload: Bytes,
    wire_len: usize,
}

impl ScriptedServer {
    fn new(stream: DuplexStream) -> Self {
        Self {
            stream,
            codec: FrameCodec::new(),
        }
    }

    async fn read_raw(&mut self) -> RawFrame {
        let mut prefix = Vec::new();
        let len = loop {
            prefix.push(self.stream.read_u8().await.unwrap());
            if let Some((len, _)) = peek_varint(&prefix).unwrap() {
                break len as usize;
            }
        };
        let mut body = vec![0u8; len];
        self.stream.read_exact(&mut body).await.unwrap();

        let (marker, inner) = if self.codec.compression_enabled() {
            let (marker, width) = peek_varint(&body).unwrap().unwrap();
            let rest = &body[width..];
            let inner = if marker == 0 {
                rest.to_vec()
            } else {
                decompress_exact(rest, marker as usize).unwrap()
            };
            (Some(marker), inner)
        } else {
            (None, body)
        };
        let mut r = PacketReader::new(Bytes::from(inner));
        let id = r.read_varint().unwrap();
        RawFrame {
            marker,
            id,
            payload: r.read_rest(),
            wire_len: prefix.len() + len,
        }
    }

    async fn write(&mut self, id: i32, payload: &[u8]) {
        let mut buf = BytesMut::new();
        self.codec.encode_frame(id, payload, &mut buf).unwrap();
        self.stream.write_all(&buf).await.unwrap();
    }

    async fn login_success(&mut self, layout: &WireLayout) {
        let outcome = LoginOutcome {
            uuid: Uuid::from_u128(0x0FF1),
            username: "OfflinePlayer".into(),
            properties: vec![],
        };
        self.write(login::IN_LOGIN_SUCCESS, &outcome.encode(layout)).await;
    }

    async fn set_compression(&mut self, threshold: i32) {
        let mut w = PacketWriter::new();
        w.varint(threshold);
        self.write(login::IN_SET_COMPRESSION, &w.finish()).await;
        self.codec.set_threshold(threshold).unwrap();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Event {
    KeepAlive(i64),
    Update,
}

#[derive(Default)]
struct Recorder {
    keep_alives: Mutex<Vec<i64>>,
    events: Mutex<Vec<Event>>,
    updates: AtomicUsize,
    lost: Mutex<Vec<(DisconnectReason, String)>>,
    delay: Option<Duration>,
}

impl ProtocolHandler for Recorder {
    fn on_keep_alive(&self, id: i64) {
        if let Some(delay) = self.delay {
            std::thread::sleep(delay);
        }
        self.keep_alives.lock().unwrap().push(id);
        self.events.lock().unwrap().push(Event::KeepAlive(id));
    }

    fn on_update(&self) {
        self.updates.fetch_add(1, Ordering::Relaxed);
        self.events.lock().unwrap().push(Event::Update);
    }

    fn on_connection_lost(&self, reason: DisconnectReason, detail: &str) {
        self.lost.lock().unwrap().push((reason, detail.to_string()));
    }
}

fn config(protocol: i32) -> ClientConfig {
    ClientConfig::default_with_overrides(|c| {
        c.server.host = HOST.into();
        c.server.port = PORT;
        c.server.protocol_version = protocol;
        c.dispatch.tick_interval = Duration::from_millis(10);
    })
}

async fn establish(
    protocol: i32,
    handler: Arc<Recorder>,
    server_login: impl std::future::Future<Output = ScriptedServer>,
    client: DuplexStream,
) -> (Connection<DuplexStream>, ScriptedServer) {
    let builder = ConnectionBuilder::new(config(protocol), SessionCredentials::offline("OfflinePlayer"))
        .handler(handler);
    let transport = Transport::from_stream(client, Arc::new(ProtocolMetrics::new()));
    let (conn, server) = tokio::join!(builder.establish(transport), server_login);
    (conn.expect("login should succeed"), server)
}

fn palette(protocol: i32) -> Arc<VersionPalette> {
    resolve(protocol, false).unwrap()
}

#[tokio::test]
async fn test_scenario_offline_handshake_and_login_start() {
    let (client, server_end) = duplex(64 * 1024);
    let layout = WireLayout::for_version(758).unwrap();

    let server_login = async {
        let mut server = ScriptedServer::new(server_end);

        let handshake = server.read_raw().await;
        assert_eq!(handshake.marker, None);
        assert_eq!(handshake.id, login::HANDSHAKE);
        let mut r = PacketReader::new(handshake.payload);
        assert_eq!(r.read_varint().unwrap(), 758);
        assert_eq!(r.read_string().unwrap(), HOST);
        assert_eq!(r.read_u16().unwrap(), PORT);
        assert_eq!(r.read_varint().unwrap(), login::NEXT_STATE_LOGIN);
        assert!(r.is_empty());

        let start = server.read_raw().await;
        assert_eq!(start.marker, None);
        assert_eq!(start.id, login::OUT_LOGIN_START);
        let mut r = PacketReader::new(start.payload);
        assert_eq!(r.read_string().unwrap(), "OfflinePlayer");
        assert!(r.is_empty(), "1.18 login start carries only the name");

        server.login_success(&layout).await;
        server
    };

    let (mut conn, _server) = establish(758, Arc::default(), server_login, client).await;
    assert!(!conn.state().is_online());
    assert!(!conn.state().is_encrypted());
    assert_eq!(conn.state().compression_threshold(), -1);
    conn.disconnect().await.unwrap();
}

#[tokio::test]
async fn test_scenario_compression_threshold() {
    let (client, server_end) = duplex(64 * 1024);
    let layout = WireLayout::for_version(760).unwrap();

    let server_login = async {
        let mut server = ScriptedServer::new(server_end);
        server.read_raw().await;
        server.read_raw().await;
        server.set_compression(256).await;
        server.login_success(&layout).await;
        server
    };
    let (mut conn, mut server) = establish(760, Arc::default(), server_login, client).await;
    assert_eq!(conn.state().compression_threshold(), 256);

    let channel = "blockwire:test";
    let id = palette(760).outgoing_id(PacketTypeOut::PluginMessage).unwrap();
    let overhead = varint_len(id) + varint_len(channel.len() as i32) + channel.len();

    conn.send_plugin_message(channel, &vec![b'x'; 300 - overhead])
        .await
        .unwrap();
    let big = server.read_raw().await;
    assert_eq!(big.marker, Some(300));
    assert!(big.wire_len < 300, "repetitive body should shrink");
    assert_eq!(big.id, id);

    conn.send_plugin_message(channel, &vec![b'y'; 100 - overhead])
        .await
        .unwrap();
    let small = server.read_raw().await;
    assert_eq!(small.marker, Some(0));
    assert_eq!(small.id, id);
    let mut r = PacketReader::new(small.payload);
    assert_eq!(r.read_string().unwrap(), channel);
    assert_eq!(r.remaining(), 100 - overhead);

    conn.disconnect().await.unwrap();
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_frames_handled_in_arrival_order_under_delay() {
    let (client, server_end) = duplex(64 * 1024);
    let layout = WireLayout::for_version(759).unwrap();
    let recorder = Arc::new(Recorder {
        delay: Some(Duration::from_millis(4)),
        ..Recorder::default()
    });

    let server_login = async {
        let mut server = ScriptedServer::new(server_end);
        server.read_raw().await;
        server.read_raw().await;
        server.login_success(&layout).await;
        server
    };
    let (mut conn, mut server) = establish(759, recorder.clone(), server_login, client).await;

    let keep_alive = palette(759).incoming_id(PacketTypeIn::KeepAlive).unwrap();
    for n in 1..=10i64 {
        let mut w = PacketWriter::new();
        w.i64(n);
        server.write(keep_alive, &w.finish()).await;
    }

    let echo_id = palette(759).outgoing_id(PacketTypeOut::KeepAlive).unwrap();
    let mut echoed = Vec::new();
    for _ in 0..10 {
        let frame = tokio::time::timeout(Duration::from_secs(5), server.read_raw())
            .await
            .expect("echo should arrive");
        assert_eq!(frame.id, echo_id);
        echoed.push(PacketReader::new(frame.payload).read_i64().unwrap());
    }

    let expected: Vec<i64> = (1..=10).collect();
    assert_eq!(echoed, expected);
    assert_eq!(*recorder.keep_alives.lock().unwrap(), expected);
    assert!(recorder.updates.load(Ordering::Relaxed) >= 2);
    conn.disconnect().await.unwrap();
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_backlog_longer_than_cadence_yields_updates_between_packets() {
    let (client, server_end) = duplex(64 * 1024);
    let layout = WireLayout::for_version(760).unwrap();
    // each packet alone outlasts the 10 ms cadence
    let recorder = Arc::new(Recorder {
        delay: Some(Duration::from_millis(25)),
        ..Recorder::default()
    });

    let server_login = async {
        let mut server = ScriptedServer::new(server_end);
        server.read_raw().await;
        server.read_raw().await;
        server.login_success(&layout).await;
        server
    };
    let (mut conn, mut server) = establish(760, recorder.clone(), server_login, client).await;

    let keep_alive = palette(760).incoming_id(PacketTypeIn::KeepAlive).unwrap();
    let mut burst = BytesMut::new();
    for n in 1..=5i64 {
        let mut w = PacketWriter::new();
        w.i64(n);
        server.codec.encode_frame(keep_alive, &w.finish(), &mut burst).unwrap();
    }
    server.stream.write_all(&burst).await.unwrap();

    for _ in 0..5 {
        tokio::time::timeout(Duration::from_secs(5), server.read_raw())
            .await
            .expect("echo should arrive");
    }
    tokio::time::timeout(Duration::from_secs(5), async {
        while recorder.keep_alives.lock().unwrap().len() < 5 {
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    })
    .await
    .unwrap();
    conn.disconnect().await.unwrap();

    let events = recorder.events.lock().unwrap().clone();
    let handled: Vec<usize> = events
        .iter()
        .enumerate()
        .filter(|(_, e)| matches!(e, Event::KeepAlive(_)))
        .map(|(i, _)| i)
        .collect();
    assert_eq!(handled.len(), 5);
    for pair in handled.windows(2) {
        assert_eq!(
            events[pair[0] + 1],
            Event::Update,
            "no upkeep between packets of one backlog: {events:?}"
        );
    }
}

#[tokio::test]
async fn test_kick_then_close_reports_kick_once() {
    let (client, server_end) = duplex(64 * 1024);
    let layout = WireLayout::for_version(760).unwrap();
    let recorder = Arc::new(Recorder::default());

    let server_login = async {
        let mut server = ScriptedServer::new(server_end);
        server.read_raw().await;
        server.read_raw().await;
        server.login_success(&layout).await;
        server
    };
    let (conn, mut server) = establish(760, recorder.clone(), server_login, client).await;

    let disconnect = palette(760).incoming_id(PacketTypeIn::Disconnect).unwrap();
    let mut w = PacketWriter::new();
    w.string(r#"{"text":"Server closed"}"#);
    server.write(disconnect, &w.finish()).await;
    drop(server);

    tokio::time::timeout(Duration::from_secs(5), conn.closed())
        .await
        .expect("connection should end");
    let lost = recorder.lost.lock().unwrap();
    assert_eq!(
        lost.as_slice(),
        &[(DisconnectReason::InGameKick, "Server closed".to_string())]
    );
}

#[tokio::test]
async fn test_corrupt_frame_is_connection_lost() {
    let (client, server_end) = duplex(64 * 1024);
    let layout = WireLayout::for_version(758).unwrap();
    let recorder = Arc::new(Recorder::default());

    let server_login = async {
        let mut server = ScriptedServer::new(server_end);
        server.read_raw().await;
        server.read_raw().await;
        server.set_compression(64).await;
        server.login_success(&layout).await;
        server
    };
    let (conn, mut server) = establish(758, recorder.clone(), server_login, client).await;

    // declares 500 inflated bytes but carries garbage
    server
        .stream
        .write_all(&[0x05, 0xF4, 0x03, 0xDE, 0xAD, 0xBE])
        .await
        .unwrap();

    tokio::time::timeout(Duration::from_secs(5), conn.closed())
        .await
        .expect("connection should end");
    let lost = recorder.lost.lock().unwrap();
    assert_eq!(lost.len(), 1);
    assert_eq!(lost[0].0, DisconnectReason::ConnectionLost);
}

#[tokio::test]
async fn test_chat_on_each_layout() {
    for protocol in [758, 759, 760] {
        let (client, server_end) = duplex(64 * 1024);
        let layout = WireLayout::for_version(protocol).unwrap();
        let server_login = async {
            let mut server = ScriptedServer::new(server_end);
            server.read_raw().await;
            server.read_raw().await;
            server.login_success(&layout).await;
            server
        };
        let (mut conn, mut server) = establish(protocol, Arc::default(), server_login, client).await;

        conn.send_chat("").await.unwrap();
        conn.send_chat("hello there").await.unwrap();
        let frame = server.read_raw().await;
        assert_eq!(
            palette(protocol).outgoing_type(frame.id),
            Some(PacketTypeOut::ChatMessage)
        );
        let mut r = PacketReader::new(frame.payload);
        assert_eq!(r.read_string().unwrap(), "hello there");
        if protocol == 758 {
            assert!(r.is_empty());
        } else {
            r.read_i64().unwrap();
            assert_eq!(r.read_i64().unwrap(), 0, "unsigned chat has no salt");
            assert!(r.read_byte_array().unwrap().is_empty());
        }
        conn.disconnect().await.unwrap();
    }
}
