//! Property-based tests using proptest
//!
//! These tests validate wire invariants across a wide range of randomly
//! generated inputs: VarInt and field codecs, frame round trips on both sides
//! of the compression threshold, and the zlib helpers.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use blockwire::core::codec::FrameCodec;
use blockwire::core::packet::PacketFrame;
use blockwire::core::types::{peek_varint, put_varint, varint_len, Location, PacketReader, PacketWriter};
use blockwire::utils::compression::{compress, decompress_exact};
use bytes::{Bytes, BytesMut};
use proptest::prelude::*;
use tokio_util::codec::{Decoder, Encoder};

fn roundtrip(codec: &mut FrameCodec, id: i32, payload: Vec<u8>) -> (PacketFrame, usize) {
    let mut buf = BytesMut::new();
    codec
        .encode(PacketFrame::new(id, payload), &mut buf)
        .expect("Encoding should not fail");
    let written = buf.len();
    let frame = codec
        .decode(&mut buf)
        .expect("Decoding should not fail")
        .expect("A whole frame was written");
    assert!(buf.is_empty(), "Decoder must consume exactly one frame");
    (frame, written)
}

// Property: any id and payload survive the codec without compression
proptest! {
    #[test]
    fn prop_frame_roundtrip_plain(
        id in 0..0x80i32,
        payload in prop::collection::vec(any::<u8>(), 0..8192),
    ) {
        let mut codec = FrameCodec::new();
        let (frame, _) = roundtrip(&mut codec, id, payload.clone());
        prop_assert_eq!(frame.id, id);
        prop_assert_eq!(&frame.payload[..], &payload[..]);
    }
}

// Property: round trips hold with compression on, whichever side of the
// threshold the body lands
proptest! {
    #[test]
    fn prop_frame_roundtrip_compressed(
        threshold in 1..1024i32,
        id in 0..0x80i32,
        payload in prop::collection::vec(any::<u8>(), 0..4096),
    ) {
        let mut codec = FrameCodec::with_threshold(threshold);
        let (frame, _) = roundtrip(&mut codec, id, payload.clone());
        prop_assert_eq!(frame.id, id);
        prop_assert_eq!(&frame.payload[..], &payload[..]);
    }
}

// Property: a body of threshold - 1 bytes is marked uncompressed, a body of
// exactly threshold bytes is compressed
proptest! {
    #[test]
    fn prop_threshold_boundary(threshold in 2..2048i32, fill in any::<u8>()) {
        let codec = FrameCodec::with_threshold(threshold);
        for (body_len, expect_compressed) in [(threshold - 1, false), (threshold, true)] {
            // one byte of the body is the packet id
            let payload = vec![fill; body_len as usize - 1];
            let mut buf = BytesMut::new();
            codec.encode_frame(0x01, &payload, &mut buf).unwrap();

            let (_, outer) = peek_varint(&buf).unwrap().unwrap();
            let (marker, _) = peek_varint(&buf[outer..]).unwrap().unwrap();
            if expect_compressed {
                prop_assert_eq!(marker, body_len);
            } else {
                prop_assert_eq!(marker, 0);
            }
        }
    }
}

// Property: VarInt encoding round trips and its length matches varint_len
proptest! {
    #[test]
    fn prop_varint_roundtrip(value in any::<i32>()) {
        let mut buf = BytesMut::new();
        put_varint(&mut buf, value);
        prop_assert_eq!(buf.len(), varint_len(value));
        prop_assert!(buf.len() <= 5);

        let (decoded, width) = peek_varint(&buf).unwrap().unwrap();
        prop_assert_eq!(decoded, value);
        prop_assert_eq!(width, buf.len());

        let mut reader = PacketReader::new(buf.freeze());
        prop_assert_eq!(reader.read_varint().unwrap(), value);
    }
}

// Property: a truncated VarInt is "need more bytes", never a bogus value
proptest! {
    #[test]
    fn prop_truncated_varint_incomplete(value in (1i32 << 7)..i32::MAX) {
        let mut buf = BytesMut::new();
        put_varint(&mut buf, value);
        let cut = &buf[..buf.len() - 1];
        prop_assert!(peek_varint(cut).unwrap().is_none());
    }
}

// Property: mixed field sequences read back in order
proptest! {
    #[test]
    fn prop_fields_roundtrip(
        a in any::<i64>(),
        b in any::<i16>(),
        text in "[a-zA-Z0-9 _:/.-]{0,64}",
        flag in any::<bool>(),
        bytes in prop::collection::vec(any::<u8>(), 0..256),
    ) {
        let mut w = PacketWriter::new();
        w.i64(a).string(&text).i16(b).bool(flag).byte_array(&bytes);
        let mut r = PacketReader::new(w.finish());

        prop_assert_eq!(r.read_i64().unwrap(), a);
        prop_assert_eq!(r.read_string().unwrap(), text);
        prop_assert_eq!(r.read_i16().unwrap(), b);
        prop_assert_eq!(r.read_bool().unwrap(), flag);
        prop_assert_eq!(r.read_byte_array().unwrap(), bytes);
        prop_assert!(r.is_empty());
    }
}

// Property: packed block positions keep all three coordinates
proptest! {
    #[test]
    fn prop_location_packing(
        x in -(1 << 25)..(1 << 25),
        y in -(1 << 11)..(1 << 11),
        z in -(1 << 25)..(1 << 25),
    ) {
        let location = Location::new(x, y, z);
        prop_assert_eq!(Location::from_packed(location.to_packed()), location);
    }
}

// Property: zlib round trip preserves data, and a wrong expected size is an error
proptest! {
    #[test]
    fn prop_zlib_roundtrip(data in prop::collection::vec(any::<u8>(), 1..50000)) {
        let compressed = compress(&data).expect("Compression should not fail");
        let inflated = decompress_exact(&compressed, data.len()).expect("Decompression should not fail");
        prop_assert_eq!(&inflated, &data);
        prop_assert!(decompress_exact(&compressed, data.len() + 1).is_err());
    }
}

// Property: garbage never panics the decoder
proptest! {
    #[test]
    fn prop_decoder_survives_garbage(
        threshold in prop_oneof![Just(-1i32), 1..512i32],
        data in prop::collection::vec(any::<u8>(), 0..512),
    ) {
        let mut codec = if threshold > 0 {
            FrameCodec::with_threshold(threshold)
        } else {
            FrameCodec::new()
        };
        let mut buf = BytesMut::from(&data[..]);
        let _ = codec.decode(&mut buf);
    }
}

#[test]
fn test_empty_payload_frame() {
    let mut codec = FrameCodec::new();
    let (frame, written) = roundtrip(&mut codec, 0x00, Vec::new());
    assert_eq!(frame.payload, Bytes::new());
    assert_eq!(written, 2);
}
