use std::io::{Read, Write};
use std::net::TcpListener;
use std::thread;

use connection::conn::connection_options::ConnectionOptions;
use connection::conn::packet_channel::PacketChannel;

fn local_channel(listener: &TcpListener) -> PacketChannel {
    let port = listener.local_addr().unwrap().port();
    let options = ConnectionOptions::new(
        "127.0.0.1".to_string(),
        port,
        "root".to_string(),
        String::new(),
    );
    PacketChannel::connect(&options).unwrap()
}

#[test]
fn test_packet_round_trip() {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();

    let server = thread::spawn({
        let listener = listener.try_clone().unwrap();
        move || {
            let (mut stream, _) = listener.accept().unwrap();

            // echo two framed packets back unchanged
            for _ in 0..2 {
                let mut header = [0u8; 4];
                stream.read_exact(&mut header).unwrap();
                let size = u32::from_le_bytes([header[0], header[1], header[2], 0]) as usize;
                let mut payload = vec![0u8; size];
                stream.read_exact(&mut payload).unwrap();

                stream.write_all(&header).unwrap();
                stream.write_all(&payload).unwrap();
            }
        }
    });

    let mut channel = local_channel(&listener);

    let payload = b"connect mysql".to_vec();
    channel.write_packet(&payload).unwrap();
    assert_eq!(channel.sequence(), 1);
    let echoed = channel.read_packet().unwrap();
    assert_eq!(echoed, payload);
    assert_eq!(channel.sequence(), 2);

    let payload = vec![255u8, 0, 128, 127, 1, 254];
    channel.write_packet(&payload).unwrap();
    let echoed = channel.read_packet().unwrap();
    assert_eq!(echoed, payload);
    assert_eq!(channel.sequence(), 4);

    server.join().unwrap();
}

#[test]
fn test_zero_length_frame() {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();

    let server = thread::spawn({
        let listener = listener.try_clone().unwrap();
        move || {
            let (mut stream, _) = listener.accept().unwrap();
            stream.write_all(&[0, 0, 0, 0]).unwrap();
        }
    });

    let mut channel = local_channel(&listener);
    let payload = channel.read_packet().unwrap();
    assert!(payload.is_empty());
    assert_eq!(channel.sequence(), 1);

    server.join().unwrap();
}

#[test]
fn test_sequence_gap_is_protocol_error() {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();

    let server = thread::spawn({
        let listener = listener.try_clone().unwrap();
        move || {
            let (mut stream, _) = listener.accept().unwrap();
            // sequence id 5 when 0 is expected
            stream.write_all(&[1, 0, 0, 5, 0x00]).unwrap();
        }
    });

    let mut channel = local_channel(&listener);
    assert!(channel.read_packet().is_err());

    server.join().unwrap();
}
