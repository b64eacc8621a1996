use std::io::Write;
use std::net::TcpListener;
use std::thread;

use super::*;

#[test]
fn reads_trimmed_lines_until_peer_hangs_up() {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();

    let server = thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        stream.write_all(b"42.5\n 87 \n").unwrap();
        // Stream drops here; the client sees EOF.
    });

    let mut source = SocketSource::new(addr.to_string());
    assert!(source.open());

    let mut out = String::new();
    assert!(source.read(&mut out));
    assert_eq!(out, "42.5");

    out.clear();
    assert!(source.read(&mut out));
    assert_eq!(out, "87");

    out.clear();
    assert!(!source.read(&mut out));

    server.join().unwrap();
}

#[test]
fn connection_refused_fails_to_open() {
    // Bind then drop to get a port that refuses connections.
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let mut source = SocketSource::new(addr.to_string());
    assert!(!source.open());

    let mut out = String::new();
    assert!(!source.read(&mut out));
}
