//! TCP link-cable peer: moves the one byte SC/SB exchange of a real Game
//! Boy link cable over a plain socket, one transfer at a time, so two
//! instances on a LAN can trade Pokemon. A background thread owns the
//! socket; the emulator loop polls `try_recv` once per frame.

use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::mpsc::{self, Receiver};
use std::thread;

pub struct SerialLink {
    stream: TcpStream,
    incoming: Receiver<u8>,
}

impl SerialLink {
    pub fn listen(port: u16) -> std::io::Result<Self> {
        log::info!("serial link: waiting for a peer on port {port}");
        let listener = TcpListener::bind(("0.0.0.0", port))?;
        let (stream, peer) = listener.accept()?;
        log::info!("serial link: peer connected from {peer}");
        Ok(Self::spawn_reader(stream))
    }

    pub fn connect(addr: &str) -> std::io::Result<Self> {
        log::info!("serial link: connecting to {addr}");
        let stream = TcpStream::connect(addr)?;
        Ok(Self::spawn_reader(stream))
    }

    fn spawn_reader(stream: TcpStream) -> Self {
        let (tx, rx) = mpsc::channel();
        let mut reader = stream.try_clone().expect("failed to clone serial link socket");
        thread::spawn(move || {
            let mut byte = [0u8; 1];
            loop {
                match reader.read_exact(&mut byte) {
                    Ok(()) => {
                        if tx.send(byte[0]).is_err() {
                            return;
                        }
                    }
                    Err(e) => {
                        log::warn!("serial link: peer disconnected ({e})");
                        return;
                    }
                }
            }
        });
        Self { stream, incoming: rx }
    }

    /// Sends our transfer byte to the peer; the peer's reply arrives later
    /// via `try_recv`, matching real hardware's one-byte-for-one-byte shift.
    pub fn send(&mut self, byte: u8) {
        if let Err(e) = self.stream.write_all(&[byte]) {
            log::warn!("serial link: send failed ({e})");
        }
    }

    pub fn try_recv(&self) -> Option<u8> {
        self.incoming.try_recv().ok()
    }
}
