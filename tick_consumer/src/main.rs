//! Tick consumer — demo counterpart of the tick bridge.
//!
//! Listens for the bridge's TCP connection, decodes the JSON tick lines it
//! streams, and prints them. Lines typed on stdin are validated against the
//! command grammar and forwarded to the bridge over the same socket:
//!
//! ```text
//! BUY 1.5 10 20
//! SELL 0.1
//! CLOSE
//! ```
//!
//! Internally three lightweight threads feed one `select!` loop: an accept
//! thread (plus a reader thread per bridge connection reassembling tick
//! lines), and a stdin thread for operator commands. A new bridge connection
//! simply replaces the previous write handle, which is how the bridge's
//! reconnects are absorbed.
#![warn(missing_docs)]
mod args;

use crate::args::Args;
use clap::Parser;
use crossbeam_channel::{Receiver, Sender, select, unbounded};
use log::{debug, error, info, warn};
use std::io::{BufRead, Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};
use std::thread;
use std::time::Duration;

use tick_common::command::Command;
use tick_common::framing;
use tick_common::net::addr;
use tick_common::{BridgeError, Result, WireTick};

fn main() -> Result<()> {
    init_logger();
    let args = Args::parse();

    let shutdown = Arc::new(AtomicBool::new(false));
    {
        let shutdown = shutdown.clone();
        ctrlc::set_handler(move || {
            info!("Ctrl+C received. Shutting down consumer...");
            shutdown.store(true, Ordering::SeqCst);
        })
        .expect("Error setting Ctrl+C handler");
    }

    let listener = TcpListener::bind(addr(&args.bind, args.port))?;
    info!("Consumer listening on {}", listener.local_addr()?);

    let (tick_tx, tick_rx) = unbounded::<String>();
    let (conn_tx, conn_rx) = unbounded::<TcpStream>();
    let (cmd_tx, cmd_rx) = unbounded::<String>();

    thread::spawn(move || accept_loop(listener, tick_tx, conn_tx));
    thread::spawn(move || stdin_loop(cmd_tx));

    info!("Consumer is running. Type BUY/SELL/CLOSE commands. Press Ctrl+C to exit.");
    run_loop(&shutdown, &tick_rx, &conn_rx, &cmd_rx)
}

/// Fan-in loop: prints decoded ticks, tracks the live bridge socket, and
/// forwards validated operator commands to it.
fn run_loop(
    shutdown: &AtomicBool,
    tick_rx: &Receiver<String>,
    conn_rx: &Receiver<TcpStream>,
    cmd_rx: &Receiver<String>,
) -> Result<()> {
    let mut bridge: Option<TcpStream> = None;

    while !shutdown.load(Ordering::Relaxed) {
        select! {
            recv(tick_rx) -> msg => match msg {
                Ok(line) => print_tick(&line),
                Err(e) => return Err(BridgeError::ChannelRecv(e.to_string())),
            },
            recv(conn_rx) -> msg => if let Ok(stream) = msg {
                bridge = Some(stream);
            },
            recv(cmd_rx) -> msg => if let Ok(line) = msg {
                send_command(&mut bridge, &line);
            },
            default(Duration::from_millis(200)) => {}
        }
    }
    Ok(())
}

/// Accepts bridge connections; each gets a dedicated reader thread and a
/// cloned write handle for the command path.
fn accept_loop(listener: TcpListener, tick_tx: Sender<String>, conn_tx: Sender<TcpStream>) {
    for stream in listener.incoming() {
        match stream {
            Ok(stream) => {
                match stream.peer_addr() {
                    Ok(peer) => info!("Bridge connected: {}", peer),
                    Err(_) => info!("Bridge connected"),
                }
                match stream.try_clone() {
                    Ok(writer) => {
                        if conn_tx.send(writer).is_err() {
                            return;
                        }
                    }
                    Err(e) => {
                        error!("Failed to clone bridge stream: {}", e);
                        continue;
                    }
                }
                let tick_tx = tick_tx.clone();
                thread::spawn(move || {
                    if let Err(e) = read_tick_lines(stream, tick_tx) {
                        warn!("Bridge stream error: {}", e);
                    }
                });
            }
            Err(e) => error!("TCP connection error: {}", e),
        }
    }
}

/// Blocking per-connection loop reassembling newline-framed tick lines.
fn read_tick_lines(mut stream: TcpStream, tick_tx: Sender<String>) -> Result<()> {
    let mut buffer = Vec::new();
    let mut chunk = [0u8; 2048];
    loop {
        let n = stream.read(&mut chunk)?;
        if n == 0 {
            info!("Bridge disconnected");
            return Ok(());
        }
        for line in framing::extract_lines(&mut buffer, &chunk[..n]) {
            tick_tx
                .send(line)
                .map_err(|e| BridgeError::ChannelSend(e.to_string()))?;
        }
    }
}

/// Forwards operator input lines to the fan-in loop.
fn stdin_loop(cmd_tx: Sender<String>) {
    let stdin = std::io::stdin();
    for line in stdin.lock().lines() {
        match line {
            Ok(line) => {
                let trimmed = line.trim().to_string();
                if trimmed.is_empty() {
                    continue;
                }
                if cmd_tx.send(trimmed).is_err() {
                    return;
                }
            }
            Err(e) => {
                error!("Stdin read error: {}", e);
                return;
            }
        }
    }
}

fn print_tick(line: &str) {
    match WireTick::from_json(line) {
        Ok(tick) => info!(
            "TICK: {} bid={:.5} ask={:.5} time={}",
            tick.symbol, tick.bid, tick.ask, tick.time
        ),
        Err(_) => debug!("Received non-JSON line: {}", line),
    }
}

/// Validates one operator line and writes it to the live bridge socket.
/// Invalid lines are rejected locally so the wire only carries well-formed
/// commands; the bridge would drop them anyway.
fn send_command(bridge: &mut Option<TcpStream>, line: &str) {
    match Command::parse(line) {
        Command::Invalid { raw, reason } => warn!("{}: {}", reason, raw),
        command => {
            let Some(stream) = bridge.as_mut() else {
                warn!("No bridge connected, dropping command: {}", line);
                return;
            };
            match stream.write_all(&framing::encode_line(line)) {
                Ok(()) => info!("Command sent: {:?}", command),
                Err(e) => {
                    warn!("Failed to send command, dropping connection: {}", e);
                    *bridge = None;
                }
            }
        }
    }
}

fn init_logger() {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();
}
