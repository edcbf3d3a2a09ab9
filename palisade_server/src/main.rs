use std::collections::HashMap;

use clap::Parser;
use futures_util::{SinkExt, StreamExt};
use palisade::ClientRequest;
use palisade_server::{ConnectionId, MessageRouter};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::mpsc;
use tokio_tungstenite::tungstenite::Message;
use tracing::{info, warn};
use tracing_subscriber::filter::{LevelFilter, Targets};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Parser)]
struct Args {
    /// Port to accept WebSocket connections on
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// A log level among "off", "error", "warn", "info", "debug", "trace"
    #[arg(short, long, default_value = "info")]
    log_level: LevelFilter,
}

/// Everything the connection tasks feed into the single router task.
enum RouterEvent {
    Connected(ConnectionId, mpsc::UnboundedSender<String>),
    Request(ConnectionId, String),
    Disconnected(ConnectionId),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    initialize_logging(args.log_level);

    let (event_tx, event_rx) = mpsc::unbounded_channel();
    tokio::spawn(run_router(event_rx));

    let listener = TcpListener::bind(("0.0.0.0", args.port)).await?;
    info!(port = args.port, "listening for connections");

    let mut next_id: ConnectionId = 1;
    loop {
        let (stream, addr) = listener.accept().await?;
        let id = next_id;
        next_id += 1;
        info!(conn = id, %addr, "connection accepted");
        tokio::spawn(handle_connection(id, stream, event_tx.clone()));
    }
}

/// The single writer for all match state.
///
/// Every inbound request from every connection funnels through this one
/// task and is handled to completion before the next, so no two moves are
/// ever validated against the same board concurrently. That is the entire
/// locking story; the sessions themselves need none.
async fn run_router(mut events: mpsc::UnboundedReceiver<RouterEvent>) {
    let mut router = MessageRouter::new();
    let mut connections: HashMap<ConnectionId, mpsc::UnboundedSender<String>> = HashMap::new();

    while let Some(event) = events.recv().await {
        match event {
            RouterEvent::Connected(id, tx) => {
                connections.insert(id, tx);
            }
            RouterEvent::Request(id, text) => {
                let request = match serde_json::from_str::<ClientRequest>(&text) {
                    Ok(request) => request,
                    Err(err) => {
                        warn!(conn = id, %err, "dropping malformed request");
                        continue;
                    }
                };
                for outbound in router.handle(id, request) {
                    let Ok(json) = serde_json::to_string(&outbound.msg) else {
                        continue;
                    };
                    if let Some(tx) = connections.get(&outbound.to) {
                        // Fire and forget. A closed connection shows up as
                        // a Disconnected event soon enough.
                        let _ = tx.send(json);
                    }
                }
            }
            RouterEvent::Disconnected(id) => {
                connections.remove(&id);
                router.connection_closed(id);
            }
        }
    }
}

async fn handle_connection(
    id: ConnectionId,
    stream: TcpStream,
    events: mpsc::UnboundedSender<RouterEvent>,
) {
    let ws = match tokio_tungstenite::accept_async(stream).await {
        Ok(ws) => ws,
        Err(err) => {
            warn!(conn = id, %err, "WebSocket handshake failed");
            return;
        }
    };
    let (mut sink, mut source) = ws.split();

    let (tx, mut rx) = mpsc::unbounded_channel::<String>();
    let _ = events.send(RouterEvent::Connected(id, tx));

    let writer = tokio::spawn(async move {
        while let Some(json) = rx.recv().await {
            if sink.send(Message::Text(json)).await.is_err() {
                break;
            }
        }
    });

    while let Some(msg) = source.next().await {
        match msg {
            Ok(Message::Text(text)) => {
                let _ = events.send(RouterEvent::Request(id, text));
            }
            Ok(Message::Close(_)) | Err(_) => break,
            Ok(_) => {}
        }
    }

    info!(conn = id, "connection closed");
    let _ = events.send(RouterEvent::Disconnected(id));
    writer.abort();
}

fn initialize_logging(level: LevelFilter) {
    let format = tracing_subscriber::fmt::format()
        .with_target(false)
        .compact();

    let filter = Targets::new().with_default(level);

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().event_format(format))
        .with(filter)
        .init();
}
