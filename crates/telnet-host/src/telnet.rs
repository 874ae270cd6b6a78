// Copyright (C) 2026 Ryan Daum <ryan.daum@gmail.com> This program is free
// software: you can redistribute it and/or modify it under the terms of the GNU
// General Public License as published by the Free Software Foundation, version
// 3.
//
// This program is distributed in the hope that it will be useful, but WITHOUT
// ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS
// FOR A PARTICULAR PURPOSE. See the GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License along with
// this program. If not, see <https://www.gnu.org/licenses/>.
//

//! The TCP side of the host: one task per connection, lines in both
//! directions, and a routing table that carries narrative events from the
//! scheduler thread back to the task that owns the socket.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use eyre::Context;
use futures_util::stream::SplitSink;
use futures_util::{SinkExt, StreamExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::select;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};
use tokio_util::codec::{Framed, LinesCodec};
use tracing::{debug, info, warn};

use wold_common::model::ConnectionId;
use wold_common::tasks::{
    DisplayMode, Message, NarrativeEvent, SchedulerError, Sender, SessionError,
};
use wold_kernel::SchedulerClient;

/// What the scheduler side pushes at a connection task.
pub enum HostMsg {
    Event(NarrativeEvent),
    Disconnect,
}

/// The host's implementation of the outbound delivery seam. The scheduler
/// thread calls in; each registered connection gets its events through an
/// unbounded channel drained by the tokio task holding the socket.
pub struct ChannelSender {
    routes: Mutex<HashMap<ConnectionId, UnboundedSender<HostMsg>>>,
}

impl ChannelSender {
    pub fn new() -> Self {
        Self {
            routes: Mutex::new(HashMap::new()),
        }
    }

    /// Open a route for a connection. The previous route for the same id,
    /// if any, is dropped; its task sees a closed channel and winds down.
    pub fn register(&self, connection: ConnectionId) -> UnboundedReceiver<HostMsg> {
        let (send, receive) = unbounded_channel();
        self.routes.lock().unwrap().insert(connection, send);
        receive
    }

    pub fn unregister(&self, connection: ConnectionId) {
        self.routes.lock().unwrap().remove(&connection);
    }
}

impl Default for ChannelSender {
    fn default() -> Self {
        Self::new()
    }
}

impl Sender for ChannelSender {
    fn send_event(
        &self,
        connection: ConnectionId,
        event: NarrativeEvent,
    ) -> Result<(), SessionError> {
        let routes = self.routes.lock().unwrap();
        let Some(route) = routes.get(&connection) else {
            return Err(SessionError::NoConnection(connection));
        };
        route
            .send(HostMsg::Event(event))
            .map_err(|_| SessionError::DeliveryError)
    }

    fn disconnect(&self, connection: ConnectionId) -> Result<(), SessionError> {
        let routes = self.routes.lock().unwrap();
        let Some(route) = routes.get(&connection) else {
            return Err(SessionError::NoConnection(connection));
        };
        route
            .send(HostMsg::Disconnect)
            .map_err(|_| SessionError::DeliveryError)
    }
}

/// Flatten a message into the text that goes down the wire. The result can
/// span several lines; the codec supplies the final newline.
fn render(message: &Message) -> String {
    let body = match message.display {
        DisplayMode::Plain => message.text.clone(),
        DisplayMode::Titled => {
            let (title, rest) = message
                .text
                .split_once('\n')
                .unwrap_or((message.text.as_str(), ""));
            let rule = "─".repeat(title.chars().count());
            if rest.is_empty() {
                format!("{title}\n{rule}")
            } else {
                format!("{title}\n{rule}\n{rest}")
            }
        }
        DisplayMode::Boxed => {
            let lines: Vec<&str> = message.text.lines().collect();
            let width = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);
            let mut out = String::new();
            out.push_str(&format!("┌─{}─┐\n", "─".repeat(width)));
            for line in &lines {
                let pad = " ".repeat(width - line.chars().count());
                out.push_str(&format!("│ {line}{pad} │\n"));
            }
            out.push_str(&format!("└─{}─┘", "─".repeat(width)));
            out
        }
    };
    if message.section_break {
        format!("\n{body}")
    } else {
        body
    }
}

pub async fn telnet_listen_loop(
    listen_address: SocketAddr,
    scheduler_client: SchedulerClient,
    sender: Arc<ChannelSender>,
) -> Result<(), eyre::Error> {
    let listener = TcpListener::bind(listen_address)
        .await
        .with_context(|| format!("Unable to bind listener @ {listen_address}"))?;
    loop {
        let (stream, peer_addr) = listener.accept().await?;
        let scheduler_client = scheduler_client.clone();
        let sender = sender.clone();
        tokio::spawn(async move {
            if let Err(e) = handle_connection(stream, peer_addr, scheduler_client, &sender).await {
                warn!(%peer_addr, "Connection ended with error: {e}");
            }
        });
    }
}

async fn handle_connection(
    stream: TcpStream,
    peer_addr: SocketAddr,
    scheduler_client: SchedulerClient,
    sender: &ChannelSender,
) -> Result<(), eyre::Error> {
    let connection = ConnectionId::new_random();
    info!(%peer_addr, %connection, "Accepted connection");

    let outbound = sender.register(connection);
    let attach_client = scheduler_client.clone();
    let attached =
        tokio::task::spawn_blocking(move || attach_client.new_connection(connection)).await?;
    let result = match attached {
        Ok(()) => connection_loop(connection, stream, &scheduler_client, outbound).await,
        Err(e) => Err(e).context("Unable to attach connection to the scheduler"),
    };

    // Idempotent on the scheduler side; harmless after quit or usurpation.
    if let Err(e) = scheduler_client.detach_connection(connection) {
        debug!(%connection, "Scheduler gone before detach: {e}");
    }
    sender.unregister(connection);
    info!(%peer_addr, %connection, "Connection closed");
    result
}

async fn connection_loop(
    connection: ConnectionId,
    stream: TcpStream,
    scheduler_client: &SchedulerClient,
    mut outbound: UnboundedReceiver<HostMsg>,
) -> Result<(), eyre::Error> {
    let framed_stream = Framed::new(stream, LinesCodec::new());
    let (mut write, mut read): (SplitSink<Framed<TcpStream, LinesCodec>, String>, _) =
        framed_stream.split();

    loop {
        select! {
            line = read.next() => {
                let Some(line) = line else {
                    debug!(%connection, "Connection closed by peer");
                    return Ok(());
                };
                let line = line.context("Unable to read line from connection")?;
                // The client blocks on the scheduler's reply, so keep the
                // wait off the IO driver threads.
                let submit_client = scheduler_client.clone();
                let submitted = tokio::task::spawn_blocking(move || {
                    submit_client.submit_line(connection, line)
                })
                .await?;
                match submitted {
                    Ok(()) => {}
                    Err(SchedulerError::CommandExecutionError(e)) => {
                        // The session already apologized in-character.
                        warn!(%connection, "Command faulted: {e}");
                    }
                    Err(e) => {
                        warn!(%connection, "Line rejected, closing: {e}");
                        return Ok(());
                    }
                }
            }
            msg = outbound.recv() => {
                let Some(msg) = msg else {
                    debug!(%connection, "Outbound route dropped");
                    return Ok(());
                };
                match msg {
                    HostMsg::Event(event) => {
                        write
                            .send(render(&event.message))
                            .await
                            .context("Unable to send message to client")?;
                    }
                    HostMsg::Disconnect => {
                        debug!(%connection, "Server-side disconnect");
                        write.close().await?;
                        return Ok(());
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn plain_lines_pass_through() {
        assert_eq!(render(&Message::line("You say: \"hi\"")), "You say: \"hi\"");
    }

    #[test]
    fn sections_open_with_a_blank_line() {
        assert_eq!(render(&Message::section("A new thing.")), "\nA new thing.");
    }

    #[test]
    fn titles_are_underlined_to_their_width() {
        let rendered = render(&Message::titled("The Landing", "A clearing."));
        assert_eq!(rendered, "\nThe Landing\n───────────\nA clearing.");
    }

    #[test]
    fn boxes_pad_ragged_lines_to_the_widest() {
        let rendered = render(&Message::boxed("abc\nlonger line"));
        let expected = "\n┌─────────────┐\n\
                        │ abc         │\n\
                        │ longer line │\n\
                        └─────────────┘";
        assert_eq!(rendered, expected);
    }

    #[test]
    fn routes_deliver_only_while_registered() {
        let sender = ChannelSender::new();
        let connection = ConnectionId::new_random();
        let mut receive = sender.register(connection);

        sender
            .send_event(
                connection,
                NarrativeEvent::notify(None, Message::line("hello")),
            )
            .unwrap();
        let Some(HostMsg::Event(event)) = receive.try_recv().ok() else {
            panic!("expected a routed event");
        };
        assert_eq!(event.message.text, "hello");

        sender.unregister(connection);
        let result = sender.send_event(
            connection,
            NarrativeEvent::notify(None, Message::line("lost")),
        );
        assert!(matches!(result, Err(SessionError::NoConnection(_))));
    }
}
