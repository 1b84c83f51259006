//! # Packet Dispatch Loop
//!
//! Two long-lived tasks joined by one bounded FIFO queue:
//!
//! - the **reader** owns the inbound transport half, decodes frames and
//!   enqueues them in arrival order. A fatal read error is enqueued behind
//!   the frames that preceded it, so a kick followed by a socket close is
//!   still reported as a kick;
//! - the **processor** wakes once per cadence, drains everything queued
//!   through the [`PlayHandler`], and sleeps for what is left of the cycle.
//!   When a backlog outlasts the cadence it calls
//!   [`ProtocolHandler::on_update`] between packets so upkeep never starves.
//!
//! Both tasks stop on the shared cancellation token. Every terminal path goes
//! through the [`Terminator`], which delivers the single
//! `on_connection_lost` notification.

use super::handler::ProtocolHandler;
use super::play::PlayHandler;
use crate::core::packet::PacketFrame;
use crate::error::{DisconnectReason, Result};
use crate::transport::TransportReader;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::sync::mpsc::{self, error::TryRecvError};
use tokio::time::{sleep, Instant};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument, warn};

/// Queue item: a frame, or the error that ended the reader.
pub type Inbound = Result<PacketFrame>;

/// One-shot terminal notification plus cancellation of both loops.
pub struct Terminator {
    fired: AtomicBool,
    cancel: CancellationToken,
    handler: Arc<dyn ProtocolHandler>,
}

impl Terminator {
    pub fn new(cancel: CancellationToken, handler: Arc<dyn ProtocolHandler>) -> Self {
        Self {
            fired: AtomicBool::new(false),
            cancel,
            handler,
        }
    }

    /// End the connection. Only the first call notifies the handler; returns
    /// whether this call was it.
    pub fn terminate(&self, reason: DisconnectReason, detail: &str) -> bool {
        if self
            .fired
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return false;
        }
        match reason {
            DisconnectReason::UserLogout => info!(%reason, detail, "Connection closed"),
            _ => warn!(%reason, detail, "Connection lost"),
        }
        self.cancel.cancel();
        self.handler.on_connection_lost(reason, detail);
        true
    }

    pub fn is_terminated(&self) -> bool {
        self.fired.load(Ordering::Acquire)
    }

    pub fn token(&self) -> &CancellationToken {
        &self.cancel
    }
}

/// Read frames until cancelled or the transport fails.
#[instrument(level = "debug", skip_all)]
pub async fn reader_loop<R>(
    mut reader: TransportReader<R>,
    queue: mpsc::Sender<Inbound>,
    cancel: CancellationToken,
) where
    R: AsyncRead + Unpin,
{
    loop {
        let item = tokio::select! {
            biased;
            _ = cancel.cancelled() => break,
            read = reader.read_frame() => read,
        };
        let fatal = item.is_err();
        tokio::select! {
            biased;
            _ = cancel.cancelled() => break,
            sent = queue.send(item) => {
                if sent.is_err() {
                    debug!("Processor gone, reader stopping");
                    break;
                }
            }
        }
        if fatal {
            break;
        }
    }
    debug!("Reader loop finished");
}

/// Drain the queue once per `cadence` until cancelled or the queue closes.
#[instrument(level = "debug", skip_all, fields(cadence_ms = cadence.as_millis() as u64))]
pub async fn processor_loop<W>(
    mut queue: mpsc::Receiver<Inbound>,
    play: PlayHandler<W>,
    handler: Arc<dyn ProtocolHandler>,
    terminator: Arc<Terminator>,
    cadence: Duration,
) where
    W: AsyncWrite + Unpin,
{
    let cancel = terminator.token().clone();
    'cycles: while !cancel.is_cancelled() {
        handler.on_update();
        let mut stopwatch = Instant::now();

        loop {
            if cancel.is_cancelled() {
                break 'cycles;
            }
            match queue.try_recv() {
                Ok(Ok(frame)) => {
                    if let Err(e) = play.handle(&frame).await {
                        terminator.terminate(e.disconnect_reason(), &e.to_string());
                        break 'cycles;
                    }
                    if stopwatch.elapsed() >= cadence {
                        handler.on_update();
                        stopwatch = Instant::now();
                    }
                }
                Ok(Err(e)) => {
                    terminator.terminate(e.disconnect_reason(), &e.to_string());
                    break 'cycles;
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    terminator.terminate(
                        DisconnectReason::ConnectionLost,
                        "Reader stopped without an error",
                    );
                    break 'cycles;
                }
            }
        }

        if let Some(remaining) = cadence.checked_sub(stopwatch.elapsed()) {
            tokio::select! {
                _ = cancel.cancelled() => break,
                _ = sleep(remaining) => {}
            }
        }
    }

    queue.close();
    if let Err(e) = play.sender().shutdown().await {
        debug!(error = %e, "Writer already closed");
    }
    debug!("Processor loop finished");
}
