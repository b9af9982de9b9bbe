use fugit::{TimerDurationU64, TimerInstantU64};
use log::{debug, error, trace, warn};

use crate::handler::{Handler, Io};
use crate::protocol::{self, BUFFER_CAPACITY, INFO_FRAME_LEN};
use crate::{AuxPins, BridgeConfig, ByteStream, Command, CommandBuffer, I2cBus, IndicatorState};

/// Counters of events the wire protocol keeps silent about.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Stats {
    /// Commands that wrote their response
    pub completed: u32,
    /// Selector bytes that matched no command
    pub unknown_selectors: u32,
    /// Commands dropped at the deadline
    pub timeouts: u32,
    /// Commands dropped because the link failed
    pub link_errors: u32,
}

enum Session<const FREQ_HZ: u32> {
    /// Waiting for a selector
    Idle,
    Active {
        handler: Handler,
        started: TimerInstantU64<FREQ_HZ>,
    },
}

/// The command session: selects handlers, enforces the deadline and drives
/// the running handler to completion, one step per [`Dispatcher::poll`].
///
/// Only one command is in flight at a time.
pub struct Dispatcher<const FREQ_HZ: u32> {
    config: BridgeConfig<FREQ_HZ>,
    buffer: CommandBuffer<BUFFER_CAPACITY>,
    session: Session<FREQ_HZ>,
    last_command_start: TimerInstantU64<FREQ_HZ>,
    info: [u8; INFO_FRAME_LEN],
    stats: Stats,
}

impl<const FREQ_HZ: u32> Dispatcher<FREQ_HZ> {
    pub fn new(config: BridgeConfig<FREQ_HZ>, now: TimerInstantU64<FREQ_HZ>) -> Self {
        Self {
            info: protocol::info_frame(config.api_version, config.firmware_version),
            config,
            buffer: CommandBuffer::default(),
            session: Session::Idle,
            last_command_start: now,
            stats: Stats::default(),
        }
    }

    pub fn config(&self) -> &BridgeConfig<FREQ_HZ> {
        &self.config
    }

    pub fn stats(&self) -> Stats {
        self.stats
    }

    pub fn is_active(&self) -> bool {
        matches!(self.session, Session::Active { .. })
    }

    pub fn active_command(&self) -> Option<Command> {
        match &self.session {
            Session::Idle => None,
            Session::Active { handler, .. } => Some(handler.command()),
        }
    }

    /// Command bytes collected so far toward the current target.
    pub fn buffered(&self) -> usize {
        self.buffer.len()
    }

    /// Status light for this loop iteration.
    pub fn indicator(&self, now: TimerInstantU64<FREQ_HZ>) -> IndicatorState {
        let since_start = Self::elapsed(self.last_command_start, now);
        IndicatorState::evaluate(self.is_active(), since_start.to_millis())
    }

    /// One step of the session. Never waits for the link; a bus transaction,
    /// once started, runs to its end.
    pub fn poll<L, B, P>(
        &mut self,
        now: TimerInstantU64<FREQ_HZ>,
        link: &mut L,
        bus: &mut B,
        pins: &mut P,
    ) where
        L: ByteStream,
        B: I2cBus,
        P: AuxPins,
    {
        match &mut self.session {
            Session::Active { handler, started } => {
                let elapsed = Self::elapsed(*started, now);
                if elapsed > self.config.command_timeout {
                    warn!(
                        "{} timed out after {} ms with {} bytes buffered",
                        handler.command().name(),
                        elapsed.to_millis(),
                        self.buffer.len()
                    );
                    handler.abort();
                    self.stats.timeouts = self.stats.timeouts.wrapping_add(1);
                    self.finish();
                    return;
                }

                let mut io = Io {
                    buf: &mut self.buffer,
                    link,
                    bus,
                    pins,
                    info: &self.info,
                };

                match handler.poll(&mut io) {
                    Ok(()) => {
                        trace!("{} done", handler.command().name());
                        self.stats.completed = self.stats.completed.wrapping_add(1);
                        self.finish();
                    }
                    Err(nb::Error::WouldBlock) => {}
                    Err(nb::Error::Other(_)) => {
                        error!("{}: link failure, command dropped", handler.command().name());
                        self.stats.link_errors = self.stats.link_errors.wrapping_add(1);
                        self.finish();
                    }
                }
            }
            Session::Idle => {
                let selector = match self.buffer.try_fill(link, 1) {
                    Ok(raw) => raw[0],
                    Err(nb::Error::WouldBlock) => return,
                    Err(nb::Error::Other(_)) => {
                        error!("Link read failure");
                        self.stats.link_errors = self.stats.link_errors.wrapping_add(1);
                        self.buffer.reset();
                        return;
                    }
                };
                self.buffer.reset();

                match self.config.command_set.lookup(selector) {
                    Some(command) => {
                        debug!("{} started", command.name());
                        self.last_command_start = now;
                        self.session = Session::Active {
                            handler: Handler::enter(command),
                            started: now,
                        };
                    }
                    None => {
                        debug!("Unknown selector 0x{:X} ignored", selector);
                        self.stats.unknown_selectors = self.stats.unknown_selectors.wrapping_add(1);
                    }
                }
            }
        }
    }

    fn finish(&mut self) {
        self.buffer.reset();
        self.session = Session::Idle;
    }

    fn elapsed(
        from: TimerInstantU64<FREQ_HZ>,
        now: TimerInstantU64<FREQ_HZ>,
    ) -> TimerDurationU64<FREQ_HZ> {
        now.checked_duration_since(from)
            .unwrap_or(TimerDurationU64::<FREQ_HZ>::from_ticks(0))
    }
}
