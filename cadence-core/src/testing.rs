//! Host-side fakes for the collaborator traits

extern crate std;

use core::cell::RefCell;
use core::fmt;
use std::collections::VecDeque;
use std::rc::Rc;
use std::string::String;
use std::vec::Vec;

use embedded_hal::delay::DelayNs;

use crate::motion::Position;
use crate::state::{Actor, SERVO_COUNT};
use crate::traits::{Console, ServoDriver, TimeSource};

#[derive(Debug, Default)]
struct ClockInner {
    ticks: [u16; SERVO_COUNT],
    running: [bool; SERVO_COUNT],
    auto_tick: u16,
}

impl ClockInner {
    fn tick(&mut self, ms: u16) {
        for index in 0..SERVO_COUNT {
            if self.running[index] {
                self.ticks[index] = self.ticks[index].wrapping_add(ms);
            }
        }
    }
}

/// Per-actor millisecond counters under test control
///
/// Clones share the same counters, so a test can keep a handle after
/// moving the clock into a scheduler.
#[derive(Debug, Clone, Default)]
pub struct FakeClock {
    inner: Rc<RefCell<ClockInner>>,
}

impl FakeClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clock where every reading lets `ms` pass on the running counters,
    /// so polling loops make progress
    pub fn with_auto_tick(ms: u16) -> Self {
        let clock = Self::default();
        clock.inner.borrow_mut().auto_tick = ms;
        clock
    }

    /// Force an actor's counter to a value
    pub fn set(&self, actor: Actor, ticks: u16) {
        self.inner.borrow_mut().ticks[actor.index()] = ticks;
    }

    /// Advance an actor's counter whether or not it is running
    pub fn advance(&self, actor: Actor, ms: u16) {
        let mut inner = self.inner.borrow_mut();
        let ticks = &mut inner.ticks[actor.index()];
        *ticks = ticks.wrapping_add(ms);
    }

    /// Let wall time pass: every running counter advances
    pub fn tick(&self, ms: u32) {
        self.inner.borrow_mut().tick(ms as u16);
    }

    pub fn is_running(&self, actor: Actor) -> bool {
        self.inner.borrow().running[actor.index()]
    }
}

impl TimeSource for FakeClock {
    fn now(&self, actor: Actor) -> u16 {
        let mut inner = self.inner.borrow_mut();
        let auto_tick = inner.auto_tick;
        inner.tick(auto_tick);
        inner.ticks[actor.index()]
    }

    fn start(&mut self, actor: Actor) {
        self.inner.borrow_mut().running[actor.index()] = true;
    }

    fn stop(&mut self, actor: Actor) {
        self.inner.borrow_mut().running[actor.index()] = false;
    }
}

/// Servo driver that records every output write
#[derive(Debug, Default)]
pub struct RecordingServos {
    log: Vec<(Actor, Position)>,
    failing: Option<Actor>,
    fault: Option<Actor>,
}

impl RecordingServos {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last position written to an actor
    pub fn last(&self, actor: Actor) -> Option<Position> {
        self.log
            .iter()
            .rev()
            .find(|(a, _)| *a == actor)
            .map(|(_, p)| *p)
    }

    /// Total number of writes
    pub fn writes(&self) -> usize {
        self.log.len()
    }

    pub fn log(&self) -> &[(Actor, Position)] {
        &self.log
    }

    /// Report every later write to `actor` as failed
    pub fn fail_writes(mut self, actor: Actor) -> Self {
        self.failing = Some(actor);
        self
    }
}

impl ServoDriver for RecordingServos {
    fn set_output(&mut self, actor: Actor, position: Position) {
        self.log.push((actor, position));
        if self.failing == Some(actor) {
            self.fault = Some(actor);
        }
    }

    fn take_fault(&mut self) -> Option<Actor> {
        self.fault.take()
    }
}

/// Blocking delay that lets time pass on a [`FakeClock`]
#[derive(Debug)]
pub struct FakeDelay {
    clock: FakeClock,
    total_ns: u64,
}

impl FakeDelay {
    pub fn new(clock: FakeClock) -> Self {
        Self { clock, total_ns: 0 }
    }

    /// Total time spent blocked, in milliseconds
    pub fn total_ms(&self) -> u32 {
        (self.total_ns / 1_000_000) as u32
    }
}

impl DelayNs for FakeDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.total_ns += ns as u64;
    }

    fn delay_ms(&mut self, ms: u32) {
        self.total_ns += ms as u64 * 1_000_000;
        self.clock.tick(ms);
    }
}

/// Console fed from scripted input with captured output
#[derive(Debug, Default)]
pub struct ScriptedConsole {
    keys: VecDeque<u8>,
    polls: VecDeque<Option<u8>>,
    output: String,
}

impl ScriptedConsole {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue bytes for blocking reads
    pub fn type_keys(&mut self, keys: &[u8]) {
        self.keys.extend(keys.iter().copied());
    }

    /// Queue results for non-blocking reads; `None` means nothing waiting
    pub fn queue_polls(&mut self, polls: &[Option<u8>]) {
        self.polls.extend(polls.iter().copied());
    }

    pub fn output(&self) -> &str {
        &self.output
    }

    pub fn take_output(&mut self) -> String {
        core::mem::take(&mut self.output)
    }
}

impl fmt::Write for ScriptedConsole {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.output.push_str(s);
        Ok(())
    }
}

impl Console for ScriptedConsole {
    fn read_byte(&mut self) -> u8 {
        self.keys.pop_front().expect("scripted input exhausted")
    }

    fn try_read_byte(&mut self) -> Option<u8> {
        self.polls.pop_front().flatten()
    }
}
