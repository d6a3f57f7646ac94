//! Simulated open-drain wire
//!
//! Combines the master's drive levels with the simulated slave's, feeds the
//! resulting edges to the slave and records every effective transition.

use std::vec::Vec;

use sccb_hal::{Line, SccbPins};

use super::slave::SimSlave;

/// How the slave stretches the clock
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stretch {
    /// SCL follows the master
    None,
    /// While addressed, hold SCL low for this many polls after each release
    Polls(u32),
    /// SCL is stuck low
    Forever,
}

/// One effective line transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    /// Line that changed
    pub line: Line,
    /// New level of that line
    pub high: bool,
    /// Level of the other line at the time
    pub other_high: bool,
}

/// Bus condition derived from the trace
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Condition {
    /// SDA fell while SCL was high
    Start,
    /// SDA rose while SCL was high
    Stop,
}

/// Simulated pin capability with an attached slave
#[derive(Debug, Clone)]
pub struct SimPins {
    master_sda: bool,
    master_scl: bool,
    sda: bool,
    scl: bool,
    slave: SimSlave,
    stretch: Stretch,
    stretch_left: u32,
    sense_scl: bool,
    scl_polls: u32,
    delay_us_total: u64,
    yield_on_delay: bool,
    trace: Vec<Edge>,
}

impl SimPins {
    /// Create an idle bus with the given slave attached
    pub fn new(slave: SimSlave) -> Self {
        let mut pins = Self {
            master_sda: true,
            master_scl: true,
            sda: true,
            scl: true,
            slave,
            stretch: Stretch::None,
            stretch_left: 0,
            sense_scl: true,
            scl_polls: 0,
            delay_us_total: 0,
            yield_on_delay: false,
            trace: Vec::new(),
        };
        pins.settle();
        pins
    }

    /// Set the stretching behaviour
    pub fn with_stretch(mut self, stretch: Stretch) -> Self {
        self.stretch = stretch;
        self.settle();
        self.trace.clear();
        self
    }

    /// Report SCL as unreadable
    pub fn without_scl_sense(mut self) -> Self {
        self.sense_scl = false;
        self
    }

    /// Yield the thread on every delay to shake out interleavings
    pub fn yield_on_delay(mut self) -> Self {
        self.yield_on_delay = true;
        self
    }

    /// Attached slave
    pub fn slave(&self) -> &SimSlave {
        &self.slave
    }

    /// Attached slave, mutably
    pub fn slave_mut(&mut self) -> &mut SimSlave {
        &mut self.slave
    }

    /// Effective SDA level
    pub fn sda(&self) -> bool {
        self.sda
    }

    /// Effective SCL level
    pub fn scl(&self) -> bool {
        self.scl
    }

    /// Whether both lines are released and high
    pub fn is_idle(&self) -> bool {
        self.sda && self.scl
    }

    /// Number of SCL reads
    pub fn scl_polls(&self) -> u32 {
        self.scl_polls
    }

    /// Total busy-wait time requested, in microseconds
    pub fn delay_us_total(&self) -> u64 {
        self.delay_us_total
    }

    /// Recorded transitions
    pub fn trace(&self) -> &[Edge] {
        &self.trace
    }

    /// Forget recorded transitions and slave events
    pub fn clear_trace(&mut self) {
        self.trace.clear();
        self.slave.clear_events();
    }

    /// Start and stop conditions in the trace, in order
    pub fn conditions(&self) -> Vec<Condition> {
        self.trace
            .iter()
            .filter(|e| e.line == Line::Sda && e.other_high)
            .map(|e| {
                if e.high {
                    Condition::Stop
                } else {
                    Condition::Start
                }
            })
            .collect()
    }

    /// SDA transitions only, as `(new level, SCL level)` pairs
    pub fn sda_edges(&self) -> Vec<(bool, bool)> {
        self.trace
            .iter()
            .filter(|e| e.line == Line::Sda)
            .map(|e| (e.high, e.other_high))
            .collect()
    }

    /// SDA level at every SCL rising edge
    pub fn sampled_bits(&self) -> Vec<bool> {
        self.trace
            .iter()
            .filter(|e| e.line == Line::Scl && e.high)
            .map(|e| e.other_high)
            .collect()
    }

    fn holds_scl(&self) -> bool {
        match self.stretch {
            Stretch::None => false,
            Stretch::Polls(_) => self.stretch_left > 0,
            Stretch::Forever => true,
        }
    }

    fn record(&mut self, line: Line, high: bool) {
        let other_high = match line {
            Line::Scl => self.sda,
            Line::Sda => self.scl,
        };
        self.trace.push(Edge {
            line,
            high,
            other_high,
        });
    }

    /// Propagate drive levels to the wire and the slave
    fn settle(&mut self) {
        let scl = self.master_scl && !self.holds_scl();
        if scl != self.scl {
            self.scl = scl;
            self.record(Line::Scl, scl);
            if scl {
                self.slave.on_scl_rise(self.sda);
            } else {
                self.slave.on_scl_fall();
            }
        }

        let sda = self.master_sda && !self.slave.holds_sda();
        if sda != self.sda {
            self.sda = sda;
            self.record(Line::Sda, sda);
            if self.scl {
                if sda {
                    self.slave.on_stop();
                } else {
                    self.slave.on_start();
                }
            }
        }
    }
}

impl SccbPins for SimPins {
    fn set_sda(&mut self, high: bool) {
        self.master_sda = high;
        self.settle();
    }

    fn set_scl(&mut self, high: bool) {
        let releasing = high && !self.master_scl;
        self.master_scl = high;
        self.stretch_left = match self.stretch {
            Stretch::Polls(polls) if releasing && self.slave.is_busy() => polls,
            Stretch::Polls(_) if !high => 0,
            _ => self.stretch_left,
        };
        self.settle();
    }

    fn sda_is_high(&mut self) -> bool {
        self.sda
    }

    fn scl_is_high(&mut self) -> Option<bool> {
        if !self.sense_scl {
            return None;
        }
        self.scl_polls += 1;
        if self.stretch_left > 0 {
            self.stretch_left -= 1;
            self.settle();
        }
        Some(self.scl)
    }

    fn delay_us(&mut self, us: u32) {
        self.delay_us_total += u64::from(us);
        if self.yield_on_delay {
            std::thread::yield_now();
        }
    }
}
