//! ## lossim-core::events
//! **Fixed-slot event list**
//!
//! Slot layout, by class index:
//! - `0`: closing time for new arrivals (constant)
//! - `1`: next arrival
//! - `2..N+1`: next departure from server `k - 2`
//!
//! An idle server's departure slot holds `None` rather than a large sentinel time.

use serde::Serialize;

use crate::error::SimulationError;

/// Class of the next event chosen by the scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum EventClass {
    /// Terminal class: arrivals are closed and every server is idle.
    End,
    Arrival,
    /// Departure from the server with this index.
    Departure(usize),
}

impl EventClass {
    /// Slot index of this class in the event list.
    pub fn index(self) -> usize {
        match self {
            EventClass::End => 0,
            EventClass::Arrival => 1,
            EventClass::Departure(server) => server + 2,
        }
    }
}

/// One processed event: its class and the clock value it occurred at.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EventRecord {
    pub class: EventClass,
    pub time: f64,
}

#[derive(Debug, Clone)]
pub struct EventList {
    closing_time: f64,
    next_arrival: f64,
    departures: Vec<Option<f64>>,
}

impl EventList {
    /// Builds an event list for `servers` servers, every departure slot empty.
    ///
    /// The departure slots are sized exactly once; a failed allocation is reported
    /// instead of leaving a partially sized list.
    pub fn new(
        servers: usize,
        closing_time: f64,
        first_arrival: f64,
    ) -> Result<Self, SimulationError> {
        let mut departures = Vec::new();
        departures
            .try_reserve_exact(servers)
            .map_err(|_| SimulationError::Allocation {
                what: "event list",
                requested: servers + 2,
            })?;
        departures.resize(servers, None);

        Ok(Self {
            closing_time,
            next_arrival: first_arrival,
            departures,
        })
    }

    #[inline]
    pub fn closing_time(&self) -> f64 {
        self.closing_time
    }

    #[inline]
    pub fn next_arrival(&self) -> f64 {
        self.next_arrival
    }

    /// True while the pending arrival falls before the closing time.
    #[inline]
    pub fn accepts_arrival(&self) -> bool {
        self.next_arrival < self.closing_time
    }

    pub fn schedule_arrival(&mut self, time: f64) {
        self.next_arrival = time;
    }

    #[inline]
    pub fn departure(&self, server: usize) -> Option<f64> {
        self.departures[server]
    }

    pub fn schedule_departure(&mut self, server: usize, time: f64) {
        self.departures[server] = Some(time);
    }

    pub fn clear_departure(&mut self, server: usize) {
        self.departures[server] = None;
    }

    /// Departure slots in server order.
    pub fn departures(&self) -> impl Iterator<Item = Option<f64>> + '_ {
        self.departures.iter().copied()
    }

    /// Number of departure slots (one per server).
    pub fn server_slots(&self) -> usize {
        self.departures.len()
    }
}
