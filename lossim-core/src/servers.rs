//! Busy/idle state for each server.

use serde::Serialize;

use crate::error::SimulationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ServerStatus {
    Idle,
    Busy,
}

/// Fixed-size pool of servers, indexed from 0.
#[derive(Debug, Clone)]
pub struct ServerPool {
    servers: Vec<ServerStatus>,
}

impl ServerPool {
    /// Creates `count` idle servers.
    pub fn new(count: usize) -> Result<Self, SimulationError> {
        let mut servers = Vec::new();
        servers
            .try_reserve_exact(count)
            .map_err(|_| SimulationError::Allocation {
                what: "server pool",
                requested: count,
            })?;
        servers.resize(count, ServerStatus::Idle);
        Ok(Self { servers })
    }

    /// First idle server in ascending index order.
    pub fn find_idle(&self) -> Option<usize> {
        self.servers
            .iter()
            .position(|status| *status == ServerStatus::Idle)
    }

    #[inline]
    pub fn set_busy(&mut self, index: usize) {
        self.servers[index] = ServerStatus::Busy;
    }

    #[inline]
    pub fn set_idle(&mut self, index: usize) {
        self.servers[index] = ServerStatus::Idle;
    }

    pub fn any_busy(&self) -> bool {
        self.servers.contains(&ServerStatus::Busy)
    }

    pub fn busy_count(&self) -> usize {
        self.servers
            .iter()
            .filter(|status| **status == ServerStatus::Busy)
            .count()
    }

    #[inline]
    pub fn status(&self, index: usize) -> ServerStatus {
        self.servers[index]
    }

    pub fn len(&self) -> usize {
        self.servers.len()
    }
}
