//! Arrival and departure state transitions.

use lossim_core::clock::SimulationClock;
use lossim_core::events::EventList;
use lossim_core::servers::ServerPool;
use lossim_core::stats::StatisticsAccumulator;
use lossim_core::variates::VariateSource;
use tracing::debug;

/// What happened to an arriving customer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArrivalOutcome {
    /// Taken into service by this server.
    Served(usize),
    /// Every server was busy; the customer is dropped.
    Lost,
}

/// Mutable run state touched by the handlers.
pub struct RunState<'a, V: ?Sized> {
    pub clock: &'a SimulationClock,
    pub events: &'a mut EventList,
    pub servers: &'a mut ServerPool,
    pub stats: &'a mut StatisticsAccumulator,
    pub variates: &'a mut V,
}

/// Schedules the next arrival, then seizes the lowest idle server or counts a loss.
pub fn arrive<V: VariateSource + ?Sized>(
    state: RunState<'_, V>,
    mean_interarrival: f64,
    mean_service: f64,
) -> ArrivalOutcome {
    let now = state.clock.now();

    let gap = state.variates.exponential(mean_interarrival);
    state.events.schedule_arrival(now + gap);
    state.stats.record_interarrival(gap);

    match state.servers.find_idle() {
        Some(server) => {
            state.servers.set_busy(server);
            let service = state.variates.exponential(mean_service);
            state.events.schedule_departure(server, now + service);
            state.stats.record_served();
            ArrivalOutcome::Served(server)
        }
        None => {
            state.stats.record_lost();
            debug!(time = now, "arrival lost, all servers busy");
            ArrivalOutcome::Lost
        }
    }
}

/// Frees `server` and clears its departure slot.
pub fn depart(events: &mut EventList, servers: &mut ServerPool, server: usize) {
    servers.set_idle(server);
    events.clear_departure(server);
}

#[cfg(test)]
mod tests {
    use super::*;
    use lossim_core::servers::ServerStatus;
    use lossim_core::variates::StubVariates;
    use tracing_test::traced_test;

    struct Fixture {
        clock: SimulationClock,
        events: EventList,
        servers: ServerPool,
        stats: StatisticsAccumulator,
        variates: StubVariates,
    }

    impl Fixture {
        fn new(servers: usize, draws: Vec<f64>) -> Self {
            Self {
                clock: SimulationClock::new(),
                events: EventList::new(servers, 100.0, 0.0).unwrap(),
                servers: ServerPool::new(servers).unwrap(),
                stats: StatisticsAccumulator::new(),
                variates: StubVariates::sequence(draws),
            }
        }

        fn arrive(&mut self) -> ArrivalOutcome {
            arrive(
                RunState {
                    clock: &self.clock,
                    events: &mut self.events,
                    servers: &mut self.servers,
                    stats: &mut self.stats,
                    variates: &mut self.variates,
                },
                1.0,
                1.0,
            )
        }
    }

    #[test]
    fn test_arrival_seizes_idle_server() {
        let mut f = Fixture::new(2, vec![0.5, 3.0]);
        f.clock.advance_to(1.0);

        assert_eq!(f.arrive(), ArrivalOutcome::Served(0));
        assert_eq!(f.events.next_arrival(), 1.5);
        assert_eq!(f.events.departure(0), Some(4.0));
        assert_eq!(f.events.departure(1), None);
        assert_eq!(f.servers.status(0), ServerStatus::Busy);
        assert_eq!(f.stats.customers_served, 1);
        assert_eq!(f.stats.cumulative_interarrival_sum, 0.5);
    }

    #[test]
    fn test_arrival_lost_when_all_busy() {
        let mut f = Fixture::new(1, vec![2.0]);
        f.servers.set_busy(0);
        f.events.schedule_departure(0, 9.0);

        assert_eq!(f.arrive(), ArrivalOutcome::Lost);
        assert_eq!(f.stats.customers_lost, 1);
        assert_eq!(f.stats.customers_served, 0);
        assert_eq!(f.events.departure(0), Some(9.0));
        // only the interarrival gap is drawn for a lost customer
        assert_eq!(f.variates.draws(), 1);
    }

    #[traced_test]
    #[test]
    fn test_lost_arrival_is_logged() {
        let mut f = Fixture::new(1, vec![1.0]);
        f.clock.advance_to(3.0);
        assert_eq!(f.arrive(), ArrivalOutcome::Served(0));
        assert!(!logs_contain("arrival lost"));

        assert_eq!(f.arrive(), ArrivalOutcome::Lost);
        assert!(logs_contain("arrival lost, all servers busy"));
    }

    #[test]
    fn test_departure_frees_server() {
        let mut f = Fixture::new(2, vec![1.0]);
        f.arrive();
        f.arrive();
        depart(&mut f.events, &mut f.servers, 0);

        assert_eq!(f.servers.status(0), ServerStatus::Idle);
        assert_eq!(f.servers.status(1), ServerStatus::Busy);
        assert_eq!(f.events.departure(0), None);
        assert!(f.events.departure(1).is_some());
    }
}
