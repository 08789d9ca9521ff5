//! Next-event selection ("timing").

use lossim_core::clock::SimulationClock;
use lossim_core::events::{EventClass, EventList};
use lossim_core::servers::ServerPool;

/// Picks the next event and advances the clock to its time.
///
/// - A pending arrival is a candidate only while it falls before the closing time.
/// - With no arrival candidate and every server idle, the run is over: the clock
///   moves to `max(now, closing_time)` and [`EventClass::End`] is returned.
/// - Otherwise the earliest candidate wins. Exact ties go to the lowest slot: the
///   arrival beats any departure, and a lower-indexed server beats a higher one.
pub fn timing(clock: &mut SimulationClock, events: &EventList, servers: &ServerPool) -> EventClass {
    let arrival = events
        .accepts_arrival()
        .then(|| (EventClass::Arrival, events.next_arrival()));

    if arrival.is_none() && !servers.any_busy() {
        return finish(clock, events);
    }

    let mut next = arrival;
    for (server, departure) in events.departures().enumerate() {
        let Some(time) = departure else {
            continue;
        };
        if next.map_or(true, |(_, best)| time < best) {
            next = Some((EventClass::Departure(server), time));
        }
    }

    match next {
        Some((class, time)) => {
            clock.advance_to(time);
            class
        }
        // a busy server always holds a departure, so this only guards a broken list
        None => finish(clock, events),
    }
}

fn finish(clock: &mut SimulationClock, events: &EventList) -> EventClass {
    clock.advance_to(clock.now().max(events.closing_time()));
    EventClass::End
}
