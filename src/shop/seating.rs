use std::collections::vec_deque::VecDeque;
use std::sync::{Arc, Condvar};

use crate::config::Id;

/// 1. A service chair moves through three phases for every hair-cut
///     * `Empty` -> `Busy` when a customer sits down
///     * `Busy` -> `Done` when the barber finishes the cut
///     * `Done` -> `Empty` when the customer pays and leaves
///
/// Keeping the phase (and the occupant's identity) explicit means every
/// blocked thread can re-check exactly the transition it is waiting for, so a
/// spurious or early wakeup never advances anyone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceChair {
    Empty,
    Busy(Id),
    Done(Id),
}

/// A customer holding a waiting chair, together with the signal that wakes
/// exactly that customer. The signal lives as long as the customer stays in
/// the queue and is keyed by identity, not by queue position.
pub struct Waiter {
    pub customer: Id,
    pub signal: Arc<Condvar>,
}

/// The plain-data half of the shop: who sits where. All access goes through
/// the shop-wide mutex, nothing in here synchronizes on its own.
pub struct Seating {
    chairs: Vec<ServiceChair>,
    waiting: VecDeque<Waiter>,
    drops: u32,
    closed: bool,
}

impl Seating {
    pub fn new(barbers: usize) -> Seating {
        Seating {
            chairs: vec![ServiceChair::Empty; barbers],
            waiting: VecDeque::new(),
            drops: 0,
            closed: false,
        }
    }

    pub fn chair(&self, barber: usize) -> ServiceChair {
        self.chairs[barber]
    }

    pub fn first_empty_chair(&self) -> Option<usize> {
        self.chairs
            .iter()
            .position(|chair| *chair == ServiceChair::Empty)
    }

    pub fn seat(&mut self, barber: usize, customer: Id) {
        debug_assert_eq!(self.chairs[barber], ServiceChair::Empty);

        self.chairs[barber] = ServiceChair::Busy(customer);
    }

    /// `Busy(customer)` -> `Done(customer)`. Returns `None` without touching
    /// the chair when nobody is being served in it.
    pub fn finish_cut(&mut self, barber: usize) -> Option<Id> {
        match self.chairs[barber] {
            ServiceChair::Busy(customer) => {
                self.chairs[barber] = ServiceChair::Done(customer);
                Some(customer)
            }
            _ => None,
        }
    }

    pub fn vacate(&mut self, barber: usize) {
        self.chairs[barber] = ServiceChair::Empty;
    }

    pub fn waiting_len(&self) -> usize {
        self.waiting.len()
    }

    pub fn enqueue(&mut self, customer: Id) -> Arc<Condvar> {
        let signal = Arc::new(Condvar::new());

        self.waiting.push_back(Waiter {
            customer,
            signal: Arc::clone(&signal),
        });

        signal
    }

    /// Removes the customer by identity wherever it sits in the queue. The
    /// waiter's signal goes away with it.
    pub fn dequeue(&mut self, customer: Id) {
        if let Some(at) = self
            .waiting
            .iter()
            .position(|waiter| waiter.customer == customer)
        {
            self.waiting.remove(at);
        }
    }

    pub fn front_is(&self, customer: Id) -> bool {
        self.waiting
            .front()
            .map(|waiter| waiter.customer == customer)
            .unwrap_or(false)
    }

    pub fn front_signal(&self) -> Option<&Condvar> {
        self.waiting.front().map(|waiter| &*waiter.signal)
    }

    pub fn waiters(&self) -> impl Iterator<Item = &Waiter> {
        self.waiting.iter()
    }

    pub fn record_drop(&mut self) {
        self.drops += 1;
    }

    pub fn drops(&self) -> u32 {
        self.drops
    }

    pub fn close(&mut self) {
        self.closed = true;
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chairs_start_empty_and_scan_lowest_index_first() {
        let mut seating = Seating::new(3);

        assert_eq!(seating.first_empty_chair(), Some(0));

        seating.seat(0, 10);
        assert_eq!(seating.first_empty_chair(), Some(1));

        seating.seat(1, 11);
        seating.seat(2, 12);
        assert_eq!(seating.first_empty_chair(), None);

        seating.vacate(1);
        assert_eq!(seating.first_empty_chair(), Some(1));
    }

    #[test]
    fn a_chair_alternates_between_empty_and_occupied() {
        let mut seating = Seating::new(1);

        seating.seat(0, 7);
        assert_eq!(seating.chair(0), ServiceChair::Busy(7));

        assert_eq!(seating.finish_cut(0), Some(7));
        assert_eq!(seating.chair(0), ServiceChair::Done(7));

        seating.vacate(0);
        assert_eq!(seating.chair(0), ServiceChair::Empty);
    }

    #[test]
    fn finishing_a_cut_in_an_empty_chair_changes_nothing() {
        let mut seating = Seating::new(1);

        assert_eq!(seating.finish_cut(0), None);
        assert_eq!(seating.chair(0), ServiceChair::Empty);
    }

    #[test]
    fn the_queue_keeps_arrival_order() {
        let mut seating = Seating::new(1);

        seating.enqueue(1);
        seating.enqueue(2);
        seating.enqueue(3);

        assert_eq!(seating.waiting_len(), 3);
        assert!(seating.front_is(1));
        assert!(!seating.front_is(2));

        seating.dequeue(1);
        assert!(seating.front_is(2));
    }

    #[test]
    fn dequeue_removes_by_identity_not_position() {
        let mut seating = Seating::new(1);

        seating.enqueue(1);
        seating.enqueue(2);
        seating.enqueue(3);

        seating.dequeue(2);

        let left: Vec<_> = seating.waiters().map(|waiter| waiter.customer).collect();
        assert_eq!(left, vec![1, 3]);
    }

    #[test]
    fn drops_only_move_up() {
        let mut seating = Seating::new(1);

        assert_eq!(seating.drops(), 0);
        seating.record_drop();
        seating.record_drop();
        assert_eq!(seating.drops(), 2);
    }
}
