use std::sync::{Condvar, Mutex};

use colored::Colorize;

use self::seating::{Seating, ServiceChair};
use crate::config::Id;

pub mod seating;

pub type BarberId = usize;

/// 1. `Shop` coordinates two kinds of threads through one mutex
///     * a customer calls `visit_shop`
///         * shop full -> counted as a drop, `TurnedAway`
///         * a chair free -> sits down right away, `Seated(barber)`
///         * all barbers busy -> takes a waiting chair and sleeps until the
///           barber finishing a cut calls it in, strictly in arrival order
///     * a seated customer calls `leave_shop`
///         * sleeps until its own chair reads `Done`, then pays by vacating
///           the chair and waking the barber
///     * a barber loops `hello_customer` -> cut hair -> `bye_customer`
///         * `hello_customer` sleeps while its chair is `Empty`
///         * `bye_customer` marks the cut done, waits for the payment, then
///           calls in the customer at the front of the queue
///
/// Every wait re-checks its predicate in a loop and every signal is sent with
/// the lock held, after the state change that justifies it, so wakeups are
/// never lost and spurious ones are harmless.
pub struct Shop {
    waiting_chairs: usize,
    chair_signals: Vec<Condvar>, // One per service chair, index = barber id
    seating: Mutex<Seating>,
}

#[derive(Debug, PartialEq, Eq)]
pub enum VisitOutcome {
    Seated(BarberId),
    TurnedAway,
}

#[derive(Debug, Fail, PartialEq, Eq)]
pub enum ShopError {
    #[fail(
        display = "barber id {} is out of range, the shop employs {} barbers",
        id, barbers
    )]
    UnknownBarber { id: BarberId, barbers: usize },
    #[fail(display = "barber {} has nobody in the service chair", id)]
    EmptyChair { id: BarberId },
    #[fail(
        display = "customer {} is not the one in barber {}'s chair",
        customer, barber
    )]
    MismatchedPair { customer: Id, barber: BarberId },
    #[fail(display = "barber {}'s chair is mid-service, two threads share one barber id", id)]
    ChairOutOfPhase { id: BarberId },
}

impl Shop {
    pub fn new(waiting_chairs: usize, barbers: usize) -> Shop {
        debug_assert!(waiting_chairs > 0 && barbers > 0);

        Shop {
            waiting_chairs,
            chair_signals: (0..barbers).map(|_| Condvar::new()).collect(),
            seating: Mutex::new(Seating::new(barbers)),
        }
    }

    /// Called once per customer on arrival. Either assigns a barber (waiting
    /// in a chair first if they are all busy) or turns the customer away.
    pub fn visit_shop(&self, customer: Id) -> VisitOutcome {
        let mut seating = self.seating.lock().unwrap();

        if seating.is_closed() {
            customer_line(customer, "leaves because the shop is closed.");
            return VisitOutcome::TurnedAway;
        }

        if seating.waiting_len() == self.waiting_chairs {
            customer_line(
                customer,
                "leaves the shop because of no available waiting chairs.",
            );
            seating.record_drop();
            return VisitOutcome::TurnedAway;
        }

        let mut chair = seating.first_empty_chair();

        if chair.is_none() {
            let signal = seating.enqueue(customer);

            customer_line(
                customer,
                &format!(
                    "takes a waiting chair. # waiting seats available = {}",
                    self.waiting_chairs - seating.waiting_len()
                ),
            );

            // Only the front of the queue gets called in, and only once a
            // chair is actually free again.
            while !seating.is_closed()
                && !(seating.front_is(customer) && seating.first_empty_chair().is_some())
            {
                seating = signal.wait(seating).unwrap();
            }

            seating.dequeue(customer);

            if seating.is_closed() {
                customer_line(customer, "leaves because the shop closed while waiting.");
                return VisitOutcome::TurnedAway;
            }

            chair = seating.first_empty_chair();
        }

        let barber = match chair {
            Some(barber) => barber,
            None => {
                // Unreachable while the seating invariants hold: the wait
                // above only ends once a chair is free.
                eprintln!(
                    "{}",
                    format!(
                        "error: no empty service chair found for customer {}",
                        customer
                    )
                    .red()
                );
                return VisitOutcome::TurnedAway;
            }
        };

        customer_line(
            customer,
            &format!(
                "moves to the service chair. # waiting seats available = {}",
                self.waiting_chairs - seating.waiting_len()
            ),
        );

        // Seat first, then wake the barber, still under the lock.
        seating.seat(barber, customer);
        self.chair_signals[barber].notify_one();

        VisitOutcome::Seated(barber)
    }

    /// Called by a seated customer once `visit_shop` returned its barber.
    /// Blocks until the cut is done, then pays by vacating the chair.
    pub fn leave_shop(&self, customer: Id, barber: BarberId) -> Result<(), ShopError> {
        let signal = self.chair_signal(barber)?;
        let mut seating = self.seating.lock().unwrap();

        match seating.chair(barber) {
            ServiceChair::Busy(seated) | ServiceChair::Done(seated) if seated == customer => {}
            _ => return Err(ShopError::MismatchedPair { customer, barber }),
        }

        customer_line(
            customer,
            &format!("waits for barber {} to be done with hair-cut.", barber),
        );

        while seating.chair(barber) != ServiceChair::Done(customer) {
            seating = signal.wait(seating).unwrap();
        }

        customer_line(customer, &format!("pays barber {} for the service.", barber));

        // Vacating the chair is the payment handoff the barber waits on.
        seating.vacate(barber);
        signal.notify_one();

        customer_line(customer, &format!("says good-bye to barber {}.", barber));

        Ok(())
    }

    /// Called by a barber at the start of each service cycle. Sleeps until a
    /// customer is seated; returns `None` once the shop is closed and the
    /// chair stays empty.
    pub fn hello_customer(&self, barber: BarberId) -> Result<Option<Id>, ShopError> {
        let signal = self.chair_signal(barber)?;
        let mut seating = self.seating.lock().unwrap();

        if seating.chair(barber) == ServiceChair::Empty
            && seating.waiting_len() == 0
            && !seating.is_closed()
        {
            barber_line(barber, "sleeps because of no customers.");
        }

        while seating.chair(barber) == ServiceChair::Empty && !seating.is_closed() {
            seating = signal.wait(seating).unwrap();
        }

        match seating.chair(barber) {
            ServiceChair::Busy(customer) => {
                barber_line(
                    barber,
                    &format!("starts a hair-cut service for customer {}.", customer),
                );
                Ok(Some(customer))
            }
            ServiceChair::Empty => Ok(None),
            ServiceChair::Done(_) => Err(ShopError::ChairOutOfPhase { id: barber }),
        }
    }

    /// Called by a barber after finishing a hair-cut. Wakes the customer,
    /// waits for the payment, then calls in the next customer in line.
    pub fn bye_customer(&self, barber: BarberId) -> Result<(), ShopError> {
        let signal = self.chair_signal(barber)?;
        let mut seating = self.seating.lock().unwrap();

        let customer = match seating.finish_cut(barber) {
            Some(customer) => customer,
            None => return Err(ShopError::EmptyChair { id: barber }),
        };

        barber_line(
            barber,
            &format!(
                "says he's done with a hair-cut service for customer {}.",
                customer
            ),
        );
        signal.notify_one();

        // The paired customer is the only other party on this signal; the
        // chair leaves `Done` exactly when it pays and vacates.
        while seating.chair(barber) == ServiceChair::Done(customer) {
            seating = signal.wait(seating).unwrap();
        }

        barber_line(barber, "calls in another customer.");

        if let Some(next) = seating.front_signal() {
            next.notify_one();
        }

        Ok(())
    }

    /// Snapshot of how many customers were turned away because the shop was
    /// full.
    pub fn customer_drops(&self) -> u32 {
        self.seating.lock().unwrap().drops()
    }

    /// Closes the shop: sleeping barbers wake up and go home, queued
    /// customers give up, new arrivals are turned away (without counting as
    /// capacity drops). A customer already in a service chair is still served
    /// to completion.
    pub fn close(&self) {
        let mut seating = self.seating.lock().unwrap();

        seating.close();

        for signal in self.chair_signals.iter() {
            signal.notify_all();
        }

        for waiter in seating.waiters() {
            waiter.signal.notify_all();
        }
    }

    fn chair_signal(&self, barber: BarberId) -> Result<&Condvar, ShopError> {
        self.chair_signals
            .get(barber)
            .ok_or(ShopError::UnknownBarber {
                id: barber,
                barbers: self.chair_signals.len(),
            })
    }
}

fn customer_line(customer: Id, message: &str) {
    println!("{} {}", format!("customer [{}]:", customer).green(), message);
}

fn barber_line(barber: BarberId, message: &str) {
    println!("{} {}", format!("barber   [{}]:", barber).cyan(), message);
}
