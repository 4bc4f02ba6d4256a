use std::sync::Arc;
use std::thread;
use std::time::Duration;

use failure::Error;

use crate::config::SimulationConfig;
use crate::shop::Shop;

pub mod barber;
pub mod customer;

pub struct RunReport {
    pub haircuts: Vec<u32>, // Indexed by barber id
    pub drops: u32,
}

/// Opens the shop, spawns one thread per barber and per configured customer,
/// and closes up once the last configured customer has come and gone.
pub fn run(config: SimulationConfig) -> Result<RunReport, Error> {
    let shop = Arc::new(Shop::new(
        config.shop.waiting_chairs as usize,
        config.shop.barbers as usize,
    ));
    let cut_time = Duration::from_millis(config.cut_time_ms);

    let barbers: Vec<_> = (0..config.shop.barbers as usize)
        .map(|id| {
            let shop = Arc::clone(&shop);

            thread::spawn(move || barber::work(&shop, id, cut_time))
        })
        .collect();

    let customers: Vec<_> = config
        .customers
        .into_iter()
        .map(|customer| {
            let shop = Arc::clone(&shop);

            thread::spawn(move || {
                thread::sleep(Duration::from_millis(customer.arrival_offset_ms));

                customer::visit(&shop, customer.id)
            })
        })
        .collect();

    for handle in customers {
        handle.join().expect("customer thread panicked")?;
    }

    shop.close();

    let mut haircuts = Vec::new();
    for handle in barbers {
        haircuts.push(handle.join().expect("barber thread panicked")?);
    }

    Ok(RunReport {
        haircuts,
        drops: shop.customer_drops(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CustomerConfig, ShopConfig};

    #[test]
    fn every_customer_is_accounted_for() {
        // One barber, one waiting chair and a rush of simultaneous arrivals:
        // whoever is not served must show up in the drop count.
        let config = SimulationConfig {
            shop: ShopConfig {
                waiting_chairs: 1,
                barbers: 1,
            },
            cut_time_ms: 20,
            customers: (0..8)
                .map(|id| CustomerConfig {
                    id,
                    arrival_offset_ms: 0,
                })
                .collect(),
        };

        let report = run(config).unwrap();

        let served: u32 = report.haircuts.iter().sum();
        assert_eq!(served + report.drops, 8);
        assert_eq!(report.haircuts.len(), 1);
    }

    #[test]
    fn spaced_arrivals_are_all_served() {
        let config = SimulationConfig {
            shop: ShopConfig {
                waiting_chairs: 3,
                barbers: 2,
            },
            cut_time_ms: 5,
            customers: (0..6)
                .map(|id| CustomerConfig {
                    id,
                    arrival_offset_ms: u64::from(id) * 30,
                })
                .collect(),
        };

        let report = run(config).unwrap();

        assert_eq!(report.drops, 0);
        assert_eq!(report.haircuts.iter().sum::<u32>(), 6);
        assert_eq!(report.haircuts.len(), 2);
    }
}
