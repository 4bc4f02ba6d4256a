#[macro_use]
extern crate failure;

use std::collections::HashSet;
use std::env;
use std::fs::File;

use colored::Colorize;
use failure::Error;

use crate::config::SimulationConfig;

mod config;
mod shop;
mod simulation;

#[derive(Debug, Fail)]
#[fail(display = "validation failed because of \"{}\"", error)]
struct ValidationError {
    error: String,
}

fn validate_config(config: &SimulationConfig) -> Result<(), Error> {
    if config.shop.waiting_chairs == 0 {
        return Err(ValidationError {
            error: "the shop needs at least one waiting chair".to_string(),
        }
        .into());
    }

    if config.shop.barbers == 0 {
        return Err(ValidationError {
            error: "the shop needs at least one barber".to_string(),
        }
        .into());
    }

    let mut s = HashSet::new();

    for customer in config.customers.iter() {
        if s.contains(&customer.id) {
            return Err(ValidationError {
                error: format!("there is customer id \"{}\" collision", customer.id),
            }
            .into());
        }

        s.insert(customer.id);
    }

    Ok(())
}

fn get_config(path: String) -> Result<SimulationConfig, Error> {
    let file = File::open(&path)?;

    let config = serde_json::from_reader(file)?;

    Ok(config)
}

fn run(config: SimulationConfig) -> Result<(), Error> {
    validate_config(&config)?;

    let arrivals = config.customers.len() as u32;
    let report = simulation::run(config)?;

    println!();
    for (barber, haircuts) in report.haircuts.iter().enumerate() {
        println!(
            "{}",
            format!("barber   [{}]: finished with {} hair-cut(s)", barber, haircuts).cyan()
        );
    }
    println!(
        "{}",
        format!("# customers served  = {}", arrivals - report.drops).green()
    );
    println!(
        "{}",
        format!("# customers dropped = {}", report.drops).red()
    );

    Ok(())
}

fn main() {
    let args: Vec<String> = env::args().collect();

    let config = if args.len() == 2 {
        match get_config(args[1].clone()) {
            Ok(config) => config,
            Err(error) => {
                eprintln!("{}", format!("error: {}", error).red());
                std::process::exit(1);
            }
        }
    } else {
        get_config(format!("{}/config.json", env!("CARGO_MANIFEST_DIR")))
            .unwrap_or(SimulationConfig::default())
    };

    if let Err(error) = run(config) {
        eprintln!("{}", format!("error: {}", error).red());
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CustomerConfig, ShopConfig};

    #[test]
    fn accepts_the_default_config() {
        assert!(validate_config(&SimulationConfig::default()).is_ok());
    }

    #[test]
    fn rejects_a_shop_without_barbers() {
        let config = SimulationConfig {
            shop: ShopConfig {
                waiting_chairs: 3,
                barbers: 0,
            },
            ..SimulationConfig::default()
        };

        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn rejects_a_shop_without_waiting_chairs() {
        let config = SimulationConfig {
            shop: ShopConfig {
                waiting_chairs: 0,
                barbers: 1,
            },
            ..SimulationConfig::default()
        };

        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn rejects_duplicate_customer_ids() {
        let config = SimulationConfig {
            customers: vec![
                CustomerConfig {
                    id: 1,
                    arrival_offset_ms: 0,
                },
                CustomerConfig {
                    id: 1,
                    arrival_offset_ms: 50,
                },
            ],
            ..SimulationConfig::default()
        };

        assert!(validate_config(&config).is_err());
    }
}
