use std::thread;
use std::time::Duration;

use crate::shop::{BarberId, Shop, ShopError};

/// Barber thread body: serve customers until the shop closes, then go home.
/// Returns how many hair-cuts this barber gave.
pub fn work(shop: &Shop, barber: BarberId, cut_time: Duration) -> Result<u32, ShopError> {
    let mut haircuts = 0;

    while shop.hello_customer(barber)?.is_some() {
        // The hair-cut itself happens outside the shop lock.
        thread::sleep(cut_time);

        shop.bye_customer(barber)?;
        haircuts += 1;
    }

    Ok(haircuts)
}
