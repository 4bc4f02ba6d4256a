use crate::config::Id;
use crate::shop::{Shop, ShopError, VisitOutcome};

/// Customer thread body: one visit, served or turned away. Returns whether
/// the customer got a hair-cut.
pub fn visit(shop: &Shop, customer: Id) -> Result<bool, ShopError> {
    match shop.visit_shop(customer) {
        VisitOutcome::Seated(barber) => {
            shop.leave_shop(customer, barber)?;
            Ok(true)
        }
        VisitOutcome::TurnedAway => Ok(false),
    }
}
