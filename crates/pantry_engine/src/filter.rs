/* 📖 # Why pass "now" into the expiry filter?

Whether a product is "expiring" depends on the day the export runs.
Taking `now` as a parameter keeps the policies pure, so the 7-day
boundary can be checked against a fixed date instead of the wall clock.
*/

use chrono::{NaiveDate, NaiveDateTime, TimeDelta};
use tracing::debug;

use crate::product::Product;

/// Format of expiry dates understood by the expiry filter, e.g. `05.03.2025`.
pub const EXPIRY_DATE_FORMAT: &str = "%d.%m.%Y";

/// Products expiring within this many days from now (or already expired) are exported.
pub const EXPIRY_WINDOW_DAYS: i64 = 7;

/// Products with a quantity at or below this value count as running low.
pub const LOW_QUANTITY_THRESHOLD: i64 = 5;

/// Annotation appended after a non-empty low-quantity export.
pub const LOW_QUANTITY_ADVISORY: &str = "Warnung: Alles nur 5 oder weniger";

/// Selection rule used by the filtered exports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterPolicy {
    /// Expired, or expiring within [`EXPIRY_WINDOW_DAYS`] of `now`.
    ExpiringOrExpired { now: NaiveDateTime },
    /// Quantity at or below [`LOW_QUANTITY_THRESHOLD`].
    LowQuantity,
}

impl FilterPolicy {
    /// Products matching the policy, in their original order.
    pub fn select<'a>(&self, products: &'a [Product]) -> Vec<&'a Product> {
        match self {
            Self::ExpiringOrExpired { now } => expiring_or_expired(products, *now),
            Self::LowQuantity => low_quantity(products),
        }
    }

    /// Line appended to a non-empty export under this policy.
    pub fn advisory(&self) -> Option<&'static str> {
        match self {
            Self::ExpiringOrExpired { .. } => None,
            Self::LowQuantity => Some(LOW_QUANTITY_ADVISORY),
        }
    }
}

/// Parses an expiry date to local midnight of that day.
///
/// Returns `None` for empty dates, the no-expiry sentinel and anything not in
/// [`EXPIRY_DATE_FORMAT`].
pub fn parse_expiry_date(product: &Product) -> Option<NaiveDateTime> {
    if !product.has_expiry() {
        return None;
    }
    match NaiveDate::parse_from_str(product.expiry_date.trim(), EXPIRY_DATE_FORMAT) {
        Ok(date) => date.and_hms_opt(0, 0, 0),
        Err(e) => {
            debug!(name = %product.name, expiry_date = %product.expiry_date, error = %e, "unreadable expiry date");
            None
        }
    }
}

/// Products whose expiry date lies at or before `now` plus [`EXPIRY_WINDOW_DAYS`].
pub fn expiring_or_expired(products: &[Product], now: NaiveDateTime) -> Vec<&Product> {
    let cutoff = now + TimeDelta::days(EXPIRY_WINDOW_DAYS);
    products
        .iter()
        .filter(|product| parse_expiry_date(product).is_some_and(|expires| expires <= cutoff))
        .collect()
}

/// Products with a quantity at or below [`LOW_QUANTITY_THRESHOLD`].
pub fn low_quantity(products: &[Product]) -> Vec<&Product> {
    products
        .iter()
        .filter(|product| product.quantity <= LOW_QUANTITY_THRESHOLD)
        .collect()
}
