use std::fmt;

/// Expiry value marking a product that never expires.
pub const NO_EXPIRY: &str = "keines";

/// A single pantry record.
///
/// Fields are kept exactly as entered; `expiry_date` is free text and is only
/// interpreted as a date by the expiry filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Product {
    pub name: String,
    pub expiry_date: String,
    pub quantity: i64,
}

impl Product {
    pub fn new(name: impl Into<String>, expiry_date: impl Into<String>, quantity: i64) -> Self {
        Self {
            name: name.into(),
            expiry_date: expiry_date.into(),
            quantity,
        }
    }

    /// False for an empty expiry date and for [`NO_EXPIRY`].
    pub fn has_expiry(&self) -> bool {
        !self.expiry_date.is_empty() && self.expiry_date != NO_EXPIRY
    }
}

/// Console form used in listings: `Name: Milk, Ablaufdatum: 05.03.2025, Menge: 2`.
impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Name: {}, Ablaufdatum: {}, Menge: {}",
            self.name, self.expiry_date, self.quantity
        )
    }
}
