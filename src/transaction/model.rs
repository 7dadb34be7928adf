use std::fmt;

use serde::{Deserialize, Serialize};

/// Transfer of `amount` from `from_address` to `to_address`.
///
/// Transactions are immutable values with no identity beyond their fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    from_address: String,
    to_address: String,
    amount: f64,
}

impl Transaction {
    pub fn new(from: impl Into<String>, to: impl Into<String>, amount: f64) -> Self {
        Self {
            from_address: from.into(),
            to_address: to.into(),
            amount,
        }
    }

    pub fn from_address(&self) -> &str {
        &self.from_address
    }

    pub fn to_address(&self) -> &str {
        &self.to_address
    }

    pub fn amount(&self) -> f64 {
        self.amount
    }

    /// Stable encoding fed into block hashing.
    ///
    /// Addresses are quoted and escaped and the amount keeps full precision,
    /// so two different transactions never share an encoding. Independent of
    /// the `Display` form.
    pub fn canonical_encoding(&self) -> String {
        format!(
            "({:?}->{:?}:{:?})",
            self.from_address, self.to_address, self.amount
        )
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}->{} : {:.2})",
            self.from_address, self.to_address, self.amount
        )
    }
}

#[cfg(test)]
mod tests {
    use super::Transaction;

    #[test]
    fn display_uses_two_decimals() {
        let tx = Transaction::new("aiden", "frank", 50.0);
        assert_eq!(tx.to_string(), "(aiden->frank : 50.00)");
    }

    #[test]
    fn encoding_keeps_full_precision() {
        let a = Transaction::new("a", "b", 1.0);
        let b = Transaction::new("a", "b", 1.001);
        assert_eq!(a.to_string(), b.to_string());
        assert_ne!(a.canonical_encoding(), b.canonical_encoding());
    }

    #[test]
    fn encoding_separates_addresses() {
        let a = Transaction::new("a->b", "c", 1.0);
        let b = Transaction::new("a", "b->c", 1.0);
        assert_ne!(a.canonical_encoding(), b.canonical_encoding());
    }

    #[test]
    fn structural_equality() {
        assert_eq!(
            Transaction::new("x", "y", 2.5),
            Transaction::new("x".to_string(), "y", 2.5)
        );
        assert_ne!(Transaction::new("x", "y", 2.5), Transaction::new("y", "x", 2.5));
    }
}
