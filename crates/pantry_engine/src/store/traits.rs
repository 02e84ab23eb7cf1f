/* 📖 # Why a ProductStore trait for a plain list?

The menu only needs ordered append, index-based edits and wholesale replacement.
Putting those behind a trait keeps the index rules (0-based, bounds-checked)
in one place and lets the session be driven against any backing collection.
*/

use pantry_base::PantryResult;

use crate::product::Product;

/// Result of removing several products at once.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RemoveOutcome {
    /// Removed products with their former 0-based index, in ascending index order.
    pub removed: Vec<(usize, Product)>,
    /// Requested indices that were out of range, in request order.
    pub rejected: Vec<usize>,
}

/// Ordered, insertion-order-preserving product collection.
///
/// All indices are 0-based. Translating from the 1-based numbers shown to the
/// user happens in the menu layer.
pub trait ProductStore {
    /// Append a product at the end.
    fn push(&mut self, product: Product);

    /// Product at `index`.
    fn get(&self, index: usize) -> PantryResult<&Product>;

    /// Remove and return the product at `index`, shifting later products down.
    fn remove(&mut self, index: usize) -> PantryResult<Product>;

    /// Overwrite the quantity of the product at `index`.
    fn set_quantity(&mut self, index: usize, quantity: i64) -> PantryResult<()>;

    /// Replace the whole collection, keeping the order of `products`.
    fn replace_all(&mut self, products: Vec<Product>);

    /// All products in order.
    fn products(&self) -> &[Product];

    fn len(&self) -> usize {
        self.products().len()
    }

    fn is_empty(&self) -> bool {
        self.products().is_empty()
    }

    fn clear(&mut self) {
        self.replace_all(Vec::new());
    }

    /// Remove several products given by their indices *before* any removal.
    ///
    /// Duplicate indices remove the product once. Out-of-range indices are
    /// reported in [`RemoveOutcome::rejected`] and otherwise ignored.
    fn remove_many(&mut self, indices: &[usize]) -> RemoveOutcome {
        let len = self.len();
        let mut accepted = Vec::new();
        let mut outcome = RemoveOutcome::default();
        for &index in indices {
            if index >= len {
                outcome.rejected.push(index);
            } else if !accepted.contains(&index) {
                accepted.push(index);
            }
        }

        // Highest first, so earlier indices stay valid
        accepted.sort_unstable_by(|a, b| b.cmp(a));
        for index in accepted {
            if let Ok(product) = self.remove(index) {
                outcome.removed.push((index, product));
            }
        }
        outcome.removed.reverse();
        outcome
    }
}
