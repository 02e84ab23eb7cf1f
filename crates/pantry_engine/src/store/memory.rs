use tracing::debug;

use pantry_base::{PantryError, PantryResult};

use crate::product::Product;
use crate::store::traits::ProductStore;

/// Vec-backed product store holding the pantry for one run.
///
/// # Example
///
/// ```
/// use pantry_engine::store::{InMemoryStore, ProductStore};
/// use pantry_engine::Product;
///
/// let mut store = InMemoryStore::new();
/// store.push(Product::new("Milk", "05.03.2025", 2));
/// store.set_quantity(0, 3).unwrap();
/// assert_eq!(store.get(0).unwrap().quantity, 3);
/// ```
#[derive(Debug, Default, Clone)]
pub struct InMemoryStore {
    products: Vec<Product>,
}

impl InMemoryStore {
    /// Create a new, empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn check_index(&self, index: usize) -> PantryResult<()> {
        if index < self.products.len() {
            Ok(())
        } else {
            Err(Box::new(PantryError::invalid_index(
                index,
                self.products.len(),
            )))
        }
    }
}

impl From<Vec<Product>> for InMemoryStore {
    fn from(products: Vec<Product>) -> Self {
        Self { products }
    }
}

impl ProductStore for InMemoryStore {
    fn push(&mut self, product: Product) {
        debug!(name = %product.name, "adding product");
        self.products.push(product);
    }

    fn get(&self, index: usize) -> PantryResult<&Product> {
        self.check_index(index)?;
        Ok(&self.products[index])
    }

    fn remove(&mut self, index: usize) -> PantryResult<Product> {
        self.check_index(index)?;
        let product = self.products.remove(index);
        debug!(index, name = %product.name, "removed product");
        Ok(product)
    }

    fn set_quantity(&mut self, index: usize, quantity: i64) -> PantryResult<()> {
        self.check_index(index)?;
        self.products[index].quantity = quantity;
        Ok(())
    }

    fn replace_all(&mut self, products: Vec<Product>) {
        debug!(count = products.len(), "replacing all products");
        self.products = products;
    }

    fn products(&self) -> &[Product] {
        &self.products
    }
}
