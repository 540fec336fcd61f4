//! Catalog filter state.
//!
//! Holds the browse filters a storefront UI would keep: gender, category,
//! sort order, and a free-text search query. [`FilterState::apply`] decides
//! which listing endpoint to hit and sorts the result locally.

use fashionzone_core::Product;

use crate::ApiClient;
use crate::error::ClientError;

/// Sort order for listings. Applied client-side; the server always returns
/// insertion order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortBy {
    /// Insertion order, untouched.
    #[default]
    Popular,
    PriceLowToHigh,
    PriceHighToLow,
    /// Approximated by reversing insertion order.
    Newest,
}

#[derive(Debug, Clone, Default)]
pub struct FilterState {
    pub gender: Option<String>,
    pub category: Option<String>,
    pub sort_by: SortBy,
    pub search_query: Option<String>,
}

impl FilterState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_gender(&mut self, gender: Option<impl Into<String>>) {
        self.gender = gender.map(Into::into).filter(|g| g != "all");
    }

    pub fn set_category(&mut self, category: Option<impl Into<String>>) {
        self.category = category.map(Into::into).filter(|c| !c.is_empty());
    }

    pub fn set_search_query(&mut self, query: Option<impl Into<String>>) {
        self.search_query = query.map(Into::into).filter(|q| !q.is_empty());
    }

    /// Fetch products matching this filter state.
    ///
    /// A non-empty search query takes precedence over the gender and
    /// category filters.
    ///
    /// # Errors
    ///
    /// Propagates transport and API failures.
    pub async fn apply(&self, client: &ApiClient) -> Result<Vec<Product>, ClientError> {
        let mut products = match &self.search_query {
            Some(query) => client.search_products(query).await?,
            None => {
                client
                    .products(self.category.as_deref(), self.gender.as_deref())
                    .await?
            }
        };
        self.sort(&mut products);
        Ok(products)
    }

    fn sort(&self, products: &mut [Product]) {
        match self.sort_by {
            SortBy::Popular => {}
            SortBy::PriceLowToHigh => products.sort_by_key(|p| p.price),
            SortBy::PriceHighToLow => {
                products.sort_by(|a, b| b.price.cmp(&a.price));
            }
            SortBy::Newest => products.reverse(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use fashionzone_core::{Price, ProductId};

    use super::*;

    fn product(id: i32, cents: i32) -> Product {
        Product {
            id: ProductId::new(id),
            name: format!("Product {id}"),
            price: Price::from_cents(cents).unwrap(),
            description: String::new(),
            image_url: String::new(),
            category: "pants".to_owned(),
            gender: "men".to_owned(),
            available_sizes: vec!["M".to_owned()],
        }
    }

    #[test]
    fn test_sort_orders() {
        let base = vec![product(1, 300), product(2, 100), product(3, 200)];

        let mut filter = FilterState::new();
        let mut items = base.clone();
        filter.sort(&mut items);
        assert_eq!(items[0].id, ProductId::new(1));

        filter.sort_by = SortBy::PriceLowToHigh;
        let mut items = base.clone();
        filter.sort(&mut items);
        assert_eq!(items[0].id, ProductId::new(2));

        filter.sort_by = SortBy::PriceHighToLow;
        let mut items = base.clone();
        filter.sort(&mut items);
        assert_eq!(items[0].id, ProductId::new(1));

        filter.sort_by = SortBy::Newest;
        let mut items = base;
        filter.sort(&mut items);
        assert_eq!(items[0].id, ProductId::new(3));
    }

    #[test]
    fn test_all_gender_clears_the_filter() {
        let mut filter = FilterState::new();
        filter.set_gender(Some("women"));
        assert_eq!(filter.gender.as_deref(), Some("women"));

        filter.set_gender(Some("all"));
        assert!(filter.gender.is_none());
    }

    #[test]
    fn test_empty_search_clears_the_query() {
        let mut filter = FilterState::new();
        filter.set_search_query(Some("coat"));
        assert_eq!(filter.search_query.as_deref(), Some("coat"));

        filter.set_search_query(Some(""));
        assert!(filter.search_query.is_none());
    }
}
