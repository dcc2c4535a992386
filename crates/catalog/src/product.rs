use chrono::{DateTime, Utc};

use stackfood_core::{CategoryId, DomainError, DomainResult, Entity, Money, ProductId};

/// Longest accepted product name, in characters.
pub const PRODUCT_NAME_MAX_LEN: usize = 200;

/// The mutable field set of a product, validated as a whole on create and update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductDetails {
    pub category_id: CategoryId,
    pub name: String,
    pub description: Option<String>,
    pub price: Option<Money>,
    pub image_url: Option<String>,
}

/// A sellable catalog item belonging to exactly one category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    id: ProductId,
    category_id: CategoryId,
    name: String,
    description: Option<String>,
    price: Money,
    image_url: Option<String>,
    is_available: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    /// Display name of the owning category, joined in by repositories on read.
    /// Never written back to storage.
    category_name: Option<String>,
}

impl Product {
    /// Create a new product with a fresh id; both timestamps are set to now.
    pub fn new(details: ProductDetails, is_available: bool) -> DomainResult<Self> {
        let price = validate(&details)?;

        let now = Utc::now();
        Ok(Self {
            id: ProductId::new(),
            category_id: details.category_id,
            name: details.name,
            description: details.description,
            price,
            image_url: details.image_url,
            is_available,
            created_at: now,
            updated_at: now,
            category_name: None,
        })
    }

    /// Rebuild a product from persisted state. Performs no validation.
    #[allow(clippy::too_many_arguments)]
    pub fn restore(
        id: ProductId,
        category_id: CategoryId,
        name: String,
        description: Option<String>,
        price: Money,
        image_url: Option<String>,
        is_available: bool,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            category_id,
            name,
            description,
            price,
            image_url,
            is_available,
            created_at,
            updated_at,
            category_name: None,
        }
    }

    /// Attach the joined category display name.
    pub fn with_category_name(mut self, name: Option<String>) -> Self {
        self.category_name = name;
        self
    }

    /// Replace category, name, description, price and image url.
    /// On error the product is left untouched.
    pub fn update(&mut self, details: ProductDetails) -> DomainResult<()> {
        let price = validate(&details)?;

        if self.category_id != details.category_id {
            // The joined name belonged to the previous category.
            self.category_name = None;
        }
        self.category_id = details.category_id;
        self.name = details.name;
        self.description = details.description;
        self.price = price;
        self.image_url = details.image_url;
        self.updated_at = Utc::now();
        Ok(())
    }

    pub fn set_availability(&mut self, is_available: bool) {
        self.is_available = is_available;
        self.updated_at = Utc::now();
    }

    pub fn set_image_url(&mut self, image_url: impl Into<String>) {
        self.image_url = Some(image_url.into());
        self.updated_at = Utc::now();
    }

    pub fn id_typed(&self) -> ProductId {
        self.id
    }

    pub fn category_id(&self) -> CategoryId {
        self.category_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn price(&self) -> Money {
        self.price
    }

    pub fn image_url(&self) -> Option<&str> {
        self.image_url.as_deref()
    }

    pub fn is_available(&self) -> bool {
        self.is_available
    }

    pub fn category_name(&self) -> Option<&str> {
        self.category_name.as_deref()
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

fn validate(details: &ProductDetails) -> DomainResult<Money> {
    if details.name.trim().is_empty() {
        return Err(DomainError::validation("Product name cannot be empty"));
    }

    if details.name.chars().count() > PRODUCT_NAME_MAX_LEN {
        return Err(DomainError::validation(format!(
            "Product name cannot exceed {PRODUCT_NAME_MAX_LEN} characters"
        )));
    }

    if details.category_id.is_nil() {
        return Err(DomainError::validation("Category ID cannot be empty"));
    }

    details
        .price
        .ok_or_else(|| DomainError::validation("Product price is required"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn price(cents: i64) -> Option<Money> {
        Some(Money::new(Decimal::new(cents, 2)).unwrap())
    }

    fn details(name: &str) -> ProductDetails {
        ProductDetails {
            category_id: CategoryId::new(),
            name: name.to_string(),
            description: Some("Hambúrguer clássico com queijo".to_string()),
            price: price(2590),
            image_url: None,
        }
    }

    fn validation_message(result: DomainResult<Product>) -> String {
        match result {
            Err(DomainError::Validation(msg)) => msg,
            other => panic!("expected Validation error, got {other:?}"),
        }
    }

    #[test]
    fn new_product_keeps_fields_and_defaults() {
        let d = details("X-Burger");
        let product = Product::new(d.clone(), true).unwrap();

        assert_eq!(product.category_id(), d.category_id);
        assert_eq!(product.name(), "X-Burger");
        assert_eq!(product.price(), price(2590).unwrap());
        assert_eq!(product.image_url(), None);
        assert!(product.is_available());
        assert_eq!(product.category_name(), None);
        assert_eq!(product.created_at(), product.updated_at());
    }

    #[test]
    fn can_be_created_unavailable() {
        let product = Product::new(details("X-Bacon"), false).unwrap();
        assert!(!product.is_available());
    }

    #[test]
    fn rejects_blank_name() {
        let msg = validation_message(Product::new(details("  "), true));
        assert!(msg.contains("cannot be empty"));
    }

    #[test]
    fn rejects_name_longer_than_200_chars() {
        let msg = validation_message(Product::new(details(&"a".repeat(201)), true));
        assert!(msg.contains("cannot exceed 200 characters"));
    }

    #[test]
    fn accepts_name_of_exactly_200_chars() {
        assert!(Product::new(details(&"a".repeat(200)), true).is_ok());
    }

    #[test]
    fn rejects_nil_category_id() {
        let mut d = details("X-Tudo");
        d.category_id = CategoryId::nil();
        let msg = validation_message(Product::new(d, true));
        assert_eq!(msg, "Category ID cannot be empty");
    }

    #[test]
    fn rejects_missing_price() {
        let mut d = details("X-Tudo");
        d.price = None;
        let msg = validation_message(Product::new(d, true));
        assert_eq!(msg, "Product price is required");
    }

    #[test]
    fn update_rewrites_fields_and_bumps_updated_at() {
        let mut product = Product::new(details("X-Burger"), true).unwrap();
        let created_at = product.created_at();

        let new_category = CategoryId::new();
        product
            .update(ProductDetails {
                category_id: new_category,
                name: "X-Salada".to_string(),
                description: None,
                price: price(2790),
                image_url: Some("https://cdn.example/x-salada.png".to_string()),
            })
            .unwrap();

        assert_eq!(product.category_id(), new_category);
        assert_eq!(product.name(), "X-Salada");
        assert_eq!(product.description(), None);
        assert_eq!(product.price(), price(2790).unwrap());
        assert_eq!(product.image_url(), Some("https://cdn.example/x-salada.png"));
        assert_eq!(product.created_at(), created_at);
        assert!(product.updated_at() >= created_at);
    }

    #[test]
    fn update_to_another_category_drops_stale_joined_name() {
        let mut product = Product::new(details("X-Burger"), true)
            .unwrap()
            .with_category_name(Some("Lanche".to_string()));

        product.update(details("X-Burger")).unwrap();

        assert_eq!(product.category_name(), None);
    }

    #[test]
    fn failed_update_leaves_product_unchanged() {
        let mut product = Product::new(details("X-Burger"), true).unwrap();
        let before = product.clone();

        let mut bad = details("X-Burger");
        bad.price = None;
        assert!(product.update(bad).is_err());
        assert_eq!(product, before);
    }

    #[test]
    fn set_availability_touches_only_flag_and_timestamp() {
        let mut product = Product::new(details("Sundae"), true).unwrap();
        let before = product.clone();

        product.set_availability(false);

        assert!(!product.is_available());
        assert_eq!(product.name(), before.name());
        assert_eq!(product.price(), before.price());
        assert!(product.updated_at() >= before.updated_at());
    }

    #[test]
    fn set_image_url_touches_only_url_and_timestamp() {
        let mut product = Product::new(details("Brownie"), true).unwrap();
        product.set_image_url("https://cdn.example/brownie.png");
        assert_eq!(product.image_url(), Some("https://cdn.example/brownie.png"));
        assert!(product.is_available());
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: valid details always construct and round-trip the name and price.
            #[test]
            fn valid_details_construct(
                name in "[A-Za-z][A-Za-z0-9 -]{0,199}",
                cents in 0i64..1_000_000,
                available in any::<bool>(),
            ) {
                let mut d = details("placeholder");
                d.name = name.clone();
                d.price = price(cents);
                let product = Product::new(d, available).unwrap();
                prop_assert_eq!(product.name(), name.as_str());
                prop_assert_eq!(product.price().amount(), Decimal::new(cents, 2));
                prop_assert_eq!(product.is_available(), available);
            }

            /// Property: whitespace-only names never construct.
            #[test]
            fn whitespace_names_fail(name in "[ \t]{0,30}") {
                let mut d = details("placeholder");
                d.name = name;
                prop_assert!(Product::new(d, true).is_err());
            }
        }
    }
}
