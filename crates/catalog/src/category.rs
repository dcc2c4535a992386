use chrono::{DateTime, Utc};

use stackfood_core::{CategoryId, DomainError, DomainResult, Entity};

/// Longest accepted category name, in characters.
pub const CATEGORY_NAME_MAX_LEN: usize = 100;

/// A named grouping of products, listed by `display_order`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    id: CategoryId,
    name: String,
    description: Option<String>,
    display_order: i32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Category {
    /// Create a new category with a fresh id; both timestamps are set to now.
    pub fn new(
        name: impl Into<String>,
        description: Option<String>,
        display_order: i32,
    ) -> DomainResult<Self> {
        let name = name.into();
        validate(&name, display_order)?;

        let now = Utc::now();
        Ok(Self {
            id: CategoryId::new(),
            name,
            description,
            display_order,
            created_at: now,
            updated_at: now,
        })
    }

    /// Rebuild a category from persisted state. Performs no validation.
    pub fn restore(
        id: CategoryId,
        name: String,
        description: Option<String>,
        display_order: i32,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name,
            description,
            display_order,
            created_at,
            updated_at,
        }
    }

    /// Replace all mutable fields. On error the category is left untouched.
    pub fn update(
        &mut self,
        name: impl Into<String>,
        description: Option<String>,
        display_order: i32,
    ) -> DomainResult<()> {
        let name = name.into();
        validate(&name, display_order)?;

        self.name = name;
        self.description = description;
        self.display_order = display_order;
        self.updated_at = Utc::now();
        Ok(())
    }

    pub fn id_typed(&self) -> CategoryId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn display_order(&self) -> i32 {
        self.display_order
    }
}

impl Entity for Category {
    type Id = CategoryId;

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

fn validate(name: &str, display_order: i32) -> DomainResult<()> {
    if name.trim().is_empty() {
        return Err(DomainError::validation("Category name cannot be empty"));
    }

    if name.chars().count() > CATEGORY_NAME_MAX_LEN {
        return Err(DomainError::validation(format!(
            "Category name cannot exceed {CATEGORY_NAME_MAX_LEN} characters"
        )));
    }

    if display_order < 0 {
        return Err(DomainError::validation("Display order cannot be negative"));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_validation(result: DomainResult<Category>, needle: &str) {
        match result {
            Err(DomainError::Validation(msg)) => {
                assert!(msg.contains(needle), "`{msg}` does not mention `{needle}`")
            }
            other => panic!("expected Validation error containing `{needle}`, got {other:?}"),
        }
    }

    #[test]
    fn new_category_keeps_fields_and_stamps_both_timestamps() {
        let category = Category::new("Lanche", Some("Hambúrgueres".to_string()), 1).unwrap();

        assert_eq!(category.name(), "Lanche");
        assert_eq!(category.description(), Some("Hambúrgueres"));
        assert_eq!(category.display_order(), 1);
        assert!(!category.id().is_nil());
        assert_eq!(category.created_at(), category.updated_at());
    }

    #[test]
    fn each_new_category_gets_its_own_id() {
        let a = Category::new("A", None, 0).unwrap();
        let b = Category::new("A", None, 0).unwrap();
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn rejects_blank_name() {
        assert_validation(Category::new("", None, 1), "cannot be empty");
        assert_validation(Category::new("   \t", None, 1), "cannot be empty");
    }

    #[test]
    fn rejects_name_longer_than_100_chars() {
        assert_validation(Category::new("a".repeat(101), None, 1), "cannot exceed 100 characters");
    }

    #[test]
    fn accepts_name_of_exactly_100_multibyte_chars() {
        let name = "é".repeat(CATEGORY_NAME_MAX_LEN);
        assert!(Category::new(name, None, 0).is_ok());
    }

    #[test]
    fn rejects_negative_display_order() {
        assert_validation(Category::new("Bebida", None, -1), "cannot be negative");
    }

    #[test]
    fn update_rewrites_fields_and_bumps_updated_at() {
        let mut category = Category::new("Bebida", None, 3).unwrap();
        let created_at = category.created_at();

        category
            .update("Bebidas", Some("Refrigerantes".to_string()), 5)
            .unwrap();

        assert_eq!(category.name(), "Bebidas");
        assert_eq!(category.description(), Some("Refrigerantes"));
        assert_eq!(category.display_order(), 5);
        assert_eq!(category.created_at(), created_at);
        assert!(category.updated_at() >= created_at);
    }

    #[test]
    fn failed_update_leaves_category_unchanged() {
        let mut category = Category::new("Sobremesa", None, 4).unwrap();
        let before = category.clone();

        let err = category.update("", None, 4).unwrap_err();

        assert_eq!(err, DomainError::validation("Category name cannot be empty"));
        assert_eq!(category, before);
    }

    #[test]
    fn update_rejects_negative_display_order() {
        let mut category = Category::new("Sobremesa", None, 4).unwrap();
        let err = category.update("Sobremesa", None, -7).unwrap_err();
        assert!(err.message().contains("cannot be negative"));
    }

    #[test]
    fn restore_preserves_persisted_state() {
        let id = CategoryId::new();
        let created = Utc::now();
        let category = Category::restore(id, "Lanche".into(), None, 2, created, created);
        assert_eq!(category.id_typed(), id);
        assert_eq!(category.created_at(), created);
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: any non-blank name up to 100 chars with order >= 0 constructs and round-trips.
            #[test]
            fn valid_inputs_round_trip(
                name in "[A-Za-z][A-Za-z0-9 ]{0,99}",
                description in proptest::option::of("[a-z ]{0,40}"),
                order in 0i32..=i32::MAX,
            ) {
                let category = Category::new(name.clone(), description.clone(), order).unwrap();
                prop_assert_eq!(category.name(), name.as_str());
                prop_assert_eq!(category.description(), description.as_deref());
                prop_assert_eq!(category.display_order(), order);
            }

            /// Property: negative orders always fail, whatever the name.
            #[test]
            fn negative_order_always_fails(name in "[A-Za-z]{1,20}", order in i32::MIN..0) {
                prop_assert!(Category::new(name, None, order).is_err());
            }

            /// Property: names over the limit always fail.
            #[test]
            fn long_names_always_fail(len in 101usize..300) {
                prop_assert!(Category::new("x".repeat(len), None, 0).is_err());
            }
        }
    }
}
