//! Demo catalog inserted into an empty store.

use rust_decimal::Decimal;
use tracing::{debug, info};

use stackfood_catalog::{Category, Product, ProductDetails};
use stackfood_core::{DomainError, Money};

use crate::repository::{CategoryRepository, ProductRepository, RepositoryError, RepositoryResult};

/// (name, description, display order, products as (name, description, price in cents))
type SeedCategory = (&'static str, &'static str, i32, &'static [(&'static str, &'static str, i64)]);

const CATALOG: &[SeedCategory] = &[
    (
        "Lanche",
        "Hambúrgueres e sanduíches",
        1,
        &[
            ("X-Burger", "Hambúrguer clássico com queijo", 2590),
            ("X-Bacon", "Hambúrguer com bacon crocante", 2890),
            ("X-Tudo", "Hambúrguer completo com todos os ingredientes", 3290),
        ],
    ),
    (
        "Acompanhamento",
        "Batatas fritas, onion rings, etc.",
        2,
        &[
            ("Batata Frita", "Porção de batatas fritas crocantes", 1290),
            ("Onion Rings", "Anéis de cebola empanados", 1490),
        ],
    ),
    (
        "Bebida",
        "Refrigerantes, sucos, água",
        3,
        &[
            ("Coca-Cola 350ml", "Refrigerante lata", 600),
            ("Suco Natural 500ml", "Suco de laranja natural", 900),
        ],
    ),
    (
        "Sobremesa",
        "Sorvetes, tortas, brownies",
        4,
        &[
            ("Sundae", "Sorvete com cobertura de chocolate", 1090),
            ("Brownie", "Brownie de chocolate com nozes", 1290),
        ],
    ),
];

fn invalid_seed(err: DomainError) -> RepositoryError {
    RepositoryError::Storage(format!("invalid seed data: {err}"))
}

/// Insert the demo catalog unless the store already has categories.
///
/// Returns whether anything was inserted.
pub async fn seed_catalog<C, P>(categories: &C, products: &P) -> RepositoryResult<bool>
where
    C: CategoryRepository + ?Sized,
    P: ProductRepository + ?Sized,
{
    if !categories.get_all().await?.is_empty() {
        debug!("catalog already populated; skipping seed");
        return Ok(false);
    }

    let mut inserted = 0usize;
    for (name, description, order, items) in CATALOG {
        let category = Category::new(*name, Some(description.to_string()), *order)
            .map_err(invalid_seed)?;
        let category = categories.create(category).await?;

        for (product_name, product_description, cents) in *items {
            let price = Money::new(Decimal::new(*cents, 2)).map_err(invalid_seed)?;
            let product = Product::new(
                ProductDetails {
                    category_id: category.id_typed(),
                    name: product_name.to_string(),
                    description: Some(product_description.to_string()),
                    price: Some(price),
                    image_url: None,
                },
                true,
            )
            .map_err(invalid_seed)?;
            products.create(product).await?;
            inserted += 1;
        }
    }

    info!(categories = CATALOG.len(), products = inserted, "seeded demo catalog");
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::InMemoryCatalogStore;

    #[tokio::test]
    async fn seeds_an_empty_store_once() {
        let (categories, products) = InMemoryCatalogStore::repositories();

        assert!(seed_catalog(&categories, &products).await.unwrap());
        assert!(!seed_catalog(&categories, &products).await.unwrap());

        let names: Vec<String> = categories
            .get_all()
            .await
            .unwrap()
            .iter()
            .map(|c| c.name().to_string())
            .collect();
        assert_eq!(names, ["Lanche", "Acompanhamento", "Bebida", "Sobremesa"]);
        assert_eq!(products.get_all().await.unwrap().len(), 9);

        let lanches = products.get_by_category_name("Lanche").await.unwrap();
        assert_eq!(lanches.len(), 3);
        assert!(lanches.iter().all(|p| p.category_name() == Some("Lanche")));
    }

    #[tokio::test]
    async fn skips_a_store_that_already_has_categories() {
        let (categories, products) = InMemoryCatalogStore::repositories();
        categories
            .create(Category::new("Combo", None, 1).unwrap())
            .await
            .unwrap();

        assert!(!seed_catalog(&categories, &products).await.unwrap());
        assert!(products.get_all().await.unwrap().is_empty());
    }
}
