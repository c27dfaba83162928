use stockroom_domain::location::Location;
use stockroom_domain::stock::{QuantityPatch, StockLevels};
use stockroom_domain::validation::{ValidationError, require_non_empty};

use crate::domain::repository::ProductRepository;
use crate::domain::types::{NewProduct, Product, ProductChanges};
use crate::error::InventoryServiceError;

// ── ListProducts ─────────────────────────────────────────────────────────────

pub struct ListProductsUseCase<R: ProductRepository> {
    pub repo: R,
}

impl<R: ProductRepository> ListProductsUseCase<R> {
    /// Full listing, or the single product with exactly `code`. A blank code counts as no
    /// filter. Only the code lookup can fail with `ProductNotFound`.
    pub async fn execute(&self, code: Option<&str>) -> Result<Vec<Product>, InventoryServiceError> {
        match code.map(str::trim).filter(|c| !c.is_empty()) {
            Some(code) => {
                let product = self
                    .repo
                    .find_by_code(code)
                    .await?
                    .ok_or(InventoryServiceError::ProductNotFound)?;
                Ok(vec![product])
            }
            None => self.repo.list().await,
        }
    }
}

// ── GetProduct ───────────────────────────────────────────────────────────────

pub struct GetProductUseCase<R: ProductRepository> {
    pub repo: R,
}

impl<R: ProductRepository> GetProductUseCase<R> {
    pub async fn execute(&self, id: i32) -> Result<Product, InventoryServiceError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or(InventoryServiceError::ProductNotFound)
    }
}

// ── CreateProduct ────────────────────────────────────────────────────────────

pub struct CreateProductInput {
    pub code: String,
    pub name: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub location: String,
    pub quantity_total: i32,
    pub quantity_new: i32,
    pub quantity_used: i32,
    pub quantity_damaged: i32,
}

pub struct CreateProductUseCase<R: ProductRepository> {
    pub repo: R,
}

impl<R: ProductRepository> CreateProductUseCase<R> {
    pub async fn execute(&self, input: CreateProductInput) -> Result<Product, InventoryServiceError> {
        let code = input.code.trim().to_owned();
        require_non_empty("code", &code)?;
        require_non_empty("name", &input.name)?;
        let location: Location = input.location.parse()?;
        let stock = StockLevels::new(
            input.quantity_total,
            input.quantity_new,
            input.quantity_used,
            input.quantity_damaged,
        )?;

        if self.repo.find_by_code(&code).await?.is_some() {
            return Err(ValidationError::DuplicateCode(code).into());
        }

        let product = self
            .repo
            .create(&NewProduct {
                code,
                name: input.name,
                description: input.description,
                category: input.category,
                brand: input.brand,
                model: input.model,
                location,
                stock,
            })
            .await?;
        tracing::info!(
            product_id = product.id,
            code = %product.code,
            total = product.stock.total(),
            "product created"
        );
        Ok(product)
    }
}

// ── UpdateProduct ────────────────────────────────────────────────────────────

#[derive(Default)]
pub struct UpdateProductInput {
    pub code: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub location: Option<String>,
    pub quantities: QuantityPatch,
}

/// Partial update. Supplied quantity fields are merged over the current counters and
/// the result must still balance.
pub struct UpdateProductUseCase<R: ProductRepository> {
    pub repo: R,
}

impl<R: ProductRepository> UpdateProductUseCase<R> {
    pub async fn execute(
        &self,
        id: i32,
        input: UpdateProductInput,
    ) -> Result<Product, InventoryServiceError> {
        let current = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or(InventoryServiceError::ProductNotFound)?;

        let location = input
            .location
            .as_deref()
            .map(str::parse::<Location>)
            .transpose()?;

        let code = match input.code.map(|c| c.trim().to_owned()) {
            Some(code) if code != current.code => {
                require_non_empty("code", &code)?;
                if self.repo.find_by_code(&code).await?.is_some() {
                    return Err(ValidationError::DuplicateCode(code).into());
                }
                Some(code)
            }
            _ => None,
        };
        if let Some(name) = &input.name {
            require_non_empty("name", name)?;
        }
        // Early rejection only; the store re-merges against the locked row.
        input.quantities.merge(&current.stock)?;

        let changes = ProductChanges {
            code,
            name: input.name,
            description: input.description,
            category: input.category,
            brand: input.brand,
            model: input.model,
            location,
            quantities: input.quantities,
        };
        let product = self
            .repo
            .update(id, &changes)
            .await?
            .ok_or(InventoryServiceError::ProductNotFound)?;
        tracing::info!(product_id = id, code = %product.code, "product updated");
        Ok(product)
    }
}

// ── DeleteProduct ────────────────────────────────────────────────────────────

/// Deletion is refused while movements reference the product.
pub struct DeleteProductUseCase<R: ProductRepository> {
    pub repo: R,
}

impl<R: ProductRepository> DeleteProductUseCase<R> {
    pub async fn execute(&self, id: i32) -> Result<(), InventoryServiceError> {
        if self.repo.has_movements(id).await? {
            return Err(InventoryServiceError::ProductInUse);
        }
        if !self.repo.delete(id).await? {
            return Err(InventoryServiceError::ProductNotFound);
        }
        tracing::info!(product_id = id, "product deleted");
        Ok(())
    }
}

// ── ListCategories ───────────────────────────────────────────────────────────

pub struct ListCategoriesUseCase<R: ProductRepository> {
    pub repo: R,
}

impl<R: ProductRepository> ListCategoriesUseCase<R> {
    pub async fn execute(&self) -> Result<Vec<String>, InventoryServiceError> {
        self.repo.categories().await
    }
}
