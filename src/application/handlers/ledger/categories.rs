//! Category command and query handlers.

use std::sync::Arc;

use tracing::info;

use crate::domain::foundation::{CategoryId, Timestamp};
use crate::domain::ledger::{Category, EntityKind, LedgerError};
use crate::ports::{LedgerReader, LedgerRepository};

/// Command to add a category.
#[derive(Debug, Clone)]
pub struct CreateCategoryCommand {
    pub name: String,
    /// Suggested weight for points logged in this category.
    pub value: i32,
}

pub struct CreateCategoryHandler {
    repository: Arc<dyn LedgerRepository>,
}

impl CreateCategoryHandler {
    pub fn new(repository: Arc<dyn LedgerRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, cmd: CreateCategoryCommand) -> Result<Category, LedgerError> {
        let category = Category::new(CategoryId::new(), &cmd.name, cmd.value, Timestamp::now())?;
        self.repository.save_category(&category).await?;

        info!(category_id = %category.id(), "category created");
        Ok(category)
    }
}

/// Partial update of a category. `None` fields are left alone.
#[derive(Debug, Clone)]
pub struct UpdateCategoryCommand {
    pub category_id: CategoryId,
    pub name: Option<String>,
    pub value: Option<i32>,
}

pub struct UpdateCategoryHandler {
    reader: Arc<dyn LedgerReader>,
    repository: Arc<dyn LedgerRepository>,
}

impl UpdateCategoryHandler {
    pub fn new(reader: Arc<dyn LedgerReader>, repository: Arc<dyn LedgerRepository>) -> Self {
        Self { reader, repository }
    }

    pub async fn handle(&self, cmd: UpdateCategoryCommand) -> Result<Category, LedgerError> {
        let mut category = self
            .reader
            .find_category(&cmd.category_id)
            .await?
            .ok_or_else(|| LedgerError::not_found(EntityKind::Category, cmd.category_id))?;

        category.apply_changes(cmd.name.as_deref(), cmd.value, Timestamp::now())?;
        self.repository.update_category(&category).await?;
        Ok(category)
    }
}

/// Command to remove a category with no points.
#[derive(Debug, Clone, Copy)]
pub struct DeleteCategoryCommand {
    pub category_id: CategoryId,
}

pub struct DeleteCategoryHandler {
    repository: Arc<dyn LedgerRepository>,
}

impl DeleteCategoryHandler {
    pub fn new(repository: Arc<dyn LedgerRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, cmd: DeleteCategoryCommand) -> Result<(), LedgerError> {
        self.repository.delete_category(&cmd.category_id).await?;
        info!(category_id = %cmd.category_id, "category deleted");
        Ok(())
    }
}

/// Query for a single category.
#[derive(Debug, Clone, Copy)]
pub struct GetCategoryQuery {
    pub category_id: CategoryId,
}

pub struct GetCategoryHandler {
    reader: Arc<dyn LedgerReader>,
}

impl GetCategoryHandler {
    pub fn new(reader: Arc<dyn LedgerReader>) -> Self {
        Self { reader }
    }

    pub async fn handle(&self, query: GetCategoryQuery) -> Result<Category, LedgerError> {
        self.reader
            .find_category(&query.category_id)
            .await?
            .ok_or_else(|| LedgerError::not_found(EntityKind::Category, query.category_id))
    }
}

pub struct ListCategoriesHandler {
    reader: Arc<dyn LedgerReader>,
}

impl ListCategoriesHandler {
    pub fn new(reader: Arc<dyn LedgerReader>) -> Self {
        Self { reader }
    }

    pub async fn handle(&self) -> Result<Vec<Category>, LedgerError> {
        Ok(self.reader.list_categories().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryLedger;

    async fn seeded() -> (Arc<InMemoryLedger>, Category) {
        let ledger = Arc::new(InMemoryLedger::new());
        let category = CreateCategoryHandler::new(ledger.clone())
            .handle(CreateCategoryCommand {
                name: "Chores".to_string(),
                value: 3,
            })
            .await
            .unwrap();
        (ledger, category)
    }

    #[tokio::test]
    async fn created_category_is_listed() {
        let (ledger, category) = seeded().await;
        let all = ListCategoriesHandler::new(ledger).handle().await.unwrap();
        assert_eq!(all, vec![category]);
    }

    #[tokio::test]
    async fn update_changes_only_given_fields() {
        let (ledger, category) = seeded().await;

        let updated = UpdateCategoryHandler::new(ledger.clone(), ledger.clone())
            .handle(UpdateCategoryCommand {
                category_id: *category.id(),
                name: None,
                value: Some(-2),
            })
            .await
            .unwrap();

        assert_eq!(updated.name(), "Chores");
        assert_eq!(updated.value(), -2);
        let stored = GetCategoryHandler::new(ledger)
            .handle(GetCategoryQuery {
                category_id: *category.id(),
            })
            .await
            .unwrap();
        assert_eq!(stored, updated);
    }

    #[tokio::test]
    async fn update_rejects_blank_name() {
        let (ledger, category) = seeded().await;
        let err = UpdateCategoryHandler::new(ledger.clone(), ledger)
            .handle(UpdateCategoryCommand {
                category_id: *category.id(),
                name: Some(" ".to_string()),
                value: None,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, LedgerError::ValidationFailed { .. }));
    }

    #[tokio::test]
    async fn update_missing_category_is_not_found() {
        let (ledger, _) = seeded().await;
        let id = CategoryId::new();
        let err = UpdateCategoryHandler::new(ledger.clone(), ledger)
            .handle(UpdateCategoryCommand {
                category_id: id,
                name: Some("Other".to_string()),
                value: None,
            })
            .await
            .unwrap_err();
        assert_eq!(err, LedgerError::not_found(EntityKind::Category, id));
    }

    #[tokio::test]
    async fn delete_removes_unused_category() {
        let (ledger, category) = seeded().await;
        DeleteCategoryHandler::new(ledger.clone())
            .handle(DeleteCategoryCommand {
                category_id: *category.id(),
            })
            .await
            .unwrap();
        assert!(ledger.find_category(category.id()).await.unwrap().is_none());
    }
}
