//! SubmitPointsHandler - Command handler for logging a batch of points.
//!
//! One point is written per submitted entry, including zero-valued ones.
//! How a failing entry affects the rest of the batch depends on the
//! configured [`BatchPolicy`].

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::domain::foundation::{CategoryId, DomainError, ErrorCode, PointId, Timestamp, UserId};
use crate::domain::ledger::{parse_point_value, EntityKind, EntryFailure, LedgerError, Point};
use crate::ports::{LedgerReader, LedgerRepository};

/// What happens to the rest of a batch when one entry fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BatchPolicy {
    /// Every entry is attempted; valid entries stay saved.
    #[default]
    Partial,
    /// All entries are validated first and written in one transaction.
    Atomic,
}

/// One submitted `category -> value` pair, unparsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PointEntry {
    pub category: String,
    pub value: String,
}

impl PointEntry {
    pub fn new(category: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            value: value.into(),
        }
    }
}

/// Command to log points for one user across several categories.
#[derive(Debug, Clone)]
pub struct SubmitPointsCommand {
    pub user_id: UserId,
    /// Processed in the order given.
    pub entries: Vec<PointEntry>,
    pub submitted_at: Timestamp,
}

/// Result of a fully successful submission.
#[derive(Debug, Clone)]
pub struct SubmitPointsResult {
    pub points: Vec<Point>,
}

/// Handler for batch point submission.
pub struct SubmitPointsHandler {
    reader: Arc<dyn LedgerReader>,
    repository: Arc<dyn LedgerRepository>,
    policy: BatchPolicy,
}

impl SubmitPointsHandler {
    pub fn new(
        reader: Arc<dyn LedgerReader>,
        repository: Arc<dyn LedgerRepository>,
        policy: BatchPolicy,
    ) -> Self {
        Self {
            reader,
            repository,
            policy,
        }
    }

    /// Logs the batch.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if the batch is empty
    /// - `NotFound` if the user does not exist (nothing is written)
    /// - `PartialBatchFailure` under `Partial` when some entries were saved
    ///   and others failed
    /// - `ValidationFailed`/`NotFound` for the first bad entry when nothing
    ///   was saved, under either policy
    pub async fn handle(&self, cmd: SubmitPointsCommand) -> Result<SubmitPointsResult, LedgerError> {
        if cmd.entries.is_empty() {
            return Err(LedgerError::validation(
                "points",
                "At least one category must be submitted",
            ));
        }

        if self.reader.find_user(&cmd.user_id).await?.is_none() {
            return Err(LedgerError::not_found(EntityKind::User, cmd.user_id));
        }

        let result = match self.policy {
            BatchPolicy::Partial => self.submit_partial(&cmd).await,
            BatchPolicy::Atomic => self.submit_atomic(&cmd).await,
        };

        match &result {
            Ok(ok) => info!(
                user_id = %cmd.user_id,
                saved = ok.points.len(),
                policy = ?self.policy,
                "points logged"
            ),
            Err(LedgerError::PartialBatchFailure { saved, failures }) => warn!(
                user_id = %cmd.user_id,
                saved,
                failed = failures.len(),
                "point batch partially saved"
            ),
            Err(err) => warn!(user_id = %cmd.user_id, error = %err, "point batch rejected"),
        }
        result
    }

    async fn submit_partial(
        &self,
        cmd: &SubmitPointsCommand,
    ) -> Result<SubmitPointsResult, LedgerError> {
        let mut points = Vec::with_capacity(cmd.entries.len());
        let mut failures = Vec::new();
        let mut first_error = None;

        for entry in &cmd.entries {
            let outcome = match self.prepare(cmd, entry).await {
                Ok(point) => self
                    .repository
                    .save_point(&point)
                    .await
                    .map(|()| point)
                    .map_err(|err| save_error(cmd, entry, err)),
                Err(err) => Err(err),
            };

            match outcome {
                Ok(point) => points.push(point),
                Err(err @ LedgerError::Infrastructure(_)) => return Err(err),
                // Later entries would fail the same way.
                Err(
                    err @ LedgerError::NotFound {
                        entity: EntityKind::User,
                        ..
                    },
                ) => return Err(err),
                Err(err) => {
                    failures.push(EntryFailure {
                        category: entry.category.clone(),
                        message: err.message(),
                    });
                    first_error.get_or_insert(err);
                }
            }
        }

        match first_error {
            None => Ok(SubmitPointsResult { points }),
            Some(err) if points.is_empty() => Err(err),
            Some(_) => Err(LedgerError::PartialBatchFailure {
                saved: points.len(),
                failures,
            }),
        }
    }

    async fn submit_atomic(
        &self,
        cmd: &SubmitPointsCommand,
    ) -> Result<SubmitPointsResult, LedgerError> {
        let mut points = Vec::with_capacity(cmd.entries.len());
        for entry in &cmd.entries {
            points.push(self.prepare(cmd, entry).await?);
        }
        self.repository.save_points_atomically(&points).await?;
        Ok(SubmitPointsResult { points })
    }

    /// Parses one entry into a point, checking the category exists.
    async fn prepare(
        &self,
        cmd: &SubmitPointsCommand,
        entry: &PointEntry,
    ) -> Result<Point, LedgerError> {
        let category_id: CategoryId = entry.category.parse().map_err(|_| {
            LedgerError::validation(
                "category_id",
                format!("'{}' is not a valid category id", entry.category),
            )
        })?;

        if self.reader.find_category(&category_id).await?.is_none() {
            return Err(LedgerError::not_found(EntityKind::Category, category_id));
        }

        let value = parse_point_value("value", &entry.value)?;

        Ok(Point::new(
            PointId::new(),
            cmd.user_id,
            category_id,
            value,
            cmd.submitted_at,
        ))
    }
}

/// Names the missing row when a write loses a race with a delete.
fn save_error(cmd: &SubmitPointsCommand, entry: &PointEntry, err: DomainError) -> LedgerError {
    if err.code != ErrorCode::ReferenceNotFound {
        return LedgerError::from(err);
    }
    let missing = match err.detail("field") {
        Some("category_id") => Some(EntityKind::Category),
        Some("user_id") => Some(EntityKind::User),
        _ => None,
    };
    match missing {
        Some(EntityKind::Category) => LedgerError::not_found(EntityKind::Category, &entry.category),
        Some(EntityKind::User) => LedgerError::not_found(EntityKind::User, cmd.user_id),
        None => LedgerError::from(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryLedger;
    use crate::domain::ledger::{Category, Reward, User};
    use crate::ports::PointFilter;
    use async_trait::async_trait;

    // ─────────────────────────────────────────────────────────────────────
    // Mock Implementation
    // ─────────────────────────────────────────────────────────────────────

    /// Delegates to an in-memory ledger but can fail point writes.
    struct FlakyRepository {
        inner: Arc<InMemoryLedger>,
        fail_points: bool,
    }

    impl FlakyRepository {
        fn failing(inner: Arc<InMemoryLedger>) -> Self {
            Self {
                inner,
                fail_points: true,
            }
        }

        fn check(&self) -> Result<(), DomainError> {
            if self.fail_points {
                Err(DomainError::database("connection reset"))
            } else {
                Ok(())
            }
        }
    }

    #[async_trait]
    impl LedgerRepository for FlakyRepository {
        async fn save_user(&self, user: &User) -> Result<(), DomainError> {
            self.inner.save_user(user).await
        }
        async fn update_user(&self, user: &User) -> Result<(), DomainError> {
            self.inner.update_user(user).await
        }
        async fn delete_user(&self, id: &UserId) -> Result<(), DomainError> {
            self.inner.delete_user(id).await
        }
        async fn save_category(&self, category: &Category) -> Result<(), DomainError> {
            self.inner.save_category(category).await
        }
        async fn update_category(&self, category: &Category) -> Result<(), DomainError> {
            self.inner.update_category(category).await
        }
        async fn delete_category(&self, id: &CategoryId) -> Result<(), DomainError> {
            self.inner.delete_category(id).await
        }
        async fn save_point(&self, point: &Point) -> Result<(), DomainError> {
            self.check()?;
            self.inner.save_point(point).await
        }
        async fn save_points_atomically(&self, points: &[Point]) -> Result<(), DomainError> {
            self.check()?;
            self.inner.save_points_atomically(points).await
        }
        async fn save_reward(&self, reward: &Reward) -> Result<(), DomainError> {
            self.inner.save_reward(reward).await
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Helpers
    // ─────────────────────────────────────────────────────────────────────

    struct Fixture {
        ledger: Arc<InMemoryLedger>,
        user: User,
        cat_a: Category,
    }

    async fn fixture() -> Fixture {
        let ledger = Arc::new(InMemoryLedger::new());
        let user = User::new(UserId::new(), "U", Timestamp::now()).unwrap();
        let cat_a = Category::new(CategoryId::new(), "A", 5, Timestamp::now()).unwrap();
        ledger.save_user(&user).await.unwrap();
        ledger.save_category(&cat_a).await.unwrap();
        Fixture {
            ledger,
            user,
            cat_a,
        }
    }

    fn handler(ledger: &Arc<InMemoryLedger>, policy: BatchPolicy) -> SubmitPointsHandler {
        SubmitPointsHandler::new(ledger.clone(), ledger.clone(), policy)
    }

    fn command(user: &User, entries: Vec<PointEntry>) -> SubmitPointsCommand {
        SubmitPointsCommand {
            user_id: *user.id(),
            entries,
            submitted_at: Timestamp::now(),
        }
    }

    async fn sum_for(ledger: &InMemoryLedger, user: &User) -> i64 {
        ledger
            .sum_points(&PointFilter::for_user(*user.id()))
            .await
            .unwrap()
    }

    // ─────────────────────────────────────────────────────────────────────
    // Tests
    // ─────────────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn saves_one_point_per_entry_including_zero() {
        let f = fixture().await;
        let cat_b = Category::new(CategoryId::new(), "B", 1, Timestamp::now()).unwrap();
        f.ledger.save_category(&cat_b).await.unwrap();

        let result = handler(&f.ledger, BatchPolicy::Partial)
            .handle(command(
                &f.user,
                vec![
                    PointEntry::new(f.cat_a.id().to_string(), "5"),
                    PointEntry::new(cat_b.id().to_string(), "0"),
                ],
            ))
            .await
            .unwrap();

        assert_eq!(result.points.len(), 2);
        assert_eq!(f.ledger.point_count(), 2);
        assert_eq!(sum_for(&f.ledger, &f.user).await, 5);
    }

    #[tokio::test]
    async fn partial_policy_keeps_valid_entries_when_category_is_missing() {
        let f = fixture().await;
        let missing = CategoryId::new();

        let err = handler(&f.ledger, BatchPolicy::Partial)
            .handle(command(
                &f.user,
                vec![
                    PointEntry::new(f.cat_a.id().to_string(), "5"),
                    PointEntry::new(missing.to_string(), "-2"),
                ],
            ))
            .await
            .unwrap_err();

        match err {
            LedgerError::PartialBatchFailure { saved, failures } => {
                assert_eq!(saved, 1);
                assert_eq!(failures.len(), 1);
                assert_eq!(failures[0].category, missing.to_string());
            }
            other => panic!("expected partial failure, got {:?}", other),
        }
        assert_eq!(f.ledger.point_count(), 1);
        assert_eq!(sum_for(&f.ledger, &f.user).await, 5);
    }

    #[tokio::test]
    async fn partial_policy_continues_after_failing_entry() {
        let f = fixture().await;

        let err = handler(&f.ledger, BatchPolicy::Partial)
            .handle(command(
                &f.user,
                vec![
                    PointEntry::new("not-a-uuid", "1"),
                    PointEntry::new(f.cat_a.id().to_string(), "abc"),
                    PointEntry::new(f.cat_a.id().to_string(), " 3 "),
                ],
            ))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            LedgerError::PartialBatchFailure { saved: 1, ref failures } if failures.len() == 2
        ));
        assert_eq!(sum_for(&f.ledger, &f.user).await, 3);
    }

    #[tokio::test]
    async fn atomic_policy_writes_nothing_on_failure() {
        let f = fixture().await;
        let missing = CategoryId::new();

        let err = handler(&f.ledger, BatchPolicy::Atomic)
            .handle(command(
                &f.user,
                vec![
                    PointEntry::new(f.cat_a.id().to_string(), "5"),
                    PointEntry::new(missing.to_string(), "-2"),
                ],
            ))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            LedgerError::NotFound {
                entity: EntityKind::Category,
                ..
            }
        ));
        assert_eq!(f.ledger.point_count(), 0);
    }

    #[tokio::test]
    async fn atomic_policy_rejects_non_numeric_value() {
        let f = fixture().await;

        let err = handler(&f.ledger, BatchPolicy::Atomic)
            .handle(command(
                &f.user,
                vec![PointEntry::new(f.cat_a.id().to_string(), "five")],
            ))
            .await
            .unwrap_err();

        assert!(matches!(err, LedgerError::ValidationFailed { ref field, .. } if field == "value"));
        assert_eq!(f.ledger.point_count(), 0);
    }

    #[tokio::test]
    async fn atomic_policy_saves_all_entries() {
        let f = fixture().await;

        let result = handler(&f.ledger, BatchPolicy::Atomic)
            .handle(command(
                &f.user,
                vec![
                    PointEntry::new(f.cat_a.id().to_string(), "5"),
                    PointEntry::new(f.cat_a.id().to_string(), "-1"),
                ],
            ))
            .await
            .unwrap();

        assert_eq!(result.points.len(), 2);
        assert_eq!(sum_for(&f.ledger, &f.user).await, 4);
    }

    #[tokio::test]
    async fn unknown_user_fails_before_any_write() {
        let f = fixture().await;
        let stranger = User::new(UserId::new(), "Stranger", Timestamp::now()).unwrap();

        let err = handler(&f.ledger, BatchPolicy::Partial)
            .handle(command(
                &stranger,
                vec![PointEntry::new(f.cat_a.id().to_string(), "5")],
            ))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            LedgerError::NotFound {
                entity: EntityKind::User,
                ..
            }
        ));
        assert_eq!(f.ledger.point_count(), 0);
    }

    #[tokio::test]
    async fn empty_batch_is_rejected() {
        let f = fixture().await;
        let err = handler(&f.ledger, BatchPolicy::Partial)
            .handle(command(&f.user, vec![]))
            .await
            .unwrap_err();
        assert!(matches!(err, LedgerError::ValidationFailed { ref field, .. } if field == "points"));
    }

    #[tokio::test]
    async fn store_outage_aborts_partial_batch() {
        let f = fixture().await;
        let repository = Arc::new(FlakyRepository::failing(f.ledger.clone()));
        let handler = SubmitPointsHandler::new(f.ledger.clone(), repository, BatchPolicy::Partial);

        let err = handler
            .handle(command(
                &f.user,
                vec![PointEntry::new(f.cat_a.id().to_string(), "5")],
            ))
            .await
            .unwrap_err();

        assert!(matches!(err, LedgerError::Infrastructure(_)));
        assert_eq!(f.ledger.point_count(), 0);
    }

    #[tokio::test]
    async fn partial_policy_reports_first_error_when_nothing_saved() {
        let f = fixture().await;

        let err = handler(&f.ledger, BatchPolicy::Partial)
            .handle(command(
                &f.user,
                vec![
                    PointEntry::new("not-a-uuid", "1"),
                    PointEntry::new(f.cat_a.id().to_string(), "abc"),
                ],
            ))
            .await
            .unwrap_err();

        assert!(matches!(err, LedgerError::ValidationFailed { ref field, .. } if field == "category_id"));
        assert_eq!(f.ledger.point_count(), 0);
    }

    #[tokio::test]
    async fn user_deleted_mid_batch_is_reported_as_missing_user() {
        let f = fixture().await;
        // The write side never saw the user, as if it was deleted after the lookup.
        let store = Arc::new(InMemoryLedger::new());
        store.save_category(&f.cat_a).await.unwrap();
        let handler = SubmitPointsHandler::new(f.ledger.clone(), store.clone(), BatchPolicy::Partial);

        let err = handler
            .handle(command(
                &f.user,
                vec![
                    PointEntry::new(f.cat_a.id().to_string(), "5"),
                    PointEntry::new(f.cat_a.id().to_string(), "2"),
                ],
            ))
            .await
            .unwrap_err();

        assert_eq!(err, LedgerError::not_found(EntityKind::User, f.user.id()));
        assert_eq!(store.point_count(), 0);
    }

    #[tokio::test]
    async fn category_deleted_mid_batch_is_reported_as_missing_category() {
        let f = fixture().await;
        let store = Arc::new(InMemoryLedger::new());
        store.save_user(&f.user).await.unwrap();
        let handler = SubmitPointsHandler::new(f.ledger.clone(), store.clone(), BatchPolicy::Partial);

        let err = handler
            .handle(command(
                &f.user,
                vec![PointEntry::new(f.cat_a.id().to_string(), "5")],
            ))
            .await
            .unwrap_err();

        assert_eq!(
            err,
            LedgerError::not_found(EntityKind::Category, f.cat_a.id())
        );
        assert_eq!(store.point_count(), 0);
    }

    #[tokio::test]
    async fn whole_decimal_value_is_saved() {
        let f = fixture().await;

        let result = handler(&f.ledger, BatchPolicy::Partial)
            .handle(command(
                &f.user,
                vec![PointEntry::new(f.cat_a.id().to_string(), "5.0")],
            ))
            .await
            .unwrap();

        assert_eq!(result.points[0].value(), 5);
        assert_eq!(sum_for(&f.ledger, &f.user).await, 5);
    }

    #[test]
    fn batch_policy_defaults_to_partial_and_parses_lowercase() {
        assert_eq!(BatchPolicy::default(), BatchPolicy::Partial);
        let policy: BatchPolicy = serde_json::from_str("\"atomic\"").unwrap();
        assert_eq!(policy, BatchPolicy::Atomic);
    }
}
