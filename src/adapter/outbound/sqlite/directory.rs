//! SQLite subscriber directory implementation.
//!
//! Provides persistent storage for subscribers and their alert rules using
//! SQLite and Diesel ORM. Queries run on the blocking thread pool so a slow
//! disk never stalls the poll loop or the command listener.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use tracing::warn;

use super::database::model::{AlertRuleRow, NewAlertRuleRow, SubscriberRow};
use super::database::schema::{alert_rules, subscribers};
use super::database::DbPool;
use crate::domain::{AlertRule, Commodity, DeliveryAddress, Direction, Subscriber, SubscriberId};
use crate::error::DirectoryError;
use crate::port::SubscriberDirectory;

/// SQLite-backed subscriber directory.
#[derive(Clone)]
pub struct SqliteDirectory {
    /// Database connection pool.
    pool: DbPool,
}

impl SqliteDirectory {
    /// Create a new SQLite directory with the given connection pool.
    #[must_use]
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Append `rule` to subscriber `id`, registering an address-less record
    /// first if the subscriber is unknown.
    ///
    /// # Errors
    /// Returns an error if the database cannot be reached or the insert fails.
    pub async fn add_rule(
        &self,
        id: &SubscriberId,
        rule: &AlertRule,
    ) -> Result<(), DirectoryError> {
        let now = Utc::now().to_rfc3339();
        let subscriber = SubscriberRow {
            id: id.to_string(),
            delivery_address: None,
            registered_at: now.clone(),
            updated_at: now,
        };
        let row = NewAlertRuleRow {
            subscriber_id: id.to_string(),
            commodity: rule.commodity.as_str().to_string(),
            direction: rule.direction.as_str().to_string(),
            threshold: rule.threshold,
        };

        self.with_conn(move |conn| {
            conn.transaction::<_, diesel::result::Error, _>(|conn| {
                diesel::insert_or_ignore_into(subscribers::table)
                    .values(&subscriber)
                    .execute(conn)?;
                diesel::insert_into(alert_rules::table)
                    .values(&row)
                    .execute(conn)?;
                Ok(())
            })
        })
        .await
    }

    /// Delete subscriber `id` and every rule it holds. Returns true if the
    /// subscriber existed.
    ///
    /// # Errors
    /// Returns an error if the database cannot be reached or the delete fails.
    pub async fn remove_subscriber(&self, id: &SubscriberId) -> Result<bool, DirectoryError> {
        let id = id.to_string();
        self.with_conn(move |conn| {
            let deleted = diesel::delete(subscribers::table.find(id)).execute(conn)?;
            Ok(deleted > 0)
        })
        .await
    }

    /// Run `op` on a pooled connection on the blocking thread pool.
    async fn with_conn<T, F>(&self, op: F) -> Result<T, DirectoryError>
    where
        T: Send + 'static,
        F: FnOnce(&mut SqliteConnection) -> QueryResult<T> + Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut conn = pool
                .get()
                .map_err(|e| DirectoryError::Connection(e.to_string()))?;
            op(&mut conn).map_err(|e| DirectoryError::Query(e.to_string()))
        })
        .await
        .map_err(|e| DirectoryError::Query(e.to_string()))?
    }

    fn rule_from_row(row: &AlertRuleRow) -> Result<AlertRule, DirectoryError> {
        let corrupt = |reason: String| DirectoryError::Corrupt {
            subscriber: row.subscriber_id.clone(),
            reason,
        };
        let commodity = row
            .commodity
            .parse::<Commodity>()
            .map_err(|e| corrupt(e.to_string()))?;
        let direction = row
            .direction
            .parse::<Direction>()
            .map_err(|e| corrupt(e.to_string()))?;
        Ok(AlertRule::new(commodity, direction, row.threshold))
    }

    fn assemble(
        subscriber_rows: Vec<SubscriberRow>,
        rule_rows: &[AlertRuleRow],
    ) -> Vec<Subscriber> {
        let mut rules: HashMap<&str, Vec<AlertRule>> = HashMap::new();
        for row in rule_rows {
            match Self::rule_from_row(row) {
                Ok(rule) => rules.entry(row.subscriber_id.as_str()).or_default().push(rule),
                Err(e) => warn!(rule_id = row.id, error = %e, "Skipping unreadable alert rule"),
            }
        }

        subscriber_rows
            .into_iter()
            .map(|row| {
                let rules = rules.remove(row.id.as_str()).unwrap_or_default();
                Subscriber {
                    address: row.delivery_address.map(DeliveryAddress::from),
                    id: SubscriberId::from(row.id),
                    rules,
                }
            })
            .collect()
    }
}

#[async_trait]
impl SubscriberDirectory for SqliteDirectory {
    async fn list_subscribers(&self) -> Result<Vec<Subscriber>, DirectoryError> {
        let (subscriber_rows, rule_rows) = self
            .with_conn(|conn| {
                let subscriber_rows = subscribers::table
                    .order((subscribers::registered_at.asc(), subscribers::id.asc()))
                    .select(SubscriberRow::as_select())
                    .load(conn)?;
                let rule_rows = alert_rules::table
                    .order(alert_rules::id.asc())
                    .select(AlertRuleRow::as_select())
                    .load(conn)?;
                Ok((subscriber_rows, rule_rows))
            })
            .await?;

        Ok(Self::assemble(subscriber_rows, &rule_rows))
    }

    async fn upsert_subscriber(
        &self,
        id: &SubscriberId,
        address: &DeliveryAddress,
    ) -> Result<(), DirectoryError> {
        let now = Utc::now().to_rfc3339();
        let row = SubscriberRow {
            id: id.to_string(),
            delivery_address: Some(address.to_string()),
            registered_at: now.clone(),
            updated_at: now.clone(),
        };

        self.with_conn(move |conn| {
            diesel::insert_into(subscribers::table)
                .values(&row)
                .on_conflict(subscribers::id)
                .do_update()
                .set((
                    subscribers::delivery_address.eq(row.delivery_address.clone()),
                    subscribers::updated_at.eq(now),
                ))
                .execute(conn)?;
            Ok(())
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::outbound::sqlite::database::open;
    use tempfile::TempDir;

    fn directory() -> (TempDir, SqliteDirectory) {
        let dir = TempDir::new().unwrap();
        let url = dir.path().join("directory.db").display().to_string();
        let pool = open(&url).unwrap();
        (dir, SqliteDirectory::new(pool))
    }

    #[tokio::test]
    async fn empty_directory_lists_nothing() {
        let (_dir, directory) = directory();
        assert!(directory.list_subscribers().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn upsert_then_list() {
        let (_dir, directory) = directory();
        let alice = SubscriberId::new("alice");
        directory
            .upsert_subscriber(&alice, &DeliveryAddress::new("1001"))
            .await
            .unwrap();

        let subscribers = directory.list_subscribers().await.unwrap();
        assert_eq!(subscribers.len(), 1);
        assert_eq!(subscribers[0].id, alice);
        assert_eq!(subscribers[0].address, Some(DeliveryAddress::new("1001")));
        assert!(subscribers[0].rules.is_empty());
    }

    #[tokio::test]
    async fn upsert_refreshes_address_and_keeps_rules() {
        let (_dir, directory) = directory();
        let alice = SubscriberId::new("alice");
        directory
            .upsert_subscriber(&alice, &DeliveryAddress::new("1001"))
            .await
            .unwrap();
        directory
            .add_rule(&alice, &AlertRule::above(Commodity::Ron95, 2.0))
            .await
            .unwrap();
        directory
            .upsert_subscriber(&alice, &DeliveryAddress::new("2002"))
            .await
            .unwrap();

        let subscribers = directory.list_subscribers().await.unwrap();
        assert_eq!(subscribers.len(), 1);
        assert_eq!(subscribers[0].address, Some(DeliveryAddress::new("2002")));
        assert_eq!(subscribers[0].rules, vec![AlertRule::above(Commodity::Ron95, 2.0)]);
    }

    #[tokio::test]
    async fn rules_keep_insertion_order() {
        let (_dir, directory) = directory();
        let bob = SubscriberId::new("bob");
        let rules = [
            AlertRule::below(Commodity::Diesel, 2.15),
            AlertRule::above(Commodity::Ron97, 3.5),
            AlertRule::above(Commodity::Ron95, 2.0),
        ];
        for rule in &rules {
            directory.add_rule(&bob, rule).await.unwrap();
        }

        let subscribers = directory.list_subscribers().await.unwrap();
        assert_eq!(subscribers[0].rules, rules.to_vec());
        assert_eq!(subscribers[0].address, None);
    }

    #[tokio::test]
    async fn unreadable_rule_is_skipped() {
        let (_dir, directory) = directory();
        let carol = SubscriberId::new("carol");
        directory
            .add_rule(&carol, &AlertRule::above(Commodity::Ron95, 2.0))
            .await
            .unwrap();
        directory
            .with_conn(|conn| {
                diesel::insert_into(alert_rules::table)
                    .values(&NewAlertRuleRow {
                        subscriber_id: "carol".into(),
                        commodity: "kerosene".into(),
                        direction: "above".into(),
                        threshold: 1.0,
                    })
                    .execute(conn)
            })
            .await
            .unwrap();

        let subscribers = directory.list_subscribers().await.unwrap();
        assert_eq!(subscribers[0].rules.len(), 1);
        assert_eq!(subscribers[0].rules[0].direction, Direction::Above);
    }

    #[tokio::test]
    async fn remove_subscriber_cascades_rules() {
        let (_dir, directory) = directory();
        let dave = SubscriberId::new("dave");
        directory
            .add_rule(&dave, &AlertRule::above(Commodity::Ron95, 2.0))
            .await
            .unwrap();

        assert!(directory.remove_subscriber(&dave).await.unwrap());
        assert!(!directory.remove_subscriber(&dave).await.unwrap());
        assert!(directory.list_subscribers().await.unwrap().is_empty());

        let remaining: i64 = directory
            .with_conn(|conn| alert_rules::table.count().get_result(conn))
            .await
            .unwrap();
        assert_eq!(remaining, 0);
    }
}
