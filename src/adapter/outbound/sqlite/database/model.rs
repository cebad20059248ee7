//! Database model types for Diesel ORM.

use diesel::prelude::*;

use super::schema::{alert_rules, subscribers};

/// Database row for a subscriber.
#[derive(Queryable, Selectable, Insertable, Debug, Clone)]
#[diesel(table_name = subscribers)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct SubscriberRow {
    pub id: String,
    pub delivery_address: Option<String>,
    pub registered_at: String,
    pub updated_at: String,
}

/// Database row for an alert rule (queryable).
#[derive(Queryable, Selectable, Debug, Clone)]
#[diesel(table_name = alert_rules)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct AlertRuleRow {
    pub id: i32,
    pub subscriber_id: String,
    pub commodity: String,
    pub direction: String,
    pub threshold: f64,
}

/// Database row for an alert rule (insertable).
#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = alert_rules)]
pub struct NewAlertRuleRow {
    pub subscriber_id: String,
    pub commodity: String,
    pub direction: String,
    pub threshold: f64,
}
