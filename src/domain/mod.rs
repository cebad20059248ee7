//! Domain types: commodities, snapshots, rules and triggers.

pub mod alert;
pub mod commodity;
pub mod dedup;
pub mod id;
pub mod snapshot;
pub mod subscriber;
pub mod trigger;

pub use alert::Alert;
pub use commodity::{Commodity, UnknownCommodity};
pub use dedup::DedupeKey;
pub use id::{DeliveryAddress, SubscriberId};
pub use snapshot::PriceSnapshot;
pub use subscriber::{AlertRule, Direction, Subscriber, UnknownDirection};
pub use trigger::{evaluate, TriggerResult};
