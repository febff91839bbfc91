use async_trait::async_trait;
use sea_orm::DatabaseTransaction;

use crate::contract::UserId;

/// Port for purging everything an account owns.
///
/// Account deletion runs inside a single transaction: the implementor
/// deletes the owner's rows from every collection it manages using the
/// supplied transaction, then the user row itself is removed and the
/// transaction commits.
#[async_trait]
pub trait OwnedDataPurge: Send + Sync {
    async fn purge_owner(&self, txn: &DatabaseTransaction, owner: UserId) -> anyhow::Result<()>;
}
