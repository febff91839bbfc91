//! SeaORM-backed repository implementation for the identity domain port.

use anyhow::Context;
use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, NotSet, PaginatorTrait,
    QueryFilter, Set, TransactionTrait,
};

use crate::contract::{User, UserId};
use crate::domain::ports::OwnedDataPurge;
use crate::domain::repo::{NewUserRecord, PasswordRecord, UsersRepository};
use crate::infra::storage::entity::{ActiveModel as UserAM, Column, Entity as UserEntity};

pub struct SeaOrmUsersRepository {
    conn: DatabaseConnection,
}

impl SeaOrmUsersRepository {
    pub fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl UsersRepository for SeaOrmUsersRepository {
    async fn find_by_id(&self, id: UserId) -> anyhow::Result<Option<User>> {
        let found = UserEntity::find_by_id(id)
            .one(&self.conn)
            .await
            .context("find_by_id failed")?;
        Ok(found.map(Into::into))
    }

    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<PasswordRecord>> {
        let found = UserEntity::find()
            .filter(Column::Email.eq(email))
            .one(&self.conn)
            .await
            .context("find_by_email failed")?;

        Ok(found.map(|m| PasswordRecord {
            password_hash: m.password_hash.clone(),
            user: m.into(),
        }))
    }

    async fn email_exists(&self, email: &str) -> anyhow::Result<bool> {
        let count = UserEntity::find()
            .filter(Column::Email.eq(email))
            .count(&self.conn)
            .await
            .context("email_exists failed")?;
        Ok(count > 0)
    }

    async fn username_exists(&self, username: &str) -> anyhow::Result<bool> {
        let count = UserEntity::find()
            .filter(Column::Username.eq(username))
            .count(&self.conn)
            .await
            .context("username_exists failed")?;
        Ok(count > 0)
    }

    async fn insert(&self, rec: NewUserRecord) -> anyhow::Result<User> {
        let m = UserAM {
            id: NotSet,
            username: Set(rec.username),
            email: Set(rec.email),
            password_hash: Set(rec.password_hash),
            created_at: Set(rec.created_at),
        };
        let inserted = m.insert(&self.conn).await.context("insert failed")?;
        Ok(inserted.into())
    }

    async fn delete_with_owned_data(
        &self,
        id: UserId,
        purge: &dyn OwnedDataPurge,
    ) -> anyhow::Result<bool> {
        let txn = self.conn.begin().await.context("begin failed")?;

        purge
            .purge_owner(&txn, id)
            .await
            .context("owned-data purge failed")?;

        let res = UserEntity::delete_by_id(id)
            .exec(&txn)
            .await
            .context("user delete failed")?;

        txn.commit().await.context("commit failed")?;
        Ok(res.rows_affected > 0)
    }
}
