use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait};

use models::property::{self, Entity as PropertyEntity, PropertyRecord};

use crate::errors::ServiceError;

/// Keyed storage for Property rows.
#[async_trait]
pub trait PropertyRepository: Send + Sync {
    async fn find_all(&self) -> Result<Vec<property::Model>, ServiceError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<property::Model>, ServiceError>;
    /// Insert when `id` is `None`, otherwise overwrite every column of that row.
    /// An id with no row is `ServiceError::NotFound`; ids are only ever assigned by the store.
    async fn save(&self, property: PropertyRecord) -> Result<property::Model, ServiceError>;
    async fn exists_by_id(&self, id: i64) -> Result<bool, ServiceError>;
    /// No-op when the row is absent.
    async fn delete_by_id(&self, id: i64) -> Result<(), ServiceError>;
}

/// SeaORM-backed repository implementation.
pub struct SeaOrmPropertyRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmPropertyRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

#[async_trait]
impl PropertyRepository for SeaOrmPropertyRepository {
    async fn find_all(&self) -> Result<Vec<property::Model>, ServiceError> {
        let rows = PropertyEntity::find().all(&self.db).await?;
        Ok(rows)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<property::Model>, ServiceError> {
        let found = PropertyEntity::find_by_id(id).one(&self.db).await?;
        Ok(found)
    }

    async fn save(&self, property: PropertyRecord) -> Result<property::Model, ServiceError> {
        let id = property.id;
        let am = property.into_active_model();
        match id {
            None => Ok(am.insert(&self.db).await?),
            Some(id) => match am.update(&self.db).await {
                Ok(saved) => Ok(saved),
                // deleted since the caller's lookup
                Err(DbErr::RecordNotUpdated) => Err(ServiceError::not_found("Property", id)),
                Err(e) => Err(e.into()),
            },
        }
    }

    async fn exists_by_id(&self, id: i64) -> Result<bool, ServiceError> {
        let n = PropertyEntity::find_by_id(id).count(&self.db).await?;
        Ok(n > 0)
    }

    async fn delete_by_id(&self, id: i64) -> Result<(), ServiceError> {
        PropertyEntity::delete_by_id(id).exec(&self.db).await?;
        Ok(())
    }
}

/// Simple in-memory mock repository for tests and doc examples
pub mod mock {
    use super::*;
    use std::collections::BTreeMap;
    use std::sync::{Mutex, MutexGuard};

    #[derive(Default)]
    struct Rows {
        last_id: i64,
        by_id: BTreeMap<i64, property::Model>,
    }

    #[derive(Default)]
    pub struct MockPropertyRepository {
        rows: Mutex<Rows>,
    }

    impl MockPropertyRepository {
        fn rows(&self) -> Result<MutexGuard<'_, Rows>, ServiceError> {
            self.rows.lock().map_err(|_| ServiceError::Db("mock store lock poisoned".into()))
        }
    }

    #[async_trait]
    impl PropertyRepository for MockPropertyRepository {
        async fn find_all(&self) -> Result<Vec<property::Model>, ServiceError> {
            Ok(self.rows()?.by_id.values().cloned().collect())
        }

        async fn find_by_id(&self, id: i64) -> Result<Option<property::Model>, ServiceError> {
            Ok(self.rows()?.by_id.get(&id).cloned())
        }

        async fn save(&self, property: PropertyRecord) -> Result<property::Model, ServiceError> {
            let mut rows = self.rows()?;
            let id = match property.id {
                Some(id) if rows.by_id.contains_key(&id) => id,
                Some(id) => return Err(ServiceError::not_found("Property", id)),
                None => {
                    rows.last_id += 1;
                    rows.last_id
                }
            };
            let model = property::Model {
                id,
                address: property.address,
                price: property.price,
                size: property.size,
                description: property.description,
            };
            rows.by_id.insert(id, model.clone());
            Ok(model)
        }

        async fn exists_by_id(&self, id: i64) -> Result<bool, ServiceError> {
            Ok(self.rows()?.by_id.contains_key(&id))
        }

        async fn delete_by_id(&self, id: i64) -> Result<(), ServiceError> {
            self.rows()?.by_id.remove(&id);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::mock::MockPropertyRepository;
    use super::*;
    use crate::test_support::get_db;

    fn casa() -> PropertyRecord {
        PropertyRecord {
            id: None,
            address: "Calle 123".into(),
            price: 100000.0,
            size: 50.0,
            description: Some("Casa bonita".into()),
        }
    }

    async fn exercise_contract(repo: &dyn PropertyRepository) -> Result<(), anyhow::Error> {
        assert!(repo.find_all().await?.is_empty());

        let a = repo.save(casa()).await?;
        let b = repo.save(PropertyRecord { address: "Carrera 7".into(), description: None, ..casa() }).await?;
        assert_ne!(a.id, b.id);
        assert_eq!(a.address, "Calle 123");
        assert_eq!(b.description, None);

        assert_eq!(repo.find_by_id(a.id).await?, Some(a.clone()));
        assert!(repo.exists_by_id(b.id).await?);
        assert!(!repo.exists_by_id(999).await?);
        assert_eq!(repo.find_by_id(999).await?, None);

        // full replace keeps the id
        let mut rec = PropertyRecord::from(a.clone());
        rec.address = "Avenida 1".into();
        rec.price = 250000.0;
        rec.size = 80.0;
        rec.description = None;
        let replaced = repo.save(rec).await?;
        assert_eq!(replaced.id, a.id);
        assert_eq!(replaced.address, "Avenida 1");
        assert_eq!(replaced.description, None);
        assert_eq!(repo.find_all().await?.len(), 2);

        repo.delete_by_id(a.id).await?;
        assert!(!repo.exists_by_id(a.id).await?);
        // absent id: no-op
        repo.delete_by_id(a.id).await?;
        let rest = repo.find_all().await?;
        assert_eq!(rest.len(), 1);
        assert_eq!(rest[0].id, b.id);
        Ok(())
    }

    #[tokio::test]
    async fn seaorm_repository_contract() -> Result<(), anyhow::Error> {
        let repo = SeaOrmPropertyRepository::new(get_db().await?);
        exercise_contract(&repo).await
    }

    #[tokio::test]
    async fn mock_repository_contract() -> Result<(), anyhow::Error> {
        exercise_contract(&MockPropertyRepository::default()).await
    }

    async fn save_after_delete_is_not_found(repo: &dyn PropertyRepository) -> Result<(), anyhow::Error> {
        let a = repo.save(casa()).await?;
        let stale = PropertyRecord::from(a.clone());
        repo.delete_by_id(a.id).await?;

        match repo.save(stale).await {
            Err(ServiceError::NotFound(msg)) => assert_eq!(msg, format!("Property not found with id {}", a.id)),
            other => panic!("unexpected: {other:?}"),
        }
        assert!(!repo.exists_by_id(a.id).await?);

        // the next insert gets a fresh id
        let b = repo.save(casa()).await?;
        assert_ne!(b.id, a.id);
        Ok(())
    }

    #[tokio::test]
    async fn seaorm_save_of_vanished_row_is_not_found() -> Result<(), anyhow::Error> {
        let repo = SeaOrmPropertyRepository::new(get_db().await?);
        save_after_delete_is_not_found(&repo).await
    }

    #[tokio::test]
    async fn mock_save_of_vanished_row_is_not_found() -> Result<(), anyhow::Error> {
        save_after_delete_is_not_found(&MockPropertyRepository::default()).await
    }

    #[tokio::test]
    async fn save_with_never_assigned_id_is_not_found() -> Result<(), anyhow::Error> {
        let repo = SeaOrmPropertyRepository::new(get_db().await?);
        let res = repo.save(PropertyRecord { id: Some(42), ..casa() }).await;
        assert!(matches!(res, Err(ServiceError::NotFound(_))));
        assert!(repo.find_all().await?.is_empty());
        Ok(())
    }
}
