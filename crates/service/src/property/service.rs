use std::sync::Arc;
use tracing::{debug, info, instrument};

use models::property::{self, PropertyRecord};

use crate::errors::ServiceError;
use crate::property::repository::PropertyRepository;

/// Application service over the property store. Framework independent; the HTTP
/// layer owns input validation.
pub struct PropertyService<R: PropertyRepository + ?Sized> {
    repo: Arc<R>,
}

impl<R: PropertyRepository + ?Sized> PropertyService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    pub async fn get_all_properties(&self) -> Result<Vec<property::Model>, ServiceError> {
        let list = self.repo.find_all().await?;
        debug!(count = list.len(), "properties listed");
        Ok(list)
    }

    pub async fn get_property_by_id(&self, id: i64) -> Result<Option<property::Model>, ServiceError> {
        self.repo.find_by_id(id).await
    }

    /// Insert (no id) or full replace (id present).
    ///
    /// # Examples
    /// ```
    /// use service::property::{PropertyService, repository::mock::MockPropertyRepository};
    /// use models::property::PropertyRecord;
    /// use std::sync::Arc;
    /// let svc = PropertyService::new(Arc::new(MockPropertyRepository::default()));
    /// let rec = PropertyRecord { id: None, address: "Calle 123".into(), price: 100000.0, size: 50.0, description: None };
    /// let saved = tokio_test::block_on(svc.save_property(rec)).unwrap();
    /// assert_eq!(saved.address, "Calle 123");
    /// ```
    #[instrument(skip(self, property), fields(id = ?property.id))]
    pub async fn save_property(&self, property: PropertyRecord) -> Result<property::Model, ServiceError> {
        let saved = self.repo.save(property).await?;
        info!(id = saved.id, "property saved");
        Ok(saved)
    }

    /// Delete after an existence check.
    ///
    /// # Examples
    /// ```
    /// use service::{errors::ServiceError, property::{PropertyService, repository::mock::MockPropertyRepository}};
    /// use std::sync::Arc;
    /// let svc = PropertyService::new(Arc::new(MockPropertyRepository::default()));
    /// let err = tokio_test::block_on(svc.delete_property(Some(999))).unwrap_err();
    /// assert_eq!(err.to_string(), "Property not found with id 999");
    /// assert!(matches!(tokio_test::block_on(svc.delete_property(None)), Err(ServiceError::InvalidArgument(_))));
    /// ```
    #[instrument(skip(self))]
    pub async fn delete_property(&self, id: Option<i64>) -> Result<(), ServiceError> {
        let id = id.ok_or_else(|| ServiceError::InvalidArgument("id must not be null".into()))?;
        if !self.repo.exists_by_id(id).await? {
            return Err(ServiceError::not_found("Property", id));
        }
        self.repo.delete_by_id(id).await?;
        info!(id, "property deleted");
        Ok(())
    }
}
