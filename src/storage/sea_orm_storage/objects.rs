//! 对象存储元数据操作

use super::SeaOrmStorage;
use crate::entity::storage_buckets::Entity as StorageBuckets;
use crate::entity::storage_objects::{ActiveModel, Column, Entity as StorageObjects};
use crate::errors::{AppError, Result};
use crate::models::objects::entities::{NewStorageObject, StorageBucket, StorageObject};
use sea_orm::sea_query::OnConflict;
use sea_orm::{EntityTrait, Set};

impl SeaOrmStorage {
    /// 获取存储桶
    pub async fn get_bucket_impl(&self, id: &str) -> Result<Option<StorageBucket>> {
        let result = StorageBuckets::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| AppError::database_operation(format!("查询存储桶失败: {e}")))?;

        Ok(result.map(|m| m.into_bucket()))
    }

    /// 写入对象元数据，同名对象覆盖
    pub async fn put_object_impl(&self, req: NewStorageObject) -> Result<StorageObject> {
        let bucket_id = req.bucket_id.clone();
        let name = req.name.clone();

        let model = ActiveModel {
            bucket_id: Set(req.bucket_id),
            name: Set(req.name),
            owner_id: Set(req.owner_id),
            size: Set(req.size),
            content_type: Set(req.content_type),
            created_at: Set(chrono::Utc::now().timestamp()),
        };

        StorageObjects::insert(model)
            .on_conflict(
                OnConflict::columns([Column::BucketId, Column::Name])
                    .update_columns([
                        Column::OwnerId,
                        Column::Size,
                        Column::ContentType,
                        Column::CreatedAt,
                    ])
                    .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await
            .map_err(|e| AppError::database_operation(format!("写入对象元数据失败: {e}")))?;

        self.get_object_impl(&bucket_id, &name)
            .await?
            .ok_or_else(|| AppError::not_found(format!("对象不存在: {bucket_id}/{name}")))
    }

    /// 获取对象元数据
    pub async fn get_object_impl(
        &self,
        bucket_id: &str,
        name: &str,
    ) -> Result<Option<StorageObject>> {
        let result = StorageObjects::find_by_id((bucket_id.to_string(), name.to_string()))
            .one(&self.db)
            .await
            .map_err(|e| AppError::database_operation(format!("查询对象元数据失败: {e}")))?;

        Ok(result.map(|m| m.into_object()))
    }

    /// 删除对象元数据
    pub async fn delete_object_impl(&self, bucket_id: &str, name: &str) -> Result<bool> {
        let result = StorageObjects::delete_by_id((bucket_id.to_string(), name.to_string()))
            .exec(&self.db)
            .await
            .map_err(|e| AppError::database_operation(format!("删除对象元数据失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}
