//! 存储对象元数据实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "storage_objects")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub bucket_id: String,
    #[sea_orm(primary_key, auto_increment = false)]
    pub name: String,
    pub owner_id: Option<String>,
    pub size: i64,
    pub content_type: String,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::storage_buckets::Entity",
        from = "Column::BucketId",
        to = "super::storage_buckets::Column::Id"
    )]
    Bucket,
}

impl Related<super::storage_buckets::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Bucket.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    pub fn into_object(self) -> crate::models::objects::entities::StorageObject {
        use crate::models::objects::entities::StorageObject;
        use chrono::{DateTime, Utc};

        StorageObject {
            bucket_id: self.bucket_id,
            name: self.name,
            owner_id: self.owner_id,
            size: self.size,
            content_type: self.content_type,
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
        }
    }
}
