//! 用户资料存储操作

use super::SeaOrmStorage;
use crate::entity::profiles::{ActiveModel, Entity as Profiles};
use crate::errors::{AppError, Result};
use crate::models::profiles::entities::{NewProfile, Profile};
use sea_orm::{ActiveModelTrait, EntityTrait, Set};

impl SeaOrmStorage {
    /// 创建用户资料
    pub async fn create_profile_impl(&self, req: NewProfile) -> Result<Profile> {
        let model = ActiveModel {
            id: Set(req.id),
            display_name: Set(req.display_name),
            role: Set(req.role.to_string()),
            created_at: Set(chrono::Utc::now().timestamp()),
        };

        let result = model.insert(&self.db).await.map_err(AppError::from)?;

        Ok(result.into_profile())
    }

    /// 通过 ID 获取用户资料
    pub async fn get_profile_by_id_impl(&self, id: &str) -> Result<Option<Profile>> {
        let result = Profiles::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| AppError::database_operation(format!("查询用户资料失败: {e}")))?;

        Ok(result.map(|m| m.into_profile()))
    }
}

#[cfg(test)]
mod tests {
    use crate::errors::AppError;
    use crate::models::profiles::entities::{NewProfile, ProfileRole};
    use crate::storage::Storage;
    use crate::storage::sea_orm_storage::test_support::memory_storage;

    #[tokio::test]
    async fn test_profile_round_trip() {
        let storage = memory_storage().await;
        let created = storage
            .create_profile(NewProfile {
                id: "tutor-1".into(),
                display_name: "Ada".into(),
                role: ProfileRole::Tutor,
            })
            .await
            .unwrap();
        assert_eq!(created.role, ProfileRole::Tutor);

        let found = storage.get_profile_by_id("tutor-1").await.unwrap().unwrap();
        assert_eq!(found.display_name, "Ada");
        assert!(storage.get_profile_by_id("nobody").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_profile_is_conflict() {
        let storage = memory_storage().await;
        let new = NewProfile {
            id: "s1".into(),
            display_name: "Student".into(),
            role: ProfileRole::Student,
        };
        storage.create_profile(new.clone()).await.unwrap();
        let err = storage.create_profile(new).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }
}
