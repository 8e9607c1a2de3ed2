use sea_orm_migration::prelude::*;

use crate::rls::{RlsCommand, RlsPolicy, create_policies, drop_policies, is_postgres};

pub const BUCKET_ID: &str = "assignments";

fn policies() -> Vec<RlsPolicy> {
    let in_bucket = format!("bucket_id = '{BUCKET_ID}'");
    // 学生只能访问 submissions/{自己的 ID}/ 下的对象，至少三段
    let own_submission_path = format!(
        "{in_bucket} AND split_part(name, '/', 1) = 'submissions' \
         AND split_part(name, '/', 2) = app_current_user_id() \
         AND split_part(name, '/', 3) <> ''"
    );

    vec![
        RlsPolicy {
            name: "assignments_bucket_student_own_files",
            table: "storage_objects",
            command: RlsCommand::All,
            using: Some(own_submission_path.clone()),
            check: Some(own_submission_path),
        },
        RlsPolicy {
            name: "assignments_bucket_tutor_read",
            table: "storage_objects",
            command: RlsCommand::Select,
            using: Some(format!(
                "{in_bucket} AND app_current_user_role() = 'tutor'"
            )),
            check: None,
        },
        RlsPolicy {
            name: "assignments_bucket_admin_all",
            table: "storage_objects",
            command: RlsCommand::All,
            using: Some(format!(
                "{in_bucket} AND app_current_user_role() = 'admin'"
            )),
            check: Some(format!(
                "{in_bucket} AND app_current_user_role() = 'admin'"
            )),
        },
    ]
}

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let insert = Query::insert()
            .into_table(StorageBuckets::Table)
            .columns([StorageBuckets::Id, StorageBuckets::Public])
            .values_panic([BUCKET_ID.into(), false.into()])
            .to_owned();
        manager.exec_stmt(insert).await?;

        // RLS 已由上一个迁移在 storage_objects 上启用
        if is_postgres(manager) {
            create_policies(manager, &policies()).await?;
        }
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        if is_postgres(manager) {
            drop_policies(manager, &policies()).await?;
        }

        let delete = Query::delete()
            .from_table(StorageBuckets::Table)
            .and_where(Expr::col(StorageBuckets::Id).eq(BUCKET_ID))
            .to_owned();
        manager.exec_stmt(delete).await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum StorageBuckets {
    Table,
    Id,
    Public,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_student_policy_requires_file_under_own_folder() {
        let p = policies()
            .into_iter()
            .find(|p| p.name == "assignments_bucket_student_own_files")
            .unwrap();
        let using = p.using.unwrap();
        assert!(using.contains("split_part(name, '/', 2) = app_current_user_id()"));
        assert!(using.contains("split_part(name, '/', 3) <> ''"));
        assert_eq!(p.check.as_deref(), Some(using.as_str()));
    }

    #[test]
    fn test_tutor_policy_is_read_only() {
        let p = policies()
            .into_iter()
            .find(|p| p.name == "assignments_bucket_tutor_read")
            .unwrap();
        assert!(matches!(p.command, RlsCommand::Select));
        assert!(p.check.is_none());
    }
}
