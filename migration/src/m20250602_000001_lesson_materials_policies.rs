use sea_orm_migration::prelude::*;

use crate::rls::{
    CURRENT_USER_FUNCTIONS_SQL, DROP_CURRENT_USER_FUNCTIONS_SQL, RlsCommand, RlsPolicy,
    create_policies, disable_rls_sql, drop_policies, enable_rls_sql, exec_sql, is_postgres,
};

pub const BUCKET_ID: &str = "lesson-materials";

// 导师判定需同时满足角色为 tutor 且为该课程的 tutor_id
const TUTOR_OWNS_COURSE_OF_MATERIAL: &str = "(app_current_user_role() = 'tutor' \
     AND EXISTS (SELECT 1 FROM courses c \
     WHERE c.id = lesson_materials.course_id AND c.tutor_id = app_current_user_id()))";

const TUTOR_OWNS_COURSE_OF_OBJECT: &str = "(app_current_user_role() = 'tutor' \
     AND EXISTS (SELECT 1 FROM courses c \
     WHERE c.id = split_part(storage_objects.name, '/', 1) AND c.tutor_id = app_current_user_id()))";

fn policies() -> Vec<RlsPolicy> {
    let in_bucket = format!("bucket_id = '{BUCKET_ID}'");
    let object_write = format!(
        "{in_bucket} AND (app_current_user_role() = 'admin' OR {TUTOR_OWNS_COURSE_OF_OBJECT})"
    );
    let material_write =
        format!("app_current_user_role() = 'admin' OR {TUTOR_OWNS_COURSE_OF_MATERIAL}");

    vec![
        // 课程资料表：公开可读
        RlsPolicy {
            name: "lesson_materials_public_read",
            table: "lesson_materials",
            command: RlsCommand::Select,
            using: Some("true".into()),
            check: None,
        },
        // 课程资料表：课程导师或管理员可写
        RlsPolicy {
            name: "lesson_materials_tutor_admin_write",
            table: "lesson_materials",
            command: RlsCommand::All,
            using: Some(material_write.clone()),
            check: Some(material_write),
        },
        // lesson-materials 桶：公开可读
        RlsPolicy {
            name: "lesson_materials_bucket_public_read",
            table: "storage_objects",
            command: RlsCommand::Select,
            using: Some(in_bucket),
            check: None,
        },
        // lesson-materials 桶：课程导师或管理员可写（路径首段为课程 ID）
        RlsPolicy {
            name: "lesson_materials_bucket_tutor_admin_write",
            table: "storage_objects",
            command: RlsCommand::All,
            using: Some(object_write.clone()),
            check: Some(object_write),
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
            .values_panic([BUCKET_ID.into(), true.into()])
            .to_owned();
        manager.exec_stmt(insert).await?;

        if !is_postgres(manager) {
            return Ok(());
        }

        exec_sql(manager, CURRENT_USER_FUNCTIONS_SQL).await?;
        exec_sql(manager, &enable_rls_sql("lesson_materials")).await?;
        exec_sql(manager, &enable_rls_sql("storage_objects")).await?;
        create_policies(manager, &policies()).await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        if is_postgres(manager) {
            drop_policies(manager, &policies()).await?;
            exec_sql(manager, &disable_rls_sql("lesson_materials")).await?;
            exec_sql(manager, &disable_rls_sql("storage_objects")).await?;
            exec_sql(manager, DROP_CURRENT_USER_FUNCTIONS_SQL).await?;
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

    fn policy(name: &str) -> RlsPolicy {
        policies().into_iter().find(|p| p.name == name).unwrap()
    }

    #[test]
    fn test_tutor_write_requires_tutor_role() {
        for name in [
            "lesson_materials_tutor_admin_write",
            "lesson_materials_bucket_tutor_admin_write",
        ] {
            let p = policy(name);
            let using = p.using.unwrap();
            assert!(using.contains("app_current_user_role() = 'tutor'"), "{name}");
            assert!(using.contains("c.tutor_id = app_current_user_id()"), "{name}");
            assert_eq!(p.check.as_deref(), Some(using.as_str()));
        }
    }

    #[test]
    fn test_read_is_public() {
        assert_eq!(
            policy("lesson_materials_public_read").using.as_deref(),
            Some("true")
        );
    }
}
