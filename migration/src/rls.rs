//! PostgreSQL 行级安全（RLS）辅助工具
//!
//! 只生成 SQL 文本，是否执行由迁移根据数据库后端决定（SQLite / MySQL 不支持 RLS）。

use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::{ConnectionTrait, DatabaseBackend};

/// 策略适用的 SQL 命令
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RlsCommand {
    All,
    Select,
    Insert,
    Update,
    Delete,
}

impl RlsCommand {
    fn as_sql(&self) -> &'static str {
        match self {
            RlsCommand::All => "ALL",
            RlsCommand::Select => "SELECT",
            RlsCommand::Insert => "INSERT",
            RlsCommand::Update => "UPDATE",
            RlsCommand::Delete => "DELETE",
        }
    }
}

/// 一条行级安全策略
#[derive(Debug, Clone)]
pub struct RlsPolicy {
    pub name: &'static str,
    pub table: &'static str,
    pub command: RlsCommand,
    pub using: Option<String>,
    pub check: Option<String>,
}

impl RlsPolicy {
    pub fn create_policy_sql(&self) -> String {
        let mut sql = format!(
            "CREATE POLICY \"{}\" ON \"{}\" FOR {}",
            self.name,
            self.table,
            self.command.as_sql()
        );
        // INSERT 策略只能带 WITH CHECK
        if let Some(using) = &self.using
            && self.command != RlsCommand::Insert
        {
            sql.push_str(&format!(" USING ({using})"));
        }
        if let Some(check) = &self.check
            && !matches!(self.command, RlsCommand::Select | RlsCommand::Delete)
        {
            sql.push_str(&format!(" WITH CHECK ({check})"));
        }
        sql
    }

    pub fn drop_policy_sql(&self) -> String {
        format!(
            "DROP POLICY IF EXISTS \"{}\" ON \"{}\"",
            self.name, self.table
        )
    }
}

pub fn enable_rls_sql(table: &str) -> String {
    format!("ALTER TABLE \"{table}\" ENABLE ROW LEVEL SECURITY")
}

pub fn disable_rls_sql(table: &str) -> String {
    format!("ALTER TABLE \"{table}\" DISABLE ROW LEVEL SECURITY")
}

/// 当前请求用户 ID / 角色的辅助函数。
/// 应用在事务内通过 `SET LOCAL app.current_user_id = '...'` 传入身份。
pub const CURRENT_USER_FUNCTIONS_SQL: &str = r#"
CREATE OR REPLACE FUNCTION app_current_user_id() RETURNS text
LANGUAGE sql STABLE AS $$
    SELECT NULLIF(current_setting('app.current_user_id', true), '')
$$;

CREATE OR REPLACE FUNCTION app_current_user_role() RETURNS text
LANGUAGE sql STABLE AS $$
    SELECT role FROM profiles WHERE id = app_current_user_id()
$$;
"#;

pub const DROP_CURRENT_USER_FUNCTIONS_SQL: &str = r#"
DROP FUNCTION IF EXISTS app_current_user_role();
DROP FUNCTION IF EXISTS app_current_user_id();
"#;

pub fn is_postgres(manager: &SchemaManager) -> bool {
    manager.get_database_backend() == DatabaseBackend::Postgres
}

pub async fn exec_sql(manager: &SchemaManager<'_>, sql: &str) -> Result<(), DbErr> {
    manager.get_connection().execute_unprepared(sql).await?;
    Ok(())
}

pub async fn create_policies(
    manager: &SchemaManager<'_>,
    policies: &[RlsPolicy],
) -> Result<(), DbErr> {
    for policy in policies {
        exec_sql(manager, &policy.create_policy_sql()).await?;
    }
    Ok(())
}

pub async fn drop_policies(
    manager: &SchemaManager<'_>,
    policies: &[RlsPolicy],
) -> Result<(), DbErr> {
    for policy in policies {
        exec_sql(manager, &policy.drop_policy_sql()).await?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_policy_ignores_check() {
        let policy = RlsPolicy {
            name: "read",
            table: "lesson_materials",
            command: RlsCommand::Select,
            using: Some("true".into()),
            check: Some("false".into()),
        };
        assert_eq!(
            policy.create_policy_sql(),
            "CREATE POLICY \"read\" ON \"lesson_materials\" FOR SELECT USING (true)"
        );
    }

    #[test]
    fn test_insert_policy_only_has_check() {
        let policy = RlsPolicy {
            name: "write",
            table: "storage_objects",
            command: RlsCommand::Insert,
            using: Some("true".into()),
            check: Some("owner_id = app_current_user_id()".into()),
        };
        let sql = policy.create_policy_sql();
        assert!(!sql.contains("USING"));
        assert!(sql.ends_with("WITH CHECK (owner_id = app_current_user_id())"));
    }

    #[test]
    fn test_drop_policy_sql() {
        let policy = RlsPolicy {
            name: "write",
            table: "storage_objects",
            command: RlsCommand::All,
            using: None,
            check: None,
        };
        assert_eq!(
            policy.drop_policy_sql(),
            "DROP POLICY IF EXISTS \"write\" ON \"storage_objects\""
        );
    }
}
