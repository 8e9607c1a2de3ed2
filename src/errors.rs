//! 统一错误处理模块
//!
//! 使用宏自动生成错误类型，支持错误代码和类型名称。

use std::fmt;

/// 定义错误类型的宏
///
/// 自动生成：
/// - enum 定义
/// - code() 方法 - 返回错误代码
/// - error_type() 方法 - 返回错误类型名称
/// - message() 方法 - 返回错误详情
/// - 便捷构造函数
macro_rules! define_app_errors {
    ($(
        $variant:ident($code:literal, $type_name:literal)
    ),* $(,)?) => {
        #[derive(Debug, Clone, PartialEq)]
        pub enum AppError {
            $($variant(String),)*
        }

        impl AppError {
            /// 获取错误代码
            pub fn code(&self) -> &'static str {
                match self {
                    $(AppError::$variant(_) => $code,)*
                }
            }

            /// 获取错误类型名称
            pub fn error_type(&self) -> &'static str {
                match self {
                    $(AppError::$variant(_) => $type_name,)*
                }
            }

            /// 获取错误详情
            pub fn message(&self) -> &str {
                match self {
                    $(AppError::$variant(msg) => msg,)*
                }
            }
        }

        // 生成便捷构造函数
        paste::paste! {
            impl AppError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        AppError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_app_errors! {
    DatabaseConfig("E001", "Database Configuration Error"),
    DatabaseConnection("E002", "Database Connection Error"),
    DatabaseOperation("E003", "Database Operation Error"),
    FileOperation("E004", "File Operation Error"),
    Validation("E005", "Validation Error"),
    NotFound("E006", "Resource Not Found"),
    Conflict("E007", "Conflict"),
    Serialization("E008", "Serialization Error"),
    Authentication("E009", "Authentication Error"),
    Authorization("E010", "Authorization Error"),
}

impl AppError {
    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for AppError {}

// 唯一约束冲突单独映射为 Conflict，其余数据库错误统一为 DatabaseOperation
impl From<sea_orm::DbErr> for AppError {
    fn from(err: sea_orm::DbErr) -> Self {
        match err.sql_err() {
            Some(sea_orm::SqlErr::UniqueConstraintViolation(detail)) => AppError::Conflict(detail),
            _ => AppError::DatabaseOperation(err.to_string()),
        }
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::FileOperation(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(AppError::database_config("test").code(), "E001");
        assert_eq!(AppError::validation("test").code(), "E005");
        assert_eq!(AppError::conflict("test").code(), "E007");
        assert_eq!(AppError::authorization("test").code(), "E010");
    }

    #[test]
    fn test_error_types() {
        assert_eq!(
            AppError::not_found("test").error_type(),
            "Resource Not Found"
        );
        assert_eq!(AppError::validation("test").error_type(), "Validation Error");
    }

    #[test]
    fn test_error_message() {
        let err = AppError::validation("Submission text is empty");
        assert_eq!(err.message(), "Submission text is empty");
    }

    #[test]
    fn test_format_simple() {
        let err = AppError::conflict("already submitted");
        let formatted = err.format_simple();
        assert!(formatted.contains("Conflict"));
        assert!(formatted.contains("already submitted"));
    }

    #[test]
    fn test_generic_db_error_maps_to_operation() {
        let err: AppError = sea_orm::DbErr::Custom("boom".into()).into();
        assert_eq!(err.code(), "E003");
    }
}
