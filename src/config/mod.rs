mod r#impl;
mod structs;

pub use structs::*;

/// 未配置 `JWT_SECRET` 时使用的占位密钥，生产环境启动时会告警
pub const DEFAULT_JWT_SECRET: &str = "assignment-viewer-insecure-dev-secret";
