//! Assignment Viewer - 学生作业查看服务
//!
//! 基于 Actix Web 构建，面向学生展示所选课程的作业、提交状态与批改反馈，
//! 并以存储桶与行级策略约束课程资料和作业文件的访问。
//!
//! # 架构
//! - `access`: 存储桶与数据表访问策略
//! - `config`: 配置管理
//! - `entity`: SeaORM 数据库实体
//! - `errors`: 统一错误处理
//! - `middlewares`: 认证与限流中间件
//! - `models`: 数据模型定义
//! - `routes`: API 路由层
//! - `runtime`: 运行时生命周期管理
//! - `services`: 业务逻辑层
//! - `storage`: 数据存储层（SeaORM）
//! - `utils`: 工具函数
//! - `viewer`: 作业查看器核心（索引、状态、对话框、加载）

pub mod access;
pub mod config;
pub mod entity;
pub mod errors;
pub mod middlewares;
pub mod models;
pub mod routes;
pub mod runtime;
pub mod services;
pub mod storage;
pub mod utils;
pub mod viewer;
