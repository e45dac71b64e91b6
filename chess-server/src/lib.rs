//! 中国象棋最佳走法服务
//!
//! 包含:
//! - 命令行配置
//! - `/best` HTTP 接口

pub mod api;
pub mod config;

pub use api::{router, ApiError, BestMoveRequest};
pub use config::ServerConfig;
