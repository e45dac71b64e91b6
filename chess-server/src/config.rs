//! 服务端命令行配置

use std::net::SocketAddr;

use chess_ai::{AiConfig, AiError};
use clap::Parser;

/// 服务端配置
#[derive(Parser, Debug, Clone)]
#[command(name = "chess-server")]
#[command(about = "中国象棋最佳走法服务", long_about = None)]
pub struct ServerConfig {
    /// 监听地址
    #[arg(long, default_value = "0.0.0.0:25566")]
    pub listen: SocketAddr,

    /// 固定搜索深度（缺省时按棋盘子数决定）
    #[arg(long)]
    pub depth: Option<u8>,
}

impl ServerConfig {
    /// 由命令行参数得到 AI 配置
    pub fn ai_config(&self) -> Result<AiConfig, AiError> {
        match self.depth {
            Some(depth) => AiConfig::with_fixed_depth(depth),
            None => Ok(AiConfig::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chess_ai::DepthPolicy;

    #[test]
    fn test_defaults() {
        let config = ServerConfig::try_parse_from(["chess-server"]).unwrap();
        assert_eq!(config.listen, "0.0.0.0:25566".parse::<SocketAddr>().unwrap());
        assert_eq!(config.depth, None);
        assert_eq!(config.ai_config().unwrap(), AiConfig::default());
    }

    #[test]
    fn test_fixed_depth() {
        let config =
            ServerConfig::try_parse_from(["chess-server", "--listen", "127.0.0.1:8080", "--depth", "4"]).unwrap();
        assert_eq!(config.listen.port(), 8080);
        assert_eq!(config.ai_config().unwrap().depth_policy, DepthPolicy::fixed(4).unwrap());
    }

    #[test]
    fn test_invalid_flags() {
        let config = ServerConfig::try_parse_from(["chess-server", "--depth", "0"]).unwrap();
        assert_eq!(config.ai_config().unwrap_err(), AiError::ZeroDepth);

        assert!(ServerConfig::try_parse_from(["chess-server", "--listen", "not-an-address"]).is_err());
    }
}
