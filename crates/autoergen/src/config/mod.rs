use std::path::PathBuf;

use clap::Parser;
use once_cell::sync::Lazy;

/// 配置目录，数据库文件默认放在这里
pub static CONFIG_DIR: Lazy<PathBuf> = Lazy::new(|| {
    dirs::config_dir()
        .map(|dir| dir.join("autoergen"))
        .unwrap_or_else(|| PathBuf::from(".autoergen"))
});

/// 运行参数，全部支持环境变量覆盖
#[derive(Parser, Debug, Clone)]
#[command(name = "autoergen", about = "AutoERGen 数据与接口服务")]
pub struct Args {
    /// 监听地址
    #[arg(long, env = "AUTOERGEN_HOST", default_value = "0.0.0.0")]
    pub host: String,
    /// 监听端口（容器内固定暴露 8501）
    #[arg(long, env = "AUTOERGEN_PORT", default_value_t = 8501)]
    pub port: u16,
    /// SQLite 数据库文件路径，默认位于配置目录
    #[arg(long, env = "AUTOERGEN_DB_PATH")]
    pub db_path: Option<PathBuf>,
}

impl Args {
    pub fn database_path(&self) -> PathBuf {
        self.db_path.clone().unwrap_or_else(|| CONFIG_DIR.join("data.sqlite"))
    }
}
