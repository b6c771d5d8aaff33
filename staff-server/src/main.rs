use staff_server::core::DbEngine;
use staff_server::{Config, Server, ServerState, print_banner, setup_environment};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. 加载 .env (文件不存在时忽略)
    dotenv::dotenv().ok();

    // 2. 加载配置
    let config = Config::from_env()?;

    // 3. 初始化日志
    config.ensure_work_dir_structure()?;
    setup_environment(&config);

    print_banner();
    tracing::info!(
        environment = %config.environment,
        db_engine = ?config.db_engine,
        "Staff Server starting..."
    );
    if config.is_production() && config.db_engine == DbEngine::Memory {
        tracing::warn!("DB_ENGINE=memory in production: records are lost on restart");
    }
    if config.is_development() && config.bootstrap_admin.is_none() {
        tracing::warn!("No BOOTSTRAP_ADMIN_UID/EMAIL set; admin operations need an existing admin user");
    }

    // 4. 初始化服务器状态
    let state = ServerState::initialize(&config).await?;

    // 5. 启动 HTTP 服务器
    let server = Server::with_state(config, state);
    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        return Err(e.into());
    }

    Ok(())
}
