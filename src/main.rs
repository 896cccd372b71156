use chrono::Local; // 日志时间戳
use env_logger::{Env, Target};
use std::io::Write; // env_logger 自定义格式

use prize_wheel::{CatalogService, Config, HistoryService};

fn main() -> anyhow::Result<()> {
    // 加载配置 (日志级别来自配置，RUST_LOG 优先)；提示信息在日志初始化后输出
    let (config, warnings) = Config::from_toml()?;

    env_logger::Builder::from_env(Env::default().default_filter_or(config.log.level.as_str()))
        .format(|buf, record| {
            let ts = Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z");
            let level = record.level().as_str().to_ascii_lowercase();
            let msg_json = serde_json::to_string(&format!("{}", record.args()))
                .unwrap_or_else(|_| "\"<invalid utf8>\"".to_string());
            writeln!(
                buf,
                "{{\"timestamp\":\"{}\",\"level\":\"{}\",\"message\":{},\"target\":\"{}\"}}",
                ts,
                level,
                msg_json,
                record.target(),
            )
        })
        .target(Target::Stdout)
        .init();

    for warning in &warnings {
        log::warn!("{warning}");
    }

    // 奖品目录: 配置文件指定则加载，否则使用内置数据
    let catalog = match &config.catalog.path {
        Some(path) => CatalogService::load(path)?,
        None => CatalogService::new(),
    };

    let history = HistoryService::new(config.history.capacity);

    log::info!(
        "Prize catalog ready: {} entries in groups {:?}",
        catalog.len(),
        catalog.groups()
    );
    for entry in catalog.entries() {
        log::debug!(
            "  #{} {} [{}] weight={}",
            entry.order,
            entry.label,
            entry.group,
            entry.weight
        );
    }
    log::info!(
        "Spin history initialised (capacity {}, {} entries)",
        history.capacity(),
        history.len()
    );

    Ok(())
}
