//! 日志工具模块
//!
//! 提供日志初始化和输出的辅助函数

use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::models::{Worksheet, WorksheetHistory};

/// 初始化日志
///
/// 优先使用 `RUST_LOG`，否则按 `verbose_logging` 选择 debug / info。
/// 重复调用不会报错（测试中可能多次初始化）。
pub fn init(verbose: bool) {
    let default_level = if verbose {
        "worksheet_generator=debug,info"
    } else {
        "info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

/// 记录程序启动信息
pub fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!("🚀 练习单生成器启动");
    info!("🤖 模型: {} ({})", config.llm_model_name, config.llm_api_base_url);
    info!("📁 存储目录: {}", config.storage_dir.display());
    info!("📊 历史上限: {} 条", config.history_max_items);
    info!("{}", "=".repeat(60));
}

/// 记录历史列表
pub fn log_history(history: &WorksheetHistory) {
    if history.is_empty() {
        info!("📭 暂无历史练习单");
        return;
    }

    info!("📚 共 {} 张历史练习单", history.len());
    for worksheet in &history.worksheets {
        log_worksheet_line(worksheet);
    }
}

/// 单行摘要：id | 标题 | 题目数 | 创建时间
pub fn log_worksheet_line(worksheet: &Worksheet) {
    info!(
        "  {} | {} | {} 题 | {}{}",
        worksheet.id,
        worksheet.title,
        worksheet.questions.len(),
        worksheet.created_at.with_timezone(&chrono::Local).format("%Y-%m-%d %H:%M"),
        if worksheet.pdf_url.is_some() { " | 📄" } else { "" }
    );
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度
///
/// # 返回
/// 返回截断后的文本
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_text() {
        assert_eq!(truncate_text("short", 10), "short");
        assert_eq!(truncate_text("abcdefghij", 4), "abcd...");
        // 按字符而不是字节截断
        assert_eq!(truncate_text("加法减法乘法", 2), "加法...");
    }
}
