//! 文档渲染 - 基础设施层
//!
//! 把完整的 HTML 文档交给渲染器得到文件句柄，再交给系统分享

use std::path::PathBuf;

use anyhow::{Context, Result};
use async_trait::async_trait;
use tokio::fs;
use tracing::info;

/// 导出协作方
///
/// 不认识 Worksheet，只处理已经拼好的 HTML 文档
#[async_trait]
pub trait DocumentRenderer: Send + Sync {
    /// 渲染文档，返回文件句柄（路径或 URI）
    async fn render(&self, html: &str, name: &str) -> Result<String>;

    /// 分享已渲染的文件
    async fn share(&self, handle: &str) -> Result<()>;
}

/// 把文档写成本地 HTML 文件的渲染器
///
/// 命令行环境下没有系统分享面板，`share` 只记录文件位置。
#[derive(Debug, Clone)]
pub struct HtmlFileRenderer {
    output_dir: PathBuf,
}

impl HtmlFileRenderer {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }
}

#[async_trait]
impl DocumentRenderer for HtmlFileRenderer {
    async fn render(&self, html: &str, name: &str) -> Result<String> {
        fs::create_dir_all(&self.output_dir)
            .await
            .with_context(|| format!("无法创建导出目录: {}", self.output_dir.display()))?;

        let path = self.output_dir.join(format!("{}.html", name));
        fs::write(&path, html)
            .await
            .with_context(|| format!("无法写入导出文件: {}", path.display()))?;

        Ok(path.to_string_lossy().to_string())
    }

    async fn share(&self, handle: &str) -> Result<()> {
        info!("📄 练习单已导出: {}", handle);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_render_writes_file() {
        let dir = std::env::temp_dir().join(format!("worksheet-export-{}", crate::models::new_id()));
        let renderer = HtmlFileRenderer::new(&dir);

        let handle = renderer.render("<html></html>", "abc").await.unwrap();
        assert!(handle.ends_with("abc.html"));
        assert_eq!(std::fs::read_to_string(&handle).unwrap(), "<html></html>");
        assert!(renderer.share(&handle).await.is_ok());

        let _ = std::fs::remove_dir_all(dir);
    }
}
