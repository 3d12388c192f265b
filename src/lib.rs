//! # Worksheet Generator
//!
//! 为 K-5 儿童生成可打印练习单（算术、谜题、应用题、逻辑题）的 Rust 库
//!
//! ## 架构设计
//!
//! 本系统采用与题目处理系统相同的分层架构：
//!
//! ### ① 基础设施层（Infrastructure / Clients）
//! - `infrastructure/` - 键值存储、文档渲染，只暴露能力
//! - `clients/` - LLM 生成协作方（`CompletionProvider`）
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"，每个服务只做一件事
//! - `prompt_builder` - 配置 → 指令消息 + 输出 schema
//! - `response_validator` - LLM 输出 → 校验后的题目列表
//! - `HistoryStore` - 有上限、最新在前的历史记录
//! - `formatter` - 纯文本 / HTML 渲染
//! - `ExportService` - 渲染、分享并记录导出文件
//!
//! ### ③ 流程层（Workflow）
//! - `WorksheetGenerator` - 提示词 → LLM → 校验 → 组装 → 历史
//!
//! ### ④ 编排层（Orchestration）
//! - `App` - 显式构造所有服务，每个用户操作一个方法
//!
//! ## 模块结构

pub mod clients;
pub mod config;
pub mod error;
pub mod infrastructure;

pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use clients::{CompletionProvider, OpenAiProvider};
pub use config::Config;
pub use error::{AppResult, GenerationError, WorksheetError};
pub use infrastructure::{DocumentRenderer, FileStore, KeyValueStore, MemoryStore};
pub use models::{Worksheet, WorksheetConfig, WorksheetHistory, WorksheetQuestion, WorksheetRequest};
pub use orchestrator::App;
pub use services::HistoryStore;
pub use workflow::WorksheetGenerator;
