//! 编排层（Orchestration）
//!
//! ## 层次关系
//!
//! ```text
//! orchestrator::App (每个用户操作一个方法)
//!     ↓
//! workflow::WorksheetGenerator (一张练习单的生成流程)
//!     ↓
//! services (能力层：prompt / validate / history / format / export)
//!     ↓
//! clients + infrastructure (协作方：LLM、键值存储、文档渲染)
//! ```
//!
//! ## 设计原则
//!
//! 1. **显式构造**：没有全局单例，所有服务由 App 创建并注入
//! 2. **向下依赖**：编排层 → workflow → services → infrastructure
//! 3. **无业务逻辑**：只做解析、调度和日志

pub mod app;

pub use app::App;
