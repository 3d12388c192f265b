use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::{json, Value as JsonValue};

use worksheet_generator::infrastructure::DocumentRenderer;
use worksheet_generator::models::WorksheetType;
use worksheet_generator::services::WorksheetPrompt;
use worksheet_generator::{
    App, CompletionProvider, Config, MemoryStore, OpenAiProvider, WorksheetError, WorksheetRequest,
};

/// 记录提示词并返回固定结果的 LLM
struct ScriptedProvider {
    response: JsonValue,
    calls: AtomicUsize,
    prompts: Mutex<Vec<WorksheetPrompt>>,
}

impl ScriptedProvider {
    fn new(response: JsonValue) -> Self {
        Self {
            response,
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl CompletionProvider for ScriptedProvider {
    async fn complete(&self, prompt: &WorksheetPrompt) -> anyhow::Result<JsonValue> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().unwrap().push(prompt.clone());
        Ok(self.response.clone())
    }
}

/// 只在内存中记录渲染结果
#[derive(Default)]
struct MemoryRenderer {
    documents: Mutex<Vec<(String, String)>>,
}

#[async_trait]
impl DocumentRenderer for MemoryRenderer {
    async fn render(&self, html: &str, name: &str) -> anyhow::Result<String> {
        self.documents
            .lock()
            .unwrap()
            .push((name.to_string(), html.to_string()));
        Ok(format!("memory://{}.pdf", name))
    }

    async fn share(&self, _handle: &str) -> anyhow::Result<()> {
        Ok(())
    }
}

fn addition_response() -> JsonValue {
    json!({
        "concept": "Addition",
        "questions": [{"question": "2+2?", "answer": "4"}]
    })
}

fn math_request() -> WorksheetRequest {
    WorksheetRequest {
        kind: "math".to_string(),
        subject: Some("Addition".to_string()),
        grade: "1".to_string(),
        difficulty: "easy".to_string(),
        questions_count: Some(5),
        include_answers: true,
    }
}

fn create_app(provider: Arc<ScriptedProvider>, renderer: Arc<MemoryRenderer>) -> App {
    App::with_collaborators(
        Config::default(),
        provider,
        Arc::new(MemoryStore::new()),
        renderer,
    )
}

#[tokio::test]
async fn test_generate_math_worksheet_end_to_end() {
    let provider = Arc::new(ScriptedProvider::new(addition_response()));
    let app = create_app(provider.clone(), Arc::new(MemoryRenderer::default()));

    let worksheet = app.generate(math_request()).await.unwrap();

    assert_eq!(worksheet.title, "Math Worksheet - Grade 1");
    assert_eq!(worksheet.kind, WorksheetType::Math);
    assert_eq!(worksheet.questions.len(), 1);
    assert!(!worksheet.questions[0].id.is_empty());
    assert_eq!(worksheet.questions[0].answer.as_deref(), Some("4"));

    let history = app.history().await;
    assert_eq!(history.worksheets[0].id, worksheet.id);

    // 提示词内容
    let prompts = provider.prompts.lock().unwrap();
    let messages = &prompts[0].messages;
    assert_eq!(messages.len(), 4);
    assert!(messages
        .iter()
        .any(|m| m.content.contains("5 easy level math questions for grade 1")));
    assert!(messages
        .iter()
        .any(|m| m.content.contains("Focus on subject: Addition")));

    let preview = App::preview(&worksheet);
    assert!(preview.contains("1. 2+2?"));
    assert!(preview.contains("Answer: 4"));
}

#[tokio::test]
async fn test_unsupported_type_never_calls_provider() {
    let provider = Arc::new(ScriptedProvider::new(addition_response()));
    let app = create_app(provider.clone(), Arc::new(MemoryRenderer::default()));

    let request = WorksheetRequest {
        kind: "poetry".to_string(),
        ..math_request()
    };
    let err = app.generate(request).await.unwrap_err();

    assert!(matches!(err, WorksheetError::UnsupportedWorksheetType { .. }));
    assert_eq!(provider.calls.load(Ordering::SeqCst), 0);
    assert!(app.history().await.is_empty());
}

#[tokio::test]
async fn test_show_delete_and_clear() {
    let provider = Arc::new(ScriptedProvider::new(addition_response()));
    let app = create_app(provider, Arc::new(MemoryRenderer::default()));

    let first = app.generate(math_request()).await.unwrap();
    let second = app.generate(math_request()).await.unwrap();
    assert_ne!(first.id, second.id);

    let history = app.history().await;
    let ids: Vec<_> = history.worksheets.iter().map(|w| w.id.as_str()).collect();
    assert_eq!(ids, vec![second.id.as_str(), first.id.as_str()]);

    assert_eq!(app.show(&first.id).await.unwrap(), first);

    app.delete(&first.id).await.unwrap();
    assert!(matches!(
        app.show(&first.id).await,
        Err(WorksheetError::NotFound { .. })
    ));
    // 删除不存在的 id 不报错
    app.delete("missing").await.unwrap();
    assert_eq!(app.history().await.len(), 1);

    app.clear().await.unwrap();
    assert!(app.history().await.is_empty());
}

#[tokio::test]
async fn test_export_records_pdf_handle() {
    let provider = Arc::new(ScriptedProvider::new(addition_response()));
    let renderer = Arc::new(MemoryRenderer::default());
    let app = create_app(provider, renderer.clone());

    let worksheet = app.generate(math_request()).await.unwrap();
    let handle = app.export(&worksheet.id, Some(false)).await.unwrap();

    assert!(handle.starts_with("memory://"));
    {
        let documents = renderer.documents.lock().unwrap();
        assert_eq!(documents.len(), 1);
        let html = &documents[0].1;
        assert!(html.contains("Math Worksheet - Grade 1"));
        assert!(html.contains("2+2?"));
        assert!(!html.contains("Answer: 4"));
    }

    let stored = app.show(&worksheet.id).await.unwrap();
    assert_eq!(stored.pdf_url.as_deref(), Some(handle.as_str()));
}

#[tokio::test]
async fn test_export_unknown_id_is_not_found() {
    let provider = Arc::new(ScriptedProvider::new(addition_response()));
    let renderer = Arc::new(MemoryRenderer::default());
    let app = create_app(provider, renderer.clone());

    let err = app.export("missing", None).await.unwrap_err();
    assert!(matches!(err, WorksheetError::NotFound { .. }));
    assert!(renderer.documents.lock().unwrap().is_empty());
}

/// 真实调用，需要 LLM_API_KEY
///
/// 运行方式：
/// ```bash
/// cargo test test_live_generate -- --ignored --nocapture
/// ```
#[tokio::test]
#[ignore]
async fn test_live_generate() {
    worksheet_generator::utils::logging::init(true);

    let config = Config::from_env();
    let app = App::with_collaborators(
        config.clone(),
        Arc::new(OpenAiProvider::new(&config)),
        Arc::new(MemoryStore::new()),
        Arc::new(MemoryRenderer::default()),
    );

    let worksheet = app.generate(math_request()).await.expect("生成练习单失败");
    println!("{}", App::preview(&worksheet));
    assert!(!worksheet.questions.is_empty());
}
