//! 练习单渲染 - 业务能力层
//!
//! 纯函数：把练习单变成纯文本 / HTML，不访问网络和存储

use crate::models::Worksheet;

/// 导出文档的默认页眉颜色
pub const DEFAULT_HEADER_COLOR: &str = "#4CAF50";

/// 导出文档选项
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentOptions {
    pub header_color: String,
    /// 页脚文字，为空时使用 "Generated on {创建日期}"
    pub footer_text: Option<String>,
}

impl Default for DocumentOptions {
    fn default() -> Self {
        Self {
            header_color: DEFAULT_HEADER_COLOR.to_string(),
            footer_text: None,
        }
    }
}

/// 纯文本格式
///
/// ```text
/// 1. What is 2 + 2?
/// Answer: 4
/// Explanation: 2 + 2 = 4
///
/// 2. ...
/// ```
pub fn to_plain_text(worksheet: &Worksheet, include_answers: bool) -> String {
    worksheet
        .questions
        .iter()
        .enumerate()
        .map(|(index, q)| {
            let mut lines = vec![format!("{}. {}", index + 1, q.question)];
            if include_answers {
                lines.push(format!("Answer: {}", q.answer.as_deref().unwrap_or_default()));
                if let Some(explanation) = non_empty(q.explanation.as_deref()) {
                    lines.push(format!("Explanation: {}", explanation));
                }
            }
            lines.join("\n")
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// HTML 片段格式，每一行包在 `<p>` 中
pub fn to_html(worksheet: &Worksheet, include_answers: bool) -> String {
    worksheet
        .questions
        .iter()
        .enumerate()
        .map(|(index, q)| {
            let mut lines = vec![format!("<p>{}. {}</p>", index + 1, escape_html(&q.question))];
            if include_answers {
                lines.push(format!(
                    "<p>Answer: {}</p>",
                    escape_html(q.answer.as_deref().unwrap_or_default())
                ));
                if let Some(explanation) = non_empty(q.explanation.as_deref()) {
                    lines.push(format!("<p>Explanation: {}</p>", escape_html(explanation)));
                }
            }
            lines.join("\n")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// 完整的导出文档：带颜色的页眉（标题）、内容、页脚（生成日期）
pub fn render_document(worksheet: &Worksheet, include_answers: bool, options: &DocumentOptions) -> String {
    let footer = options.footer_text.clone().unwrap_or_else(|| {
        format!("Generated on {}", worksheet.created_at.format("%Y-%m-%d"))
    });

    format!(
        r#"<!DOCTYPE html>
<html>
  <head>
    <meta charset="utf-8" />
    <meta name="viewport" content="width=device-width, initial-scale=1.0" />
    <title>{title}</title>
    <style>
      body {{ font-family: Arial, sans-serif; margin: 0; padding: 20px; }}
      .header {{ background-color: {color}; color: white; padding: 10px; text-align: center; margin-bottom: 20px; }}
      .content {{ line-height: 1.6; font-size: 14px; }}
      .footer {{ margin-top: 30px; text-align: center; font-size: 12px; color: #666; }}
    </style>
  </head>
  <body>
    <div class="header">
      <h1>{title}</h1>
    </div>
    <div class="content">
{content}
    </div>
    <div class="footer">
      {footer}
    </div>
  </body>
</html>
"#,
        title = escape_html(&worksheet.title),
        color = escape_html(&options.header_color),
        content = to_html(worksheet, include_answers),
        footer = escape_html(&footer),
    )
}

fn non_empty(text: Option<&str>) -> Option<&str> {
    text.filter(|t| !t.trim().is_empty())
}

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
