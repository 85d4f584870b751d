//! Prompt composer - builds the exact request payload for one agent
//!
//! Pure functions only: given the same persona, video reference, article
//! text and prior comments, the composed payload is identical. All I/O
//! stays in the infrastructure layer.

use crate::agent::Persona;
use crate::comment::Comment;
use crate::prompt::payload::{PromptPayload, VideoRef};

/// Compose the generation request for one persona.
///
/// The instruction text layers, in order: the persona's prompt template,
/// the prior agents' comments (when any), and the task section naming the
/// video, embedding the article verbatim (when present) and pinning the
/// target count plus the JSON output contract. When the video reference
/// carries an inline binary it is attached as the payload's media part.
pub fn compose_prompt(
    persona: &Persona,
    video: &VideoRef,
    article_text: Option<&str>,
    prior_comments: &[Comment],
) -> PromptPayload {
    let mut text = String::new();
    text.push_str(&persona.prompt);
    text.push('\n');

    if !prior_comments.is_empty() {
        text.push_str(&prior_comments_section(persona, prior_comments));
    }

    text.push_str(&task_section(persona, video, article_text));

    PromptPayload {
        text,
        media: video.media.clone(),
    }
}

/// Serialized prior comments plus the instruction to react to them.
///
/// Attribution is stripped before serialization: which agent said what is
/// orchestration metadata, not generation-relevant input.
fn prior_comments_section(persona: &Persona, prior_comments: &[Comment]) -> String {
    let views: Vec<_> = prior_comments.iter().map(Comment::prompt_view).collect();
    let serialized = serde_json::to_string_pretty(&views)
        .expect("prompt comment views serialize infallibly");

    format!(
        r#"
## 💬 先行エージェントのコメント
先行するエージェントが以下のコメントを生成しました。
これらのコメントを参考に、同意したり、反論したり、あるいは全く新しい視点を加えて、あなたの役割（{name}）としてさらに面白いコメントを生成してください。

```json
{serialized}
```
"#,
        name = persona.name,
    )
}

fn task_section(persona: &Persona, video: &VideoRef, article_text: Option<&str>) -> String {
    let article_block = match article_text {
        Some(article) if !article.is_empty() => {
            format!("参考資料として以下の記事も読みました。\n\n---\n記事内容:\n{article}\n---\n\n")
        }
        _ => String::new(),
    };

    format!(
        r#"
## 📝 タスク
あなたは今から「{file_name}」というタイトルの動画を見ています。
{article_block}あなたの役割（{name}）に従って、この動画に対するNiconico風のコメントをおよそ{count}個生成してください。
出力は必ず指定されたJSON形式の配列にしてください。各要素は time（HH:MM:SS.ss形式のタイムスタンプ）と comment を必須とし、command は任意（空文字列可）です。タイムスタンプは動画のどこかの時点を想定して創造的に設定してください。
"#,
        file_name = video.file_name,
        name = persona.name,
        count = persona.target_comment_count,
    )
}
