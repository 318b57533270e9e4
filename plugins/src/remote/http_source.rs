use async_trait::async_trait;
use serde_json::Value;
use taskdesk_core::api::{Comment, FetchError, Task, TaskSource};
use taskdesk_core::model::{parse_comments_value, parse_tasks_value};

const BODY_PREVIEW_LIMIT: usize = 512;

fn preview_body(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return "<empty body>".to_string();
    }

    let mut out: String = trimmed.chars().take(BODY_PREVIEW_LIMIT).collect();
    if trimmed.chars().nth(BODY_PREVIEW_LIMIT).is_some() {
        out.push_str("...");
    }
    out
}

fn transport_kind(err: &reqwest::Error) -> &'static str {
    if err.is_timeout() {
        "timeout"
    } else if err.is_connect() {
        "connect"
    } else if err.is_request() {
        "request"
    } else if err.is_body() {
        "body"
    } else if err.is_decode() {
        "decode"
    } else {
        "unknown"
    }
}

fn from_reqwest(err: reqwest::Error, url: &str) -> FetchError {
    FetchError::Transport {
        kind: transport_kind(&err),
        url: url.to_string(),
        message: err.to_string(),
    }
}

/// Reads a JSON body, turning non-2xx statuses and undecodable bodies into errors.
async fn parse_json_response(resp: reqwest::Response) -> Result<Value, FetchError> {
    let status = resp.status();
    let url = resp.url().to_string();
    let body = resp.text().await.map_err(|err| from_reqwest(err, &url))?;

    if !status.is_success() {
        return Err(FetchError::Status {
            status: status.as_u16(),
            url,
            preview: preview_body(&body),
        });
    }

    serde_json::from_str::<Value>(&body).map_err(|err| FetchError::Transport {
        kind: "decode",
        url,
        message: format!("failed to decode response body: {} | body={}", err, preview_body(&body)),
    })
}

/// Remote task source speaking plain JSON over HTTP GET.
#[derive(Clone)]
pub struct HttpTaskSource {
    http: reqwest::Client,
    url_tasks: String,
    url_comments: String,
}

impl HttpTaskSource {
    pub fn new(
        base_url: &str,
        tasks_path: &str,
        comments_path: &str,
        timeout_ms: u64,
    ) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_millis(timeout_ms))
            .build()?;
        let normalized = base_url.trim_end_matches('/');
        Ok(Self {
            http,
            url_tasks: join_url(normalized, tasks_path),
            url_comments: join_url(normalized, comments_path),
        })
    }

    async fn get_json(&self, url: &str, query: &[(&str, String)]) -> Result<Value, FetchError> {
        let resp = self
            .http
            .get(url)
            .query(query)
            .header("Content-Type", "application/json")
            .send()
            .await
            .map_err(|err| from_reqwest(err, url))?;
        parse_json_response(resp).await
    }
}

fn join_url(base: &str, path: &str) -> String {
    format!("{}/{}", base, path.trim_start_matches('/'))
}

#[async_trait]
impl TaskSource for HttpTaskSource {
    fn name(&self) -> &str {
        "http"
    }

    async fn fetch_tasks(&self) -> Result<Vec<Task>, FetchError> {
        let url = &self.url_tasks;
        tracing::debug!(target: "taskdesk.remote", stage = "http.tasks.in", url = %url);
        let value = self.get_json(url, &[]).await?;
        let tasks = parse_tasks_value(value)?;
        tracing::debug!(
            target: "taskdesk.remote",
            stage = "http.tasks.out",
            count = tasks.len()
        );
        Ok(tasks)
    }

    async fn fetch_comments(&self, task_id: i64) -> Result<Vec<Comment>, FetchError> {
        let url = &self.url_comments;
        tracing::debug!(
            target: "taskdesk.remote",
            stage = "http.comments.in",
            url = %url,
            task_id
        );
        let value = self
            .get_json(url, &[("postId", task_id.to_string())])
            .await?;
        let comments = parse_comments_value(value)?;
        tracing::debug!(
            target: "taskdesk.remote",
            stage = "http.comments.out",
            task_id,
            count = comments.len()
        );
        Ok(comments)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};
    use pretty_assertions::assert_eq;
    use taskdesk_core::api::{SchemaError, TaskStatus};

    fn source(url: &str) -> HttpTaskSource {
        HttpTaskSource::new(url, "/posts", "/comments", 1_000).unwrap()
    }

    #[test]
    fn test_preview_body_empty() {
        assert_eq!(preview_body("   "), "<empty body>");
    }

    #[test]
    fn test_preview_body_truncates() {
        let body = "a".repeat(BODY_PREVIEW_LIMIT + 10);
        let preview = preview_body(&body);
        assert!(preview.ends_with("..."));
        assert_eq!(preview.len(), BODY_PREVIEW_LIMIT + 3);
    }

    #[test]
    fn test_join_url_handles_slashes() {
        assert_eq!(join_url("http://x", "/posts"), "http://x/posts");
        assert_eq!(join_url("http://x", "posts"), "http://x/posts");
    }

    #[tokio::test]
    async fn test_fetch_tasks_validates_and_defaults_status() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/posts")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"[{"userId":1,"id":1,"title":"a","body":"b"},{"userId":2,"id":2,"title":"c","body":"d","status":"completed"}]"#)
            .create_async()
            .await;

        let tasks = source(&server.url()).fetch_tasks().await.unwrap();
        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks[0].status, TaskStatus::Pending);
        assert_eq!(tasks[1].status, TaskStatus::Completed);
    }

    #[tokio::test]
    async fn test_fetch_tasks_schema_rejection() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/posts")
            .with_status(200)
            .with_body(r#"[{"userId":1,"id":"one","title":"a","body":"b"}]"#)
            .create_async()
            .await;

        let err = source(&server.url()).fetch_tasks().await.unwrap_err();
        assert!(matches!(
            err,
            FetchError::Schema(SchemaError::Record { index: 0, .. })
        ));
    }

    #[tokio::test]
    async fn test_fetch_tasks_status_error() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/posts")
            .with_status(502)
            .with_body("bad gateway")
            .create_async()
            .await;

        let err = source(&server.url()).fetch_tasks().await.unwrap_err();
        assert_eq!(err.status(), Some(502));
        let msg = err.to_string();
        assert!(msg.contains("/posts"), "{msg}");
        assert!(msg.contains("bad gateway"), "{msg}");
    }

    #[tokio::test]
    async fn test_fetch_tasks_decode_error() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/posts")
            .with_status(200)
            .with_body("not json")
            .create_async()
            .await;

        let err = source(&server.url()).fetch_tasks().await.unwrap_err();
        assert!(matches!(err, FetchError::Transport { kind: "decode", .. }));
    }

    #[tokio::test]
    async fn test_fetch_comments_passes_post_id() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/comments")
            .match_query(Matcher::UrlEncoded("postId".into(), "7".into()))
            .with_status(200)
            .with_body(r#"[{"postId":7,"id":31,"name":"n","email":"e@x.io","body":"nice"}]"#)
            .create_async()
            .await;

        let comments = source(&server.url()).fetch_comments(7).await.unwrap();
        assert_eq!(comments.len(), 1);
        assert_eq!(comments[0].post_id, 7);
        assert_eq!(comments[0].body, "nice");
    }

    #[tokio::test]
    async fn test_connect_error_is_transport() {
        let src = source("http://127.0.0.1:1");
        let err = src.fetch_tasks().await.unwrap_err();
        assert!(matches!(err, FetchError::Transport { .. }));
    }
}
