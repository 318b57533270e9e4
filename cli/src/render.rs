use taskdesk_core::api::{Comment, QueryPage, Task};

const TITLE_WIDTH: usize = 32;
const BODY_WIDTH: usize = 44;

pub const NO_RESULTS: &str = "No results found";
pub const TASKS_ERROR: &str = "Error loading tasks";
pub const COMMENTS_ERROR: &str = "Error loading comments";

fn truncate(s: &str, width: usize) -> String {
    let flat: String = s
        .chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect();
    if flat.chars().count() <= width {
        return flat;
    }
    let mut out: String = flat.chars().take(width.saturating_sub(3)).collect();
    out.push_str("...");
    out
}

fn row(id: &str, title: &str, body: &str, status: &str) -> String {
    format!(
        "{:>5}  {:<tw$}  {:<bw$}  {}",
        id,
        title,
        body,
        status,
        tw = TITLE_WIDTH,
        bw = BODY_WIDTH
    )
}

/// Table, then the pager footer.
pub fn render_page(page: &QueryPage<'_, Task>, per_page: usize) -> String {
    let mut lines = vec![row("ID", "Title", "Description", "Status")];
    if page.is_empty() {
        lines.push(NO_RESULTS.to_string());
    } else {
        lines.extend(page.items.iter().map(|t| {
            row(
                &t.id.to_string(),
                &truncate(&t.title, TITLE_WIDTH),
                &truncate(&t.body, BODY_WIDTH),
                t.status.label(),
            )
        }));
    }

    lines.push(String::new());
    lines.push(format!("{}  (rows per page: {})", page.summary(), per_page));
    if page.total_pages > 1 {
        lines.push(format!("Page {} of {}", page.current_page, page.total_pages));
    }
    lines.join("\n")
}

pub fn render_task(task: &Task) -> String {
    format!(
        "#{} [{}] {}\n\n{}\n",
        task.id,
        task.status.label(),
        task.title,
        task.body
    )
}

pub fn render_comments(comments: &[Comment]) -> String {
    if comments.is_empty() {
        return "No comments".to_string();
    }
    let mut out = format!("Comments ({})", comments.len());
    for c in comments {
        out.push_str(&format!("\n\n- {} <{}>\n  {}", c.name, c.email, c.body.replace('\n', "\n  ")));
    }
    out
}
