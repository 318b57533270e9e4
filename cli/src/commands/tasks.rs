//! Command handlers. Each returns the text to print so it can be tested directly.

use taskdesk_core::api::{
    query, reload_tasks, sync_tasks, CliError, QueryConfig, QueryState, RefreshOutcome, Task,
    TaskForm, TaskStatus,
};

use crate::commands::cli::{AddArgs, EditArgs, IdArgs, ListArgs, StatusArgs};
use crate::render;
use crate::session::Session;

fn table_state(cfg: &QueryConfig, args: &ListArgs) -> Result<QueryState, CliError> {
    let mut state = QueryState::from_config(cfg);

    if let Some(per_page) = args.per_page {
        if !cfg.page_size_options.contains(&per_page) {
            return Err(CliError::Command(format!(
                "--per-page must be one of {:?}",
                cfg.page_size_options
            )));
        }
        state.set_items_per_page(per_page);
    }
    if !cfg.is_filter_option(&args.status) {
        let allowed: Vec<&str> = cfg.filter_options.iter().map(|o| o.value.as_str()).collect();
        return Err(CliError::Command(format!(
            "--status must be one of {}",
            allowed.join(", ")
        )));
    }
    state.set_status_filter(args.status.as_str());
    if let Some(search) = args.search.as_deref() {
        state.set_search_text(search);
    }
    Ok(state)
}

/// Merges the remote list first unless `--offline`; a failed fetch aborts the listing
/// and leaves the store as it was.
pub async fn handle_list(session: &mut Session, args: ListArgs) -> Result<String, CliError> {
    let cfg = session.cfg().table.clone();
    let mut state = table_state(&cfg, &args)?;

    let mut notes = Vec::new();
    if !args.offline {
        notes.push(handle_sync(session).await?);
    }

    let tasks = session.store().tasks();
    let total_pages = query(tasks, &cfg, &state).total_pages;
    state.go_to(args.page, total_pages);
    let page = query(tasks, &cfg, &state);

    notes.push(render::render_page(&page, state.items_per_page()));
    Ok(notes.join("\n"))
}

pub fn handle_add(session: &mut Session, args: AddArgs) -> Result<String, CliError> {
    let form = TaskForm::new(args.title, args.body).validate()?;
    let user_id = session.cfg().default_user_id;
    let task = session.store_mut().create(form.into_draft(user_id))?;
    Ok(format!("Added task #{}", task.id))
}

pub fn handle_status(session: &mut Session, args: StatusArgs) -> Result<String, CliError> {
    let status: TaskStatus = args.status.into();
    session.store_mut().update_status(args.id, status)?;
    Ok(current(session, args.id))
}

pub fn handle_edit(session: &mut Session, args: EditArgs) -> Result<String, CliError> {
    let form = TaskForm::new(args.title, args.body).validate()?;
    let existing = session.store().get(args.id).cloned();
    let task = Task {
        user_id: existing
            .as_ref()
            .map(|t| t.user_id)
            .unwrap_or(session.cfg().default_user_id),
        id: args.id,
        title: form.title().to_string(),
        body: form.body().to_string(),
        status: args
            .status
            .map(Into::into)
            .or(existing.map(|t| t.status))
            .unwrap_or_default(),
    };
    session.store_mut().update(task)?;
    Ok(current(session, args.id))
}

pub fn handle_rm(session: &mut Session, args: IdArgs) -> Result<String, CliError> {
    session.store_mut().delete(args.id)?;
    Ok(format!("{} task(s) left", session.store().len()))
}

pub async fn handle_show(session: &mut Session, args: IdArgs) -> Result<String, CliError> {
    let Some(task) = session.store().get(args.id).cloned() else {
        return Err(CliError::Command(format!("no task with id {}", args.id)));
    };
    let mut out = render::render_task(&task);
    match session.source().fetch_comments(task.id).await {
        Ok(comments) => out.push_str(&render::render_comments(&comments)),
        Err(e) => {
            tracing::warn!(
                target: "taskdesk.cli",
                stage = "show.comments_failed",
                id = task.id,
                error = %e
            );
            out.push_str(render::COMMENTS_ERROR);
        }
    }
    Ok(out)
}

pub async fn handle_sync(session: &mut Session) -> Result<String, CliError> {
    let (store, source, sequencer) = session.refresh_parts();
    let outcome = sync_tasks(store, source, sequencer).await?;
    Ok(describe(&outcome))
}

pub async fn handle_reload(session: &mut Session) -> Result<String, CliError> {
    let (store, source, sequencer) = session.refresh_parts();
    let outcome = reload_tasks(store, source, sequencer).await?;
    Ok(describe(&outcome))
}

pub fn handle_reset(session: &mut Session) -> Result<String, CliError> {
    session.store_mut().reset()?;
    Ok("All tasks removed".to_string())
}

fn describe(outcome: &RefreshOutcome) -> String {
    match outcome {
        RefreshOutcome::Merged { added } => format!("Synced: {added} new task(s)"),
        RefreshOutcome::Replaced { count } => format!("Reloaded: {count} task(s)"),
        RefreshOutcome::Stale => "Skipped: a newer refresh already applied".to_string(),
    }
}

// Lookup misses stay silent: nothing is printed for an unknown id.
fn current(session: &Session, id: i64) -> String {
    session
        .store()
        .get(id)
        .map(render::render_task)
        .unwrap_or_default()
}
