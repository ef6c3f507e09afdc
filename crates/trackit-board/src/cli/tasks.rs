/*
[INPUT]:  Signed-in session, task intents from CLI arguments
[OUTPUT]: Rendered task views and printed notifications
[POS]:    CLI task commands - front end over Board/SyncController
[UPDATE]: When task commands or the live board loop change
*/

use anyhow::{Context, Result, bail};
use console::{Term, style};
use dialoguer::{Select, theme::ColorfulTheme};
use std::process::ExitCode;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio_util::sync::CancellationToken;
use tracing::info;

use trackit_board::{
    Board, BoardConfig, ChannelNotifier, Filter, Notification, RefreshOutcome, SessionContext,
    SyncController, lifecycle, render,
};
use trackit_client::{AuthManager, TaskDraft, TaskPatch, TaskStatus, TrackitClient};

use super::{drain_notifications, print_notification, require_session};

type CliBoard = Board<TrackitClient, ChannelNotifier>;

type Opened = (SessionContext, CliBoard, UnboundedReceiver<Notification>);

/// Confirm the session, then build a board whose notifications land on a channel.
async fn open_board(auth: &AuthManager, config: Option<&BoardConfig>) -> Result<Opened> {
    let session = require_session(auth).await?;
    let (notifier, rx) = ChannelNotifier::channel();
    let gateway = auth.client().clone();
    let controller = match config {
        Some(config) => SyncController::with_poll_interval(gateway, notifier, config.poll_interval()),
        None => SyncController::new(gateway, notifier),
    };
    Ok((session, Board::new(controller), rx))
}

fn exit_code<T, E>(result: &Result<T, E>) -> ExitCode {
    if result.is_ok() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

pub async fn list(auth: &AuthManager, filter: Filter, json: bool) -> Result<ExitCode> {
    let (_, mut board, mut notifications) = open_board(auth, None).await?;
    board.set_filter(filter);

    if board.refresh().await == RefreshOutcome::Failed {
        drain_notifications(&mut notifications);
        return Ok(ExitCode::FAILURE);
    }

    let tasks = board.filtered_tasks();
    let stats = board.statistics();
    if json {
        let body = serde_json::json!({
            "filter": filter.to_string(),
            "tasks": tasks,
            "statistics": stats,
        });
        println!("{}", serde_json::to_string_pretty(&body).context("serialize tasks")?);
    } else {
        println!("{}", render::list(&tasks, filter));
        println!("\n{}", style(render::statistics(&stats)).dim());
    }
    Ok(ExitCode::SUCCESS)
}

pub async fn board(
    auth: &AuthManager,
    config: &BoardConfig,
    filter: Filter,
    shutdown: CancellationToken,
) -> Result<ExitCode> {
    let (session, mut board, mut notifications) = open_board(auth, Some(config)).await?;
    board.set_filter(filter);

    if !board.start(&session).await {
        bail!("task sync did not start");
    }
    let mut snapshots = board.subscribe();
    let term = Term::stdout();
    let mut last = None;
    while let Ok(notification) = notifications.try_recv() {
        last = Some(notification);
    }
    draw(&term, &board, last.as_ref())?;

    loop {
        tokio::select! {
            _ = shutdown.cancelled() => break,
            changed = snapshots.changed() => {
                if changed.is_err() {
                    break;
                }
                draw(&term, &board, last.as_ref())?;
            }
            Some(notification) = notifications.recv() => {
                last = Some(notification);
                draw(&term, &board, last.as_ref())?;
            }
        }
    }

    board.stop();
    info!("board closed");
    Ok(ExitCode::SUCCESS)
}

fn draw(term: &Term, board: &CliBoard, last: Option<&Notification>) -> Result<()> {
    term.clear_screen()?;
    println!(
        "{}  {}",
        style("TrackIt").bold().cyan(),
        style(format!("filter: {}", board.filter())).dim()
    );
    println!("{}\n", render::board(&board.columns(), &board.statistics()));
    if let Some(notification) = last {
        print_notification(notification);
    }
    println!("{}", style("Ctrl+C to quit").dim());
    Ok(())
}

pub async fn add(
    auth: &AuthManager,
    title: String,
    description: Option<String>,
    status: TaskStatus,
) -> Result<ExitCode> {
    let (_, board, mut notifications) = open_board(auth, None).await?;
    let mut draft = TaskDraft::new(title).with_status(status);
    if let Some(description) = description {
        draft = draft.with_description(description);
    }

    let result = board.create(draft).await;
    drain_notifications(&mut notifications);
    if let Ok(task) = &result {
        println!("{}", render::task_line(task));
    }
    Ok(exit_code(&result))
}

pub async fn edit(
    auth: &AuthManager,
    id: &str,
    title: Option<String>,
    description: Option<String>,
) -> Result<ExitCode> {
    let patch = TaskPatch {
        title,
        description,
        status: None,
    };
    if patch.is_empty() {
        bail!("nothing to change; pass --title or --description");
    }

    let (_, board, mut notifications) = open_board(auth, None).await?;
    let result = board.update(id, patch).await;
    drain_notifications(&mut notifications);
    Ok(exit_code(&result))
}

pub async fn move_task(auth: &AuthManager, id: &str, status: Option<String>) -> Result<ExitCode> {
    let (_, board, mut notifications) = open_board(auth, None).await?;

    let requested = match status {
        Some(status) => status,
        None => {
            if board.refresh().await == RefreshOutcome::Failed {
                drain_notifications(&mut notifications);
                return Ok(ExitCode::FAILURE);
            }
            let snapshot = board.snapshot();
            let Some(task) = snapshot.iter().find(|task| task.id == id) else {
                bail!("task {id} not found");
            };
            let targets: Vec<TaskStatus> = lifecycle::targets(task.status).collect();
            let labels: Vec<&str> = targets.iter().map(|status| status.label()).collect();
            let selection = Select::with_theme(&ColorfulTheme::default())
                .with_prompt(format!("Move \"{}\" to", task.title))
                .items(&labels)
                .default(0)
                .interact()?;
            targets[selection].as_str().to_string()
        }
    };

    let result = board.move_task(id, &requested).await;
    drain_notifications(&mut notifications);
    Ok(exit_code(&result))
}

pub async fn remove(auth: &AuthManager, id: &str) -> Result<ExitCode> {
    let (_, board, mut notifications) = open_board(auth, None).await?;
    let result = board.delete(id).await;
    drain_notifications(&mut notifications);
    Ok(exit_code(&result))
}
