use super::GlobalArgs;
use crate::{
    api::{resolve_credentials, Jira},
    libs::{
        messages::Message,
        push::{build_requests, merge, PushRequest},
    },
    msg_error, msg_info, msg_print, msg_success, msg_warning,
};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct PushArgs {
    /// Show the requests instead of sending them
    #[arg(short, long)]
    preview: bool,
}

pub async fn cmd(push_args: PushArgs, global: &GlobalArgs) -> Result<()> {
    let (config, mut store) = global.load()?;
    let requests = build_requests(store.records());
    if requests.is_empty() {
        msg_info!(Message::NothingToPush);
        return Ok(());
    }

    let jira = Jira::new(&config.host, &config.time_format())?;
    let no_host = config.host.trim().is_empty();
    if no_host && !push_args.preview {
        msg_warning!(Message::PreviewNoHost);
    }
    if push_args.preview || no_host {
        return preview(&jira, &config.host, &requests);
    }

    let credentials = resolve_credentials(&config.credentials)?;
    let responses = jira.push_all(&requests, &credentials).await;
    let summary = merge(&responses, &mut store, requests.len());

    if summary.changed() {
        store.write()?;
    }
    for failure in &summary.failed {
        msg_error!(Message::PushFailed(failure.to_string()));
    }

    let message = Message::PushSummary {
        pushed: summary.pushed.len(),
        total: requests.len(),
    };
    match summary.failed.is_empty() {
        true => msg_success!(message),
        false => msg_warning!(message),
    }
    Ok(())
}

/// Prints what a push would send. Nothing leaves the machine and the data
/// file is not touched.
fn preview(jira: &Jira, host: &str, requests: &[PushRequest]) -> Result<()> {
    msg_print!(Message::PreviewHeader(host.to_string()));
    for prepared in jira.prepare_all(requests) {
        match prepared {
            Ok(prepared) => msg_print!(Message::PreviewRequest {
                url: prepared.url,
                body: serde_json::to_string_pretty(&prepared.body)?,
            }),
            Err(e) => msg_error!(Message::PushFailed(e.to_string())),
        }
    }
    msg_print!(Message::PreviewTotal(requests.len()));
    msg_print!(Message::PreviewDone);
    Ok(())
}
