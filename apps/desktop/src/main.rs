use anyhow::{Context, Result};
use clap::{builder::NonEmptyStringValueParser, Parser};
use client_core::{load_settings, SessionController};
use shared::{domain::Employee, error::ApiException};
use tracing_subscriber::EnvFilter;

/// Signs in to the employee directory and prints the list once.
#[derive(Parser, Debug)]
struct Args {
    /// Overrides `api_base_url` from client.toml and the environment.
    #[arg(long)]
    api_base_url: Option<String>,
    #[arg(long, value_parser = NonEmptyStringValueParser::new())]
    username: String,
    #[arg(long, env = "EMPLOYEE_PASSWORD", hide_env_values = true, value_parser = NonEmptyStringValueParser::new())]
    password: String,
    /// Print records as JSON instead of a table.
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    let mut settings = load_settings();
    if let Some(url) = args.api_base_url {
        settings.api_base_url = url;
    }
    let controller =
        SessionController::from_settings(&settings).context("invalid client configuration")?;

    let snapshot = controller.login(&args.username, &args.password).await?;
    if let Some(err) = snapshot.error {
        return Err(ApiException::new(err.code, err.message).into());
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&snapshot.records)?);
    } else {
        print!("{}", render_table(&snapshot.records));
    }

    controller.logout().await;
    Ok(())
}

const HEADERS: [&str; 4] = ["ID", "Name", "Department", "Email"];

fn render_table(records: &[Employee]) -> String {
    let rows: Vec<[String; 4]> = records
        .iter()
        .map(|e| {
            [
                e.id.0.to_string(),
                e.name.clone(),
                e.department.clone(),
                e.email.clone(),
            ]
        })
        .collect();

    let mut widths = HEADERS.map(|h| h.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_row(&mut out, &HEADERS.map(str::to_string), &widths);
    push_row(&mut out, &widths.map(|w| "-".repeat(w)), &widths);
    for row in &rows {
        push_row(&mut out, row, &widths);
    }
    if rows.is_empty() {
        out.push_str("(no employees)\n");
    }
    out
}

fn push_row(out: &mut String, cells: &[String; 4], widths: &[usize; 4]) {
    let line = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| {
            let pad = width.saturating_sub(cell.chars().count());
            format!("{cell}{}", " ".repeat(pad))
        })
        .collect::<Vec<_>>()
        .join("  ");
    out.push_str(line.trim_end());
    out.push('\n');
}
