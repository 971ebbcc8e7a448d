// Author: Dustin Pilgrim
// License: MIT

use chrono::{DateTime, Local, Utc};

use crate::api::client::HttpApi;
use crate::cli::Command;
use crate::config::Config;
use crate::core::session::Session;
use crate::core::timefmt;
use crate::sync::SessionSync;

pub async fn run(cmd: Command, cfg: Config) -> eyre::Result<()> {
    let api = HttpApi::new(&cfg.server, cfg.token.clone())
        .map_err(|e| eyre::eyre!("failed to build http client: {e}"))?;
    let mut sync = SessionSync::new(api);

    match cmd {
        Command::Projects => {
            match sync.projects().await {
                Ok(projects) if projects.is_empty() => println!("No projects."),
                Ok(projects) => {
                    for p in projects {
                        let title = p.title.as_deref().unwrap_or("(untitled)");
                        let description = p.description.as_deref().unwrap_or("");
                        let due = p
                            .end_date
                            .map(|d| format!("due {}", local(d).format("%Y-%m-%d")))
                            .unwrap_or_else(|| "no end date".to_string());
                        println!("{:<12} {:<24} {:<14} {description}", p.id, title, due);
                    }
                }
                Err(e) => eprintln!("tempo: {e}"),
            }
            Ok(())
        }

        Command::Sessions => {
            match sync.refresh().await {
                Ok(snap) => {
                    if snap.inconsistent {
                        eprintln!("tempo: warning: server reported several open sessions");
                    }

                    if snap.sessions.is_empty() {
                        println!("No sessions recorded.");
                        return Ok(());
                    }

                    let now = Utc::now();
                    println!(
                        "{:<24} {:<20} {:<20} {:>10}  {}",
                        "PROJECT", "STARTED", "ENDED", "DURATION", "DESCRIPTION"
                    );
                    for s in &snap.sessions {
                        println!(
                            "{:<24} {:<20} {:<20} {:>10}  {}",
                            s.project_title(),
                            s.start_time
                                .map(fmt_local)
                                .unwrap_or_else(|| timefmt::NO_START.to_string()),
                            s.end_time
                                .map(fmt_local)
                                .unwrap_or_else(|| "running".to_string()),
                            timefmt::format_elapsed(s.start_time, s.end_time, now),
                            s.project_description(),
                        );
                    }
                }
                Err(e) => eprintln!("tempo: {e}"),
            }
            Ok(())
        }

        Command::Status => {
            match sync.refresh().await {
                Ok(snap) => {
                    if snap.inconsistent {
                        eprintln!("tempo: warning: server reported several open sessions");
                    }

                    match snap.active {
                        Some(s) => print_active(&s),
                        None => println!("No session running."),
                    }
                }
                Err(e) => eprintln!("tempo: {e}"),
            }
            Ok(())
        }

        Command::Start { project } => {
            match sync.start(&project).await {
                Ok(s) => {
                    println!("Session started.");
                    print_active(&s);
                }
                Err(e) => eprintln!("tempo: {e}"),
            }
            Ok(())
        }

        Command::Stop => {
            // The stop target comes from the tracked active session, so sync
            // with server truth first.
            if let Err(e) = sync.refresh().await {
                eprintln!("tempo: {e}");
                return Ok(());
            }

            match sync.stop().await {
                Ok(s) => {
                    let elapsed = timefmt::format_elapsed(s.start_time, s.end_time, Utc::now());
                    println!("Session stopped after {elapsed}.");
                }
                Err(e) => eprintln!("tempo: {e}"),
            }
            Ok(())
        }

        Command::Watch => crate::app::watch_mode::run(cfg).await,
    }
}

fn print_active(s: &Session) {
    let elapsed = timefmt::format_elapsed(s.start_time, None, Utc::now());
    let since = s
        .start_time
        .map(fmt_local)
        .unwrap_or_else(|| timefmt::NO_START.to_string());
    println!("{:<24} started {since}  elapsed {elapsed}", s.project_title());
}

fn local(t: DateTime<Utc>) -> DateTime<Local> {
    t.with_timezone(&Local)
}

fn fmt_local(t: DateTime<Utc>) -> String {
    local(t).format("%Y-%m-%d %H:%M:%S").to_string()
}
