//! Command dispatch: one session per invocation, one command per session

use std::io;
use std::path::{Path, PathBuf};

use clap::CommandFactory;
use clap_complete::generate;
use tracing::{debug, instrument};

use crate::application::services::{CommandReport, ConfigManager, Outcome, Session};
use crate::cli::args::{Cli, Commands, ConfigCommands, FolderCommands, TabCommands};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::cli::render::ToTree;
use crate::config::{global_config_path, local_config_path, Settings};
use crate::domain::tree::{count_items, find_item};
use crate::domain::{BookmarkDraft, ContainerId, DropLocation, GridSize, Item, Skip};
use crate::infrastructure::di::ServiceContainer;
use crate::infrastructure::InfraError;

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let Some(command) = &cli.command else {
        return Ok(());
    };

    // commands that need no stored document
    match command {
        Commands::Completion { shell } => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(*shell, &mut cmd, name, &mut io::stdout());
            return Ok(());
        }
        Commands::Config { command } => return _config(command, cli.dir.as_deref()),
        _ => {}
    }

    let settings = Settings::load(cli.dir.as_deref())?;
    let container = ServiceContainer::new(settings);
    let mut session = container.open_session(cli.tab.as_deref())?;

    match command {
        Commands::Show { folder } => _show(&mut session, folder.as_deref()),
        Commands::Add {
            title,
            url,
            folder,
            icon,
            color,
        } => {
            let mut draft = BookmarkDraft::new(title.as_str(), url.as_str());
            draft.icon = icon.clone().unwrap_or_default();
            draft.background_color = color.clone().unwrap_or_default();
            let target = folder.clone().map(ContainerId::Folder);
            let report = session.add_item(target, draft);
            finish(&mut session, "Added", title, report)
        }
        Commands::Rm { id } => {
            let report = session.delete_item(id);
            finish(&mut session, "Deleted", id, report)
        }
        Commands::Update {
            id,
            title,
            url,
            name,
            size,
        } => _update(&mut session, id, title, url, name, *size),
        Commands::Folder { command } => match command {
            FolderCommands::Create { name, size } => {
                let report = session.create_folder(name, *size);
                finish(&mut session, "Created folder", name, report)
            }
            FolderCommands::Rm { id } => {
                let report = session.delete_folder(id);
                finish(&mut session, "Deleted folder", id, report)
            }
        },
        Commands::Move { id, to, index } => _move(&mut session, id, to, *index),
        Commands::Search { query } => {
            for item in session.filter(query) {
                output::info(&item.to_tree());
            }
            Ok(())
        }
        Commands::Tab { command } => _tab(&mut session, command),
        Commands::Export { file } => _export(&container, &session, file.as_deref()),
        Commands::Import { file } => _import(&container, &mut session, file),
        Commands::Reset => {
            let report = session.reset();
            finish(&mut session, "Reset", container.settings.storage_key.as_str(), report)
        }
        Commands::Completion { .. } | Commands::Config { .. } => Ok(()),
    }
}

/// Report a command's outcome. A failed save is retried once before giving up.
fn finish(
    session: &mut Session,
    label: &str,
    subject: &str,
    report: CommandReport,
) -> CliResult<()> {
    match report.outcome {
        Outcome::Applied => {
            if let Some(e) = report.save_error {
                output::warning(&e);
                session.flush()?;
            }
            output::action(label, subject);
            Ok(())
        }
        Outcome::Unchanged(skip @ (Skip::SamePosition | Skip::Cancelled)) => {
            output::warning(&skip);
            Ok(())
        }
        Outcome::Unchanged(skip) => Err(CliError::Rejected(skip)),
    }
}

#[instrument(skip(session))]
fn _show(session: &mut Session, folder: Option<&str>) -> CliResult<()> {
    if let Some(folder_id) = folder {
        session.open_folder(folder_id).map_err(CliError::Rejected)?;
    }
    match (session.current_folder(), session.active_tab()) {
        (Some(folder), _) => output::info(&folder.to_tree()),
        (None, Some(tab)) => output::info(&tab.to_tree()),
        (None, None) => output::warning("no tab to show"),
    }
    Ok(())
}

#[instrument(skip(session))]
fn _update(
    session: &mut Session,
    id: &str,
    title: &Option<String>,
    url: &Option<String>,
    name: &Option<String>,
    size: Option<GridSize>,
) -> CliResult<()> {
    let current = find_item(session.items(), id)
        .ok_or_else(|| CliError::Rejected(Skip::NotFound(format!("item not found: {}", id))))?;

    let updated = match current {
        Item::Bookmark(mut b) => {
            if name.is_some() || size.is_some() {
                return Err(CliError::InvalidArgs(
                    "--name and --size apply to folders".into(),
                ));
            }
            if let Some(title) = title {
                b.title = title.trim().to_string();
            }
            if let Some(url) = url {
                b.url = url.trim().to_string();
            }
            Item::Bookmark(b)
        }
        Item::Folder(mut f) => {
            if title.is_some() || url.is_some() {
                return Err(CliError::InvalidArgs(
                    "--title and --url apply to bookmarks".into(),
                ));
            }
            if let Some(name) = name {
                f.name = name.trim().to_string();
            }
            if let Some(size) = size {
                f.size = size;
            }
            Item::Folder(f)
        }
    };

    let report = session.update_item(updated);
    finish(session, "Updated", id, report)
}

#[instrument(skip(session))]
fn _move(session: &mut Session, id: &str, to: &str, index: usize) -> CliResult<()> {
    to.parse::<ContainerId>()
        .map_err(|e| CliError::InvalidArgs(e.to_string()))?;
    let event = session
        .drag_end_for(id, DropLocation::new(to, index))
        .ok_or_else(|| CliError::Rejected(Skip::NotFound(format!("item not found: {}", id))))?;
    debug!("_move: {:?}", event);

    let report = session.move_item(&event);
    finish(session, "Moved", &format!("{} -> {}[{}]", id, to, index), report)
}

fn _tab(session: &mut Session, command: &TabCommands) -> CliResult<()> {
    match command {
        TabCommands::List => {
            let active = session.active_tab_id().to_string();
            for tab in session.tabs() {
                let marker = if tab.id == active { "*" } else { " " };
                output::info(&format!(
                    "{} {} [{}] ({} items)",
                    marker,
                    tab.name,
                    tab.id,
                    count_items(&tab.children)
                ));
            }
            Ok(())
        }
        TabCommands::Add { name, icon } => {
            let report = session.add_tab(name, icon);
            finish(session, "Added tab", name, report)
        }
        TabCommands::Rm { id } => {
            let report = session.delete_tab(id);
            finish(session, "Deleted tab", id, report)
        }
    }
}

#[instrument(skip(container, session))]
fn _export(container: &ServiceContainer, session: &Session, file: Option<&Path>) -> CliResult<()> {
    let path = file.map(Path::to_path_buf).unwrap_or_else(|| {
        PathBuf::from(ConfigManager::export_file_name(
            chrono::Local::now().date_naive(),
        ))
    });
    let json = session.export()?;
    container
        .fs
        .write(&path, &json)
        .map_err(|e| InfraError::io_at("write export", &path, e))?;
    output::success(&format!("Exported to {}", path.display()));
    Ok(())
}

#[instrument(skip(container, session))]
fn _import(container: &ServiceContainer, session: &mut Session, file: &Path) -> CliResult<()> {
    let json = container
        .fs
        .read_to_string(file)
        .map_err(|e| InfraError::io_at("read import", file, e))?;
    let report = session.import(&json)?;
    finish(session, "Imported", &file.display().to_string(), report)
}

fn _config(command: &ConfigCommands, dir: Option<&Path>) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            let settings = Settings::load(dir)?;
            output::info(&settings.to_toml()?);
        }
        ConfigCommands::Path => {
            output::header("Config files");
            match global_config_path() {
                Some(path) => output::detail(&format!("global: {}", path.display())),
                None => output::detail("global: <no config directory>"),
            }
            if let Some(dir) = dir {
                output::detail(&format!("local:  {}", local_config_path(dir).display()));
            }
        }
        ConfigCommands::Template => output::info(&Settings::template()),
    }
    Ok(())
}
