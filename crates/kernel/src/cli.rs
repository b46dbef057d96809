//! Command line front end over the host state.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use atrium_media::tree::{FolderTree, check_forest};
use atrium_media::{FileUpdate, Folder, FolderUpdate, NewFolder, Upload};
use atrium_sdk::menu::MenuNode;
use clap::{Args, Parser, Subcommand};
use serde::Serialize;

use crate::menu::ADMIN_MENU;
use crate::state::AppState;

/// Atrium admin host.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Print results as JSON.
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print a composed navigation menu.
    Menu {
        /// Menu name.
        #[arg(long, default_value = ADMIN_MENU)]
        name: String,
    },
    /// List registered routes.
    Routes,
    /// Resolve a path against the route table.
    Route { path: String },
    /// Manage media files.
    #[command(subcommand)]
    Files(FileCommand),
    /// Manage media folders.
    #[command(subcommand)]
    Folders(FolderCommand),
}

#[derive(Subcommand, Debug)]
pub enum FileCommand {
    /// List files, optionally in one folder.
    List {
        #[arg(long)]
        folder: Option<i64>,
    },
    /// Show one file.
    Get { id: i64 },
    /// Upload a local file.
    Upload {
        path: PathBuf,
        #[arg(long)]
        folder: Option<i64>,
        #[arg(long)]
        description: Option<String>,
    },
    /// Change a file's name, folder or description.
    Update {
        id: i64,
        #[arg(long)]
        name: Option<String>,
        #[command(flatten)]
        placement: FilePlacement,
        #[arg(long)]
        description: Option<String>,
    },
    /// Delete a file.
    Delete { id: i64 },
}

#[derive(Args, Debug)]
#[group(multiple = false)]
pub struct FilePlacement {
    /// Move into this folder.
    #[arg(long)]
    folder: Option<i64>,
    /// Remove from its folder.
    #[arg(long)]
    unfile: bool,
}

#[derive(Subcommand, Debug)]
pub enum FolderCommand {
    /// List folders, optionally the children of one folder.
    List {
        #[arg(long)]
        parent: Option<i64>,
    },
    /// Show one folder.
    Get { id: i64 },
    /// Create a folder.
    Create {
        name: String,
        #[arg(long)]
        parent: Option<i64>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        path: Option<String>,
    },
    /// Change a folder's fields.
    Update {
        id: i64,
        #[arg(long)]
        name: Option<String>,
        #[command(flatten)]
        placement: FolderPlacement,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        path: Option<String>,
    },
    /// Delete a folder.
    Delete { id: i64 },
    /// Print the whole folder hierarchy.
    Tree,
}

#[derive(Args, Debug)]
#[group(multiple = false)]
pub struct FolderPlacement {
    /// Move under this folder.
    #[arg(long)]
    parent: Option<i64>,
    /// Move to the root level.
    #[arg(long)]
    root: bool,
}

fn placement(target: Option<i64>, detach: bool) -> Option<Option<i64>> {
    match (target, detach) {
        (Some(id), _) => Some(Some(id)),
        (None, true) => Some(None),
        (None, false) => None,
    }
}

/// Run one command against `state`, writing results to `out`.
pub async fn run(state: &AppState, cli: Cli, out: &mut impl Write) -> Result<()> {
    let json = cli.json;
    match cli.command {
        Command::Menu { name } => {
            let menu = state.build_menu(&name);
            if json {
                emit_json(out, &menu)?;
            } else {
                write_menu(out, &menu, 0)?;
            }
        }
        Command::Routes => {
            for (plugin, route) in state.routes().all() {
                let auth = if route.requires_auth { "auth" } else { "public" };
                writeln!(
                    out,
                    "{:<24} {:<18} {:<18} {auth} ({plugin})",
                    route.path, route.name, route.view
                )?;
            }
        }
        Command::Route { path } => match state.routes().match_path(&path) {
            Some(hit) => writeln!(out, "{path} -> {} ({})", hit.route.name, hit.route.view)?,
            None => bail!("no route matches '{path}'"),
        },
        Command::Files(cmd) => run_files(state, cmd, json, out).await?,
        Command::Folders(cmd) => run_folders(state, cmd, json, out).await?,
    }
    Ok(())
}

async fn run_files(
    state: &AppState,
    cmd: FileCommand,
    json: bool,
    out: &mut impl Write,
) -> Result<()> {
    let files = state.media().files();
    match cmd {
        FileCommand::List { folder } => {
            let list = files.list(folder).await.context("failed to list files")?;
            if json {
                return emit_json(out, &list);
            }
            for file in &list {
                writeln!(
                    out,
                    "{:>6}  {:<32} {:<24} {:>10}",
                    fmt_id(file.id),
                    file.name,
                    file.mime_type,
                    file.size
                )?;
            }
        }
        FileCommand::Get { id } => {
            let file = files.get(id).await.context("failed to fetch file")?;
            emit_json(out, &file)?;
        }
        FileCommand::Upload {
            path,
            folder,
            description,
        } => {
            let bytes = tokio::fs::read(&path)
                .await
                .with_context(|| format!("failed to read {}", path.display()))?;
            let filename = path
                .file_name()
                .and_then(|n| n.to_str())
                .context("upload path has no usable file name")?
                .to_string();
            let mime_type = infer::get(&bytes)
                .map(|kind| kind.mime_type())
                .unwrap_or("application/octet-stream");

            let upload = Upload {
                filename,
                mime_type: mime_type.to_string(),
                bytes,
                folder_id: folder,
                description,
            };
            let file = files.upload(upload).await.context("upload failed")?;
            writeln!(out, "uploaded {} as #{}", file.filename, fmt_id(file.id))?;
        }
        FileCommand::Update {
            id,
            name,
            placement: FilePlacement { folder, unfile },
            description,
        } => {
            let update = FileUpdate {
                name,
                folder_id: placement(folder, unfile),
                description,
            };
            if update.is_empty() {
                bail!("nothing to update");
            }
            let file = files.update(id, &update).await.context("failed to update file")?;
            emit_json(out, &file)?;
        }
        FileCommand::Delete { id } => {
            files.delete(id).await.context("failed to delete file")?;
            writeln!(out, "deleted file #{id}")?;
        }
    }
    Ok(())
}

async fn run_folders(
    state: &AppState,
    cmd: FolderCommand,
    json: bool,
    out: &mut impl Write,
) -> Result<()> {
    let folders = state.media().folders();
    match cmd {
        FolderCommand::List { parent } => {
            let list = folders.list(parent).await.context("failed to list folders")?;
            if json {
                return emit_json(out, &list);
            }
            for folder in &list {
                writeln!(out, "{:>6}  {}", fmt_id(folder.id), folder.name)?;
            }
        }
        FolderCommand::Get { id } => {
            let folder = folders.get(id).await.context("failed to fetch folder")?;
            emit_json(out, &folder)?;
        }
        FolderCommand::Create {
            name,
            parent,
            description,
            path,
        } => {
            let new = NewFolder {
                name,
                description,
                parent_id: parent,
                path,
            };
            let folder = folders.create(&new).await.context("failed to create folder")?;
            writeln!(out, "created folder {} as #{}", folder.name, fmt_id(folder.id))?;
        }
        FolderCommand::Update {
            id,
            name,
            placement: FolderPlacement { parent, root },
            description,
            path,
        } => {
            let update = FolderUpdate {
                name,
                description,
                parent_id: placement(parent, root),
                path,
            };
            if update.is_empty() {
                bail!("nothing to update");
            }
            let folder = folders
                .update(id, &update)
                .await
                .context("failed to update folder")?;
            emit_json(out, &folder)?;
        }
        FolderCommand::Delete { id } => {
            folders.delete(id).await.context("failed to delete folder")?;
            writeln!(out, "deleted folder #{id}")?;
        }
        FolderCommand::Tree => {
            let all = folders.list(None).await.context("failed to list folders")?;
            check_forest(&all).context("folder hierarchy is inconsistent")?;
            if json {
                return emit_json(out, &all);
            }
            let tree = FolderTree::new(&all);
            for root in tree.roots() {
                write_folder(out, &tree, root, 0)?;
            }
        }
    }
    Ok(())
}

fn fmt_id(id: Option<i64>) -> String {
    id.map(|id| id.to_string()).unwrap_or_else(|| "-".to_string())
}

fn emit_json<T: Serialize>(out: &mut impl Write, value: &T) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, value).context("failed to encode JSON")?;
    writeln!(out)?;
    Ok(())
}

fn write_menu(out: &mut impl Write, node: &MenuNode, depth: usize) -> Result<()> {
    let order = node
        .order
        .map(|o| o.to_string())
        .unwrap_or_else(|| "-".to_string());
    writeln!(
        out,
        "{:indent$}{} [{}] {} (order {order})",
        "",
        node.title,
        node.id,
        node.path,
        indent = depth * 2
    )?;
    for child in &node.children {
        write_menu(out, child, depth + 1)?;
    }
    Ok(())
}

fn write_folder(
    out: &mut impl Write,
    tree: &FolderTree<'_>,
    folder: &Folder,
    depth: usize,
) -> Result<()> {
    let path = folder
        .id
        .and_then(|id| tree.materialized_path(id))
        .unwrap_or_else(|| folder.name.clone());
    writeln!(out, "{:indent$}{}  {path}", "", folder.name, indent = depth * 2)?;
    if let Some(id) = folder.id {
        for child in tree.children_of(Some(id)) {
            write_folder(out, tree, child, depth + 1)?;
        }
    }
    Ok(())
}
