use crate::output::{print_json, print_table};
use anyhow::Context;
use clap::{ArgGroup, Subcommand};
use insight_core::paths;
use std::path::{Path, PathBuf};

#[derive(Subcommand)]
pub enum ArtifactSubcommand {
    /// Store (or overwrite) an artifact
    #[command(group(ArgGroup::new("source").required(true).args(["content", "file"])))]
    Add {
        /// Artifact key, conventionally `<phase>/<name>` (e.g. concept/brief.md)
        path: String,
        /// Inline content
        #[arg(long)]
        content: Option<String>,
        /// Read content from a file
        #[arg(long)]
        file: Option<PathBuf>,
    },
    /// Print an artifact's content
    Get { path: String },
    /// List stored artifacts
    List,
}

pub fn run(root: &Path, subcmd: ArtifactSubcommand, json: bool) -> anyhow::Result<()> {
    match subcmd {
        ArtifactSubcommand::Add {
            path,
            content,
            file,
        } => {
            let content = match (content, file) {
                (Some(c), _) => c,
                (None, Some(f)) => std::fs::read_to_string(&f)
                    .with_context(|| format!("failed to read {}", f.display()))?,
                (None, None) => anyhow::bail!("one of --content or --file is required"),
            };
            add(root, &path, &content, json)
        }
        ArtifactSubcommand::Get { path } => get(root, &path, json),
        ArtifactSubcommand::List => list(root, json),
    }
}

fn add(root: &Path, path: &str, content: &str, json: bool) -> anyhow::Result<()> {
    if paths::artifact_phase(path).is_none() {
        tracing::warn!(artifact = path, "artifact key is not scoped to a phase");
    }
    let mut manager = super::open_manager(root)?;
    manager
        .add_artifact(path, content)
        .with_context(|| format!("failed to store artifact '{path}'"))?;

    if json {
        print_json(&serde_json::json!({
            "path": path,
            "bytes": content.len(),
        }))?;
    } else {
        println!("Stored {path} ({} bytes)", content.len());
    }
    Ok(())
}

fn get(root: &Path, path: &str, json: bool) -> anyhow::Result<()> {
    let manager = super::open_manager(root)?;
    let Some(content) = manager.artifact(path) else {
        if json {
            print_json(&serde_json::Value::Null)?;
        } else {
            println!("No artifact stored at {path}.");
        }
        return Ok(());
    };

    if json {
        print_json(&serde_json::json!({
            "path": path,
            "content": content,
        }))?;
    } else {
        print!("{content}");
        if !content.ends_with('\n') {
            println!();
        }
    }
    Ok(())
}

fn list(root: &Path, json: bool) -> anyhow::Result<()> {
    let manager = super::open_manager(root)?;
    let store = manager.store();

    if json {
        let items: Vec<_> = store
            .artifact_paths()
            .map(|p| {
                serde_json::json!({
                    "path": p,
                    "phase": paths::artifact_phase(p),
                    "bytes": store.artifact(p).map(str::len).unwrap_or(0),
                })
            })
            .collect();
        print_json(&items)?;
        return Ok(());
    }

    let rows: Vec<Vec<String>> = store
        .artifact_paths()
        .map(|p| {
            vec![
                p.to_string(),
                paths::artifact_phase(p)
                    .map(|ph| ph.to_string())
                    .unwrap_or_else(|| "-".to_string()),
                store.artifact(p).map(str::len).unwrap_or(0).to_string(),
            ]
        })
        .collect();
    if rows.is_empty() {
        println!("No artifacts stored.");
        return Ok(());
    }
    print_table(&["PATH", "PHASE", "BYTES"], rows);
    Ok(())
}
