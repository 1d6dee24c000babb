use anyhow::Context;
use clap::Subcommand;
use insight_core::{render, types::Phase};
use std::path::Path;

#[derive(Subcommand)]
pub enum RenderSubcommand {
    /// Product brief from the concept context
    Brief,
    /// Requirements document from the requirements context
    Requirements,
}

pub fn run(root: &Path, subcmd: RenderSubcommand) -> anyhow::Result<()> {
    let manager = super::open_manager(root)?;
    let markdown = match subcmd {
        RenderSubcommand::Brief => {
            let ctx = manager
                .context(Phase::Concept)
                .context("no concept context recorded")?;
            let concept = ctx
                .as_concept()
                .context("stored concept context has the wrong shape")?;
            render::product_brief(concept)
        }
        RenderSubcommand::Requirements => {
            let ctx = manager
                .context(Phase::Requirements)
                .context("no requirements context recorded")?;
            let requirements = ctx
                .as_requirements()
                .context("stored requirements context has the wrong shape")?;
            render::requirements_document(requirements)
        }
    };
    print!("{markdown}");
    Ok(())
}
