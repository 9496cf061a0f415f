use std::path::Path;

use coloredmanga_lib::prelude::Extension;

use crate::data::Index;

/// Writes `index.json` and the full source info under `repo`.
pub fn generate_json<E: Extension>(extension: &E, repo: &Path) -> anyhow::Result<()> {
    std::fs::create_dir_all(repo.join("library"))?;

    let info = extension.get_source_info();
    let index = Index::from(&info);

    let file = std::fs::File::create(repo.join(&index.path))?;
    serde_json::to_writer_pretty(&file, &info)?;

    let file = std::fs::File::create(repo.join("index.json"))?;
    serde_json::to_writer(&file, &[index])?;

    info!("wrote repository index to {}", repo.display());

    Ok(())
}
