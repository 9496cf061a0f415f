use coloredmanga_lib::prelude::SourceInfo;

/// Entry of the repository `index.json` a host reads to list installable sources
#[derive(serde::Serialize)]
pub struct Index {
    pub path: String,
    pub id: i64,
    pub name: String,
    pub version: String,
    pub lib_version: String,
    pub icon: String,
}

impl From<&SourceInfo> for Index {
    fn from(source: &SourceInfo) -> Self {
        Self {
            path: format!("library/{}.json", source.name.to_lowercase()),
            id: source.id,
            name: source.name.clone(),
            version: source.version.clone(),
            lib_version: coloredmanga_lib::LIB_VERSION.to_string(),
            icon: source.icon.clone(),
        }
    }
}
