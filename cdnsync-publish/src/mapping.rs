//! Local asset roots and the remote categories they publish to.

use crate::build::BuildContext;
use std::fmt;

/// Storage sub-path an asset is published under.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Category {
    Locales,
    Images,
    Fonts,
    StaticAssets,
}

impl Category {
    /// Key segment written between the build prefix and the relative path.
    pub fn segment(self) -> &'static str {
        match self {
            Self::Locales => "locales",
            Self::Images => "images",
            Self::Fonts => "fonts",
            Self::StaticAssets => "_next/static",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.segment())
    }
}

/// Full key of a published object.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RemoteObjectKey(String);

impl RemoteObjectKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RemoteObjectKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One local root and its remote category.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MappingEntry {
    pub local_root: String,
    pub category: Category,
}

/// Ordered table of local roots. The first matching root wins.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CategoryMapping {
    entries: Vec<MappingEntry>,
}

impl Default for CategoryMapping {
    fn default() -> Self {
        Self::new([
            ("public/locales", Category::Locales),
            ("public/images", Category::Images),
            (".next/static", Category::StaticAssets),
            ("public/fonts", Category::Fonts),
        ])
    }
}

impl CategoryMapping {
    pub fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, Category)>,
        S: Into<String>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(root, category)| MappingEntry {
                    local_root: root.into().trim_end_matches('/').to_string(),
                    category,
                })
                .collect(),
        }
    }

    pub fn entries(&self) -> &[MappingEntry] {
        &self.entries
    }

    /// Finds the entry `local_path` falls under, with the path relative to
    /// that root. A root matches only at a path component boundary.
    pub fn resolve<'a, 'p>(&'a self, local_path: &'p str) -> Option<(&'a MappingEntry, &'p str)> {
        let path = normalize(local_path);
        self.entries.iter().find_map(|entry| {
            let rest = path.strip_prefix(entry.local_root.as_str())?;
            if rest.is_empty() {
                Some((entry, rest))
            } else {
                rest.strip_prefix('/')
                    .map(|rel| (entry, rel.trim_start_matches('/')))
            }
        })
    }

    /// Key `local_path` publishes to, or `None` when no root covers it.
    pub fn remote_key(&self, ctx: &BuildContext, local_path: &str) -> Option<RemoteObjectKey> {
        let (entry, relative) = self.resolve(local_path)?;
        let base = format!("{}/{}", ctx.target_prefix(), entry.category.segment());
        if relative.is_empty() {
            Some(RemoteObjectKey(base))
        } else {
            Some(RemoteObjectKey(format!("{base}/{relative}")))
        }
    }

    /// Local path a key of this build was published from.
    pub fn local_path(&self, ctx: &BuildContext, key: &RemoteObjectKey) -> Option<String> {
        let target = ctx.target_prefix();
        let rest = key.as_str().strip_prefix(target.as_str())?.strip_prefix('/')?;
        self.entries.iter().find_map(|entry| {
            let after = rest.strip_prefix(entry.category.segment())?;
            if after.is_empty() {
                Some(entry.local_root.clone())
            } else {
                after
                    .strip_prefix('/')
                    .map(|rel| format!("{}/{rel}", entry.local_root))
            }
        })
    }
}

fn normalize(path: &str) -> &str {
    path.trim_start_matches("./")
}
