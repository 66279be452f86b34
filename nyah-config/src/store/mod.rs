mod kinds;

use std::fs;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use anyhow::Context as _;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::env::Env;

pub use kinds::{GrantCommandsDoc, KeywordResponsesDoc, RoleTriggersDoc};

/// On-disk JSON object. Unknown keys are preserved across load/save.
pub type Document = Map<String, Value>;

/// Shape of one configuration document: the single well-known array key and where the
/// file lives by default.
pub trait DocumentKind: Send + Sync + 'static {
    const KEY: &'static str;
    const PATH_ENV: &'static str;
    const DEFAULT_PATH: &'static str;
}

/// JSON file store for one document kind.
///
/// Loading never fails: a missing file is created with the empty shape, and an unreadable or
/// malformed file yields the empty shape without touching the file on disk.
pub struct ConfigStore<K> {
    path: PathBuf,
    kind: PhantomData<fn() -> K>,
}

impl<K> Clone for ConfigStore<K> {
    fn clone(&self) -> Self {
        Self {
            path: self.path.clone(),
            kind: PhantomData,
        }
    }
}

impl<K> std::fmt::Debug for ConfigStore<K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfigStore").field("path", &self.path).finish()
    }
}

impl<K: DocumentKind> ConfigStore<K> {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            kind: PhantomData,
        }
    }

    pub fn from_env(env: &Env) -> Self {
        Self::new(Self::resolve_path(env))
    }

    /// Environment override, or the fixed default filename.
    pub fn resolve_path(env: &Env) -> String {
        env.get_or(K::PATH_ENV, K::DEFAULT_PATH).to_owned()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn key(&self) -> &'static str {
        K::KEY
    }

    pub fn empty_document() -> Document {
        let mut document = Map::new();
        document.insert(K::KEY.to_owned(), Value::Array(Vec::new()));
        document
    }

    pub fn load(&self) -> Document {
        if self.path.as_os_str().is_empty() {
            return Self::empty_document();
        }

        if !self.path.exists() {
            let document = Self::empty_document();
            if let Err(source) = self.save(&document) {
                warn!(?source, path = %self.path.display(), "failed to create empty config document");
            } else {
                debug!(path = %self.path.display(), "created empty config document");
            }
            return document;
        }

        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(source) => {
                warn!(?source, path = %self.path.display(), "failed to read config document");
                return Self::empty_document();
            }
        };

        match serde_json::from_str::<Value>(&raw) {
            Ok(Value::Object(mut document)) => {
                document
                    .entry(K::KEY)
                    .or_insert_with(|| Value::Array(Vec::new()));
                document
            }
            Ok(_) => {
                warn!(path = %self.path.display(), "config document is not a JSON object");
                Self::empty_document()
            }
            Err(source) => {
                warn!(?source, path = %self.path.display(), "failed to parse config document");
                Self::empty_document()
            }
        }
    }

    /// Entries under the well-known key. A non-array value yields no entries.
    pub fn entries(&self) -> Vec<Value> {
        match self.load().remove(K::KEY) {
            Some(Value::Array(items)) => items,
            Some(_) => {
                warn!(path = %self.path.display(), key = K::KEY, "config key is not an array");
                Vec::new()
            }
            None => Vec::new(),
        }
    }

    pub fn save(&self, document: &Document) -> anyhow::Result<()> {
        if self.path.as_os_str().is_empty() {
            anyhow::bail!("no path configured for `{}` document", K::KEY);
        }

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }

        let payload = serde_json::to_string_pretty(document)?;
        fs::write(&self.path, payload)
            .with_context(|| format!("failed to write {}", self.path.display()))?;

        Ok(())
    }
}

/// The three stores the bot and the admin panel share.
#[derive(Clone, Debug)]
pub struct ConfigStores {
    pub role_triggers: ConfigStore<RoleTriggersDoc>,
    pub keyword_responses: ConfigStore<KeywordResponsesDoc>,
    pub grant_commands: ConfigStore<GrantCommandsDoc>,
}

impl ConfigStores {
    pub fn from_env(env: &Env) -> Self {
        Self {
            role_triggers: ConfigStore::from_env(env),
            keyword_responses: ConfigStore::from_env(env),
            grant_commands: ConfigStore::from_env(env),
        }
    }

    /// All three documents under one directory, with their default filenames.
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            role_triggers: ConfigStore::new(dir.join(RoleTriggersDoc::DEFAULT_PATH)),
            keyword_responses: ConfigStore::new(dir.join(KeywordResponsesDoc::DEFAULT_PATH)),
            grant_commands: ConfigStore::new(dir.join(GrantCommandsDoc::DEFAULT_PATH)),
        }
    }
}
