//! Pluggable persistence for the session triple so a restarted consumer can
//! resume without a fresh login

use std::fmt::Debug;
use std::sync::Mutex;

use anyhow::Context;
use bi_shared::{
    token::{AccessToken, RefreshToken},
    uac::Principal,
};

/// The three values that survive a restart. They are saved and cleared as one
/// record, partial persisted state is not representable.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct PersistedSession {
    pub access_token: AccessToken,
    pub refresh_token: RefreshToken,
    pub principal: Principal,
}

/// Where the session triple lives between runs. Consumers supply their own
/// implementation when neither built-in fits (e.g. browser local storage).
pub trait SessionStorage: Send + Sync + Debug {
    fn load(&self) -> anyhow::Result<Option<PersistedSession>>;
    fn save(&self, session: &PersistedSession) -> anyhow::Result<()>;
    fn clear(&self) -> anyhow::Result<()>;
}

/// In-process only, sessions do not survive a restart. The default and the
/// right choice for tests.
#[derive(Debug, Default)]
pub struct MemorySessionStorage {
    slot: Mutex<Option<PersistedSession>>,
}

impl SessionStorage for MemorySessionStorage {
    fn load(&self) -> anyhow::Result<Option<PersistedSession>> {
        Ok(self.slot.lock().expect("mutex poisoned").clone())
    }

    fn save(&self, session: &PersistedSession) -> anyhow::Result<()> {
        *self.slot.lock().expect("mutex poisoned") = Some(session.clone());
        Ok(())
    }

    fn clear(&self) -> anyhow::Result<()> {
        *self.slot.lock().expect("mutex poisoned") = None;
        Ok(())
    }
}

/// Stores the triple as json in a single file
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug)]
pub struct FileSessionStorage {
    path: std::path::PathBuf,
}

#[cfg(not(target_arch = "wasm32"))]
impl FileSessionStorage {
    pub fn new(path: impl Into<std::path::PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl SessionStorage for FileSessionStorage {
    fn load(&self) -> anyhow::Result<Option<PersistedSession>> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("failed to read session file: {:?}", self.path))
            }
        };
        let session = serde_json::from_str(&contents)
            .with_context(|| format!("failed to parse session file: {:?}", self.path))?;
        Ok(Some(session))
    }

    fn save(&self, session: &PersistedSession) -> anyhow::Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create session folder: {parent:?}"))?;
        }
        let contents =
            serde_json::to_string_pretty(session).context("failed to serialize session")?;
        std::fs::write(&self.path, contents)
            .with_context(|| format!("failed to write session file: {:?}", self.path))
    }

    fn clear(&self) -> anyhow::Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e)
                .with_context(|| format!("failed to remove session file: {:?}", self.path)),
        }
    }
}
