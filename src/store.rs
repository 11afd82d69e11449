//! Config stores and the scoped edit.
//!
//! A [`ConfigStore`] knows how to load and save [`Settings`]. All writes go
//! through a [`ConfigEdit`]: it loads the settings when opened, hands out
//! mutable access, and saves exactly once when [`commit`](ConfigEdit::commit)
//! is called. Dropping an edit without committing, whether because an error
//! was returned with `?` or because of a panic, leaves the store untouched.

use std::cell::{Cell, RefCell};
use std::ops::{Deref, DerefMut};

use crate::config::Settings;
use crate::error::FeaturesError;

/// Load/save backend for [`Settings`].
pub trait ConfigStore {
    /// Read the current persisted settings.
    fn load(&self) -> Result<Settings, FeaturesError>;

    /// Replace the persisted settings.
    fn save(&self, settings: &Settings) -> Result<(), FeaturesError>;

    /// Open a scoped edit over the current settings.
    fn edit(&self) -> Result<ConfigEdit<'_, Self>, FeaturesError>
    where
        Self: Sized,
    {
        ConfigEdit::open(self)
    }
}

/// Exclusive, uncommitted view of the settings.
#[must_use = "an edit is discarded unless `commit` is called"]
pub struct ConfigEdit<'a, S: ConfigStore> {
    store: &'a S,
    settings: Settings,
    committed: bool,
}

impl<'a, S: ConfigStore> ConfigEdit<'a, S> {
    pub fn open(store: &'a S) -> Result<Self, FeaturesError> {
        let settings = store.load()?;
        tracing::debug!("opened config edit");
        Ok(Self {
            store,
            settings,
            committed: false,
        })
    }

    /// Persist the edited settings. Consumes the edit.
    pub fn commit(mut self) -> Result<(), FeaturesError> {
        self.store.save(&self.settings)?;
        self.committed = true;
        tracing::debug!("committed config edit");
        Ok(())
    }
}

impl<S: ConfigStore> Deref for ConfigEdit<'_, S> {
    type Target = Settings;

    fn deref(&self) -> &Settings {
        &self.settings
    }
}

impl<S: ConfigStore> DerefMut for ConfigEdit<'_, S> {
    fn deref_mut(&mut self) -> &mut Settings {
        &mut self.settings
    }
}

impl<S: ConfigStore> Drop for ConfigEdit<'_, S> {
    fn drop(&mut self) {
        if !self.committed {
            tracing::debug!("discarded uncommitted config edit");
        }
    }
}

/// Run `f` against a scoped edit, committing only if `f` succeeds.
pub fn edit_config<S, T, F>(store: &S, f: F) -> Result<T, FeaturesError>
where
    S: ConfigStore,
    F: FnOnce(&mut Settings) -> Result<T, FeaturesError>,
{
    let mut edit = store.edit()?;
    let out = f(&mut *edit)?;
    edit.commit()?;
    Ok(out)
}

/// Read-only access to the persisted settings.
pub fn load_config<S: ConfigStore>(store: &S) -> Result<Settings, FeaturesError> {
    store.load()
}

/// In-process store. Counts loads and saves so callers can check that failed
/// commands never write.
#[derive(Debug)]
pub struct MemoryStore {
    settings: RefCell<Settings>,
    loads: Cell<usize>,
    saves: Cell<usize>,
}

impl MemoryStore {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings: RefCell::new(settings),
            loads: Cell::new(0),
            saves: Cell::new(0),
        }
    }

    pub fn with_defaults() -> Result<Self, FeaturesError> {
        Ok(Self::new(Settings::defaults()?))
    }

    /// Copy of the currently stored settings. Does not count as a load.
    pub fn snapshot(&self) -> Settings {
        self.settings.borrow().clone()
    }

    pub fn loads(&self) -> usize {
        self.loads.get()
    }

    pub fn saves(&self) -> usize {
        self.saves.get()
    }
}

impl ConfigStore for MemoryStore {
    fn load(&self) -> Result<Settings, FeaturesError> {
        self.loads.set(self.loads.get() + 1);
        Ok(self.settings.borrow().clone())
    }

    fn save(&self, settings: &Settings) -> Result<(), FeaturesError> {
        self.saves.set(self.saves.get() + 1);
        *self.settings.borrow_mut() = settings.clone();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::IconStyle;
    use std::panic::{AssertUnwindSafe, catch_unwind};

    fn store() -> MemoryStore {
        MemoryStore::with_defaults().unwrap()
    }

    #[test]
    fn commit_saves_once() {
        let store = store();
        let mut edit = store.edit().unwrap();
        edit.features.icon_style = IconStyle::Ascii;
        edit.commit().unwrap();

        assert_eq!(store.saves(), 1);
        assert_eq!(store.snapshot().features.icon_style, IconStyle::Ascii);
    }

    #[test]
    fn dropped_edit_is_discarded() {
        let store = store();
        {
            let mut edit = store.edit().unwrap();
            edit.features.task_detection = false;
        }
        assert_eq!(store.saves(), 0);
        assert!(store.snapshot().features.task_detection);
    }

    #[test]
    fn edit_config_commits_on_ok() {
        let store = store();
        let out = edit_config(&store, |s| {
            s.features.auto_ultrathink = false;
            Ok(42)
        })
        .unwrap();
        assert_eq!(out, 42);
        assert_eq!(store.loads(), 1);
        assert_eq!(store.saves(), 1);
        assert!(!store.snapshot().features.auto_ultrathink);
    }

    #[test]
    fn edit_config_discards_on_error_after_mutation() {
        let store = store();
        let result: Result<(), _> = edit_config(&store, |s| {
            s.features.icon_style = IconStyle::Emoji;
            Err(FeaturesError::InvalidValue {
                key: "icon_style".into(),
                reason: "late failure".into(),
            })
        });
        assert!(result.is_err());
        assert_eq!(store.saves(), 0);
        assert_eq!(store.snapshot().features.icon_style, IconStyle::NerdFonts);
    }

    #[test]
    fn edit_config_discards_on_panic() {
        let store = store();
        let result = catch_unwind(AssertUnwindSafe(|| {
            let _: Result<(), FeaturesError> = edit_config(&store, |s| {
                s.features.branch_enforcement = false;
                panic!("handler blew up");
            });
        }));
        assert!(result.is_err());
        assert_eq!(store.saves(), 0);
        assert!(store.snapshot().features.branch_enforcement);
    }

    #[test]
    fn load_config_does_not_save() {
        let store = store();
        let settings = load_config(&store).unwrap();
        assert_eq!(settings, store.snapshot());
        assert_eq!(store.loads(), 1);
        assert_eq!(store.saves(), 0);
    }

    struct FailingStore;

    impl ConfigStore for FailingStore {
        fn load(&self) -> Result<Settings, FeaturesError> {
            Settings::defaults()
        }

        fn save(&self, _settings: &Settings) -> Result<(), FeaturesError> {
            Err(FeaturesError::IoError {
                path: "/read-only/tool.toml".into(),
                source: std::io::Error::from(std::io::ErrorKind::PermissionDenied),
            })
        }
    }

    #[test]
    fn failed_save_surfaces_error() {
        let result = edit_config(&FailingStore, |s| {
            s.features.task_detection = false;
            Ok(())
        });
        assert!(matches!(result, Err(FeaturesError::IoError { .. })));
    }
}
