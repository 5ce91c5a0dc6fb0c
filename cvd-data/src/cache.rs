//! Session cache for loaded tables.

use cvd_owid::table::ObservationTable;
use std::cell::RefCell;
use std::collections::HashMap;
use std::path::PathBuf;
use std::rc::Rc;

/// Cache key: the source argument of a load (`None` means the remote source).
pub type SourceKey = Option<PathBuf>;

/// Tables loaded during this process, keyed by source argument.
///
/// Entries are shared read-only and never evicted. Inject one cache into
/// several loaders to share results between them.
#[derive(Debug, Default)]
pub struct LoadCache {
    entries: RefCell<HashMap<SourceKey, Rc<ObservationTable>>>,
}

impl LoadCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &SourceKey) -> Option<Rc<ObservationTable>> {
        self.entries.borrow().get(key).cloned()
    }

    /// Store `table` under `key` and hand back the shared copy.
    pub fn insert(&self, key: SourceKey, table: ObservationTable) -> Rc<ObservationTable> {
        let shared = Rc::new(table);
        self.entries.borrow_mut().insert(key, Rc::clone(&shared));
        shared
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}
