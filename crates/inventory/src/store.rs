//! File-backed inventory store.
//!
//! The store owns the full record map. It is loaded from the backing file once
//! at construction and the whole file is rewritten after every successful
//! mutation; there are no incremental writes. Malformed lines and IO failures
//! are reported (logged and returned in a [`LoadReport`]) but never abort
//! construction.
//!
//! The store assumes it is the only writer of its file for the process
//! lifetime. There is no locking.

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use stockfile_core::Entity;
use tempfile::NamedTempFile;
use thiserror::Error;
use tracing::{debug, error, info, warn};

use crate::error::{InventoryError, InventoryResult, StoreIoError};
use crate::product::{Product, ProductId, ProductUpdate};
use crate::record::{self, LineError};

/// Backing file used when the caller does not name one.
pub const DEFAULT_INVENTORY_FILE: &str = "inventory.txt";

/// A problem met while loading the backing file.
#[derive(Debug, Error)]
pub enum LoadIssue {
    /// A malformed line that was skipped.
    #[error(transparent)]
    Line(#[from] LineError),

    /// The file could not be created or read.
    #[error(transparent)]
    Io(#[from] StoreIoError),
}

/// What happened during a load.
#[derive(Debug, Default)]
pub struct LoadReport {
    /// The file did not exist and an empty one was created.
    pub created_file: bool,
    /// Records held after the load (duplicates collapsed).
    pub loaded: usize,
    pub issues: Vec<LoadIssue>,
}

impl LoadReport {
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn line_errors(&self) -> impl Iterator<Item = &LineError> {
        self.issues.iter().filter_map(|issue| match issue {
            LoadIssue::Line(e) => Some(e),
            LoadIssue::Io(_) => None,
        })
    }

    pub fn io_error(&self) -> Option<&StoreIoError> {
        self.issues.iter().find_map(|issue| match issue {
            LoadIssue::Io(e) => Some(e),
            LoadIssue::Line(_) => None,
        })
    }
}

/// Successful mutation, carrying the affected id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Ack {
    Added(ProductId),
    Removed(ProductId),
    Updated(ProductId),
}

impl Ack {
    pub fn product_id(&self) -> &ProductId {
        match self {
            Ack::Added(id) | Ack::Removed(id) | Ack::Updated(id) => id,
        }
    }
}

impl core::fmt::Display for Ack {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Ack::Added(id) => write!(f, "product '{id}' added"),
            Ack::Removed(id) => write!(f, "product '{id}' removed"),
            Ack::Updated(id) => write!(f, "product '{id}' updated"),
        }
    }
}

/// Result of [`InventoryStore::list_all`]: either every record or an explicit empty marker.
#[derive(Debug, Clone, PartialEq)]
pub enum Listing<'a> {
    Empty,
    Products(Vec<&'a Product>),
}

impl Listing<'_> {
    pub fn is_empty(&self) -> bool {
        matches!(self, Listing::Empty)
    }
}

impl core::fmt::Display for Listing<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Listing::Empty => f.write_str("The inventory is empty."),
            Listing::Products(products) => {
                for (i, product) in products.iter().enumerate() {
                    if i > 0 {
                        writeln!(f)?;
                    }
                    write!(f, "{product}")?;
                }
                Ok(())
            }
        }
    }
}

/// In-memory catalog mirrored to a `;`-delimited text file.
#[derive(Debug)]
pub struct InventoryStore {
    records: BTreeMap<ProductId, Product>,
    source_path: PathBuf,
    last_load: LoadReport,
}

impl InventoryStore {
    /// Open the store at `path` and load it. Never fails; problems end up in
    /// [`InventoryStore::last_load`] and the log.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let mut store = Self {
            records: BTreeMap::new(),
            source_path: path.into(),
            last_load: LoadReport::default(),
        };
        store.last_load = store.load_from_file();
        store
    }

    pub fn open_default() -> Self {
        Self::open(DEFAULT_INVENTORY_FILE)
    }

    pub fn path(&self) -> &Path {
        &self.source_path
    }

    /// Report of the most recent load done by [`InventoryStore::open`].
    pub fn last_load(&self) -> &LoadReport {
        &self.last_load
    }

    /// Replace the in-memory records with the content of the backing file.
    ///
    /// A missing file is created empty. Malformed lines are skipped and
    /// reported; a later line with an already seen id overwrites the earlier one.
    pub fn load_from_file(&mut self) -> LoadReport {
        self.records.clear();
        let mut report = LoadReport::default();
        let path = self.source_path.as_path();

        if !path.exists() {
            match File::create(path) {
                Ok(_) => {
                    info!(path = %path.display(), "inventory file did not exist; created an empty one");
                    report.created_file = true;
                }
                Err(e) => {
                    let err = StoreIoError::new("create", path, e);
                    error!(error = %err, "inventory starts empty and will not be saved");
                    report.issues.push(err.into());
                }
            }
            return report;
        }

        let file = match File::open(path) {
            Ok(file) => file,
            Err(e) => {
                let err = StoreIoError::new("read", path, e);
                error!(error = %err, "inventory starts empty");
                report.issues.push(err.into());
                return report;
            }
        };

        for (index, line) in BufReader::new(file).lines().enumerate() {
            let line = match line {
                Ok(line) => line,
                Err(e) => {
                    let err = StoreIoError::new("read", path, e);
                    error!(error = %err, "inventory starts empty");
                    self.records.clear();
                    report.issues.push(err.into());
                    return report;
                }
            };

            match record::decode(index + 1, &line) {
                Ok(Some(product)) => {
                    if let Some(previous) = self.records.insert(product.id().clone(), product) {
                        debug!(product_id = %previous.id(), line_no = index + 1, "later line overrides earlier record");
                    }
                }
                Ok(None) => {}
                Err(e) => {
                    warn!(error = %e, "skipping malformed inventory line");
                    report.issues.push(e.into());
                }
            }
        }

        report.loaded = self.records.len();
        info!(path = %path.display(), records = report.loaded, skipped = report.issues.len(), "inventory loaded");
        report
    }

    /// Rewrite the whole backing file from the in-memory records.
    ///
    /// Lines go to a temporary file next to the target, which then replaces
    /// it, so a failed write never leaves a truncated file behind. A symlinked
    /// path is resolved first so the link keeps pointing at the data; a
    /// read-only target is refused with `PermissionDenied`.
    pub fn save_to_file(&self) -> Result<(), StoreIoError> {
        let configured = self.source_path.as_path();
        let io_err = |action, e| StoreIoError::new(action, configured, e);

        let existing = match fs::metadata(configured) {
            Ok(meta) => Some(meta),
            Err(e) if e.kind() == io::ErrorKind::NotFound => None,
            Err(e) => return Err(io_err("write", e)),
        };
        if let Some(meta) = &existing {
            if meta.permissions().readonly() {
                return Err(io_err(
                    "write",
                    io::Error::new(io::ErrorKind::PermissionDenied, "file is read-only"),
                ));
            }
        }

        let target = match existing {
            Some(_) => fs::canonicalize(configured).map_err(|e| io_err("write", e))?,
            None => configured.to_path_buf(),
        };
        let dir = match target.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        };

        let mut tmp = NamedTempFile::new_in(dir).map_err(|e| io_err("write", e))?;
        {
            let mut writer = BufWriter::new(tmp.as_file_mut());
            for product in self.records.values() {
                writeln!(writer, "{}", record::encode(product)).map_err(|e| io_err("write", e))?;
            }
            writer.flush().map_err(|e| io_err("write", e))?;
        }
        tmp.as_file().sync_all().map_err(|e| io_err("write", e))?;

        if let Some(meta) = existing {
            // Keep the mode of the file being replaced rather than the temp file's.
            if let Err(e) = tmp.as_file().set_permissions(meta.permissions()) {
                warn!(path = %target.display(), error = %e, "could not copy permissions of the inventory file");
            }
        }
        tmp.persist(&target).map_err(|e| io_err("replace", e.error))?;

        info!(path = %target.display(), records = self.records.len(), "inventory saved");
        Ok(())
    }

    /// Insert a new product. Rejects an id that is already present, and an id
    /// that is blank or has surrounding whitespace (it would not survive a reload).
    pub fn add(&mut self, product: Product) -> InventoryResult<Ack> {
        let raw_id = product.id().as_str();
        if raw_id.is_empty() || raw_id.trim() != raw_id {
            debug!(product_id = raw_id, "add rejected: id has surrounding whitespace");
            return Err(InventoryError::InvalidId(product.id().clone()));
        }
        if self.records.contains_key(product.id()) {
            debug!(product_id = %product.id(), "add rejected: duplicate id");
            return Err(InventoryError::DuplicateId(product.id().clone()));
        }

        let id = product.id().clone();
        self.records.insert(id.clone(), product);
        info!(product_id = %id, "product added");
        self.persist(Ack::Added(id))
    }

    /// Delete the product with `id`.
    pub fn remove(&mut self, id: &str) -> InventoryResult<Ack> {
        let Some(removed) = self.records.remove(id) else {
            debug!(product_id = id, "remove rejected: unknown id");
            return Err(InventoryError::NotFound(ProductId::from(id)));
        };

        info!(product_id = %removed.id(), "product removed");
        self.persist(Ack::Removed(removed.id().clone()))
    }

    /// Change the quantity and/or price of the product with `id`.
    pub fn update(&mut self, id: &str, update: ProductUpdate) -> InventoryResult<Ack> {
        let Some(product) = self.records.get_mut(id) else {
            debug!(product_id = id, "update rejected: unknown id");
            return Err(InventoryError::NotFound(ProductId::from(id)));
        };

        product.apply(&update);
        let id = product.id().clone();
        info!(
            product_id = %id,
            quantity = ?update.quantity,
            price = ?update.price.map(|p| p.value()),
            "product updated"
        );
        self.persist(Ack::Updated(id))
    }

    /// Products whose name contains `needle`, ignoring case.
    pub fn find_by_name(&self, needle: &str) -> Vec<&Product> {
        let needle = needle.to_lowercase();
        self.records
            .values()
            .filter(|p| p.name().to_lowercase().contains(&needle))
            .collect()
    }

    pub fn list_all(&self) -> Listing<'_> {
        if self.records.is_empty() {
            Listing::Empty
        } else {
            Listing::Products(self.records.values().collect())
        }
    }

    pub fn get(&self, id: &str) -> Option<&Product> {
        self.records.get(id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn persist(&self, ack: Ack) -> InventoryResult<Ack> {
        if let Err(err) = self.save_to_file() {
            error!(error = %err, "inventory change not saved; memory and file now differ");
            return Err(err.into());
        }
        Ok(ack)
    }
}
