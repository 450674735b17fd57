//! Record store for the canonical YAML collections.
//!
//! Loading converts untyped YAML into the typed records of [`crate::model`],
//! collecting every record that fails conversion instead of stopping at the
//! first. Each record remembers the key order it was read in. Saving
//! re-serializes deterministically in that order and rewrites the file
//! atomically (temp file in the same directory, then rename), preserving the
//! leading `#` comment block.

use std::fmt;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_yaml::{Mapping, Value};
use tempfile::NamedTempFile;

use crate::model::{
    Committee, CommitteeMember, Layout, Legislator, Membership, OfficeEntry, Record, SocialMediaEntry,
};

/// The canonical collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    LegislatorsCurrent,
    LegislatorsHistorical,
    CommitteesCurrent,
    CommitteesHistorical,
    CommitteeMembershipCurrent,
    DistrictOffices,
    SocialMedia,
}

impl Collection {
    pub const ALL: [Self; 7] = [
        Self::LegislatorsCurrent,
        Self::LegislatorsHistorical,
        Self::CommitteesCurrent,
        Self::CommitteesHistorical,
        Self::CommitteeMembershipCurrent,
        Self::DistrictOffices,
        Self::SocialMedia,
    ];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::LegislatorsCurrent => "legislators-current",
            Self::LegislatorsHistorical => "legislators-historical",
            Self::CommitteesCurrent => "committees-current",
            Self::CommitteesHistorical => "committees-historical",
            Self::CommitteeMembershipCurrent => "committee-membership-current",
            Self::DistrictOffices => "legislators-district-offices",
            Self::SocialMedia => "legislators-social-media",
        }
    }

    #[must_use]
    pub fn file_name(self) -> String {
        format!("{}.yaml", self.name())
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for Collection {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

/// A record that failed typed conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordError {
    /// Position in the collection (0-based), or the mapping key for keyed collections.
    pub locator: String,
    /// Bioguide ID when it could be read from the raw record.
    pub bioguide: Option<String>,
    pub message: String,
}

impl RecordError {
    /// The bioguide when known, otherwise "record N".
    #[must_use]
    pub fn subject(&self) -> String {
        self.bioguide
            .clone()
            .unwrap_or_else(|| format!("record {}", self.locator))
    }
}

impl fmt::Display for RecordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.bioguide {
            Some(id) => write!(f, "record {} ({id}): {}", self.locator, self.message),
            None => write!(f, "record {}: {}", self.locator, self.message),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("{collection}: I/O error on {path}: {source}")]
    Io {
        collection: Collection,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{collection}: YAML syntax error: {source}")]
    Syntax {
        collection: Collection,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("{collection}: malformed collection: {reason}")]
    MalformedRecord {
        collection: Collection,
        reason: String,
    },
    #[error("{collection}: {} record(s) failed to load: {}", .errors.len(), join_errors(.errors))]
    Structural {
        collection: Collection,
        errors: Vec<RecordError>,
    },
    #[error("{collection}: serialization failed: {source}")]
    Serialize {
        collection: Collection,
        #[source]
        source: serde_yaml::Error,
    },
}

fn join_errors(errors: &[RecordError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// A loaded collection: the leading comment block plus the records.
#[derive(Debug, Clone, PartialEq)]
pub struct Document<T> {
    /// Leading `#` comment lines, without the trailing newline.
    pub header: Option<String>,
    pub records: T,
}

impl<T> Document<T> {
    #[must_use]
    pub const fn new(records: T) -> Self {
        Self {
            header: None,
            records,
        }
    }

    /// Same header, different records.
    #[must_use]
    pub fn with_records<U>(&self, records: U) -> Document<U> {
        Document {
            header: self.header.clone(),
            records,
        }
    }
}

/// A collection body the store can write: a sequence of records or the
/// committee membership mapping.
pub trait Records {
    /// The YAML tree to write, with every record in its captured key order.
    ///
    /// # Errors
    /// Any record that cannot be represented as YAML.
    fn to_yaml(&self) -> Result<Value, serde_yaml::Error>;
}

impl<T: Records + ?Sized> Records for &T {
    fn to_yaml(&self) -> Result<Value, serde_yaml::Error> {
        (**self).to_yaml()
    }
}

impl<R: Record> Records for Vec<R> {
    fn to_yaml(&self) -> Result<Value, serde_yaml::Error> {
        self.iter()
            .map(|record| Ok(record.layout().apply(serde_yaml::to_value(record)?)))
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Sequence)
    }
}

impl Records for Membership {
    fn to_yaml(&self) -> Result<Value, serde_yaml::Error> {
        let mut out = Mapping::with_capacity(self.len());
        for (code, members) in self {
            out.insert(Value::String(code.clone()), members.to_yaml()?);
        }
        Ok(Value::Mapping(out))
    }
}

impl<T: Records> Document<T> {
    /// Serialize to the exact bytes [`RecordStore::save`] writes.
    ///
    /// # Errors
    /// Returns [`StoreError::Serialize`] if the records cannot be represented as YAML.
    pub fn render(&self, collection: Collection) -> Result<String, StoreError> {
        let body = self
            .records
            .to_yaml()
            .and_then(|tree| serde_yaml::to_string(&tree))
            .map_err(|source| StoreError::Serialize { collection, source })?;
        Ok(match &self.header {
            Some(header) => format!("{header}\n{body}"),
            None => body,
        })
    }
}

/// Split the leading run of `#` lines from the YAML body.
fn split_header(text: &str) -> (Option<String>, &str) {
    let mut header_len = 0;
    for line in text.split_inclusive('\n') {
        if !line.starts_with('#') {
            break;
        }
        header_len += line.len();
    }
    if header_len == 0 {
        return (None, text);
    }
    let header = text[..header_len].trim_end_matches(['\n', '\r']).to_string();
    (Some(header), &text[header_len..])
}

/// A collection loaded as far as its records convert.
#[derive(Debug, Clone, PartialEq)]
pub struct PartialLoad<T> {
    pub document: Document<T>,
    /// One entry per record that failed typed conversion, in file order.
    pub rejected: Vec<RecordError>,
}

impl<T> PartialLoad<T> {
    /// The document, or [`StoreError::Structural`] if any record was rejected.
    ///
    /// # Errors
    /// See above.
    pub fn into_document(self, collection: Collection) -> Result<Document<T>, StoreError> {
        if self.rejected.is_empty() {
            Ok(self.document)
        } else {
            Err(StoreError::Structural {
                collection,
                errors: self.rejected,
            })
        }
    }
}

fn convert<R: DeserializeOwned + Record>(value: Value) -> Result<R, serde_yaml::Error> {
    let layout = Layout::capture(&value);
    let mut record: R = serde_yaml::from_value(value)?;
    record.set_layout(layout);
    Ok(record)
}

fn record_bioguide(value: &serde_yaml::Value) -> Option<String> {
    value
        .get("id")
        .and_then(|id| id.get("bioguide"))
        .and_then(serde_yaml::Value::as_str)
        .map(str::to_string)
}

/// Parse a sequence-of-mappings collection from text.
///
/// # Errors
/// See [`RecordStore::load`].
pub fn parse_sequence<R: DeserializeOwned + Record>(
    collection: Collection,
    text: &str,
) -> Result<Document<Vec<R>>, StoreError> {
    parse_sequence_partial(collection, text)?.into_document(collection)
}

/// Parse a sequence-of-mappings collection, keeping the records that convert.
///
/// # Errors
/// Syntax and shape errors; records that fail conversion are returned in
/// [`PartialLoad::rejected`] instead.
pub fn parse_sequence_partial<R: DeserializeOwned + Record>(
    collection: Collection,
    text: &str,
) -> Result<PartialLoad<Vec<R>>, StoreError> {
    let (header, body) = split_header(text);
    if body.trim().is_empty() {
        return Ok(PartialLoad {
            document: Document {
                header,
                records: Vec::new(),
            },
            rejected: Vec::new(),
        });
    }
    let value: serde_yaml::Value = serde_yaml::from_str(body)
        .map_err(|source| StoreError::Syntax { collection, source })?;
    let items = match value {
        serde_yaml::Value::Null => Vec::new(),
        serde_yaml::Value::Sequence(items) => items,
        _ => {
            return Err(StoreError::MalformedRecord {
                collection,
                reason: "top level is not a sequence".to_string(),
            })
        }
    };

    let mut records = Vec::with_capacity(items.len());
    let mut errors = Vec::new();
    for (i, item) in items.into_iter().enumerate() {
        if !item.is_mapping() {
            return Err(StoreError::MalformedRecord {
                collection,
                reason: format!("record {i} is not a mapping"),
            });
        }
        let bioguide = record_bioguide(&item);
        match convert::<R>(item) {
            Ok(record) => records.push(record),
            Err(e) => errors.push(RecordError {
                locator: i.to_string(),
                bioguide,
                message: e.to_string(),
            }),
        }
    }
    Ok(PartialLoad {
        document: Document { header, records },
        rejected: errors,
    })
}

/// Parse the committee membership mapping from text.
///
/// # Errors
/// See [`RecordStore::load_membership`].
pub fn parse_membership(text: &str) -> Result<Document<Membership>, StoreError> {
    parse_membership_partial(text)?.into_document(Collection::CommitteeMembershipCurrent)
}

/// Parse the committee membership mapping, keeping the committees whose
/// member lists convert.
///
/// # Errors
/// Syntax and shape errors; committees that fail conversion are returned in
/// [`PartialLoad::rejected`] instead.
pub fn parse_membership_partial(text: &str) -> Result<PartialLoad<Membership>, StoreError> {
    let collection = Collection::CommitteeMembershipCurrent;
    let (header, body) = split_header(text);
    if body.trim().is_empty() {
        return Ok(PartialLoad {
            document: Document {
                header,
                records: Membership::new(),
            },
            rejected: Vec::new(),
        });
    }
    let value: serde_yaml::Value = serde_yaml::from_str(body)
        .map_err(|source| StoreError::Syntax { collection, source })?;
    let mapping = match value {
        serde_yaml::Value::Null => serde_yaml::Mapping::new(),
        serde_yaml::Value::Mapping(m) => m,
        _ => {
            return Err(StoreError::MalformedRecord {
                collection,
                reason: "top level is not a mapping of committee codes".to_string(),
            })
        }
    };

    let mut records = Membership::new();
    let mut errors = Vec::new();
    for (key, members) in mapping {
        let Some(code) = key.as_str().map(str::to_string) else {
            return Err(StoreError::MalformedRecord {
                collection,
                reason: format!("committee code {key:?} is not a string"),
            });
        };
        let Value::Sequence(items) = members else {
            errors.push(RecordError {
                locator: code,
                bioguide: None,
                message: "member list is not a sequence".to_string(),
            });
            continue;
        };
        match items
            .into_iter()
            .map(convert::<CommitteeMember>)
            .collect::<Result<Vec<_>, _>>()
        {
            Ok(list) => {
                records.insert(code, list);
            }
            Err(e) => errors.push(RecordError {
                locator: code,
                bioguide: None,
                message: e.to_string(),
            }),
        }
    }
    Ok(PartialLoad {
        document: Document { header, records },
        rejected: errors,
    })
}

/// Outcome of linting one collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LintOutcome {
    pub collection: Collection,
    pub records: usize,
    /// Whether re-serialization changed the file.
    pub rewritten: bool,
}

/// The directory holding the canonical collections.
#[derive(Debug, Clone)]
pub struct RecordStore {
    root: PathBuf,
}

impl RecordStore {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    #[must_use]
    pub fn path(&self, collection: Collection) -> PathBuf {
        self.root.join(collection.file_name())
    }

    #[must_use]
    pub fn exists(&self, collection: Collection) -> bool {
        self.path(collection).is_file()
    }

    fn read(&self, collection: Collection) -> Result<String, StoreError> {
        let path = self.path(collection);
        std::fs::read_to_string(&path).map_err(|source| StoreError::Io {
            collection,
            path,
            source,
        })
    }

    /// Load a sequence-shaped collection.
    ///
    /// An empty file is an empty collection.
    ///
    /// # Errors
    /// - [`StoreError::Io`] if the file cannot be read
    /// - [`StoreError::Syntax`] if it is not YAML
    /// - [`StoreError::MalformedRecord`] if it is not a sequence of mappings
    /// - [`StoreError::Structural`] listing every record that does not convert
    pub fn load<R: DeserializeOwned + Record>(
        &self,
        collection: Collection,
    ) -> Result<Document<Vec<R>>, StoreError> {
        self.load_partial(collection)?.into_document(collection)
    }

    /// Load a sequence-shaped collection, setting aside records that fail
    /// typed conversion instead of failing the whole load.
    ///
    /// # Errors
    /// [`StoreError::Io`], [`StoreError::Syntax`] or [`StoreError::MalformedRecord`].
    pub fn load_partial<R: DeserializeOwned + Record>(
        &self,
        collection: Collection,
    ) -> Result<PartialLoad<Vec<R>>, StoreError> {
        let text = self.read(collection)?;
        let loaded = parse_sequence_partial(collection, &text)?;
        tracing::debug!(
            %collection,
            records = loaded.document.records.len(),
            rejected = loaded.rejected.len(),
            "loaded collection"
        );
        Ok(loaded)
    }

    /// Load a sequence-shaped collection, or an empty document if the file is absent.
    ///
    /// # Errors
    /// Same as [`RecordStore::load`] for a file that exists.
    pub fn load_or_default<R: DeserializeOwned + Record>(
        &self,
        collection: Collection,
    ) -> Result<Document<Vec<R>>, StoreError> {
        if self.exists(collection) {
            self.load(collection)
        } else {
            Ok(Document::new(Vec::new()))
        }
    }

    /// Load `committee-membership-current`, which maps committee codes to member lists.
    ///
    /// # Errors
    /// Same as [`RecordStore::load`], except the top level must be a mapping.
    pub fn load_membership(&self) -> Result<Document<Membership>, StoreError> {
        self.load_membership_partial()?
            .into_document(Collection::CommitteeMembershipCurrent)
    }

    /// Load `committee-membership-current`, setting aside committees whose
    /// member lists fail typed conversion.
    ///
    /// # Errors
    /// [`StoreError::Io`], [`StoreError::Syntax`] or [`StoreError::MalformedRecord`].
    pub fn load_membership_partial(&self) -> Result<PartialLoad<Membership>, StoreError> {
        let text = self.read(Collection::CommitteeMembershipCurrent)?;
        parse_membership_partial(&text)
    }

    /// Atomically rewrite `committee-membership-current`.
    ///
    /// # Errors
    /// Returns [`StoreError::Serialize`] or [`StoreError::Io`].
    pub fn save_membership(&self, document: &Document<Membership>) -> Result<(), StoreError> {
        self.save(Collection::CommitteeMembershipCurrent, document)
    }

    /// Atomically rewrite a collection.
    ///
    /// # Errors
    /// Returns [`StoreError::Serialize`] or [`StoreError::Io`].
    pub fn save<T: Records>(
        &self,
        collection: Collection,
        document: &Document<T>,
    ) -> Result<(), StoreError> {
        let text = document.render(collection)?;
        self.write_atomic(collection, &text)?;
        tracing::debug!(%collection, "saved collection");
        Ok(())
    }

    fn write_atomic(&self, collection: Collection, text: &str) -> Result<(), StoreError> {
        let path = self.path(collection);
        let io_err = |source| StoreError::Io {
            collection,
            path: path.clone(),
            source,
        };
        let mut tmp = NamedTempFile::new_in(&self.root).map_err(io_err)?;
        tmp.write_all(text.as_bytes()).map_err(io_err)?;
        tmp.as_file().sync_all().map_err(io_err)?;
        tmp.persist(&path).map_err(|e| io_err(e.error))?;
        Ok(())
    }

    /// Load and re-save one collection, rewriting it only when the
    /// canonical serialization differs from the bytes on disk.
    ///
    /// # Errors
    /// Any load or save error for the collection.
    pub fn lint(&self, collection: Collection) -> Result<LintOutcome, StoreError> {
        let original = self.read(collection)?;
        let (records, rendered) = match collection {
            Collection::LegislatorsCurrent | Collection::LegislatorsHistorical => {
                render_lint::<Legislator>(collection, &original)?
            }
            Collection::CommitteesCurrent | Collection::CommitteesHistorical => {
                render_lint::<Committee>(collection, &original)?
            }
            Collection::DistrictOffices => render_lint::<OfficeEntry>(collection, &original)?,
            Collection::SocialMedia => render_lint::<SocialMediaEntry>(collection, &original)?,
            Collection::CommitteeMembershipCurrent => {
                let doc = parse_membership(&original)?;
                (doc.records.len(), doc.render(collection)?)
            }
        };
        let rewritten = rendered != original;
        if rewritten {
            self.write_atomic(collection, &rendered)?;
        }
        Ok(LintOutcome {
            collection,
            records,
            rewritten,
        })
    }

    /// Lint every collection present in the store.
    ///
    /// # Errors
    /// The first collection that fails to load or save.
    pub fn lint_all(&self) -> Result<Vec<LintOutcome>, StoreError> {
        Collection::ALL
            .into_iter()
            .filter(|c| self.exists(*c))
            .map(|c| self.lint(c))
            .collect()
    }
}

fn render_lint<R: DeserializeOwned + Record>(
    collection: Collection,
    text: &str,
) -> Result<(usize, String), StoreError> {
    let doc = parse_sequence::<R>(collection, text)?;
    Ok((doc.records.len(), doc.render(collection)?))
}
