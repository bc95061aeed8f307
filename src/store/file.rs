use std::fmt::{Debug, Formatter};
use std::fs::File;
use std::io::{Read, Write};
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use crate::store::codec::{self, FORMAT_HEADER_LEN, MAX_SNAPSHOT_BYTES};
use crate::store::{Schema, SnapshotStore, StoreError};
use crate::{Aggregate, AggregateState};

/// File implementation of the [`SnapshotStore`]. Every save replaces the whole file with a
/// snapshot encoded through the `S` schema.
///
/// The file is opened at the beginning of each [`SnapshotStore::save`] or [`SnapshotStore::load`]
/// call and closed before it returns, whatever the outcome.
pub struct FileStore<A, S> {
    path: PathBuf,
    _schema: PhantomData<fn() -> (A, S)>,
}

impl<A, S> FileStore<A, S>
where
    A: Aggregate,
    S: Schema<A::State>,
{
    /// Creates a new instance of a [`FileStore`] writing to and reading from `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            _schema: PhantomData,
        }
    }

    /// Returns the path of the snapshot file
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl<A, S> SnapshotStore for FileStore<A, S>
where
    A: Aggregate,
    S: Schema<A::State>,
{
    type Aggregate = A;
    type Error = StoreError;

    #[tracing::instrument(skip_all, fields(path = %self.path.display(), aggregate_id = %aggregate_state.id()), err)]
    fn save(&self, aggregate_state: &AggregateState<A::State>) -> Result<(), Self::Error> {
        // Encoding first: a failing encode must not truncate the previous snapshot.
        let bytes: Vec<u8> = codec::encode::<A::State, S>(aggregate_state)?;

        let mut file: File = File::create(&self.path)?;
        file.write_all(&bytes)?;
        file.sync_all()?;

        tracing::debug!(bytes = bytes.len(), "snapshot written");
        Ok(())
    }

    #[tracing::instrument(skip_all, fields(path = %self.path.display()), err)]
    fn load(&self) -> Result<AggregateState<A::State>, Self::Error> {
        // One byte past the limit is enough for the decoder to reject oversized files.
        let max_len: u64 = FORMAT_HEADER_LEN as u64 + MAX_SNAPSHOT_BYTES + 1;

        let mut bytes: Vec<u8> = vec![];
        File::open(&self.path)?.take(max_len).read_to_end(&mut bytes)?;

        let aggregate_state: AggregateState<A::State> = codec::decode::<A::State, S>(&bytes)?;
        tracing::debug!(aggregate_id = %aggregate_state.id(), bytes = bytes.len(), "snapshot read");
        Ok(aggregate_state)
    }
}

impl<A, S> Clone for FileStore<A, S> {
    fn clone(&self) -> Self {
        Self {
            path: self.path.clone(),
            _schema: PhantomData,
        }
    }
}

impl<A, S> Debug for FileStore<A, S> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileStore").field("path", &self.path).finish()
    }
}
