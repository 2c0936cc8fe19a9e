use crate::records;
use splitta_application::{
    LedgerSource, LedgerSourceError, LedgerWriter, NewExpense, NewMember, NewSettlement,
};
use splitta_domain::{Expense, LedgerSnapshot, Member, MemberId, Settlement};
use std::{
    fs,
    io::{self, BufReader, BufWriter, Write},
    path::{Path, PathBuf},
    sync::Mutex,
};

/// Ledger persisted as a single JSON document.
///
/// Every read loads the file again, so external edits are picked up. Writes go through
/// a sibling temporary file that is then renamed over the ledger file.
#[derive(Debug)]
pub struct JsonLedgerStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonLedgerStore {
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Creates an empty ledger document. Returns `false` when one already exists.
    pub fn init(&self) -> Result<bool, LedgerSourceError> {
        if self.path.exists() {
            return Ok(false);
        }
        self.save(&LedgerSnapshot::default())?;
        tracing::info!(path = %self.path.display(), "created ledger");
        Ok(true)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<LedgerSnapshot, LedgerSourceError> {
        let file = fs::File::open(&self.path)?;
        let snapshot: LedgerSnapshot = serde_json::from_reader(BufReader::new(file))
            .map_err(|err| LedgerSourceError::Malformed(format!("{}: {err}", self.path.display())))?;

        let dangling = snapshot.dangling_member_ids();
        if !dangling.is_empty() {
            tracing::warn!(
                path = %self.path.display(),
                count = dangling.len(),
                "ledger references members that are no longer on the roster"
            );
        }
        Ok(snapshot)
    }

    fn save(&self, snapshot: &LedgerSnapshot) -> Result<(), LedgerSourceError> {
        let tmp_path = self.path.with_extension("json.tmp");
        {
            let file = fs::File::create(&tmp_path)?;
            let mut writer = BufWriter::new(file);
            serde_json::to_writer_pretty(&mut writer, snapshot).map_err(io::Error::from)?;
            writer.write_all(b"\n")?;
            writer.flush()?;
        }
        fs::rename(&tmp_path, &self.path)?;
        Ok(())
    }

    fn update<T>(
        &self,
        apply: impl FnOnce(&mut LedgerSnapshot) -> Result<T, LedgerSourceError>,
    ) -> Result<T, LedgerSourceError> {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| LedgerSourceError::Unavailable("ledger lock poisoned".to_string()))?;
        let mut snapshot = self.load()?;
        let result = apply(&mut snapshot)?;
        self.save(&snapshot)?;
        tracing::info!(path = %self.path.display(), "saved ledger");
        Ok(result)
    }
}

impl LedgerSource for JsonLedgerStore {
    fn snapshot(&self) -> Result<LedgerSnapshot, LedgerSourceError> {
        self.load()
    }
}

impl LedgerWriter for JsonLedgerStore {
    fn insert_expense(&self, expense: NewExpense) -> Result<Expense, LedgerSourceError> {
        self.update(|snapshot| Ok(records::push_expense(snapshot, expense)))
    }

    fn insert_settlement(
        &self,
        settlement: NewSettlement,
    ) -> Result<Settlement, LedgerSourceError> {
        self.update(|snapshot| Ok(records::push_settlement(snapshot, settlement)))
    }

    fn insert_member(&self, member: NewMember) -> Result<Member, LedgerSourceError> {
        self.update(|snapshot| Ok(records::push_member(snapshot, member)))
    }

    fn remove_member(&self, member_id: MemberId) -> Result<Member, LedgerSourceError> {
        self.update(|snapshot| records::take_member(snapshot, member_id))
    }
}
