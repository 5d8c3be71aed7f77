pub mod storage;
pub mod types;

pub use storage::{get_records_path, load_records, save_records};
pub use types::{RecordStore, RescoreSummary, ScoreChange, ScoreRecord, RECORD_STORE_VERSION};
