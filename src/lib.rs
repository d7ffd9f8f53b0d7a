pub mod core;
pub mod storage;
pub mod ingest;
pub mod query;

pub use crate::core::config::Config;
pub use crate::core::database::DrugDB;
pub use crate::core::error::{Error, ErrorKind, Result};
pub use crate::core::types::{Drug, PrimaryKey};
pub use crate::query::ast::FieldValue;
pub use crate::query::builder::Query;
pub use crate::query::field::Field;

/*
┌──────────────────────────────────────────────────────────────────────────────────┐
│                              DRUGDB STRUCT ARCHITECTURE                           │
└──────────────────────────────────────────────────────────────────────────────────┘

┌─────────────────────────────────── CORE LAYER ───────────────────────────────────┐
│                                                                                   │
│  ┌────────────────────────────────────────────────────────────────────────────┐  │
│  │                              struct DrugDB                                  │  │
│  │  config: Config                  // Source path, CSV copy, logging         │  │
│  │  storage: StorageLayout          // Backing file + lock + CSV copy paths   │  │
│  │  state: Mutex<State>             // drugs: Vec<Drug> (file order),         │  │
│  │                                  // counters: Counters                     │  │
│  │  opened_at: DateTime<Utc>                                                  │  │
│  └────────────────────────────────────────────────────────────────────────────┘  │
│                                                                                   │
│  ┌──────────────────────────┐  ┌──────────────────────┐  ┌────────────────────┐  │
│  │ struct Drug              │  │ struct PrimaryKey    │  │ struct Error       │  │
│  │ • appl_no: i64           │  │ • appl_no            │  │ • kind: ErrorKind  │  │
│  │ • product_no: i64        │  │ • product_no         │  │ • context: String  │  │
│  │ • form: Vec<String>      │  └──────────────────────┘  └────────────────────┘  │
│  │ • strength: Vec<String>  │                                                     │
│  │ • reference_drug: i64    │  ┌──────────────────────┐                           │
│  │ • drug_name: Vec<String> │  │ struct DatabaseStats │                           │
│  │ • active_ingredients     │  │ • record_count       │                           │
│  │ • reference_standard:    │  │ • inserts / deletes  │                           │
│  │   Option<i64>            │  │ • rejected_*         │                           │
│  └──────────────────────────┘  └──────────────────────┘                           │
└───────────────────────────────────────────────────────────────────────────────────┘

┌────────────────────────────────── QUERY LAYER ───────────────────────────────────┐
│                                                                                   │
│  ┌──────────────────────────┐  ┌──────────────────────┐  ┌────────────────────┐  │
│  │ struct Query<'a>         │  │ struct Predicate     │  │ enum Field         │  │
│  │ • db: &'a DrugDB         │  │ • field: Field       │  │ + FIELD_TABLE      │  │
│  │ • predicates: Vec<Pred>  │  │ • value: FieldValue  │  │   (kind, accessor) │  │
│  └──────────────────────────┘  └──────────────────────┘  └────────────────────┘  │
│                                                                                   │
│  results(): first predicate scans the store, later ones narrow the result         │
└───────────────────────────────────────────────────────────────────────────────────┘

┌──────────────────────────────── STORAGE / INGEST ────────────────────────────────┐
│                                                                                   │
│  Products.txt ──tsv──▶ RowSet ──csv──▶ Products_db.csv ──nom──▶ RowSet ──▶ Drug   │
│                                                                                   │
│  backing_file: append_line / remove_line (temp file + persist) / read_lines       │
│  file_lock:    flock on Products.txt.lock around each mutation                   │
└───────────────────────────────────────────────────────────────────────────────────┘
*/
