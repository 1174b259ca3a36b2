//! Storage layer for homebudget
//!
//! A ledger is one JSON document in one file, optionally encrypted. The
//! layers, from the bottom:
//!
//! - [`TextEncoder`]: plaintext or password encoding of the whole text
//! - [`TextFile`]: read with an "absent" result, write with `.bkp` backup
//!   and temp-file-then-rename replace
//! - [`JsonFile`]: typed (de)serialization over a [`TextFile`]

pub mod encoder;
pub mod json_file;
pub mod text_file;
pub mod worker;

pub use encoder::{IdentityEncoder, PasswordEncoder, TextEncoder};
pub use json_file::JsonFile;
pub use text_file::{StagedWrite, TextFile, WriteOutcome};
pub use worker::{CryptoWorker, PendingText};
