//! Product and work breakdown identifiers.
//!
//! - `PbsId`: `PBS-{AXIS}{SUBDOM}-ATA{cc}-{ss}-{bb}-{ITEM}`
//! - `WbsId`: `WBS-{PHASE}-{n(.n)*}`
//!
//! Each type has a validating constructor and a structural parser. The
//! parsers report both a wrong shape and a failed field as unparseable;
//! `check()` keeps the two apart.

pub mod pbs;
pub mod wbs;

pub use crate::error::ParseOutcome;
