//! Build infrastructure cost reports: the record model and its JSON codec.
//!
//! ```no_run
//! use costreport::{decode, encode};
//!
//! let raw = std::fs::read("report.json").unwrap();
//! let report = decode(&raw).unwrap();
//! assert_eq!(decode(&encode(&report)).unwrap(), report);
//! ```

pub mod core;

pub use crate::core::codec::{decode, encode, encode_pretty, DecodeError};
pub use crate::core::models::report::{
    AccountService, Breakdown, CloudAccount, CloudProvider, CostReport, CostReportMetadata,
    EvergreenCost, EvergreenDistroCost, EvergreenProjectCost, EvergreenTaskCost, ServiceItem,
};
pub use crate::core::models::timestamp::Timestamp;
