//! Pure derivation layer
//!
//! Everything here is a function of the raw record collections: no I/O,
//! no hidden caches that outlive a pass. The engine is re-run in full
//! whenever any input collection or the selected month changes.

pub mod balance;
pub mod classify;
pub mod groups;
pub mod inflow;
pub mod integrity;
pub mod register;

pub use balance::{genesis_month, BalanceEngine};
pub use groups::{
    build_month_view, patch_category, CategoryGroupData, CategoryRow, CategoryRowPatch,
    CollapseState,
};
pub use inflow::available_to_budget;
pub use integrity::verify_transfer_pairs;
pub use register::{normalize, NormalizedTransaction};
