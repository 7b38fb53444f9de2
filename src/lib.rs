//! # Lattice Protocol Crate
//!
//! This crate contains the core Scrypto blueprints for the Lattice protocol, a decentralized
//! lending pool that matches quote-token lenders and collateral-backed borrowers through a
//! lattice of price buckets.
//!
//! Lenders deposit quote tokens at the bucket price of their choosing; borrowers post collateral
//! and draw debt from the highest-priced buckets down; bidders can purchase a bucket's deposit
//! claim with collateral, shifting the debt it funded to the next buckets down the lattice.
//!
//! ## Modules
//!
//! The crate is organized into the following modules:
//!
//! - `pool_component`: Defines the main `LatticePool` component, which manages quote deposits,
//!   loans, borrowing, repayment, bid purchases and core protocol parameters. This is the heart
//!   of the protocol's logic.
//! - `bucket_math`: Pure conversion between bucket indices and the geometric price lattice they
//!   represent. Deterministic and side-effect free.
//! - `bucket_ledger`: The ordered set of price buckets backing a pool, including the draw-down,
//!   repayment and purchase-reallocation walks over it.
//! - `events`: Defines the various events emitted by the protocol components, allowing
//!   off-ledger services to track state changes.
//! - `shared_structs`: Contains data structures shared across the pool and its receipts, such as
//!   `LoanAccount`, `LenderReceipt` and the getter return types.

pub mod bucket_ledger;
pub mod bucket_math;
pub mod events;
pub mod pool_component;
pub mod shared_structs;
