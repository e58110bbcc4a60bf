//! # State Module
//!
//! Application state for the checkout session.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌──────────────────────────────┐   ┌──────────────────────────────┐   │
//! │  │       CheckoutState          │   │        ConfigState           │   │
//! │  │                              │   │                              │   │
//! │  │  • CatalogStatus             │   │  • store name / currency     │   │
//! │  │  • Catalog                   │   │  • total policy              │   │
//! │  │  • OrderState                │   │  • catalog retry settings    │   │
//! │  └──────────────────────────────┘   └──────────────────────────────┘   │
//! │                                                                         │
//! │  • CheckoutState: owned by the session loop, changed only through      │
//! │    its transition methods                                              │
//! │  • ConfigState: read-only after startup                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod checkout;
mod config;

pub use checkout::{CatalogStatus, CheckoutState};
pub use config::{CatalogSettings, ConfigError, ConfigState};
