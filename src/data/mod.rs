//! Data layer: core types, the property source, filtering and export.
//!
//! Architecture:
//! ```text
//!   PropertySource (demo table)        Google Sheet
//!        │                                  │
//!        ▼                                  ▼
//!   Vec<PropertyRecord>               sheets::client → SheetTable
//!        │                                  │
//!        ▼                                  │
//!   ┌──────────┐                            │
//!   │  filter   │  vacancy + rent range     │
//!   └──────────┘  → indices, Summary        │
//!        │                                  │
//!        ▼                                  ▼
//!   ┌──────────┐                       ┌──────────┐
//!   │  export   │  retained rows → CSV │  export   │
//!   └──────────┘                       └──────────┘
//! ```

pub mod export;
pub mod filter;
pub mod model;
pub mod provider;
