//! Model-View-Intent primitives shared by the session feature.
//!
//! # Flow
//!
//! ```text
//! Intent ──→ Reducer ──→ State ──→ View
//!    ↑          │
//!    │          └──→ Effects ──→ Transport
//!    └──────────────────────────────┘
//! ```
//!
//! A reducer never touches the port. It hands back effects and the caller
//! (`ui::app::App`) runs them, which is what keeps transitions testable
//! without a device attached.

mod intent;
mod reducer;
mod state;

pub use intent::Intent;
pub use reducer::Reducer;
pub use state::UiState;
