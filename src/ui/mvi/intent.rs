//! Base trait for intents (user/system actions) in MVI architecture.

/// Marker trait for intent objects.
///
/// Intents represent:
/// - User actions (key presses, connect/disconnect requests)
/// - Transport events (opened, closed, data, errors)
///
/// Intents are processed by reducers to produce new states.
pub trait Intent: Send + 'static {}
