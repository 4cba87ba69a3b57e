/// Marker trait for intents.
///
/// An intent is either a viewer action (a drop, a typed amount, a held
/// modifier) or a system event (a server push, a request settlement).
pub trait Intent: Send + 'static {}
