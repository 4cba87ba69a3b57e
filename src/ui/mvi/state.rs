/// Marker trait for store state.
///
/// Cloned for snapshots and readers, compared to skip no-op notifications.
pub trait UiState: Clone + PartialEq + Default + Send + 'static {}
