/// Marker trait for reducer-owned state. `Default` is the initial state.
pub trait UiState: Clone + PartialEq + Default + Send + 'static {}
