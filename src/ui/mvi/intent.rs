/// Marker trait for actions fed to a reducer: key presses, sync results.
pub trait Intent: Send + 'static {}
