mod intent;
mod reducer;
mod state;

pub use intent::AddFormIntent;
pub use reducer::AddFormReducer;
pub use state::{AddFormState, FormField};
