pub mod essay;
pub mod reading;
pub mod streak;
pub mod user;
pub mod vocab;

pub use essay::Essay;
pub use reading::ReadingMaterial;
pub use streak::{StreakRecord, StreakStatus};
pub use user::User;
pub use vocab::VocabEntry;
