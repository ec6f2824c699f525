pub use super::log::Entity as Log;
pub use super::project::Entity as Project;
pub use super::saved_schema::Entity as SavedSchema;
pub use super::user::Entity as User;
