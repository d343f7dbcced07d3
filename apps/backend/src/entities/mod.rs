pub mod documents;

pub use documents::Entity as Documents;
pub use documents::Model as DocumentRow;
