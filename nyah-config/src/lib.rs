pub mod env;
pub mod model;
pub mod store;

pub use env::Env;
pub use store::{
    ConfigStore, ConfigStores, Document, DocumentKind, GrantCommandsDoc, KeywordResponsesDoc,
    RoleTriggersDoc,
};
