mod store;

pub use store::{Store, StoreError, WriteReport};
