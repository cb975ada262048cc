mod session;
mod store;

pub use session::Session;
pub use store::CLIENT_ID_KEY;
pub use store::CODE_VERIFIER_KEY;
pub use store::LocalStore;
