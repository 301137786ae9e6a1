// Discount rule storage and retrieval
//
// Five typed collections (flat percentage, BOGO, shipping, buy-X-get-Y,
// bulk) plus the catch-all collection written by the generic save endpoint.
// Records are JSON blobs; only `conditions` entries are sanitized on the
// way in, everything else passes through untouched.

pub mod handlers;
pub mod models;
pub mod repository;
pub mod sanitize;
pub mod vocabulary;

pub use models::{Condition, ConditionValue, DiscountKind, DiscountRecord, SaveAck};
pub use repository::DiscountRepository;
