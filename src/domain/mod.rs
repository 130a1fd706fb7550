//! Domain layer: record identity, ownership key, and the record itself.

pub mod qr_record;
pub mod record_id;
pub mod user_id;

pub use qr_record::{NewQrRecord, QrRecord};
pub use record_id::RecordId;
pub use user_id::UserId;
