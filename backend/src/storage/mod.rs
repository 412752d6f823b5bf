//! Persistence layer: storage traits plus the file-based implementation.

pub mod csv;
pub mod traits;

pub use csv::{
    CsvConnection, DeliveryLogRepository, NotificationRepository, SymptomRepository,
    UserRepository,
};
pub use traits::{DeliveryLogStorage, NotificationStorage, SymptomStorage, UserStorage};
