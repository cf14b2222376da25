// ドメインモデル（エンティティと値オブジェクト）

mod booking;
mod inventory;
mod rate_plan;
mod room;
mod value_objects;

pub use value_objects::{
    BookingId, Currency, GuestCount, Money, RatePlanId, RoomId, StayDates,
};

pub use booking::{Booking, StayRequest};
pub use inventory::InventoryEntry;
pub use rate_plan::{RatePlan, RatePlanCatalog};
pub use room::Room;
