//! Database repositories.

mod friend;
mod pin;
mod priority;
mod profile;
mod purchase;
mod user;
mod wishlist;
mod wishlist_item;

pub use friend::FriendRepository;
pub use pin::PinRepository;
pub use priority::PriorityRepository;
pub use profile::ProfileRepository;
pub use purchase::PurchaseRepository;
pub use user::UserRepository;
pub use wishlist::WishlistRepository;
pub use wishlist_item::WishlistItemRepository;
