//! Business logic services.

#![allow(missing_docs)]

pub mod friend;
pub mod pin;
pub mod priority;
pub mod profile;
pub mod purchase;
pub mod user;
pub mod wishlist;
pub mod wishlist_item;

pub use friend::{CandidateView, FriendService, FriendView};
pub use pin::{PinService, PinView};
pub use priority::PriorityService;
pub use profile::{ProfileOverview, ProfileService, UpsertProfileInput};
pub use purchase::{PurchaseService, PurchaseView};
pub use user::{RegisterInput, UserService};
pub use wishlist::{
    CreateWishlistInput, UpdateWishlistInput, WishlistBuckets, WishlistDetail, WishlistService,
};
pub use wishlist_item::{CreateItemInput, ItemView, UpdateItemInput, WishlistItemService};
