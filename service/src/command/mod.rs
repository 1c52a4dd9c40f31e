//! [`Command`] definition.

pub mod authorize_admin_session;
pub mod create_admin_session;
pub mod create_listing;
pub mod delete_listing;
pub mod delete_listing_photo;
pub mod save_preferences;
pub mod set_listing_hidden;
pub mod update_listing;
pub mod upload_photo;

/// [`Command`] of the [`Service`].
///
/// [`Service`]: crate::Service
pub use common::Handler as Command;

pub use self::{
    authorize_admin_session::AuthorizeAdminSession,
    create_admin_session::CreateAdminSession, create_listing::CreateListing,
    delete_listing::DeleteListing, delete_listing_photo::DeleteListingPhoto,
    save_preferences::SavePreferences, set_listing_hidden::SetListingHidden,
    update_listing::UpdateListing, upload_photo::UploadPhoto,
};
