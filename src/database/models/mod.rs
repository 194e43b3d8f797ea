mod comment;
mod destination;
mod follow;
mod like;
mod post;
mod trip;
mod user;

pub use comment::{Comment, CommentWithAuthor};
pub use destination::Destination;
pub use follow::Follow;
pub use like::Like;
pub use post::{Post, PostDetail};
pub use trip::{Trip, TripWithDestination};
pub use user::{User, UserAccount};
