//! Change notification for in-memory repositories.
//!
//! Every mutable repository owns an [`ObserverRegistry`]. After a mutation has
//! been applied, the repository fans out a [`ChangeEvent`] to its observers in
//! subscription order. The event is a hint: observers re-query the repository
//! for the current state rather than treat the event as a diff.

pub mod event;
pub mod observer;
pub mod subscription;

pub use event::ChangeEvent;
pub use observer::{Observer, ObserverId, ObserverRegistry};
pub use subscription::Subscription;
